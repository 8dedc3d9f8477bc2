//! Crawl controller - main crawl orchestration logic
//!
//! This module contains the crawl loop that coordinates:
//! - Fetching and extracting the base page
//! - Seeding the frontier with the base page's pagination links
//! - Paced, strictly sequential fetching of secondary pages
//! - Accumulating records into the final report
//!
//! Pagination is discovered on the base page only; links found on secondary
//! pages are not followed.

use crate::crawler::aggregator::ResultAggregator;
use crate::crawler::extractor::RecordExtractor;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::UrlFrontier;
use crate::report::CrawlReport;
use crate::url::is_pagination_link;
use crate::CrawlError;
use std::time::{Duration, Instant};

/// Default query parameter identifying pagination links
pub const DEFAULT_PAGINATION_PARAM: &str = "page";

/// Drives one crawl over injected fetch and extract capabilities
///
/// The controller holds no crawl state of its own: the frontier and the
/// record accumulator live only for the duration of a `run` call.
pub struct CrawlController<F, E> {
    fetcher: F,
    extractor: E,
    pagination_param: String,
}

impl<F, E> CrawlController<F, E>
where
    F: PageFetcher,
    E: RecordExtractor,
{
    /// Creates a controller using the default pagination parameter (`page`)
    pub fn new(fetcher: F, extractor: E) -> Self {
        Self {
            fetcher,
            extractor,
            pagination_param: DEFAULT_PAGINATION_PARAM.to_string(),
        }
    }

    /// Sets the query parameter a link must carry to count as pagination
    pub fn with_pagination_param(mut self, param: impl Into<String>) -> Self {
        self.pagination_param = param.into();
        self
    }

    /// Runs a crawl starting at `base_url`
    ///
    /// 1. Fetch and extract the base page; failure to fetch is fatal, and
    ///    zero records is reported as a structural mismatch
    /// 2. Queue the base page's pagination links in discovery order
    /// 3. While fewer than `max_pages` secondary pages were processed and
    ///    targets remain: wait `delay`, fetch, extract, accumulate
    /// 4. Build the report
    ///
    /// Secondary page failures are skipped and noted in the report; they do
    /// not count against `max_pages`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Absolute URL of the first listing page
    /// * `max_pages` - Maximum number of secondary pages to process
    /// * `delay` - Pause before every secondary fetch
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - Crawl completed, possibly with skipped pages
    /// * `Err(CrawlError::FatalFetch)` - The base page could not be fetched
    /// * `Err(CrawlError::StructuralMismatch)` - The base page yielded no records
    pub async fn run(
        &self,
        base_url: &str,
        max_pages: u32,
        delay: Duration,
    ) -> Result<CrawlReport, CrawlError> {
        let start_time = Instant::now();

        tracing::info!("Fetching base page: {}", base_url);
        let base_page = match self.fetcher.fetch(base_url).await {
            Ok(page) => page,
            Err(source) => {
                tracing::error!("Failed to fetch base page {}: {}", base_url, source);
                return Err(CrawlError::FatalFetch {
                    url: base_url.to_string(),
                    source,
                });
            }
        };

        let extraction = self.extractor.extract(&base_page, base_url);
        tracing::info!("Found {} records on the base page", extraction.records.len());

        if extraction.records.is_empty() {
            tracing::error!("No records extracted from {}", base_url);
            return Err(CrawlError::StructuralMismatch {
                url: base_url.to_string(),
                content: base_page.body,
            });
        }

        let mut frontier = UrlFrontier::new(base_url);
        let mut results = ResultAggregator::new();
        results.add_page(extraction.records);

        self.seed_frontier(&mut frontier, &extraction.pagination_links);
        tracing::info!("Queued {} pagination links", frontier.pending_len());

        let mut pages_processed: u32 = 0;

        while pages_processed < max_pages {
            let target = match frontier.pop_next() {
                Some(target) => target,
                None => break,
            };

            tokio::time::sleep(delay).await;

            tracing::info!("Fetching page {}: {}", pages_processed + 2, target);
            match self.fetcher.fetch(&target).await {
                Ok(page) => {
                    let extraction = self.extractor.extract(&page, base_url);
                    tracing::debug!(
                        "Found {} records on {}",
                        extraction.records.len(),
                        target
                    );

                    results.add_page(extraction.records);
                    frontier.mark_visited(&target);
                    pages_processed += 1;
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", target, e);
                    results.record_skip(&target, &e);
                }
            }
        }

        if !frontier.is_empty() {
            tracing::info!(
                "Page budget of {} reached, {} pagination links not fetched",
                max_pages,
                frontier.pending_len()
            );
        }

        let report = results.finish();

        tracing::info!(
            "Crawl completed: {} records from {} pages ({} skipped) in {:?}",
            report.total_records,
            report.pages_crawled,
            report.skipped_pages.len(),
            start_time.elapsed()
        );

        Ok(report)
    }

    /// Queues pagination candidates found on the base page
    ///
    /// Candidates are resolved against the base URL; those without the
    /// pagination parameter or already known to the frontier are dropped.
    fn seed_frontier(&self, frontier: &mut UrlFrontier, links: &[String]) {
        for link in links {
            let target = frontier.normalize(link);

            if !is_pagination_link(&target, &self.pagination_param) {
                tracing::trace!("Ignoring non-pagination link: {}", target);
                continue;
            }

            if frontier.enqueue_if_new(&target) {
                tracing::debug!("Queued pagination link: {}", target);
            }
        }
    }
}
