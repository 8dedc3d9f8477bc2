//! Crawler module for listing page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The fetch and extract capabilities and their default implementations
//! - The URL frontier (visited set and pending queue)
//! - Result aggregation into a report
//! - Overall crawl control (budget, pacing, termination)

mod aggregator;
mod controller;
mod extractor;
mod fetcher;
mod frontier;

pub use aggregator::{build_report, ResultAggregator};
pub use controller::{CrawlController, DEFAULT_PAGINATION_PARAM};
pub use extractor::{Extraction, RecordExtractor, SelectorExtractor};
pub use fetcher::{build_http_client, HttpFetcher, PageContent, PageFetcher};
pub use frontier::UrlFrontier;

use crate::config::Config;
use crate::report::CrawlReport;
use crate::CrawlError;

/// Runs a complete crawl operation from configuration
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP fetcher
/// 2. Compile the extraction selectors
/// 3. Run the controller over the configured base URL and budget
///
/// Persisting the report is left to the caller.
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed successfully
/// * `Err(CrawlError)` - Crawl failed
///
/// # Example
///
/// ```no_run
/// use catalog_crawler::config::load_config;
/// use catalog_crawler::crawler::crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("crawler.toml"))?;
/// let report = crawl(&config).await?;
/// println!("{} records", report.total_records);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config) -> Result<CrawlReport, CrawlError> {
    let fetcher = HttpFetcher::new(&config.http)?;
    let extractor = SelectorExtractor::from_config(&config.extractor)?;

    let controller = CrawlController::new(fetcher, extractor)
        .with_pagination_param(config.extractor.pagination_param.as_str());

    controller
        .run(
            &config.crawler.base_url,
            config.crawler.max_pages,
            config.crawler.delay(),
        )
        .await
}
