//! Result aggregation
//!
//! Per-page record batches are appended in the order pages were processed
//! and turned into a `CrawlReport` once the crawl loop ends. Records are
//! never deduplicated here; only URLs are, by the frontier.

use crate::report::{CrawlReport, Record, SkippedPage};
use chrono::Local;

/// Builds a report from a complete record sequence
///
/// The count is the number of records, the timestamp is the current local
/// time, and the records keep their order.
pub fn build_report(records: Vec<Record>) -> CrawlReport {
    CrawlReport {
        total_records: records.len(),
        crawl_date: Local::now(),
        pages_crawled: 0,
        skipped_pages: Vec::new(),
        records,
    }
}

/// Accumulates page results during one crawl
#[derive(Debug, Default)]
pub struct ResultAggregator {
    records: Vec<Record>,
    pages_crawled: usize,
    skipped_pages: Vec<SkippedPage>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one successfully processed page's records
    pub fn add_page(&mut self, records: Vec<Record>) {
        self.records.extend(records);
        self.pages_crawled += 1;
    }

    /// Notes a page that was skipped
    pub fn record_skip(&mut self, url: &str, reason: impl ToString) {
        self.skipped_pages.push(SkippedPage {
            url: url.to_string(),
            reason: reason.to_string(),
        });
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn pages_crawled(&self) -> usize {
        self.pages_crawled
    }

    /// Builds the final report, consuming the aggregator
    pub fn finish(self) -> CrawlReport {
        let mut report = build_report(self.records);
        report.pages_crawled = self.pages_crawled;
        report.skipped_pages = self.skipped_pages;
        report
    }
}
