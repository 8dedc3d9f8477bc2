//! Statistics derived from a crawl report
//!
//! This module provides functionality for summarizing and displaying
//! a report, whether it was just produced or loaded from disk.

use crate::report::{CrawlReport, CRAWL_DATE_FORMAT};
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStatistics {
    pub total_records: usize,

    /// Pages fetched successfully, base page included
    pub pages_crawled: usize,

    pub pages_skipped: usize,

    pub unique_titles: usize,

    /// Titles appearing more than once, with their counts, most frequent first
    pub duplicate_titles: Vec<(String, usize)>,

    pub records_with_url: usize,

    pub records_with_score: usize,
}

impl ReportStatistics {
    /// Computes statistics for a report
    pub fn from_report(report: &CrawlReport) -> Self {
        let mut title_counts: HashMap<&str, usize> = HashMap::new();
        for record in &report.records {
            *title_counts.entry(record.title.as_str()).or_insert(0) += 1;
        }

        let mut duplicate_titles: Vec<(String, usize)> = title_counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(title, count)| (title.to_string(), *count))
            .collect();
        duplicate_titles.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            total_records: report.records.len(),
            pages_crawled: report.pages_crawled,
            pages_skipped: report.skipped_pages.len(),
            unique_titles: title_counts.len(),
            duplicate_titles,
            records_with_url: report.records.iter().filter(|r| !r.url.is_empty()).count(),
            records_with_score: report
                .records
                .iter()
                .filter(|r| !r.score.is_empty())
                .count(),
        }
    }
}

/// Prints report statistics to stdout
pub fn print_statistics(report: &CrawlReport) {
    let stats = ReportStatistics::from_report(report);

    println!("=== Catalog Crawl Statistics ===\n");
    println!("Crawl date:       {}", report.crawl_date.format(CRAWL_DATE_FORMAT));
    println!("Total records:    {}", stats.total_records);
    println!("Unique titles:    {}", stats.unique_titles);
    println!("Pages crawled:    {}", stats.pages_crawled);
    println!("Pages skipped:    {}", stats.pages_skipped);
    println!("With link:        {}", stats.records_with_url);
    println!("With score:       {}", stats.records_with_score);

    if !stats.duplicate_titles.is_empty() {
        println!("\nTitles listed more than once:");
        for (title, count) in stats.duplicate_titles.iter().take(20) {
            println!("  {} ({}x)", title, count);
        }
    }

    if !report.skipped_pages.is_empty() {
        println!("\nSkipped pages:");
        for skipped in &report.skipped_pages {
            println!("  {} - {}", skipped.url, skipped.reason);
        }
    }
}
