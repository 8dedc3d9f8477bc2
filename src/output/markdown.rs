//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a crawl
//! report, including totals, the record table, and skipped pages.

use crate::output::stats::ReportStatistics;
use crate::output::traits::{ensure_parent_dir, OutputResult, Sink};
use crate::report::{CrawlReport, CRAWL_DATE_FORMAT};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Writes a markdown summary of the report
#[derive(Debug, Clone)]
pub struct MarkdownSummarySink {
    path: PathBuf,
}

impl MarkdownSummarySink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Sink for MarkdownSummarySink {
    fn persist(&self, report: &CrawlReport) -> OutputResult<()> {
        let markdown = format_markdown_summary(report);

        ensure_parent_dir(&self.path)?;
        let mut file = File::create(&self.path)?;
        file.write_all(markdown.as_bytes())?;

        tracing::info!("Wrote summary to {}", self.path.display());
        Ok(())
    }
}

/// Formats a crawl report as markdown
///
/// # Arguments
///
/// * `report` - The crawl report
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_summary(report: &CrawlReport) -> String {
    let stats = ReportStatistics::from_report(report);
    let mut md = String::new();

    // Title
    md.push_str("# Catalog Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Crawl Date**: {}\n",
        report.crawl_date.format(CRAWL_DATE_FORMAT)
    ));
    md.push_str(&format!("- **Pages Crawled**: {}\n", stats.pages_crawled));
    md.push_str(&format!("- **Pages Skipped**: {}\n\n", stats.pages_skipped));

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Total Records**: {}\n", stats.total_records));
    md.push_str(&format!("- **Unique Titles**: {}\n", stats.unique_titles));
    md.push_str(&format!(
        "- **Records With Link**: {}\n",
        stats.records_with_url
    ));
    md.push_str(&format!(
        "- **Records With Score**: {}\n\n",
        stats.records_with_score
    ));

    // Records
    if !report.records.is_empty() {
        md.push_str("## Records\n\n");
        md.push_str("| # | Title | Latest | Updated | Score |\n");
        md.push_str("|---|-------|--------|---------|-------|\n");

        for (index, record) in report.records.iter().enumerate() {
            let title = if record.url.is_empty() {
                escape_cell(&record.title)
            } else {
                format!("[{}]({})", escape_cell(&record.title), record.url)
            };

            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                index + 1,
                title,
                escape_cell(&record.subtitle),
                escape_cell(&record.update_label),
                escape_cell(&record.score)
            ));
        }
        md.push('\n');
    }

    // Skipped pages
    if !report.skipped_pages.is_empty() {
        md.push_str("## Skipped Pages\n\n");
        md.push_str("| URL | Reason |\n");
        md.push_str("|-----|--------|\n");

        for skipped in &report.skipped_pages {
            md.push_str(&format!(
                "| {} | {} |\n",
                skipped.url,
                escape_cell(&skipped.reason)
            ));
        }
        md.push('\n');
    }

    md
}

/// Keeps a value from breaking the surrounding table row
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}
