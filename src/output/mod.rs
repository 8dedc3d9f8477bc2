//! Output module for persisting crawl reports
//!
//! This module handles:
//! - The sink interface reports are written through
//! - Writing the JSON report and loading it back
//! - Generating markdown summaries
//! - Dumping the raw page when extraction finds nothing
//! - Report statistics

mod debug;
mod json;
mod markdown;
pub mod stats;
mod traits;

pub use debug::write_debug_page;
pub use json::{load_report, JsonFileSink};
pub use markdown::{format_markdown_summary, MarkdownSummarySink};
pub use stats::{print_statistics, ReportStatistics};
pub use traits::{OutputError, OutputResult, Sink};
