//! Sink trait and output error types
//!
//! A sink persists a finished `CrawlReport`. The crawler never calls a sink
//! itself; callers decide where the report goes.

use crate::report::CrawlReport;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for report sinks
pub trait Sink {
    /// Writes the report to durable storage
    fn persist(&self, report: &CrawlReport) -> OutputResult<()>;
}

/// Creates the parent directory of `path` if it does not exist yet
pub(crate) fn ensure_parent_dir(path: &std::path::Path) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
