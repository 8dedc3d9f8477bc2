//! Catalog-Crawler: a paced crawler for paginated catalog listings
//!
//! This crate fetches a listing page, extracts catalog records from its markup,
//! follows the pagination links discovered on that page up to a page budget,
//! and aggregates everything into a single report ready to be persisted.

pub mod config;
pub mod crawler;
pub mod output;
pub mod report;
pub mod url;

use thiserror::Error;

/// Main error type for a crawl run
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Failed to fetch base page {url}: {source}")]
    FatalFetch { url: String, source: FetchError },

    /// The base page was retrieved but nothing could be extracted from it.
    /// `content` holds the raw markup so callers can inspect what changed.
    #[error("No records extracted from {url}; the page structure may have changed")]
    StructuralMismatch { url: String, content: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by a page fetch
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP status {status}")]
    Status { status: u16 },

    #[error("Request timeout")]
    Timeout,

    #[error("Empty response body")]
    EmptyBody,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlController, PageContent, PageFetcher, RecordExtractor, UrlFrontier};
pub use report::{CrawlReport, Record, SkippedPage};
pub use url::{is_pagination_link, normalize_url};
