//! Report data model
//!
//! `Record` is one extracted catalog entry. `CrawlReport` is the terminal
//! artifact of a crawl: every record collected, in page order, plus counters
//! describing how the crawl went.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Timestamp format used for `crawl_date` in persisted reports
pub const CRAWL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One extracted catalog entry
///
/// Only `title` is guaranteed to be non-empty; extractors drop entries without
/// one before they ever reach the crawler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,

    /// Secondary label, e.g. the latest chapter
    #[serde(default)]
    pub subtitle: String,

    /// Absolute link to the entry, empty if unresolvable
    #[serde(default)]
    pub url: String,

    /// Cover image as found in the markup (may be relative)
    #[serde(default)]
    pub image_url: String,

    #[serde(default)]
    pub update_label: String,

    #[serde(default)]
    pub score: String,
}

impl Record {
    /// Creates a record with only a title set
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: String::new(),
            url: String::new(),
            image_url: String::new(),
            update_label: String::new(),
            score: String::new(),
        }
    }
}

/// A secondary page that could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPage {
    pub url: String,
    pub reason: String,
}

/// Aggregated result of a successful crawl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlReport {
    /// Always equal to `records.len()`
    pub total_records: usize,

    /// Completion time
    #[serde(with = "crawl_date")]
    pub crawl_date: DateTime<Local>,

    /// Base page plus every secondary page fetched successfully
    #[serde(default)]
    pub pages_crawled: usize,

    #[serde(default)]
    pub skipped_pages: Vec<SkippedPage>,

    pub records: Vec<Record>,
}

mod crawl_date {
    use super::CRAWL_DATE_FORMAT;
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(CRAWL_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let naive = NaiveDateTime::parse_from_str(&raw, CRAWL_DATE_FORMAT).map_err(de::Error::custom)?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| de::Error::custom(format!("Nonexistent local time: {}", raw)))
    }
}
