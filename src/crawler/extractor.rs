//! Record extraction from listing markup
//!
//! This module defines the extraction capability the controller depends on
//! and a CSS-selector implementation of it. The selector implementation
//! extracts:
//! - One record per listing item (title, link, cover, labels, score)
//! - Pagination hrefs from the first pagination selector that matches

use crate::config::ExtractorConfig;
use crate::crawler::fetcher::PageContent;
use crate::report::Record;
use crate::url::normalize_url;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// Records and pagination candidates found on one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<Record>,

    /// Raw pagination hrefs in document order, possibly relative
    pub pagination_links: Vec<String>,
}

/// Capability to turn one page's markup into records
///
/// Implementations skip malformed entries individually; an entry without a
/// title never produces a record.
pub trait RecordExtractor: Send + Sync {
    /// Extracts records from `page`, resolving record links against `base_url`
    fn extract(&self, page: &PageContent, base_url: &str) -> Extraction;
}

/// Extracts records using the CSS selectors of an `ExtractorConfig`
#[derive(Debug, Clone)]
pub struct SelectorExtractor {
    item: Selector,
    title: Selector,
    link: Selector,
    image: Selector,
    subtitle: Selector,
    update: Selector,
    score: Selector,
    update_marker: String,
    pagination: Vec<Selector>,
}

impl SelectorExtractor {
    /// Compiles all selectors of `config`
    ///
    /// # Returns
    ///
    /// * `Ok(SelectorExtractor)` - All selectors compiled
    /// * `Err(ConfigError)` - A selector is not valid CSS
    pub fn from_config(config: &ExtractorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            item: compile(&config.item_selector)?,
            title: compile(&config.title_selector)?,
            link: compile(&config.link_selector)?,
            image: compile(&config.image_selector)?,
            subtitle: compile(&config.subtitle_selector)?,
            update: compile(&config.update_selector)?,
            score: compile(&config.score_selector)?,
            update_marker: config.update_marker.clone(),
            pagination: config
                .pagination_selectors
                .iter()
                .map(|s| compile(s))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    /// Builds a single record from one listing item
    ///
    /// Returns None when the item has no usable title.
    fn extract_record(&self, item: ElementRef, base_url: &str) -> Option<Record> {
        let title = match first_text(item, &self.title) {
            Some(title) if !title.is_empty() => title,
            _ => {
                tracing::debug!("Listing item without a title, skipping");
                return None;
            }
        };

        let subtitle = first_text(item, &self.subtitle).unwrap_or_default();

        let url = item
            .select(&self.link)
            .next()
            .and_then(|el| el.value().attr("href"))
            .filter(|href| !href.trim().is_empty())
            .map(|href| normalize_url(href, base_url))
            .unwrap_or_default();

        let image_url = item
            .select(&self.image)
            .next()
            .and_then(|el| el.value().attr("src"))
            .map(str::to_string)
            .unwrap_or_default();

        let (update_label, score) = match first_text(item, &self.update) {
            Some(update_text) => {
                let score_text = first_text(item, &self.score);
                split_update_text(&update_text, &self.update_marker, score_text.as_deref())
            }
            None => (String::new(), String::new()),
        };

        Some(Record {
            title,
            subtitle,
            url,
            image_url,
            update_label,
            score,
        })
    }

    /// Collects hrefs from the first pagination selector with any match
    fn extract_pagination(&self, document: &Html) -> Vec<String> {
        for selector in &self.pagination {
            let anchors: Vec<ElementRef> = document.select(selector).collect();
            if anchors.is_empty() {
                continue;
            }

            return anchors
                .into_iter()
                .filter_map(|a| a.value().attr("href"))
                .map(str::trim)
                .filter(|href| !href.is_empty())
                .map(str::to_string)
                .collect();
        }

        Vec::new()
    }
}

impl RecordExtractor for SelectorExtractor {
    fn extract(&self, page: &PageContent, base_url: &str) -> Extraction {
        let document = Html::parse_document(&page.body);

        let items: Vec<ElementRef> = document.select(&self.item).collect();
        if items.is_empty() {
            tracing::debug!("No listing items found on {}", page.url);
        } else {
            tracing::debug!("Found {} listing items on {}", items.len(), page.url);
        }

        let records = items
            .into_iter()
            .filter_map(|item| self.extract_record(item, base_url))
            .collect();

        Extraction {
            records,
            pagination_links: self.extract_pagination(&document),
        }
    }
}

fn compile(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::Validation(format!("Invalid selector '{}': {:?}", selector, e)))
}

/// Returns the trimmed text of the first element matching `selector`
fn first_text(scope: ElementRef, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// Splits an update element's text into its date label and score
///
/// The label is the text after `marker`, with the score text removed. Both
/// stay empty when the marker is absent.
fn split_update_text(text: &str, marker: &str, score_text: Option<&str>) -> (String, String) {
    if marker.is_empty() {
        return (String::new(), String::new());
    }

    let after_marker = match text.split(marker).nth(1) {
        Some(part) => part.trim(),
        None => return (String::new(), String::new()),
    };

    match score_text {
        Some(score) if !score.is_empty() => {
            let label = after_marker.replace(score, "").trim().to_string();
            (label, score.to_string())
        }
        _ => (after_marker.to_string(), String::new()),
    }
}
