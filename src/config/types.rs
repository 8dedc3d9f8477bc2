use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Default number of additional pages fetched beyond the base page
pub const DEFAULT_MAX_PAGES: u32 = 10;

/// Default pause before each secondary page fetch (milliseconds)
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl budget and pacing
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Absolute URL of the first listing page
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum number of pages to fetch beyond the base page
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// Pause before each secondary page fetch (milliseconds)
    #[serde(rename = "delay-ms", default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl CrawlerConfig {
    /// Returns the configured inter-request delay
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,

    /// Sent as the Referer header when set
    #[serde(default)]
    pub referer: Option<String>,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Additional request headers, sent as given
    ///
    /// A `[http.headers]` table replaces the browser defaults entirely; an
    /// empty table sends none.
    #[serde(default = "default_extra_headers")]
    pub headers: BTreeMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            referer: None,
            timeout_secs: default_timeout_secs(),
            headers: default_extra_headers(),
        }
    }
}

/// CSS selectors describing one site's listing layout
///
/// All item-level selectors are evaluated relative to a single element
/// matched by `item_selector`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ExtractorConfig {
    pub item_selector: String,
    pub title_selector: String,
    pub link_selector: String,
    pub image_selector: String,
    pub subtitle_selector: String,
    pub update_selector: String,
    pub score_selector: String,

    /// Text preceding the update date inside the update element
    pub update_marker: String,

    /// Tried in order; the first selector matching anything wins
    pub pagination_selectors: Vec<String>,

    /// Query parameter a pagination link must carry
    pub pagination_param: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            item_selector: "ul#contList > li".to_string(),
            title_selector: "p.ell > a".to_string(),
            link_selector: "a.bcover".to_string(),
            image_selector: "a.bcover > img".to_string(),
            subtitle_selector: "a.bcover > span.tt".to_string(),
            update_selector: "span.updateon".to_string(),
            score_selector: "span.updateon > em".to_string(),
            update_marker: "更新於：".to_string(),
            pagination_selectors: vec![
                "div.page-pagination a".to_string(),
                "div.pager a".to_string(),
                "div.pages a".to_string(),
                "ul.pager a".to_string(),
            ],
            pagination_param: "page".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON report
    #[serde(rename = "json-path", default = "default_json_path")]
    pub json_path: String,

    /// Path of the markdown summary, if one should be written
    #[serde(rename = "summary-path", default)]
    pub summary_path: Option<String>,

    /// Where the raw base page is dumped when nothing could be extracted
    #[serde(rename = "debug-html-path", default = "default_debug_html_path")]
    pub debug_html_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: default_json_path(),
            summary_path: None,
            debug_html_path: default_debug_html_path(),
        }
    }
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36".to_string()
}

fn default_accept_language() -> String {
    "zh-TW,zh;q=0.9,en-US;q=0.8,en;q=0.7".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

/// Client hints and fetch metadata a desktop Chrome sends on navigation
fn default_extra_headers() -> BTreeMap<String, String> {
    [
        ("sec-ch-ua", r#""Chromium";v="121", "Not A(Brand";v="99""#),
        ("sec-ch-ua-mobile", "?0"),
        ("sec-ch-ua-platform", r#""macOS""#),
        ("sec-fetch-dest", "document"),
        ("sec-fetch-mode", "navigate"),
        ("sec-fetch-site", "same-origin"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}

fn default_json_path() -> String {
    "catalog_data/all_records.json".to_string()
}

fn default_debug_html_path() -> String {
    "debug_page.html".to_string()
}
