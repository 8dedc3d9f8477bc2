//! Page fetching
//!
//! This module defines the fetch capability the controller depends on and
//! the default HTTP implementation, including:
//! - Building HTTP clients with browser-like headers
//! - GET requests with a bounded per-request timeout
//! - Error classification into `FetchError`

use crate::config::HttpConfig;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use reqwest::Client;
use std::time::Duration;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";

/// Raw markup of one fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    /// Effective URL after redirects
    pub url: String,

    /// Page body as text
    pub body: String,
}

impl PageContent {
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }
}

/// Capability to retrieve one page
///
/// Implementations are expected to bound each request in time and report
/// a timeout as `FetchError::Timeout`.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use catalog_crawler::config::HttpConfig;
/// use catalog_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

    // Header values are checked during config validation
    if let Ok(value) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, value);
    }
    if let Some(referer) = &config.referer {
        if let Ok(value) = HeaderValue::from_str(referer) {
            headers.insert(REFERER, value);
        }
    }

    for (name, value) in &config.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!("Ignoring invalid header {}", name),
        }
    }

    let timeout = Duration::from_secs(config.timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP(S) with reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Fetches a URL and classifies failures
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx with non-blank body | `Ok(PageContent)` |
    /// | Non-2xx status | `FetchError::Status` |
    /// | Timeout | `FetchError::Timeout` |
    /// | Connection or body error | `FetchError::Network` |
    /// | Blank body | `FetchError::EmptyBody` |
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError> {
        let response = self.client.get(url).send().await.map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await.map_err(classify_error)?;

        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }

        Ok(PageContent::new(final_url, body))
    }
}

fn classify_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Network(format!("Connection failed: {}", error))
    } else {
        FetchError::Network(error.to_string())
    }
}
