use crate::config::types::{Config, CrawlerConfig, ExtractorConfig, HttpConfig, OutputConfig};
use crate::ConfigError;
use reqwest::header::{HeaderName, HeaderValue};
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    validate_extractor_config(&config.extractor)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl budget and base URL
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must use HTTP or HTTPS scheme",
            config.base_url
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    // delay_ms is unsigned, any value (including 0) is a valid pause

    Ok(())
}

/// Validates HTTP client settings
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    validate_header_value("user-agent", &config.user_agent)?;
    validate_header_value("accept-language", &config.accept_language)?;

    for (name, value) in &config.headers {
        HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            ConfigError::Validation(format!("Invalid header name '{}' in [http.headers]", name))
        })?;
        validate_header_value(name, value)?;
    }

    if let Some(referer) = &config.referer {
        Url::parse(referer)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid referer '{}': {}", referer, e)))?;
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates that every selector compiles
fn validate_extractor_config(config: &ExtractorConfig) -> Result<(), ConfigError> {
    let selectors = [
        ("item-selector", &config.item_selector),
        ("title-selector", &config.title_selector),
        ("link-selector", &config.link_selector),
        ("image-selector", &config.image_selector),
        ("subtitle-selector", &config.subtitle_selector),
        ("update-selector", &config.update_selector),
        ("score-selector", &config.score_selector),
    ];

    for (name, selector) in selectors {
        validate_selector(name, selector)?;
    }

    for selector in &config.pagination_selectors {
        validate_selector("pagination-selectors", selector)?;
    }

    if config.pagination_param.is_empty() {
        return Err(ConfigError::Validation(
            "pagination-param cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.json_path.is_empty() {
        return Err(ConfigError::Validation(
            "json-path cannot be empty".to_string(),
        ));
    }

    if config.debug_html_path.is_empty() {
        return Err(ConfigError::Validation(
            "debug-html-path cannot be empty".to_string(),
        ));
    }

    if matches!(&config.summary_path, Some(path) if path.is_empty()) {
        return Err(ConfigError::Validation(
            "summary-path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

fn validate_selector(name: &str, selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector).map_err(|e| {
        ConfigError::Validation(format!("Invalid {} '{}': {:?}", name, selector, e))
    })?;
    Ok(())
}

fn validate_header_value(name: &str, value: &str) -> Result<(), ConfigError> {
    HeaderValue::from_str(value).map_err(|_| {
        ConfigError::Validation(format!("{} contains characters not allowed in a header", name))
    })?;
    Ok(())
}
