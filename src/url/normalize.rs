use url::Url;

/// Resolves a possibly-relative URL against a base URL
///
/// Resolution follows the standard URL rules: scheme and host are inherited
/// from the base, `.` and `..` segments are removed, and the query string of
/// the relative reference is preserved. The fragment is dropped, since it
/// never changes which document a URL points at.
///
/// This never fails. When the input cannot be resolved (malformed base or
/// reference), the best available string is returned instead:
///
/// 1. `base.join(relative)` if the base parses
/// 2. `relative` re-serialized if it is itself absolute
/// 3. `relative` trimmed, unchanged otherwise
///
/// # Arguments
///
/// * `relative` - The URL as found in page markup
/// * `base` - The absolute URL to resolve against
///
/// # Examples
///
/// ```
/// use catalog_crawler::url::normalize_url;
///
/// let url = normalize_url("../list/?page=2", "https://example.com/list/view.html");
/// assert_eq!(url, "https://example.com/list/?page=2");
/// ```
pub fn normalize_url(relative: &str, base: &str) -> String {
    let relative = relative.trim();

    match Url::parse(base) {
        Ok(base_url) => match base_url.join(relative) {
            Ok(resolved) => without_fragment(resolved),
            Err(e) => {
                tracing::trace!("Could not resolve {} against {}: {}", relative, base, e);
                relative.to_string()
            }
        },
        Err(_) => Url::parse(relative)
            .map(without_fragment)
            .unwrap_or_else(|_| relative.to_string()),
    }
}

fn without_fragment(mut url: Url) -> String {
    url.set_fragment(None);
    url.to_string()
}

/// Checks whether an absolute URL has the shape of a pagination link
///
/// A pagination link carries the page-selector query parameter (for example
/// `?page=3`). The parameter may be empty-valued, but it must be present as a
/// key; `?pages=3` or `/page/3` do not count.
///
/// # Examples
///
/// ```
/// use catalog_crawler::url::is_pagination_link;
///
/// assert!(is_pagination_link("https://example.com/list?page=2", "page"));
/// assert!(!is_pagination_link("https://example.com/page/2", "page"));
/// ```
pub fn is_pagination_link(url: &str, param: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.query_pairs().any(|(key, _)| key == param),
        Err(_) => false,
    }
}
