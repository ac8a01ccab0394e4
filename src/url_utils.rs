//! URL Utility Functions
//!
//! Base URL derivation and resolution of stylesheet and image references
//! found in fetched pages.

use url::Url;

/// Check if a string is a valid absolute `http(s)` URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    match Url::parse(s.trim()) {
        Ok(url) if is_http(&url) && url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Whether a parsed URL uses `http` or `https`. The parser lowercases schemes.
#[inline]
#[must_use]
pub fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Base URL of a page: its origin with the root path (`https://host/`).
///
/// Relative stylesheet and image references are joined against this, not
/// against the page's own path.
///
/// # Examples
/// ```
/// use webpage_binder::url_utils::page_base_url;
///
/// let base = page_base_url("https://example.com/blog/post.html?x=1");
/// assert_eq!(base.map(|u| u.to_string()), Some("https://example.com/".to_string()));
/// assert!(page_base_url("not a url").is_none());
/// ```
#[must_use]
pub fn page_base_url(page_url: &str) -> Option<Url> {
    let parsed = Url::parse(page_url.trim()).ok()?;
    parsed.join("/").ok()
}

/// Convert a relative or absolute reference to absolute form.
///
/// Absolute `http(s)` references and special schemes (`data:`, `mailto:`,
/// ...) pass through unchanged. Anything else is joined against `base`.
///
/// # Returns
/// * The absolute URL string, or the trimmed original if resolution fails
#[must_use]
pub fn create_absolute_url(url_str: &str, base: &Url) -> String {
    let url_str = url_str.trim();

    if url_str.is_empty() {
        return String::new();
    }

    if url_str.starts_with("data:")
        || url_str.starts_with("javascript:")
        || url_str.starts_with("mailto:")
        || url_str.starts_with("tel:")
    {
        return url_str.to_string();
    }

    let (is_abs, _) = is_absolute_url(url_str);
    if is_abs {
        return url_str.to_string();
    }

    match base.join(url_str) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => url_str.to_string(),
    }
}

/// Whether the reference is an inline `data:` URI.
#[inline]
#[must_use]
pub fn is_data_uri(s: &str) -> bool {
    s.trim_start().get(..5).is_some_and(|p| p.eq_ignore_ascii_case("data:"))
}
