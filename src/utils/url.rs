// src/utils/url.rs

//! URL manipulation utilities.

/// Check whether a string is an absolute URL (carries a scheme).
///
/// Scheme-less strings such as `/about` or `example.com/about` are treated
/// as paths to be resolved against a base URL.
pub fn has_scheme(candidate: &str) -> bool {
    url::Url::parse(candidate).is_ok()
}

/// Resolve a potentially relative URL against a base URL.
///
/// Absolute URLs pass through unchanged; anything without a scheme is
/// appended to the base as a path. The base must already have its trailing
/// slash stripped.
///
/// # Examples
/// ```
/// use sitemapper::utils::url::resolve;
///
/// assert_eq!(
///     resolve("https://example.com", "/about"),
///     "https://example.com/about"
/// );
/// assert_eq!(
///     resolve("https://example.com", "https://other.com/page"),
///     "https://other.com/page"
/// );
/// ```
pub fn resolve(base: &str, href: &str) -> String {
    if has_scheme(href) {
        return href.to_string();
    }

    format!("{}/{}", base, href.trim_start_matches('/'))
}

/// Strip a single trailing slash from a base URL.
pub fn normalize_base(base: &str) -> String {
    base.strip_suffix('/').unwrap_or(base).to_string()
}
