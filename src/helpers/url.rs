//! URL helper functions

use crate::config::SiteConfig;

/// Whether `path` already carries a scheme or is protocol-relative
pub fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/about") // -> "https://retrofitage.com/about"
/// full_url_for(&config, "/")      // -> "https://retrofitage.com/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

/// Resolve a site-relative path against the site URL, leaving absolute URLs alone
pub fn resolve_url(config: &SiteConfig, path: &str) -> String {
    if is_absolute_url(path) {
        path.to_string()
    } else {
        full_url_for(config, path)
    }
}

/// Canonical URL for an optional site path; the bare site URL when absent
pub fn canonical_url(config: &SiteConfig, path: Option<&str>) -> String {
    match path {
        Some(path) => resolve_url(config, path),
        None => config.url.trim_end_matches('/').to_string(),
    }
}
