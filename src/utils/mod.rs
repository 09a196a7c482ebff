// src/utils/mod.rs

//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Resolve a URL string against a base URL string.
pub fn resolve(base_url: &str, href: &str) -> Option<String> {
    Url::parse(base_url)
        .ok()
        .map(|base| resolve_url(&base, href))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/path/").unwrap();
        assert_eq!(
            resolve_url(&base, "page.html"),
            "https://example.com/path/page.html"
        );
        assert_eq!(
            resolve_url(&base, "/root.html"),
            "https://example.com/root.html"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_resolve_from_string_base() {
        assert_eq!(
            resolve("https://example.com/a/b", "edital.pdf"),
            Some("https://example.com/a/edital.pdf".to_string())
        );
        assert_eq!(resolve("not a url", "edital.pdf"), None);
    }
}
