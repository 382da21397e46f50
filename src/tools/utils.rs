use url::Url;

/// Scheme named explicitly at the start of `input`, if any.
///
/// `host:port` is not a scheme: `localhost:3000` and `example.com:8080/path` return `None`.
pub fn explicit_scheme(input: &str) -> Option<&str> {
    let (scheme, rest) = input.split_once(':')?;
    let mut chars = scheme.chars();
    let well_formed = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    if !well_formed || rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(scheme)
}

/// Normalize an incomplete URL by adding missing protocol and handling common patterns
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();

    // If already has a protocol, return as-is; the navigate tool decides which ones it accepts
    if explicit_scheme(trimmed).is_some() {
        return trimmed.to_string();
    }

    // Relative path - return as-is
    if trimmed.starts_with('/') || trimmed.starts_with("./") || trimmed.starts_with("../") {
        return trimmed.to_string();
    }

    // localhost special case - use http by default
    if trimmed.starts_with("localhost") || trimmed.starts_with("127.0.0.1") {
        return format!("http://{}", trimmed);
    }

    // Looks like a domain - add https://
    if trimmed.contains('.') {
        return format!("https://{}", trimmed);
    }

    // Single word, e.g. "google" -> "https://www.google.com"
    format!("https://www.{}.com", trimmed)
}

/// Resolve `href` against `base` per RFC 3986.
///
/// An href that is already absolute comes back byte-for-byte unchanged. When `base` cannot act as
/// a base URL (`about:blank`, `data:` documents) the href is kept as authored.
pub fn resolve_href(base: &str, href: &str) -> String {
    if Url::parse(href).is_ok() {
        return href.to_string();
    }

    match Url::parse(base).and_then(|base| base.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            log::debug!("Keeping '{}' relative, cannot resolve against '{}': {}", href, base, e);
            href.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_complete() {
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com/path"), "https://example.com/path");
    }

    #[test]
    fn test_normalize_url_missing_protocol() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("example.com/path"), "https://example.com/path");
        assert_eq!(normalize_url("sub.example.com"), "https://sub.example.com");
    }

    #[test]
    fn test_normalize_url_partial_domain() {
        assert_eq!(normalize_url("google"), "https://www.google.com");
        assert_eq!(normalize_url("github"), "https://www.github.com");
    }

    #[test]
    fn test_normalize_url_localhost() {
        assert_eq!(normalize_url("localhost"), "http://localhost");
        assert_eq!(normalize_url("localhost:3000"), "http://localhost:3000");
        assert_eq!(normalize_url("127.0.0.1:8080"), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_normalize_url_special_protocols() {
        assert_eq!(normalize_url("about:blank"), "about:blank");
        assert_eq!(normalize_url("file:///path/to/file"), "file:///path/to/file");
        assert_eq!(normalize_url("chrome://settings"), "chrome://settings");
        assert_eq!(normalize_url("ftp://x.com/file"), "ftp://x.com/file");
        assert_eq!(normalize_url("mailto:someone@x.com"), "mailto:someone@x.com");
        assert_eq!(normalize_url("HTTPS://Example.com"), "HTTPS://Example.com");
    }

    #[test]
    fn test_explicit_scheme() {
        assert_eq!(explicit_scheme("ftp://x.com/file"), Some("ftp"));
        assert_eq!(explicit_scheme("data:text/html,hi"), Some("data"));
        assert_eq!(explicit_scheme("chrome-extension://abc"), Some("chrome-extension"));
        assert_eq!(explicit_scheme("localhost:3000"), None);
        assert_eq!(explicit_scheme("example.com:8080/path"), None);
        assert_eq!(explicit_scheme("example.com"), None);
        assert_eq!(explicit_scheme("/a:b"), None);
    }

    #[test]
    fn test_normalize_url_relative_and_whitespace() {
        assert_eq!(normalize_url("/path/to/page"), "/path/to/page");
        assert_eq!(normalize_url("../parent"), "../parent");
        assert_eq!(normalize_url("  example.com  "), "https://example.com");
    }

    #[test]
    fn test_resolve_href_relative() {
        assert_eq!(resolve_href("https://x.com/", "/a"), "https://x.com/a");
        assert_eq!(resolve_href("https://x.com/docs/intro", "next"), "https://x.com/docs/next");
        assert_eq!(resolve_href("https://x.com/docs/intro", "../up"), "https://x.com/up");
        assert_eq!(resolve_href("https://x.com/page?q=1", "#top"), "https://x.com/page?q=1#top");
        assert_eq!(resolve_href("https://x.com/page", "?q=2"), "https://x.com/page?q=2");
        assert_eq!(resolve_href("https://x.com/page", "//cdn.x.com/lib.js"), "https://cdn.x.com/lib.js");
    }

    #[test]
    fn test_resolve_href_absolute_unchanged() {
        assert_eq!(resolve_href("https://x.com/", "https://y.com"), "https://y.com");
        assert_eq!(resolve_href("https://x.com/", "mailto:someone@x.com"), "mailto:someone@x.com");
        assert_eq!(resolve_href("https://x.com/", "HTTPS://Y.com/A"), "HTTPS://Y.com/A");
    }

    #[test]
    fn test_resolve_href_without_base() {
        assert_eq!(resolve_href("about:blank", "/a"), "/a");
        assert_eq!(resolve_href("", "page.html"), "page.html");
    }
}
