use url::Url;

/// Resolves an href from a page to an absolute URL and validates it
///
/// Returns None if the link should be ignored:
/// - empty hrefs and fragment-only anchors
/// - `javascript:`, `mailto:`, `tel:` schemes
/// - `data:` URIs
/// - hrefs that do not resolve, or resolve to a non-HTTP(S) URL
///
/// # Arguments
///
/// * `base` - The URL of the page the href was found on
/// * `href` - The raw href attribute value
///
/// # Examples
///
/// ```
/// use url::Url;
/// use pagesift::url::resolve_href;
///
/// let base = Url::parse("http://example.test/list?page=1").unwrap();
/// let next = resolve_href(&base, "/list?page=2").unwrap();
/// assert_eq!(next.as_str(), "http://example.test/list?page=2");
///
/// assert!(resolve_href(&base, "javascript:void(0)").is_none());
/// assert!(resolve_href(&base, "#top").is_none());
/// ```
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    // Skip special schemes
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Skip fragment-only links (same page anchors)
    if href.starts_with('#') {
        return None;
    }

    match base.join(href) {
        Ok(absolute) => {
            // Only accept HTTP and HTTPS URLs
            if absolute.scheme() == "http" || absolute.scheme() == "https" {
                Some(absolute)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
