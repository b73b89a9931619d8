use url::Url;

/// Returns the cache key for a URL's origin: scheme, host and port
///
/// Default ports are folded away by the serialization, so
/// `http://example.test/` and `http://example.test:80/a` share a key.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use pagesift::url::origin_key;
///
/// let url = Url::parse("http://example.test:8080/list?page=1").unwrap();
/// assert_eq!(origin_key(&url), "http://example.test:8080");
/// ```
pub fn origin_key(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Returns true when both URLs point at the same host
///
/// Host comparison is case-insensitive and ignores the port, so a listing
/// served on an explicit port can still link to itself without one.
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(ha), Some(hb)) => ha.eq_ignore_ascii_case(hb),
        _ => false,
    }
}
