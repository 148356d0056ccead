/// Checks whether a discovered link belongs to the crawled domain
///
/// The check is a plain, case-sensitive substring test: `domain` may appear
/// anywhere in `url`, including the path or query string. No scheme or host
/// boundary parsing is performed, so `"ab.com"` also matches
/// `"https://xab.comy/"` and `"https://other.org/?ref=ab.com"`.
///
/// # Arguments
///
/// * `domain` - The domain the crawl is restricted to
/// * `url` - The absolute URL of a discovered link
///
/// # Examples
///
/// ```
/// use sitesnap::url::belongs_to_domain;
///
/// assert!(belongs_to_domain("example.com", "https://example.com/about"));
/// assert!(belongs_to_domain("example.com", "https://blog.example.com/"));
/// assert!(!belongs_to_domain("example.com", "https://other.org/"));
/// ```
pub fn belongs_to_domain(domain: &str, url: &str) -> bool {
    url.contains(domain)
}
