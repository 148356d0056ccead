//! HTML parser for extracting links
//!
//! Every `<a href>` target is resolved against the page URL. Nothing is
//! normalized or de-duplicated here; the visited set decides what is new.

use scraper::{Html, Selector};
use url::Url;

/// Extracts every hyperlink target of a document as an absolute URL
///
/// # Link Extraction Rules
///
/// - Only `<a href="...">` elements are considered, in document order
/// - Each href is trimmed and resolved against `base_url`
/// - Targets that do not resolve to `http`/`https` (`mailto:`,
///   `javascript:`, `tel:`, unparsable hrefs) are dropped
/// - Fragments and query strings are kept verbatim
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The URL the document was fetched from
///
/// # Example
///
/// ```
/// use sitesnap::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// assert_eq!(extract_links(html, &base_url), vec!["https://example.com/page"]);
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Resolves a link href to an absolute http(s) URL
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let absolute_url = base_url.join(href.trim()).ok()?;

    // Only accept HTTP and HTTPS URLs
    match absolute_url.scheme() {
        "http" | "https" => Some(absolute_url.to_string()),
        _ => None,
    }
}
