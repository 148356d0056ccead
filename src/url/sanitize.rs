//! Filesystem-safe naming for output directories and screenshot files

/// Maximum length of a sanitized name, a common filesystem name limit
pub const MAX_NAME_LEN: usize = 255;

/// Directory name used when no domain is given
const FALLBACK_DIR_NAME: &str = "images";

/// Maps an arbitrary string to a filesystem-safe name
///
/// Every character outside `[A-Za-z0-9-]` becomes `_`, leading and trailing
/// underscores are trimmed, and the result is cut to [`MAX_NAME_LEN`]
/// characters. Input made only of invalid characters yields an empty string.
///
/// # Examples
///
/// ```
/// use sitesnap::url::sanitize_name;
///
/// assert_eq!(sanitize_name("example.com"), "example_com");
/// assert_eq!(sanitize_name("https://example.com/"), "https___example_com");
/// assert_eq!(sanitize_name("..."), "");
/// ```
pub fn sanitize_name(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    // Only ASCII survives the mapping, so byte and char lengths agree here
    let trimmed = replaced.trim_matches('_');
    let truncated = &trimmed[..trimmed.len().min(MAX_NAME_LEN)];

    // The cut can expose an underscore at the new end
    truncated.trim_end_matches('_').to_string()
}

/// Returns the per-domain directory name under the screenshot root
///
/// Falls back to `images` when nothing of the domain survives sanitizing.
pub fn domain_dir_name(domain: &str) -> String {
    let name = sanitize_name(domain);
    if name.is_empty() {
        sanitize_name(FALLBACK_DIR_NAME)
    } else {
        name
    }
}

/// Derives the screenshot file name for a URL
///
/// A leading `https://` is dropped, every `/` becomes `_` and `.png` is
/// appended. Nothing else is rewritten, so `http://` URLs keep their scheme
/// and query strings are kept verbatim.
///
/// # Examples
///
/// ```
/// use sitesnap::url::screenshot_file_name;
///
/// assert_eq!(screenshot_file_name("https://example.com/about/"), "example.com_about_.png");
/// ```
pub fn screenshot_file_name(url: &str) -> String {
    let stripped = url.strip_prefix("https://").unwrap_or(url);
    format!("{}.png", stripped.replace('/', "_"))
}
