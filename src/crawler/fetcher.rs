//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made during link discovery:
//! - Building the HTTP client with the configured browser-like headers
//! - GET requests to fetch page content
//! - Classifying every outcome into a [`FetchResult`] value
//!
//! Nothing here retries. A failed fetch is reported once and the traversal
//! drops that branch.

use crate::config::CrawlerConfig;
use crate::ConfigError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Successfully fetched an HTML page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Page is not HTML (Content-Type mismatch)
    ContentMismatch {
        /// The actual Content-Type received
        content_type: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (DNS failure, connection refused, timeout, bad body)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl fmt::Display for FetchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success {
                final_url,
                status_code,
                ..
            } => write!(f, "HTTP {} from {}", status_code, final_url),
            Self::ContentMismatch { content_type } => {
                write!(f, "expected HTML, got {}", content_type)
            }
            Self::HttpError { status_code } => write!(f, "HTTP {}", status_code),
            Self::NetworkError { error } => write!(f, "{}", error),
        }
    }
}

/// Source of page bodies for link discovery
///
/// Implemented by [`HttpFetcher`] for real crawls; tests plug in canned pages.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Fetches the document at `url`
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// reqwest-backed page fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> crate::Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

fn header_value(name: &HeaderName, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|_| {
        ConfigError::Validation(format!("invalid value for header {}: {:?}", name, value))
    })
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(SnapError)` - A header value is not representable, or the client
///   could not be built
///
/// # Example
///
/// ```no_run
/// use sitesnap::config::CrawlerConfig;
/// use sitesnap::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> crate::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, header_value(&ACCEPT, &config.accept)?);
    headers.insert(
        ACCEPT_LANGUAGE,
        header_value(&ACCEPT_LANGUAGE, &config.accept_language)?,
    );
    if let Some(referer) = config.referer.as_deref().filter(|r| !r.is_empty()) {
        headers.insert(REFERER, header_value(&REFERER, referer)?);
    }

    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Returns true for Content-Type values that carry HTML
///
/// A missing Content-Type is given the benefit of the doubt.
fn is_html(content_type: &str) -> bool {
    content_type.is_empty()
        || content_type.contains("text/html")
        || content_type.contains("application/xhtml+xml")
}

/// Fetches a URL and classifies the outcome
///
/// Redirects are followed by the client. The body is only read for 2xx
/// responses with an HTML (or absent) Content-Type.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// A FetchResult indicating success or the type of failure
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            // Classify error
            let error = if e.is_timeout() {
                format!("Request timeout: {}", e)
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    // Check Content-Type
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html(&content_type) {
        return FetchResult::ContentMismatch { content_type };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: format!("Failed to read body: {}", e),
        },
    }
}
