use serde::Deserialize;

/// Main configuration structure for Sitesnap
///
/// Every section and key is optional; missing values fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub capture: CaptureConfig,
    pub output: OutputConfig,
}

/// Link discovery request configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// User-Agent header sent with every discovery request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Accept header value
    pub accept: String,

    /// Accept-Language header value
    #[serde(rename = "accept-language")]
    pub accept_language: String,

    /// Referer header value; an empty string sends none
    pub referer: Option<String>,

    /// Total request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:106.0) Gecko/20100101 Firefox/106.0"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
            referer: Some("http://mikegrouchy.com".to_string()),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Screenshot capture configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Root directory for screenshots; a per-domain directory is created inside
    #[serde(rename = "output-dir")]
    pub output_dir: String,

    /// Viewport width used for every capture
    #[serde(rename = "viewport-width")]
    pub viewport_width: u32,

    /// Smallest viewport height; shorter pages are clamped up to this
    #[serde(rename = "min-height")]
    pub min_height: u32,

    /// Pause after each saved screenshot (milliseconds)
    #[serde(rename = "throttle-ms")]
    pub throttle_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            output_dir: "screenshots".to_string(),
            viewport_width: 1920,
            min_height: 600,
            throttle_ms: 1000,
        }
    }
}

/// Output file configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the visited URL cache
    #[serde(rename = "cache-path")]
    pub cache_path: String,

    /// Path to the append-only log file
    #[serde(rename = "log-path")]
    pub log_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            cache_path: "visited_urls_cache.db".to_string(),
            log_path: "website_screenshot_log.txt".to_string(),
        }
    }
}
