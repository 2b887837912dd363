use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Pulse
///
/// Every section is optional; a missing file or section falls back to the
/// defaults for a local development backend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub media: MediaConfig,
    pub browse: BrowseConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Content API connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the content API, including the version prefix
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// TCP connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001/api/v1".to_string(),
            request_timeout_secs: 15,
            connect_timeout_secs: 5,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Where downloaded media files are served from
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Base URL that downloaded file paths are joined onto
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Storage prefix removed from repository file paths before joining
    #[serde(rename = "strip-prefix")]
    pub strip_prefix: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            strip_prefix: String::new(),
        }
    }
}

/// Browsing behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    /// How close to the end of the post list a scroll position must be
    /// before the next page is requested
    #[serde(rename = "prefetch-distance")]
    pub prefetch_distance: usize,

    /// Delay between a finished crawl and the re-fetch of page 1 (milliseconds)
    #[serde(rename = "crawl-settle-ms")]
    pub crawl_settle_ms: u64,

    /// Number of posts the backend should collect per crawl
    #[serde(rename = "max-collect-count")]
    pub max_collect_count: u32,

    /// What to show when a search fails
    pub fallback: FallbackPolicy,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            prefetch_distance: 3,
            crawl_settle_ms: 3000,
            max_collect_count: 20,
            fallback: FallbackPolicy::Sample,
        }
    }
}

impl BrowseConfig {
    pub fn crawl_settle_delay(&self) -> Duration {
        Duration::from_millis(self.crawl_settle_ms)
    }
}

/// Recovery policy applied when a search request fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Show an empty result list
    None,
    /// Re-use the last successful results for the same query
    Cached,
    /// Filter the built-in sample influencers by the query
    Sample,
}

/// User agent identification
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    #[serde(rename = "client-name")]
    pub client_name: String,

    #[serde(rename = "client-version")]
    pub client_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            client_name: "Pulse".to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
