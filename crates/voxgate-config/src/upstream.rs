use std::time::Duration;

/// Base URL used when `OPENVOICE_BASE_URL` is not set
pub const DEFAULT_BASE_URL: &str = "http://localhost:8786";

/// The upstream speech-synthesis service
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL without a trailing slash, e.g. `http://openvoice:8786`
    pub base_url: String,
    /// TCP connect timeout; the request itself has no deadline
    pub connect_timeout: Duration,
}

impl UpstreamConfig {
    /// Configuration for the given base URL with default timeouts
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
