use std::time::Duration;

use reqwest::Client;
use voxgate_config::UpstreamConfig;

/// HTTP client shared by every forwarded request
///
/// No overall timeout: synthesized audio may stream for a long time, so only
/// connection setup is bounded.
pub fn http_client(config: &UpstreamConfig) -> reqwest::Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .build()
}
