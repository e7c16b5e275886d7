//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;

use voxgate_config::{BasicAuthConfig, Config, CorsConfig, FilesConfig, ServerConfig, UpstreamConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder pointed at `upstream_url`, without auth
    pub fn new(upstream_url: &str) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: SocketAddr::from(([127, 0, 0, 1], 0)),
                    cors: CorsConfig::default(),
                },
                upstream: UpstreamConfig::new(upstream_url),
                files: FilesConfig::default(),
                auth: None,
                telemetry: None,
            },
        }
    }

    /// Serve `refs/` and `outs/` below `base`
    pub fn with_file_roots(mut self, base: &Path) -> Self {
        self.config.files = FilesConfig {
            ref_dir: base.join("refs"),
            out_dir: base.join("outs"),
        };
        self
    }

    /// Require Basic credentials
    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        self.config.auth = Some(BasicAuthConfig::new(username, password));
        self
    }

    /// Set the allowed CORS origin
    pub fn with_cors_origin(mut self, origin: &str) -> Self {
        self.config.server.cors = CorsConfig {
            origin: origin.to_owned(),
        };
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
