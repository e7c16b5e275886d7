use std::net::SocketAddr;

use crate::cors::CorsConfig;

/// Port used when `PORT` is not set
pub const DEFAULT_PORT: u16 = 3001;

/// Path of the unauthenticated health endpoint
pub const HEALTH_PATH: &str = "/healthz";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_address: SocketAddr,
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            cors: CorsConfig::default(),
        }
    }
}
