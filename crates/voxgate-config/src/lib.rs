#![allow(clippy::must_use_candidate)]

pub mod auth;
pub mod cors;
mod env;
pub mod files;
pub mod server;
pub mod telemetry;
pub mod upstream;
mod validate;

pub use auth::*;
pub use cors::*;
pub use env::*;
pub use files::*;
pub use server::*;
pub use telemetry::TelemetryConfig;
pub use upstream::*;

/// Top-level gateway configuration
///
/// Built once at startup and never re-read; every request handler sees the
/// same immutable value.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listener and CORS configuration
    pub server: ServerConfig,
    /// The single upstream synthesis service
    pub upstream: UpstreamConfig,
    /// Root directories exposed by the file gateway
    pub files: FilesConfig,
    /// Basic authentication, disabled when `None`
    pub auth: Option<BasicAuthConfig>,
    /// Telemetry export, logging only when `None`
    pub telemetry: Option<TelemetryConfig>,
}
