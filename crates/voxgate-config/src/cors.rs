/// Origin allowed when none is configured
pub const DEFAULT_CORS_ORIGIN: &str = "*";

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Value of `Access-Control-Allow-Origin` on every response
    pub origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}
