use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use voxgate_config::CorsConfig;

const ALLOW_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept, Authorization";
const ALLOW_METHODS: &str = "GET, POST, PUT, PATCH, DELETE, OPTIONS";

/// CORS headers stamped on every response
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    headers: HeaderMap,
}

impl CorsHeaders {
    /// Precompute the header set from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured origin is not a valid header value
    pub fn new(config: &CorsConfig) -> anyhow::Result<Self> {
        let origin = HeaderValue::from_str(&config.origin)
            .map_err(|e| anyhow::anyhow!("invalid CORS origin {:?}: {e}", config.origin))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));

        Ok(Self { headers })
    }

    /// Overwrite any CORS headers already present on `headers`
    fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }
    }
}

/// CORS middleware
///
/// Preflight requests are answered here with 204 and never reach auth or
/// the upstream. Everything else gets the CORS headers added on the way
/// out, error responses included.
pub async fn cors_middleware(cors: Arc<CorsHeaders>, request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        cors.apply(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    cors.apply(response.headers_mut());
    response
}
