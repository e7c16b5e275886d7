use std::sync::Arc;

use axum::Json;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::{HeaderValue, StatusCode, header};
use secrecy::ExposeSecret;
use voxgate_config::BasicAuthConfig;
use voxgate_core::ErrorBody;

/// Credentials checked by the Basic-auth middleware
pub struct BasicAuth {
    config: BasicAuthConfig,
    challenge: HeaderValue,
}

impl BasicAuth {
    /// # Errors
    ///
    /// Returns an error if the realm cannot be sent in a header
    pub fn new(config: BasicAuthConfig) -> anyhow::Result<Self> {
        let challenge = HeaderValue::from_str(&format!("Basic realm=\"{}\"", config.realm))
            .map_err(|e| anyhow::anyhow!("invalid auth realm {:?}: {e}", config.realm))?;

        Ok(Self { config, challenge })
    }

    fn is_public(&self, path: &str) -> bool {
        self.config.public_paths.iter().any(|p| p == path)
    }

    /// Check an `Authorization` header value against the configured pair
    fn verify(&self, authorization: Option<&HeaderValue>) -> bool {
        let Some((username, password)) = authorization.and_then(parse_basic) else {
            return false;
        };

        username == self.config.username && password == self.config.password.expose_secret()
    }

    fn challenge(&self) -> Response {
        let mut response = (StatusCode::UNAUTHORIZED, Json(ErrorBody::new("Unauthorized"))).into_response();
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, self.challenge.clone());
        response
    }
}

/// Decode `Basic <base64(user:pass)>` into its two parts
///
/// The scheme is case-insensitive. The pair is split at the first `:`, so
/// passwords may contain colons.
fn parse_basic(value: &HeaderValue) -> Option<(String, String)> {
    let (scheme, encoded) = value.to_str().ok()?.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}

/// Require HTTP Basic credentials on every non-public path
pub async fn basic_auth_middleware(auth: Arc<BasicAuth>, request: Request, next: Next) -> Response {
    if auth.is_public(request.uri().path()) {
        return next.run(request).await;
    }

    if auth.verify(request.headers().get(header::AUTHORIZATION)) {
        return next.run(request).await;
    }

    tracing::debug!(path = %request.uri().path(), "rejected request without valid credentials");
    auth.challenge()
}
