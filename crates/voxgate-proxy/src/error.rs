use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use voxgate_core::{ErrorBody, HttpError};

pub type Result<T> = std::result::Result<T, ProxyError>;

/// Forwarding errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum ProxyError {
    /// No entry in the route table matches the method and path
    #[error("No upstream route for {method} {path}")]
    RouteNotFound { method: http::Method, path: String },

    /// Network-level failure talking to the upstream service
    #[error("Upstream request failed: {0}")]
    Upstream(#[source] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl HttpError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::RouteNotFound { .. } => "Not found".to_string(),
            Self::Upstream(_) => "Upstream request failed".to_string(),
            Self::ConfigError(_) => "Internal server error".to_string(),
        }
    }

    fn detail(&self) -> Option<String> {
        match self {
            Self::Upstream(e) => Some(error_chain(e)),
            _ => None,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from_error(&self))).into_response()
    }
}

/// Render an error and all of its sources as one line
///
/// `reqwest` keeps the useful part ("connection refused", "dns error") in
/// the source chain rather than in its own message.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    message
}
