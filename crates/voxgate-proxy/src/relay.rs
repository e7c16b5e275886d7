use axum::body::Body;
use axum::response::Response;
use futures_util::TryStreamExt;
use http::HeaderMap;
use http::header::{CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE};
use voxgate_core::headers::{RESPONSE_DENY, strip_headers};

use crate::error::{ProxyError, Result};

/// How an upstream response body is handed back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseRelay {
    /// Read the whole body, normalize it as JSON, re-emit it
    BufferedJson,
    /// Pass the byte stream through untouched
    Streamed,
}

impl ResponseRelay {
    /// Pick the strategy from the upstream `content-type`
    pub fn select(headers: &HeaderMap) -> Self {
        let is_json = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.contains("application/json"));

        if is_json { Self::BufferedJson } else { Self::Streamed }
    }

    /// Turn an upstream response into the response sent to the caller
    ///
    /// Status and headers (minus `transfer-encoding`) are copied verbatim.
    pub async fn relay(self, upstream: reqwest::Response) -> Result<Response> {
        let status = upstream.status();
        let mut headers = strip_headers(upstream.headers(), &RESPONSE_DENY);

        let body = match self {
            Self::BufferedJson => {
                let bytes = upstream.bytes().await.map_err(|e| {
                    tracing::error!(error = %e, "failed to read upstream JSON body");
                    ProxyError::Upstream(e)
                })?;

                // Re-serialized body: upstream framing no longer applies
                headers.remove(CONTENT_LENGTH);
                headers.remove(CONTENT_ENCODING);

                Body::from(normalize_json(&bytes))
            }
            Self::Streamed => Body::from_stream(upstream.bytes_stream().inspect_err(|e| {
                tracing::warn!(error = %e, "upstream body stream aborted");
            })),
        };

        let mut response = Response::new(body);
        *response.status_mut() = status;
        *response.headers_mut() = headers;

        Ok(response)
    }
}

/// Parse an upstream JSON body and serialize it again
///
/// Empty, unparseable, or `null` bodies become `{}` so callers always
/// receive valid JSON. Key order is preserved.
pub fn normalize_json(bytes: &[u8]) -> Vec<u8> {
    let value = match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(serde_json::Value::Null) => serde_json::Value::Object(serde_json::Map::new()),
        Ok(value) => value,
        Err(e) => {
            if !bytes.is_empty() {
                tracing::warn!(
                    error = %e,
                    body_len = bytes.len(),
                    "upstream sent malformed JSON, relaying an empty object"
                );
            }
            serde_json::Value::Object(serde_json::Map::new())
        }
    };

    serde_json::to_vec(&value).unwrap_or_else(|_| b"{}".to_vec())
}
