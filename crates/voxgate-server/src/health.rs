use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

/// Health check handler
///
/// Reports the upstream base URL without contacting it.
pub async fn health_handler(State(base_url): State<Arc<str>>) -> Json<Value> {
    Json(json!({ "ok": true, "base": &*base_url }))
}
