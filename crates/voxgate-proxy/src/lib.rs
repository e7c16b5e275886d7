#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod forwarder;
mod http_client;
mod relay;
mod route;

use std::sync::Arc;

use axum::{Router, extract::Request, extract::State};

pub use error::{ProxyError, Result};
pub use forwarder::Forwarder;
pub use relay::{ResponseRelay, normalize_json};
pub use route::{MatchKind, RouteRule, RouteTable, UpstreamTarget};

/// Build the forwarder from configuration
pub fn build_forwarder(config: &voxgate_config::Config) -> anyhow::Result<Arc<Forwarder>> {
    let forwarder = Arc::new(
        Forwarder::new(&config.upstream, RouteTable::openvoice())
            .map_err(|e| anyhow::anyhow!("Failed to initialize upstream forwarder: {e}"))?,
    );
    Ok(forwarder)
}

/// Create the endpoint router for proxied calls
///
/// The forwarder sits behind the fallback so prefix routes such as
/// `/api/base_tts*` match any suffix, query string included. Requests the
/// route table does not know get a JSON 404.
pub fn endpoint_router() -> Router<Arc<Forwarder>> {
    Router::new().fallback(forward)
}

/// Relay one request to the upstream service
async fn forward(State(forwarder): State<Arc<Forwarder>>, request: Request) -> Result<axum::response::Response> {
    forwarder.forward(request).await
}
