use axum::extract::Request;
use axum::response::Response;
use http::{HeaderMap, Method};
use reqwest::Client;
use voxgate_config::UpstreamConfig;
use voxgate_core::headers::{REQUEST_DENY, strip_headers};

use crate::{
    error::{ProxyError, Result},
    http_client::http_client,
    relay::ResponseRelay,
    route::{RouteTable, UpstreamTarget},
};

/// Relays inbound requests to the single configured upstream service
pub struct Forwarder {
    client: Client,
    base_url: String,
    routes: RouteTable,
}

impl Forwarder {
    pub fn new(config: &UpstreamConfig, routes: RouteTable) -> Result<Self> {
        let client = http_client(config).map_err(|e| ProxyError::ConfigError(format!("HTTP client: {e}")))?;

        tracing::debug!(base_url = %config.base_url, "upstream forwarder initialized");

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            routes,
        })
    }

    /// Configured upstream base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upstream target for an inbound method and path-and-query
    pub fn target(&self, method: &Method, path_and_query: &str) -> Option<UpstreamTarget<'_>> {
        self.routes.resolve(method, path_and_query).map(|path| UpstreamTarget {
            base_url: &self.base_url,
            path,
        })
    }

    /// Forward one request and relay the upstream response
    ///
    /// Dropping the returned future (client went away) drops the in-flight
    /// upstream request with it.
    pub async fn forward(&self, request: Request) -> Result<Response> {
        let (parts, body) = request.into_parts();

        let path_and_query = parts
            .uri
            .path_and_query()
            .map_or_else(|| parts.uri.path(), http::uri::PathAndQuery::as_str);

        let Some(target) = self.target(&parts.method, path_and_query) else {
            tracing::debug!(method = %parts.method, path = %path_and_query, "no upstream route");
            return Err(ProxyError::RouteNotFound {
                method: parts.method,
                path: path_and_query.to_string(),
            });
        };

        let url = target.url();
        let headers: HeaderMap = strip_headers(&parts.headers, &REQUEST_DENY);

        tracing::debug!(method = %parts.method, %url, "forwarding request upstream");

        let mut builder = self.client.request(parts.method.clone(), &url).headers(headers);

        if !is_bodiless(&parts.method) {
            builder = builder.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }

        let upstream = builder.send().await.map_err(|e| {
            tracing::error!(method = %parts.method, %url, error = %e, "upstream request failed");
            ProxyError::Upstream(e)
        })?;

        let relay = ResponseRelay::select(upstream.headers());

        tracing::debug!(
            status = upstream.status().as_u16(),
            relay = ?relay,
            "relaying upstream response"
        );

        relay.relay(upstream).await
    }
}

/// Methods whose inbound body is never forwarded
fn is_bodiless(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD
}
