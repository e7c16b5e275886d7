#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod auth;
mod cors;
mod health;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use voxgate_config::{Config, HEALTH_PATH};

pub use auth::BasicAuth;
pub use cors::CorsHeaders;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the file roots, the upstream client, or the
    /// header values derived from configuration cannot be built
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config.server.listen_address;

        let gateway = voxgate_files::build_gateway(&config)?;
        let forwarder = voxgate_proxy::build_forwarder(&config)?;
        let base_url: Arc<str> = Arc::from(forwarder.base_url());

        // Health check
        let mut app = Router::new().route(
            HEALTH_PATH,
            axum::routing::get(health::health_handler).with_state(base_url),
        );

        // Directory listing and file retrieval
        app = app.merge(voxgate_files::endpoint_router().with_state(gateway));

        // Everything else is relayed upstream or rejected by the route table
        app = app.merge(voxgate_proxy::endpoint_router().with_state(forwarder));

        // Apply middleware layers (innermost first)

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // Basic authentication
        if let Some(auth_config) = config.auth {
            tracing::info!(user = %auth_config.username, "basic authentication enabled");
            let auth = Arc::new(BasicAuth::new(auth_config)?);
            app = app.layer(axum::middleware::from_fn(move |req, next| {
                let auth = Arc::clone(&auth);
                async move { auth::basic_auth_middleware(auth, req, next).await }
            }));
        } else {
            tracing::warn!("basic authentication disabled, every route is public");
        }

        // CORS (outermost, so preflight skips auth and 401s carry the headers)
        let cors = Arc::new(CorsHeaders::new(&config.server.cors)?);
        app = app.layer(axum::middleware::from_fn(move |req, next| {
            let cors = Arc::clone(&cors);
            async move { cors::cors_middleware(cors, req, next).await }
        }));

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use http::{Method, Request, StatusCode, header};
    use tower::ServiceExt;
    use voxgate_config::BasicAuthConfig;

    use super::*;

    fn config(dir: &std::path::Path, auth: Option<BasicAuthConfig>) -> Config {
        let mut config = Config {
            server: voxgate_config::ServerConfig::default(),
            upstream: voxgate_config::UpstreamConfig::new("http://127.0.0.1:9"),
            files: voxgate_config::FilesConfig::default(),
            auth,
            telemetry: None,
        };
        config.files.ref_dir = dir.join("refs");
        config.files.out_dir = dir.join("outs");
        config
    }

    fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_reports_upstream_base() {
        let dir = tempfile_dir();
        let router = Server::new(config(dir.path(), None)).unwrap().into_router();

        let response = router.oneshot(request(Method::GET, "/healthz")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"ok": true, "base": "http://127.0.0.1:9"}));
    }

    #[tokio::test]
    async fn preflight_skips_auth() {
        let dir = tempfile_dir();
        let auth = BasicAuthConfig::new("admin", "secret");
        let router = Server::new(config(dir.path(), Some(auth))).unwrap().into_router();

        let response = router.oneshot(request(Method::OPTIONS, "/api/refs")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, PATCH, DELETE, OPTIONS"
        );
    }

    #[tokio::test]
    async fn unauthorized_response_carries_cors_headers() {
        let dir = tempfile_dir();
        let auth = BasicAuthConfig::new("admin", "secret");
        let router = Server::new(config(dir.path(), Some(auth))).unwrap().into_router();

        let response = router.oneshot(request(Method::GET, "/api/refs")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    }

    #[tokio::test]
    async fn unknown_path_is_json_not_found() {
        let dir = tempfile_dir();
        let router = Server::new(config(dir.path(), None)).unwrap().into_router();

        let response = router.oneshot(request(Method::GET, "/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Not found");
    }

    fn tempfile_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }
}
