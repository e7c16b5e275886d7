//! Mock OpenVoice backend for integration tests
//!
//! Records every request it receives. The `mock` query parameter selects
//! the reply:
//!
//! - absent: `{"ok":true}` as JSON
//! - `wav`: a short WAV payload as `audio/wav`
//! - `large`: `size` bytes of audio, streamed in chunks
//! - `endless`: audio chunks that never end, until the connection drops
//! - `gzip`: `{"ok":true}` as gzip-encoded JSON
//! - `malformed`: a body that is not JSON, labelled as JSON
//! - `status`: `{"detail":"busy"}` with status `code`
//! - `cors`: JSON carrying its own `Access-Control-Allow-Origin`

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio_util::sync::CancellationToken;

/// Bytes returned for `mock=wav`
pub const WAV_BYTES: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt \x10\x00\x00\x00\x01\x00\x01\x00\x44\xac\x00\x00\x88\x58\x01\x00\x02\x00\x10\x00data\x00\x00\x00\x00";

/// `{"ok":true}` compressed with gzip
pub const GZIP_JSON: &[u8] = b"\x1f\x8b\x08\x00\x00\x00\x00\x00\x02\x03\xab\x56\xca\xcf\x56\xb2\x2a\x29\x2a\x4d\xad\x05\x00\x90\x5f\xd4\xa7\x0b\x00\x00\x00";

/// Chunk size used for `mock=large`
const CHUNK: usize = 64 * 1024;

/// One chunk of `mock=endless` audio
static SILENCE: [u8; 4096] = [0; 4096];

/// One request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Mock upstream that returns predictable responses
pub struct MockUpstream {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    /// Cancelled once an `endless` response body is dropped
    stream_dropped: CancellationToken,
}

/// Cancels its token when the owning response stream is dropped
struct DropSignal(CancellationToken);

impl Drop for DropSignal {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

impl MockUpstream {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            requests: Mutex::new(Vec::new()),
            stream_dropped: CancellationToken::new(),
        });

        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the upstream
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Mock address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Token cancelled when the server side of an `endless` body is dropped
    pub fn stream_dropped(&self) -> CancellationToken {
        self.state.stream_dropped.clone()
    }

    /// The most recent request
    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("mock received no request")
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle(State(state): State<Arc<MockState>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path().to_owned(), |pq| pq.as_str().to_owned());
    let query = parts.uri.query().unwrap_or_default().to_owned();

    state.requests.lock().unwrap().push(RecordedRequest {
        method: parts.method.to_string(),
        path_and_query,
        headers: parts.headers,
        body,
    });

    match param(&query, "mock") {
        Some("wav") => ([(header::CONTENT_TYPE, "audio/wav")], WAV_BYTES).into_response(),
        Some("large") => {
            let size: usize = param(&query, "size").and_then(|s| s.parse().ok()).unwrap_or(0);
            let chunks = pattern(size)
                .chunks(CHUNK)
                .map(|chunk| Ok::<_, std::io::Error>(Bytes::copy_from_slice(chunk)))
                .collect::<Vec<_>>();
            let mut response = Response::new(Body::from_stream(futures_util::stream::iter(chunks)));
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
            response
        }
        Some("endless") => {
            let signal = DropSignal(state.stream_dropped.clone());
            let chunks = futures_util::stream::unfold(signal, |signal| async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Some((Ok::<_, std::io::Error>(Bytes::from_static(&SILENCE)), signal))
            });
            let mut response = Response::new(Body::from_stream(chunks));
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
            response
        }
        Some("gzip") => (
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::CONTENT_ENCODING, "gzip"),
            ],
            GZIP_JSON,
        )
            .into_response(),
        Some("malformed") => (
            [(header::CONTENT_TYPE, "application/json")],
            "Internal Server Error: traceback follows",
        )
            .into_response(),
        Some("status") => {
            let status = param(&query, "code")
                .and_then(|code| code.parse().ok())
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, [(header::CONTENT_TYPE, "application/json")], r#"{"detail":"busy"}"#).into_response()
        }
        Some("cors") => (
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "https://upstream.example"),
            ],
            r#"{"ok":true}"#,
        )
            .into_response(),
        _ => ([(header::CONTENT_TYPE, "application/json")], r#"{"ok":true}"#).into_response(),
    }
}

fn param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(key, value)| (key == name).then_some(value))
}

/// Deterministic payload of `size` bytes
pub fn pattern(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}
