#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod range;
mod root;
mod serve;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
    routing::get,
};

pub use error::{FileError, Result};
pub use range::{ByteRange, parse_range};
pub use root::FileRoot;
pub use serve::ServedFile;
pub use types::DirectoryEntry;

/// The two read-only directories exposed over HTTP
pub struct FileGateway {
    refs: FileRoot,
    outs: FileRoot,
}

impl FileGateway {
    pub const fn new(refs: FileRoot, outs: FileRoot) -> Self {
        Self { refs, outs }
    }

    /// Reference audio root
    pub const fn refs(&self) -> &FileRoot {
        &self.refs
    }

    /// Generated output root
    pub const fn outs(&self) -> &FileRoot {
        &self.outs
    }
}

/// Build the file gateway from configuration
pub fn build_gateway(config: &voxgate_config::Config) -> anyhow::Result<Arc<FileGateway>> {
    let refs = FileRoot::new(&config.files.ref_dir)
        .map_err(|e| anyhow::anyhow!("invalid reference directory {}: {e}", config.files.ref_dir.display()))?;
    let outs = FileRoot::new(&config.files.out_dir)
        .map_err(|e| anyhow::anyhow!("invalid output directory {}: {e}", config.files.out_dir.display()))?;

    tracing::debug!(
        refs = %refs.path().display(),
        outs = %outs.path().display(),
        "file gateway initialized"
    );

    Ok(Arc::new(FileGateway::new(refs, outs)))
}

/// Create the endpoint router for listing and retrieval
pub fn endpoint_router() -> Router<Arc<FileGateway>> {
    Router::new()
        .route("/api/refs", get(list_refs))
        .route("/api/outs", get(list_outs))
        .route("/api/refs/{file}", get(serve_ref))
        .route("/api/outs/{file}", get(serve_out))
}

async fn list_refs(State(gateway): State<Arc<FileGateway>>) -> Result<Json<Vec<DirectoryEntry>>> {
    Ok(Json(gateway.refs().list().await?))
}

async fn list_outs(State(gateway): State<Arc<FileGateway>>) -> Result<Json<Vec<DirectoryEntry>>> {
    Ok(Json(gateway.outs().list().await?))
}

async fn serve_ref(
    State(gateway): State<Arc<FileGateway>>,
    Path(file): Path<String>,
    headers: HeaderMap,
) -> Result<Response> {
    gateway.refs().open(&file).await?.into_response(&headers).await
}

async fn serve_out(
    State(gateway): State<Arc<FileGateway>>,
    Path(file): Path<String>,
    headers: HeaderMap,
) -> Result<Response> {
    gateway.outs().open(&file).await?.into_response(&headers).await
}
