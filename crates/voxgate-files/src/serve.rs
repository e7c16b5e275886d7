use std::io::{ErrorKind, SeekFrom};
use std::path::PathBuf;
use std::time::SystemTime;

use axum::body::Body;
use axum::response::Response;
use http::{HeaderMap, HeaderValue, StatusCode, header};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use crate::error::{FileError, Result};
use crate::range::parse_range;

/// An opened regular file ready to be streamed
#[derive(Debug)]
pub struct ServedFile {
    file: File,
    path: PathBuf,
    size: u64,
    modified: Option<SystemTime>,
}

impl ServedFile {
    /// Open `path`, which must already have passed the containment check
    pub(crate) async fn open(path: PathBuf) -> Result<Self> {
        let file = File::open(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => FileError::NotFound,
            _ => FileError::Io(e),
        })?;

        let metadata = file.metadata().await.map_err(FileError::Io)?;
        if !metadata.is_file() {
            return Err(FileError::NotFound);
        }

        Ok(Self {
            file,
            path,
            size: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }

    /// Content type inferred from the file extension
    pub fn content_type(&self) -> mime_guess::Mime {
        mime_guess::from_path(&self.path).first_or_octet_stream()
    }

    /// Stream the file, honoring a single `Range` request header
    pub async fn into_response(self, request_headers: &HeaderMap) -> Result<Response> {
        let range = parse_range(request_headers.get(header::RANGE), self.size)?;

        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(self.content_type().essence_str()) {
            headers.insert(header::CONTENT_TYPE, value);
        }
        headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("public, max-age=0"));
        if let Some(modified) = self.modified
            && let Ok(value) = HeaderValue::from_str(&httpdate::fmt_http_date(modified))
        {
            headers.insert(header::LAST_MODIFIED, value);
        }

        let mut file = self.file;

        let (status, body, length) = match range {
            Some(range) => {
                file.seek(SeekFrom::Start(range.start)).await.map_err(FileError::Io)?;
                let content_range = format!("bytes {}-{}/{}", range.start, range.end, self.size);
                if let Ok(value) = HeaderValue::from_str(&content_range) {
                    headers.insert(header::CONTENT_RANGE, value);
                }

                tracing::debug!(path = %self.path.display(), start = range.start, end = range.end, "serving range");

                (
                    StatusCode::PARTIAL_CONTENT,
                    Body::from_stream(ReaderStream::new(file.take(range.length()))),
                    range.length(),
                )
            }
            None => {
                tracing::debug!(path = %self.path.display(), size = self.size, "serving file");
                (StatusCode::OK, Body::from_stream(ReaderStream::new(file)), self.size)
            }
        };

        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));

        let mut response = Response::new(body);
        *response.status_mut() = status;
        *response.headers_mut() = headers;

        Ok(response)
    }
}
