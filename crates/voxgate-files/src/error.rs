use std::path::PathBuf;

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use voxgate_core::{ErrorBody, HttpError};

pub type Result<T> = std::result::Result<T, FileError>;

/// File gateway errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum FileError {
    /// The directory could not be read; no partial listing is returned
    #[error("Failed to read {}: {source}", dir.display())]
    Listing {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requested name resolves outside its root
    #[error("Invalid path")]
    InvalidPath,

    /// Missing file, or not a regular file
    #[error("File not found")]
    NotFound,

    /// The requested byte range lies beyond the end of the file
    #[error("Range not satisfiable")]
    RangeNotSatisfiable { size: u64 },

    /// Any other I/O failure while opening or reading a file
    #[error("Failed to read file: {0}")]
    Io(#[source] std::io::Error),
}

impl HttpError for FileError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Listing { .. } | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidPath | Self::NotFound => StatusCode::NOT_FOUND,
            Self::RangeNotSatisfiable { .. } => StatusCode::RANGE_NOT_SATISFIABLE,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Io(_) => "Failed to read file".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for FileError {
    fn into_response(self) -> Response {
        let mut response = (self.status_code(), Json(ErrorBody::from_error(&self))).into_response();

        if let Self::RangeNotSatisfiable { size } = self
            && let Ok(value) = HeaderValue::from_str(&format!("bytes */{size}"))
        {
            response.headers_mut().insert(header::CONTENT_RANGE, value);
        }

        response
    }
}
