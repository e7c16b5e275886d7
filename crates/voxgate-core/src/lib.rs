//! Types shared by the gateway's feature crates

mod error;
pub mod headers;

pub use error::{ErrorBody, HttpError};
