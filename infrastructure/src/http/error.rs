//! Error types for the HTTP adapter

use bargaining_application::{CatalogError, FeedError};
use thiserror::Error;

/// Errors that can occur when talking to the simulation engine
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Connection error: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("Server returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to read response body: {0}")]
    Read(#[source] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<HttpError> for CatalogError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Status { status, body } => CatalogError::RequestFailed { status, body },
            HttpError::Build(_) | HttpError::Connection(_) => {
                CatalogError::ConnectionError(err.to_string())
            }
            HttpError::Read(_) | HttpError::Parse(_) => {
                CatalogError::InvalidResponse(err.to_string())
            }
        }
    }
}

impl From<HttpError> for FeedError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Status { status, body } => FeedError::OpenFailed { status, body },
            HttpError::Read(_) => FeedError::ReadFailed(err.to_string()),
            HttpError::Build(_) | HttpError::Connection(_) | HttpError::Parse(_) => {
                FeedError::ConnectionError(err.to_string())
            }
        }
    }
}

/// Reduce an error body to its message.
///
/// The engine answers errors as `{"detail": "..."}`; anything else is kept
/// verbatim.
pub(crate) fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
