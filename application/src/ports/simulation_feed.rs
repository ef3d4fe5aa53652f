//! Simulation feed port
//!
//! Defines how the application layer opens the engine's event stream. An
//! adapter turns the streamed response body into [`Frame`]s (records and
//! transport diagnostics) in the order the bytes arrived.

use async_trait::async_trait;
use bargaining_domain::{DomainError, Frame, SimulationRequest};
use futures::stream::BoxStream;
use thiserror::Error;

/// Ordered frames of one simulation run. Dropping the stream closes the
/// underlying connection.
pub type FrameStream = BoxStream<'static, Result<Frame, FeedError>>;

/// Errors that can occur while opening or reading a simulation feed
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Invalid simulation request: {0}")]
    InvalidRequest(#[from] DomainError),

    #[error("Simulation request failed with status {status}: {body}")]
    OpenFailed { status: u16, body: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Stream read failed: {0}")]
    ReadFailed(String),
}

impl FeedError {
    /// Whether the error happened before any frame could be produced.
    pub fn is_open_failure(&self) -> bool {
        matches!(
            self,
            FeedError::InvalidRequest(_)
                | FeedError::OpenFailed { .. }
                | FeedError::ConnectionError(_)
        )
    }
}

/// Source of simulation event streams
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait SimulationFeed: Send + Sync {
    /// Start a simulation and return its frame stream.
    ///
    /// Must fail before yielding anything when the engine rejects the request.
    async fn open(&self, request: &SimulationRequest) -> Result<FrameStream, FeedError>;
}
