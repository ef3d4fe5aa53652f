//! Infrastructure layer for bargaining-observer
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer:
//!
//! - [`sse`]: the Record Transport, bytes to frames
//! - [`HttpSimulationClient`]: live feed and catalog over HTTP
//! - [`ReplayFeed`]: a captured stream replayed from disk
//! - [`config`]: layered configuration loading
//! - [`logging`]: JSONL run transcripts

pub mod config;
pub mod http;
pub mod logging;
pub mod replay;
pub mod sse;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileServerConfig, FileStreamConfig,
};
pub use http::{HttpError, HttpSimulationClient};
pub use logging::JsonlTranscriptLogger;
pub use replay::{DEFAULT_CHUNK_SIZE, ReplayFeed};
pub use sse::{RecordDecoder, decode_all, decode_frames};
