//! Application layer for bargaining-observer
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::StreamParams;
pub use ports::{
    catalog::{CatalogError, CatalogGateway},
    diagnostics::{ChannelDiagnostics, DiagnosticSink, NoDiagnostics},
    simulation_feed::{FeedError, FrameStream, SimulationFeed},
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::load_catalog::{Catalog, LoadCatalogUseCase};
pub use use_cases::simulation_controller::{
    RunError, RunHandle, RunOutcome, SimulationController,
};
