//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod catalog;
pub mod diagnostics;
pub mod simulation_feed;
pub mod transcript_logger;
