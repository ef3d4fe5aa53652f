//! Type definitions for the simulation controller.

use crate::ports::simulation_feed::FeedError;
use bargaining_domain::{DecodeError, RecordDiagnostic};
use thiserror::Error;

/// Errors that abandon a simulation run
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Failed to open simulation stream: {0}")]
    Open(#[source] FeedError),

    #[error("Simulation stream failed: {0}")]
    Read(#[source] FeedError),

    #[error("Failed to decode event: {0}")]
    Decode(#[from] DecodeError),

    #[error("Rejected by strict parsing: {0}")]
    StrictDiagnostic(RecordDiagnostic),

    #[error("Simulation task failed: {0}")]
    TaskFailed(String),
}

impl RunError {
    /// Whether the stream never produced a frame.
    pub fn is_open_failure(&self) -> bool {
        matches!(self, RunError::Open(_))
    }
}

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    /// `simulation_end` was folded; the aggregate is complete.
    Completed,
    /// The run was superseded by `reset()` or a new `start()`.
    Cancelled,
    /// The stream closed before `simulation_end`; the aggregate went back to idle.
    EndedEarly,
    /// The run failed; the aggregate went back to idle with its partial state.
    Failed(RunError),
}

impl RunOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            RunOutcome::Completed => "completed",
            RunOutcome::Cancelled => "cancelled",
            RunOutcome::EndedEarly => "ended_early",
            RunOutcome::Failed(_) => "failed",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed)
    }

    pub fn error(&self) -> Option<&RunError> {
        match self {
            RunOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}
