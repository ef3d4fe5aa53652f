//! Port for structured stream transcripts.
//!
//! Defines the [`TranscriptLogger`] trait for recording what a run received
//! (raw records, diagnostics, the final outcome) in a machine-readable log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the stream
//! itself so a run can be inspected or replayed later.

use serde_json::Value;

/// A structured transcript event.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. Adapters add the timestamp.
pub struct TranscriptEvent {
    /// Event type identifier (e.g., "run_start", "record", "diagnostic").
    pub event_type: &'static str,
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Implementations write each event as a single record (e.g., one JSONL line).
/// The `log` method is synchronous and non-fallible so that a failing log
/// never disturbs the run.
pub trait TranscriptLogger: Send + Sync {
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when transcripts are disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
