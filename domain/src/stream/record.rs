//! Records and diagnostics produced by the event-stream transport.
//!
//! The transport yields a sequence of [`Frame`]s: either a complete
//! [`Record`] (an `event:` kind plus a `data:` payload), or a
//! [`RecordDiagnostic`] naming input that did not form a record. Diagnostics
//! are outcomes, not errors: whether they abort a run is decided by the
//! consumer's [`ParseMode`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// One framed event: kind and raw payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub event: String,
    pub data: String,
}

impl Record {
    pub fn new(event: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            data: data.into(),
        }
    }
}

/// Which half of a record was missing when a blank line terminated it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    Event,
    Data,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingField::Event => write!(f, "event"),
            MissingField::Data => write!(f, "data"),
        }
    }
}

/// Input that the transport dropped instead of emitting a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "diagnostic", rename_all = "snake_case")]
pub enum RecordDiagnostic {
    /// A blank line terminated a record that had only one of its two fields.
    MalformedRecord {
        missing: MissingField,
        event: Option<String>,
    },
    /// The stream ended before the trailing record was terminated.
    IncompleteRecord {
        event: Option<String>,
        buffered_bytes: usize,
    },
    /// A record named a kind the decoder does not know.
    UnknownEventKind { event: String },
}

impl RecordDiagnostic {
    pub fn name(&self) -> &'static str {
        match self {
            RecordDiagnostic::MalformedRecord { .. } => "malformed-record",
            RecordDiagnostic::IncompleteRecord { .. } => "incomplete-record",
            RecordDiagnostic::UnknownEventKind { .. } => "unknown-event-kind",
        }
    }
}

impl fmt::Display for RecordDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordDiagnostic::MalformedRecord { missing, event } => write!(
                f,
                "malformed-record: missing {} field (event: {})",
                missing,
                event.as_deref().unwrap_or("-")
            ),
            RecordDiagnostic::IncompleteRecord {
                event,
                buffered_bytes,
            } => write!(
                f,
                "incomplete-record: stream ended with {} unterminated bytes (event: {})",
                buffered_bytes,
                event.as_deref().unwrap_or("-")
            ),
            RecordDiagnostic::UnknownEventKind { event } => {
                write!(f, "unknown-event-kind: {}", event)
            }
        }
    }
}

/// Output unit of the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Record(Record),
    Diagnostic(RecordDiagnostic),
}

impl Frame {
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Frame::Record(r) => Some(r),
            Frame::Diagnostic(_) => None,
        }
    }
}

/// How strictly a consumer treats diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Report diagnostics and keep going.
    #[default]
    Lenient,
    /// Abort the run on the first diagnostic.
    Strict,
}

impl ParseMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, ParseMode::Strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_names() {
        let malformed = RecordDiagnostic::MalformedRecord {
            missing: MissingField::Data,
            event: Some("settlement".to_string()),
        };
        assert_eq!(malformed.name(), "malformed-record");
        assert_eq!(
            malformed.to_string(),
            "malformed-record: missing data field (event: settlement)"
        );

        let incomplete = RecordDiagnostic::IncompleteRecord {
            event: None,
            buffered_bytes: 12,
        };
        assert_eq!(incomplete.name(), "incomplete-record");
        assert!(incomplete.to_string().contains("12 unterminated bytes"));
    }

    #[test]
    fn test_diagnostic_serializes_with_tag() {
        let json = serde_json::to_value(RecordDiagnostic::UnknownEventKind {
            event: "round_pause".to_string(),
        })
        .unwrap();
        assert_eq!(json["diagnostic"], "unknown_event_kind");
        assert_eq!(json["event"], "round_pause");
    }

    #[test]
    fn test_parse_mode_from_strict() {
        assert!(ParseMode::from_strict(true).is_strict());
        assert_eq!(ParseMode::from_strict(false), ParseMode::Lenient);
    }
}
