//! Record-level types shared by the event-stream transport and its consumers.

pub mod record;

pub use record::{Frame, MissingField, ParseMode, Record, RecordDiagnostic};
