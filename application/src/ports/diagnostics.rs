//! Port for transport diagnostics.
//!
//! Records the transport could not emit (a lone `event:` or `data:` field,
//! an unterminated tail, an unknown kind) are reported here instead of being
//! dropped silently. Reporting is synchronous and infallible.

use bargaining_domain::RecordDiagnostic;
use tokio::sync::mpsc;

pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &RecordDiagnostic);
}

/// No-op implementation for tests and when nobody listens.
pub struct NoDiagnostics;

impl DiagnosticSink for NoDiagnostics {
    fn report(&self, _diagnostic: &RecordDiagnostic) {}
}

/// Forwards diagnostics into an unbounded channel.
pub struct ChannelDiagnostics {
    tx: mpsc::UnboundedSender<RecordDiagnostic>,
}

impl ChannelDiagnostics {
    /// Create a sink together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RecordDiagnostic>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl DiagnosticSink for ChannelDiagnostics {
    fn report(&self, diagnostic: &RecordDiagnostic) {
        // Receiver gone means nobody is listening any more
        let _ = self.tx.send(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bargaining_domain::MissingField;

    #[test]
    fn test_channel_diagnostics_forwards() {
        let (sink, mut rx) = ChannelDiagnostics::channel();
        let diagnostic = RecordDiagnostic::MalformedRecord {
            missing: MissingField::Event,
            event: None,
        };
        sink.report(&diagnostic);
        assert_eq!(rx.try_recv().unwrap(), diagnostic);
    }

    #[test]
    fn test_channel_diagnostics_survives_dropped_receiver() {
        let (sink, rx) = ChannelDiagnostics::channel();
        drop(rx);
        sink.report(&RecordDiagnostic::UnknownEventKind {
            event: "x".to_string(),
        });
    }
}
