//! One simulation run: the read loop and the fold.
//!
//! A [`StreamRun`] owns the cancellation token of its run. It suspends only
//! while opening the feed and while waiting for the next frame; decoding and
//! folding a frame happen without yielding. Every write to the shared
//! snapshot goes through `send_if_modified`, and the token is checked inside
//! that critical section, so a cancelled run can never write into the
//! aggregate of the run that replaced it.

use super::types::{RunError, RunOutcome};
use crate::config::StreamParams;
use crate::ports::diagnostics::DiagnosticSink;
use crate::ports::simulation_feed::{FeedError, SimulationFeed};
use crate::ports::transcript_logger::{TranscriptEvent, TranscriptLogger};
use bargaining_domain::{
    ApplyOutcome, DecodeError, Frame, Record, RecordDiagnostic, SimulationEvent,
    SimulationRequest, SimulationState,
};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

pub(super) struct StreamRun {
    pub(super) feed: Arc<dyn SimulationFeed>,
    pub(super) params: StreamParams,
    pub(super) diagnostics: Arc<dyn DiagnosticSink>,
    pub(super) transcript: Arc<dyn TranscriptLogger>,
    pub(super) snapshot: Arc<watch::Sender<Arc<SimulationState>>>,
    pub(super) cancellation: CancellationToken,
}

impl StreamRun {
    pub(super) async fn execute(self, request: SimulationRequest) -> RunOutcome {
        info!(
            "Starting simulation run (preset: {})",
            request.preset_id.as_deref().unwrap_or("custom")
        );
        self.transcript.log(TranscriptEvent::new(
            "run_start",
            serde_json::json!({
                "preset_id": request.preset_id,
                "parameters": request.parameters,
            }),
        ));

        let outcome = match self.stream(&request).await {
            Ok(outcome) => outcome,
            Err(error) => RunOutcome::Failed(error),
        };

        match &outcome {
            RunOutcome::Completed => info!("Simulation run completed"),
            RunOutcome::Cancelled => debug!("Simulation run cancelled"),
            RunOutcome::EndedEarly => {
                warn!("Simulation stream closed before simulation_end");
                self.abandon();
            }
            RunOutcome::Failed(error) => {
                warn!("Simulation run failed: {}", error);
                self.abandon();
            }
        }

        self.transcript.log(TranscriptEvent::new(
            "run_outcome",
            serde_json::json!({
                "outcome": outcome.label(),
                "error": outcome.error().map(|e| e.to_string()),
            }),
        ));
        outcome
    }

    async fn stream(&self, request: &SimulationRequest) -> Result<RunOutcome, RunError> {
        request
            .validate()
            .map_err(|e| RunError::Open(FeedError::InvalidRequest(e)))?;

        let mut frames = tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => return Ok(RunOutcome::Cancelled),
            opened = self.feed.open(request) => opened.map_err(RunError::Open)?,
        };

        loop {
            let next = tokio::select! {
                biased;
                _ = self.cancellation.cancelled() => return Ok(RunOutcome::Cancelled),
                next = frames.next() => next,
            };

            let frame = match next {
                Some(frame) => frame.map_err(RunError::Read)?,
                None => return Ok(RunOutcome::EndedEarly),
            };

            let record = match frame {
                Frame::Record(record) => record,
                Frame::Diagnostic(diagnostic) => {
                    self.on_diagnostic(diagnostic)?;
                    continue;
                }
            };

            let Some(event) = self.decode(&record)? else {
                continue;
            };

            match self.fold(&event) {
                None => return Ok(RunOutcome::Cancelled),
                Some(ApplyOutcome::IgnoredAfterCompletion) => {
                    debug!("Ignoring {} after simulation_end", event.kind());
                }
                Some(ApplyOutcome::Applied) => {}
            }

            if event.is_terminal() {
                // Nothing follows simulation_end; dropping `frames` closes the connection
                return Ok(RunOutcome::Completed);
            }
        }
    }

    /// Decode a record, turning an unknown kind into a diagnostic.
    fn decode(&self, record: &Record) -> Result<Option<SimulationEvent>, RunError> {
        trace!("Record: {} ({} bytes)", record.event, record.data.len());
        self.transcript.log(TranscriptEvent::new(
            "record",
            serde_json::json!({ "event": record.event, "data": record.data }),
        ));

        match SimulationEvent::decode(&record.event, &record.data) {
            Ok(event) => Ok(Some(event)),
            Err(DecodeError::UnknownKind(event)) => {
                self.on_diagnostic(RecordDiagnostic::UnknownEventKind { event })?;
                Ok(None)
            }
            Err(e) => Err(RunError::Decode(e)),
        }
    }

    fn on_diagnostic(&self, diagnostic: RecordDiagnostic) -> Result<(), RunError> {
        warn!("Stream diagnostic: {}", diagnostic);
        self.diagnostics.report(&diagnostic);
        if let Ok(payload) = serde_json::to_value(&diagnostic) {
            self.transcript
                .log(TranscriptEvent::new("diagnostic", payload));
        }

        if self.params.parse_mode.is_strict() {
            return Err(RunError::StrictDiagnostic(diagnostic));
        }
        Ok(())
    }

    /// Fold one event into a new snapshot.
    ///
    /// Returns `None` when the run has been cancelled; nothing is written then.
    fn fold(&self, event: &SimulationEvent) -> Option<ApplyOutcome> {
        let mut outcome = None;

        self.snapshot.send_if_modified(|current| {
            if self.cancellation.is_cancelled() {
                return false;
            }
            if current.is_complete() {
                outcome = Some(ApplyOutcome::IgnoredAfterCompletion);
                return false;
            }
            if let Some(round) = event.round()
                && round < current.current_round
            {
                debug!(
                    "{} reports round {} while round {} is current",
                    event.kind(),
                    round,
                    current.current_round
                );
            }

            let applied = Arc::make_mut(current).apply(event);
            debug!("Applied {}", event.kind());
            outcome = Some(applied);
            applied == ApplyOutcome::Applied
        });

        outcome
    }

    fn abandon(&self) {
        abandon(&self.snapshot, &self.cancellation);
    }
}

/// Return a running aggregate to idle, keeping its partial state.
///
/// Does nothing once `cancellation` has fired: the aggregate then belongs to
/// a reset or to the run that replaced this one.
pub(super) fn abandon(
    snapshot: &watch::Sender<Arc<SimulationState>>,
    cancellation: &CancellationToken,
) {
    snapshot.send_if_modified(|current| {
        if cancellation.is_cancelled() || !current.is_running() {
            return false;
        }
        Arc::make_mut(current).abandon()
    });
}
