//! Simulation controller use case.
//!
//! Owns the [`SimulationState`] aggregate for one observer. A run is started
//! with [`start`](SimulationController::start), which opens the feed and
//! folds its events in a background task; [`reset`](SimulationController::reset)
//! cancels that task and returns the aggregate to idle.
//!
//! # Snapshots
//!
//! The aggregate is published through a `watch` channel as
//! `Arc<SimulationState>`. Every applied event produces a new snapshot;
//! subscribers only ever see complete snapshots and keep the `Arc` they hold
//! unchanged.
//!
//! # Cancellation
//!
//! Each run owns a [`CancellationToken`]. `reset()` and a subsequent
//! `start()` cancel the previous token *before* replacing the snapshot, and
//! the run checks its token inside the snapshot's write section. A stale run
//! therefore stops at its next suspension point and never writes again.

mod run;
mod types;

pub use types::{RunError, RunOutcome};

use crate::config::StreamParams;
use crate::ports::diagnostics::{DiagnosticSink, NoDiagnostics};
use crate::ports::simulation_feed::SimulationFeed;
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptLogger};
use bargaining_domain::{SimulationRequest, SimulationState};
use futures::FutureExt;
use run::StreamRun;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Handle on a started run.
pub struct RunHandle {
    task: JoinHandle<RunOutcome>,
}

impl RunHandle {
    /// Wait for the run to end.
    pub async fn wait(self) -> RunOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => RunOutcome::Failed(RunError::TaskFailed(e.to_string())),
        }
    }

}

/// Use case that drives simulation runs and owns their aggregate.
pub struct SimulationController {
    feed: Arc<dyn SimulationFeed>,
    params: StreamParams,
    diagnostics: Arc<dyn DiagnosticSink>,
    transcript: Arc<dyn TranscriptLogger>,
    snapshot: Arc<watch::Sender<Arc<SimulationState>>>,
    active: Mutex<Option<CancellationToken>>,
}

impl SimulationController {
    pub fn new(feed: Arc<dyn SimulationFeed>) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(SimulationState::new()));
        Self {
            feed,
            params: StreamParams::default(),
            diagnostics: Arc::new(NoDiagnostics),
            transcript: Arc::new(NoTranscriptLogger),
            snapshot: Arc::new(snapshot),
            active: Mutex::new(None),
        }
    }

    pub fn with_params(mut self, params: StreamParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = logger;
        self
    }

    /// Observe the aggregate. The receiver sees every snapshot published
    /// after it was created, starting from the current one.
    pub fn subscribe(&self) -> watch::Receiver<Arc<SimulationState>> {
        self.snapshot.subscribe()
    }

    /// The latest snapshot.
    pub fn snapshot(&self) -> Arc<SimulationState> {
        self.snapshot.borrow().clone()
    }

    /// Whether a started run has not been cancelled or replaced yet.
    pub fn has_active_run(&self) -> bool {
        self.lock_active()
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }

    /// Start a new run.
    ///
    /// Any previous run is cancelled first. The aggregate is replaced by an
    /// empty running one before this returns; events are folded by a task
    /// spawned on the current Tokio runtime. A panic inside that task fails
    /// the run like any other error.
    pub fn start(&self, request: SimulationRequest) -> RunHandle {
        let cancellation = CancellationToken::new();

        {
            let mut active = self.lock_active();
            if let Some(previous) = active.replace(cancellation.clone()) {
                debug!("Cancelling previous simulation run");
                previous.cancel();
            }
            self.snapshot
                .send_replace(Arc::new(SimulationState::running()));
        }

        let run = StreamRun {
            feed: self.feed.clone(),
            params: self.params,
            diagnostics: self.diagnostics.clone(),
            transcript: self.transcript.clone(),
            snapshot: self.snapshot.clone(),
            cancellation: cancellation.clone(),
        };
        let snapshot = self.snapshot.clone();

        let task = tokio::spawn(async move {
            match AssertUnwindSafe(run.execute(request)).catch_unwind().await {
                Ok(outcome) => outcome,
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    error!("Simulation run panicked: {}", message);
                    run::abandon(&snapshot, &cancellation);
                    RunOutcome::Failed(RunError::TaskFailed(message))
                }
            }
        });

        RunHandle { task }
    }

    /// Cancel the current run (if any) and return the aggregate to idle.
    ///
    /// Safe to call at any time, including mid-stream.
    pub fn reset(&self) {
        let mut active = self.lock_active();
        if let Some(token) = active.take() {
            token.cancel();
        }
        self.snapshot.send_replace(Arc::new(SimulationState::new()));
    }

    fn lock_active(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        // A poisoned lock only means a panic elsewhere; the token slot stays valid
        self.active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "run task panicked".to_string()
    }
}
