//! Domain layer for bargaining-observer
//!
//! This crate contains the negotiation data model, the closed set of
//! simulation events, and the pure fold that turns an ordered event
//! sequence into a [`SimulationState`]. It has no I/O.
//!
//! # Core Concepts
//!
//! ## Events
//!
//! The engine streams one record per event. [`SimulationEvent`] is the
//! decoded form: one variant per wire kind, matched exhaustively wherever
//! events are consumed.
//!
//! ## Aggregate
//!
//! [`SimulationState`] is the single root of derived state. Status moves
//! `idle -> running -> complete`; per-agent projections ([`AgentState`])
//! are upserted from `agent_action` events and marked by settlements.

pub mod agent;
pub mod core;
pub mod event;
pub mod scenario;
pub mod simulation;
pub mod stream;

// Re-export commonly used types
pub use agent::{AgentIdentity, AgentState, AgentTier, AgentType, DEFAULT_WILLINGNESS, Relationship};
pub use crate::core::{error::DomainError, ids::AgentId};
pub use event::{
    AgentAction, ConflictEvent, DecodeError, EventKind, Mediation, RoundEnd, RoundStart,
    Settlement, SimulationEnd, SimulationEvent,
};
pub use scenario::{ExportPressure, MacroParameters, ScenarioPreset, SimulationRequest};
pub use simulation::{
    ApplyOutcome, FeedEntry, NegotiationPair, PHASE_COUNT, PairProgress, STANDARD_PAIRS,
    SimulationState, SimulationStatus, chronological_feed, fold_events,
};
pub use stream::{Frame, MissingField, ParseMode, Record, RecordDiagnostic};
