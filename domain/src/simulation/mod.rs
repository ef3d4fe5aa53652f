//! The simulation aggregate and everything derived from it.
//!
//! [`SimulationState`] is folded one [`SimulationEvent`](crate::event::SimulationEvent)
//! at a time. The fold is a pure function of the event order, so the same
//! sequence always yields the same aggregate.

pub mod feed;
pub mod pairs;
pub mod state;
pub mod status;

pub use feed::{FeedEntry, chronological_feed};
pub use pairs::{NegotiationPair, PairProgress, STANDARD_PAIRS};
pub use state::{ApplyOutcome, SimulationState, fold_events};
pub use status::{PHASE_COUNT, SimulationStatus};
