//! Agent domain module
//!
//! Static descriptors of the negotiating parties (loaded from the catalog)
//! and the per-agent projection folded from the event stream.

pub mod identity;
pub mod state;

pub use identity::{AgentIdentity, AgentTier, AgentType, Relationship};
pub use state::{AgentState, DEFAULT_WILLINGNESS};
