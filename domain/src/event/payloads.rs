//! Payload shapes carried in the `data:` field of each record.

use crate::core::ids::AgentId;
use serde::{Deserialize, Serialize};

/// Announces a new round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundStart {
    pub round_number: u32,
    /// Phase number, 1..=5
    pub phase: u8,
    pub phase_name: String,
    pub active_agents: Vec<AgentId>,
}

/// Closes a round with a short summary line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundEnd {
    pub round_number: u32,
    pub summary: String,
}

/// One agent's move within a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAction {
    pub agent_id: AgentId,
    pub round_number: u32,
    pub phase: u8,
    /// Bargaining position, percent wage increase
    pub position: f64,
    pub reasoning: String,
    pub public_statement: String,
    /// 0-100
    pub willingness_to_settle: u8,
}

/// A binding agreement between one employer and one or more unions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub union_ids: Vec<AgentId>,
    pub employer_id: AgentId,
    pub level: f64,
    pub round: u32,
}

impl Settlement {
    /// Every party bound by this settlement: the unions followed by the employer.
    pub fn parties(&self) -> impl Iterator<Item = &AgentId> {
        self.union_ids
            .iter()
            .chain(std::iter::once(&self.employer_id))
    }

    pub fn binds(&self, agent_id: &str) -> bool {
        self.parties().any(|id| id == agent_id)
    }
}

/// A notable event such as a strike or lockout threat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictEvent {
    /// e.g. `strike_threat`, `lockout_threat`
    pub event_type: String,
    pub agent_id: AgentId,
    pub round_number: u32,
    pub description: String,
}

/// A non-binding resolution proposed by the mediator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mediation {
    pub description: String,
    pub union_ids: Vec<AgentId>,
    pub employer_id: AgentId,
    pub level: f64,
}

/// Terminal record of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEnd {
    pub summary: String,
    pub outcomes: Vec<Settlement>,
    /// Final benchmark ("märke"), if one was set.
    #[serde(default)]
    pub marke: Option<f64>,
}
