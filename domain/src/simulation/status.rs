//! Lifecycle status of the simulation aggregate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of named phases in a negotiation round-trip (opening to summary).
pub const PHASE_COUNT: u8 = 5;

/// Status advances `Idle -> Running -> Complete`.
///
/// The derived ordering follows that progression; a transition to a lower
/// status only happens through an explicit reset or an abandoned run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SimulationStatus {
    #[default]
    Idle,
    Running,
    Complete,
}

impl SimulationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimulationStatus::Idle => "idle",
            SimulationStatus::Running => "running",
            SimulationStatus::Complete => "complete",
        }
    }
}

impl fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_order_follows_lifecycle() {
        assert!(SimulationStatus::Idle < SimulationStatus::Running);
        assert!(SimulationStatus::Running < SimulationStatus::Complete);
        assert_eq!(SimulationStatus::default(), SimulationStatus::Idle);
    }
}
