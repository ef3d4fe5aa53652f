//! Per-agent projection folded from the event stream.
//!
//! An [`AgentState`] is never transmitted; it is derived entirely from the
//! `agent_action` and `settlement` events seen so far.

use crate::core::ids::AgentId;
use crate::event::AgentAction;

/// Willingness assumed for an agent before its first action arrives.
pub const DEFAULT_WILLINGNESS: u8 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    pub agent_id: AgentId,
    /// Latest bargaining position in percent, `None` until the first action.
    pub current_position: Option<f64>,
    /// Latest willingness to settle (0-100).
    pub willingness_to_settle: u8,
    pub is_settled: bool,
    pub settlement_level: Option<f64>,
    /// This agent's actions in arrival order.
    pub actions: Vec<AgentAction>,
}

impl AgentState {
    /// Fresh state for an agent with no recorded actions.
    pub fn new(agent_id: AgentId) -> Self {
        Self {
            agent_id,
            current_position: None,
            willingness_to_settle: DEFAULT_WILLINGNESS,
            is_settled: false,
            settlement_level: None,
            actions: Vec::new(),
        }
    }

    /// Adopt the action's position and willingness and append it to history.
    pub fn record_action(&mut self, action: &AgentAction) {
        self.current_position = Some(action.position);
        self.willingness_to_settle = action.willingness_to_settle;
        self.actions.push(action.clone());
    }

    /// Mark the agent settled at `level`. Re-applying the same level is a no-op.
    pub fn settle(&mut self, level: f64) {
        self.is_settled = true;
        self.settlement_level = Some(level);
    }

    pub fn latest_action(&self) -> Option<&AgentAction> {
        self.actions.last()
    }

    /// Position change between the first and the latest action.
    pub fn position_drift(&self) -> Option<f64> {
        let first = self.actions.first()?;
        let last = self.actions.last()?;
        Some(last.position - first.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(position: f64, willingness: u8) -> AgentAction {
        AgentAction {
            agent_id: AgentId::new("unionen"),
            round_number: 1,
            phase: 1,
            position,
            reasoning: String::new(),
            public_statement: String::new(),
            willingness_to_settle: willingness,
        }
    }

    #[test]
    fn test_new_state_defaults() {
        let state = AgentState::new(AgentId::new("unionen"));
        assert_eq!(state.current_position, None);
        assert_eq!(state.willingness_to_settle, DEFAULT_WILLINGNESS);
        assert!(!state.is_settled);
        assert!(state.actions.is_empty());
        assert!(state.position_drift().is_none());
    }

    #[test]
    fn test_record_action_updates_position_and_history() {
        let mut state = AgentState::new(AgentId::new("unionen"));
        state.record_action(&action(4.5, 30));
        state.record_action(&action(3.9, 65));

        assert_eq!(state.current_position, Some(3.9));
        assert_eq!(state.willingness_to_settle, 65);
        assert_eq!(state.actions.len(), 2);
        assert_eq!(state.latest_action().unwrap().position, 3.9);
        let drift = state.position_drift().unwrap();
        assert!((drift + 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_settle_is_idempotent() {
        let mut state = AgentState::new(AgentId::new("unionen"));
        state.settle(3.2);
        let once = state.clone();
        state.settle(3.2);
        assert_eq!(state, once);
    }
}
