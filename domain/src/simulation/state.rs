//! The simulation aggregate and its transition function.
//!
//! # Transition rules
//!
//! | Event | Effect |
//! |-------|--------|
//! | `round_start` | current round, phase, phase name and active agents |
//! | `round_end` | append the round summary |
//! | `agent_action` | upsert the agent's state, append to its history and the global feed |
//! | `settlement` | append; mark each bound agent that already has a state as settled |
//! | `conflict_event` | append |
//! | `mediation` | append |
//! | `simulation_end` | status `complete`, benchmark, summary and outcomes |
//!
//! Events are applied strictly in arrival order. The round number an event
//! reports about itself is never used to reorder anything.

use super::pairs::{NegotiationPair, PairProgress, STANDARD_PAIRS};
use super::status::SimulationStatus;
use crate::agent::AgentState;
use crate::core::ids::AgentId;
use crate::event::{
    AgentAction, ConflictEvent, Mediation, RoundEnd, Settlement, SimulationEvent,
};
use std::collections::BTreeMap;

/// Result of applying one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The aggregate is already complete; the event was not applied.
    IgnoredAfterCompletion,
}

/// Aggregate view of one simulation run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulationState {
    pub status: SimulationStatus,
    pub current_round: u32,
    pub current_phase: u8,
    pub current_phase_name: String,
    /// Agents announced by the latest `round_start`.
    pub active_agents: Vec<AgentId>,
    pub agent_states: BTreeMap<AgentId, AgentState>,
    pub settlements: Vec<Settlement>,
    pub conflict_events: Vec<ConflictEvent>,
    pub mediations: Vec<Mediation>,
    /// Every action in arrival order.
    pub action_feed: Vec<AgentAction>,
    pub round_summaries: Vec<RoundEnd>,
    /// Final benchmark ("märke"), set by `simulation_end`.
    pub marke: Option<f64>,
    pub final_summary: Option<String>,
    pub outcomes: Vec<Settlement>,
}

impl SimulationState {
    /// Empty, idle aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty aggregate for a run that has just started.
    pub fn running() -> Self {
        Self {
            status: SimulationStatus::Running,
            ..Self::default()
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == SimulationStatus::Running
    }

    pub fn is_complete(&self) -> bool {
        self.status == SimulationStatus::Complete
    }

    /// Fold one event into the aggregate.
    pub fn apply(&mut self, event: &SimulationEvent) -> ApplyOutcome {
        if self.is_complete() {
            return ApplyOutcome::IgnoredAfterCompletion;
        }

        match event {
            SimulationEvent::RoundStart(rs) => {
                self.current_round = rs.round_number;
                self.current_phase = rs.phase;
                self.current_phase_name = rs.phase_name.clone();
                self.active_agents = rs.active_agents.clone();
            }
            SimulationEvent::RoundEnd(re) => {
                self.round_summaries.push(re.clone());
            }
            SimulationEvent::AgentAction(action) => {
                self.agent_states
                    .entry(action.agent_id.clone())
                    .or_insert_with(|| AgentState::new(action.agent_id.clone()))
                    .record_action(action);
                self.action_feed.push(action.clone());
            }
            SimulationEvent::Settlement(settlement) => {
                for party in settlement.parties() {
                    if let Some(state) = self.agent_states.get_mut(party) {
                        state.settle(settlement.level);
                    }
                }
                self.settlements.push(settlement.clone());
            }
            SimulationEvent::ConflictEvent(ce) => {
                self.conflict_events.push(ce.clone());
            }
            SimulationEvent::Mediation(m) => {
                self.mediations.push(m.clone());
            }
            SimulationEvent::SimulationEnd(end) => {
                self.status = SimulationStatus::Complete;
                self.marke = end.marke;
                self.final_summary = Some(end.summary.clone());
                self.outcomes = end.outcomes.clone();
            }
        }

        ApplyOutcome::Applied
    }

    /// Give up on a running aggregate: keep what was folded, return to idle.
    ///
    /// A complete aggregate is left untouched. Returns whether the status changed.
    pub fn abandon(&mut self) -> bool {
        if self.is_running() {
            self.status = SimulationStatus::Idle;
            true
        } else {
            false
        }
    }

    pub fn agent(&self, agent_id: &str) -> Option<&AgentState> {
        self.agent_states.get(agent_id)
    }

    pub fn latest_action(&self, agent_id: &str) -> Option<&AgentAction> {
        self.agent(agent_id).and_then(AgentState::latest_action)
    }

    pub fn settled_agents(&self) -> impl Iterator<Item = &AgentState> {
        self.agent_states.values().filter(|s| s.is_settled)
    }

    /// Actions reporting round `round`, in arrival order.
    pub fn actions_in_round(&self, round: u32) -> impl Iterator<Item = &AgentAction> {
        self.action_feed
            .iter()
            .filter(move |a| a.round_number == round)
    }

    /// The first settlement matching `pair`, if any.
    pub fn settlement_for(&self, pair: &NegotiationPair) -> Option<&Settlement> {
        self.settlements.iter().find(|s| pair.matches(s))
    }

    /// Progress of every standard bargaining table.
    pub fn pair_progress(&self) -> Vec<PairProgress<'_>> {
        STANDARD_PAIRS
            .iter()
            .map(|pair| PairProgress {
                pair,
                settlement: self.settlement_for(pair),
                mediation: self.mediations.iter().find(|m| pair.matches_mediation(m)),
            })
            .collect()
    }
}

/// Fold an ordered event sequence into a fresh running aggregate.
pub fn fold_events<'a>(events: impl IntoIterator<Item = &'a SimulationEvent>) -> SimulationState {
    let mut state = SimulationState::running();
    for event in events {
        state.apply(event);
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{RoundStart, SimulationEnd};

    fn round_start(round: u32, phase: u8, name: &str) -> SimulationEvent {
        SimulationEvent::RoundStart(RoundStart {
            round_number: round,
            phase,
            phase_name: name.to_string(),
            active_agents: vec!["if_metall".into(), "teknikforetagen".into()],
        })
    }

    fn action(agent: &str, round: u32, position: f64, willingness: u8) -> SimulationEvent {
        SimulationEvent::AgentAction(AgentAction {
            agent_id: agent.into(),
            round_number: round,
            phase: 1,
            position,
            reasoning: "Inflationen äter upp lönerna".to_string(),
            public_statement: "Vi står fast".to_string(),
            willingness_to_settle: willingness,
        })
    }

    fn settlement(unions: &[&str], employer: &str, level: f64, round: u32) -> Settlement {
        Settlement {
            union_ids: unions.iter().map(|u| AgentId::from(*u)).collect(),
            employer_id: employer.into(),
            level,
            round,
        }
    }

    fn end(summary: &str, outcomes: Vec<Settlement>, marke: Option<f64>) -> SimulationEvent {
        SimulationEvent::SimulationEnd(SimulationEnd {
            summary: summary.to_string(),
            outcomes,
            marke,
        })
    }

    #[test]
    fn test_end_to_end_scenario() {
        let industry = settlement(&["if_metall"], "teknikforetagen", 3.2, 5);
        let events = vec![
            round_start(1, 1, "Öppningsbud"),
            action("if_metall", 1, 4.0, 40),
            SimulationEvent::Settlement(industry.clone()),
            end("Klart", vec![industry.clone()], Some(3.2)),
        ];

        let state = fold_events(&events);

        assert_eq!(state.status, SimulationStatus::Complete);
        assert_eq!(state.current_round, 1);
        assert_eq!(state.current_phase_name, "Öppningsbud");
        let if_metall = state.agent("if_metall").unwrap();
        assert!(if_metall.is_settled);
        assert_eq!(if_metall.settlement_level, Some(3.2));
        assert_eq!(if_metall.current_position, Some(4.0));
        assert_eq!(state.action_feed.len(), 1);
        assert_eq!(state.marke, Some(3.2));
        assert_eq!(state.final_summary.as_deref(), Some("Klart"));
        assert_eq!(state.outcomes, vec![industry]);
    }

    #[test]
    fn test_agent_upsert_defaults_before_applying_action() {
        let mut state = SimulationState::running();
        state.apply(&action("kommunal", 1, 5.1, 20));

        let kommunal = state.agent("kommunal").unwrap();
        assert_eq!(kommunal.agent_id, "kommunal");
        assert_eq!(kommunal.willingness_to_settle, 20);
        assert_eq!(kommunal.current_position, Some(5.1));
        assert_eq!(kommunal.actions.len(), 1);
        assert!(!kommunal.is_settled);
        assert_eq!(kommunal.settlement_level, None);
    }

    #[test]
    fn test_actions_keep_arrival_order_across_rounds() {
        let events = vec![
            action("unionen", 3, 3.5, 60),
            action("almega", 2, 2.0, 40),
            action("unionen", 1, 4.0, 30),
        ];
        let state = fold_events(&events);

        let rounds: Vec<u32> = state.action_feed.iter().map(|a| a.round_number).collect();
        assert_eq!(rounds, vec![3, 2, 1]);
        // Latest position is the last one to arrive, not the highest round
        assert_eq!(state.agent("unionen").unwrap().current_position, Some(4.0));
        assert_eq!(state.latest_action("unionen").unwrap().round_number, 1);
        assert_eq!(state.actions_in_round(2).count(), 1);
    }

    #[test]
    fn test_settlement_is_idempotent() {
        let deal = SimulationEvent::Settlement(settlement(
            &["if_metall", "unionen"],
            "teknikforetagen",
            3.0,
            4,
        ));
        let base = vec![
            action("if_metall", 1, 4.0, 70),
            action("unionen", 1, 3.8, 75),
            action("teknikforetagen", 1, 2.2, 80),
        ];

        let once = fold_events(base.iter().chain(std::iter::once(&deal)));
        let twice = fold_events(
            base.iter()
                .chain(std::iter::once(&deal))
                .chain(std::iter::once(&deal)),
        );

        assert_eq!(once.agent_states, twice.agent_states);
        assert_eq!(twice.settlements.len(), 2);
        assert_eq!(once.settled_agents().count(), 3);
    }

    #[test]
    fn test_settlement_skips_agents_without_state() {
        let mut state = SimulationState::running();
        state.apply(&action("handels", 1, 4.2, 70));
        state.apply(&SimulationEvent::Settlement(settlement(
            &["handels"],
            "svensk_handel",
            3.1,
            6,
        )));

        assert!(state.agent("handels").unwrap().is_settled);
        assert!(state.agent("svensk_handel").is_none());
        assert_eq!(state.settlements.len(), 1);
    }

    #[test]
    fn test_status_is_monotonic_after_completion() {
        let mut state = SimulationState::running();
        state.apply(&end("Klart", vec![], None));
        assert!(state.is_complete());

        let late = [
            round_start(9, 4, "Offentlig sektor"),
            action("skr", 9, 2.0, 90),
            end("Igen", vec![], Some(9.9)),
        ];
        for event in &late {
            assert_eq!(state.apply(event), ApplyOutcome::IgnoredAfterCompletion);
        }
        assert!(!state.abandon());

        assert!(state.is_complete());
        assert_eq!(state.current_round, 0);
        assert!(state.action_feed.is_empty());
        assert_eq!(state.final_summary.as_deref(), Some("Klart"));
        assert_eq!(state.marke, None);
    }

    #[test]
    fn test_abandon_keeps_partial_state() {
        let mut state = fold_events(&[round_start(2, 2, "Industriavtalet"), action("lo", 2, 3.0, 50)]);
        assert!(state.abandon());
        assert_eq!(state.status, SimulationStatus::Idle);
        assert_eq!(state.action_feed.len(), 1);
        assert_eq!(state.current_round, 2);
        assert!(!state.abandon());
    }

    #[test]
    fn test_replay_is_deterministic() {
        let events = vec![
            round_start(1, 1, "Inledande krav"),
            action("if_metall", 1, 4.5, 35),
            action("teknikforetagen", 1, 1.5, 30),
            SimulationEvent::ConflictEvent(ConflictEvent {
                event_type: "strike_threat".to_string(),
                agent_id: "if_metall".into(),
                round_number: 1,
                description: "IF Metall threatens industrial action".to_string(),
            }),
            SimulationEvent::Mediation(Mediation {
                description: "Medlingsinstitutet brokers a settlement at 3.1%".to_string(),
                union_ids: vec!["if_metall".into()],
                employer_id: "teknikforetagen".into(),
                level: 3.1,
            }),
            SimulationEvent::RoundEnd(RoundEnd {
                round_number: 1,
                summary: "Round 1 complete.".to_string(),
            }),
        ];

        let first = fold_events(&events);
        let second = fold_events(&events);
        assert_eq!(first, second);
        assert_eq!(first.conflict_events.len(), 1);
        assert_eq!(first.mediations.len(), 1);
        assert_eq!(first.round_summaries.len(), 1);
        // Mediation is a proposal only
        assert!(first.settled_agents().next().is_none());
    }

    #[test]
    fn test_pair_progress_tracks_standard_tables() {
        let mut state = SimulationState::running();
        state.apply(&SimulationEvent::Settlement(settlement(
            &["unionen"],
            "teknikforetagen",
            3.3,
            3,
        )));

        let progress = state.pair_progress();
        assert_eq!(progress.len(), STANDARD_PAIRS.len());
        let industry = &progress[0];
        assert_eq!(industry.pair.label, "Industriavtalet");
        assert_eq!(industry.settlement.map(|s| s.level), Some(3.3));
        // Unionen–Almega shares a union but not the employer
        assert!(progress[2].settlement.is_none());
    }
}
