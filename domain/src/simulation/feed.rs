//! Display ordering for the action feed.
//!
//! The aggregate keeps actions and conflict events in arrival order. A
//! presentation that wants them interleaved by round uses
//! [`chronological_feed`], which sorts a merged view without touching the
//! aggregate.

use super::state::SimulationState;
use crate::event::{AgentAction, ConflictEvent};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedEntry<'a> {
    Action(&'a AgentAction),
    Conflict(&'a ConflictEvent),
}

impl FeedEntry<'_> {
    pub fn round(&self) -> u32 {
        match self {
            FeedEntry::Action(a) => a.round_number,
            FeedEntry::Conflict(c) => c.round_number,
        }
    }
}

/// Actions followed by conflict events, stably sorted by round.
pub fn chronological_feed(state: &SimulationState) -> Vec<FeedEntry<'_>> {
    let mut feed: Vec<FeedEntry<'_>> = state
        .action_feed
        .iter()
        .map(FeedEntry::Action)
        .chain(state.conflict_events.iter().map(FeedEntry::Conflict))
        .collect();
    feed.sort_by_key(FeedEntry::round);
    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SimulationEvent;
    use crate::simulation::fold_events;

    fn action(agent: &str, round: u32) -> SimulationEvent {
        SimulationEvent::AgentAction(AgentAction {
            agent_id: agent.into(),
            round_number: round,
            phase: 2,
            position: 3.0,
            reasoning: String::new(),
            public_statement: String::new(),
            willingness_to_settle: 35,
        })
    }

    #[test]
    fn test_conflicts_interleave_by_round_without_reordering_state() {
        let events = vec![
            action("if_metall", 2),
            SimulationEvent::ConflictEvent(ConflictEvent {
                event_type: "strike_threat".to_string(),
                agent_id: "if_metall".into(),
                round_number: 2,
                description: "Strike notice".to_string(),
            }),
            action("unionen", 3),
            action("teknikforetagen", 1),
        ];
        let state = fold_events(&events);

        let feed = chronological_feed(&state);
        let rounds: Vec<u32> = feed.iter().map(FeedEntry::round).collect();
        assert_eq!(rounds, vec![1, 2, 2, 3]);
        assert!(matches!(feed[2], FeedEntry::Conflict(_)));

        // Aggregate order is untouched
        assert_eq!(state.action_feed[0].round_number, 2);
    }
}
