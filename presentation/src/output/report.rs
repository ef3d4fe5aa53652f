//! Machine-readable report of a finished run.

use bargaining_application::RunOutcome;
use bargaining_domain::{
    ConflictEvent, Mediation, RoundEnd, Settlement, SimulationState,
};
use serde::Serialize;

/// One bargaining table in the report
#[derive(Debug, Serialize)]
pub struct TableReport {
    pub label: &'static str,
    pub settled: bool,
    pub level: Option<f64>,
    pub mediated: bool,
}

/// One agent's final standing
#[derive(Debug, Serialize)]
pub struct AgentReport<'a> {
    pub agent_id: &'a str,
    pub position: Option<f64>,
    pub willingness_to_settle: u8,
    pub is_settled: bool,
    pub settlement_level: Option<f64>,
    pub actions: usize,
    pub position_drift: Option<f64>,
}

/// Everything a run produced, borrowed from the final snapshot.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub outcome: &'static str,
    pub error: Option<String>,
    pub status: &'static str,
    pub rounds: u32,
    pub last_phase: u8,
    pub marke: Option<f64>,
    pub summary: Option<&'a str>,
    pub tables: Vec<TableReport>,
    pub agents: Vec<AgentReport<'a>>,
    pub settlements: &'a [Settlement],
    pub outcomes: &'a [Settlement],
    pub mediations: &'a [Mediation],
    pub conflicts: &'a [ConflictEvent],
    pub round_summaries: &'a [RoundEnd],
}

impl<'a> RunReport<'a> {
    pub fn new(state: &'a SimulationState, outcome: &RunOutcome) -> Self {
        let tables = state
            .pair_progress()
            .into_iter()
            .map(|progress| TableReport {
                label: progress.pair.label,
                settled: progress.is_settled(),
                level: progress.level(),
                mediated: progress.mediation.is_some(),
            })
            .collect();

        let agents = state
            .agent_states
            .values()
            .map(|agent| AgentReport {
                agent_id: agent.agent_id.as_str(),
                position: agent.current_position,
                willingness_to_settle: agent.willingness_to_settle,
                is_settled: agent.is_settled,
                settlement_level: agent.settlement_level,
                actions: agent.actions.len(),
                position_drift: agent.position_drift(),
            })
            .collect();

        Self {
            outcome: outcome.label(),
            error: outcome.error().map(|e| e.to_string()),
            status: state.status.as_str(),
            rounds: state.current_round,
            last_phase: state.current_phase,
            marke: state.marke,
            summary: state.final_summary.as_deref(),
            tables,
            agents,
            settlements: &state.settlements,
            outcomes: &state.outcomes,
            mediations: &state.mediations,
            conflicts: &state.conflict_events,
            round_summaries: &state.round_summaries,
        }
    }
}
