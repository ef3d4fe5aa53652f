//! Console output formatter for catalogs and finished runs

use crate::output::report::RunReport;
use bargaining_application::{Catalog, RunOutcome};
use bargaining_domain::{
    AgentIdentity, FeedEntry, ScenarioPreset, SimulationState, chronological_feed,
};
use colored::Colorize;
use serde::Serialize;

/// Formats catalogs and run results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Table of scenario presets
    pub fn format_presets(presets: &[ScenarioPreset]) -> String {
        let mut output = Self::header("Scenario Presets");
        output.push('\n');

        for preset in presets {
            let p = &preset.parameters;
            output.push_str(&format!(
                "\n{} {}\n",
                preset.id.yellow().bold(),
                format!("({})", preset.name).dimmed()
            ));
            output.push_str(&format!("  {}\n", preset.description));
            output.push_str(&format!(
                "  inflation {:.1}%  unemployment {:.1}%  gdp {:+.1}%  rate {:.2}%  climate {}  export {}  previous {:.1}%\n",
                p.inflation,
                p.unemployment,
                p.gdp_growth,
                p.policy_rate,
                p.political_climate,
                p.export_pressure.as_str(),
                p.previous_agreement
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Agent roster grouped by tier
    pub fn format_agents(agents: &[AgentIdentity]) -> String {
        let mut output = Self::header("Negotiating Agents");
        output.push('\n');

        let mut sorted: Vec<&AgentIdentity> = agents.iter().collect();
        sorted.sort_by_key(|a| a.tier);

        let mut current_tier = None;
        for agent in sorted {
            if current_tier != Some(agent.tier) {
                current_tier = Some(agent.tier);
                output.push_str(&Self::section_header(&format!(
                    "Tier {}: {}",
                    agent.tier.value(),
                    agent.tier.label()
                )));
            }
            output.push_str(&format!(
                "  {:<22} {:<8} {}\n",
                agent.id.as_str().yellow(),
                agent.agent_type.as_str(),
                agent.name
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Any catalog listing as pretty JSON
    pub fn format_json_list<T: Serialize>(items: &[T]) -> String {
        serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
    }

    /// Format the complete run report
    pub fn format(state: &SimulationState, outcome: &RunOutcome, catalog: &Catalog) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Wage Bargaining Results"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Outcome:".cyan().bold(),
            Self::outcome_line(outcome)
        ));
        output.push_str(&format!(
            "{} {} (phase {}: {})\n",
            "Rounds:".cyan().bold(),
            state.current_round,
            state.current_phase,
            state.current_phase_name
        ));

        // Round by round
        let feed = chronological_feed(state);
        if !feed.is_empty() {
            output.push_str(&Self::section_header("Negotiation Feed"));
            let mut round = None;
            for entry in feed {
                if round != Some(entry.round()) {
                    round = Some(entry.round());
                    output.push_str(&format!(
                        "\n{}\n",
                        format!("── Round {} ──", entry.round()).yellow().bold()
                    ));
                    if let Some(summary) = state
                        .round_summaries
                        .iter()
                        .find(|s| s.round_number == entry.round())
                    {
                        output.push_str(&format!("{}\n", summary.summary.dimmed()));
                    }
                }
                match entry {
                    FeedEntry::Action(action) => output.push_str(&format!(
                        "  {} {:.1}% (willingness {}): {}\n",
                        catalog.agent_name(action.agent_id.as_str()).bold(),
                        action.position,
                        action.willingness_to_settle,
                        action.public_statement
                    )),
                    FeedEntry::Conflict(conflict) => output.push_str(&format!(
                        "  {} {} [{}]: {}\n",
                        "!".red().bold(),
                        catalog.agent_name(conflict.agent_id.as_str()),
                        conflict.event_type,
                        conflict.description
                    )),
                }
            }
        }

        if !state.mediations.is_empty() {
            output.push_str(&Self::section_header("Mediation"));
            for mediation in &state.mediations {
                output.push_str(&format!(
                    "  {} {:.1}%: {}\n",
                    "*".magenta(),
                    mediation.level,
                    mediation.description
                ));
            }
        }

        output.push_str(&Self::section_header("Bargaining Tables"));
        output.push_str(&Self::tables(state));

        if let Some(summary) = &state.final_summary {
            output.push_str(&Self::section_header("Final Summary"));
            output.push_str(&format!("\n{}\n", summary));
        }
        if let Some(marke) = state.marke {
            output.push_str(&format!(
                "\n{} {:.1}%\n",
                "Märket:".green().bold(),
                marke
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format the outcome per table only (concise output)
    pub fn format_summary(state: &SimulationState, outcome: &RunOutcome) -> String {
        let mut output = format!(
            "{}\n\n",
            "=== Wage Bargaining Outcome ===".cyan().bold()
        );
        output.push_str(&format!("{} {}\n\n", "Run:".bold(), Self::outcome_line(outcome)));
        output.push_str(&Self::tables(state));
        if let Some(marke) = state.marke {
            output.push_str(&format!("\n{} {:.1}%\n", "Märket:".bold(), marke));
        }
        output
    }

    /// Format as JSON
    pub fn format_json(state: &SimulationState, outcome: &RunOutcome) -> String {
        serde_json::to_string_pretty(&RunReport::new(state, outcome))
            .unwrap_or_else(|_| "{}".to_string())
    }

    fn tables(state: &SimulationState) -> String {
        let mut output = String::new();
        for progress in state.pair_progress() {
            let status = match (progress.settlement, progress.level()) {
                (Some(s), _) => format!("{} {:.1}% (round {})", "settled".green(), s.level, s.round),
                (None, Some(level)) => format!("{} {:.1}%", "mediation proposed".magenta(), level),
                (None, None) => "open".dimmed().to_string(),
            };
            output.push_str(&format!("  {:<26} {}\n", progress.pair.label, status));
        }
        output
    }

    /// Notice for diagnostics reported during a run, if there were any.
    ///
    /// Diagnostics cover dropped half-records as well as skipped unknown kinds.
    pub fn format_diagnostics_notice(count: usize) -> Option<String> {
        match count {
            0 => None,
            1 => Some("1 stream diagnostic was reported (see -v for details)".to_string()),
            n => Some(format!(
                "{} stream diagnostics were reported (see -v for details)",
                n
            )),
        }
    }

    fn outcome_line(outcome: &RunOutcome) -> String {
        match outcome {
            RunOutcome::Completed => "completed".green().to_string(),
            RunOutcome::Cancelled => "cancelled".yellow().to_string(),
            RunOutcome::EndedEarly => "stream ended before the final outcome".yellow().to_string(),
            RunOutcome::Failed(e) => format!("{} {}", "failed:".red(), e),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
