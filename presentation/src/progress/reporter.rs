//! Live progress reporting for a streaming run
//!
//! The reporter only reads snapshots. It follows the controller's watch
//! channel, redraws a phase bar for the current round and prints one line
//! for every settlement, conflict, mediation and round summary that appears.

use bargaining_domain::{PHASE_COUNT, SimulationState};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use tokio::sync::watch;

/// Counts of what has already been printed for the current aggregate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FeedCursor {
    settlements: usize,
    conflicts: usize,
    mediations: usize,
    summaries: usize,
}

impl FeedCursor {
    /// Lines for everything added since the last call.
    ///
    /// A snapshot with fewer entries than already seen belongs to a fresh
    /// aggregate (after a reset); the cursor starts over.
    pub fn advance(&mut self, state: &SimulationState) -> Vec<String> {
        if state.settlements.len() < self.settlements
            || state.conflict_events.len() < self.conflicts
            || state.mediations.len() < self.mediations
            || state.round_summaries.len() < self.summaries
        {
            *self = Self::default();
        }

        let mut lines = Vec::new();

        for summary in &state.round_summaries[self.summaries..] {
            lines.push(format!(
                "{} Round {}: {}",
                "·".dimmed(),
                summary.round_number,
                summary.summary
            ));
        }
        for conflict in &state.conflict_events[self.conflicts..] {
            lines.push(format!(
                "{} {} ({}): {}",
                "!".red().bold(),
                conflict.agent_id,
                conflict.event_type,
                conflict.description
            ));
        }
        for mediation in &state.mediations[self.mediations..] {
            lines.push(format!(
                "{} Mediation {:.1}%: {}",
                "*".magenta(),
                mediation.level,
                mediation.description
            ));
        }
        for settlement in &state.settlements[self.settlements..] {
            let unions: Vec<&str> = settlement.union_ids.iter().map(|u| u.as_str()).collect();
            lines.push(format!(
                "{} Settled: {} / {} at {:.1}% (round {})",
                "v".green(),
                unions.join(", "),
                settlement.employer_id,
                settlement.level,
                settlement.round
            ));
        }

        self.settlements = state.settlements.len();
        self.conflicts = state.conflict_events.len();
        self.mediations = state.mediations.len();
        self.summaries = state.round_summaries.len();
        lines
    }
}

/// Reports run progress with an indicatif phase bar
pub struct ProgressReporter {
    multi: MultiProgress,
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let multi = MultiProgress::new();
        let bar = multi.add(ProgressBar::new(PHASE_COUNT as u64));
        bar.set_style(Self::phase_style());
        bar.set_prefix("Waiting");
        Self { multi, bar }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    /// Follow snapshots until the run leaves the running state or the
    /// controller goes away.
    pub async fn follow(&self, mut snapshots: watch::Receiver<Arc<SimulationState>>) {
        let mut cursor = FeedCursor::default();
        self.bar
            .enable_steady_tick(std::time::Duration::from_millis(120));

        loop {
            let state = snapshots.borrow_and_update().clone();
            self.render(&state, &mut cursor);
            if !state.is_running() {
                break;
            }
            if snapshots.changed().await.is_err() {
                break;
            }
        }

        self.bar.finish_and_clear();
    }

    fn render(&self, state: &SimulationState, cursor: &mut FeedCursor) {
        for line in cursor.advance(state) {
            // println through MultiProgress keeps the bar below the log lines
            let _ = self.multi.println(line);
        }

        if state.current_round == 0 {
            return;
        }
        self.bar.set_prefix(format!("Round {}", state.current_round));
        self.bar.set_position(u64::from(state.current_phase));

        let latest = state.action_feed.last().map(|action| {
            format!(
                "{} {:.1}%: {}",
                action.agent_id, action.position, action.public_statement
            )
        });
        self.bar.set_message(match latest {
            Some(latest) => format!("{} | {}", state.current_phase_name, latest),
            None => state.current_phase_name.clone(),
        });
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bargaining_domain::{ConflictEvent, RoundEnd, Settlement, SimulationEvent};

    fn settlement(level: f64) -> SimulationEvent {
        SimulationEvent::Settlement(Settlement {
            union_ids: vec!["handels".into()],
            employer_id: "svensk_handel".into(),
            level,
            round: 6,
        })
    }

    #[test]
    fn test_cursor_reports_only_new_entries() {
        let mut state = SimulationState::running();
        let mut cursor = FeedCursor::default();

        state.apply(&SimulationEvent::RoundEnd(RoundEnd {
            round_number: 5,
            summary: "Handeln närmar sig".to_string(),
        }));
        state.apply(&settlement(3.0));
        let first = cursor.advance(&state);
        assert_eq!(first.len(), 2);
        assert!(first[0].contains("Handeln närmar sig"));
        assert!(first[1].contains("svensk_handel"));

        assert!(cursor.advance(&state).is_empty());

        state.apply(&SimulationEvent::ConflictEvent(ConflictEvent {
            event_type: "strike".to_string(),
            agent_id: "handels".into(),
            round_number: 6,
            description: "Strejk i lager".to_string(),
        }));
        let second = cursor.advance(&state);
        assert_eq!(second.len(), 1);
        assert!(second[0].contains("Strejk i lager"));
    }

    #[test]
    fn test_cursor_restarts_after_reset() {
        let mut cursor = FeedCursor::default();
        let mut state = SimulationState::running();
        state.apply(&settlement(3.0));
        state.apply(&settlement(3.0));
        assert_eq!(cursor.advance(&state).len(), 2);

        let mut fresh = SimulationState::running();
        fresh.apply(&settlement(2.8));
        let lines = cursor.advance(&fresh);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("2.8%"));
    }

    #[tokio::test]
    async fn test_follow_returns_when_run_ends() {
        let (tx, rx) = watch::channel(Arc::new(SimulationState::running()));
        let reporter = ProgressReporter::new();

        let follow = tokio::spawn(async move { reporter.follow(rx).await });
        tx.send_replace(Arc::new(SimulationState::new()));

        follow.await.unwrap();
    }
}
