//! The literal values of a record's `event:` field.

use std::fmt;
use std::str::FromStr;

/// Event kind as named on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    RoundStart,
    RoundEnd,
    AgentAction,
    Settlement,
    ConflictEvent,
    Mediation,
    SimulationEnd,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        EventKind::RoundStart,
        EventKind::RoundEnd,
        EventKind::AgentAction,
        EventKind::Settlement,
        EventKind::ConflictEvent,
        EventKind::Mediation,
        EventKind::SimulationEnd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::RoundStart => "round_start",
            EventKind::RoundEnd => "round_end",
            EventKind::AgentAction => "agent_action",
            EventKind::Settlement => "settlement",
            EventKind::ConflictEvent => "conflict_event",
            EventKind::Mediation => "mediation",
            EventKind::SimulationEnd => "simulation_end",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, EventKind::SimulationEnd)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_parses_from_its_wire_name() {
        for kind in EventKind::ALL {
            assert_eq!(kind.as_str().parse::<EventKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_kind_returns_name() {
        assert_eq!("ping".parse::<EventKind>(), Err("ping".to_string()));
        assert!("Round_Start".parse::<EventKind>().is_err());
    }
}
