//! Simulation events.
//!
//! Each record from the transport names its kind in the `event:` field and
//! carries a JSON payload in `data:`. [`SimulationEvent::decode`] turns such
//! a pair into one variant of a closed sum type, so every consumer matches
//! exhaustively over the kinds the engine emits.

pub mod kind;
pub mod payloads;

pub use kind::EventKind;
pub use payloads::{
    AgentAction, ConflictEvent, Mediation, RoundEnd, RoundStart, Settlement, SimulationEnd,
};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from decoding a record into a [`SimulationEvent`]
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Unknown event kind: {0}")]
    UnknownKind(String),

    #[error("Invalid {kind} payload: {source}")]
    InvalidPayload {
        kind: EventKind,
        #[source]
        source: serde_json::Error,
    },
}

impl DecodeError {
    pub fn is_unknown_kind(&self) -> bool {
        matches!(self, DecodeError::UnknownKind(_))
    }
}

/// A decoded simulation event
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    RoundStart(RoundStart),
    RoundEnd(RoundEnd),
    AgentAction(AgentAction),
    Settlement(Settlement),
    ConflictEvent(ConflictEvent),
    Mediation(Mediation),
    SimulationEnd(SimulationEnd),
}

impl SimulationEvent {
    /// Decode a record's `(event, data)` pair.
    pub fn decode(kind: &str, payload: &str) -> Result<Self, DecodeError> {
        let kind: EventKind = kind.parse().map_err(DecodeError::UnknownKind)?;
        Self::decode_kind(kind, payload)
    }

    /// Decode a payload whose kind is already known.
    pub fn decode_kind(kind: EventKind, payload: &str) -> Result<Self, DecodeError> {
        fn parse<T: DeserializeOwned>(kind: EventKind, payload: &str) -> Result<T, DecodeError> {
            serde_json::from_str(payload)
                .map_err(|source| DecodeError::InvalidPayload { kind, source })
        }

        Ok(match kind {
            EventKind::RoundStart => SimulationEvent::RoundStart(parse(kind, payload)?),
            EventKind::RoundEnd => SimulationEvent::RoundEnd(parse(kind, payload)?),
            EventKind::AgentAction => SimulationEvent::AgentAction(parse(kind, payload)?),
            EventKind::Settlement => SimulationEvent::Settlement(parse(kind, payload)?),
            EventKind::ConflictEvent => SimulationEvent::ConflictEvent(parse(kind, payload)?),
            EventKind::Mediation => SimulationEvent::Mediation(parse(kind, payload)?),
            EventKind::SimulationEnd => SimulationEvent::SimulationEnd(parse(kind, payload)?),
        })
    }

    pub fn kind(&self) -> EventKind {
        match self {
            SimulationEvent::RoundStart(_) => EventKind::RoundStart,
            SimulationEvent::RoundEnd(_) => EventKind::RoundEnd,
            SimulationEvent::AgentAction(_) => EventKind::AgentAction,
            SimulationEvent::Settlement(_) => EventKind::Settlement,
            SimulationEvent::ConflictEvent(_) => EventKind::ConflictEvent,
            SimulationEvent::Mediation(_) => EventKind::Mediation,
            SimulationEvent::SimulationEnd(_) => EventKind::SimulationEnd,
        }
    }

    /// Round number the event reports about itself, if it carries one.
    pub fn round(&self) -> Option<u32> {
        match self {
            SimulationEvent::RoundStart(rs) => Some(rs.round_number),
            SimulationEvent::RoundEnd(re) => Some(re.round_number),
            SimulationEvent::AgentAction(a) => Some(a.round_number),
            SimulationEvent::Settlement(s) => Some(s.round),
            SimulationEvent::ConflictEvent(c) => Some(c.round_number),
            SimulationEvent::Mediation(_) | SimulationEvent::SimulationEnd(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.kind().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_round_start() {
        let event = SimulationEvent::decode(
            "round_start",
            r#"{"round_number":1,"phase":1,"phase_name":"Inledande krav","active_agents":["lo","skr"]}"#,
        )
        .unwrap();
        match event {
            SimulationEvent::RoundStart(rs) => {
                assert_eq!(rs.round_number, 1);
                assert_eq!(rs.phase_name, "Inledande krav");
                assert_eq!(rs.active_agents.len(), 2);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_decode_agent_action() {
        let event = SimulationEvent::decode(
            "agent_action",
            r#"{"agent_id":"if_metall","round_number":2,"phase":2,"position":3.8,
                "reasoning":"r","public_statement":"Vi kräver reallöneökningar","willingness_to_settle":55}"#,
        )
        .unwrap();
        assert_eq!(event.kind(), EventKind::AgentAction);
        assert_eq!(event.round(), Some(2));
        assert!(!event.is_terminal());
    }

    #[test]
    fn test_decode_simulation_end_without_marke() {
        let event = SimulationEvent::decode(
            "simulation_end",
            r#"{"summary":"Klart","outcomes":[],"marke":null}"#,
        )
        .unwrap();
        assert!(event.is_terminal());
        assert_eq!(event.round(), None);
        match event {
            SimulationEvent::SimulationEnd(end) => assert_eq!(end.marke, None),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_decode_unknown_kind() {
        let err = SimulationEvent::decode("heartbeat", "{}").unwrap_err();
        assert!(err.is_unknown_kind());
        assert_eq!(err.to_string(), "Unknown event kind: heartbeat");
    }

    #[test]
    fn test_decode_invalid_payload_names_kind() {
        let err = SimulationEvent::decode("settlement", r#"{"union_ids":"if_metall"}"#).unwrap_err();
        assert!(!err.is_unknown_kind());
        assert!(err.to_string().starts_with("Invalid settlement payload"));
    }

    #[test]
    fn test_willingness_out_of_byte_range_is_rejected() {
        let err = SimulationEvent::decode(
            "agent_action",
            r#"{"agent_id":"a","round_number":1,"phase":1,"position":1.0,
                "reasoning":"","public_statement":"","willingness_to_settle":300}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_settlement_parties() {
        let settlement = Settlement {
            union_ids: vec!["if_metall".into(), "unionen".into()],
            employer_id: "teknikforetagen".into(),
            level: 3.2,
            round: 5,
        };
        let parties: Vec<_> = settlement.parties().map(|id| id.as_str()).collect();
        assert_eq!(parties, vec!["if_metall", "unionen", "teknikforetagen"]);
        assert!(settlement.binds("teknikforetagen"));
        assert!(!settlement.binds("skr"));
    }
}
