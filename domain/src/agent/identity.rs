//! Agent identity - the read-only roster entry for a negotiating party.
//!
//! Identities are fetched once from the catalog (`GET /agents`) and never
//! change for the lifetime of a simulation.

use crate::core::error::DomainError;
use crate::core::ids::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of negotiating party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    Union,
    Employer,
    Confederation,
    Mediator,
}

impl AgentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::Union => "union",
            AgentType::Employer => "employer",
            AgentType::Confederation => "confederation",
            AgentType::Mediator => "mediator",
        }
    }

    /// Unions and employers sit at a bargaining table; the rest advise or mediate.
    pub fn is_bargaining_party(&self) -> bool {
        matches!(self, AgentType::Union | AgentType::Employer)
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bargaining order of an agent.
///
/// Serialized as the integer 1-4. Tier 1 sets the norm (the industry
/// agreement), tiers 2 and 3 follow in the private and public sectors, and
/// tier 4 holds the confederations and the mediator who act in every phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AgentTier {
    NormSetting = 1,
    PrivateSector = 2,
    PublicSector = 3,
    Meta = 4,
}

impl AgentTier {
    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgentTier::NormSetting => "norm-setting",
            AgentTier::PrivateSector => "private sector",
            AgentTier::PublicSector => "public sector",
            AgentTier::Meta => "meta",
        }
    }
}

impl TryFrom<u8> for AgentTier {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AgentTier::NormSetting),
            2 => Ok(AgentTier::PrivateSector),
            3 => Ok(AgentTier::PublicSector),
            4 => Ok(AgentTier::Meta),
            other => Err(DomainError::InvalidTier(other)),
        }
    }
}

impl From<AgentTier> for u8 {
    fn from(tier: AgentTier) -> Self {
        tier.value()
    }
}

/// Stance of one agent towards another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Allied,
    Opposed,
    Neutral,
}

/// Static descriptor of a negotiating party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentIdentity {
    pub id: AgentId,
    pub name: String,
    pub short_name: String,
    pub agent_type: AgentType,
    pub tier: AgentTier,
    pub role_description: String,
    pub priorities: Vec<String>,
    pub constraints: Vec<String>,
    #[serde(default)]
    pub relationships: BTreeMap<AgentId, Relationship>,
}

impl AgentIdentity {
    /// Relationship towards `other`, `Neutral` when none is declared.
    pub fn relationship_to(&self, other: &str) -> Relationship {
        self.relationships
            .get(other)
            .copied()
            .unwrap_or(Relationship::Neutral)
    }

    /// Agents this party is allied with, in id order.
    pub fn allies(&self) -> impl Iterator<Item = &AgentId> {
        self.relationships
            .iter()
            .filter(|(_, r)| **r == Relationship::Allied)
            .map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn if_metall_json() -> serde_json::Value {
        serde_json::json!({
            "id": "if_metall",
            "name": "IF Metall",
            "short_name": "IF Metall",
            "agent_type": "union",
            "tier": 1,
            "role_description": "Industrial workers' union",
            "priorities": ["Real wage growth"],
            "constraints": ["Must respect the industry norm"],
            "relationships": {
                "unionen": "allied",
                "teknikforetagen": "opposed"
            }
        })
    }

    #[test]
    fn test_identity_deserializes_from_catalog_shape() {
        let identity: AgentIdentity = serde_json::from_value(if_metall_json()).unwrap();
        assert_eq!(identity.id, "if_metall");
        assert_eq!(identity.agent_type, AgentType::Union);
        assert_eq!(identity.tier, AgentTier::NormSetting);
        assert_eq!(identity.relationship_to("unionen"), Relationship::Allied);
        assert_eq!(identity.relationship_to("teknikforetagen"), Relationship::Opposed);
        assert_eq!(identity.relationship_to("skr"), Relationship::Neutral);
        assert_eq!(identity.allies().collect::<Vec<_>>(), vec!["unionen"]);
    }

    #[test]
    fn test_relationships_default_to_empty() {
        let mut json = if_metall_json();
        json.as_object_mut().unwrap().remove("relationships");
        let identity: AgentIdentity = serde_json::from_value(json).unwrap();
        assert!(identity.relationships.is_empty());
    }

    #[test]
    fn test_tier_rejects_out_of_range() {
        let mut json = if_metall_json();
        json["tier"] = serde_json::json!(5);
        let err = serde_json::from_value::<AgentIdentity>(json).unwrap_err();
        assert!(err.to_string().contains("Invalid agent tier: 5"));
    }

    #[test]
    fn test_tier_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&AgentTier::Meta).unwrap(), "4");
    }

    #[test]
    fn test_bargaining_party() {
        assert!(AgentType::Union.is_bargaining_party());
        assert!(AgentType::Employer.is_bargaining_party());
        assert!(!AgentType::Mediator.is_bargaining_party());
        assert!(!AgentType::Confederation.is_bargaining_party());
    }
}
