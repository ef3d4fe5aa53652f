//! Identifier value objects.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Identifier of a negotiating party (e.g. `if_metall`, `teknikforetagen`).
///
/// Serialized as a bare string, exactly as the engine and catalog send it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    /// Creates an AgentId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for AgentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for AgentId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AgentId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_agent_id_serializes_as_plain_string() {
        let id = AgentId::new("if_metall");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"if_metall\"");
        let back: AgentId = serde_json::from_str("\"unionen\"").unwrap();
        assert_eq!(back, "unionen");
    }

    #[test]
    fn test_agent_id_map_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(AgentId::new("skr"), 1);
        assert_eq!(map.get("skr"), Some(&1));
        assert_eq!(map.get("almega"), None);
    }
}
