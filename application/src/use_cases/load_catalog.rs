//! Load Catalog use case.
//!
//! Fetches the scenario presets and the agent roster that a run is started
//! from and rendered against. Both lookups are independent and run
//! concurrently.

use crate::ports::catalog::{CatalogError, CatalogGateway};
use bargaining_domain::{AgentIdentity, ScenarioPreset};
use std::sync::Arc;
use tracing::{debug, info};

/// Presets and roster fetched together.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub presets: Vec<ScenarioPreset>,
    pub agents: Vec<AgentIdentity>,
}

impl Catalog {
    pub fn preset(&self, id: &str) -> Option<&ScenarioPreset> {
        ScenarioPreset::find(&self.presets, id)
    }

    pub fn agent(&self, id: &str) -> Option<&AgentIdentity> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Display name for an agent id, falling back to the id itself.
    pub fn agent_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.agent(id).map(|a| a.name.as_str()).unwrap_or(id)
    }
}

/// Use case for loading the catalog.
pub struct LoadCatalogUseCase {
    gateway: Arc<dyn CatalogGateway>,
}

impl LoadCatalogUseCase {
    pub fn new(gateway: Arc<dyn CatalogGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch presets and agents concurrently.
    pub async fn execute(&self) -> Result<Catalog, CatalogError> {
        let (presets, agents) =
            futures::try_join!(self.gateway.presets(), self.gateway.agents())?;
        info!(
            "Loaded catalog: {} presets, {} agents",
            presets.len(),
            agents.len()
        );
        Ok(Catalog { presets, agents })
    }

    pub async fn presets(&self) -> Result<Vec<ScenarioPreset>, CatalogError> {
        let presets = self.gateway.presets().await?;
        debug!("Loaded {} presets", presets.len());
        Ok(presets)
    }

    pub async fn agents(&self) -> Result<Vec<AgentIdentity>, CatalogError> {
        let agents = self.gateway.agents().await?;
        debug!("Loaded {} agents", agents.len());
        Ok(agents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bargaining_domain::{AgentTier, AgentType, MacroParameters};
    use std::collections::BTreeMap;

    struct FixedCatalog {
        fail_agents: bool,
    }

    #[async_trait]
    impl CatalogGateway for FixedCatalog {
        async fn presets(&self) -> Result<Vec<ScenarioPreset>, CatalogError> {
            Ok(vec![ScenarioPreset {
                id: "baseline".to_string(),
                name: "Normalläge".to_string(),
                description: "Stabil ekonomi".to_string(),
                flavor_text: String::new(),
                parameters: MacroParameters::default(),
            }])
        }

        async fn agents(&self) -> Result<Vec<AgentIdentity>, CatalogError> {
            if self.fail_agents {
                return Err(CatalogError::RequestFailed {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(vec![AgentIdentity {
                id: "if_metall".into(),
                name: "IF Metall".to_string(),
                short_name: "IFM".to_string(),
                agent_type: AgentType::Union,
                tier: AgentTier::try_from(1).unwrap(),
                role_description: "Industrifacket".to_string(),
                priorities: vec!["Reallöner".to_string()],
                constraints: vec![],
                relationships: BTreeMap::new(),
            }])
        }
    }

    #[tokio::test]
    async fn test_execute_loads_both_lists() {
        let use_case = LoadCatalogUseCase::new(Arc::new(FixedCatalog { fail_agents: false }));

        let catalog = use_case.execute().await.unwrap();

        assert_eq!(catalog.presets.len(), 1);
        assert_eq!(catalog.preset("baseline").unwrap().name, "Normalläge");
        assert!(catalog.preset("okänd").is_none());
        assert_eq!(catalog.agent_name("if_metall"), "IF Metall");
        assert_eq!(catalog.agent_name("unknown_agent"), "unknown_agent");
    }

    #[tokio::test]
    async fn test_execute_fails_when_either_lookup_fails() {
        let use_case = LoadCatalogUseCase::new(Arc::new(FixedCatalog { fail_agents: true }));

        let err = use_case.execute().await.unwrap_err();

        assert!(matches!(err, CatalogError::RequestFailed { status: 500, .. }));
        assert_eq!(use_case.presets().await.unwrap().len(), 1);
    }
}
