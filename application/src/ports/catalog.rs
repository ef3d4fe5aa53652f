//! Catalog port
//!
//! Static request/response lookups that sit beside the streaming protocol:
//! the agent roster and the scenario presets.

use async_trait::async_trait;
use bargaining_domain::{AgentIdentity, ScenarioPreset};
use thiserror::Error;

/// Errors that can occur during catalog lookups
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Invalid catalog response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Available scenario presets, in catalog order.
    async fn presets(&self) -> Result<Vec<ScenarioPreset>, CatalogError>;

    /// The agent roster, in catalog order.
    async fn agents(&self) -> Result<Vec<AgentIdentity>, CatalogError>;
}
