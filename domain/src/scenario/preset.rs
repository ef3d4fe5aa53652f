//! Scenario presets served by the catalog (`GET /presets`).

use super::parameters::MacroParameters;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPreset {
    pub id: String,
    pub name: String,
    pub description: String,
    pub flavor_text: String,
    pub parameters: MacroParameters,
}

impl ScenarioPreset {
    /// Find a preset by id in a catalog listing.
    pub fn find<'a>(presets: &'a [ScenarioPreset], id: &str) -> Option<&'a ScenarioPreset> {
        presets.iter().find(|p| p.id == id)
    }
}
