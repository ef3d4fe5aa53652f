//! Scenario inputs: macro-economic parameters, presets and the simulate request.

pub mod parameters;
pub mod preset;
pub mod request;

pub use parameters::{ExportPressure, MacroParameters};
pub use preset::ScenarioPreset;
pub use request::SimulationRequest;
