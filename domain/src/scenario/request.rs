//! Body of `POST /simulate`.

use super::parameters::MacroParameters;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// What to simulate: a preset, explicit parameters, or a preset with
/// overriding parameters. The engine rejects a request carrying neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub preset_id: Option<String>,
    pub parameters: Option<MacroParameters>,
}

impl SimulationRequest {
    pub fn new(preset_id: Option<String>, parameters: Option<MacroParameters>) -> Self {
        Self {
            preset_id,
            parameters,
        }
    }

    pub fn preset(id: impl Into<String>) -> Self {
        Self::new(Some(id.into()), None)
    }

    pub fn custom(parameters: MacroParameters) -> Self {
        Self::new(None, Some(parameters))
    }

    /// Reject the empty request and out-of-range parameters.
    ///
    /// Only the first parameter violation is reported; use
    /// [`MacroParameters::validate`] for the full list.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.preset_id.is_none() && self.parameters.is_none() {
            return Err(DomainError::EmptyRequest);
        }
        if let Some(params) = &self.parameters {
            params
                .validate()
                .map_err(|mut errors| errors.swap_remove(0))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_nulls_for_missing_fields() {
        let json = serde_json::to_value(SimulationRequest::preset("stabil_tillvaxt")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"preset_id": "stabil_tillvaxt", "parameters": null})
        );
    }

    #[test]
    fn test_empty_request_is_rejected() {
        assert_eq!(
            SimulationRequest::default().validate(),
            Err(DomainError::EmptyRequest)
        );
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        let request = SimulationRequest::custom(MacroParameters {
            unemployment: 40.0,
            ..Default::default()
        });
        assert!(request.validate().unwrap_err().is_parameter_error());
        assert!(SimulationRequest::custom(MacroParameters::default())
            .validate()
            .is_ok());
    }
}
