//! Macro-economic scenario parameters.
//!
//! The ranges mirror what the simulation engine accepts; values outside them
//! are rejected by the server, so [`MacroParameters::validate`] lets a client
//! catch them before opening a stream.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pressure on the export sector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportPressure {
    Low,
    #[default]
    Medium,
    High,
}

impl ExportPressure {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportPressure::Low => "low",
            ExportPressure::Medium => "medium",
            ExportPressure::High => "high",
        }
    }
}

impl fmt::Display for ExportPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportPressure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(ExportPressure::Low),
            "medium" => Ok(ExportPressure::Medium),
            "high" => Ok(ExportPressure::High),
            other => Err(format!(
                "unknown export pressure '{}' (expected low, medium or high)",
                other
            )),
        }
    }
}

/// Economic scenario inputs. Immutable once a simulation starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroParameters {
    /// CPI inflation, percent
    pub inflation: f64,
    /// Unemployment, percent
    pub unemployment: f64,
    /// GDP growth, percent
    pub gdp_growth: f64,
    /// Central bank policy rate, percent
    pub policy_rate: f64,
    /// 1 = left-leaning, 5 = right-leaning
    pub political_climate: u8,
    pub export_pressure: ExportPressure,
    /// Previous benchmark settlement, percent
    pub previous_agreement: f64,
}

impl Default for MacroParameters {
    fn default() -> Self {
        Self {
            inflation: 2.0,
            unemployment: 7.0,
            gdp_growth: 2.0,
            policy_rate: 2.5,
            political_climate: 3,
            export_pressure: ExportPressure::Medium,
            previous_agreement: 2.5,
        }
    }
}

impl MacroParameters {
    /// Check every field against the engine's accepted range.
    ///
    /// Returns all violations rather than stopping at the first one.
    pub fn validate(&self) -> Result<(), Vec<DomainError>> {
        let checks: [(&'static str, f64, f64, f64); 6] = [
            ("inflation", self.inflation, 0.0, 15.0),
            ("unemployment", self.unemployment, 2.0, 15.0),
            ("gdp_growth", self.gdp_growth, -5.0, 8.0),
            ("policy_rate", self.policy_rate, -0.5, 10.0),
            (
                "political_climate",
                f64::from(self.political_climate),
                1.0,
                5.0,
            ),
            ("previous_agreement", self.previous_agreement, 0.0, 8.0),
        ];

        let errors: Vec<DomainError> = checks
            .into_iter()
            .filter(|(_, value, min, max)| !(value >= min && value <= max))
            .map(|(field, value, min, max)| DomainError::InvalidParameter {
                field,
                value,
                min,
                max,
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Inflation minus the previous settlement: the real-wage gap unions argue from.
    pub fn real_wage_gap(&self) -> f64 {
        self.inflation - self.previous_agreement
    }
}
