//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid parameter {field}: {value} (expected {min}..={max})")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid agent tier: {0} (expected 1-4)")]
    InvalidTier(u8),

    #[error("Invalid phase: {0} (expected 1-5)")]
    InvalidPhase(u8),

    #[error("Simulation request needs a preset id or parameters")]
    EmptyRequest,
}

impl DomainError {
    /// Check if this error concerns a macro parameter value
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, DomainError::InvalidParameter { .. })
    }
}
