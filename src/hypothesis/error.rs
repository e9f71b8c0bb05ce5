// Typed failures of the hypothesis engine
//
// Every failure point surfaces its own variant so the caller can show a
// specific message. The engine never substitutes a default value.

use thiserror::Error;

/// Errors for hypothesis testing operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HypothesisError {
    #[error("Insufficient data in {sample}: need at least {required} observations, got {actual}")]
    InsufficientData {
        sample: String,
        required: usize,
        actual: usize,
    },

    #[error("Degenerate sample {sample}: all observations are identical (zero variance)")]
    DegenerateSample { sample: String },

    #[error("Invalid input in {sample}: {reason}")]
    InvalidInput { sample: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Distribution error: {0}")]
    Distribution(String),
}

impl HypothesisError {
    /// Stable machine-readable name of the failure
    pub fn kind(&self) -> &'static str {
        match self {
            HypothesisError::InsufficientData { .. } => "insufficient-data",
            HypothesisError::DegenerateSample { .. } => "degenerate-sample",
            HypothesisError::InvalidInput { .. } => "invalid-input",
            HypothesisError::InvalidConfig(_) => "invalid-config",
            HypothesisError::Distribution(_) => "distribution",
        }
    }
}

pub type Result<T> = std::result::Result<T, HypothesisError>;
