//! Fuzzy System Error Types

use thiserror::Error;

/// Errors raised while validating fuzzy variables and rules
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("variable '{variable}' has no set named '{set}'")]
    UnknownSet { variable: String, set: String },

    #[error("variable '{variable}' defines set '{set}' twice")]
    DuplicateSet { variable: String, set: String },

    #[error("set '{set}' has an invalid shape: {reason}")]
    InvalidShape { set: String, reason: &'static str },

    #[error("rule {rule} has weight {weight}, expected a value in (0, 1]")]
    InvalidWeight { rule: usize, weight: f64 },

    #[error("rule {rule} has no conditions")]
    EmptyRule { rule: usize },

    #[error("rule {rule} concludes on '{variable}', which is not the output variable")]
    OutputMismatch { rule: usize, variable: String },

    #[error("defuzzification grid needs at least 2 points over a non-empty universe")]
    InvalidGrid,
}
