//! Fact Access Error Types

use thiserror::Error;

/// Errors raised while a condition reads the fact mapping
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FactError {
    /// Fact is present but holds the wrong kind of value
    #[error("fact '{field}' expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}
