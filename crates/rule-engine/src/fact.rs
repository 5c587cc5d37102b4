//! Working-memory fact mapping

use crate::error::FactError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single fact value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactValue {
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl FactValue {
    /// Name of the value kind, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            FactValue::Bool(_) => "boolean",
            FactValue::Integer(_) => "integer",
            FactValue::Real(_) => "real",
            FactValue::Text(_) => "text",
        }
    }
}

impl From<bool> for FactValue {
    fn from(value: bool) -> Self {
        FactValue::Bool(value)
    }
}

impl From<i64> for FactValue {
    fn from(value: i64) -> Self {
        FactValue::Integer(value)
    }
}

impl From<u32> for FactValue {
    fn from(value: u32) -> Self {
        FactValue::Integer(i64::from(value))
    }
}

impl From<u8> for FactValue {
    fn from(value: u8) -> Self {
        FactValue::Integer(i64::from(value))
    }
}

impl From<f64> for FactValue {
    fn from(value: f64) -> Self {
        FactValue::Real(value)
    }
}

impl From<&str> for FactValue {
    fn from(value: &str) -> Self {
        FactValue::Text(value.to_string())
    }
}

impl From<String> for FactValue {
    fn from(value: String) -> Self {
        FactValue::Text(value)
    }
}

/// Key-value facts built per request.
///
/// Typed accessors return `Ok(None)` for a missing key and `Err` only when the
/// key holds a value of the wrong kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactMap {
    facts: BTreeMap<String, FactValue>,
}

impl FactMap {
    /// Create an empty fact mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a fact
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FactValue>) {
        self.facts.insert(key.into(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FactValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a raw fact value
    pub fn get(&self, key: &str) -> Option<&FactValue> {
        self.facts.get(key)
    }

    /// Whether a fact is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.facts.contains_key(key)
    }

    /// Read a numeric fact (integer or real)
    pub fn number(&self, key: &str) -> Result<Option<f64>, FactError> {
        match self.facts.get(key) {
            None => Ok(None),
            Some(FactValue::Integer(v)) => Ok(Some(*v as f64)),
            Some(FactValue::Real(v)) => Ok(Some(*v)),
            Some(other) => Err(mismatch(key, "number", other)),
        }
    }

    /// Read a numeric fact, falling back to `default` when missing or mistyped
    pub fn number_or(&self, key: &str, default: f64) -> f64 {
        self.number(key).ok().flatten().unwrap_or(default)
    }

    /// Read a boolean fact
    pub fn flag(&self, key: &str) -> Result<Option<bool>, FactError> {
        match self.facts.get(key) {
            None => Ok(None),
            Some(FactValue::Bool(v)) => Ok(Some(*v)),
            Some(other) => Err(mismatch(key, "boolean", other)),
        }
    }

    /// Read a text fact
    pub fn text(&self, key: &str) -> Result<Option<&str>, FactError> {
        match self.facts.get(key) {
            None => Ok(None),
            Some(FactValue::Text(v)) => Ok(Some(v.as_str())),
            Some(other) => Err(mismatch(key, "text", other)),
        }
    }

    /// Iterate facts in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FactValue)> {
        self.facts.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of facts
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether no facts are present
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

fn mismatch(key: &str, expected: &'static str, found: &FactValue) -> FactError {
    FactError::TypeMismatch {
        field: key.to_string(),
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_facts_are_none() {
        let facts = FactMap::new();
        assert_eq!(facts.number("confidence"), Ok(None));
        assert_eq!(facts.flag("family_history"), Ok(None));
        assert_eq!(facts.text("predicted_class"), Ok(None));
    }

    #[test]
    fn test_integer_reads_as_number() {
        let facts = FactMap::new().with("age", 42u32);
        assert_eq!(facts.number("age"), Ok(Some(42.0)));
    }

    #[test]
    fn test_type_mismatch() {
        let facts = FactMap::new().with("confidence", "very sure");
        let err = facts.number("confidence").unwrap_err();
        assert_eq!(
            err,
            FactError::TypeMismatch {
                field: "confidence".to_string(),
                expected: "number",
                found: "text",
            }
        );
        assert_eq!(facts.number_or("confidence", 0.0), 0.0);
    }

    #[test]
    fn test_json_shape() {
        let facts = FactMap::new()
            .with("predicted_class", "benign")
            .with("confidence", 0.9)
            .with("family_history", true);
        let json = serde_json::to_string(&facts).unwrap();
        assert_eq!(
            json,
            r#"{"confidence":0.9,"family_history":true,"predicted_class":"benign"}"#
        );
    }
}
