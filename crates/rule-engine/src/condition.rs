//! Declarative rule conditions
//!
//! Conditions are small expression trees interpreted against a [`FactMap`].
//! A missing fact takes a neutral default (0 for numbers unless the leaf names
//! its own, false for flags, no match for text); only a mistyped fact errors.

use crate::error::FactError;
use crate::fact::FactMap;
use serde::{Deserialize, Serialize};

/// Numeric comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    Gt,
    Ge,
    Lt,
    Le,
}

impl Comparator {
    /// Apply `lhs <op> rhs`
    pub fn apply(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparator::Gt => lhs > rhs,
            Comparator::Ge => lhs >= rhs,
            Comparator::Lt => lhs < rhs,
            Comparator::Le => lhs <= rhs,
        }
    }
}

/// Boolean expression over facts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Every child holds (empty = true)
    All(Vec<Condition>),
    /// At least one child holds (empty = false)
    Any(Vec<Condition>),
    /// Numeric comparison against a threshold
    Number {
        field: String,
        comparator: Comparator,
        threshold: f64,
        /// Value assumed when the fact is absent
        #[serde(default)]
        missing: f64,
    },
    /// Text fact equals a literal
    TextEquals { field: String, value: String },
    /// Boolean fact is true
    Flag { field: String },
}

impl Condition {
    pub fn all(children: impl IntoIterator<Item = Condition>) -> Self {
        Condition::All(children.into_iter().collect())
    }

    pub fn any(children: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Any(children.into_iter().collect())
    }

    pub fn compare(field: &str, comparator: Comparator, threshold: f64) -> Self {
        Condition::Number {
            field: field.to_string(),
            comparator,
            threshold,
            missing: 0.0,
        }
    }

    pub fn gt(field: &str, threshold: f64) -> Self {
        Self::compare(field, Comparator::Gt, threshold)
    }

    pub fn ge(field: &str, threshold: f64) -> Self {
        Self::compare(field, Comparator::Ge, threshold)
    }

    pub fn lt(field: &str, threshold: f64) -> Self {
        Self::compare(field, Comparator::Lt, threshold)
    }

    pub fn le(field: &str, threshold: f64) -> Self {
        Self::compare(field, Comparator::Le, threshold)
    }

    /// `low <= field <= high`
    pub fn between(field: &str, low: f64, high: f64) -> Self {
        Self::all([Self::ge(field, low), Self::le(field, high)])
    }

    /// `low <= field < high`
    pub fn in_range(field: &str, low: f64, high: f64) -> Self {
        Self::all([Self::ge(field, low), Self::lt(field, high)])
    }

    pub fn text_eq(field: &str, value: &str) -> Self {
        Condition::TextEquals {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn flag(field: &str) -> Self {
        Condition::Flag {
            field: field.to_string(),
        }
    }

    /// Override the value a numeric leaf assumes for a missing fact.
    /// Has no effect on other condition kinds.
    pub fn with_missing(self, default: f64) -> Self {
        match self {
            Condition::Number {
                field,
                comparator,
                threshold,
                ..
            } => Condition::Number {
                field,
                comparator,
                threshold,
                missing: default,
            },
            other => other,
        }
    }

    /// Evaluate against facts, short-circuiting like `&&` / `||`
    pub fn evaluate(&self, facts: &FactMap) -> Result<bool, FactError> {
        match self {
            Condition::All(children) => {
                for child in children {
                    if !child.evaluate(facts)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Condition::Any(children) => {
                for child in children {
                    if child.evaluate(facts)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Condition::Number {
                field,
                comparator,
                threshold,
                missing,
            } => {
                let value = facts.number(field)?.unwrap_or(*missing);
                Ok(comparator.apply(value, *threshold))
            }
            Condition::TextEquals { field, value } => {
                Ok(facts.text(field)?.is_some_and(|v| v == value.as_str()))
            }
            Condition::Flag { field } => Ok(facts.flag(field)?.unwrap_or(false)),
        }
    }
}
