//! Rules, conclusions, and fired-rule records

use crate::condition::Condition;
use crate::error::FactError;
use crate::fact::FactMap;
use diagnosis_types::{RiskLevel, UrgencyLevel};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Payload a rule contributes when it fires
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conclusion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<UrgencyLevel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_days: Option<u32>,
    /// Descriptive flags (e.g. `symptom_flag`, `risk_modifier`)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub flags: BTreeMap<String, Value>,
}

impl Conclusion {
    /// Conclusion of a classification rule
    pub fn classification(risk_level: RiskLevel, urgency: UrgencyLevel, follow_up_days: u32) -> Self {
        Self {
            risk_level: Some(risk_level),
            urgency: Some(urgency),
            follow_up_days: Some(follow_up_days),
            ..Default::default()
        }
    }

    /// Conclusion of a modifier rule (no primary risk)
    pub fn modifier() -> Self {
        Self::default()
    }

    pub fn with_recommendations<S: Into<String>>(mut self, items: impl IntoIterator<Item = S>) -> Self {
        self.recommendations.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn with_additional<S: Into<String>>(mut self, items: impl IntoIterator<Item = S>) -> Self {
        self.additional_recommendations
            .extend(items.into_iter().map(Into::into));
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn with_flag(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.flags.insert(name.to_string(), value.into());
        self
    }

    /// Whether this conclusion can serve as the primary diagnosis
    pub fn is_primary(&self) -> bool {
        self.risk_level.is_some()
    }
}

/// An immutable IF-THEN rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub condition: Condition,
    pub conclusion: Conclusion,
    /// Higher runs first
    pub priority: i32,
}

impl Rule {
    /// Create a new rule
    pub fn new(
        id: &str,
        name: &str,
        description: &str,
        condition: Condition,
        conclusion: Conclusion,
        priority: i32,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            condition,
            conclusion,
            priority,
        }
    }

    /// Check whether the rule fires for the given facts
    pub fn matches(&self, facts: &FactMap) -> Result<bool, FactError> {
        self.condition.evaluate(facts)
    }

    /// Conclusion if the rule fires; a mistyped fact counts as not firing
    pub fn evaluate(&self, facts: &FactMap) -> Option<&Conclusion> {
        match self.matches(facts) {
            Ok(true) => Some(&self.conclusion),
            _ => None,
        }
    }

    /// Record this rule as fired
    pub fn fire(&self) -> FiredRule {
        FiredRule {
            rule_id: self.id.clone(),
            rule_name: self.name.clone(),
            description: self.description.clone(),
            conclusion: self.conclusion.clone(),
        }
    }
}

/// A rule that fired during one inference pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiredRule {
    pub rule_id: String,
    pub rule_name: String,
    pub description: String,
    pub conclusion: Conclusion,
}
