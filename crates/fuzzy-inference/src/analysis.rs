//! Inference inputs, intermediate results, and the analysis record

use crate::rules::Term;
use diagnosis_types::RiskLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Membership degrees per variable, then per set
pub type Memberships = BTreeMap<String, BTreeMap<String, f64>>;

/// Crisp input values keyed by variable name.
///
/// Variables with no value are left out of fuzzification entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FuzzyInputs {
    values: BTreeMap<String, f64>,
}

impl FuzzyInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inputs for the default variables
    pub fn from_prediction(
        confidence: f64,
        severity_score: f64,
        age: Option<f64>,
        pain_level: Option<f64>,
    ) -> Self {
        Self::new()
            .with("confidence", confidence)
            .with("severity", severity_score)
            .with_opt("age", age)
            .with_opt("pain", pain_level)
    }

    pub fn with(mut self, variable: &str, value: f64) -> Self {
        self.values.insert(variable.to_string(), value);
        self
    }

    pub fn with_opt(self, variable: &str, value: Option<f64>) -> Self {
        match value {
            Some(v) => self.with(variable, v),
            None => self,
        }
    }

    pub fn get(&self, variable: &str) -> Option<f64> {
        self.values.get(variable).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A rule that fired strongly enough to be traced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveRule {
    pub conditions: Vec<Term>,
    pub output: Term,
    pub firing_strength: f64,
}

/// Result of evaluating the rule table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleEvaluation {
    /// Max firing strength per output set
    pub activations: BTreeMap<String, f64>,
    /// Rules above the trace threshold, in rule order
    pub active_rules: Vec<ActiveRule>,
}

/// Qualitative spread of the evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UncertaintyLevel {
    Low,
    Moderate,
    High,
}

impl UncertaintyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UncertaintyLevel::Low => "low",
            UncertaintyLevel::Moderate => "moderate",
            UncertaintyLevel::High => "high",
        }
    }

    /// Classify from input memberships and output activations.
    ///
    /// Checked in order, first match wins: three or more confidence sets above
    /// 0.3, then two, then a dominant `very_low` confidence, then three or more
    /// activated output sets.
    pub fn assess(memberships: &Memberships, activations: &BTreeMap<String, f64>) -> Self {
        if let Some(confidence) = memberships.get("confidence") {
            let significant = confidence.values().filter(|&&mu| mu > 0.3).count();
            if significant >= 3 {
                return UncertaintyLevel::High;
            }
            if significant >= 2 {
                return UncertaintyLevel::Moderate;
            }
            if confidence.get("very_low").copied().unwrap_or(0.0) > 0.5 {
                return UncertaintyLevel::High;
            }
        }

        if activations.len() >= 3 {
            return UncertaintyLevel::Moderate;
        }

        UncertaintyLevel::Low
    }
}

impl fmt::Display for UncertaintyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable reading of a risk score
pub fn interpret(score: f64, uncertainty: UncertaintyLevel) -> String {
    let base = if score >= 80.0 {
        "Very high risk detected. Immediate medical attention strongly recommended."
    } else if score >= 60.0 {
        "High risk level. Prompt medical evaluation is advised."
    } else if score >= 40.0 {
        "Moderate risk. Follow-up evaluation recommended."
    } else if score >= 20.0 {
        "Low risk. Continue routine monitoring."
    } else {
        "Very low risk. Standard screening schedule is appropriate."
    };

    let note = match uncertainty {
        UncertaintyLevel::High => " Note: High uncertainty in assessment. Additional testing recommended.",
        UncertaintyLevel::Moderate => {
            " Note: Some uncertainty in assessment. Consider confirmatory tests."
        }
        UncertaintyLevel::Low => "",
    };

    format!("{}{}", base, note)
}

/// Full output of one fuzzy analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyAnalysis {
    pub fuzzy_risk_score: f64,
    pub risk_category: RiskLevel,
    pub uncertainty_level: UncertaintyLevel,
    pub input_memberships: Memberships,
    pub output_activations: BTreeMap<String, f64>,
    pub active_rules: Vec<ActiveRule>,
    pub interpretation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confidence_memberships(degrees: &[(&str, f64)]) -> Memberships {
        let sets = degrees.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        BTreeMap::from([("confidence".to_string(), sets)])
    }

    #[test]
    fn test_uncertainty_order() {
        let none = BTreeMap::new();
        let spread = confidence_memberships(&[("low", 0.4), ("medium", 0.5), ("high", 0.35)]);
        assert_eq!(UncertaintyLevel::assess(&spread, &none), UncertaintyLevel::High);

        let two = confidence_memberships(&[("low", 0.4), ("medium", 0.5)]);
        assert_eq!(UncertaintyLevel::assess(&two, &none), UncertaintyLevel::Moderate);

        let doubtful = confidence_memberships(&[("very_low", 0.6)]);
        assert_eq!(UncertaintyLevel::assess(&doubtful, &none), UncertaintyLevel::High);
    }

    #[test]
    fn test_uncertainty_from_activations() {
        let calm = confidence_memberships(&[("high", 1.0)]);
        let activations: BTreeMap<String, f64> = ["low", "moderate", "high"]
            .iter()
            .map(|s| (s.to_string(), 0.5))
            .collect();
        assert_eq!(UncertaintyLevel::assess(&calm, &activations), UncertaintyLevel::Moderate);
        assert_eq!(UncertaintyLevel::assess(&calm, &BTreeMap::new()), UncertaintyLevel::Low);
        assert_eq!(UncertaintyLevel::assess(&Memberships::new(), &BTreeMap::new()), UncertaintyLevel::Low);
    }

    #[test]
    fn test_interpretation_notes() {
        assert_eq!(
            interpret(89.1, UncertaintyLevel::Low),
            "Very high risk detected. Immediate medical attention strongly recommended."
        );
        assert_eq!(
            interpret(50.0, UncertaintyLevel::High),
            "Moderate risk. Follow-up evaluation recommended. Note: High uncertainty in assessment. Additional testing recommended."
        );
        assert!(interpret(10.0, UncertaintyLevel::Moderate).ends_with("Consider confirmatory tests."));
    }

    #[test]
    fn test_inputs_skip_missing() {
        let inputs = FuzzyInputs::from_prediction(0.9, 80.0, None, Some(3.0));
        let names: Vec<&str> = inputs.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["confidence", "pain", "severity"]);
        assert_eq!(inputs.get("age"), None);
    }
}
