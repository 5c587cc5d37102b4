//! Fuzzy rule table

use serde::{Deserialize, Serialize};

/// A `variable is set` clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub variable: String,
    pub set: String,
}

impl Term {
    pub fn new(variable: &str, set: &str) -> Self {
        Self {
            variable: variable.to_string(),
            set: set.to_string(),
        }
    }
}

/// IF all conditions THEN output, scaled by weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyRule {
    pub conditions: Vec<Term>,
    pub output: Term,
    /// Scale applied to the firing strength, in (0, 1]
    pub weight: f64,
}

impl FuzzyRule {
    pub fn new(conditions: &[(&str, &str)], output: (&str, &str), weight: f64) -> Self {
        Self {
            conditions: conditions
                .iter()
                .map(|(variable, set)| Term::new(variable, set))
                .collect(),
            output: Term::new(output.0, output.1),
            weight,
        }
    }

    /// Whether every referenced variable is among `available`
    pub fn is_applicable(&self, mut available: impl FnMut(&str) -> bool) -> bool {
        self.conditions.iter().all(|t| available(&t.variable))
    }
}

/// The fourteen default rules
pub fn default_rules() -> Vec<FuzzyRule> {
    const RISK: &str = "risk";
    vec![
        FuzzyRule::new(&[("confidence", "high"), ("severity", "critical")], (RISK, "very_high"), 1.0),
        FuzzyRule::new(&[("confidence", "high"), ("severity", "high")], (RISK, "very_high"), 0.95),
        FuzzyRule::new(&[("confidence", "medium"), ("severity", "high")], (RISK, "high"), 0.9),
        FuzzyRule::new(&[("confidence", "medium"), ("severity", "critical")], (RISK, "very_high"), 0.85),
        FuzzyRule::new(&[("confidence", "low"), ("severity", "high")], (RISK, "moderate"), 0.8),
        FuzzyRule::new(&[("confidence", "low"), ("severity", "critical")], (RISK, "high"), 0.85),
        FuzzyRule::new(&[("confidence", "high"), ("severity", "low")], (RISK, "low"), 0.95),
        FuzzyRule::new(&[("confidence", "high"), ("severity", "minimal")], (RISK, "very_low"), 1.0),
        FuzzyRule::new(&[("confidence", "medium"), ("severity", "moderate")], (RISK, "moderate"), 0.85),
        FuzzyRule::new(&[("confidence", "very_low")], (RISK, "moderate"), 0.7),
        FuzzyRule::new(&[("age", "young"), ("severity", "high")], (RISK, "high"), 0.8),
        FuzzyRule::new(&[("age", "senior"), ("severity", "moderate")], (RISK, "moderate"), 0.7),
        FuzzyRule::new(&[("pain", "severe"), ("severity", "high")], (RISK, "very_high"), 0.9),
        FuzzyRule::new(&[("pain", "moderate"), ("severity", "moderate")], (RISK, "moderate"), 0.75),
    ]
}
