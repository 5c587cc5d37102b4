//! Linguistic variables and their fuzzy sets

use crate::error::FuzzyError;
use crate::membership::MembershipFunction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Named fuzzy set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzySet {
    pub name: String,
    pub function: MembershipFunction,
}

/// A named variable partitioned into fuzzy sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinguisticVariable {
    pub name: String,
    /// Universe of discourse `(min, max)`
    pub universe: (f64, f64),
    pub sets: Vec<FuzzySet>,
}

impl LinguisticVariable {
    /// Create a variable with no sets
    pub fn new(name: &str, min: f64, max: f64) -> Self {
        Self {
            name: name.to_string(),
            universe: (min, max),
            sets: Vec::new(),
        }
    }

    /// Builder-style set definition
    pub fn with_set(mut self, name: &str, function: MembershipFunction) -> Self {
        self.sets.push(FuzzySet {
            name: name.to_string(),
            function,
        });
        self
    }

    /// Look up a set by name
    pub fn set(&self, name: &str) -> Option<&FuzzySet> {
        self.sets.iter().find(|s| s.name == name)
    }

    /// Degree of `x` in every set
    pub fn fuzzify(&self, x: f64) -> BTreeMap<String, f64> {
        self.sets
            .iter()
            .map(|s| (s.name.clone(), s.function.degree(x)))
            .collect()
    }

    /// Reject duplicate set names and malformed shapes
    pub fn validate(&self) -> Result<(), FuzzyError> {
        let mut seen = HashSet::new();
        for set in &self.sets {
            if !seen.insert(set.name.as_str()) {
                return Err(FuzzyError::DuplicateSet {
                    variable: self.name.clone(),
                    set: set.name.clone(),
                });
            }
            set.function
                .validate()
                .map_err(|reason| FuzzyError::InvalidShape {
                    set: format!("{}.{}", self.name, set.name),
                    reason,
                })?;
        }
        Ok(())
    }
}

/// Classifier confidence, 0 to 1
pub fn confidence() -> LinguisticVariable {
    use MembershipFunction as Mf;
    LinguisticVariable::new("confidence", 0.0, 1.0)
        .with_set("very_low", Mf::trapezoidal(0.0, 0.0, 0.3, 0.45))
        .with_set("low", Mf::triangular(0.35, 0.5, 0.65))
        .with_set("medium", Mf::triangular(0.55, 0.7, 0.85))
        .with_set("high", Mf::trapezoidal(0.75, 0.9, 1.0, 1.0))
}

/// Classifier severity score, 0 to 100
pub fn severity() -> LinguisticVariable {
    use MembershipFunction as Mf;
    LinguisticVariable::new("severity", 0.0, 100.0)
        .with_set("minimal", Mf::trapezoidal(0.0, 0.0, 15.0, 30.0))
        .with_set("low", Mf::triangular(20.0, 35.0, 50.0))
        .with_set("moderate", Mf::triangular(40.0, 55.0, 70.0))
        .with_set("high", Mf::triangular(60.0, 75.0, 90.0))
        .with_set("critical", Mf::trapezoidal(80.0, 90.0, 100.0, 100.0))
}

/// Patient age in years
pub fn age() -> LinguisticVariable {
    use MembershipFunction as Mf;
    LinguisticVariable::new("age", 0.0, 100.0)
        .with_set("young", Mf::trapezoidal(18.0, 18.0, 35.0, 45.0))
        .with_set("middle", Mf::triangular(40.0, 50.0, 65.0))
        .with_set("senior", Mf::trapezoidal(55.0, 70.0, 100.0, 100.0))
}

/// Self-reported pain, 0 to 10
pub fn pain() -> LinguisticVariable {
    use MembershipFunction as Mf;
    LinguisticVariable::new("pain", 0.0, 10.0)
        .with_set("none", Mf::trapezoidal(0.0, 0.0, 1.0, 2.0))
        .with_set("mild", Mf::triangular(1.0, 3.0, 5.0))
        .with_set("moderate", Mf::triangular(4.0, 6.0, 8.0))
        .with_set("severe", Mf::trapezoidal(7.0, 8.0, 10.0, 10.0))
}

/// Output risk, 0 to 100
pub fn risk() -> LinguisticVariable {
    use MembershipFunction as Mf;
    LinguisticVariable::new("risk", 0.0, 100.0)
        .with_set("very_low", Mf::trapezoidal(0.0, 0.0, 10.0, 25.0))
        .with_set("low", Mf::triangular(15.0, 30.0, 45.0))
        .with_set("moderate", Mf::triangular(35.0, 50.0, 65.0))
        .with_set("high", Mf::triangular(55.0, 70.0, 85.0))
        .with_set("very_high", Mf::trapezoidal(75.0, 90.0, 100.0, 100.0))
}

/// The four default input variables
pub fn default_inputs() -> Vec<LinguisticVariable> {
    vec![confidence(), severity(), age(), pain()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let mut variables = default_inputs();
        variables.push(risk());
        for var in &variables {
            assert!(var.validate().is_ok(), "{}", var.name);
        }
        assert_eq!(confidence().sets.len(), 4);
        assert_eq!(severity().sets.len(), 5);
        assert_eq!(age().sets.len(), 3);
        assert_eq!(pain().sets.len(), 4);
    }

    #[test]
    fn test_fuzzify_confidence() {
        let degrees = confidence().fuzzify(0.92);
        assert_eq!(degrees["high"], 1.0);
        assert_eq!(degrees["medium"], 0.0);
        assert_eq!(degrees.len(), 4);
    }

    #[test]
    fn test_duplicate_set_rejected() {
        let var = LinguisticVariable::new("x", 0.0, 1.0)
            .with_set("a", MembershipFunction::triangular(0.0, 0.5, 1.0))
            .with_set("a", MembershipFunction::triangular(0.1, 0.5, 1.0));
        assert_eq!(
            var.validate(),
            Err(FuzzyError::DuplicateSet {
                variable: "x".to_string(),
                set: "a".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_shape_names_set() {
        let var = LinguisticVariable::new("x", 0.0, 1.0)
            .with_set("bad", MembershipFunction::gaussian(0.5, -1.0));
        match var.validate() {
            Err(FuzzyError::InvalidShape { set, .. }) => assert_eq!(set, "x.bad"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
