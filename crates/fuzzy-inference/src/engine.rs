//! Mamdani Inference Engine

use crate::analysis::{
    interpret, ActiveRule, FuzzyAnalysis, FuzzyInputs, Memberships, RuleEvaluation,
    UncertaintyLevel,
};
use crate::config::FuzzyConfig;
use crate::error::FuzzyError;
use crate::rules::{default_rules, FuzzyRule};
use crate::variable::{default_inputs, risk, LinguisticVariable};
use diagnosis_types::RiskLevel;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Fuzzy risk scorer over a validated rule table
#[derive(Debug, Clone)]
pub struct FuzzyDiagnosisSystem {
    inputs: Vec<LinguisticVariable>,
    output: LinguisticVariable,
    rules: Vec<FuzzyRule>,
    config: FuzzyConfig,
    /// Defuzzification sample points over the output universe
    grid: Vec<f64>,
}

impl FuzzyDiagnosisSystem {
    /// Create a system with the default variables and rules
    pub fn new(config: FuzzyConfig) -> Result<Self, FuzzyError> {
        Self::with_definitions(default_inputs(), risk(), default_rules(), config)
    }

    /// Create a system from explicit definitions, validating all of them
    pub fn with_definitions(
        inputs: Vec<LinguisticVariable>,
        output: LinguisticVariable,
        rules: Vec<FuzzyRule>,
        config: FuzzyConfig,
    ) -> Result<Self, FuzzyError> {
        let grid = build_grid(output.universe, config.grid_points)?;

        output.validate()?;
        for variable in &inputs {
            variable.validate()?;
        }
        for (index, rule) in rules.iter().enumerate() {
            validate_rule(index, rule, &inputs, &output)?;
        }

        info!(
            "Creating fuzzy diagnosis system with {} inputs, {} rules, config: {:?}",
            inputs.len(),
            rules.len(),
            config
        );

        Ok(Self {
            inputs,
            output,
            rules,
            config,
            grid,
        })
    }

    /// Membership degrees for every supplied input
    pub fn fuzzify(&self, inputs: &FuzzyInputs) -> Memberships {
        let mut memberships = Memberships::new();
        for variable in &self.inputs {
            if let Some(x) = inputs.get(&variable.name) {
                memberships.insert(variable.name.clone(), variable.fuzzify(x));
            }
        }
        memberships
    }

    /// Fire every applicable rule and aggregate per output set
    pub fn evaluate_rules(&self, memberships: &Memberships) -> RuleEvaluation {
        let mut evaluation = RuleEvaluation::default();

        for rule in &self.rules {
            if !rule.is_applicable(|v| memberships.contains_key(v)) {
                continue;
            }

            let strength = rule
                .conditions
                .iter()
                .map(|t| {
                    memberships
                        .get(&t.variable)
                        .and_then(|sets| sets.get(&t.set))
                        .copied()
                        .unwrap_or(0.0)
                })
                .fold(1.0, f64::min);
            if strength <= 0.0 {
                continue;
            }

            let strength = strength * rule.weight;
            evaluation
                .activations
                .entry(rule.output.set.clone())
                .and_modify(|a| *a = a.max(strength))
                .or_insert(strength);

            if strength > self.config.trace_threshold {
                evaluation.active_rules.push(ActiveRule {
                    conditions: rule.conditions.clone(),
                    output: rule.output.clone(),
                    firing_strength: strength,
                });
            }
        }

        debug!("Output activations: {:?}", evaluation.activations);
        evaluation
    }

    /// Centroid of the clipped, max-aggregated output sets
    pub fn defuzzify(&self, activations: &BTreeMap<String, f64>) -> f64 {
        if activations.is_empty() {
            debug!("No output activations, using fallback score");
            return self.config.fallback_score;
        }

        let clipped: Vec<_> = activations
            .iter()
            .filter_map(|(name, &level)| self.output.set(name).map(|s| (s, level)))
            .collect();

        let mut mass = 0.0;
        let mut moment = 0.0;
        for &x in &self.grid {
            let mu = clipped
                .iter()
                .map(|(set, level)| level.min(set.function.degree(x)))
                .fold(0.0, f64::max);
            mass += mu;
            moment += x * mu;
        }

        if mass == 0.0 {
            warn!(
                "Activations {:?} produced an empty output curve, using fallback score",
                activations
            );
            return self.config.fallback_score;
        }

        moment / mass
    }

    /// Analyze the default inputs
    pub fn analyze(
        &self,
        confidence: f64,
        severity_score: f64,
        age: Option<f64>,
        pain_level: Option<f64>,
    ) -> FuzzyAnalysis {
        self.analyze_inputs(&FuzzyInputs::from_prediction(
            confidence,
            severity_score,
            age,
            pain_level,
        ))
    }

    /// Full pipeline: fuzzify, evaluate, defuzzify, classify
    pub fn analyze_inputs(&self, inputs: &FuzzyInputs) -> FuzzyAnalysis {
        let memberships = self.fuzzify(inputs);
        let RuleEvaluation {
            activations,
            mut active_rules,
        } = self.evaluate_rules(&memberships);

        let score = self.defuzzify(&activations);
        let uncertainty = UncertaintyLevel::assess(&memberships, &activations);
        active_rules.truncate(self.config.max_active_rules);

        debug!(
            "Fuzzy risk score {:.2} ({} uncertainty)",
            score, uncertainty
        );

        FuzzyAnalysis {
            fuzzy_risk_score: score,
            risk_category: RiskLevel::from_score(score),
            uncertainty_level: uncertainty,
            input_memberships: memberships,
            output_activations: activations,
            active_rules,
            interpretation: interpret(score, uncertainty),
        }
    }

    pub fn rules(&self) -> &[FuzzyRule] {
        &self.rules
    }

    pub fn inputs(&self) -> &[LinguisticVariable] {
        &self.inputs
    }

    pub fn output(&self) -> &LinguisticVariable {
        &self.output
    }

    pub fn config(&self) -> &FuzzyConfig {
        &self.config
    }
}

/// `points` evenly spaced samples over the universe, both endpoints included
fn build_grid((lo, hi): (f64, f64), points: usize) -> Result<Vec<f64>, FuzzyError> {
    if points < 2 || !lo.is_finite() || !hi.is_finite() || lo >= hi {
        return Err(FuzzyError::InvalidGrid);
    }
    Ok(linspace(lo, hi, points))
}

fn linspace(lo: f64, hi: f64, points: usize) -> Vec<f64> {
    let step = (hi - lo) / (points - 1) as f64;
    let mut grid: Vec<f64> = (0..points).map(|i| lo + i as f64 * step).collect();
    // accumulated rounding must not move the last sample
    if let Some(last) = grid.last_mut() {
        *last = hi;
    }
    grid
}

fn validate_rule(
    index: usize,
    rule: &FuzzyRule,
    inputs: &[LinguisticVariable],
    output: &LinguisticVariable,
) -> Result<(), FuzzyError> {
    if rule.conditions.is_empty() {
        return Err(FuzzyError::EmptyRule { rule: index });
    }
    if rule.weight.is_nan() || rule.weight <= 0.0 || rule.weight > 1.0 {
        return Err(FuzzyError::InvalidWeight {
            rule: index,
            weight: rule.weight,
        });
    }

    for term in &rule.conditions {
        let variable = inputs
            .iter()
            .find(|v| v.name == term.variable)
            .ok_or_else(|| FuzzyError::UnknownVariable(term.variable.clone()))?;
        if variable.set(&term.set).is_none() {
            return Err(FuzzyError::UnknownSet {
                variable: term.variable.clone(),
                set: term.set.clone(),
            });
        }
    }

    if rule.output.variable != output.name {
        return Err(FuzzyError::OutputMismatch {
            rule: index,
            variable: rule.output.variable.clone(),
        });
    }
    if output.set(&rule.output.set).is_none() {
        return Err(FuzzyError::UnknownSet {
            variable: output.name.clone(),
            set: rule.output.set.clone(),
        });
    }

    Ok(())
}

impl Default for FuzzyDiagnosisSystem {
    fn default() -> Self {
        let config = FuzzyConfig::default();
        let output = risk();
        Self {
            grid: linspace(output.universe.0, output.universe.1, config.grid_points),
            inputs: default_inputs(),
            output,
            rules: default_rules(),
            config,
        }
    }
}
