//! Risk Fusion
//!
//! Combines the three views of one case into a single recommendation:
//! - Classifier severity score
//! - Expert-system risk level
//! - Fuzzy risk score
//!
//! The composite is a weighted sum bucketed into a final risk category and
//! action, with a plain-language summary.

mod summary;

pub use summary::generate_summary;

use diagnosis_types::{MlPrediction, RiskLevel, UrgencyLevel};
use expert_system::DiagnosisReport;
use fuzzy_inference::FuzzyAnalysis;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Fusion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Weight of the classifier severity score (default: 0.4)
    pub severity_weight: f64,
    /// Weight of the expert risk level's score (default: 0.35)
    pub expert_weight: f64,
    /// Weight of the fuzzy risk score (default: 0.25)
    pub fuzzy_weight: f64,
    /// Composite score at or above which the case needs immediate attention
    pub immediate_attention_threshold: f64,
    /// Expert recommendations carried into the combined output
    pub max_recommendations: usize,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            severity_weight: 0.4,
            expert_weight: 0.35,
            fuzzy_weight: 0.25,
            immediate_attention_threshold: 70.0,
            max_recommendations: 5,
        }
    }
}

/// How far the classifier confidence can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    Low,
    Moderate,
    High,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.8 {
            ConfidenceBand::High
        } else if confidence > 0.6 {
            ConfidenceBand::Moderate
        } else {
            ConfidenceBand::Low
        }
    }
}

/// Combined recommendation for one case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeAssessment {
    /// Weighted score, rounded to 2 decimals
    pub composite_risk_score: f64,
    pub final_risk_category: RiskLevel,
    pub recommended_action: UrgencyLevel,
    pub confidence_level: ConfidenceBand,
    pub top_recommendations: Vec<String>,
    pub summary: String,
    pub needs_immediate_attention: bool,
}

/// Final category and action for a composite score
pub fn categorize(score: f64) -> (RiskLevel, UrgencyLevel) {
    if score >= 75.0 {
        (RiskLevel::VeryHigh, UrgencyLevel::Immediate)
    } else if score >= 55.0 {
        (RiskLevel::High, UrgencyLevel::Urgent)
    } else if score >= 35.0 {
        (RiskLevel::Moderate, UrgencyLevel::Soon)
    } else if score >= 15.0 {
        (RiskLevel::Low, UrgencyLevel::Routine)
    } else {
        (RiskLevel::VeryLow, UrgencyLevel::Routine)
    }
}

/// Weighted blend of classifier, expert, and fuzzy results
#[derive(Debug, Clone, Default)]
pub struct RiskFusion {
    config: FusionConfig,
}

impl RiskFusion {
    /// Create a new fusion stage
    pub fn new(config: FusionConfig) -> Self {
        info!("Creating risk fusion with config: {:?}", config);
        Self { config }
    }

    /// Unrounded composite score
    pub fn composite_score(&self, severity: f64, expert_risk: RiskLevel, fuzzy_score: f64) -> f64 {
        self.config.severity_weight * severity
            + self.config.expert_weight * expert_risk.score()
            + self.config.fuzzy_weight * fuzzy_score
    }

    /// Combine the three analyses of one case
    pub fn combine(
        &self,
        prediction: &MlPrediction,
        expert: &DiagnosisReport,
        fuzzy: &FuzzyAnalysis,
    ) -> CompositeAssessment {
        let score = self.composite_score(
            prediction.severity_score,
            expert.diagnosis_summary.risk_level,
            fuzzy.fuzzy_risk_score,
        );
        let (category, action) = categorize(score);

        debug!(
            "Composite risk {:.2}: {} / {}",
            score, category, action
        );

        CompositeAssessment {
            composite_risk_score: (score * 100.0).round() / 100.0,
            final_risk_category: category,
            recommended_action: action,
            confidence_level: ConfidenceBand::from_confidence(prediction.confidence),
            top_recommendations: expert
                .recommendations
                .iter()
                .take(self.config.max_recommendations)
                .cloned()
                .collect(),
            summary: generate_summary(
                prediction.predicted_class,
                prediction.confidence,
                category,
                fuzzy.uncertainty_level,
            ),
            needs_immediate_attention: score >= self.config.immediate_attention_threshold,
        }
    }

    pub fn config(&self) -> &FusionConfig {
        &self.config
    }
}
