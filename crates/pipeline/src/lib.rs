//! Tumor Triage Pipeline
//!
//! Runs a classifier prediction through the expert system and the fuzzy
//! engine, then fuses both into a combined recommendation. The engines are
//! built once and shared read-only between callers.

mod config;

pub use config::{TriageConfig, ENV_PREFIX};

use diagnosis_types::{MlPrediction, PatientData};
use expert_system::{DiagnosisReport, ExpertSystem};
use fuzzy_inference::{FuzzyAnalysis, FuzzyDiagnosisSystem, FuzzyError};
use risk_fusion::{CompositeAssessment, RiskFusion};
use rule_engine::Rule;
use serde::{Deserialize, Serialize};
use std::io::Read;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Pipeline error types
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid fuzzy definitions: {0}")]
    Fuzzy(#[from] FuzzyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One case to diagnose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisRequest {
    pub prediction: MlPrediction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<PatientData>,
}

impl DiagnosisRequest {
    /// Parse a request from JSON
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PipelineError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Everything the pipeline concluded about one case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResponse {
    pub ml_prediction: MlPrediction,
    pub expert_analysis: DiagnosisReport,
    pub fuzzy_analysis: FuzzyAnalysis,
    pub combined_recommendation: CompositeAssessment,
}

/// Rule catalog entry as listed by the CLI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleListing {
    pub id: String,
    pub name: String,
    pub description: String,
    pub priority: i32,
}

impl From<&Rule> for RuleListing {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id.clone(),
            name: rule.name.clone(),
            description: rule.description.clone(),
            priority: rule.priority,
        }
    }
}

/// The three reasoning stages, constructed once
#[derive(Debug, Clone)]
pub struct Engines {
    expert: ExpertSystem,
    fuzzy: FuzzyDiagnosisSystem,
    fusion: RiskFusion,
}

impl Engines {
    /// Build every stage from configuration
    pub fn new(config: &TriageConfig) -> Result<Self, PipelineError> {
        let engines = Self {
            expert: ExpertSystem::new(config.expert.clone()),
            fuzzy: FuzzyDiagnosisSystem::new(config.fuzzy.clone())?,
            fusion: RiskFusion::new(config.fusion.clone()),
        };
        info!("Diagnosis engines ready");
        Ok(engines)
    }

    /// Run one case through all stages
    pub fn diagnose(&self, request: &DiagnosisRequest) -> DiagnosisResponse {
        let prediction = &request.prediction;
        let patient = request.patient.as_ref();

        let expert_analysis = self.expert.analyze(prediction, patient);
        let fuzzy_analysis = self.fuzzy.analyze(
            prediction.confidence,
            prediction.severity_score,
            patient.and_then(|p| p.age).map(f64::from),
            patient.and_then(|p| p.pain_level).map(f64::from),
        );
        let combined_recommendation =
            self.fusion
                .combine(prediction, &expert_analysis, &fuzzy_analysis);

        info!(
            "Diagnosed {} ({:.2}): expert {}, fuzzy {:.2}, combined {}",
            prediction.predicted_class,
            prediction.confidence,
            expert_analysis.diagnosis_summary.risk_level,
            fuzzy_analysis.fuzzy_risk_score,
            combined_recommendation.final_risk_category
        );

        DiagnosisResponse {
            ml_prediction: prediction.clone(),
            expert_analysis,
            fuzzy_analysis,
            combined_recommendation,
        }
    }

    /// Expert rules in evaluation order
    pub fn rule_listing(&self) -> Vec<RuleListing> {
        self.expert
            .rule_base()
            .rules()
            .iter()
            .map(RuleListing::from)
            .collect()
    }

    pub fn expert(&self) -> &ExpertSystem {
        &self.expert
    }

    pub fn fuzzy(&self) -> &FuzzyDiagnosisSystem {
        &self.fuzzy
    }

    pub fn fusion(&self) -> &RiskFusion {
        &self.fusion
    }
}

/// Initialize logging on stderr.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}
