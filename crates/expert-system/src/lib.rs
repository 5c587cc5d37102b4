//! Expert System
//!
//! Turns a classifier prediction and optional patient attributes into facts,
//! runs the rule base over them, and compiles the fired rules into a
//! diagnosis report with recommendations and a follow-up interval.

mod compiler;
mod config;
mod report;

pub use compiler::{compile, dedup_preserving_order};
pub use config::ExpertConfig;
pub use report::{
    ConfidenceAssessment, ConfidenceLevel, DiagnosisReport, DiagnosisSummary, FollowUp, RuleTrace,
};

use diagnosis_types::{MlPrediction, PatientData};
use rule_engine::{FactMap, RuleBase};
use tracing::{debug, info};

/// Rule-based diagnosis over classifier output
#[derive(Debug, Clone)]
pub struct ExpertSystem {
    rule_base: RuleBase,
    config: ExpertConfig,
}

impl ExpertSystem {
    /// Create an expert system with the built-in rules
    pub fn new(config: ExpertConfig) -> Self {
        Self::with_rule_base(RuleBase::with_default_rules(), config)
    }

    /// Create an expert system over a caller-supplied rule base
    pub fn with_rule_base(rule_base: RuleBase, config: ExpertConfig) -> Self {
        info!(
            "Creating expert system with {} rules, config: {:?}",
            rule_base.len(),
            config
        );
        Self { rule_base, config }
    }

    /// Build the fact mapping for one analysis
    pub fn build_facts(&self, prediction: &MlPrediction, patient: Option<&PatientData>) -> FactMap {
        let mut facts = FactMap::new()
            .with("predicted_class", prediction.predicted_class.as_str())
            .with("confidence", prediction.confidence)
            .with("severity_score", prediction.severity_score);

        if let Some(patient) = patient {
            if let Some(age) = patient.age {
                facts.insert("age", age);
            }
            if let Some(pain) = patient.pain_level {
                facts.insert("pain_level", pain);
            }
            facts.insert("family_history", patient.family_history);
            facts.insert("lump_detected", patient.lump_detected);
            facts.insert("nipple_discharge", patient.nipple_discharge);
        }

        facts
    }

    /// Run inference and compile the report
    pub fn analyze(&self, prediction: &MlPrediction, patient: Option<&PatientData>) -> DiagnosisReport {
        let facts = self.build_facts(prediction, patient);
        let fired = self.rule_base.infer(&facts);
        let report = compile(&facts, &fired, &self.config);

        debug!(
            "Expert analysis: {} risk, {} urgency, follow-up {} days",
            report.diagnosis_summary.risk_level,
            report.diagnosis_summary.urgency,
            report.follow_up.recommended_days
        );
        report
    }

    /// Rules in evaluation order
    pub fn rule_base(&self) -> &RuleBase {
        &self.rule_base
    }

    /// Active configuration
    pub fn config(&self) -> &ExpertConfig {
        &self.config
    }
}

impl Default for ExpertSystem {
    fn default() -> Self {
        Self::new(ExpertConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagnosis_types::{PredictedClass, RiskLevel, UrgencyLevel};
    use proptest::prelude::*;

    fn malignant(confidence: f64, severity: f64) -> MlPrediction {
        MlPrediction::new(PredictedClass::Malignant, confidence, severity)
    }

    #[test]
    fn test_high_confidence_malignant_with_family_history() {
        let system = ExpertSystem::default();
        let patient = PatientData {
            age: Some(55),
            family_history: true,
            ..Default::default()
        };
        let report = system.analyze(&malignant(0.92, 85.0), Some(&patient));

        assert_eq!(report.diagnosis_summary.risk_level, RiskLevel::VeryHigh);
        assert_eq!(report.diagnosis_summary.urgency, UrgencyLevel::Immediate);
        assert_eq!(report.follow_up.recommended_days, 3);
        assert_eq!(report.fired_rule_ids(), vec!["R001", "R009"]);
        assert_eq!(report.recommendations[0], "Immediate biopsy recommended");
        assert_eq!(report.additional_considerations.len(), 3);
        assert_eq!(report.clinical_flags["risk_modifier"], "elevated");
        assert_eq!(report.confidence_assessment.level, ConfidenceLevel::VeryHigh);
    }

    #[test]
    fn test_moderate_benign() {
        let system = ExpertSystem::default();
        let patient = PatientData {
            age: Some(42),
            ..Default::default()
        };
        let prediction = MlPrediction::new(PredictedClass::Benign, 0.78, 22.0);
        let report = system.analyze(&prediction, Some(&patient));

        assert_eq!(report.diagnosis_summary.risk_level, RiskLevel::Low);
        assert_eq!(report.diagnosis_summary.urgency, UrgencyLevel::Routine);
        assert_eq!(report.follow_up.recommended_days, 180);
        assert_eq!(report.follow_up.description, "Follow-up in 6 months");
        assert_eq!(report.fired_rule_ids(), vec!["R005"]);
    }

    #[test]
    fn test_borderline_malignant_symptomatic() {
        let system = ExpertSystem::default();
        let patient = PatientData {
            age: Some(35),
            pain_level: Some(6),
            lump_detected: true,
            ..Default::default()
        };
        let report = system.analyze(&malignant(0.58, 58.0), Some(&patient));

        assert_eq!(report.diagnosis_summary.risk_level, RiskLevel::Moderate);
        assert_eq!(report.diagnosis_summary.urgency, UrgencyLevel::Soon);
        assert_eq!(report.follow_up.recommended_days, 14);
        // too unsure for the young-patient rule
        assert_eq!(report.fired_rule_ids(), vec!["R003", "R010"]);
        assert_eq!(report.clinical_flags["symptom_flag"], true);
    }

    #[test]
    fn test_no_patient_data() {
        let report = ExpertSystem::default().analyze(&malignant(0.58, 58.0), None);
        assert_eq!(report.fired_rule_ids(), vec!["R003"]);
        assert!(report.patient_data_used.is_empty());
        assert!(report.additional_considerations.is_empty());
    }

    #[test]
    fn test_elderly_symptomatic_family_history() {
        let patient = PatientData {
            age: Some(70),
            nipple_discharge: true,
            family_history: true,
            ..Default::default()
        };
        let report = ExpertSystem::default().analyze(&malignant(0.75, 70.0), Some(&patient));

        assert_eq!(report.diagnosis_summary.risk_level, RiskLevel::High);
        assert_eq!(report.diagnosis_summary.urgency, UrgencyLevel::Urgent);
        assert_eq!(report.follow_up.recommended_days, 7);
        assert_eq!(report.fired_rule_ids(), vec!["R002", "R007", "R010", "R009"]);
        assert_eq!(report.additional_considerations.len(), 9);
        assert_eq!(report.explanations.len(), 1);
    }

    #[test]
    fn test_build_facts_keys() {
        let system = ExpertSystem::default();
        let facts = system.build_facts(&malignant(0.9, 80.0), None);
        assert_eq!(facts.len(), 3);

        let patient = PatientData {
            pain_level: Some(2),
            ..Default::default()
        };
        let facts = system.build_facts(&malignant(0.9, 80.0), Some(&patient));
        assert_eq!(facts.number("pain_level"), Ok(Some(2.0)));
        assert_eq!(facts.flag("lump_detected"), Ok(Some(false)));
        assert!(!facts.contains_key("age"));
    }

    #[test]
    fn test_recommendation_limit_from_config() {
        let config = ExpertConfig {
            max_recommendations: 2,
            ..Default::default()
        };
        let report = ExpertSystem::new(config).analyze(&malignant(0.95, 90.0), None);
        assert_eq!(report.recommendations.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_high_confidence_malignant_is_immediate(confidence in 0.8501f64..=1.0, severity in 0.0f64..=100.0) {
            let report = ExpertSystem::default().analyze(&malignant(confidence, severity), None);
            prop_assert_eq!(report.diagnosis_summary.risk_level, RiskLevel::VeryHigh);
            prop_assert_eq!(report.diagnosis_summary.urgency, UrgencyLevel::Immediate);
            prop_assert!(report.follow_up.recommended_days <= 3);
        }

        #[test]
        fn prop_high_confidence_benign_is_routine(confidence in 0.9001f64..=1.0, severity in 0.0f64..=100.0) {
            let prediction = MlPrediction::new(PredictedClass::Benign, confidence, severity);
            let report = ExpertSystem::default().analyze(&prediction, None);
            prop_assert_eq!(report.diagnosis_summary.risk_level, RiskLevel::VeryLow);
            prop_assert_eq!(report.follow_up.recommended_days, 365);
        }

        #[test]
        fn prop_analysis_is_idempotent(confidence in 0.0f64..=1.0, severity in 0.0f64..=100.0, age in 18u32..90) {
            let system = ExpertSystem::default();
            let patient = PatientData { age: Some(age), ..Default::default() };
            let first = system.analyze(&malignant(confidence, severity), Some(&patient));
            let second = system.analyze(&malignant(confidence, severity), Some(&patient));
            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }
}
