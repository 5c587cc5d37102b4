//! Report compilation from fired rules

use crate::config::ExpertConfig;
use crate::report::{ConfidenceAssessment, DiagnosisReport, DiagnosisSummary, FollowUp, RuleTrace};
use diagnosis_types::{RiskLevel, UrgencyLevel};
use rule_engine::{FactMap, FiredRule};
use std::collections::{BTreeMap, HashSet};

/// Facts that describe the classifier output rather than the patient
const CLASSIFIER_FACTS: [&str; 3] = ["predicted_class", "confidence", "severity_score"];

/// Remove repeated strings, keeping each at its first position
pub fn dedup_preserving_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Merge fired-rule conclusions into a single report.
///
/// `fired` must be in firing order; the first rule carrying a risk level
/// becomes the primary diagnosis.
pub fn compile(facts: &FactMap, fired: &[FiredRule], config: &ExpertConfig) -> DiagnosisReport {
    let primary = fired.iter().find(|f| f.conclusion.is_primary());

    let (risk_level, urgency) = match primary {
        Some(rule) => (
            rule.conclusion.risk_level.unwrap_or(RiskLevel::Moderate),
            rule.conclusion.urgency.unwrap_or_default(),
        ),
        None => (RiskLevel::Moderate, UrgencyLevel::Routine),
    };

    let mut recommendations = dedup_preserving_order(
        fired
            .iter()
            .flat_map(|f| f.conclusion.recommendations.iter().cloned()),
    );
    recommendations.truncate(config.max_recommendations);

    let additional_considerations = dedup_preserving_order(
        fired
            .iter()
            .flat_map(|f| f.conclusion.additional_recommendations.iter().cloned()),
    );

    let explanations = fired
        .iter()
        .filter_map(|f| f.conclusion.explanation.clone())
        .collect();

    let follow_up_days = fired
        .iter()
        .filter_map(|f| f.conclusion.follow_up_days)
        .fold(config.default_follow_up_days, u32::min);

    let mut clinical_flags = BTreeMap::new();
    for (name, value) in fired.iter().flat_map(|f| f.conclusion.flags.iter()) {
        clinical_flags
            .entry(name.clone())
            .or_insert_with(|| value.clone());
    }

    let mut patient_data_used = FactMap::new();
    for (key, value) in facts.iter() {
        if !CLASSIFIER_FACTS.contains(&key) {
            patient_data_used.insert(key, value.clone());
        }
    }

    let confidence = facts.number_or("confidence", 0.0);

    DiagnosisReport {
        diagnosis_summary: DiagnosisSummary {
            predicted_class: facts.text("predicted_class").ok().flatten().map(str::to_string),
            confidence,
            severity_score: facts.number_or("severity_score", 0.0),
            risk_level,
            urgency,
            primary_rule: primary.map(|rule| rule.rule_id.clone()),
        },
        recommendations,
        additional_considerations,
        explanations,
        follow_up: FollowUp::from_days(follow_up_days),
        rules_fired: fired.iter().map(RuleTrace::from).collect(),
        confidence_assessment: ConfidenceAssessment::assess(confidence),
        clinical_flags,
        patient_data_used,
    }
}
