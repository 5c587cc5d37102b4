//! Diagnosis report records

use diagnosis_types::{RiskLevel, UrgencyLevel};
use rule_engine::{FactMap, FiredRule};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Headline of a diagnosis report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisSummary {
    pub predicted_class: Option<String>,
    pub confidence: f64,
    pub severity_score: f64,
    pub risk_level: RiskLevel,
    pub urgency: UrgencyLevel,
    /// ID of the rule that set the risk level, if any did
    pub primary_rule: Option<String>,
}

/// Recommended follow-up interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUp {
    pub recommended_days: u32,
    pub description: String,
}

impl FollowUp {
    /// Build a follow-up entry with its bucketed description
    pub fn from_days(days: u32) -> Self {
        let description = match days {
            0..=7 => "Immediate follow-up required within 1 week",
            8..=14 => "Urgent follow-up within 2 weeks",
            15..=30 => "Follow-up within 1 month",
            31..=90 => "Follow-up in 3 months",
            91..=180 => "Follow-up in 6 months",
            _ => "Annual routine screening",
        };

        Self {
            recommended_days: days,
            description: description.to_string(),
        }
    }
}

/// Identity of a fired rule, as listed in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTrace {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<&FiredRule> for RuleTrace {
    fn from(fired: &FiredRule) -> Self {
        Self {
            id: fired.rule_id.clone(),
            name: fired.rule_name.clone(),
            description: fired.description.clone(),
        }
    }
}

/// Qualitative reading of the classifier confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ConfidenceLevel {
    /// Bucket a confidence value
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.90 {
            ConfidenceLevel::VeryHigh
        } else if confidence >= 0.80 {
            ConfidenceLevel::High
        } else if confidence >= 0.70 {
            ConfidenceLevel::Moderate
        } else if confidence >= 0.60 {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::VeryLow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::VeryLow => "very_low",
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Moderate => "moderate",
            ConfidenceLevel::High => "high",
            ConfidenceLevel::VeryHigh => "very_high",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence level with its fixed wording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceAssessment {
    pub level: ConfidenceLevel,
    pub description: String,
    pub reliability: String,
}

impl ConfidenceAssessment {
    /// Assess a classifier confidence value
    pub fn assess(confidence: f64) -> Self {
        let level = ConfidenceLevel::from_confidence(confidence);
        let (description, reliability) = match level {
            ConfidenceLevel::VeryHigh => {
                ("Very high confidence in prediction", "Results are highly reliable")
            }
            ConfidenceLevel::High => (
                "High confidence in prediction",
                "Results are reliable with minor uncertainty",
            ),
            ConfidenceLevel::Moderate => (
                "Moderate confidence in prediction",
                "Additional confirmation recommended",
            ),
            ConfidenceLevel::Low => (
                "Low confidence in prediction",
                "Further evaluation strongly recommended",
            ),
            ConfidenceLevel::VeryLow => (
                "Very low confidence - borderline case",
                "Results require additional diagnostic workup",
            ),
        };

        Self {
            level,
            description: description.to_string(),
            reliability: reliability.to_string(),
        }
    }
}

/// Full output of one expert-system analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisReport {
    pub diagnosis_summary: DiagnosisSummary,
    pub recommendations: Vec<String>,
    pub additional_considerations: Vec<String>,
    pub explanations: Vec<String>,
    pub follow_up: FollowUp,
    pub rules_fired: Vec<RuleTrace>,
    pub confidence_assessment: ConfidenceAssessment,
    /// Flags raised by fired rules; the first rule to set a flag wins
    pub clinical_flags: BTreeMap<String, Value>,
    /// Patient facts that were available to the rules
    pub patient_data_used: FactMap,
}

impl DiagnosisReport {
    /// IDs of the fired rules, in firing order
    pub fn fired_rule_ids(&self) -> Vec<&str> {
        self.rules_fired.iter().map(|r| r.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_up_buckets() {
        let cases = [
            (3, "Immediate follow-up required within 1 week"),
            (7, "Immediate follow-up required within 1 week"),
            (14, "Urgent follow-up within 2 weeks"),
            (30, "Follow-up within 1 month"),
            (90, "Follow-up in 3 months"),
            (180, "Follow-up in 6 months"),
            (181, "Annual routine screening"),
            (365, "Annual routine screening"),
        ];
        for (days, expected) in cases {
            assert_eq!(FollowUp::from_days(days).description, expected, "{} days", days);
        }
    }

    #[test]
    fn test_confidence_levels() {
        assert_eq!(ConfidenceLevel::from_confidence(0.90), ConfidenceLevel::VeryHigh);
        assert_eq!(ConfidenceLevel::from_confidence(0.85), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_confidence(0.70), ConfidenceLevel::Moderate);
        assert_eq!(ConfidenceLevel::from_confidence(0.65), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_confidence(0.59), ConfidenceLevel::VeryLow);
    }

    #[test]
    fn test_assessment_wording() {
        let assessment = ConfidenceAssessment::assess(0.58);
        assert_eq!(assessment.description, "Very low confidence - borderline case");
        assert_eq!(
            assessment.reliability,
            "Results require additional diagnostic workup"
        );
        assert_eq!(serde_json::to_value(assessment.level).unwrap(), "very_low");
    }
}
