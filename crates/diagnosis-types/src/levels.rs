//! Risk and urgency scales

use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk level classification, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// All levels in ascending order
    pub const ALL: [RiskLevel; 5] = [
        RiskLevel::VeryLow,
        RiskLevel::Low,
        RiskLevel::Moderate,
        RiskLevel::High,
        RiskLevel::VeryHigh,
    ];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "very_low",
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very_high",
        }
    }

    /// Representative point on the 0-100 risk scale, used when blending
    /// a categorical risk with numeric scores
    pub fn score(&self) -> f64 {
        match self {
            RiskLevel::VeryLow => 10.0,
            RiskLevel::Low => 30.0,
            RiskLevel::Moderate => 50.0,
            RiskLevel::High => 70.0,
            RiskLevel::VeryHigh => 90.0,
        }
    }

    /// Bucket a 0-100 risk score in steps of 20
    pub fn from_score(score: f64) -> Self {
        if score < 20.0 {
            RiskLevel::VeryLow
        } else if score < 40.0 {
            RiskLevel::Low
        } else if score < 60.0 {
            RiskLevel::Moderate
        } else if score < 80.0 {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How soon the patient should be seen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    #[default]
    Routine,
    Soon,
    Urgent,
    Immediate,
}

impl UrgencyLevel {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::Routine => "routine",
            UrgencyLevel::Soon => "soon",
            UrgencyLevel::Urgent => "urgent",
            UrgencyLevel::Immediate => "immediate",
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
