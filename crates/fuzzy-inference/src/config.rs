//! Fuzzy System Configuration

use serde::{Deserialize, Serialize};

/// Fuzzy inference configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyConfig {
    /// Points in the defuzzification grid, endpoints included (default: 200)
    pub grid_points: usize,
    /// Score returned when nothing activates (default: 50.0)
    pub fallback_score: f64,
    /// Minimum firing strength for a rule to appear in the trace
    pub trace_threshold: f64,
    /// Traced rules kept in an analysis result
    pub max_active_rules: usize,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            grid_points: 200,
            fallback_score: 50.0,
            trace_threshold: 0.1,
            max_active_rules: 5,
        }
    }
}
