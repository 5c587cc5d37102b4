//! Expert System Configuration

use serde::{Deserialize, Serialize};

/// Expert system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpertConfig {
    /// Maximum primary recommendations kept in a report (default: 8)
    pub max_recommendations: usize,
    /// Follow-up interval when no fired rule names one (days)
    pub default_follow_up_days: u32,
}

impl Default for ExpertConfig {
    fn default() -> Self {
        Self {
            max_recommendations: 8,
            default_follow_up_days: 365,
        }
    }
}
