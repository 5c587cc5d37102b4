//! Layered pipeline configuration

use expert_system::ExpertConfig;
use fuzzy_inference::FuzzyConfig;
use risk_fusion::FusionConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Prefix of environment overrides, e.g. `TRIAGE__FUZZY__GRID_POINTS=400`
pub const ENV_PREFIX: &str = "TRIAGE";

/// Configuration of every pipeline stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    pub expert: ExpertConfig,
    pub fuzzy: FuzzyConfig,
    pub fusion: FusionConfig,
}

impl TriageConfig {
    /// Load defaults, then the optional file, then `TRIAGE__*` variables
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            info!("Loading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
