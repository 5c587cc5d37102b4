//! Diagnosis Types
//!
//! Records shared by the reasoning engines: the classifier output they consume,
//! the optional patient attributes, and the closed risk/urgency scales they emit.

mod levels;
mod prediction;

pub use levels::{RiskLevel, UrgencyLevel};
pub use prediction::{ClassProbabilities, MlPrediction, PatientData, PredictedClass};
