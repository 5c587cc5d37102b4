//! Classifier output and patient attributes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Class predicted by the image classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictedClass {
    Benign,
    Malignant,
}

impl PredictedClass {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictedClass::Benign => "benign",
            PredictedClass::Malignant => "malignant",
        }
    }
}

impl fmt::Display for PredictedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-class probabilities reported alongside the prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub benign: f64,
    pub malignant: f64,
}

/// Output of the external classifier.
///
/// The classifier guarantees `confidence` in [0, 1] and `severity_score`
/// in [0, 100]; nothing downstream re-validates these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlPrediction {
    /// Predicted class
    pub predicted_class: PredictedClass,
    /// Confidence in the predicted class (0.0 to 1.0)
    pub confidence: f64,
    /// Severity score (0.0 to 100.0)
    pub severity_score: f64,
    /// Class probabilities, when the classifier reports them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<ClassProbabilities>,
}

impl MlPrediction {
    /// Create a prediction without class probabilities
    pub fn new(predicted_class: PredictedClass, confidence: f64, severity_score: f64) -> Self {
        Self {
            predicted_class,
            confidence,
            severity_score,
            probabilities: None,
        }
    }
}

/// Optional patient attributes supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientData {
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Self-reported pain (0-10)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pain_level: Option<u8>,
    /// Family history of breast or ovarian cancer
    pub family_history: bool,
    /// Palpable lump detected
    pub lump_detected: bool,
    /// Nipple discharge present
    pub nipple_discharge: bool,
}
