//! Plain-language summary of a combined assessment

use diagnosis_types::{PredictedClass, RiskLevel};
use fuzzy_inference::UncertaintyLevel;

fn class_sentence(class: PredictedClass, confidence: f64) -> String {
    let percent = format!("{:.1}%", confidence * 100.0);
    match class {
        PredictedClass::Malignant if confidence > 0.85 => format!(
            "The analysis indicates a HIGH PROBABILITY of malignant tumor with {} confidence.",
            percent
        ),
        PredictedClass::Malignant if confidence > 0.70 => format!(
            "The analysis suggests POSSIBLE malignant tumor with {} confidence.",
            percent
        ),
        PredictedClass::Malignant => format!(
            "The analysis shows INCONCLUSIVE results leaning towards malignant with {} confidence.",
            percent
        ),
        PredictedClass::Benign if confidence > 0.90 => format!(
            "The analysis indicates the tumor is likely BENIGN with {} confidence.",
            percent
        ),
        PredictedClass::Benign if confidence > 0.75 => format!(
            "The analysis suggests the tumor is probably benign with {} confidence.",
            percent
        ),
        PredictedClass::Benign => format!(
            "The analysis shows INCONCLUSIVE results leaning towards benign with {} confidence.",
            percent
        ),
    }
}

fn risk_sentence(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::VeryHigh => "Immediate medical consultation is strongly recommended.",
        RiskLevel::High => "Prompt medical evaluation is advised within the next few days.",
        RiskLevel::Moderate => "Follow-up evaluation should be scheduled within the next few weeks.",
        RiskLevel::Low => "Continue routine monitoring with regular check-ups.",
        RiskLevel::VeryLow => "No immediate concern. Maintain regular screening schedule.",
    }
}

/// Summary sentence for the final category
pub fn generate_summary(
    class: PredictedClass,
    confidence: f64,
    risk: RiskLevel,
    uncertainty: UncertaintyLevel,
) -> String {
    let mut summary = format!("{} {}", class_sentence(class, confidence), risk_sentence(risk));
    if uncertainty == UncertaintyLevel::High {
        summary.push_str(
            " Note: There is some uncertainty in this assessment. \
             Additional testing is recommended for confirmation.",
        );
    }
    summary
}
