//! Built-in expert rules
//!
//! Classification rules (priority 5-10) map the classifier's class and
//! confidence band to a risk level, urgency, and follow-up interval. Modifier
//! rules (priority 2-4) only add considerations and descriptive flags.

use crate::condition::Condition;
use crate::rule::{Conclusion, Rule};
use diagnosis_types::{PredictedClass, RiskLevel, UrgencyLevel};

fn is_class(class: PredictedClass) -> Condition {
    Condition::text_eq("predicted_class", class.as_str())
}

/// The ten built-in rules, in definition order
pub fn default_rules() -> Vec<Rule> {
    use PredictedClass::{Benign, Malignant};

    vec![
        Rule::new(
            "R001",
            "High Confidence Malignant",
            "Malignant tumor with high confidence requires immediate biopsy",
            Condition::all([is_class(Malignant), Condition::gt("confidence", 0.85)]),
            Conclusion::classification(RiskLevel::VeryHigh, UrgencyLevel::Immediate, 3)
                .with_recommendations([
                    "Immediate biopsy recommended",
                    "Oncology referral required",
                    "Additional imaging (MRI/Ultrasound) suggested",
                    "Discuss treatment options with oncology team",
                ])
                .with_explanation(
                    "High confidence malignant classification indicates high probability of cancer. \
                     Immediate specialist consultation is critical.",
                ),
            10,
        ),
        Rule::new(
            "R002",
            "Moderate Confidence Malignant",
            "Malignant with moderate confidence needs additional imaging",
            Condition::all([is_class(Malignant), Condition::between("confidence", 0.70, 0.85)]),
            Conclusion::classification(RiskLevel::High, UrgencyLevel::Urgent, 7)
                .with_recommendations([
                    "Additional diagnostic imaging recommended (MRI/Ultrasound)",
                    "Core needle biopsy should be scheduled",
                    "Oncology consultation within 1 week",
                    "Consider second radiologist opinion",
                ])
                .with_explanation(
                    "Moderate confidence malignant finding requires confirmation through \
                     additional imaging and biopsy.",
                ),
            9,
        ),
        Rule::new(
            "R003",
            "Borderline Malignant",
            "Low confidence malignant - uncertainty requires careful evaluation",
            Condition::all([is_class(Malignant), Condition::in_range("confidence", 0.55, 0.70)]),
            Conclusion::classification(RiskLevel::Moderate, UrgencyLevel::Soon, 14)
                .with_recommendations([
                    "Supplemental imaging required (breast ultrasound)",
                    "Short-term follow-up mammogram in 3-6 months",
                    "Consider MRI for dense breast tissue",
                    "Second radiologist review recommended",
                ])
                .with_explanation(
                    "Borderline classification with uncertainty. Additional evaluation needed \
                     to rule out malignancy.",
                ),
            8,
        ),
        Rule::new(
            "R004",
            "High Confidence Benign",
            "Benign tumor with high confidence - routine follow-up",
            Condition::all([is_class(Benign), Condition::gt("confidence", 0.90)]),
            Conclusion::classification(RiskLevel::VeryLow, UrgencyLevel::Routine, 365)
                .with_recommendations([
                    "Continue routine annual mammography screening",
                    "Breast self-examination monthly",
                    "No immediate intervention required",
                    "Healthy lifestyle maintenance recommended",
                ])
                .with_explanation(
                    "High confidence benign finding. Continue regular screening schedule.",
                ),
            5,
        ),
        Rule::new(
            "R005",
            "Moderate Confidence Benign",
            "Benign with moderate confidence - enhanced monitoring",
            Condition::all([is_class(Benign), Condition::between("confidence", 0.75, 0.90)]),
            Conclusion::classification(RiskLevel::Low, UrgencyLevel::Routine, 180)
                .with_recommendations([
                    "Follow-up mammogram in 6 months",
                    "Supplemental ultrasound if breast density is high",
                    "Continue breast self-examination",
                    "Monitor for any changes",
                ])
                .with_explanation(
                    "Moderate confidence benign finding. Short-term follow-up recommended \
                     for confirmation.",
                ),
            6,
        ),
        Rule::new(
            "R006",
            "Uncertain Benign",
            "Low confidence benign - additional evaluation needed",
            Condition::all([is_class(Benign), Condition::in_range("confidence", 0.55, 0.75)]),
            Conclusion::classification(RiskLevel::Moderate, UrgencyLevel::Soon, 90)
                .with_recommendations([
                    "Diagnostic mammogram views recommended",
                    "Breast ultrasound for characterization",
                    "Follow-up in 3 months",
                    "Consider second opinion",
                ])
                .with_explanation(
                    "Low confidence classification warrants additional imaging for accurate \
                     assessment.",
                ),
            7,
        ),
        Rule::new(
            "R007",
            "Elderly Patient Consideration",
            "Adjust recommendations for older patients",
            Condition::all([Condition::ge("age", 65.0), is_class(Malignant)]),
            Conclusion::modifier()
                .with_flag("age_consideration", true)
                .with_additional([
                    "Consider overall health status and life expectancy",
                    "Discuss treatment preferences and quality of life goals",
                    "Evaluate for comorbidities before aggressive treatment",
                ]),
            3,
        ),
        Rule::new(
            "R008",
            "Young Patient Malignant",
            "Young patients with malignant findings need aggressive follow-up",
            Condition::all([
                // unknown age must not count as young
                Condition::lt("age", 40.0).with_missing(50.0),
                is_class(Malignant),
                Condition::gt("confidence", 0.60),
            ]),
            Conclusion::modifier()
                .with_flag("age_consideration", true)
                .with_additional([
                    "Genetic counseling and BRCA testing recommended",
                    "Consider family history of breast/ovarian cancer",
                    "Discuss fertility preservation options before treatment",
                    "Aggressive treatment approach typically recommended",
                ]),
            4,
        ),
        Rule::new(
            "R009",
            "Family History Risk Factor",
            "Family history increases risk assessment",
            Condition::all([Condition::flag("family_history"), Condition::gt("confidence", 0.50)]),
            Conclusion::modifier()
                .with_flag("family_history_flag", true)
                .with_flag("risk_modifier", "elevated")
                .with_additional([
                    "Genetic counseling strongly recommended",
                    "Consider more frequent screening intervals",
                    "Discuss prophylactic options if appropriate",
                ]),
            2,
        ),
        Rule::new(
            "R010",
            "Symptomatic Patient",
            "Symptoms increase clinical concern",
            Condition::all([
                Condition::any([
                    Condition::gt("pain_level", 5.0),
                    Condition::flag("lump_detected"),
                    Condition::flag("nipple_discharge"),
                ]),
                is_class(Malignant),
            ]),
            Conclusion::modifier()
                .with_flag("symptom_flag", true)
                .with_flag("urgency_modifier", "increased")
                .with_additional([
                    "Clinical examination required immediately",
                    "Correlate imaging findings with physical exam",
                    "Document all symptoms for oncology referral",
                ]),
            3,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fact::FactMap;
    use crate::rule_base::RuleBase;

    fn fired_ids(facts: &FactMap) -> Vec<String> {
        RuleBase::with_default_rules()
            .infer(facts)
            .into_iter()
            .map(|f| f.rule_id)
            .collect()
    }

    fn prediction(class: &str, confidence: f64) -> FactMap {
        FactMap::new()
            .with("predicted_class", class)
            .with("confidence", confidence)
    }

    #[test]
    fn test_catalog_shape() {
        let rules = default_rules();
        assert_eq!(rules.len(), 10);

        for rule in &rules {
            if rule.conclusion.is_primary() {
                assert!((5..=10).contains(&rule.priority), "{}", rule.id);
                assert_eq!(rule.conclusion.recommendations.len(), 4);
                assert!(rule.conclusion.follow_up_days.is_some());
            } else {
                assert!((2..=4).contains(&rule.priority), "{}", rule.id);
                assert!(rule.conclusion.recommendations.is_empty());
                assert!(!rule.conclusion.additional_recommendations.is_empty());
            }
        }
    }

    #[test]
    fn test_boundary_085_goes_to_r002() {
        assert_eq!(fired_ids(&prediction("malignant", 0.85)), vec!["R002"]);
        assert_eq!(fired_ids(&prediction("malignant", 0.8500001)), vec!["R001"]);
    }

    #[test]
    fn test_benign_bands() {
        assert_eq!(fired_ids(&prediction("benign", 0.95)), vec!["R004"]);
        assert_eq!(fired_ids(&prediction("benign", 0.90)), vec!["R005"]);
        assert_eq!(fired_ids(&prediction("benign", 0.75)), vec!["R005"]);
        assert_eq!(fired_ids(&prediction("benign", 0.60)), vec!["R006"]);
        assert!(fired_ids(&prediction("benign", 0.50)).is_empty());
    }

    #[test]
    fn test_young_patient_requires_known_age() {
        let facts = prediction("malignant", 0.75);
        assert_eq!(fired_ids(&facts), vec!["R002"]);

        let facts = facts.with("age", 32u32);
        assert_eq!(fired_ids(&facts), vec!["R002", "R008"]);
    }

    #[test]
    fn test_modifier_order_for_elderly_symptomatic() {
        let facts = prediction("malignant", 0.75)
            .with("age", 70u32)
            .with("nipple_discharge", true)
            .with("family_history", true);
        assert_eq!(fired_ids(&facts), vec!["R002", "R007", "R010", "R009"]);
    }

    #[test]
    fn test_symptoms_need_malignant() {
        let facts = prediction("benign", 0.95)
            .with("pain_level", 9u8)
            .with("lump_detected", true);
        assert_eq!(fired_ids(&facts), vec!["R004"]);
    }

    #[test]
    fn test_family_history_fires_for_benign() {
        let facts = prediction("benign", 0.95).with("family_history", true);
        assert_eq!(fired_ids(&facts), vec!["R004", "R009"]);
    }
}
