//! Engines shared across threads without locking

use diagnosis_types::{MlPrediction, PatientData, PredictedClass};
use pipeline::{DiagnosisRequest, Engines, TriageConfig};
use std::sync::Arc;
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_engines_are_send_sync() {
    assert_send_sync::<Engines>();
}

#[test]
fn test_parallel_diagnoses_match_sequential() {
    let engines = Arc::new(Engines::new(&TriageConfig::default()).unwrap());

    let requests: Vec<DiagnosisRequest> = (0..16)
        .map(|i| DiagnosisRequest {
            prediction: MlPrediction::new(
                if i % 2 == 0 { PredictedClass::Malignant } else { PredictedClass::Benign },
                0.5 + i as f64 * 0.03,
                5.0 + i as f64 * 6.0,
            ),
            patient: Some(PatientData {
                age: Some(30 + i * 3),
                family_history: i % 3 == 0,
                ..Default::default()
            }),
        })
        .collect();

    let expected: Vec<String> = requests
        .iter()
        .map(|r| serde_json::to_string(&engines.diagnose(r)).unwrap())
        .collect();

    let handles: Vec<_> = requests
        .into_iter()
        .map(|request| {
            let engines = Arc::clone(&engines);
            thread::spawn(move || serde_json::to_string(&engines.diagnose(&request)).unwrap())
        })
        .collect();

    let actual: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(actual, expected);
}
