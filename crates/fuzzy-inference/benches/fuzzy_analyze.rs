use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fuzzy_inference::{FuzzyConfig, FuzzyDiagnosisSystem, FuzzyInputs};

fn bench_analyze(c: &mut Criterion) {
    let system = match FuzzyDiagnosisSystem::new(FuzzyConfig::default()) {
        Ok(system) => system,
        Err(e) => panic!("default fuzzy system rejected: {}", e),
    };

    c.bench_function("analyze_confidence_severity", |b| {
        b.iter(|| system.analyze(black_box(0.92), black_box(85.0), None, None))
    });

    c.bench_function("analyze_all_inputs", |b| {
        b.iter(|| system.analyze(black_box(0.5), black_box(75.0), Some(30.0), Some(9.0)))
    });

    let memberships = system.fuzzify(&FuzzyInputs::from_prediction(0.5, 75.0, Some(30.0), Some(9.0)));
    let evaluation = system.evaluate_rules(&memberships);
    c.bench_function("defuzzify_three_sets", |b| {
        b.iter(|| system.defuzzify(black_box(&evaluation.activations)))
    });
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
