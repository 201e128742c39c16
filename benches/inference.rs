//! Inference benchmarks for heart-predict.
//!
//! Benchmarks cover:
//! - Single-row scoring for each fixture estimator
//! - The full submit path (validate, normalize, infer)
//!
//! HTML reports are generated in `target/criterion/`.

use std::path::PathBuf;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use heart_predict::inference::infer;
use heart_predict::model::{self, Classifier, PipelineModel};
use heart_predict::normalize::normalize;
use heart_predict::session::Session;
use heart_predict::testing::{complete_input, complete_record};

// =============================================================================
// Setup
// =============================================================================

fn load_fixture(name: &str) -> PipelineModel {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/test-cases/pipeline")
        .join(format!("{name}.model.json"));
    model::load(&path).unwrap_or_else(|e| panic!("failed to load {}: {e}", path.display()))
}

// =============================================================================
// Benchmark Groups
// =============================================================================

/// Single-row `predict_proba` latency per estimator.
fn bench_single_row(c: &mut Criterion) {
    let row = normalize(complete_record());
    let mut group = c.benchmark_group("single_row");

    for name in ["logistic", "gbdt"] {
        let model = load_fixture(name);
        group.bench_with_input(BenchmarkId::new("predict_proba", name), &row, |b, row| {
            b.iter(|| black_box(model.predict_proba(black_box(row))));
        });
        group.bench_with_input(BenchmarkId::new("infer", name), &row, |b, row| {
            b.iter(|| black_box(infer(&model, black_box(row))));
        });
    }

    group.finish();
}

/// A whole submission from form state to outcome.
fn bench_submit(c: &mut Criterion) {
    let model = load_fixture("logistic");
    c.bench_function("submit/logistic", |b| {
        b.iter(|| {
            let mut session = Session::with_form(black_box(complete_input()).into());
            black_box(session.submit(&model).clone())
        });
    });
}

criterion_group!(benches, bench_single_row, bench_submit);
criterion_main!(benches);
