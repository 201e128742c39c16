//! Fixture loading utilities for integration tests.
//!
//! For canned records and stand-in classifiers, use `heart_predict::testing`.
//! Float comparisons go through `approx`.

#![allow(dead_code)]

use std::fs::File;
use std::path::PathBuf;

use serde_json::Value;

use heart_predict::model::{self, LoadError, PipelineModel};

#[allow(unused_imports)]
pub use heart_predict::testing::{complete_input, complete_record};

// =============================================================================
// Fixture paths
// =============================================================================

/// Base directory for test cases.
pub fn test_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/test-cases")
}

/// Path of a pipeline artifact fixture, e.g. `fixture("logistic")`.
pub fn fixture(name: &str) -> PathBuf {
    test_cases_dir()
        .join("pipeline")
        .join(format!("{name}.model.json"))
}

// =============================================================================
// Loading
// =============================================================================

/// Load a pipeline fixture through the production loader.
pub fn load_model(name: &str) -> PipelineModel {
    let path = fixture(name);
    model::load(&path).unwrap_or_else(|e| panic!("failed to load {}: {e}", path.display()))
}

/// Raw JSON of a pipeline fixture, for mutation tests.
pub fn fixture_json(name: &str) -> Value {
    let path = fixture(name);
    let file = File::open(&path).unwrap_or_else(|e| panic!("failed to open {}: {e}", path.display()));
    serde_json::from_reader(file).unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()))
}

/// Run a JSON value through the reader the loader uses.
pub fn read_value(value: &Value) -> Result<PipelineModel, LoadError> {
    let bytes = serde_json::to_vec(value).expect("serialize fixture");
    PipelineModel::read_json(bytes.as_slice())
}
