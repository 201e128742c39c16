//! Error types for loading and running the classifier pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::tree::TreeValidationError;

/// Errors that can occur when loading a model artifact.
///
/// Every variant is fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Model file '{}' not found. Please ensure it's in the correct directory.", .path.display())]
    ArtifactMissing { path: PathBuf },

    #[error("failed to read model file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid model JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported model format version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("model validation failed: {0}")]
    Validation(String),

    #[error("invalid tree {index}: {source}")]
    Tree {
        index: usize,
        #[source]
        source: TreeValidationError,
    },
}

impl LoadError {
    /// Whether the artifact file was absent.
    pub fn is_missing(&self) -> bool {
        matches!(self, LoadError::ArtifactMissing { .. })
    }
}

/// Errors raised while scoring one row.
///
/// The Display text is what the user sees in the inference-failure message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("column '{column}' is missing from the input row")]
    MissingColumn { column: String },

    #[error("found unknown category '{value}' in column '{column}'")]
    UnknownCategory { column: String, value: String },

    #[error("column '{column}' expected a {expected} value, got '{got}'")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        got: String,
    },

    #[error("column '{column}' produced a non-finite value")]
    NonFinite { column: String },

    #[error("model produced an invalid probability {value}")]
    InvalidOutput { value: f64 },

    /// Failure reported by a provider outside this crate.
    #[error("{0}")]
    Provider(String),
}
