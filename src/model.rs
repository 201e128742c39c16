//! Model provider: the trained classifier and its inference contract.
//!
//! The [`Classifier`] trait is the seam between the form pipeline and
//! whatever scores a row. [`PipelineModel`] is the production implementation,
//! loaded once at startup from a JSON artifact with [`load`].
//!
//! # Example
//!
//! ```ignore
//! use heart_predict::model::{self, Classifier};
//!
//! let model = model::load("prediction_model.json")?;
//! let [p_no, p_yes] = model.predict_proba(&row)?;
//! ```

mod convert;
mod encoder;
mod error;
mod linear;
mod pipeline;
pub mod schema;
mod transform;
mod tree;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

pub use encoder::{ColumnEncoder, Encoding};
pub use error::{LoadError, ModelError};
pub use linear::LinearModel;
pub use pipeline::{Estimator, ModelMeta, PipelineModel};
pub use transform::{OutputTransform, sigmoid};
pub use tree::{Forest, NodeId, Tree, TreeValidationError};

use crate::normalize::FeatureRow;

// =============================================================================
// Label
// =============================================================================

/// Binary class predicted by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// Class 0.
    NoDisease,
    /// Class 1.
    HeartDisease,
}

impl Label {
    /// Class index (0 or 1).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Label::NoDisease => 0,
            Label::HeartDisease => 1,
        }
    }

    /// Outcome name used in verdicts and probability lines.
    pub fn outcome(self) -> &'static str {
        match self {
            Label::NoDisease => "No Disease",
            Label::HeartDisease => "Heart Disease",
        }
    }
}

// =============================================================================
// Classifier
// =============================================================================

/// A binary classifier over one normalized row.
///
/// Implementations must be deterministic for a given row and model, and
/// `predict_proba` must return `[P(no disease), P(disease)]`.
pub trait Classifier {
    /// Predicted class.
    fn predict(&self, row: &FeatureRow) -> Result<Label, ModelError>;

    /// Class probabilities, indexed by [`Label::index`].
    fn predict_proba(&self, row: &FeatureRow) -> Result<[f64; 2], ModelError>;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn predict(&self, row: &FeatureRow) -> Result<Label, ModelError> {
        (**self).predict(row)
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<[f64; 2], ModelError> {
        (**self).predict_proba(row)
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn predict(&self, row: &FeatureRow) -> Result<Label, ModelError> {
        (**self).predict(row)
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<[f64; 2], ModelError> {
        (**self).predict_proba(row)
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Load the model artifact at `path`.
///
/// A missing file is reported as [`LoadError::ArtifactMissing`]; the caller
/// is expected to stop the application.
pub fn load(path: impl AsRef<Path>) -> Result<PipelineModel, LoadError> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::ArtifactMissing {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let model = PipelineModel::read_json(BufReader::new(file))?;
    log::info!(
        "loaded {} model from {} ({} columns, {} features)",
        model.estimator().kind(),
        path.display(),
        model.columns().count(),
        model.n_features()
    );
    Ok(model)
}
