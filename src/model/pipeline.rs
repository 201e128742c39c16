//! Runtime classifier pipeline: column encoders → estimator → output transform.

use std::io::Read;

use ndarray::Array1;

use crate::normalize::FeatureRow;

use super::encoder::ColumnEncoder;
use super::error::{LoadError, ModelError};
use super::linear::LinearModel;
use super::schema::PipelineSchema;
use super::transform::OutputTransform;
use super::tree::Forest;
use super::{Classifier, Label};

/// Descriptive model metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelMeta {
    pub name: Option<String>,
    pub description: Option<String>,
    pub trained_with: Option<String>,
}

/// Estimator producing a raw margin from the encoded feature vector.
#[derive(Debug, Clone)]
pub enum Estimator {
    Logistic(LinearModel),
    Gbdt(Forest),
}

impl Estimator {
    pub fn n_features(&self) -> usize {
        match self {
            Estimator::Logistic(model) => model.n_features(),
            Estimator::Gbdt(forest) => forest.n_features(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Estimator::Logistic(_) => "logistic",
            Estimator::Gbdt(_) => "gbdt",
        }
    }

    pub fn margin(&self, features: &Array1<f64>) -> f64 {
        match self {
            Estimator::Logistic(model) => model.margin(features.view()),
            Estimator::Gbdt(forest) => match features.as_slice() {
                Some(slice) => forest.margin(slice),
                None => forest.margin(&features.to_vec()),
            },
        }
    }
}

/// A loaded, validated classifier pipeline.
///
/// Immutable after construction; share it by reference across sessions.
#[derive(Debug, Clone)]
pub struct PipelineModel {
    pub(super) meta: ModelMeta,
    pub(super) encoders: Vec<ColumnEncoder>,
    pub(super) estimator: Estimator,
    pub(super) transform: OutputTransform,
    pub(super) threshold: f64,
}

impl PipelineModel {
    /// Build from parts, validating that encoder widths match the estimator.
    pub fn new(
        encoders: Vec<ColumnEncoder>,
        estimator: Estimator,
        transform: OutputTransform,
        threshold: f64,
    ) -> Result<Self, LoadError> {
        let model = Self {
            meta: ModelMeta::default(),
            encoders,
            estimator,
            transform,
            threshold,
        };
        model.check()?;
        Ok(model)
    }

    /// Attach descriptive metadata.
    pub fn with_meta(mut self, meta: ModelMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Parse and validate a JSON artifact.
    pub fn read_json<R: Read>(reader: R) -> Result<Self, LoadError> {
        let schema: PipelineSchema = serde_json::from_reader(reader)?;
        Self::try_from(schema)
    }

    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Input column names, in encoding order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.encoders.iter().map(ColumnEncoder::column)
    }

    /// Total width of the encoded feature vector.
    pub fn n_features(&self) -> usize {
        self.encoders.iter().map(ColumnEncoder::width).sum()
    }

    pub(super) fn check(&self) -> Result<(), LoadError> {
        let width = self.n_features();
        let expected = self.estimator.n_features();
        if width != expected {
            return Err(LoadError::Validation(format!(
                "encoded width {width} does not match {} estimator feature count {expected}",
                self.estimator.kind()
            )));
        }
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(LoadError::Validation(format!(
                "threshold {} must lie strictly between 0 and 1",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Encode a row into the estimator's feature vector.
    ///
    /// Columns the pipeline does not know are ignored.
    pub fn encode(&self, row: &FeatureRow) -> Result<Array1<f64>, ModelError> {
        let mut features = Array1::zeros(self.n_features());
        let out = features
            .as_slice_mut()
            .ok_or_else(|| ModelError::Provider("feature buffer is not contiguous".into()))?;
        let mut offset = 0;
        for encoder in &self.encoders {
            let value = row.get(encoder.column()).ok_or_else(|| ModelError::MissingColumn {
                column: encoder.column().to_string(),
            })?;
            let width = encoder.width();
            encoder.encode(value, &mut out[offset..offset + width])?;
            offset += width;
        }
        Ok(features)
    }

    /// Positive-class probability for a row.
    pub fn positive_probability(&self, row: &FeatureRow) -> Result<f64, ModelError> {
        let features = self.encode(row)?;
        let p = self.transform.apply(self.estimator.margin(&features));
        if !(0.0..=1.0).contains(&p) {
            return Err(ModelError::InvalidOutput { value: p });
        }
        Ok(p)
    }
}

impl Classifier for PipelineModel {
    fn predict(&self, row: &FeatureRow) -> Result<Label, ModelError> {
        let p = self.positive_probability(row)?;
        Ok(if p > self.threshold {
            Label::HeartDisease
        } else {
            Label::NoDisease
        })
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<[f64; 2], ModelError> {
        let p = self.positive_probability(row)?;
        Ok([1.0 - p, p])
    }
}
