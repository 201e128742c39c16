//! Conversion from schema types to runtime types.
//!
//! Conversions validate as they go: anything that would make scoring
//! ill-defined is reported as a [`LoadError`] here rather than at inference.

use std::collections::HashSet;

use ndarray::Array1;

use super::encoder::{ColumnEncoder, Encoding};
use super::error::LoadError;
use super::linear::LinearModel;
use super::pipeline::{Estimator, ModelMeta, PipelineModel};
use super::schema::{
    ColumnSchema, EncoderSchema, EstimatorSchema, FORMAT_VERSION, PipelineMetaSchema,
    PipelineSchema, TreeSchema,
};
use super::tree::{Forest, Tree};

fn check_categories(column: &str, categories: &[String]) -> Result<(), LoadError> {
    if categories.is_empty() {
        return Err(LoadError::Validation(format!(
            "column '{column}' has an empty category list"
        )));
    }
    let mut seen = HashSet::new();
    for c in categories {
        if !seen.insert(c.as_str()) {
            return Err(LoadError::Validation(format!(
                "column '{column}' lists category '{c}' more than once"
            )));
        }
    }
    Ok(())
}

impl TryFrom<ColumnSchema> for ColumnEncoder {
    type Error = LoadError;

    fn try_from(schema: ColumnSchema) -> Result<Self, Self::Error> {
        let name = schema.name;
        let encoding = match schema.encoder {
            EncoderSchema::OneHot {
                categories,
                drop_first,
            } => {
                check_categories(&name, &categories)?;
                if drop_first && categories.len() < 2 {
                    return Err(LoadError::Validation(format!(
                        "column '{name}' drops its first category but has fewer than two"
                    )));
                }
                Encoding::OneHot {
                    categories,
                    drop_first,
                }
            }
            EncoderSchema::Ordinal { categories } => {
                check_categories(&name, &categories)?;
                Encoding::Ordinal { categories }
            }
            EncoderSchema::StandardScaler { mean, scale } => {
                if !mean.is_finite() || !scale.is_finite() || scale == 0.0 {
                    return Err(LoadError::Validation(format!(
                        "column '{name}' has an invalid scaler (mean {mean}, scale {scale})"
                    )));
                }
                Encoding::StandardScaler { mean, scale }
            }
            EncoderSchema::Passthrough => Encoding::Passthrough,
        };
        Ok(ColumnEncoder::new(name, encoding))
    }
}

fn tree_from_schema(index: usize, schema: TreeSchema, n_features: usize) -> Result<Tree, LoadError> {
    Tree::new(
        schema.split_indices,
        schema.thresholds,
        schema.children_left,
        schema.children_right,
        schema.default_left,
        schema.leaf_values,
        n_features,
    )
    .map_err(|source| LoadError::Tree { index, source })
}

impl TryFrom<EstimatorSchema> for Estimator {
    type Error = LoadError;

    fn try_from(schema: EstimatorSchema) -> Result<Self, Self::Error> {
        match schema {
            EstimatorSchema::Logistic {
                coefficients,
                intercept,
            } => {
                if coefficients.iter().chain([&intercept]).any(|w| !w.is_finite()) {
                    return Err(LoadError::Validation(
                        "logistic coefficients must be finite".into(),
                    ));
                }
                Ok(Estimator::Logistic(LinearModel::new(
                    Array1::from_vec(coefficients),
                    intercept,
                )))
            }
            EstimatorSchema::Gbdt {
                num_features,
                base_score,
                trees,
            } => {
                if !base_score.is_finite() {
                    return Err(LoadError::Validation("base_score must be finite".into()));
                }
                let trees = trees
                    .into_iter()
                    .enumerate()
                    .map(|(i, t)| tree_from_schema(i, t, num_features))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Estimator::Gbdt(Forest::new(trees, base_score, num_features)))
            }
        }
    }
}

impl From<PipelineMetaSchema> for ModelMeta {
    fn from(schema: PipelineMetaSchema) -> Self {
        Self {
            name: schema.name,
            description: schema.description,
            trained_with: schema.trained_with,
        }
    }
}

impl TryFrom<PipelineSchema> for PipelineModel {
    type Error = LoadError;

    fn try_from(schema: PipelineSchema) -> Result<Self, Self::Error> {
        if schema.format_version != FORMAT_VERSION {
            return Err(LoadError::UnsupportedVersion {
                found: schema.format_version,
                supported: FORMAT_VERSION,
            });
        }
        if schema.columns.is_empty() {
            return Err(LoadError::Validation("pipeline has no input columns".into()));
        }

        let mut names = HashSet::new();
        for column in &schema.columns {
            if !names.insert(column.name.as_str()) {
                return Err(LoadError::Validation(format!(
                    "column '{}' appears more than once",
                    column.name
                )));
            }
        }

        let encoders = schema
            .columns
            .into_iter()
            .map(ColumnEncoder::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let estimator = Estimator::try_from(schema.estimator)?;

        let model = PipelineModel::new(encoders, estimator, schema.output_transform, schema.threshold)?
            .with_meta(schema.meta.into());
        Ok(model)
    }
}
