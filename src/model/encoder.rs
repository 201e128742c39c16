//! Per-column feature encoders.
//!
//! A fitted pipeline turns each named input column into one or more
//! numeric features. Columns are encoded in artifact order and their outputs
//! are concatenated into the estimator's feature vector.

use crate::normalize::FeatureValue;

use super::error::ModelError;

/// How a single column becomes numeric features.
#[derive(Debug, Clone, PartialEq)]
pub enum Encoding {
    /// One indicator per category. With `drop_first`, the first category is
    /// the all-zero baseline.
    OneHot {
        categories: Vec<String>,
        drop_first: bool,
    },
    /// Index of the category as a single feature.
    Ordinal { categories: Vec<String> },
    /// `(x - mean) / scale`.
    StandardScaler { mean: f64, scale: f64 },
    /// Numeric value unchanged.
    Passthrough,
}

impl Encoding {
    /// Number of features this encoding emits.
    pub fn width(&self) -> usize {
        match self {
            Encoding::OneHot {
                categories,
                drop_first,
            } => categories.len().saturating_sub(usize::from(*drop_first)),
            Encoding::Ordinal { .. } | Encoding::StandardScaler { .. } | Encoding::Passthrough => 1,
        }
    }
}

/// A fitted encoder bound to a named input column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnEncoder {
    column: String,
    encoding: Encoding,
}

impl ColumnEncoder {
    pub fn new(column: impl Into<String>, encoding: Encoding) -> Self {
        Self {
            column: column.into(),
            encoding,
        }
    }

    #[inline]
    pub fn column(&self) -> &str {
        &self.column
    }

    #[inline]
    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.encoding.width()
    }

    /// Encode `value` into `out`, which must be exactly [`width`](Self::width) long.
    pub fn encode(&self, value: &FeatureValue, out: &mut [f64]) -> Result<(), ModelError> {
        debug_assert_eq!(out.len(), self.width());
        match &self.encoding {
            Encoding::OneHot {
                categories,
                drop_first,
            } => {
                let idx = self.category_index(categories, value)?;
                out.fill(0.0);
                let offset = usize::from(*drop_first);
                if idx >= offset {
                    out[idx - offset] = 1.0;
                }
            }
            Encoding::Ordinal { categories } => {
                out[0] = self.category_index(categories, value)? as f64;
            }
            Encoding::StandardScaler { mean, scale } => {
                out[0] = (self.number(value)? - mean) / scale;
            }
            Encoding::Passthrough => {
                out[0] = self.number(value)?;
            }
        }

        if out.iter().any(|x| !x.is_finite()) {
            return Err(ModelError::NonFinite {
                column: self.column.clone(),
            });
        }
        Ok(())
    }

    fn category_index(&self, categories: &[String], value: &FeatureValue) -> Result<usize, ModelError> {
        let FeatureValue::Category(text) = value else {
            return Err(self.mismatch("categorical", value));
        };
        categories
            .iter()
            .position(|c| c == text)
            .ok_or_else(|| ModelError::UnknownCategory {
                column: self.column.clone(),
                value: text.clone(),
            })
    }

    fn number(&self, value: &FeatureValue) -> Result<f64, ModelError> {
        match value {
            FeatureValue::Number(x) => Ok(*x),
            FeatureValue::Category(_) => Err(self.mismatch("numeric", value)),
        }
    }

    fn mismatch(&self, expected: &'static str, got: &FeatureValue) -> ModelError {
        ModelError::TypeMismatch {
            column: self.column.clone(),
            expected,
            got: got.to_string(),
        }
    }
}
