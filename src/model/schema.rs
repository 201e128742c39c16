//! Schema types for the model artifact.
//!
//! These types mirror the JSON document on disk and are kept separate from
//! the runtime types in [`super::pipeline`] so that loading can validate
//! before anything is built. Conversion lives in [`super::convert`].

use serde::{Deserialize, Serialize};

use super::transform::OutputTransform;

/// Current artifact format version.
pub const FORMAT_VERSION: u32 = 1;

fn default_threshold() -> f64 {
    0.5
}

/// Descriptive metadata. Not used for inference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineMetaSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Library/version that produced the artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_with: Option<String>,
}

/// Fitted encoder for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EncoderSchema {
    OneHot {
        categories: Vec<String>,
        #[serde(default)]
        drop_first: bool,
    },
    Ordinal {
        categories: Vec<String>,
    },
    StandardScaler {
        mean: f64,
        scale: f64,
    },
    Passthrough,
}

/// One input column and its encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub encoder: EncoderSchema,
}

/// Tree schema (SoA layout). All arrays are indexed by node; root is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSchema {
    /// Split feature index for each internal node.
    pub split_indices: Vec<u32>,
    /// Split threshold for each internal node (`x < threshold` goes left).
    pub thresholds: Vec<f64>,
    /// Left child index (0 on leaves).
    pub children_left: Vec<u32>,
    /// Right child index (0 on leaves).
    pub children_right: Vec<u32>,
    /// Default direction for NaN (true = left).
    pub default_left: Vec<bool>,
    /// Leaf values (ignored on internal nodes).
    pub leaf_values: Vec<f64>,
}

/// Fitted estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EstimatorSchema {
    /// Logistic regression over the encoded features.
    Logistic {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    /// Boosted regression trees; margin is `base_score + Σ leaves`.
    Gbdt {
        num_features: usize,
        #[serde(default)]
        base_score: f64,
        trees: Vec<TreeSchema>,
    },
}

/// Full pipeline artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSchema {
    pub format_version: u32,
    #[serde(default)]
    pub meta: PipelineMetaSchema,
    /// Input columns in encoding order.
    pub columns: Vec<ColumnSchema>,
    pub estimator: EstimatorSchema,
    #[serde(default)]
    pub output_transform: OutputTransform,
    /// Positive-class cutoff: label 1 iff `p1 > threshold`.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}
