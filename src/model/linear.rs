//! Linear (logistic) estimator.

use ndarray::{Array1, ArrayView1};

/// Linear model over the encoded feature vector (weights + bias).
///
/// ```text
/// margin = Σ(feature[i] × weight[i]) + bias
/// ```
///
/// # Example
///
/// ```
/// use heart_predict::model::LinearModel;
/// use ndarray::array;
///
/// let model = LinearModel::new(array![0.5, -0.25], 0.1);
/// assert_eq!(model.n_features(), 2);
/// assert_eq!(model.bias(), 0.1);
/// assert_eq!(model.margin(array![2.0, 4.0].view()), 0.1);
/// ```
#[derive(Debug, Clone)]
pub struct LinearModel {
    weights: Array1<f64>,
    bias: f64,
}

impl LinearModel {
    pub fn new(weights: Array1<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    #[inline]
    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    /// Raw margin for one encoded row.
    pub fn margin(&self, features: ArrayView1<'_, f64>) -> f64 {
        debug_assert_eq!(
            features.len(),
            self.n_features(),
            "feature count mismatch: got {}, need {}",
            features.len(),
            self.n_features()
        );
        features.dot(&self.weights) + self.bias
    }
}
