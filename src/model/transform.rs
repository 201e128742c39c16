//! Output transformation from estimator margin to positive-class probability.
//!
//! The artifact persists the transform next to the estimator so prediction
//! does not need to know how the model was trained.

use serde::{Deserialize, Serialize};

/// Inference-time output transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTransform {
    /// Logistic sigmoid: p = 1 / (1 + exp(-margin)).
    /// Used for logistic regression and boosted trees trained on log loss.
    #[default]
    Sigmoid,

    /// The estimator already emits a probability.
    Identity,
}

impl OutputTransform {
    /// Positive-class probability for a margin.
    ///
    /// `Identity` passes the value through unchanged; callers validate range.
    #[inline]
    pub fn apply(self, margin: f64) -> f64 {
        match self {
            OutputTransform::Sigmoid => sigmoid(margin),
            OutputTransform::Identity => margin,
        }
    }
}

/// Numerically stable sigmoid.
/// Clamps input to [-500, 500] to prevent overflow.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    let clamped = x.clamp(-500.0, 500.0);
    if clamped >= 0.0 {
        1.0 / (1.0 + (-clamped).exp())
    } else {
        let e = clamped.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sigmoid_function() {
        assert_abs_diff_eq!(sigmoid(0.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(sigmoid(2.0), 0.8807970779778823, epsilon = 1e-12);
        assert_abs_diff_eq!(sigmoid(-2.0), 0.11920292202211755, epsilon = 1e-12);
    }

    #[test]
    fn sigmoid_extremes_stay_in_unit_interval() {
        for x in [-1e6, -700.0, 700.0, 1e6] {
            let p = sigmoid(x);
            assert!((0.0..=1.0).contains(&p), "sigmoid({x}) = {p}");
        }
    }

    #[test]
    fn identity_passes_through() {
        assert_eq!(OutputTransform::Identity.apply(0.3), 0.3);
        assert_eq!(OutputTransform::default(), OutputTransform::Sigmoid);
    }
}
