//! Inference over one normalized row.
//!
//! [`infer`] is the only place the model provider is called. Whatever the
//! provider reports goes into an [`Outcome`]; nothing propagates further.

use crate::model::{Classifier, Label};
use crate::normalize::FeatureRow;

/// Allowed deviation of `p0 + p1` from 1.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// A successful prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: Label,
    /// `[P(no disease), P(disease)]`.
    pub probabilities: [f64; 2],
}

impl Prediction {
    /// Probability of the given outcome.
    #[inline]
    pub fn probability(&self, label: Label) -> f64 {
        self.probabilities[label.index()]
    }
}

/// Why inference did not produce a prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceFailure {
    pub reason: String,
}

/// Result of [`infer`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Prediction(Prediction),
    Failure(InferenceFailure),
}

impl Outcome {
    fn failure(reason: impl Into<String>) -> Self {
        Outcome::Failure(InferenceFailure {
            reason: reason.into(),
        })
    }
}

/// Score `row` with `model`.
pub fn infer<C: Classifier + ?Sized>(model: &C, row: &FeatureRow) -> Outcome {
    let label = match model.predict(row) {
        Ok(label) => label,
        Err(err) => {
            log::warn!("predict failed: {err}");
            return Outcome::failure(err.to_string());
        }
    };
    let probabilities = match model.predict_proba(row) {
        Ok(p) => p,
        Err(err) => {
            log::warn!("predict_proba failed: {err}");
            return Outcome::failure(err.to_string());
        }
    };

    if let Err(reason) = check_distribution(probabilities) {
        log::warn!("model returned invalid probabilities {probabilities:?}");
        return Outcome::failure(reason);
    }

    log::debug!("prediction {label:?} with probabilities {probabilities:?}");
    Outcome::Prediction(Prediction {
        label,
        probabilities,
    })
}

fn check_distribution([p0, p1]: [f64; 2]) -> Result<(), String> {
    let in_range = |p: f64| (0.0..=1.0).contains(&p);
    if !in_range(p0) || !in_range(p1) {
        return Err(format!("probabilities [{p0}, {p1}] are outside [0, 1]"));
    }
    if (p0 + p1 - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(format!("probabilities [{p0}, {p1}] do not sum to 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FaultyClassifier, FixedClassifier};

    #[test]
    fn prediction_passes_through() {
        let model = FixedClassifier::new(Label::HeartDisease, [0.25, 0.75]);
        let outcome = infer(&model, &FeatureRow::new());
        let Outcome::Prediction(p) = outcome else {
            panic!("expected prediction, got {outcome:?}");
        };
        assert_eq!(p.label, Label::HeartDisease);
        assert_eq!(p.probability(Label::NoDisease), 0.25);
    }

    #[test]
    fn provider_error_becomes_failure() {
        let model = FaultyClassifier::new("simulated fault");
        assert_eq!(
            infer(&model, &FeatureRow::new()),
            Outcome::Failure(InferenceFailure {
                reason: "simulated fault".into()
            })
        );
    }

    #[test]
    fn invalid_distribution_becomes_failure() {
        let model = FixedClassifier::new(Label::NoDisease, [0.7, 0.7]);
        assert!(matches!(infer(&model, &FeatureRow::new()), Outcome::Failure(_)));

        let model = FixedClassifier::new(Label::NoDisease, [1.2, -0.2]);
        assert!(matches!(infer(&model, &FeatureRow::new()), Outcome::Failure(_)));
    }

    #[test]
    fn works_through_trait_objects() {
        let model: Box<dyn Classifier> = Box::new(FixedClassifier::new(Label::NoDisease, [0.9, 0.1]));
        assert!(matches!(infer(&model, &FeatureRow::new()), Outcome::Prediction(_)));
        assert!(matches!(infer(model.as_ref(), &FeatureRow::new()), Outcome::Prediction(_)));
    }
}
