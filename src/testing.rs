//! Testing utilities for heart-predict.
//!
//! Canned records and stand-in classifiers shared by unit tests,
//! integration tests and benches.
//!
//! ```ignore
//! use heart_predict::testing::{FixedClassifier, complete_input};
//! ```

use std::cell::RefCell;

use crate::model::{Classifier, Label, ModelError};
use crate::normalize::FeatureRow;
use crate::record::{AgeCategory, Bmi, Diabetic, GenHealth, HealthDays, InputRecord, Race, Sex, SleepTime};
use crate::validate::CompleteRecord;

// =============================================================================
// Records
// =============================================================================

/// A fully answered record: male, 50-54, White, BMI 27.5, 7 hours of sleep,
/// good health, no conditions, not diabetic.
pub fn complete_input() -> InputRecord {
    let c = complete_record();
    InputRecord {
        sex: Some(c.sex),
        age_category: Some(c.age_category),
        race: Some(c.race),
        bmi: Some(c.bmi),
        sleep_time: Some(c.sleep_time),
        smoking: c.smoking,
        alcohol_drinking: c.alcohol_drinking,
        physical_activity: c.physical_activity,
        diff_walking: c.diff_walking,
        gen_health: Some(c.gen_health),
        physical_health: Some(c.physical_health),
        stroke: c.stroke,
        kidney_disease: c.kidney_disease,
        mental_health: Some(c.mental_health),
        asthma: c.asthma,
        skin_cancer: c.skin_cancer,
        diabetic: Some(c.diabetic),
    }
}

/// The validated form of [`complete_input`].
pub fn complete_record() -> CompleteRecord {
    CompleteRecord {
        sex: Sex::Male,
        age_category: AgeCategory::From50To54,
        race: Race::White,
        bmi: Bmi::new(27.5).unwrap(),
        sleep_time: SleepTime::new(7.0).unwrap(),
        smoking: false,
        alcohol_drinking: false,
        physical_activity: false,
        diff_walking: false,
        gen_health: GenHealth::Good,
        physical_health: HealthDays::default(),
        stroke: false,
        kidney_disease: false,
        mental_health: HealthDays::default(),
        asthma: false,
        skin_cancer: false,
        diabetic: Diabetic::No,
    }
}

// =============================================================================
// Stand-in classifiers
// =============================================================================

/// Returns the same answer for every row.
#[derive(Debug, Clone, Copy)]
pub struct FixedClassifier {
    label: Label,
    probabilities: [f64; 2],
}

impl FixedClassifier {
    pub fn new(label: Label, probabilities: [f64; 2]) -> Self {
        Self {
            label,
            probabilities,
        }
    }
}

impl Classifier for FixedClassifier {
    fn predict(&self, _row: &FeatureRow) -> Result<Label, ModelError> {
        Ok(self.label)
    }

    fn predict_proba(&self, _row: &FeatureRow) -> Result<[f64; 2], ModelError> {
        Ok(self.probabilities)
    }
}

/// Fails every call with [`ModelError::Provider`].
#[derive(Debug, Clone)]
pub struct FaultyClassifier {
    message: String,
}

impl FaultyClassifier {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Classifier for FaultyClassifier {
    fn predict(&self, _row: &FeatureRow) -> Result<Label, ModelError> {
        Err(ModelError::Provider(self.message.clone()))
    }

    fn predict_proba(&self, _row: &FeatureRow) -> Result<[f64; 2], ModelError> {
        Err(ModelError::Provider(self.message.clone()))
    }
}

/// Wraps a classifier and keeps every row passed to `predict`.
#[derive(Debug)]
pub struct RecordingClassifier<C> {
    inner: C,
    rows: RefCell<Vec<FeatureRow>>,
}

impl<C: Classifier> RecordingClassifier<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            rows: RefCell::new(Vec::new()),
        }
    }

    /// Number of `predict` calls so far.
    pub fn calls(&self) -> usize {
        self.rows.borrow().len()
    }

    /// Rows seen so far, oldest first.
    pub fn rows(&self) -> Vec<FeatureRow> {
        self.rows.borrow().clone()
    }
}

impl<C: Classifier> Classifier for RecordingClassifier<C> {
    fn predict(&self, row: &FeatureRow) -> Result<Label, ModelError> {
        self.rows.borrow_mut().push(row.clone());
        self.inner.predict(row)
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<[f64; 2], ModelError> {
        self.inner.predict_proba(row)
    }
}
