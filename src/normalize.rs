//! Normalization of a complete record into the model's feature encoding.
//!
//! The classifier was trained on categorical strings for every yes/no
//! attribute, so booleans go through [`yes_no`]. Categoricals map to their
//! training strings and numerics to `f64`; nothing else changes.

use std::fmt;

use crate::record::{Categorical, Field};
use crate::validate::CompleteRecord;

/// One encoded cell of a [`FeatureRow`].
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Category(String),
    Number(f64),
}

impl FeatureValue {
    pub fn as_category(&self) -> Option<&str> {
        match self {
            FeatureValue::Category(s) => Some(s),
            FeatureValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(x) => Some(*x),
            FeatureValue::Category(_) => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Category(s) => f.write_str(s),
            FeatureValue::Number(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Category(value.to_string())
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Number(value)
    }
}

/// A single model-ready row: named columns in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureRow {
    columns: Vec<(String, FeatureValue)>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. A repeated name replaces the earlier value.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<FeatureValue>) {
        let name = name.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.columns.push((name, value)),
        }
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        self.push(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Encode a boolean answer the way the training data does.
#[inline]
pub fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Convert a complete record into the model's feature encoding.
pub fn normalize(r: CompleteRecord) -> FeatureRow {
    let mut row = FeatureRow::new();
    for field in Field::ALL {
        let value: FeatureValue = match field {
            Field::Sex => r.sex.as_str().into(),
            Field::AgeCategory => r.age_category.as_str().into(),
            Field::Race => r.race.as_str().into(),
            Field::Bmi => r.bmi.get().into(),
            Field::SleepTime => f64::from(r.sleep_time).into(),
            Field::Smoking => yes_no(r.smoking).into(),
            Field::AlcoholDrinking => yes_no(r.alcohol_drinking).into(),
            Field::PhysicalActivity => yes_no(r.physical_activity).into(),
            Field::DiffWalking => yes_no(r.diff_walking).into(),
            Field::GenHealth => r.gen_health.as_str().into(),
            Field::PhysicalHealth => f64::from(r.physical_health).into(),
            Field::Stroke => yes_no(r.stroke).into(),
            Field::KidneyDisease => yes_no(r.kidney_disease).into(),
            Field::MentalHealth => f64::from(r.mental_health).into(),
            Field::Asthma => yes_no(r.asthma).into(),
            Field::SkinCancer => yes_no(r.skin_cancer).into(),
            Field::Diabetic => r.diabetic.as_str().into(),
        };
        row.push(field.name(), value);
    }
    row
}
