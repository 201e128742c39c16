//! Typed input record for one person.
//!
//! The [`InputRecord`] holds the 17 attributes the classifier was trained on.
//! Categorical attributes are closed enums, numeric attributes are bounded
//! newtypes, and every field that can be left unanswered is an `Option`
//! (`None` is the missing sentinel). Boolean attributes are plain `bool`s and
//! are never missing.
//!
//! Column order follows [`Field::ALL`], which is also the training-time
//! column order of the model artifact.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Fields
// =============================================================================

/// One named column of the input record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Sex,
    AgeCategory,
    Race,
    Bmi,
    SleepTime,
    Smoking,
    AlcoholDrinking,
    PhysicalActivity,
    DiffWalking,
    GenHealth,
    PhysicalHealth,
    Stroke,
    KidneyDisease,
    MentalHealth,
    Asthma,
    SkinCancer,
    Diabetic,
}

/// How a field is answered and encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Closed set of string options, starts unset.
    Categorical,
    /// Bounded number.
    Numeric,
    /// Yes/no toggle, defaults to `false`.
    Boolean,
}

impl Field {
    /// All fields in column order.
    pub const ALL: [Field; 17] = [
        Field::Sex,
        Field::AgeCategory,
        Field::Race,
        Field::Bmi,
        Field::SleepTime,
        Field::Smoking,
        Field::AlcoholDrinking,
        Field::PhysicalActivity,
        Field::DiffWalking,
        Field::GenHealth,
        Field::PhysicalHealth,
        Field::Stroke,
        Field::KidneyDisease,
        Field::MentalHealth,
        Field::Asthma,
        Field::SkinCancer,
        Field::Diabetic,
    ];

    /// The boolean-origin fields, in column order.
    pub const BOOLEANS: [Field; 8] = [
        Field::Smoking,
        Field::AlcoholDrinking,
        Field::PhysicalActivity,
        Field::DiffWalking,
        Field::Stroke,
        Field::KidneyDisease,
        Field::Asthma,
        Field::SkinCancer,
    ];

    /// Column name as used by the trained model.
    pub fn name(self) -> &'static str {
        match self {
            Field::Sex => "Sex",
            Field::AgeCategory => "AgeCategory",
            Field::Race => "Race",
            Field::Bmi => "BMI",
            Field::SleepTime => "SleepTime",
            Field::Smoking => "Smoking",
            Field::AlcoholDrinking => "AlcoholDrinking",
            Field::PhysicalActivity => "PhysicalActivity",
            Field::DiffWalking => "DiffWalking",
            Field::GenHealth => "GenHealth",
            Field::PhysicalHealth => "PhysicalHealth",
            Field::Stroke => "Stroke",
            Field::KidneyDisease => "KidneyDisease",
            Field::MentalHealth => "MentalHealth",
            Field::Asthma => "Asthma",
            Field::SkinCancer => "SkinCancer",
            Field::Diabetic => "Diabetic",
        }
    }

    /// Look a field up by its column name.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Widget/encoding kind of this field.
    pub fn kind(self) -> FieldKind {
        match self {
            Field::Sex | Field::AgeCategory | Field::Race | Field::GenHealth | Field::Diabetic => {
                FieldKind::Categorical
            }
            Field::Bmi | Field::SleepTime | Field::PhysicalHealth | Field::MentalHealth => {
                FieldKind::Numeric
            }
            Field::Smoking
            | Field::AlcoholDrinking
            | Field::PhysicalActivity
            | Field::DiffWalking
            | Field::Stroke
            | Field::KidneyDisease
            | Field::Asthma
            | Field::SkinCancer => FieldKind::Boolean,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Categorical domains
// =============================================================================

/// A closed categorical domain with training-time string encodings.
pub trait Categorical: Copy + Sized + 'static {
    /// All options, in display order.
    const OPTIONS: &'static [Self];

    /// Training-time encoding (also the display label).
    fn as_str(self) -> &'static str;

    /// Parse an option by its encoding, ignoring ASCII case.
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::OPTIONS
            .iter()
            .copied()
            .find(|opt| opt.as_str().eq_ignore_ascii_case(text))
    }
}

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl Categorical for $name {
            const OPTIONS: &'static [Self] = &[$($name::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

categorical! {
    /// Sex.
    pub enum Sex {
        Female => "Female",
        Male => "Male",
    }
}

categorical! {
    /// Thirteen ordered age bands.
    pub enum AgeCategory {
        From18To24 => "18-24",
        From25To29 => "25-29",
        From30To34 => "30-34",
        From35To39 => "35-39",
        From40To44 => "40-44",
        From45To49 => "45-49",
        From50To54 => "50-54",
        From55To59 => "55-59",
        From60To64 => "60-64",
        From65To69 => "65-69",
        From70To74 => "70-74",
        From75To79 => "75-79",
        EightyOrOlder => "80 or older",
    }
}

categorical! {
    /// Race.
    pub enum Race {
        White => "White",
        Black => "Black",
        Asian => "Asian",
        AmericanIndianAlaskanNative => "American Indian/Alaskan Native",
        Hispanic => "Hispanic",
        Other => "Other",
    }
}

categorical! {
    /// Self-reported general health.
    pub enum GenHealth {
        Poor => "Poor",
        Fair => "Fair",
        Good => "Good",
        VeryGood => "Very good",
        Excellent => "Excellent",
    }
}

categorical! {
    /// Diabetes status. Encodings match the training data verbatim.
    pub enum Diabetic {
        Yes => "Yes",
        No => "No",
        NoBorderline => "No, borderline diabetes",
        YesDuringPregnancy => "Yes (during pregnancy)",
    }
}

// =============================================================================
// Numeric domains
// =============================================================================

/// A value fell outside its field's numeric domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("value {value} is below the minimum {min}")]
    BelowMinimum { value: f64, min: f64 },

    #[error("value {value} is above the maximum {max}")]
    AboveMaximum { value: f64, max: f64 },

    #[error("value {value} must be a whole number")]
    NotInteger { value: f64 },

    #[error("value is not a finite number")]
    NotFinite,
}

/// Inclusive numeric range, optionally restricted to whole numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericDomain {
    pub min: f64,
    pub max: Option<f64>,
    pub integer: bool,
}

impl NumericDomain {
    /// Check that `value` lies inside the domain.
    pub fn check(&self, value: f64) -> Result<(), DomainError> {
        if !value.is_finite() {
            return Err(DomainError::NotFinite);
        }
        if value < self.min {
            return Err(DomainError::BelowMinimum { value, min: self.min });
        }
        match self.max {
            Some(max) if value > max => return Err(DomainError::AboveMaximum { value, max }),
            _ => {}
        }
        if self.integer && value.fract() != 0.0 {
            return Err(DomainError::NotInteger { value });
        }
        Ok(())
    }
}

/// Body mass index in `[10.0, 50.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Bmi(f64);

impl Bmi {
    pub const DOMAIN: NumericDomain = NumericDomain {
        min: 10.0,
        max: Some(50.0),
        integer: false,
    };

    pub fn new(value: f64) -> Result<Self, DomainError> {
        Self::DOMAIN.check(value)?;
        Ok(Self(value))
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Average hours of sleep per 24 hours, `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SleepTime(u8);

impl SleepTime {
    pub const DOMAIN: NumericDomain = NumericDomain {
        min: 1.0,
        max: Some(12.0),
        integer: true,
    };

    pub const DEFAULT: SleepTime = SleepTime(8);

    pub fn new(value: f64) -> Result<Self, DomainError> {
        Self::DOMAIN.check(value)?;
        Ok(Self(value as u8))
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for SleepTime {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Number of days (in the past 30) a condition was present. Non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct HealthDays(u32);

impl HealthDays {
    pub const DOMAIN: NumericDomain = NumericDomain {
        min: 0.0,
        max: None,
        integer: true,
    };

    pub fn new(value: f64) -> Result<Self, DomainError> {
        Self::DOMAIN.check(value)?;
        if value > u32::MAX as f64 {
            return Err(DomainError::AboveMaximum {
                value,
                max: u32::MAX as f64,
            });
        }
        Ok(Self(value as u32))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

macro_rules! numeric_conversions {
    ($($name:ident),+) => {
        $(
            impl TryFrom<f64> for $name {
                type Error = DomainError;

                fn try_from(value: f64) -> Result<Self, Self::Error> {
                    $name::new(value)
                }
            }

            impl From<$name> for f64 {
                fn from(value: $name) -> f64 {
                    value.0 as f64
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )+
    };
}

numeric_conversions!(Bmi, SleepTime, HealthDays);

// =============================================================================
// Input record
// =============================================================================

/// One row of user answers.
///
/// [`Default`] is the initial form state: categoricals and BMI unset,
/// sleep at 8 hours, health-day counts at 0, every toggle off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputRecord {
    pub sex: Option<Sex>,
    pub age_category: Option<AgeCategory>,
    pub race: Option<Race>,
    pub bmi: Option<Bmi>,
    pub sleep_time: Option<SleepTime>,
    pub smoking: bool,
    pub alcohol_drinking: bool,
    pub physical_activity: bool,
    pub diff_walking: bool,
    pub gen_health: Option<GenHealth>,
    pub physical_health: Option<HealthDays>,
    pub stroke: bool,
    pub kidney_disease: bool,
    pub mental_health: Option<HealthDays>,
    pub asthma: bool,
    pub skin_cancer: bool,
    pub diabetic: Option<Diabetic>,
}

impl Default for InputRecord {
    fn default() -> Self {
        Self {
            sex: None,
            age_category: None,
            race: None,
            bmi: None,
            sleep_time: Some(SleepTime::DEFAULT),
            smoking: false,
            alcohol_drinking: false,
            physical_activity: false,
            diff_walking: false,
            gen_health: None,
            physical_health: Some(HealthDays::default()),
            stroke: false,
            kidney_disease: false,
            mental_health: Some(HealthDays::default()),
            asthma: false,
            skin_cancer: false,
            diabetic: None,
        }
    }
}

impl InputRecord {
    /// Whether `field` holds a value. Boolean fields always do.
    pub fn is_set(&self, field: Field) -> bool {
        match field {
            Field::Sex => self.sex.is_some(),
            Field::AgeCategory => self.age_category.is_some(),
            Field::Race => self.race.is_some(),
            Field::Bmi => self.bmi.is_some(),
            Field::SleepTime => self.sleep_time.is_some(),
            Field::GenHealth => self.gen_health.is_some(),
            Field::PhysicalHealth => self.physical_health.is_some(),
            Field::MentalHealth => self.mental_health.is_some(),
            Field::Diabetic => self.diabetic.is_some(),
            Field::Smoking
            | Field::AlcoholDrinking
            | Field::PhysicalActivity
            | Field::DiffWalking
            | Field::Stroke
            | Field::KidneyDisease
            | Field::Asthma
            | Field::SkinCancer => true,
        }
    }

    /// Value of a boolean field, `None` for any other kind.
    pub fn flag(&self, field: Field) -> Option<bool> {
        Some(match field {
            Field::Smoking => self.smoking,
            Field::AlcoholDrinking => self.alcohol_drinking,
            Field::PhysicalActivity => self.physical_activity,
            Field::DiffWalking => self.diff_walking,
            Field::Stroke => self.stroke,
            Field::KidneyDisease => self.kidney_disease,
            Field::Asthma => self.asthma,
            Field::SkinCancer => self.skin_cancer,
            _ => return None,
        })
    }

    /// Mutable access to a boolean field, `None` for any other kind.
    pub fn flag_mut(&mut self, field: Field) -> Option<&mut bool> {
        Some(match field {
            Field::Smoking => &mut self.smoking,
            Field::AlcoholDrinking => &mut self.alcohol_drinking,
            Field::PhysicalActivity => &mut self.physical_activity,
            Field::DiffWalking => &mut self.diff_walking,
            Field::Stroke => &mut self.stroke,
            Field::KidneyDisease => &mut self.kidney_disease,
            Field::Asthma => &mut self.asthma,
            Field::SkinCancer => &mut self.skin_cancer,
            _ => return None,
        })
    }

    /// Human-readable current value, `None` when unset.
    pub fn display_value(&self, field: Field) -> Option<String> {
        match field {
            Field::Sex => self.sex.map(|v| v.to_string()),
            Field::AgeCategory => self.age_category.map(|v| v.to_string()),
            Field::Race => self.race.map(|v| v.to_string()),
            Field::Bmi => self.bmi.map(|v| format!("{:.2}", v.get())),
            Field::SleepTime => self.sleep_time.map(|v| v.to_string()),
            Field::GenHealth => self.gen_health.map(|v| v.to_string()),
            Field::PhysicalHealth => self.physical_health.map(|v| v.to_string()),
            Field::MentalHealth => self.mental_health.map(|v| v.to_string()),
            Field::Diabetic => self.diabetic.map(|v| v.to_string()),
            flag => self
                .flag(flag)
                .map(|on| if on { "Yes" } else { "No" }.to_string()),
        }
    }
}
