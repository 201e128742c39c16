//! Form collection: widget descriptors and the editable form state.
//!
//! Each [`Field`] maps to one widget ([`FieldSpec`]). The [`FormState`] holds
//! the current widget values and hands out a fresh [`InputRecord`] on every
//! call to [`FormState::record`]; it never shares in-progress answers.

use thiserror::Error;

use crate::record::{
    AgeCategory, Bmi, Categorical, Diabetic, DomainError, Field, GenHealth, HealthDays,
    InputRecord, NumericDomain, Race, Sex, SleepTime,
};

// =============================================================================
// Widget descriptors
// =============================================================================

/// Page section a widget is rendered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Demographics at the top of the page (no heading).
    Profile,
    Habits,
    HealthHistory,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Profile, Section::Habits, Section::HealthHistory];

    /// Heading shown above the section, if any.
    pub fn title(self) -> Option<&'static str> {
        match self {
            Section::Profile => None,
            Section::Habits => Some("Habits"),
            Section::HealthHistory => Some("Health Status and History"),
        }
    }
}

/// Input widget for a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    /// Selection list; starts with no selection.
    Select {
        options: Vec<&'static str>,
        placeholder: &'static str,
    },
    /// Bounded numeric entry.
    Number {
        domain: NumericDomain,
        default: Option<f64>,
    },
    /// Bounded integer slider.
    Slider { domain: NumericDomain, default: f64 },
    /// On/off toggle, starts off.
    Toggle,
}

/// Widget description for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub field: Field,
    pub label: &'static str,
    pub section: Section,
    pub widget: Widget,
}

fn select<C: Categorical>(placeholder: &'static str) -> Widget {
    Widget::Select {
        options: C::OPTIONS.iter().map(|opt| opt.as_str()).collect(),
        placeholder,
    }
}

impl FieldSpec {
    /// Widget description for `field`.
    pub fn for_field(field: Field) -> FieldSpec {
        let (label, section, widget) = match field {
            Field::Sex => ("Sex", Section::Profile, select::<Sex>("Select your gender")),
            Field::AgeCategory => (
                "Age Category",
                Section::Profile,
                select::<AgeCategory>("Select your age category"),
            ),
            Field::Race => ("Race", Section::Profile, select::<Race>("Select your race")),
            Field::Bmi => (
                "BMI",
                Section::Profile,
                Widget::Number {
                    domain: Bmi::DOMAIN,
                    default: None,
                },
            ),
            Field::SleepTime => (
                "On average, how many hours of sleep do you get in a 24-hour period?",
                Section::Profile,
                Widget::Slider {
                    domain: SleepTime::DOMAIN,
                    default: f64::from(SleepTime::DEFAULT),
                },
            ),
            Field::Smoking => (
                "Have you smoked at least once in the past 30 days?",
                Section::Habits,
                Widget::Toggle,
            ),
            Field::AlcoholDrinking => (
                "Have you had at least one drink of alcohol in the past 30 days?",
                Section::Habits,
                Widget::Toggle,
            ),
            Field::PhysicalActivity => (
                "Have you participated in any physical activities or exercises in the past 30 days?",
                Section::Habits,
                Widget::Toggle,
            ),
            Field::DiffWalking => (
                "Do you have serious difficulty walking or climbing stairs?",
                Section::HealthHistory,
                Widget::Toggle,
            ),
            Field::GenHealth => (
                "Would you say that in general your health is...",
                Section::HealthHistory,
                select::<GenHealth>("Select your general health status"),
            ),
            Field::PhysicalHealth => (
                "How many days during the past 30 days was your physical health not good?",
                Section::HealthHistory,
                Widget::Number {
                    domain: HealthDays::DOMAIN,
                    default: Some(0.0),
                },
            ),
            Field::Stroke => (
                "Do you have a history of stroke?",
                Section::HealthHistory,
                Widget::Toggle,
            ),
            Field::KidneyDisease => (
                "Do you currently suffer from or have a history of kidney disease?",
                Section::HealthHistory,
                Widget::Toggle,
            ),
            Field::MentalHealth => (
                "How many days during the past 30 days was your mental health not good?",
                Section::HealthHistory,
                Widget::Number {
                    domain: HealthDays::DOMAIN,
                    default: Some(0.0),
                },
            ),
            Field::Asthma => ("Do you have asthma?", Section::HealthHistory, Widget::Toggle),
            Field::SkinCancer => (
                "Do you currently suffer from or have a history of skin cancer?",
                Section::HealthHistory,
                Widget::Toggle,
            ),
            Field::Diabetic => (
                "Do you currently suffer from diabetes?",
                Section::HealthHistory,
                select::<Diabetic>("Diabetic"),
            ),
        };

        FieldSpec {
            field,
            label,
            section,
            widget,
        }
    }

    /// Descriptors for every field, in column order.
    pub fn all() -> Vec<FieldSpec> {
        Field::ALL.into_iter().map(FieldSpec::for_field).collect()
    }
}

// =============================================================================
// Form state
// =============================================================================

/// A widget rejected the user's entry. The previous value is kept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("'{input}' is not an option for {field}")]
    UnknownOption { field: Field, input: String },

    #[error("'{input}' is not a number ({field})")]
    InvalidNumber { field: Field, input: String },

    #[error("{field}: {source}")]
    OutOfDomain {
        field: Field,
        #[source]
        source: DomainError,
    },

    #[error("'{input}' is not yes or no ({field})")]
    InvalidToggle { field: Field, input: String },
}

/// Current widget values for one user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: InputRecord,
}

impl From<InputRecord> for FormState {
    fn from(values: InputRecord) -> Self {
        Self { values }
    }
}

impl FormState {
    /// Fresh form: nothing selected, numeric defaults, toggles off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the input record from the current widget values.
    pub fn record(&self) -> InputRecord {
        self.values
    }

    /// Apply a typed edit directly.
    pub fn update(&mut self, edit: impl FnOnce(&mut InputRecord)) {
        edit(&mut self.values);
    }

    /// Set `field` from user text.
    ///
    /// Selects take the option text (any case) or its 1-based index; numbers
    /// must parse and fall inside the field's domain; toggles take
    /// yes/no/true/false/y/n/1/0.
    pub fn set(&mut self, field: Field, input: &str) -> Result<(), FieldError> {
        let text = input.trim();
        let v = &mut self.values;
        match field {
            Field::Sex => v.sex = Some(pick::<Sex>(field, text)?),
            Field::AgeCategory => v.age_category = Some(pick::<AgeCategory>(field, text)?),
            Field::Race => v.race = Some(pick::<Race>(field, text)?),
            Field::GenHealth => v.gen_health = Some(pick::<GenHealth>(field, text)?),
            Field::Diabetic => v.diabetic = Some(pick::<Diabetic>(field, text)?),
            Field::Bmi => v.bmi = Some(number(field, text, Bmi::new)?),
            Field::SleepTime => v.sleep_time = Some(number(field, text, SleepTime::new)?),
            Field::PhysicalHealth => {
                v.physical_health = Some(number(field, text, HealthDays::new)?)
            }
            Field::MentalHealth => v.mental_health = Some(number(field, text, HealthDays::new)?),
            flag => {
                let on = toggle(flag, text)?;
                if let Some(slot) = v.flag_mut(flag) {
                    *slot = on;
                }
            }
        }
        log::trace!("form field {field} set to {text:?}");
        Ok(())
    }

    /// Return `field` to its initial state.
    pub fn clear(&mut self, field: Field) {
        let initial = InputRecord::default();
        let v = &mut self.values;
        match field {
            Field::Sex => v.sex = initial.sex,
            Field::AgeCategory => v.age_category = initial.age_category,
            Field::Race => v.race = initial.race,
            Field::Bmi => v.bmi = initial.bmi,
            Field::SleepTime => v.sleep_time = initial.sleep_time,
            Field::GenHealth => v.gen_health = initial.gen_health,
            Field::PhysicalHealth => v.physical_health = initial.physical_health,
            Field::MentalHealth => v.mental_health = initial.mental_health,
            Field::Diabetic => v.diabetic = initial.diabetic,
            flag => {
                if let Some(slot) = v.flag_mut(flag) {
                    *slot = false;
                }
            }
        }
    }

    /// Reset every widget.
    pub fn reset(&mut self) {
        self.values = InputRecord::default();
    }
}

fn pick<C: Categorical>(field: Field, text: &str) -> Result<C, FieldError> {
    let by_index = text
        .parse::<usize>()
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|i| C::OPTIONS.get(i).copied());
    by_index.or_else(|| C::parse(text)).ok_or_else(|| FieldError::UnknownOption {
        field,
        input: text.to_string(),
    })
}

fn number<T>(
    field: Field,
    text: &str,
    build: impl FnOnce(f64) -> Result<T, DomainError>,
) -> Result<T, FieldError> {
    let value: f64 = text.parse().map_err(|_| FieldError::InvalidNumber {
        field,
        input: text.to_string(),
    })?;
    build(value).map_err(|source| FieldError::OutOfDomain { field, source })
}

fn toggle(field: Field, text: &str) -> Result<bool, FieldError> {
    match text.to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" | "on" => Ok(true),
        "n" | "no" | "false" | "0" | "off" => Ok(false),
        _ => Err(FieldError::InvalidToggle {
            field,
            input: text.to_string(),
        }),
    }
}
