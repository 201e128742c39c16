//! Property tests over arbitrary form answers.

mod common;

use proptest::option;
use proptest::prelude::*;
use proptest::sample::select;

use common::load_model;
use heart_predict::model::Classifier;
use heart_predict::normalize::{FeatureValue, normalize, yes_no};
use heart_predict::record::{
    AgeCategory, Bmi, Categorical, Diabetic, Field, FieldKind, GenHealth, HealthDays, InputRecord,
    Race, Sex, SleepTime,
};
use heart_predict::session::{Session, Stage};
use heart_predict::testing::{FixedClassifier, RecordingClassifier};
use heart_predict::validate::{CompleteRecord, Validation, validate};
use heart_predict::Label;

// =============================================================================
// Strategies
// =============================================================================

fn arb_choice<C: Categorical + std::fmt::Debug>() -> impl Strategy<Value = C> {
    select(C::OPTIONS)
}

fn arb_bmi() -> impl Strategy<Value = Bmi> {
    (10.0f64..=50.0).prop_map(|x| Bmi::new(x).unwrap())
}

fn arb_sleep() -> impl Strategy<Value = SleepTime> {
    (1u8..=12).prop_map(|h| SleepTime::new(f64::from(h)).unwrap())
}

fn arb_days() -> impl Strategy<Value = HealthDays> {
    (0u32..=30).prop_map(|d| HealthDays::new(f64::from(d)).unwrap())
}

/// Arbitrary form state, with any combination of unset fields.
fn arb_input() -> impl Strategy<Value = InputRecord> {
    (
        (
            option::of(arb_choice::<Sex>()),
            option::of(arb_choice::<AgeCategory>()),
            option::of(arb_choice::<Race>()),
            option::of(arb_bmi()),
            option::of(arb_sleep()),
            option::of(arb_choice::<GenHealth>()),
            option::of(arb_days()),
            option::of(arb_days()),
            option::of(arb_choice::<Diabetic>()),
        ),
        prop::array::uniform8(any::<bool>()),
    )
        .prop_map(|((sex, age, race, bmi, sleep, health, phys, mental, diabetic), flags)| {
            InputRecord {
                sex,
                age_category: age,
                race,
                bmi,
                sleep_time: sleep,
                smoking: flags[0],
                alcohol_drinking: flags[1],
                physical_activity: flags[2],
                diff_walking: flags[3],
                gen_health: health,
                physical_health: phys,
                stroke: flags[4],
                kidney_disease: flags[5],
                mental_health: mental,
                asthma: flags[6],
                skin_cancer: flags[7],
                diabetic,
            }
        })
}

/// Arbitrary fully answered record.
fn arb_complete() -> impl Strategy<Value = CompleteRecord> {
    (
        (
            arb_choice::<Sex>(),
            arb_choice::<AgeCategory>(),
            arb_choice::<Race>(),
            arb_bmi(),
            arb_sleep(),
            arb_choice::<GenHealth>(),
            arb_days(),
            arb_days(),
            arb_choice::<Diabetic>(),
        ),
        prop::array::uniform8(any::<bool>()),
    )
        .prop_map(|((sex, age, race, bmi, sleep, health, phys, mental, diabetic), flags)| {
            CompleteRecord {
                sex,
                age_category: age,
                race,
                bmi,
                sleep_time: sleep,
                smoking: flags[0],
                alcohol_drinking: flags[1],
                physical_activity: flags[2],
                diff_walking: flags[3],
                gen_health: health,
                physical_health: phys,
                stroke: flags[4],
                kidney_disease: flags[5],
                mental_health: mental,
                asthma: flags[6],
                skin_cancer: flags[7],
                diabetic,
            }
        })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Incomplete records list exactly their unset fields and never reach the model.
    #[test]
    fn incomplete_records_never_reach_the_model(record in arb_input()) {
        let unset: Vec<Field> = Field::ALL.into_iter().filter(|&f| !record.is_set(f)).collect();
        let model = RecordingClassifier::new(FixedClassifier::new(Label::NoDisease, [0.5, 0.5]));
        let mut session = Session::with_form(record.into());
        let stage = session.submit(&model).clone();

        if unset.is_empty() {
            prop_assert!(matches!(stage, Stage::Result(_)));
            prop_assert_eq!(model.calls(), 1);
        } else {
            prop_assert_eq!(stage, Stage::IncompleteDialog(unset.clone()));
            prop_assert_eq!(validate(&record), Validation::Incomplete(unset));
            prop_assert_eq!(model.calls(), 0);
        }
        prop_assert_eq!(session.record(), record);
    }

    /// Booleans become "Yes"/"No"; everything else keeps its value.
    #[test]
    fn normalize_only_rewrites_booleans(record in arb_complete()) {
        let row = normalize(record);
        prop_assert_eq!(row.len(), Field::ALL.len());

        let input = InputRecord {
            sex: Some(record.sex),
            age_category: Some(record.age_category),
            race: Some(record.race),
            bmi: Some(record.bmi),
            sleep_time: Some(record.sleep_time),
            smoking: record.smoking,
            alcohol_drinking: record.alcohol_drinking,
            physical_activity: record.physical_activity,
            diff_walking: record.diff_walking,
            gen_health: Some(record.gen_health),
            physical_health: Some(record.physical_health),
            stroke: record.stroke,
            kidney_disease: record.kidney_disease,
            mental_health: Some(record.mental_health),
            asthma: record.asthma,
            skin_cancer: record.skin_cancer,
            diabetic: Some(record.diabetic),
        };

        for (field, (name, value)) in Field::ALL.into_iter().zip(row.iter()) {
            prop_assert_eq!(name, field.name());
            match field.kind() {
                FieldKind::Boolean => {
                    let flag = input.flag(field).unwrap();
                    prop_assert_eq!(value, &FeatureValue::from(yes_no(flag)));
                }
                FieldKind::Categorical => {
                    let displayed = input.display_value(field);
                    prop_assert_eq!(value.as_category(), displayed.as_deref());
                }
                FieldKind::Numeric => {
                    let expected = match field {
                        Field::Bmi => record.bmi.get(),
                        Field::SleepTime => f64::from(record.sleep_time),
                        Field::PhysicalHealth => f64::from(record.physical_health),
                        _ => f64::from(record.mental_health),
                    };
                    prop_assert_eq!(value.as_number(), Some(expected));
                }
            }
        }
    }

    /// Both fixture models return a valid two-class distribution.
    #[test]
    fn probabilities_form_a_distribution(record in arb_complete()) {
        let row = normalize(record);
        for name in ["logistic", "gbdt"] {
            let model = load_model(name);
            let [p0, p1] = model.predict_proba(&row).unwrap();
            prop_assert!((0.0..=1.0).contains(&p0), "{}: p0 = {}", name, p0);
            prop_assert!((0.0..=1.0).contains(&p1), "{}: p1 = {}", name, p1);
            prop_assert!((p0 + p1 - 1.0).abs() <= 1e-6, "{}: sum = {}", name, p0 + p1);

            let label = model.predict(&row).unwrap();
            prop_assert_eq!(label == Label::HeartDisease, p1 > model.threshold());
        }
    }
}
