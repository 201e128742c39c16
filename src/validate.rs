//! Submission validation.
//!
//! [`validate`] is the gate in front of inference: a record either proves it
//! is complete (and becomes a [`CompleteRecord`]) or names the fields the user
//! still has to answer.

use crate::record::{
    AgeCategory, Bmi, Diabetic, Field, GenHealth, HealthDays, InputRecord, Race, Sex, SleepTime,
};

/// An input record with every field answered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompleteRecord {
    pub sex: Sex,
    pub age_category: AgeCategory,
    pub race: Race,
    pub bmi: Bmi,
    pub sleep_time: SleepTime,
    pub smoking: bool,
    pub alcohol_drinking: bool,
    pub physical_activity: bool,
    pub diff_walking: bool,
    pub gen_health: GenHealth,
    pub physical_health: HealthDays,
    pub stroke: bool,
    pub kidney_disease: bool,
    pub mental_health: HealthDays,
    pub asthma: bool,
    pub skin_cancer: bool,
    pub diabetic: Diabetic,
}

/// Result of [`validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    /// Every field holds a value.
    Complete(CompleteRecord),
    /// The listed fields (column order) are still unset.
    Incomplete(Vec<Field>),
}

/// Check that every field of `record` holds a value.
pub fn validate(record: &InputRecord) -> Validation {
    match complete(record) {
        Some(done) => Validation::Complete(done),
        None => Validation::Incomplete(
            Field::ALL
                .into_iter()
                .filter(|&field| !record.is_set(field))
                .collect(),
        ),
    }
}

fn complete(r: &InputRecord) -> Option<CompleteRecord> {
    Some(CompleteRecord {
        sex: r.sex?,
        age_category: r.age_category?,
        race: r.race?,
        bmi: r.bmi?,
        sleep_time: r.sleep_time?,
        smoking: r.smoking,
        alcohol_drinking: r.alcohol_drinking,
        physical_activity: r.physical_activity,
        diff_walking: r.diff_walking,
        gen_health: r.gen_health?,
        physical_health: r.physical_health?,
        stroke: r.stroke,
        kidney_disease: r.kidney_disease,
        mental_health: r.mental_health?,
        asthma: r.asthma,
        skin_cancer: r.skin_cancer,
        diabetic: r.diabetic?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::complete_input;

    #[test]
    fn default_record_lists_all_unset_fields() {
        let Validation::Incomplete(missing) = validate(&InputRecord::default()) else {
            panic!("default record must be incomplete");
        };
        assert_eq!(
            missing,
            vec![
                Field::Sex,
                Field::AgeCategory,
                Field::Race,
                Field::Bmi,
                Field::GenHealth,
                Field::Diabetic,
            ]
        );
    }

    #[test]
    fn complete_record_passes() {
        let record = complete_input();
        let Validation::Complete(done) = validate(&record) else {
            panic!("expected complete");
        };
        assert_eq!(done.sex, Sex::Male);
        assert_eq!(done.bmi.get(), 27.5);
    }

    #[test]
    fn single_missing_field_is_named() {
        let mut record = complete_input();
        record.diabetic = None;
        assert_eq!(validate(&record), Validation::Incomplete(vec![Field::Diabetic]));
    }

    #[test]
    fn toggles_never_count_as_missing() {
        let mut record = complete_input();
        record.smoking = false;
        record.asthma = true;
        let Validation::Complete(done) = validate(&record) else {
            panic!("toggles must not block a submission");
        };
        assert!(!done.smoking);
        assert!(done.asthma);
    }
}
