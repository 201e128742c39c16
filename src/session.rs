//! One user's pass through the form-to-prediction pipeline.
//!
//! ```text
//! Editing ──submit──► validate ──Incomplete──► IncompleteDialog ──dismiss──► Editing
//!                        │
//!                     Complete
//!                        ▼
//!                   Normalizing ──► Inferring ──► Result | InferenceError
//! ```
//!
//! Any edit or [`Session::dismiss`] returns to `Editing`. Entered values are
//! never cleared by a submission, so the user may resubmit indefinitely.

use crate::form::{FieldError, FormState};
use crate::inference::{Outcome, Prediction, infer};
use crate::model::Classifier;
use crate::normalize::{FeatureRow, normalize};
use crate::record::{Field, InputRecord};
use crate::validate::{Validation, validate};

/// Pipeline state.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Editing,
    IncompleteDialog(Vec<Field>),
    Normalizing,
    Inferring(FeatureRow),
    Result(Prediction),
    InferenceError(String),
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Editing => "editing",
            Stage::IncompleteDialog(_) => "incomplete-dialog",
            Stage::Normalizing => "normalizing",
            Stage::Inferring(_) => "inferring",
            Stage::Result(_) => "result",
            Stage::InferenceError(_) => "inference-error",
        }
    }
}

/// Form state plus the current pipeline stage for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    form: FormState,
    stage: Stage,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_form(FormState::new())
    }

    pub fn with_form(form: FormState) -> Self {
        Self {
            form,
            stage: Stage::Editing,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Fresh snapshot of the current answers.
    pub fn record(&self) -> InputRecord {
        self.form.record()
    }

    /// Edit a field from user text. Discards any displayed outcome.
    pub fn set(&mut self, field: Field, input: &str) -> Result<(), FieldError> {
        self.enter(Stage::Editing);
        self.form.set(field, input)
    }

    /// Apply a typed edit. Discards any displayed outcome.
    pub fn update(&mut self, edit: impl FnOnce(&mut InputRecord)) {
        self.enter(Stage::Editing);
        self.form.update(edit);
    }

    /// Return `field` to its initial value. Discards any displayed outcome.
    pub fn clear(&mut self, field: Field) {
        self.enter(Stage::Editing);
        self.form.clear(field);
    }

    /// Close a dialog or outcome and go back to editing.
    pub fn dismiss(&mut self) {
        self.enter(Stage::Editing);
    }

    /// Clear every answer and go back to editing.
    pub fn reset(&mut self) {
        self.enter(Stage::Editing);
        self.form.reset();
    }

    /// Validate, normalize and score the current answers.
    ///
    /// The model is called only when the form is complete. Returns the stage
    /// the submission stopped in.
    pub fn submit<C: Classifier + ?Sized>(&mut self, model: &C) -> &Stage {
        let record = self.form.record();
        let complete = match validate(&record) {
            Validation::Complete(done) => done,
            Validation::Incomplete(missing) => {
                log::info!("submission blocked, missing: {missing:?}");
                self.enter(Stage::IncompleteDialog(missing));
                return &self.stage;
            }
        };

        self.enter(Stage::Normalizing);
        let row = normalize(complete);

        self.enter(Stage::Inferring(row.clone()));
        let outcome = infer(model, &row);

        match outcome {
            Outcome::Prediction(p) => self.enter(Stage::Result(p)),
            Outcome::Failure(f) => self.enter(Stage::InferenceError(f.reason)),
        }
        &self.stage
    }

    /// The outcome currently on display, if any.
    pub fn outcome(&self) -> Option<Outcome> {
        match &self.stage {
            Stage::Result(p) => Some(Outcome::Prediction(*p)),
            Stage::InferenceError(reason) => Some(Outcome::Failure(
                crate::inference::InferenceFailure {
                    reason: reason.clone(),
                },
            )),
            _ => None,
        }
    }

    fn enter(&mut self, next: Stage) {
        if self.stage.name() != next.name() {
            log::debug!("session: {} -> {}", self.stage.name(), next.name());
        }
        self.stage = next;
    }
}
