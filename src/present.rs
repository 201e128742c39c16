//! User-facing text for every pipeline outcome.
//!
//! Rendering targets (terminal, tests) decide how a [`Style`] looks; this
//! module only decides what is said.

use std::fmt;

use crate::inference::{InferenceFailure, Outcome, Prediction};
use crate::model::Label;
use crate::record::Field;

/// Visual weight of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Positive verdict.
    Success,
    /// Negative verdict or error.
    Alert,
    /// Remediation hint.
    Warning,
    /// Plain text.
    Info,
}

/// One rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub style: Style,
    pub text: String,
}

impl Message {
    pub fn new(style: Style, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Blocking dialog shown when the form is incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub body: String,
}

pub const INCOMPLETE_TITLE: &str = "Please complete the form";
pub const FAILURE_HINT: &str = "Please ensure your inputs are valid and match the expected format.";

/// Verdict banner for a label.
pub fn verdict(label: Label) -> Message {
    let style = match label {
        Label::HeartDisease => Style::Alert,
        Label::NoDisease => Style::Success,
    };
    Message::new(style, format!("Prediction: {}", label.outcome()))
}

/// `Probability of <Outcome>: <p>` with four decimals.
pub fn probability_line(label: Label, probability: f64) -> String {
    format!("Probability of {}: {probability:.4}", label.outcome())
}

/// Verdict plus both probability lines.
pub fn prediction(p: &Prediction) -> Vec<Message> {
    vec![
        verdict(p.label),
        Message::new(
            Style::Info,
            probability_line(Label::NoDisease, p.probability(Label::NoDisease)),
        ),
        Message::new(
            Style::Info,
            probability_line(Label::HeartDisease, p.probability(Label::HeartDisease)),
        ),
    ]
}

/// Generic error plus remediation hint.
pub fn failure(f: &InferenceFailure) -> Vec<Message> {
    vec![
        Message::new(
            Style::Alert,
            format!("An error occurred during prediction: {}", f.reason),
        ),
        Message::new(Style::Warning, FAILURE_HINT),
    ]
}

/// Messages for any inference outcome.
pub fn outcome(o: &Outcome) -> Vec<Message> {
    match o {
        Outcome::Prediction(p) => prediction(p),
        Outcome::Failure(f) => failure(f),
    }
}

/// Dialog naming the unanswered fields, in column order.
pub fn incomplete(missing: &[Field]) -> Dialog {
    let names: Vec<&str> = missing.iter().map(|f| f.name()).collect();
    Dialog {
        title: INCOMPLETE_TITLE.to_string(),
        body: format!("Incomplete information: {}", names.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_styles_are_mutually_exclusive() {
        let alert = verdict(Label::HeartDisease);
        assert_eq!(alert.style, Style::Alert);
        assert_eq!(alert.text, "Prediction: Heart Disease");

        let ok = verdict(Label::NoDisease);
        assert_eq!(ok.style, Style::Success);
        assert_eq!(ok.text, "Prediction: No Disease");
    }

    #[test]
    fn probabilities_use_four_decimals() {
        let p = Prediction {
            label: Label::NoDisease,
            probabilities: [0.876543, 0.123457],
        };
        let lines: Vec<String> = prediction(&p).into_iter().map(|m| m.text).collect();
        assert_eq!(
            lines,
            vec![
                "Prediction: No Disease",
                "Probability of No Disease: 0.8765",
                "Probability of Heart Disease: 0.1235",
            ]
        );
    }

    #[test]
    fn failure_includes_reason_and_hint() {
        let msgs = failure(&InferenceFailure {
            reason: "boom".into(),
        });
        assert_eq!(msgs[0].text, "An error occurred during prediction: boom");
        assert_eq!(msgs[0].style, Style::Alert);
        assert_eq!(msgs[1].text, FAILURE_HINT);
    }

    #[test]
    fn incomplete_dialog_lists_fields() {
        let dialog = incomplete(&[Field::Sex, Field::Bmi]);
        assert_eq!(dialog.title, "Please complete the form");
        assert_eq!(dialog.body, "Incomplete information: Sex, BMI");
    }
}
