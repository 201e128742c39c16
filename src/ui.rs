//! Line-oriented terminal front end for a [`Session`].
//!
//! The page is redrawn after every command:
//!
//! ```text
//! Heart Disease Prediction
//! ========================
//!
//!  1. Sex: <Select your gender>
//!  ...
//!
//! Commands: <n> edit field, s submit, r reset, q quit
//! >
//! ```
//!
//! Input and output are generic so the whole loop runs against in-memory
//! buffers in tests.

use std::io::{self, BufRead, Write};

use crate::form::{FieldSpec, Widget};
use crate::model::Classifier;
use crate::present::{self, Dialog, Message, Style};
use crate::session::{Session, Stage};

const COMMANDS: &str = "Commands: <n> edit field, s submit, r reset, q quit";

/// Terminal host for one user's session.
pub struct FormUi<R, W> {
    input: R,
    output: W,
    title: String,
    specs: Vec<FieldSpec>,
    session: Session,
}

impl<R: BufRead, W: Write> FormUi<R, W> {
    pub fn new(input: R, output: W, title: impl Into<String>) -> Self {
        Self::with_session(input, output, title, Session::new())
    }

    pub fn with_session(input: R, output: W, title: impl Into<String>, session: Session) -> Self {
        Self {
            input,
            output,
            title: title.into(),
            specs: FieldSpec::all(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Consume the UI, returning its output sink and final session.
    pub fn into_parts(self) -> (W, Session) {
        (self.output, self.session)
    }

    /// Run until the user quits or input ends.
    pub fn run<C: Classifier + ?Sized>(&mut self, model: &C) -> io::Result<()> {
        loop {
            self.render()?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };
            match line.as_str() {
                "q" | "quit" => return Ok(()),
                "s" | "submit" => self.submit(model)?,
                "r" | "reset" => self.session.reset(),
                "" => {}
                other => match other.parse::<usize>() {
                    Ok(n) if (1..=self.specs.len()).contains(&n) => self.edit(n - 1)?,
                    _ => writeln!(self.output, "Unknown command '{other}'. {COMMANDS}")?,
                },
            }
        }
    }

    fn submit<C: Classifier + ?Sized>(&mut self, model: &C) -> io::Result<()> {
        let missing = match self.session.submit(model) {
            Stage::IncompleteDialog(missing) => missing.clone(),
            _ => return Ok(()),
        };
        self.dialog(&present::incomplete(&missing))?;
        // Input ending here leaves nothing to resume.
        self.read_line()?;
        self.session.dismiss();
        Ok(())
    }

    fn edit(&mut self, index: usize) -> io::Result<()> {
        let spec = self.specs[index].clone();
        writeln!(self.output)?;
        writeln!(self.output, "{}", spec.label)?;
        match &spec.widget {
            Widget::Select { options, .. } => {
                for (i, option) in options.iter().enumerate() {
                    writeln!(self.output, "  {}) {option}", i + 1)?;
                }
            }
            Widget::Number { domain, .. } | Widget::Slider { domain, .. } => match domain.max {
                Some(max) => writeln!(self.output, "  ({} to {max})", domain.min)?,
                None => writeln!(self.output, "  (at least {})", domain.min)?,
            },
            Widget::Toggle => writeln!(self.output, "  (y/n)")?,
        }
        let current = self.value_text(&spec);
        write!(self.output, "New value (Enter keeps, '-' clears) [{current}]: ")?;
        self.output.flush()?;

        let Some(line) = self.read_line()? else {
            return Ok(());
        };
        match line.as_str() {
            "" => {}
            "-" => self.session.clear(spec.field),
            text => {
                if let Err(err) = self.session.set(spec.field, text) {
                    log::debug!("rejected input for {}: {err}", spec.field);
                    writeln!(self.output, "Invalid input: {err}")?;
                }
            }
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", self.title)?;
        writeln!(self.output, "{}", "=".repeat(self.title.chars().count()))?;

        let mut section = None;
        for (i, spec) in self.specs.iter().enumerate() {
            if section != Some(spec.section) {
                section = Some(spec.section);
                writeln!(self.output)?;
                if let Some(heading) = spec.section.title() {
                    writeln!(self.output, "{heading}")?;
                }
            }
            let value = self.value_text(spec);
            writeln!(self.output, "{:>2}. {}: {value}", i + 1, spec.label)?;
        }

        if let Some(outcome) = self.session.outcome() {
            writeln!(self.output)?;
            for message in present::outcome(&outcome) {
                self.message(&message)?;
            }
        }

        writeln!(self.output)?;
        writeln!(self.output, "{COMMANDS}")?;
        write!(self.output, "> ")?;
        self.output.flush()
    }

    fn dialog(&mut self, dialog: &Dialog) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "[ {} ]", dialog.title)?;
        writeln!(self.output, "{}", dialog.body)?;
        write!(self.output, "Press Enter to continue...")?;
        self.output.flush()
    }

    fn message(&mut self, message: &Message) -> io::Result<()> {
        let tag = match message.style {
            Style::Success => "[ok] ",
            Style::Alert => "[!!] ",
            Style::Warning => "[??] ",
            Style::Info => "     ",
        };
        writeln!(self.output, "{tag}{message}")
    }

    fn value_text(&self, spec: &FieldSpec) -> String {
        if let Some(value) = self.session.record().display_value(spec.field) {
            return value;
        }
        match &spec.widget {
            Widget::Select { placeholder, .. } => format!("<{placeholder}>"),
            Widget::Number { domain, .. } | Widget::Slider { domain, .. } => match domain.max {
                Some(max) => format!("<enter a value from {} to {max}>", domain.min),
                None => format!("<enter a value of at least {}>", domain.min),
            },
            Widget::Toggle => "No".to_string(),
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::model::Label;
    use crate::record::InputRecord;
    use crate::testing::{FaultyClassifier, FixedClassifier, RecordingClassifier};

    fn run_script<C: Classifier>(script: &str, model: &C) -> (String, Session) {
        let mut ui = FormUi::new(Cursor::new(script.to_string()), Vec::new(), "Heart Disease Prediction");
        ui.run(model).unwrap();
        let (out, session) = ui.into_parts();
        (String::from_utf8(out).unwrap(), session)
    }

    #[test]
    fn renders_title_sections_and_placeholders() {
        let (out, _) = run_script("q\n", &FixedClassifier::new(Label::NoDisease, [0.9, 0.1]));
        assert!(out.contains("Heart Disease Prediction\n========================"));
        assert!(out.contains(" 1. Sex: <Select your gender>"));
        assert!(out.contains("Habits\n"));
        assert!(out.contains("Health Status and History\n"));
        assert!(out.contains("BMI: <enter a value from 10 to 50>"));
    }

    #[test]
    fn empty_form_submission_shows_dialog() {
        let model = RecordingClassifier::new(FixedClassifier::new(Label::NoDisease, [0.9, 0.1]));
        let (out, session) = run_script("s\n\nq\n", &model);
        assert!(out.contains("[ Please complete the form ]"));
        assert!(out.contains(
            "Incomplete information: Sex, AgeCategory, Race, BMI, GenHealth, Diabetic"
        ));
        assert_eq!(model.calls(), 0);
        assert_eq!(session.stage(), &Stage::Editing);
    }

    #[test]
    fn filled_form_reaches_prediction() {
        // Sex, age, race, BMI, general health, diabetic.
        let script = "1\n2\n2\n50-54\n3\n1\n4\n27.5\n10\nGood\n17\nNo\ns\nq\n";
        let model = FixedClassifier::new(Label::HeartDisease, [0.3, 0.7]);
        let (out, session) = run_script(script, &model);
        assert!(matches!(session.stage(), Stage::Result(_)));
        assert!(out.contains("[!!] Prediction: Heart Disease"));
        assert!(out.contains("Probability of No Disease: 0.3000"));
        assert!(out.contains("Probability of Heart Disease: 0.7000"));
    }

    #[test]
    fn invalid_entry_keeps_previous_value() {
        let model = FixedClassifier::new(Label::NoDisease, [0.9, 0.1]);
        let (out, session) = run_script("4\n72\n5\n\n5\n-\nq\n", &model);
        assert!(out.contains("Invalid input: BMI: value 72 is above the maximum 50"));
        assert_eq!(session.record().bmi, None);
        assert_eq!(session.record().sleep_time.map(|s| s.get()), Some(8));
    }

    #[test]
    fn provider_failure_is_reported() {
        let script = "1\nMale\n2\n50-54\n3\nWhite\n4\n27.5\n10\nGood\n17\nNo\ns\nq\n";
        let (out, session) = run_script(script, &FaultyClassifier::new("model exploded"));
        assert!(out.contains("[!!] An error occurred during prediction: model exploded"));
        assert!(out.contains("[??] Please ensure your inputs are valid"));
        assert_eq!(session.record().bmi.map(|b| b.get()), Some(27.5));
    }

    #[test]
    fn reset_command_clears_answers_and_prediction() {
        let script = "1\nMale\n2\n50-54\n3\nWhite\n4\n27.5\n10\nGood\n17\nNo\ns\nr\nq\n";
        let model = FixedClassifier::new(Label::HeartDisease, [0.3, 0.7]);
        let (out, session) = run_script(script, &model);
        assert_eq!(session.stage(), &Stage::Editing);
        assert_eq!(session.record(), InputRecord::default());

        // The last page drawn is back to placeholders with no verdict.
        let last_page = out.rsplit("Heart Disease Prediction\n=").next().unwrap();
        assert!(last_page.contains(" 1. Sex: <Select your gender>"));
        assert!(!last_page.contains("Prediction: Heart Disease"));
        assert!(out.contains("[!!] Prediction: Heart Disease"));
    }

    #[test]
    fn unknown_command_and_eof() {
        let (out, _) = run_script("99\nhello", &FixedClassifier::new(Label::NoDisease, [0.9, 0.1]));
        assert!(out.contains("Unknown command '99'"));
        assert!(out.contains("Unknown command 'hello'"));
    }
}
