//! Application configuration.

use std::path::PathBuf;

/// Model artifact, relative to the working directory.
pub const MODEL_PATH: &str = "prediction_model.json";

/// Page heading.
pub const PAGE_TITLE: &str = "Heart Disease Prediction";

/// Settings the host needs at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Path of the model artifact.
    pub model_path: PathBuf,
    /// Heading printed above the form.
    pub title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(MODEL_PATH),
            title: PAGE_TITLE.to_string(),
        }
    }
}

impl AppConfig {
    /// Use a different model artifact.
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }
}
