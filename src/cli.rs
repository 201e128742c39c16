use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use crate::config::{AppConfig, MODEL_PATH};
use crate::model;
use crate::ui::FormUi;

#[derive(Parser, Debug)]
#[command(author, version, about = "Heart disease risk prediction form", long_about = None)]
pub struct Cli {
    /// Path to the trained model artifact
    #[arg(long, value_name = "PATH", default_value = MODEL_PATH)]
    pub model: PathBuf,
}

impl Cli {
    pub fn config(&self) -> AppConfig {
        AppConfig::default().with_model_path(&self.model)
    }
}

/// Logging goes to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

pub fn run() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = cli.config();
    log::debug!("starting with {config:?}");

    // The form is never shown without a model.
    let model = model::load(&config.model_path)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut ui = FormUi::new(stdin.lock(), stdout.lock(), config.title.as_str());
    ui.run(&model).context("terminal I/O failed")?;
    Ok(())
}
