//! Command-line flags. Anything given here overrides the settings file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::settings::Settings;

#[derive(Parser, Debug, Default)]
#[command(name = "fieldtris", version, about = "Falling-block puzzle in the terminal")]
pub struct Cli {
    /// JSON settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Plain-text map ('#' wall, '.' open)
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// RNG seed for the piece sequence
    #[arg(long)]
    pub seed: Option<u64>,

    /// Milliseconds between gravity steps
    #[arg(long)]
    pub gravity_ms: Option<u32>,

    /// Game loop interval in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u32>,

    /// Where log lines are written
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// off | error | warn | info | debug | trace
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Settings file (or defaults) with the flags applied
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        self.apply(&mut settings);
        Ok(settings)
    }

    pub fn apply(&self, settings: &mut Settings) {
        if let Some(map) = &self.map {
            settings.map = Some(map.clone());
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(ms) = self.gravity_ms {
            settings.gravity_interval_ms = ms;
        }
        if let Some(ms) = self.tick_ms {
            settings.tick_ms = ms;
        }
        if let Some(path) = &self.log_file {
            settings.log_file = path.clone();
        }
        if let Some(level) = &self.log_level {
            settings.log_level = level.clone();
        }
    }
}
