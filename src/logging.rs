//! Log setup for the binary.
//!
//! The terminal belongs to the game while it runs, so log lines go to a file.

use std::time::Instant;

use anyhow::{Context, Result};

use crate::settings::Settings;

/// Install the global logger described by `settings`
pub fn init(settings: &Settings) -> Result<()> {
    let level = settings.level_filter()?;
    let file = fern::log_file(&settings.log_file)
        .with_context(|| format!("open log file {}", settings.log_file.display()))?;
    let start = Instant::now();

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{:>9.3}] {} {} {}",
                start.elapsed().as_secs_f64(),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(file)
        .apply()
        .context("install logger")?;
    Ok(())
}
