//! Runtime settings for the terminal binary.
//!
//! Read from an optional JSON file; every field has a default so partial files
//! work. Command-line flags are layered on top by [`crate::cli::Cli`].
//!
//! ```json
//! { "gravity_interval_ms": 300, "map": "maps/classic.txt", "log_level": "debug" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::core::{ControllerConfig, MapSpec};
use crate::types::{Point, BOARD_HEIGHT, BOARD_WIDTH, GRAVITY_INTERVAL_MS, TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game loop interval
    pub tick_ms: u32,
    pub gravity_interval_ms: u32,
    /// Piece sequence seed; a time-based seed is used when absent
    pub seed: Option<u64>,
    /// Plain-text map; an empty 10x20 board when absent
    pub map: Option<PathBuf>,
    /// Spawn origin as `[x, y]`
    pub spawn: Option<(i32, i32)>,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            gravity_interval_ms: GRAVITY_INTERVAL_MS,
            seed: None,
            map: None,
            spawn: None,
            log_file: PathBuf::from("fieldtris.log"),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read settings file {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parse settings file {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(text)?;
        Ok(settings)
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            spawn: self.spawn.map(Point::from),
            gravity_interval_ms: self.gravity_interval_ms.max(1),
        }
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse()
            .with_context(|| format!("invalid log level {:?}", self.log_level))
    }

    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(1)
        })
    }

    /// Load the configured map, or an empty default board
    pub fn load_map(&self) -> Result<MapSpec> {
        let Some(path) = &self.map else {
            return Ok(MapSpec::empty(BOARD_WIDTH, BOARD_HEIGHT));
        };
        let text =
            fs::read_to_string(path).with_context(|| format!("read map file {}", path.display()))?;
        MapSpec::parse(&text).with_context(|| format!("parse map file {}", path.display()))
    }
}
