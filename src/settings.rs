//! Program settings
//!
//! Read from `settings.json` in the working directory. Every field has a
//! default, so the file may hold only the values being overridden, and a
//! missing or broken file just means "all defaults".

use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence::DEFAULT_HIGHSCORE_FILE;
use crate::tuning::Tuning;

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// How [`Settings::load`] went
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded,
    /// No file; defaults in use
    Missing,
    /// Unreadable or malformed file; defaults in use
    Invalid(SettingsError),
}

impl LoadOutcome {
    pub fn log(&self, path: &Path) {
        match self {
            LoadOutcome::Loaded => log::info!("Loaded settings from {}", path.display()),
            LoadOutcome::Missing => {
                log::info!("No settings file at {}, using defaults", path.display())
            }
            LoadOutcome::Invalid(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gameplay balance
    pub tuning: Tuning,
    /// High score save file
    pub highscore_path: PathBuf,
    /// Directory holding the ASCII-art sprites
    pub sprite_dir: PathBuf,
    /// Log output (the terminal itself is busy drawing the game)
    pub log_path: PathBuf,
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            highscore_path: PathBuf::from(DEFAULT_HIGHSCORE_FILE),
            sprite_dir: PathBuf::from("assets"),
            log_path: PathBuf::from("asteroid-shooter.log"),
            log_level: "info".to_string(),
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error.
    ///
    /// Nothing is logged here: the settings pick the log file, so the caller
    /// reports the outcome once logging is running.
    pub fn load(path: &Path) -> (Self, LoadOutcome) {
        match Self::try_load(path) {
            Ok(settings) => (settings, LoadOutcome::Loaded),
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                (Self::default(), LoadOutcome::Missing)
            }
            Err(e) => (Self::default(), LoadOutcome::Invalid(e)),
        }
    }

    /// Parsed log level (unknown names mean `info`)
    pub fn log_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
