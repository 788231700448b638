//! High score persistence
//!
//! The save file is two newline-separated integers: best score, then best
//! level. Nothing here is ever fatal to a running session:
//! - Loading a missing, short or unparsable file yields `(0, 1)`
//! - Failed writes are reported to the caller, which logs and moves on

use std::fs;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use crate::highscores::HighScoreRecord;

/// Default save file name, relative to the working directory
pub const DEFAULT_HIGHSCORE_FILE: &str = "highscores.txt";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score file is missing line {line}")]
    MissingLine { line: usize },
    #[error("high score file line {line} is not an integer: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseIntError,
    },
}

/// Where high scores are kept between runs
pub trait HighScoreStore {
    /// Read the stored record, or report why it could not be read
    fn try_load(&mut self) -> Result<HighScoreRecord, PersistenceError>;

    /// Overwrite the stored record
    fn save(&mut self, record: &HighScoreRecord) -> Result<(), PersistenceError>;

    /// Read the stored record, falling back to `(0, 1)` on any failure
    fn load(&mut self) -> HighScoreRecord {
        match self.try_load() {
            Ok(record) => {
                log::info!(
                    "Loaded high scores: score={}, level={}",
                    record.score,
                    record.level
                );
                record
            }
            Err(PersistenceError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high score file found, using defaults");
                HighScoreRecord::default()
            }
            Err(e) => {
                log::warn!("Could not load high scores ({}), using defaults", e);
                HighScoreRecord::default()
            }
        }
    }
}

/// Parse the two-line save format
pub fn parse_record(contents: &str) -> Result<HighScoreRecord, PersistenceError> {
    let mut lines = contents.lines().map(str::trim);

    let score_text = lines
        .next()
        .ok_or(PersistenceError::MissingLine { line: 1 })?;
    let level_text = lines
        .next()
        .ok_or(PersistenceError::MissingLine { line: 2 })?;

    let score = score_text
        .parse::<u64>()
        .map_err(|source| PersistenceError::Parse { line: 1, source })?;
    let level = level_text
        .parse::<u32>()
        .map_err(|source| PersistenceError::Parse { line: 2, source })?;

    Ok(HighScoreRecord::new(score, level))
}

/// Render a record in the two-line save format
pub fn format_record(record: &HighScoreRecord) -> String {
    format!("{}\n{}", record.score, record.level)
}

/// High scores in a plain text file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHSCORE_FILE)
    }
}

impl HighScoreStore for FileStore {
    fn try_load(&mut self) -> Result<HighScoreRecord, PersistenceError> {
        let contents = fs::read_to_string(&self.path)?;
        parse_record(&contents)
    }

    fn save(&mut self, record: &HighScoreRecord) -> Result<(), PersistenceError> {
        fs::write(&self.path, format_record(record))?;
        log::info!(
            "Saved high scores to {}: score={}, level={}",
            self.path.display(),
            record.score,
            record.level
        );
        Ok(())
    }
}

/// In-memory store for headless runs and tests.
/// Keeps every saved record so callers can inspect the write history.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub stored: Option<HighScoreRecord>,
    pub saves: Vec<HighScoreRecord>,
    pub loads: usize,
    /// Make every write fail (simulates unwritable storage)
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn with_record(record: HighScoreRecord) -> Self {
        Self {
            stored: Some(record),
            ..Self::default()
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn try_load(&mut self) -> Result<HighScoreRecord, PersistenceError> {
        self.loads += 1;
        self.stored.ok_or(PersistenceError::MissingLine { line: 1 })
    }

    fn save(&mut self, record: &HighScoreRecord) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "storage is read-only",
            )));
        }
        self.stored = Some(*record);
        self.saves.push(*record);
        Ok(())
    }
}
