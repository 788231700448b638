//! High score record
//!
//! Best score and best level ever reached. Each field only ever goes up,
//! independently of the other. Storage lives in [`crate::persistence`].

use serde::{Deserialize, Serialize};

/// Best results across play sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    /// Best score
    pub score: u64,
    /// Best level reached
    pub level: u32,
}

impl Default for HighScoreRecord {
    fn default() -> Self {
        Self { score: 0, level: 1 }
    }
}

impl HighScoreRecord {
    pub fn new(score: u64, level: u32) -> Self {
        Self {
            score,
            level: level.max(1),
        }
    }

    /// Fold a finished session into the record.
    /// Returns true if either field improved (a new-record event).
    pub fn record(&mut self, score: u64, level: u32) -> bool {
        let mut improved = false;

        if score > self.score {
            log::info!("New high score! {} > {}", score, self.score);
            self.score = score;
            improved = true;
        }
        if level > self.level {
            log::info!("Higher level reached! Level {} > {}", level, self.level);
            self.level = level;
            improved = true;
        }
        if !improved {
            log::info!(
                "No new records (score {}, level {} vs best {}, {})",
                score,
                level,
                self.score,
                self.level
            );
        }

        improved
    }
}
