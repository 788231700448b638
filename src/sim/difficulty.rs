//! Difficulty progression
//!
//! A one-way ratchet: the level only moves forward, and asteroid speed, spawn
//! probability and player size only grow toward their caps until the session
//! is reset.

use serde::{Deserialize, Serialize};

use crate::tuning::{DifficultyPolicy, Tuning};

/// Result of a level increase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub from: u32,
    pub to: u32,
}

/// Difficulty controller state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyState {
    /// Current level (starts at 1)
    pub level: u32,
    /// Speed given to newly spawned asteroids
    pub asteroid_speed: f32,
    /// Asteroid spawn probability per tick
    pub spawn_rate: f32,
    /// Score needed for the next level (score-based policy)
    pub next_threshold: u64,
}

impl DifficultyState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            level: 1,
            asteroid_speed: tuning.asteroid_speed,
            spawn_rate: tuning.spawn_rate,
            next_threshold: tuning.level_score_threshold,
        }
    }

    /// Level the current policy asks for. Never below the stored level.
    pub fn target_level(&self, score: u64, elapsed_ms: u64, tuning: &Tuning) -> u32 {
        let target = match tuning.difficulty_policy {
            DifficultyPolicy::ScoreBased => {
                // One level per evaluation, even if several thresholds were crossed
                if score >= self.next_threshold {
                    self.level.saturating_add(1)
                } else {
                    self.level
                }
            }
            DifficultyPolicy::TimeBased => {
                let by_time = elapsed_ms / tuning.level_interval_ms.max(1) + 1;
                u32::try_from(by_time).unwrap_or(u32::MAX)
            }
        };
        target.max(self.level)
    }

    /// Re-evaluate the level. On an increase, speed and spawn rate take one
    /// ratchet step and the score threshold moves up.
    pub fn evaluate(&mut self, score: u64, elapsed_ms: u64, tuning: &Tuning) -> Option<LevelUp> {
        let new_level = self.target_level(score, elapsed_ms, tuning);
        if new_level <= self.level {
            return None;
        }

        let from = self.level;
        self.level = new_level;

        self.asteroid_speed = ratchet(
            self.asteroid_speed,
            tuning.asteroid_speed_step,
            tuning.asteroid_max_speed,
        );
        self.spawn_rate = ratchet(self.spawn_rate, tuning.spawn_rate_step, tuning.max_spawn_rate);

        if tuning.difficulty_policy == DifficultyPolicy::ScoreBased {
            self.next_threshold = self
                .next_threshold
                .saturating_add(tuning.level_score_increment);
        }

        log::info!(
            "Level {} -> {}: asteroid speed {:.2}, spawn rate {:.4}",
            from,
            new_level,
            self.asteroid_speed,
            self.spawn_rate
        );

        Some(LevelUp {
            from,
            to: new_level,
        })
    }
}

/// One step toward `max`: the smaller of `step` and a tenth of the remaining
/// headroom, never past `max` and never backward.
pub fn ratchet(current: f32, step: f32, max: f32) -> f32 {
    let headroom = (max - current) / 10.0;
    let increase = step.min(headroom).max(0.0);
    (current + increase).min(max).max(current)
}

/// Player size after one level-up under the score-based policy
pub fn next_player_size(current: f32, tuning: &Tuning) -> f32 {
    (current + tuning.player_size_step)
        .min(tuning.player_max_size)
        .max(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let tuning = Tuning::default();
        let difficulty = DifficultyState::new(&tuning);
        assert_eq!(difficulty.level, 1);
        assert_eq!(difficulty.asteroid_speed, 3.0);
        assert_eq!(difficulty.spawn_rate, 0.02);
        assert_eq!(difficulty.next_threshold, 20);
    }

    #[test]
    fn test_ratchet_step_and_headroom() {
        // Full step when far from the cap: min(0.5, (8 - 3) / 10) = 0.5
        assert!((ratchet(3.0, 0.5, 8.0) - 3.5).abs() < 1e-6);
        // Headroom-limited near the cap: (8 - 7.5) / 10 = 0.05
        assert!((ratchet(7.5, 0.5, 8.0) - 7.55).abs() < 1e-6);
        // At the cap nothing changes
        assert_eq!(ratchet(8.0, 0.5, 8.0), 8.0);
        // Above the cap never decreases
        assert_eq!(ratchet(9.0, 0.5, 8.0), 9.0);
    }

    #[test]
    fn test_score_policy_one_level_per_evaluation() {
        let tuning = Tuning::default();
        let mut difficulty = DifficultyState::new(&tuning);

        assert!(difficulty.evaluate(19, 0, &tuning).is_none());

        // Crossing several thresholds at once still advances a single level
        let up = difficulty.evaluate(100, 0, &tuning).unwrap();
        assert_eq!(up, LevelUp { from: 1, to: 2 });
        assert_eq!(difficulty.next_threshold, 40);

        let up = difficulty.evaluate(100, 0, &tuning).unwrap();
        assert_eq!(up.to, 3);
        assert_eq!(difficulty.next_threshold, 60);
    }

    #[test]
    fn test_score_drop_never_lowers_level() {
        let tuning = Tuning::default();
        let mut difficulty = DifficultyState::new(&tuning);
        difficulty.evaluate(20, 0, &tuning);
        assert_eq!(difficulty.level, 2);
        assert!(difficulty.evaluate(0, 0, &tuning).is_none());
        assert_eq!(difficulty.level, 2);
    }

    #[test]
    fn test_time_policy_can_jump_levels() {
        let tuning = Tuning {
            difficulty_policy: DifficultyPolicy::TimeBased,
            ..Tuning::default()
        };
        let mut difficulty = DifficultyState::new(&tuning);

        assert!(difficulty.evaluate(0, 4999, &tuning).is_none());
        assert_eq!(difficulty.evaluate(0, 5000, &tuning).unwrap().to, 2);

        // A delayed evaluation jumps straight to level 4 with a single ratchet step
        let speed_before = difficulty.asteroid_speed;
        let up = difficulty.evaluate(0, 15_000, &tuning).unwrap();
        assert_eq!(up, LevelUp { from: 2, to: 4 });
        let expected = ratchet(speed_before, tuning.asteroid_speed_step, tuning.asteroid_max_speed);
        assert_eq!(difficulty.asteroid_speed, expected);
        // Threshold only moves under the score policy
        assert_eq!(difficulty.next_threshold, tuning.level_score_threshold);
    }

    #[test]
    fn test_caps_hold_after_many_levels() {
        let tuning = Tuning::default();
        let mut difficulty = DifficultyState::new(&tuning);
        for _ in 0..500 {
            difficulty.evaluate(u64::MAX, 0, &tuning);
        }
        assert!(difficulty.asteroid_speed <= tuning.asteroid_max_speed);
        assert!(difficulty.spawn_rate <= tuning.max_spawn_rate);
        assert_eq!(difficulty.level, 501);
    }

    #[test]
    fn test_player_size_capped() {
        let tuning = Tuning::default();
        let mut size = tuning.player_size;
        for _ in 0..20 {
            size = next_player_size(size, &tuning);
        }
        assert_eq!(size, tuning.player_max_size);
    }
}
