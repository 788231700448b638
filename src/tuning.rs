//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives in [`Tuning`]. Defaults
//! come from [`crate::consts`]; a settings file may override any subset.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What drives the level counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyPolicy {
    /// Level advances when the score crosses a rising threshold.
    /// Also grows the player ship on every level.
    #[default]
    ScoreBased,
    /// Level = elapsed play time / interval + 1
    TimeBased,
}

impl DifficultyPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPolicy::ScoreBased => "score",
            DifficultyPolicy::TimeBased => "time",
        }
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Player ===
    pub player_speed: f32,
    pub player_size: f32,
    /// Growth per level (score-based policy only)
    pub player_size_step: f32,
    pub player_max_size: f32,
    pub player_bottom_margin: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_cost: u64,

    // === Asteroids ===
    pub asteroid_width: f32,
    pub asteroid_height: f32,
    pub asteroid_speed: f32,
    pub asteroid_max_speed: f32,
    pub asteroid_speed_step: f32,
    pub spawn_rate: f32,
    pub max_spawn_rate: f32,
    pub spawn_rate_step: f32,

    // === Powerups ===
    pub powerup_size: f32,
    pub powerup_speed: f32,
    pub powerup_bonus: u64,

    // === Explosions ===
    pub explosion_frames: u32,

    // === Economy ===
    pub starting_score: u64,
    pub starting_lives: u8,
    pub kill_reward: u64,

    // === Difficulty ===
    pub difficulty_policy: DifficultyPolicy,
    pub level_score_threshold: u64,
    pub level_score_increment: u64,
    pub level_interval_ms: u64,
    pub tick_rate: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_speed: PLAYER_SPEED,
            player_size: PLAYER_SIZE,
            player_size_step: PLAYER_SIZE_STEP,
            player_max_size: PLAYER_MAX_SIZE,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,

            bullet_speed: BULLET_SPEED,
            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            bullet_cost: BULLET_COST,

            asteroid_width: ASTEROID_WIDTH,
            asteroid_height: ASTEROID_HEIGHT,
            asteroid_speed: ASTEROID_SPEED,
            asteroid_max_speed: MAX_ASTEROID_SPEED,
            asteroid_speed_step: ASTEROID_SPEED_STEP,
            spawn_rate: ASTEROID_SPAWN_RATE,
            max_spawn_rate: MAX_SPAWN_RATE,
            spawn_rate_step: SPAWN_RATE_STEP,

            powerup_size: POWERUP_SIZE,
            powerup_speed: POWERUP_SPEED,
            powerup_bonus: POWERUP_BONUS,

            explosion_frames: EXPLOSION_FRAMES,

            starting_score: STARTING_SCORE,
            starting_lives: STARTING_LIVES,
            kill_reward: KILL_REWARD,

            difficulty_policy: DifficultyPolicy::ScoreBased,
            level_score_threshold: LEVEL_SCORE_THRESHOLD,
            level_score_increment: LEVEL_SCORE_INCREMENT,
            level_interval_ms: LEVEL_INTERVAL_MS,
            tick_rate: TICK_RATE,
        }
    }
}

impl Tuning {
    /// Clamp values that would break simulation invariants.
    ///
    /// Maxima are raised to at least their starting value, rates are kept in
    /// [0, 1], sizes and speeds stay positive, and the player must fit the
    /// playfield at its largest size.
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        if !(self.screen_width > 0.0) {
            self.screen_width = defaults.screen_width;
        }
        if !(self.screen_height > 0.0) {
            self.screen_height = defaults.screen_height;
        }

        for (value, fallback) in [
            (&mut self.player_size, defaults.player_size),
            (&mut self.bullet_width, defaults.bullet_width),
            (&mut self.bullet_height, defaults.bullet_height),
            (&mut self.asteroid_width, defaults.asteroid_width),
            (&mut self.asteroid_height, defaults.asteroid_height),
            (&mut self.powerup_size, defaults.powerup_size),
        ] {
            if !(*value > 0.0) {
                *value = fallback;
            }
        }

        self.player_size_step = self.player_size_step.max(0.0);
        self.player_max_size = self
            .player_max_size
            .max(self.player_size)
            .min(self.screen_width)
            .min(self.screen_height);
        self.player_size = self.player_size.min(self.player_max_size);

        self.asteroid_speed = self.asteroid_speed.max(0.0);
        self.asteroid_max_speed = self.asteroid_max_speed.max(self.asteroid_speed);
        self.asteroid_speed_step = self.asteroid_speed_step.max(0.0);

        self.spawn_rate = self.spawn_rate.clamp(0.0, 1.0);
        self.max_spawn_rate = self.max_spawn_rate.clamp(self.spawn_rate, 1.0);
        self.spawn_rate_step = self.spawn_rate_step.max(0.0);

        self.bullet_cost = self.bullet_cost.max(1);
        // A session must be able to fire at least once
        self.starting_score = self.starting_score.max(1);
        self.starting_lives = self.starting_lives.max(1);
        self.level_score_increment = self.level_score_increment.max(1);
        self.level_interval_ms = self.level_interval_ms.max(1);
        self.tick_rate = self.tick_rate.max(1);
        self.explosion_frames = self.explosion_frames.max(1);

        self
    }

    /// Milliseconds of play represented by `ticks` simulation steps
    pub fn ticks_to_ms(&self, ticks: u64) -> u64 {
        ticks * 1000 / self.tick_rate as u64
    }
}
