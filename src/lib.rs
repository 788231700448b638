//! Asteroid Shooter - a single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, difficulty)
//! - `game`: Session driver tying the simulation to high-score persistence
//! - `renderer`: Draw-ready snapshots and the terminal presentation layer
//! - `platform`: Terminal input mapping and fixed-timestep clock
//! - `ui`: Menus, pause buttons and the instructions page
//! - `persistence`: High-score file storage
//! - `settings`: `settings.json` loading
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::Game;
pub use highscores::HighScoreRecord;
pub use settings::Settings;
pub use tuning::{DifficultyPolicy, Tuning};

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_SIZE_STEP: f32 = 5.0;
    pub const PLAYER_MAX_SIZE: f32 = 80.0;
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 7.0;
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    pub const BULLET_COST: u64 = 1;

    /// Asteroid defaults
    pub const ASTEROID_WIDTH: f32 = 40.0;
    pub const ASTEROID_HEIGHT: f32 = 40.0;
    pub const ASTEROID_SPEED: f32 = 3.0;
    pub const MAX_ASTEROID_SPEED: f32 = 8.0;
    pub const ASTEROID_SPEED_STEP: f32 = 0.5;
    /// Spawn probability per tick
    pub const ASTEROID_SPAWN_RATE: f32 = 0.02;
    pub const MAX_SPAWN_RATE: f32 = 0.08;
    pub const SPAWN_RATE_STEP: f32 = 0.005;
    /// Number of distinct asteroid looks
    pub const ASTEROID_VARIANTS: u8 = 4;

    /// Powerup defaults
    pub const POWERUP_SIZE: f32 = 30.0;
    pub const POWERUP_SPEED: f32 = 2.0;
    pub const POWERUP_BONUS: u64 = 5;

    /// Explosion lifetime in ticks
    pub const EXPLOSION_FRAMES: u32 = 30;

    /// Economy
    pub const STARTING_SCORE: u64 = 10;
    pub const STARTING_LIVES: u8 = 3;
    pub const KILL_REWARD: u64 = 1;

    /// Score-driven level progression
    pub const LEVEL_SCORE_THRESHOLD: u64 = 20;
    pub const LEVEL_SCORE_INCREMENT: u64 = 20;
    /// Time-driven level progression (milliseconds per level)
    pub const LEVEL_INTERVAL_MS: u64 = 5000;
}
