//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (collection order, entity ids for removal)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{BulletHit, CollisionReport, resolve};
pub use difficulty::{DifficultyState, LevelUp};
pub use rect::Rect;
pub use state::{
    Asteroid, Bullet, Explosion, ExplosionKind, GameEvent, GameOverCause, GamePhase, GameState,
    Motion, Player, Powerup,
};
pub use tick::{TickInput, tick};
