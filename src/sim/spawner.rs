//! Asteroid and powerup spawning
//!
//! All randomness comes from the state's seeded RNG, so a run is reproducible
//! from its seed and input sequence.

use glam::Vec2;
use rand::Rng;

use super::state::{Asteroid, GameState, Powerup};
use crate::consts::ASTEROID_VARIANTS;

/// Roll once against the current spawn probability and maybe drop an asteroid
/// at the top of the screen. Returns the new asteroid's id.
pub fn maybe_spawn_asteroid(state: &mut GameState) -> Option<u32> {
    let roll: f32 = state.rng.random();
    if roll >= state.difficulty.spawn_rate {
        return None;
    }

    let max_x = (state.tuning.screen_width - state.tuning.asteroid_width).max(0.0);
    let x = state.rng.random_range(0.0..=max_x);
    Some(spawn_asteroid_at(state, x))
}

/// Spawn an asteroid just above the screen at `x`, moving at the current
/// difficulty speed. The speed is copied, so later difficulty increases do
/// not affect it.
pub fn spawn_asteroid_at(state: &mut GameState, x: f32) -> u32 {
    let id = state.next_entity_id();
    let variant = state.rng.random_range(0..ASTEROID_VARIANTS);
    let size = Vec2::new(state.tuning.asteroid_width, state.tuning.asteroid_height);
    state.asteroids.push(Asteroid {
        id,
        pos: Vec2::new(x, -size.y),
        size,
        speed: state.difficulty.asteroid_speed,
        variant,
    });
    id
}

/// Drop one powerup at a random x just above the screen
pub fn spawn_powerup(state: &mut GameState) -> u32 {
    let size = Vec2::splat(state.tuning.powerup_size);
    let max_x = (state.tuning.screen_width - size.x).max(0.0);
    let x = state.rng.random_range(0.0..=max_x);
    let id = state.next_entity_id();
    state.powerups.push(Powerup {
        id,
        pos: Vec2::new(x, -size.y),
        size,
        speed: state.tuning.powerup_speed,
    });
    log::debug!("Powerup {} spawned at x={:.0}", id, x);
    id
}
