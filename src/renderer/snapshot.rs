//! Draw-ready frame snapshots
//!
//! A [`FrameSnapshot`] is everything a presentation layer needs for one frame,
//! copied out of the simulation so drawing never touches live state.

use serde::Serialize;

use crate::highscores::HighScoreRecord;
use crate::sim::{ExplosionKind, GamePhase, GameState, Motion, Rect};

/// What kind of thing to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Player,
    Bullet,
    /// Carries the look variant
    Asteroid(u8),
    Powerup,
    Explosion(ExplosionKind),
}

/// One drawable entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntitySnapshot {
    pub kind: EntityKind,
    pub rect: Rect,
    /// Animation progress in [0, 1] (explosions only, 0 otherwise)
    pub progress: f32,
}

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub high_score: u64,
    pub high_level: u32,
    /// The finished session set a new record
    pub new_record: bool,
}

/// Read-only view of a single frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    /// Playfield size in world units
    pub world_width: f32,
    pub world_height: f32,
    /// Back-to-front draw order
    pub entities: Vec<EntitySnapshot>,
    pub hud: Hud,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, record: &HighScoreRecord, new_record: bool) -> Self {
        let mut entities = Vec::with_capacity(
            1 + state.bullets.len()
                + state.asteroids.len()
                + state.powerups.len()
                + state.explosions.len(),
        );

        let still = |kind, rect| EntitySnapshot {
            kind,
            rect,
            progress: 0.0,
        };

        entities.extend(
            state
                .asteroids
                .iter()
                .map(|a| still(EntityKind::Asteroid(a.variant), a.bounds())),
        );
        entities.extend(
            state
                .powerups
                .iter()
                .map(|p| still(EntityKind::Powerup, p.bounds())),
        );
        entities.extend(
            state
                .bullets
                .iter()
                .map(|b| still(EntityKind::Bullet, b.bounds())),
        );

        let player_dead = state
            .explosions
            .iter()
            .any(|e| e.kind == ExplosionKind::Player);
        if !player_dead {
            entities.push(still(EntityKind::Player, state.player.bounds()));
        }

        entities.extend(state.explosions.iter().map(|e| EntitySnapshot {
            kind: EntityKind::Explosion(e.kind),
            rect: e.bounds(),
            progress: e.progress(),
        }));

        Self {
            phase: state.phase,
            world_width: state.tuning.screen_width,
            world_height: state.tuning.screen_height,
            entities,
            hud: Hud {
                score: state.score,
                lives: state.lives,
                level: state.difficulty.level,
                high_score: record.score,
                high_level: record.level,
                new_record,
            },
        }
    }

    /// Entities of one kind (mostly for tests and debugging)
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameOverCause, TickInput, tick};
    use crate::tuning::Tuning;

    fn started() -> GameState {
        let tuning = Tuning {
            spawn_rate: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(tuning, 3);
        state.start_session();
        state
    }

    #[test]
    fn test_capture_hud() {
        let state = started();
        let snapshot = FrameSnapshot::capture(&state, &HighScoreRecord::new(77, 4), false);
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert_eq!(
            snapshot.hud,
            Hud {
                score: 10,
                lives: 3,
                level: 1,
                high_score: 77,
                high_level: 4,
                new_record: false,
            }
        );
        assert_eq!(snapshot.count(EntityKind::Player), 1);
    }

    #[test]
    fn test_capture_bullet() {
        let mut state = started();
        tick(
            &mut state,
            &TickInput {
                fire: true,
                ..Default::default()
            },
        );
        let snapshot = FrameSnapshot::capture(&state, &HighScoreRecord::default(), false);
        assert_eq!(snapshot.count(EntityKind::Bullet), 1);
        // Player drawn after falling objects and bullets
        assert_eq!(snapshot.entities.last().unwrap().kind, EntityKind::Player);
    }

    #[test]
    fn test_dead_player_replaced_by_explosion() {
        let mut state = started();
        state.end_session(GameOverCause::OutOfLives);
        let snapshot = FrameSnapshot::capture(&state, &HighScoreRecord::default(), false);
        assert_eq!(snapshot.count(EntityKind::Player), 0);
        assert_eq!(
            snapshot.count(EntityKind::Explosion(ExplosionKind::Player)),
            1
        );
    }
}
