//! Game state and core simulation types
//!
//! Entities are plain data stored in typed collections owned by [`GameState`].
//! Each carries a stable id so cross-collection effects can be resolved by id
//! after a read-only pass.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyState;
use super::rect::Rect;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// How-to-play page reachable from the menu
    Instructions,
    /// Active gameplay
    Playing,
    /// Simulation suspended
    Paused,
    /// Session ended, waiting for restart or menu
    GameOver,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Lives reached zero
    OutOfLives,
    /// The last affordable shot spent the score down to zero
    OutOfScore,
}

/// Things that happened during a tick, consumed by the session driver
/// and presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A fresh session began (from the menu or a restart)
    SessionStarted,
    ShotFired { score: u64 },
    /// Fire pressed with nothing left to spend
    ShotRejected,
    AsteroidDestroyed { pos: Vec2, by_bullet: bool },
    PlayerHit { lives: u8 },
    PowerupCollected { bonus: u64 },
    LevelUp { level: u32 },
    GameOver {
        score: u64,
        level: u32,
        cause: GameOverCause,
    },
    Paused,
    Resumed,
    ReturnedToMenu,
}

/// Per-tick motion contract shared by everything that moves on its own
pub trait Motion {
    /// Apply one tick of movement (or animation)
    fn advance(&mut self);
    /// True once the entity has fully left the playfield (or finished)
    fn is_expired(&self, screen_height: f32) -> bool;
    /// Collision / draw rectangle
    fn bounds(&self) -> Rect;
}

/// Advance every entity in a collection and drop the expired ones.
/// Returns how many were removed.
pub fn advance_and_cull<T: Motion>(items: &mut Vec<T>, screen_height: f32) -> usize {
    for item in items.iter_mut() {
        item.advance();
    }
    let before = items.len();
    items.retain(|item| !item.is_expired(screen_height));
    before - items.len()
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Square side length (grows with level)
    pub size: f32,
    /// Horizontal pixels per tick
    pub speed: f32,
}

impl Player {
    /// Centered at the bottom of the playfield
    pub fn spawn(tuning: &Tuning) -> Self {
        let size = tuning.player_size;
        Self {
            pos: Vec2::new(
                tuning.screen_width / 2.0 - size / 2.0,
                tuning.screen_height - size - tuning.player_bottom_margin,
            ),
            size,
            speed: tuning.player_speed,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(self.size))
    }

    /// Move one step left (`direction < 0`) or right (`direction > 0`).
    ///
    /// The move is rejected outright if it would leave `[0, screen_width - size]`,
    /// so the ship is never observed out of bounds.
    pub fn try_move(&mut self, direction: f32, screen_width: f32) -> bool {
        let new_x = self.pos.x + direction.signum() * self.speed;
        if new_x < 0.0 || new_x > screen_width - self.size {
            return false;
        }
        self.pos.x = new_x;
        true
    }

    /// Change ship size, keeping its horizontal center and bottom margin
    pub fn resize(&mut self, size: f32, tuning: &Tuning) {
        let center_x = self.pos.x + self.size / 2.0;
        self.size = size;
        let max_x = (tuning.screen_width - size).max(0.0);
        self.pos.x = (center_x - size / 2.0).clamp(0.0, max_x);
        self.pos.y = tuning.screen_height - size - tuning.player_bottom_margin;
    }

    /// Where a new bullet of the given width appears (centered on the nose)
    pub fn muzzle(&self, bullet_width: f32) -> Vec2 {
        Vec2::new(self.pos.x + self.size / 2.0 - bullet_width / 2.0, self.pos.y)
    }
}

/// A projectile fired upward by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Upward pixels per tick
    pub speed: f32,
    /// Score paid to fire this bullet; zero once refunded
    pub paid: u64,
}

impl Bullet {
    /// Hand back the fire cost exactly once
    pub fn take_refund(&mut self) -> u64 {
        std::mem::take(&mut self.paid)
    }
}

impl Motion for Bullet {
    fn advance(&mut self) {
        self.pos.y -= self.speed;
    }

    fn is_expired(&self, _screen_height: f32) -> bool {
        self.pos.y < -self.size.y
    }

    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A falling asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Downward pixels per tick, fixed at spawn time
    pub speed: f32,
    /// Which of the asteroid looks to draw
    pub variant: u8,
}

impl Motion for Asteroid {
    fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    fn is_expired(&self, screen_height: f32) -> bool {
        self.pos.y > screen_height
    }

    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A falling score bonus, dropped once per level-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Motion for Powerup {
    fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    fn is_expired(&self, screen_height: f32) -> bool {
        self.pos.y > screen_height
    }

    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// What blew up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    Asteroid,
    Player,
}

/// Cosmetic burst; never collides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub kind: ExplosionKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Ticks elapsed since creation
    pub frame: u32,
    /// Ticks until it disappears
    pub duration: u32,
}

impl Explosion {
    /// Animation progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration == 0 {
            1.0
        } else {
            (self.frame as f32 / self.duration as f32).min(1.0)
        }
    }
}

impl Motion for Explosion {
    fn advance(&mut self) {
        self.frame = self.frame.saturating_add(1);
    }

    fn is_expired(&self, _screen_height: f32) -> bool {
        self.frame >= self.duration
    }

    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Complete game state (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance parameters for this run
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving every random draw
    pub(crate) rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Spendable score
    pub score: u64,
    /// Player lives
    pub lives: u8,
    /// Ticks of active play this session
    pub time_ticks: u64,
    /// Level, asteroid speed and spawn rate
    pub difficulty: DifficultyState,
    /// Player ship
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub powerups: Vec<Powerup>,
    pub explosions: Vec<Explosion>,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state sitting at the menu
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let tuning = tuning.sanitized();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            score: tuning.starting_score,
            lives: tuning.starting_lives,
            time_ticks: 0,
            difficulty: DifficultyState::new(&tuning),
            player: Player::spawn(&tuning),
            bullets: Vec::new(),
            asteroids: Vec::new(),
            powerups: Vec::new(),
            explosions: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Put score, lives, entities and difficulty back to their initial values.
    /// Does not touch the phase.
    pub fn reset_session(&mut self) {
        self.score = self.tuning.starting_score;
        self.lives = self.tuning.starting_lives;
        self.time_ticks = 0;
        self.difficulty = DifficultyState::new(&self.tuning);
        self.player = Player::spawn(&self.tuning);
        self.bullets.clear();
        self.asteroids.clear();
        self.powerups.clear();
        self.explosions.clear();
    }

    /// Reset and enter active play
    pub fn start_session(&mut self) {
        self.reset_session();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::SessionStarted);
        log::info!("Session started (seed {})", self.seed);
    }

    /// Enter GameOver. Only the first call per session has any effect.
    pub(crate) fn end_session(&mut self, cause: GameOverCause) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;

        if cause == GameOverCause::OutOfLives {
            let id = self.next_entity_id();
            self.explosions.push(Explosion {
                id,
                kind: ExplosionKind::Player,
                pos: self.player.pos,
                size: Vec2::splat(self.player.size),
                frame: 0,
                duration: self.tuning.explosion_frames,
            });
        }

        self.events.push(GameEvent::GameOver {
            score: self.score,
            level: self.difficulty.level,
            cause,
        });
        log::info!(
            "Game over ({:?}): score {}, level {}",
            cause,
            self.score,
            self.difficulty.level
        );
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
