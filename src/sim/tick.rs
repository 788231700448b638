//! Fixed timestep simulation tick
//!
//! Drives the phase state machine and, while playing, advances the world one
//! step in a fixed order: fire, player, bullets, spawn, falling entities,
//! collisions, difficulty.

use super::collision;
use super::difficulty::next_player_size;
use super::spawner;
use super::state::{
    Bullet, GameEvent, GameOverCause, GamePhase, GameState, Motion, advance_and_cull,
};
use crate::tuning::DifficultyPolicy;

/// Input commands for a single tick (deterministic)
///
/// Movement flags reflect keys currently held; everything else is a one-shot
/// intent consumed by the tick that sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left held
    pub move_left: bool,
    /// Move right held
    pub move_right: bool,
    /// Fire a bullet
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Restart after game over
    pub restart: bool,
    /// Start a session from the menu
    pub start: bool,
    /// Open the instructions page from the menu
    pub instructions: bool,
    /// Leave the instructions page
    pub back: bool,
    /// Abandon the session and return to the menu
    pub menu: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    match state.phase {
        GamePhase::Menu => {
            if input.start {
                state.start_session();
            } else if input.instructions {
                state.phase = GamePhase::Instructions;
            }
        }
        GamePhase::Instructions => {
            if input.back {
                state.phase = GamePhase::Menu;
            }
        }
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Resumed);
            } else if input.menu {
                return_to_menu(state);
            }
        }
        GamePhase::GameOver => {
            if input.restart {
                state.start_session();
            } else if input.menu {
                return_to_menu(state);
            }
        }
        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
                return;
            }
            step_playing(state, input);
        }
    }
}

fn return_to_menu(state: &mut GameState) {
    state.reset_session();
    state.phase = GamePhase::Menu;
    state.events.push(GameEvent::ReturnedToMenu);
    log::info!("Session abandoned, back to menu");
}

/// One tick of active play
fn step_playing(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    // Fire
    if input.fire && !fire(state) {
        return;
    }

    // Player
    let screen_width = state.tuning.screen_width;
    if input.move_left {
        state.player.try_move(-1.0, screen_width);
    }
    if input.move_right {
        state.player.try_move(1.0, screen_width);
    }

    // Bullets
    let screen_height = state.tuning.screen_height;
    advance_and_cull(&mut state.bullets, screen_height);

    // Spawn
    spawner::maybe_spawn_asteroid(state);

    // Falling entities and cosmetic effects
    advance_and_cull(&mut state.asteroids, screen_height);
    advance_and_cull(&mut state.powerups, screen_height);
    advance_and_cull(&mut state.explosions, screen_height);

    // Collisions
    let report = collision::resolve(state);
    if report.game_over {
        return;
    }

    // Difficulty
    let elapsed_ms = state.tuning.ticks_to_ms(state.time_ticks);
    if let Some(up) = state
        .difficulty
        .evaluate(state.score, elapsed_ms, &state.tuning)
    {
        if state.tuning.difficulty_policy == DifficultyPolicy::ScoreBased {
            let size = next_player_size(state.player.size, &state.tuning);
            state.player.resize(size, &state.tuning);
        }
        spawner::spawn_powerup(state);
        state.events.push(GameEvent::LevelUp { level: up.to });
    }
}

/// Spend score on a bullet. Returns false if the session ended as a result.
fn fire(state: &mut GameState) -> bool {
    if state.score == 0 {
        state.events.push(GameEvent::ShotRejected);
        return true;
    }

    let paid = state.tuning.bullet_cost.min(state.score);
    state.score -= paid;

    let id = state.next_entity_id();
    let size = glam::Vec2::new(state.tuning.bullet_width, state.tuning.bullet_height);
    let bullet = Bullet {
        id,
        pos: state.player.muzzle(size.x),
        size,
        speed: state.tuning.bullet_speed,
        paid,
    };
    log::trace!("Bullet {} fired from {:?}", id, bullet.bounds().pos);
    state.bullets.push(bullet);
    state.events.push(GameEvent::ShotFired { score: state.score });

    if state.score == 0 {
        state.end_session(GameOverCause::OutOfScore);
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Asteroid, ExplosionKind};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn quiet_tuning() -> Tuning {
        Tuning {
            spawn_rate: 0.0,
            ..Tuning::default()
        }
    }

    fn playing(tuning: Tuning) -> GameState {
        let mut state = GameState::new(tuning, 12345);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        state
    }

    fn fire_input() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_menu_to_playing() {
        let mut state = GameState::new(quiet_tuning(), 12345);
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Menu);

        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events, vec![GameEvent::SessionStarted]);
    }

    #[test]
    fn test_instructions_round_trip() {
        let mut state = GameState::new(quiet_tuning(), 1);
        let open = TickInput {
            instructions: true,
            ..Default::default()
        };
        tick(&mut state, &open);
        assert_eq!(state.phase, GamePhase::Instructions);

        // Start is not reachable from the instructions page
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Instructions);

        tick(
            &mut state,
            &TickInput {
                back: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_pause_suspends_everything() {
        let mut state = playing(quiet_tuning());
        state.asteroids.push(Asteroid {
            id: 999,
            pos: Vec2::new(100.0, 100.0),
            size: Vec2::splat(40.0),
            speed: 3.0,
            variant: 0,
        });

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        let ticks = state.time_ticks;

        // Fire and movement are ignored while paused
        for _ in 0..10 {
            tick(
                &mut state,
                &TickInput {
                    fire: true,
                    move_left: true,
                    ..Default::default()
                },
            );
        }
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.asteroids[0].pos.y, 100.0);
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 10);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pause_menu_abandons_session() {
        let mut state = playing(quiet_tuning());
        tick(&mut state, &fire_input());
        assert_eq!(state.score, 9);

        tick(
            &mut state,
            &TickInput {
                pause: true,
                ..Default::default()
            },
        );
        tick(
            &mut state,
            &TickInput {
                menu: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, 10);
        assert!(state.bullets.is_empty());
        assert!(state.events.contains(&GameEvent::ReturnedToMenu));
    }

    #[test]
    fn test_fire_costs_score_and_spawns_bullet() {
        let mut state = playing(quiet_tuning());
        tick(&mut state, &fire_input());

        assert_eq!(state.score, 9);
        assert_eq!(state.bullets.len(), 1);
        // Fired at y=540 and moved once in the same tick
        assert_eq!(state.bullets[0].pos, Vec2::new(397.5, 533.0));
    }

    #[test]
    fn test_last_shot_ends_session() {
        let mut state = playing(quiet_tuning());
        state.score = 1;
        tick(&mut state, &fire_input());

        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::GameOver {
                cause: GameOverCause::OutOfScore,
                ..
            }
        )));
        // Out of score does not blow up the ship
        assert!(
            !state
                .explosions
                .iter()
                .any(|e| e.kind == ExplosionKind::Player)
        );
    }

    #[test]
    fn test_fire_rejected_at_zero() {
        let mut state = playing(quiet_tuning());
        state.score = 0;
        tick(&mut state, &fire_input());

        assert_eq!(state.score, 0);
        assert!(state.bullets.is_empty());
        assert!(state.events.contains(&GameEvent::ShotRejected));
    }

    #[test]
    fn test_game_over_is_frozen_until_restart() {
        let mut state = playing(quiet_tuning());
        state.score = 1;
        tick(&mut state, &fire_input());
        assert_eq!(state.phase, GamePhase::GameOver);

        let bullet_y = state.bullets[0].pos.y;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bullets[0].pos.y, bullet_y);

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 10);
        assert_eq!(state.lives, 3);
        assert!(state.bullets.is_empty());
        assert_eq!(state.difficulty.level, 1);
    }

    #[test]
    fn test_player_movement() {
        let mut state = playing(quiet_tuning());
        let x = state.player.pos.x;
        tick(
            &mut state,
            &TickInput {
                move_left: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.pos.x, x - 5.0);

        tick(
            &mut state,
            &TickInput {
                move_left: true,
                move_right: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.pos.x, x - 5.0);
    }

    #[test]
    fn test_level_up_grows_player_and_drops_powerup() {
        let mut state = playing(quiet_tuning());
        state.score = 20;
        tick(&mut state, &TickInput::default());

        assert_eq!(state.difficulty.level, 2);
        assert_eq!(state.player.size, 55.0);
        assert_eq!(state.powerups.len(), 1);
        assert!(state.events.contains(&GameEvent::LevelUp { level: 2 }));
        assert!(state.difficulty.asteroid_speed > 3.0);
    }

    #[test]
    fn test_time_policy_keeps_player_size() {
        let tuning = Tuning {
            difficulty_policy: DifficultyPolicy::TimeBased,
            ..quiet_tuning()
        };
        let mut state = playing(tuning);
        for _ in 0..300 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.difficulty.level, 2);
        assert_eq!(state.player.size, 50.0);
        assert_eq!(state.powerups.len(), 1);
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning {
            spawn_rate: 0.3,
            ..Tuning::default()
        };
        let mut state1 = playing(tuning.clone());
        let mut state2 = playing(tuning);

        let inputs = [
            TickInput {
                move_left: true,
                ..Default::default()
            },
            fire_input(),
            TickInput {
                move_right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.asteroids.len(), state2.asteroids.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }
}
