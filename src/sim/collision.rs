//! Collision detection and resolution
//!
//! Detection is a set of pure queries over stable slices; resolution applies
//! the effects afterwards, removing entities by id. Phases always run in the
//! same order: bullets vs asteroids, player vs asteroids, player vs powerups.

use glam::Vec2;

use super::rect::Rect;
use super::state::{
    Asteroid, Bullet, Explosion, ExplosionKind, GameEvent, GameOverCause, GameState, Motion,
    Powerup,
};

/// A bullet striking an asteroid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletHit {
    pub bullet_id: u32,
    pub asteroid_id: u32,
    /// Asteroid position at the moment of impact
    pub asteroid_pos: Vec2,
    pub asteroid_size: Vec2,
}

/// What collision resolution did this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub asteroids_shot: usize,
    pub player_hits: usize,
    pub powerups_collected: usize,
    /// Lives ran out during this pass
    pub game_over: bool,
}

/// Pair each bullet with the first live asteroid it overlaps.
///
/// A bullet destroys at most one asteroid, and an asteroid already claimed by
/// an earlier bullet is skipped.
pub fn bullet_asteroid_hits(bullets: &[Bullet], asteroids: &[Asteroid]) -> Vec<BulletHit> {
    let mut claimed = vec![false; asteroids.len()];
    let mut hits = Vec::new();

    for bullet in bullets {
        let bullet_rect = bullet.bounds();
        let target = asteroids
            .iter()
            .enumerate()
            .find(|(i, asteroid)| !claimed[*i] && bullet_rect.intersects(&asteroid.bounds()));

        if let Some((i, asteroid)) = target {
            claimed[i] = true;
            hits.push(BulletHit {
                bullet_id: bullet.id,
                asteroid_id: asteroid.id,
                asteroid_pos: asteroid.pos,
                asteroid_size: asteroid.size,
            });
        }
    }

    hits
}

/// Ids of asteroids overlapping the player, in collection order
pub fn player_asteroid_hits(player: &Rect, asteroids: &[Asteroid]) -> Vec<u32> {
    asteroids
        .iter()
        .filter(|a| player.intersects(&a.bounds()))
        .map(|a| a.id)
        .collect()
}

/// Ids of powerups overlapping the player
pub fn player_powerup_hits(player: &Rect, powerups: &[Powerup]) -> Vec<u32> {
    powerups
        .iter()
        .filter(|p| player.intersects(&p.bounds()))
        .map(|p| p.id)
        .collect()
}

/// Run all collision phases and apply scoring, lives, removals and explosions.
///
/// If lives reach zero the session ends immediately; remaining player hits and
/// the powerup phase are skipped.
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();

    // --- Bullet vs asteroid ---
    let hits = bullet_asteroid_hits(&state.bullets, &state.asteroids);
    if !hits.is_empty() {
        let mut refund = 0;
        for hit in &hits {
            if let Some(bullet) = state.bullets.iter_mut().find(|b| b.id == hit.bullet_id) {
                refund += bullet.take_refund();
            }
        }
        state.score += refund + state.tuning.kill_reward * hits.len() as u64;

        let shot_bullets: Vec<u32> = hits.iter().map(|h| h.bullet_id).collect();
        let shot_asteroids: Vec<u32> = hits.iter().map(|h| h.asteroid_id).collect();
        state.bullets.retain(|b| !shot_bullets.contains(&b.id));
        state.asteroids.retain(|a| !shot_asteroids.contains(&a.id));

        for hit in &hits {
            spawn_asteroid_explosion(state, hit.asteroid_pos, hit.asteroid_size);
            state.events.push(GameEvent::AsteroidDestroyed {
                pos: hit.asteroid_pos,
                by_bullet: true,
            });
        }
        report.asteroids_shot = hits.len();
    }

    // --- Player vs asteroid ---
    let player_rect = state.player.bounds();
    let rammed = player_asteroid_hits(&player_rect, &state.asteroids);
    let mut removed = Vec::with_capacity(rammed.len());
    for id in rammed {
        let Some(asteroid) = state.asteroids.iter().find(|a| a.id == id) else {
            continue;
        };
        let (pos, size) = (asteroid.pos, asteroid.size);
        removed.push(id);

        state.lives = state.lives.saturating_sub(1);
        report.player_hits += 1;
        spawn_asteroid_explosion(state, pos, size);
        state.events.push(GameEvent::AsteroidDestroyed {
            pos,
            by_bullet: false,
        });
        state.events.push(GameEvent::PlayerHit { lives: state.lives });

        if state.lives == 0 {
            report.game_over = true;
            break;
        }
    }
    state.asteroids.retain(|a| !removed.contains(&a.id));

    if report.game_over {
        state.end_session(GameOverCause::OutOfLives);
        return report;
    }

    // --- Player vs powerup ---
    let collected = player_powerup_hits(&player_rect, &state.powerups);
    if !collected.is_empty() {
        state.powerups.retain(|p| !collected.contains(&p.id));
        for _ in &collected {
            state.score += state.tuning.powerup_bonus;
            state.events.push(GameEvent::PowerupCollected {
                bonus: state.tuning.powerup_bonus,
            });
        }
        report.powerups_collected = collected.len();
    }

    report
}

fn spawn_asteroid_explosion(state: &mut GameState, pos: Vec2, size: Vec2) {
    let id = state.next_entity_id();
    state.explosions.push(Explosion {
        id,
        kind: ExplosionKind::Asteroid,
        pos,
        size,
        frame: 0,
        duration: state.tuning.explosion_frames,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;

    fn playing_state() -> GameState {
        let tuning = Tuning {
            spawn_rate: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(tuning, 1);
        state.start_session();
        state.drain_events();
        state
    }

    fn push_asteroid(state: &mut GameState, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        state.asteroids.push(Asteroid {
            id,
            pos: Vec2::new(x, y),
            size: Vec2::splat(40.0),
            speed: 3.0,
            variant: 0,
        });
        id
    }

    fn push_bullet(state: &mut GameState, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos: Vec2::new(x, y),
            size: Vec2::new(5.0, 15.0),
            speed: 7.0,
            paid: 1,
        });
        id
    }

    #[test]
    fn test_bullet_destroys_first_asteroid_only() {
        let mut state = playing_state();
        let first = push_asteroid(&mut state, 100.0, 100.0);
        let second = push_asteroid(&mut state, 100.0, 100.0);
        push_bullet(&mut state, 110.0, 110.0);

        let report = resolve(&mut state);

        assert_eq!(report.asteroids_shot, 1);
        assert!(state.bullets.is_empty());
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.asteroids[0].id, second);
        assert_ne!(first, second);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_two_bullets_two_overlapping_asteroids() {
        let mut state = playing_state();
        push_asteroid(&mut state, 100.0, 100.0);
        push_asteroid(&mut state, 105.0, 100.0);
        push_bullet(&mut state, 110.0, 110.0);
        push_bullet(&mut state, 112.0, 110.0);

        let report = resolve(&mut state);
        assert_eq!(report.asteroids_shot, 2);
        assert!(state.asteroids.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.explosions.len(), 2);
    }

    #[test]
    fn test_hit_refunds_and_rewards() {
        let mut state = playing_state();
        state.score = 9;
        push_asteroid(&mut state, 100.0, 100.0);
        push_bullet(&mut state, 110.0, 110.0);

        resolve(&mut state);
        assert_eq!(state.score, 11);
    }

    #[test]
    fn test_player_hit_costs_a_life() {
        let mut state = playing_state();
        let p = state.player.pos;
        push_asteroid(&mut state, p.x, p.y);

        let report = resolve(&mut state);
        assert_eq!(report.player_hits, 1);
        assert_eq!(state.lives, 2);
        assert!(state.asteroids.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_fatal_hit_triggers_single_game_over() {
        let mut state = playing_state();
        state.lives = 1;
        let p = state.player.pos;
        push_asteroid(&mut state, p.x, p.y);
        push_asteroid(&mut state, p.x + 5.0, p.y);
        push_asteroid(&mut state, p.x + 10.0, p.y);

        let report = resolve(&mut state);

        assert!(report.game_over);
        assert_eq!(report.player_hits, 1);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let game_overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        let deaths = state
            .explosions
            .iter()
            .filter(|e| e.kind == ExplosionKind::Player)
            .count();
        assert_eq!(deaths, 1);
    }

    #[test]
    fn test_powerup_collected() {
        let mut state = playing_state();
        let p = state.player.pos;
        let id = state.next_entity_id();
        state.powerups.push(Powerup {
            id,
            pos: p,
            size: Vec2::splat(30.0),
            speed: 2.0,
        });

        let report = resolve(&mut state);
        assert_eq!(report.powerups_collected, 1);
        assert_eq!(state.score, 10 + 5);
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut state = playing_state();
        push_asteroid(&mut state, 0.0, 0.0);
        push_bullet(&mut state, 500.0, 300.0);

        let report = resolve(&mut state);
        assert_eq!(report, CollisionReport::default());
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.score, 10);
    }
}
