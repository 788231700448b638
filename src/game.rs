//! Session driver
//!
//! Wraps the pure simulation with the one side effect it needs: the high
//! score store. The record is reloaded whenever a session starts and checked
//! exactly once when it ends.

use crate::highscores::HighScoreRecord;
use crate::persistence::HighScoreStore;
use crate::renderer::FrameSnapshot;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

pub struct Game<S: HighScoreStore> {
    state: GameState,
    store: S,
    record: HighScoreRecord,
    /// Set when the last finished session beat the record
    new_record: bool,
    events: Vec<GameEvent>,
}

impl<S: HighScoreStore> Game<S> {
    pub fn new(tuning: Tuning, mut store: S, seed: u64) -> Self {
        let record = store.load();
        log::info!(
            "Game created (seed {}, {} difficulty)",
            seed,
            tuning.difficulty_policy.as_str()
        );
        Self {
            state: GameState::new(tuning, seed),
            store,
            record,
            new_record: false,
            events: Vec::new(),
        }
    }

    /// Run one simulation tick and react to what happened.
    /// Returns the tick's events.
    pub fn step(&mut self, input: &TickInput) -> &[GameEvent] {
        tick(&mut self.state, input);
        self.events = self.state.drain_events();

        for event in &self.events {
            match *event {
                GameEvent::SessionStarted => {
                    self.record = self.store.load();
                    self.new_record = false;
                }
                GameEvent::GameOver { score, level, .. } => {
                    self.new_record = self.record.record(score, level);
                    if self.new_record {
                        if let Err(e) = self.store.save(&self.record) {
                            log::warn!("Could not save high scores: {}", e);
                        }
                    }
                }
                _ => {}
            }
        }

        &self.events
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state, &self.record, self.new_record)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn record(&self) -> HighScoreRecord {
        self.record
    }

    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted setups (tests, demos)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
