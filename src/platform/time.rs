//! Fixed-timestep accumulator
//!
//! Wall-clock frame time goes in, a whole number of simulation ticks comes
//! out. Long frames are clamped so a stall never turns into a burst of
//! catch-up ticks.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame we are willing to simulate, in seconds
pub const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step: step.max(f32::EPSILON),
            max_substeps: max_substeps.max(1),
        }
    }

    /// Build from a tick rate in Hz
    pub fn from_rate(tick_rate: u32) -> Self {
        Self::new(1.0 / tick_rate.max(1) as f32, MAX_SUBSTEPS)
    }

    /// Feed one frame's elapsed seconds; returns how many ticks to run now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        // Anything still owed after the cap is dropped
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        substeps
    }

    /// Forget any partial tick and owed backlog (after a phase change)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
