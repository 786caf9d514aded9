//! Fixed-timestep accumulator
//!
//! Decouples the simulation rate from the display rate: the host feeds real
//! frame durations and runs as many whole ticks as have accumulated.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
    dropped_ticks: u64,
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
            step,
            max_substeps: max_substeps.max(1),
            dropped_ticks: 0,
        }
    }

    /// Add a frame's elapsed time and return how many ticks to run now.
    ///
    /// At most `max_substeps` ticks are returned; any backlog beyond that is
    /// discarded so a long stall cannot snowball.
    pub fn advance(&mut self, frame_secs: f32) -> u32 {
        self.accumulator += frame_secs.max(0.0);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }

        if self.accumulator >= self.step {
            let backlog = (self.accumulator / self.step) as u64;
            log::debug!("Fixed timestep dropping {} ticks of backlog", backlog);
            self.dropped_ticks += backlog;
            self.accumulator %= self.step;
        }

        ticks
    }

    /// Fraction of a tick left in the accumulator (for render interpolation)
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    /// Total ticks discarded because of the substep cap
    pub fn dropped_ticks(&self) -> u64 {
        self.dropped_ticks
    }
}
