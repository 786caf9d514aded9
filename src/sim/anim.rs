//! Tick-driven animation clocks
//!
//! Only animations that gate gameplay live in the simulation: the player
//! emote (interruptible, ends the emote state) and the boss explosion (its
//! final frame removes the boss).

/// One-shot frame counter for a clip of `frames` frames, `ticks_per_frame` ticks each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    frames: u32,
    ticks_per_frame: u32,
    frame: u32,
    tick: u32,
    finished: bool,
}

impl Animation {
    pub fn one_shot(frames: u32, ticks_per_frame: u32) -> Self {
        Self {
            frames: frames.max(1),
            ticks_per_frame: ticks_per_frame.max(1),
            frame: 0,
            tick: 0,
            finished: false,
        }
    }

    /// Advance one tick. Returns true on the tick the clip completes its
    /// final frame.
    pub fn advance(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.tick += 1;
        if self.tick < self.ticks_per_frame {
            return false;
        }
        self.tick = 0;
        if self.frame + 1 < self.frames {
            self.frame += 1;
            false
        } else {
            self.finished = true;
            true
        }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Total ticks a one-shot clip runs for
    pub fn duration_ticks(&self) -> u32 {
        self.frames * self.ticks_per_frame
    }
}
