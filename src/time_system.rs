//! Frame clock with scaled and unscaled time domains.
//!
//! Scaled time freezes while the game is paused and drives camera motion,
//! proximity checks and clip progress. Unscaled time always advances and
//! drives fades and dial visuals so the UI stays responsive during a pause.

use crate::constants::*;

/// Time deltas for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Scaled delta (zero while paused)
    pub dt: f32,
    /// Wall-clock delta, capped at `MAX_FRAME_DT`
    pub unscaled_dt: f32,
    /// Whether scaled time was frozen this frame
    pub paused: bool,
}

impl FrameTime {
    /// A running frame where both domains advance by `dt`
    pub fn running(dt: f32) -> Self {
        Self {
            dt,
            unscaled_dt: dt,
            paused: false,
        }
    }
}

/// Global game clock (in seconds)
#[derive(Debug, Clone)]
pub struct GameClock {
    /// Accumulated scaled time
    pub time: f32,
    /// Accumulated wall-clock time
    pub unscaled_time: f32,
    paused: bool,
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            time: 0.0,
            unscaled_time: 0.0,
            paused: false,
        }
    }

    /// Advance both time domains by a raw frame delta
    pub fn advance(&mut self, raw_dt: f32) -> FrameTime {
        // Cap dt so a stalled frame doesn't teleport the camera
        let unscaled_dt = raw_dt.clamp(0.0, MAX_FRAME_DT);
        let dt = if self.paused { 0.0 } else { unscaled_dt };

        self.time += dt;
        self.unscaled_time += unscaled_dt;

        FrameTime {
            dt,
            unscaled_dt,
            paused: self.paused,
        }
    }

    /// Freeze scaled time. Returns false if already paused.
    pub fn pause(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.paused = true;
        true
    }

    /// Unfreeze scaled time. Returns false if not paused.
    pub fn resume(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        true
    }

    /// Toggle pause, returning the new paused state
    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}
