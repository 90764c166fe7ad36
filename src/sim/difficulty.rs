//! Wall-clock difficulty ramp
//!
//! Level is a pure function of survival time and is deliberately immune to
//! the time-distortion multiplier: freezing the field never slows escalation.

use crate::tuning::DifficultyTuning;

#[derive(Debug, Clone)]
pub struct DifficultyRamp {
    tuning: DifficultyTuning,
    elapsed_ms: f64,
    level: u32,
}

impl DifficultyRamp {
    pub fn new(tuning: DifficultyTuning) -> Self {
        Self {
            tuning,
            elapsed_ms: 0.0,
            level: 0,
        }
    }

    /// Accumulate survival time, clamping negative deltas to zero.
    /// Returns the number of levels gained this tick (usually 0, can
    /// exceed 1 on a large delta).
    pub fn tick(&mut self, delta_ms: f64) -> u32 {
        self.elapsed_ms += delta_ms.max(0.0);
        let new_level = (self.elapsed_ms / self.tuning.level_interval_ms) as u32;
        let gained = new_level - self.level;
        self.level = new_level;
        gained
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Total survival time (ms); also the spawn scheduler's clock
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Current spawn interval (ms), clamped to the tuning floor
    pub fn spawn_interval_ms(&self) -> f64 {
        self.tuning.spawn_interval_ms(self.level)
    }

    /// Current hazard speed scale (1.0 at level 0)
    pub fn speed_scale(&self) -> f64 {
        self.tuning.speed_scale(self.level)
    }
}
