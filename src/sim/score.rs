//! Score accrual
//!
//! Survival points integrate in real numbers every tick; the display value
//! truncates toward zero, never rounds. Both the trickle and the per-pass
//! bonus double while Speed is active.

use crate::tuning::ScoreTuning;

#[derive(Debug, Clone)]
pub struct ScoreAccumulator {
    tuning: ScoreTuning,
    score: f64,
}

impl ScoreAccumulator {
    pub fn new(tuning: ScoreTuning) -> Self {
        Self { tuning, score: 0.0 }
    }

    /// Survival trickle for one tick, clamping negative deltas to zero
    pub fn tick(&mut self, delta_ms: f64, speed_active: bool) {
        let delta_ms = delta_ms.max(0.0);
        self.score += delta_ms / 1000.0 * self.tuning.points_per_second * self.boost(speed_active);
    }

    /// Flat bonus per hazard passed
    pub fn on_hazards_passed(&mut self, count: usize, speed_active: bool) {
        self.score += count as f64 * self.tuning.points_per_hazard * self.boost(speed_active);
    }

    fn boost(&self, speed_active: bool) -> f64 {
        if speed_active {
            self.tuning.speed_bonus_factor
        } else {
            1.0
        }
    }

    /// Exact internal value
    pub fn value(&self) -> f64 {
        self.score
    }

    /// HUD value: truncated toward zero
    pub fn display(&self) -> u64 {
        self.score as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn score() -> ScoreAccumulator {
        ScoreAccumulator::new(Tuning::default().score)
    }

    #[test]
    fn test_survival_rate() {
        let mut s = score();
        for _ in 0..10 {
            s.tick(1000.0, false);
        }
        assert_eq!(s.value(), 10.0);
        assert_eq!(s.display(), 10);
    }

    #[test]
    fn test_display_truncates() {
        let mut s = score();
        s.tick(10_900.0, false);
        assert!((s.value() - 10.9).abs() < 1e-9);
        assert_eq!(s.display(), 10);
    }

    #[test]
    fn test_pass_bonus() {
        let mut s = score();
        s.on_hazards_passed(1, false);
        assert_eq!(s.value(), 5.0);
        s.on_hazards_passed(3, false);
        assert_eq!(s.value(), 20.0);
    }

    #[test]
    fn test_speed_doubles_everything() {
        let mut s = score();
        s.tick(1000.0, true);
        assert_eq!(s.value(), 2.0);
        s.on_hazards_passed(1, true);
        assert_eq!(s.value(), 12.0);
    }

    #[test]
    fn test_negative_delta_clamped() {
        let mut s = score();
        s.tick(500.0, false);
        s.tick(-500.0, false);
        assert_eq!(s.value(), 0.5);
    }

    #[test]
    fn test_never_negative() {
        let mut s = score();
        s.tick(-1e9, true);
        s.on_hazards_passed(0, false);
        assert!(s.value() >= 0.0);
        assert_eq!(s.display(), 0);
    }
}
