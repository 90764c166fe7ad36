//! Time-bending powers: Freeze, Slow, Speed
//!
//! Three independent active/cooldown timers plus a coordinator that enforces
//! mutual exclusion and derives the single speed multiplier the rest of the
//! sim consumes. Cooldowns run from the moment of activation, concurrently
//! with the active window, so switching powers never refunds or extends the
//! interrupted power's cooldown.

use serde::{Deserialize, Serialize};

use crate::tuning::{AbilityTuning, Tuning};

/// The three player abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Power {
    Freeze,
    Slow,
    Speed,
}

impl Power {
    /// All powers, in precedence order (Frozen > Slowed > Accelerated)
    pub const ALL: [Power; 3] = [Power::Freeze, Power::Slow, Power::Speed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Power::Freeze => "Freeze",
            Power::Slow => "Slow",
            Power::Speed => "Speed",
        }
    }
}

/// Effective time distortion, derived from whichever power is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeState {
    Frozen,
    Slowed,
    Accelerated,
    #[default]
    Normal,
}

impl TimeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeState::Frozen => "Frozen",
            TimeState::Slowed => "Slowed",
            TimeState::Accelerated => "Accelerated",
            TimeState::Normal => "Normal",
        }
    }
}

/// Active/cooldown countdown for one ability
#[derive(Debug, Clone, Copy)]
pub struct PowerTimer {
    tuning: AbilityTuning,
    remaining_active_ms: f64,
    remaining_cooldown_ms: f64,
}

impl PowerTimer {
    pub fn new(tuning: AbilityTuning) -> Self {
        Self {
            tuning,
            remaining_active_ms: 0.0,
            remaining_cooldown_ms: 0.0,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining_active_ms > 0.0
    }

    /// Ready to activate: inactive and off cooldown
    #[inline]
    pub fn is_ready(&self) -> bool {
        !self.is_active() && self.remaining_cooldown_ms <= 0.0
    }

    /// Hazard speed multiplier while this power is active
    #[inline]
    pub fn multiplier(&self) -> f64 {
        self.tuning.multiplier
    }

    /// Start the active window and the full cooldown together.
    ///
    /// Returns false with no side effect while active or cooling down;
    /// activation is advisory, never an error.
    pub fn try_activate(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.remaining_active_ms = self.tuning.duration_ms;
        self.remaining_cooldown_ms = self.tuning.cooldown_ms;
        true
    }

    /// Cut the active window short; the cooldown keeps running
    pub fn force_deactivate(&mut self) {
        self.remaining_active_ms = 0.0;
    }

    /// Advance both countdowns, clamping negative deltas to zero.
    /// Returns true if the active window expired on this tick.
    pub fn tick(&mut self, delta_ms: f64) -> bool {
        let delta_ms = delta_ms.max(0.0);
        let was_active = self.is_active();
        self.remaining_active_ms = (self.remaining_active_ms - delta_ms).max(0.0);
        self.remaining_cooldown_ms = (self.remaining_cooldown_ms - delta_ms).max(0.0);
        was_active && !self.is_active()
    }

    /// Fraction of the active window remaining (0 when inactive), for HUD
    pub fn active_fraction(&self) -> f64 {
        if self.tuning.duration_ms <= 0.0 {
            return 0.0;
        }
        (self.remaining_active_ms / self.tuning.duration_ms).clamp(0.0, 1.0)
    }

    /// Fraction of the cooldown remaining (0 when ready), for HUD
    pub fn cooldown_fraction(&self) -> f64 {
        if self.tuning.cooldown_ms <= 0.0 {
            return 0.0;
        }
        (self.remaining_cooldown_ms / self.tuning.cooldown_ms).clamp(0.0, 1.0)
    }

    pub fn remaining_active_ms(&self) -> f64 {
        self.remaining_active_ms
    }

    pub fn remaining_cooldown_ms(&self) -> f64 {
        self.remaining_cooldown_ms
    }
}

/// The power coordinator: three timers indexed by `Power`
#[derive(Debug, Clone)]
pub struct Powers {
    timers: [PowerTimer; 3],
}

impl Powers {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            timers: [
                PowerTimer::new(tuning.freeze),
                PowerTimer::new(tuning.slow),
                PowerTimer::new(tuning.speed),
            ],
        }
    }

    #[inline]
    pub fn timer(&self, power: Power) -> &PowerTimer {
        &self.timers[power as usize]
    }

    fn timer_mut(&mut self, power: Power) -> &mut PowerTimer {
        &mut self.timers[power as usize]
    }

    /// Which power is currently active, if any
    pub fn active_power(&self) -> Option<Power> {
        Power::ALL.into_iter().find(|&p| self.timer(p).is_active())
    }

    /// Activate a power, force-deactivating whichever other power is active.
    /// The interrupted power's running cooldown is untouched. Returns false
    /// with no side effect if the target is active or cooling down.
    pub fn try_activate(&mut self, power: Power) -> bool {
        if !self.timer(power).is_ready() {
            return false;
        }
        for other in Power::ALL {
            if other != power {
                self.timer_mut(other).force_deactivate();
            }
        }
        self.timer_mut(power).try_activate()
    }

    /// Advance all timers. Mutual exclusion means at most one power can be
    /// active, so at most one can expire per tick; returns it if so.
    pub fn tick(&mut self, delta_ms: f64) -> Option<Power> {
        let mut expired = None;
        for power in Power::ALL {
            if self.timer_mut(power).tick(delta_ms) {
                expired = Some(power);
            }
        }
        expired
    }

    /// Effective time distortion, precedence Frozen > Slowed > Accelerated
    pub fn time_state(&self) -> TimeState {
        if self.timer(Power::Freeze).is_active() {
            TimeState::Frozen
        } else if self.timer(Power::Slow).is_active() {
            TimeState::Slowed
        } else if self.timer(Power::Speed).is_active() {
            TimeState::Accelerated
        } else {
            TimeState::Normal
        }
    }

    /// Hazard-speed multiplier consumed by hazard motion and scoring
    pub fn multiplier(&self) -> f64 {
        match self.active_power() {
            Some(power) => self.timer(power).multiplier(),
            None => 1.0,
        }
    }

    /// Scoring doubles while Speed is active
    pub fn score_boost_active(&self) -> bool {
        self.timer(Power::Speed).is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn powers() -> Powers {
        Powers::new(&Tuning::default())
    }

    #[test]
    fn test_activate_and_expire() {
        let mut p = powers();
        assert!(p.try_activate(Power::Freeze));
        assert!(p.timer(Power::Freeze).is_active());
        assert_eq!(p.tick(1000.0), None);
        assert!(p.timer(Power::Freeze).is_active());
        assert_eq!(p.tick(1000.0), Some(Power::Freeze));
        assert!(!p.timer(Power::Freeze).is_active());
        // cooldown started at activation: 5000 - 2000 elapsed
        assert!((p.timer(Power::Freeze).remaining_cooldown_ms() - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn test_denied_while_active_or_cooling() {
        let mut p = powers();
        assert!(p.try_activate(Power::Slow));
        assert!(!p.try_activate(Power::Slow));
        p.tick(3000.0); // active window over, cooldown has 1000 left
        assert!(!p.try_activate(Power::Slow));
        p.tick(1000.0);
        assert!(p.try_activate(Power::Slow));
    }

    #[test]
    fn test_cooldown_concurrent_with_active_window() {
        // A duration longer than its cooldown leaves the timer ready the
        // moment the active window ends
        let tuning = AbilityTuning {
            duration_ms: 3000.0,
            cooldown_ms: 1000.0,
            multiplier: 0.5,
        };
        let mut t = PowerTimer::new(tuning);
        assert!(t.try_activate());
        t.tick(2000.0);
        assert!(t.is_active());
        assert_eq!(t.remaining_cooldown_ms(), 0.0);
        t.tick(1000.0);
        assert!(t.is_ready());
    }

    #[test]
    fn test_interruption_preserves_cooldown() {
        let mut p = powers();
        assert!(p.try_activate(Power::Freeze));
        p.tick(500.0);
        assert!(p.try_activate(Power::Slow));
        // freeze was cut short, its cooldown keeps its elapsed progress
        assert!(!p.timer(Power::Freeze).is_active());
        assert!((p.timer(Power::Freeze).remaining_cooldown_ms() - 4500.0).abs() < 1e-9);
        assert!(p.timer(Power::Slow).is_active());
        assert!((p.timer(Power::Slow).remaining_active_ms() - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn test_denied_activation_has_no_side_effect() {
        let mut p = powers();
        assert!(p.try_activate(Power::Slow));
        p.tick(3100.0); // slow expired, 900 ms of its cooldown left
        assert!(p.try_activate(Power::Freeze));
        // slow is still cooling: the denial must not touch active freeze
        assert!(!p.try_activate(Power::Slow));
        assert!(p.timer(Power::Freeze).is_active());
        // requesting the active power again is also a pure no-op
        assert!(!p.try_activate(Power::Freeze));
        assert!(p.timer(Power::Freeze).is_active());
    }

    #[test]
    fn test_at_most_one_active() {
        let mut p = powers();
        assert!(p.try_activate(Power::Speed));
        assert!(p.try_activate(Power::Freeze));
        let active: Vec<Power> = Power::ALL
            .into_iter()
            .filter(|&pw| p.timer(pw).is_active())
            .collect();
        assert_eq!(active, vec![Power::Freeze]);
    }

    #[test]
    fn test_multiplier_values() {
        let mut p = powers();
        assert_eq!(p.multiplier(), 1.0);
        assert_eq!(p.time_state(), TimeState::Normal);

        assert!(p.try_activate(Power::Freeze));
        assert_eq!(p.multiplier(), 0.0);
        assert_eq!(p.time_state(), TimeState::Frozen);
        p.tick(2000.0);
        p.tick(3000.0); // freeze off cooldown at 5000

        assert!(p.try_activate(Power::Slow));
        assert_eq!(p.multiplier(), 0.5);
        assert_eq!(p.time_state(), TimeState::Slowed);

        assert!(p.try_activate(Power::Speed));
        assert_eq!(p.multiplier(), 2.0);
        assert_eq!(p.time_state(), TimeState::Accelerated);
        assert!(p.score_boost_active());
    }

    #[test]
    fn test_negative_delta_clamped() {
        let mut p = powers();
        assert!(p.try_activate(Power::Freeze));
        let before_active = p.timer(Power::Freeze).remaining_active_ms();
        let before_cd = p.timer(Power::Freeze).remaining_cooldown_ms();
        p.tick(-250.0);
        assert_eq!(p.timer(Power::Freeze).remaining_active_ms(), before_active);
        assert_eq!(p.timer(Power::Freeze).remaining_cooldown_ms(), before_cd);
    }

    #[test]
    fn test_status_fractions() {
        let mut p = powers();
        assert_eq!(p.timer(Power::Freeze).active_fraction(), 0.0);
        assert_eq!(p.timer(Power::Freeze).cooldown_fraction(), 0.0);

        assert!(p.try_activate(Power::Freeze));
        p.tick(1000.0);
        assert!((p.timer(Power::Freeze).active_fraction() - 0.5).abs() < 1e-9);
        assert!((p.timer(Power::Freeze).cooldown_fraction() - 0.8).abs() < 1e-9);

        p.tick(1000.0);
        assert_eq!(p.timer(Power::Freeze).active_fraction(), 0.0);
    }

    #[test]
    fn test_expiry_only_reported_once() {
        let mut p = powers();
        assert!(p.try_activate(Power::Speed));
        assert_eq!(p.tick(1500.0), Some(Power::Speed));
        assert_eq!(p.tick(1.0), None);
        assert_eq!(p.tick(10_000.0), None);
    }

    #[test]
    fn test_force_deactivate_not_reported_as_expiry() {
        let mut p = powers();
        assert!(p.try_activate(Power::Freeze));
        assert!(p.try_activate(Power::Slow)); // interrupts freeze
        // the next tick must report only natural expiries
        assert_eq!(p.tick(3000.0), Some(Power::Slow));
    }
}
