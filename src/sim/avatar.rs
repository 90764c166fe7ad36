//! The running avatar
//!
//! Input-layer collaborator: turns lane-change/jump/slide intents into the
//! lane index and bounds rectangle the core consumes. The avatar never moves
//! along the track; hazards come to it at x = 0.

use serde::{Deserialize, Serialize};

use super::bounds::Aabb;
use crate::consts::*;

/// What the avatar is doing; the elapsed clock drives pose and animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AvatarAction {
    Running,
    Jumping { elapsed_ms: f64 },
    Sliding { elapsed_ms: f64 },
}

#[derive(Debug, Clone)]
pub struct Avatar {
    /// Lane index, 0-based from the left
    pub lane: usize,
    lane_count: usize,
    pub action: AvatarAction,
}

impl Avatar {
    /// Start in the middle lane, running
    pub fn new(lane_count: usize) -> Self {
        Self {
            lane: lane_count / 2,
            lane_count,
            action: AvatarAction::Running,
        }
    }

    /// Shift one lane; clamped at the track edges
    pub fn move_left(&mut self) {
        if self.lane > 0 {
            self.lane -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.lane + 1 < self.lane_count {
            self.lane += 1;
        }
    }

    /// Start a jump; ignored mid-jump or mid-slide
    pub fn jump(&mut self) {
        if self.action == AvatarAction::Running {
            self.action = AvatarAction::Jumping { elapsed_ms: 0.0 };
        }
    }

    /// Start a slide; ignored mid-jump or mid-slide
    pub fn slide(&mut self) {
        if self.action == AvatarAction::Running {
            self.action = AvatarAction::Sliding { elapsed_ms: 0.0 };
        }
    }

    /// Advance the jump/slide clock
    pub fn tick(&mut self, delta_ms: f64) {
        let delta_ms = delta_ms.max(0.0);
        match &mut self.action {
            AvatarAction::Running => {}
            AvatarAction::Jumping { elapsed_ms } => {
                *elapsed_ms += delta_ms;
                if *elapsed_ms >= JUMP_DURATION_MS {
                    self.action = AvatarAction::Running;
                }
            }
            AvatarAction::Sliding { elapsed_ms } => {
                *elapsed_ms += delta_ms;
                if *elapsed_ms >= SLIDE_DURATION_MS {
                    self.action = AvatarAction::Running;
                }
            }
        }
    }

    /// Feet height above the ground: a parabolic arc while jumping
    pub fn foot_height(&self) -> f32 {
        match self.action {
            AvatarAction::Jumping { elapsed_ms } => {
                let t = (elapsed_ms / JUMP_DURATION_MS).clamp(0.0, 1.0) as f32;
                4.0 * JUMP_PEAK_HEIGHT * t * (1.0 - t)
            }
            _ => 0.0,
        }
    }

    /// Collision box for this tick's pose
    pub fn bounds(&self) -> Aabb {
        let foot = self.foot_height();
        let height = match self.action {
            AvatarAction::Sliding { .. } => AVATAR_SLIDE_HEIGHT,
            _ => AVATAR_STAND_HEIGHT,
        };
        Aabb::from_extents(0.0, AVATAR_HALF_DEPTH, foot, foot + height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_changes_clamp_at_edges() {
        let mut a = Avatar::new(3);
        assert_eq!(a.lane, 1);
        a.move_left();
        assert_eq!(a.lane, 0);
        a.move_left();
        assert_eq!(a.lane, 0);
        a.move_right();
        a.move_right();
        assert_eq!(a.lane, 2);
        a.move_right();
        assert_eq!(a.lane, 2);
    }

    #[test]
    fn test_jump_arc_peaks_mid_flight() {
        let mut a = Avatar::new(3);
        a.jump();
        assert_eq!(a.foot_height(), 0.0);
        a.tick(JUMP_DURATION_MS / 2.0);
        assert!((a.foot_height() - JUMP_PEAK_HEIGHT).abs() < 1e-5);
        a.tick(JUMP_DURATION_MS / 2.0);
        assert_eq!(a.action, AvatarAction::Running);
        assert_eq!(a.foot_height(), 0.0);
    }

    #[test]
    fn test_jump_clears_hurdle_mid_window() {
        // feet above a 0.85-high bar for the middle of the arc
        let mut a = Avatar::new(3);
        a.jump();
        a.tick(250.0);
        assert!(a.bounds().min.y > 0.85);
        a.tick(200.0); // 450 ms in, still airborne high enough
        assert!(a.bounds().min.y > 0.85);
    }

    #[test]
    fn test_slide_lowers_profile() {
        let mut a = Avatar::new(3);
        a.slide();
        let b = a.bounds();
        assert_eq!(b.min.y, 0.0);
        assert!((b.max.y - AVATAR_SLIDE_HEIGHT).abs() < 1e-6);
        // below a drone's 1.25 underside
        assert!(b.max.y < 1.25);
        a.tick(SLIDE_DURATION_MS);
        assert_eq!(a.action, AvatarAction::Running);
        assert!((a.bounds().max.y - AVATAR_STAND_HEIGHT).abs() < 1e-6);
    }

    #[test]
    fn test_actions_do_not_interrupt_each_other() {
        let mut a = Avatar::new(3);
        a.jump();
        a.slide();
        assert!(matches!(a.action, AvatarAction::Jumping { .. }));
        a.tick(100.0);
        a.jump(); // re-trigger mid-air is ignored
        assert_eq!(a.action, AvatarAction::Jumping { elapsed_ms: 100.0 });
    }

    #[test]
    fn test_standing_bounds() {
        let a = Avatar::new(3);
        let b = a.bounds();
        assert!((b.min.x + AVATAR_HALF_DEPTH).abs() < 1e-6);
        assert!((b.max.x - AVATAR_HALF_DEPTH).abs() < 1e-6);
        assert_eq!(b.min.y, 0.0);
        assert!((b.max.y - AVATAR_STAND_HEIGHT).abs() < 1e-6);
    }
}
