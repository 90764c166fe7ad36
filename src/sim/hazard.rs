//! Hazards: the obstacles scrolling toward the avatar
//!
//! `HazardSet` owns every active hazard, advances them by the effective
//! time multiplier, detects pass events, and reaps off-field entries.
//! Hazards are stored in spawn (id) order and iterated in that order for
//! determinism.

use serde::{Deserialize, Serialize};

use super::bounds::Aabb;

/// Obstacle archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Full-height blocker; the only escape is a lane change
    Barrier,
    /// Low bar, cleared by jumping
    Hurdle,
    /// Overhead drone, cleared by sliding
    Drone,
}

impl HazardKind {
    pub const ALL: [HazardKind; 3] = [HazardKind::Barrier, HazardKind::Hurdle, HazardKind::Drone];

    /// Length along the track axis
    pub fn length(&self) -> f32 {
        match self {
            HazardKind::Barrier => 1.0,
            HazardKind::Hurdle => 0.6,
            HazardKind::Drone => 1.1,
        }
    }

    /// Vertical span above the ground
    pub fn vertical_span(&self) -> (f32, f32) {
        match self {
            HazardKind::Barrier => (0.0, 2.4),
            HazardKind::Hurdle => (0.0, 0.85),
            HazardKind::Drone => (1.25, 2.05),
        }
    }

    /// Whether the hazard denies its whole lane (no in-lane dodge)
    pub fn blocks_lane(&self) -> bool {
        matches!(self, HazardKind::Barrier)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HazardKind::Barrier => "Barrier",
            HazardKind::Hurdle => "Hurdle",
            HazardKind::Drone => "Drone",
        }
    }
}

/// A single scrolling obstacle
#[derive(Debug, Clone)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    /// Lane index, 0-based from the left
    pub lane: usize,
    /// Track position of the hazard's center, ahead of the avatar when > 0
    pub position: f32,
    /// Approach speed locked in at spawn (units/s, before multipliers)
    pub base_speed: f32,
    /// Trailing edge has crossed the avatar's reference point
    pub passed: bool,
}

impl Hazard {
    /// Edge facing the avatar (leading while approaching)
    #[inline]
    pub fn leading_edge(&self) -> f32 {
        self.position - self.kind.length() / 2.0
    }

    /// Far edge; "passed" and despawn both key off this crossing
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.position + self.kind.length() / 2.0
    }

    /// Collision box in the track plane
    pub fn bounds(&self) -> Aabb {
        let (y_min, y_max) = self.kind.vertical_span();
        Aabb::from_extents(self.position, self.kind.length() / 2.0, y_min, y_max)
    }
}

/// All active hazards plus lifetime counters for the stats panel
#[derive(Debug, Clone, Default)]
pub struct HazardSet {
    hazards: Vec<Hazard>,
    next_id: u32,
    /// Hazards created over the run
    pub spawned: u32,
    /// Hazards that crossed the avatar without a collision
    pub passed: u32,
    /// Hazards reaped past the despawn boundary
    pub retired: u32,
}

impl HazardSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Hazard> {
        self.hazards.iter()
    }

    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Hazard> {
        self.hazards.iter().find(|h| h.id == id)
    }

    /// Create a hazard with its center at `position`; returns a reference
    /// to the new entry. Ids are allocated in spawn order, so pushing keeps
    /// the set id-ordered.
    pub fn spawn(
        &mut self,
        kind: HazardKind,
        lane: usize,
        position: f32,
        base_speed: f32,
    ) -> &Hazard {
        let id = self.next_id;
        self.next_id += 1;
        self.spawned += 1;
        self.hazards.push(Hazard {
            id,
            kind,
            lane,
            position,
            base_speed,
            passed: false,
        });
        // just pushed, the set is never empty here
        &self.hazards[self.hazards.len() - 1]
    }

    /// Move every hazard toward the avatar by its base speed times the
    /// effective multiplier. A multiplier of zero leaves positions exactly
    /// unchanged.
    pub fn advance(&mut self, delta_ms: f64, multiplier: f64) {
        if multiplier == 0.0 {
            return;
        }
        let step = (delta_ms.max(0.0) / 1000.0 * multiplier) as f32;
        for hazard in &mut self.hazards {
            hazard.position -= hazard.base_speed * step;
        }
    }

    /// Mark and report hazards whose trailing edge has crossed the avatar's
    /// reference point. Each hazard reports exactly once over its lifetime.
    pub fn detect_passes(&mut self, avatar_x: f32) -> Vec<u32> {
        let mut newly_passed = Vec::new();
        for hazard in &mut self.hazards {
            if !hazard.passed && hazard.trailing_edge() < avatar_x {
                hazard.passed = true;
                newly_passed.push(hazard.id);
            }
        }
        self.passed += newly_passed.len() as u32;
        newly_passed
    }

    /// Drop hazards fully past the despawn boundary; returns retired ids
    pub fn reap_off_field(&mut self, despawn_at: f32) -> Vec<u32> {
        let mut retired_ids = Vec::new();
        self.hazards.retain(|h| {
            if h.trailing_edge() < despawn_at {
                retired_ids.push(h.id);
                false
            } else {
                true
            }
        });
        self.retired += retired_ids.len() as u32;
        retired_ids
    }
}
