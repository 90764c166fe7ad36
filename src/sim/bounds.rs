//! Axis-aligned bounds for avatar/hazard overlap tests
//!
//! The track is straight, so collision shapes are plain rectangles in the
//! track plane: x runs along the track (avatar at 0, hazards approach from
//! +x), y is height above the ground. Lanes are laterally separated and
//! discrete, so the lateral axis never enters the overlap test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in the track plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Build from a track-axis center/half-length plus a vertical span
    pub fn from_extents(center_x: f32, half_len: f32, y_min: f32, y_max: f32) -> Self {
        Self {
            min: Vec2::new(center_x - half_len, y_min),
            max: Vec2::new(center_x + half_len, y_max),
        }
    }

    /// Length along the track axis
    #[inline]
    pub fn len_x(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Vertical extent
    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Overlap test over closed intervals: touching edges count as overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Check if a point is inside (closed intervals)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
