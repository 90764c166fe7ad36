//! Avatar/hazard collision oracle
//!
//! Pure closed-interval AABB test. Lanes are laterally separated, so only
//! hazards sharing the avatar's lane are tested; ties break by insertion
//! order.

use super::bounds::Aabb;
use super::hazard::HazardSet;

/// First hazard overlapping the avatar this tick, if any.
///
/// Runs against post-advance positions, same tick. Touching edges collide,
/// so a hazard spawned coincident with the avatar reports on the first
/// overlapping tick, never one late.
pub fn first_collision(
    avatar_bounds: &Aabb,
    avatar_lane: usize,
    hazards: &HazardSet,
) -> Option<u32> {
    hazards
        .iter()
        .find(|h| h.lane == avatar_lane && h.bounds().overlaps(avatar_bounds))
        .map(|h| h.id)
}
