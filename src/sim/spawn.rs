//! Hazard spawning
//!
//! Spawn cadence follows wall-clock play time, not distorted time: hazards
//! keep arriving at the boundary while Freeze holds the field still. The
//! lane guard below is what keeps those frozen pile-ups survivable.

use rand::Rng;
use rand_pcg::Pcg32;

use super::difficulty::DifficultyRamp;
use super::hazard::{Hazard, HazardKind, HazardSet};
use crate::tuning::TrackTuning;

#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    track: TrackTuning,
    last_spawn_ms: f64,
}

impl SpawnScheduler {
    pub fn new(track: TrackTuning) -> Self {
        Self {
            track,
            last_spawn_ms: 0.0,
        }
    }

    /// Spawn one hazard if the current interval has elapsed since the last
    /// spawn. Kind is uniform; lane is uniform over permitted lanes; base
    /// speed is locked to the current difficulty scale.
    pub fn maybe_spawn<'a>(
        &mut self,
        elapsed_ms: f64,
        ramp: &DifficultyRamp,
        hazards: &'a mut HazardSet,
        rng: &mut Pcg32,
    ) -> Option<&'a Hazard> {
        if elapsed_ms - self.last_spawn_ms < ramp.spawn_interval_ms() {
            return None;
        }
        self.last_spawn_ms = elapsed_ms;

        let kind = HazardKind::ALL[rng.random_range(0..HazardKind::ALL.len())];
        let lane = self.pick_lane(kind, hazards, rng);
        let base_speed = self.track.hazard_base_speed * ramp.speed_scale() as f32;

        Some(hazards.spawn(kind, lane, self.track.spawn_at, base_speed))
    }

    /// Lane choice under the avoidability invariant: inside the clearance
    /// window behind the spawn boundary, at least one lane must stay free of
    /// Barriers. A Barrier headed for the last clear lane is diverted into an
    /// already-blocked one; non-blocking kinds go anywhere.
    fn pick_lane(&self, kind: HazardKind, hazards: &HazardSet, rng: &mut Pcg32) -> usize {
        let lane_count = self.track.lane_count;
        if !kind.blocks_lane() {
            return rng.random_range(0..lane_count);
        }

        let blocked = self.blocked_lanes(hazards);
        let clear_count = blocked.iter().filter(|&&b| !b).count();

        if clear_count <= 1 {
            // divert: only lanes that are already blocked are permitted
            let permitted: Vec<usize> = (0..lane_count).filter(|&l| blocked[l]).collect();
            if permitted.is_empty() {
                // single-lane track; nothing to divert into
                return rng.random_range(0..lane_count);
            }
            permitted[rng.random_range(0..permitted.len())]
        } else {
            rng.random_range(0..lane_count)
        }
    }

    /// Lanes holding a Barrier within the clearance window of the spawn
    /// boundary
    fn blocked_lanes(&self, hazards: &HazardSet) -> Vec<bool> {
        let mut blocked = vec![false; self.track.lane_count];
        let window_start = self.track.spawn_at - self.track.clearance_window;
        for hazard in hazards.iter() {
            if hazard.kind.blocks_lane()
                && hazard.position >= window_start
                && hazard.lane < blocked.len()
            {
                blocked[hazard.lane] = true;
            }
        }
        blocked
    }
}
