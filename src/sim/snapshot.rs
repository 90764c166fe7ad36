//! Render snapshot: the sim's read-only view for the presentation layer
//!
//! One `capture` pass copies everything a renderer or HUD needs into plain
//! serializable data. JSON is the only channel the cosmetic side gets, so
//! nothing there can reach back into the sim.

use serde::Serialize;

use super::avatar::AvatarAction;
use super::bounds::Aabb;
use super::hazard::HazardKind;
use super::powers::{Power, TimeState};
use super::state::{GamePhase, GameState};
use crate::lane_center;

/// One ability button's display state
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PowerStatus {
    pub power: Power,
    pub active: bool,
    pub ready: bool,
    /// Fraction of the active window left, 0 when idle
    pub active_fraction: f64,
    /// Fraction of the cooldown left, 0 when ready
    pub cooldown_fraction: f64,
}

/// A hazard as the renderer sees it
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HazardView {
    pub id: u32,
    pub kind: HazardKind,
    pub lane: usize,
    /// Lane center offset on the lateral axis
    pub lateral: f32,
    /// Track position of the hazard's center
    pub position: f32,
    pub bounds: Aabb,
    pub passed: bool,
}

/// The avatar as the renderer sees it
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AvatarView {
    pub lane: usize,
    pub lateral: f32,
    pub action: AvatarAction,
    pub bounds: Aabb,
}

/// Lifetime counters for the stats readout
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunStats {
    pub spawned: u32,
    pub passed: u32,
    pub retired: u32,
}

/// Complete per-frame view of the run
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub time_state: TimeState,
    /// Truncated display score
    pub score: u64,
    pub level: u32,
    pub elapsed_ms: f64,
    pub avatar: AvatarView,
    pub hazards: Vec<HazardView>,
    pub powers: [PowerStatus; 3],
    pub stats: RunStats,
}

impl RenderSnapshot {
    /// Copy the current frame out of the state
    pub fn capture(state: &GameState) -> Self {
        let lane_count = state.tuning.track.lane_count;

        let avatar = AvatarView {
            lane: state.avatar.lane,
            lateral: lane_center(state.avatar.lane, lane_count),
            action: state.avatar.action,
            bounds: state.avatar.bounds(),
        };

        let hazards = state
            .hazards
            .iter()
            .map(|h| HazardView {
                id: h.id,
                kind: h.kind,
                lane: h.lane,
                lateral: lane_center(h.lane, lane_count),
                position: h.position,
                bounds: h.bounds(),
                passed: h.passed,
            })
            .collect();

        let powers = Power::ALL.map(|power| {
            let timer = state.powers.timer(power);
            PowerStatus {
                power,
                active: timer.is_active(),
                ready: timer.is_ready(),
                active_fraction: timer.active_fraction(),
                cooldown_fraction: timer.cooldown_fraction(),
            }
        });

        RenderSnapshot {
            phase: state.phase,
            time_state: state.powers.time_state(),
            score: state.score.display(),
            level: state.ramp.level(),
            elapsed_ms: state.ramp.elapsed_ms(),
            avatar,
            hazards,
            powers,
            stats: RunStats {
                spawned: state.hazards.spawned,
                passed: state.hazards.passed,
                retired: state.hazards.retired,
            },
        }
    }

    /// JSON for the presentation boundary. Serializing plain data cannot
    /// fail in practice; errors collapse to an empty object.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".into())
    }
}
