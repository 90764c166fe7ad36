//! Chrono Dash - a lane-hopping endless runner with time-bending powers
//!
//! Core modules:
//! - `sim`: Deterministic simulation (powers, difficulty, hazards, scoring)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `highscores`: LocalStorage leaderboard

pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (120 Hz)
    pub const SIM_DT_MS: f64 = 1000.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Lateral distance between adjacent lane centers (track units)
    pub const LANE_WIDTH: f32 = 2.0;

    /// Avatar dimensions - the avatar runs in place at track position 0
    pub const AVATAR_HALF_DEPTH: f32 = 0.45;
    pub const AVATAR_STAND_HEIGHT: f32 = 1.8;
    pub const AVATAR_SLIDE_HEIGHT: f32 = 1.0;

    /// Jump arc: parabolic, clears a hurdle for the middle ~60% of the arc
    pub const JUMP_DURATION_MS: f64 = 700.0;
    pub const JUMP_PEAK_HEIGHT: f32 = 1.3;

    /// Slide duration (crouched under drones)
    pub const SLIDE_DURATION_MS: f64 = 800.0;
}

/// Lateral center of a lane, with lane 0 leftmost and the track centered on 0
#[inline]
pub fn lane_center(lane: usize, lane_count: usize) -> f32 {
    let offset = (lane_count.saturating_sub(1)) as f32 / 2.0;
    (lane as f32 - offset) * consts::LANE_WIDTH
}
