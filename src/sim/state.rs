//! Game state and core simulation types
//!
//! One `GameState` owns every component; no globals, no ambient clock.
//! Restart is a fresh construction, never an in-place reset.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::difficulty::DifficultyRamp;
use super::hazard::{HazardKind, HazardSet};
use super::powers::{Power, Powers};
use super::score::ScoreAccumulator;
use super::spawn::SpawnScheduler;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first input
    Ready,
    /// Active gameplay
    Playing,
    /// Everything halted: no survival time, no cooldowns, no spawns
    Paused,
    /// Run ended on a collision
    GameOver,
}

/// One-shot events reported by `tick` for the cosmetic layer and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RunStarted,
    Paused,
    Resumed,
    PowerActivated { power: Power },
    PowerDenied { power: Power },
    PowerInterrupted { power: Power },
    PowerExpired { power: Power },
    LevelUp { level: u32 },
    HazardSpawned { id: u32, kind: HazardKind, lane: usize },
    HazardPassed { id: u32 },
    HazardRetired { id: u32 },
    GameOver { hazard_id: u32, score: u64, level: u32 },
}

/// Complete game state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn RNG; all randomness flows through here
    pub rng: Pcg32,
    /// Gameplay numbers frozen in at construction
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub avatar: Avatar,
    pub powers: Powers,
    pub ramp: DifficultyRamp,
    pub spawner: SpawnScheduler,
    pub hazards: HazardSet,
    pub score: ScoreAccumulator,
}

impl GameState {
    /// Fresh run with the given seed and tuning
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Ready,
            time_ticks: 0,
            avatar: Avatar::new(tuning.track.lane_count),
            powers: Powers::new(&tuning),
            ramp: DifficultyRamp::new(tuning.difficulty),
            spawner: SpawnScheduler::new(tuning.track),
            hazards: HazardSet::new(),
            score: ScoreAccumulator::new(tuning.score),
        }
    }

    /// Seconds of play, derived from the wall-clock ramp
    pub fn elapsed_secs(&self) -> f64 {
        self.ramp.elapsed_ms() / 1000.0
    }
}
