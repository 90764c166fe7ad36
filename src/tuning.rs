//! Data-driven game balance
//!
//! Every gameplay number lives here so balance passes never touch sim code.
//! Persisted separately from settings in LocalStorage, which lets a dev
//! console tweak values between runs without a rebuild.

use serde::{Deserialize, Serialize};

/// Timing and strength of one time-bending ability
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AbilityTuning {
    /// How long the effect lasts once activated (ms)
    pub duration_ms: f64,
    /// Cooldown measured from the moment of activation (ms)
    pub cooldown_ms: f64,
    /// Hazard speed multiplier while the effect is active
    pub multiplier: f64,
}

/// Scoring rates
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreTuning {
    /// Survival points per second of play
    pub points_per_second: f64,
    /// Flat bonus per hazard passed
    pub points_per_hazard: f64,
    /// All scoring is multiplied by this while Speed is active
    pub speed_bonus_factor: f64,
}

/// Difficulty ramp: level is a function of wall-clock survival time
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DifficultyTuning {
    /// Milliseconds of survival per difficulty level
    pub level_interval_ms: f64,
    /// Spawn interval at level 0 (ms)
    pub base_spawn_interval_ms: f64,
    /// Spawn interval reduction per level (ms)
    pub spawn_interval_step_ms: f64,
    /// Spawn interval never drops below this (ms)
    pub min_spawn_interval_ms: f64,
    /// Hazard speed scale gained per level
    pub speed_scale_step: f64,
}

impl DifficultyTuning {
    /// Spawn interval for a level, clamped to the floor
    pub fn spawn_interval_ms(&self, level: u32) -> f64 {
        let interval = self.base_spawn_interval_ms - level as f64 * self.spawn_interval_step_ms;
        interval.max(self.min_spawn_interval_ms)
    }

    /// Hazard speed scale for a level (1.0 at level 0)
    pub fn speed_scale(&self, level: u32) -> f64 {
        1.0 + level as f64 * self.speed_scale_step
    }
}

/// Track geometry and hazard motion
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrackTuning {
    /// Number of parallel lanes
    pub lane_count: usize,
    /// Track position where new hazards appear
    pub spawn_at: f32,
    /// Hazards past this position (behind the avatar) are reaped
    pub despawn_at: f32,
    /// Hazard approach speed at level 0, before multipliers (units/s)
    pub hazard_base_speed: f32,
    /// A barrier may not take the last clear lane within this distance
    /// of the spawn boundary
    pub clearance_window: f32,
}

/// Complete gameplay tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tuning {
    pub freeze: AbilityTuning,
    pub slow: AbilityTuning,
    pub speed: AbilityTuning,
    pub score: ScoreTuning,
    pub difficulty: DifficultyTuning,
    pub track: TrackTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            freeze: AbilityTuning {
                duration_ms: 2000.0,
                cooldown_ms: 5000.0,
                multiplier: 0.0,
            },
            slow: AbilityTuning {
                duration_ms: 3000.0,
                cooldown_ms: 4000.0,
                multiplier: 0.5,
            },
            speed: AbilityTuning {
                duration_ms: 1500.0,
                cooldown_ms: 6000.0,
                multiplier: 2.0,
            },
            score: ScoreTuning {
                points_per_second: 1.0,
                points_per_hazard: 5.0,
                speed_bonus_factor: 2.0,
            },
            difficulty: DifficultyTuning {
                level_interval_ms: 20_000.0,
                base_spawn_interval_ms: 1500.0,
                spawn_interval_step_ms: 150.0,
                min_spawn_interval_ms: 500.0,
                speed_scale_step: 0.2,
            },
            track: TrackTuning {
                lane_count: 3,
                spawn_at: 60.0,
                despawn_at: -12.0,
                hazard_base_speed: 12.0,
                clearance_window: 24.0,
            },
        }
    }
}

impl Tuning {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "chrono_dash_tuning";

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(tuning) = serde_json::from_str(&json) {
                    log::info!("Loaded tuning overrides from LocalStorage");
                    return tuning;
                }
            }
        }

        Self::default()
    }

    /// Save tuning to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Tuning saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
