//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, with the frame delta injected by the driver
//! - Seeded RNG only
//! - Stable iteration order (by hazard ID)
//! - No rendering or platform dependencies

pub mod avatar;
pub mod bounds;
pub mod collision;
pub mod difficulty;
pub mod hazard;
pub mod powers;
pub mod score;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use avatar::{Avatar, AvatarAction};
pub use bounds::Aabb;
pub use collision::first_collision;
pub use difficulty::DifficultyRamp;
pub use hazard::{Hazard, HazardKind, HazardSet};
pub use powers::{Power, PowerTimer, Powers, TimeState};
pub use score::ScoreAccumulator;
pub use snapshot::{AvatarView, HazardView, PowerStatus, RenderSnapshot, RunStats};
pub use spawn::SpawnScheduler;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
