//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (delays measured in simulation ms)
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod aim;
pub mod collision;
pub mod effects;
pub mod level;
pub mod modes;
pub mod physics;
pub mod schedule;
pub mod snapshot;
pub mod state;
pub mod stats;
pub mod tick;

pub use aim::{AimState, Launch};
pub use collision::{ObstacleResponse, classify_ring, ring_points};
pub use effects::{Effect, EffectKind};
pub use level::select_mode;
pub use modes::{GameMode, ModeRegistry};
pub use physics::predict_trajectory;
pub use schedule::{Deferred, Scheduler};
pub use snapshot::Snapshot;
pub use state::{
    Archer, Arrow, GameState, LevelState, Obstacle, ObstacleKind, Ring, Target, TargetBehavior,
    Wind,
};
pub use stats::{GameStats, ShotOutcome};
pub use tick::{InputEvent, TickInput, tick};
