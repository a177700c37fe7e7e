//! Bullseye - archery projectile-physics simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ballistics, collisions, levels, scoring)
//! - `platform`: Frame clock and host input queue
//! - `game`: Host-facing facade driving the simulation from real time
//! - `config`: Data-driven tuning with validation

pub mod config;
pub mod error;
pub mod game;
pub mod platform;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{PhysicsTuning, SimConfig};
pub use error::SimError;
pub use game::Game;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (60 Hz)
    pub const TICK_HZ: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default play field (16:9), small enough that every target spawn
    /// point is inside launch range
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 450.0;

    /// Ballistics, per tick
    pub const GRAVITY: f32 = 0.4;
    pub const DRAG: f32 = 0.99;
    pub const MAX_VELOCITY: f32 = 25.0;
    pub const MIN_VELOCITY: f32 = 3.0;
    /// Pull distance (px) to launch speed
    pub const VELOCITY_SCALE: f32 = 0.15;
    /// Ground line height above the bottom edge
    pub const GROUND_LEVEL: f32 = 20.0;

    /// Arrows this far past the side edges are culled
    pub const BOUNDS_MARGIN: f32 = 50.0;
    /// Ground impacts faster than this bounce instead of sticking
    pub const GROUND_BOUNCE_MIN_SPEED: f32 = 2.0;
    pub const GROUND_RESTITUTION: f32 = 0.3;
    pub const GROUND_FRICTION: f32 = 0.7;
    pub const BOUNCER_RESTITUTION: f32 = 0.8;
    /// Distance a bounced arrow is placed outside the bouncer
    pub const BOUNCER_NUDGE: f32 = 5.0;
    pub const SPINNER_SPEED_RETAIN: f32 = 0.7;

    /// Archer body
    pub const ARCHER_X: f32 = 100.0;
    pub const ARCHER_WIDTH: f32 = 40.0;
    pub const ARCHER_HEIGHT: f32 = 80.0;

    /// Pulls shorter than this count as no pull at all
    pub const AIM_DEAD_ZONE: f32 = 20.0;
    /// Pointer-down within this radius of the archer is a "good" aim start
    pub const AIM_VALID_RADIUS: f32 = 150.0;
    /// Full power at this fraction of the short field side
    pub const MAX_PULL_FRACTION: f32 = 0.4;
    /// Trajectory preview length (steps)
    pub const TRAJECTORY_STEPS: usize = 150;

    /// Arrow trail samples kept
    pub const TRAIL_LENGTH: usize = 8;
    /// Recent shots kept in stats
    pub const RECENT_SHOTS: usize = 8;

    /// Deferred-task delays (simulation ms)
    pub const ARROW_REST_MS: f64 = 2000.0;
    pub const TARGET_LINGER_MS: f64 = 1500.0;
    pub const LEVEL_ADVANCE_MS: f64 = 2000.0;
    pub const SPAWN_STAGGER_MS: f64 = 1000.0;
    pub const TIMED_RESPAWN_MS: f64 = 500.0;

    /// Targets spawned per batch
    pub const SPAWN_BATCH: u32 = 2;
    /// Unscaled target edge length
    pub const TARGET_SIZE: f32 = 60.0;
}

/// Vector of the given length pointing along `angle`
#[inline]
pub fn from_polar(length: f32, angle: f32) -> Vec2 {
    Vec2::new(length * angle.cos(), length * angle.sin())
}

/// Direction of a vector in radians, `atan2(y, x)`
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}
