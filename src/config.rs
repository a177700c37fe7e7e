//! Simulation configuration
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a
//! JSON document only needs the values it wants to override.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;
use crate::sim::ObstacleKind;

/// Ballistics tuning, all values per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Downward acceleration added to `vy` every tick
    pub gravity: f32,
    /// Velocity multiplier applied every tick
    pub drag: f32,
    /// Launch speed cap
    pub max_velocity: f32,
    /// Launch speed floor
    pub min_velocity: f32,
    /// Pull distance (px) to launch speed
    pub velocity_scale: f32,
    /// Ground line height above the bottom edge
    pub ground_level: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            drag: DRAG,
            max_velocity: MAX_VELOCITY,
            min_velocity: MIN_VELOCITY,
            velocity_scale: VELOCITY_SCALE,
            ground_level: GROUND_LEVEL,
        }
    }
}

impl PhysicsTuning {
    /// Shortest pull that produces a launch
    pub fn min_launch_pull(&self) -> f32 {
        self.min_velocity / self.velocity_scale
    }

    /// Launch speed for a pull distance, clamped to the speed range
    pub fn launch_speed(&self, pull_distance: f32) -> f32 {
        (pull_distance * self.velocity_scale).clamp(self.min_velocity, self.max_velocity)
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Play field width in px
    pub field_width: f32,
    /// Play field height in px
    pub field_height: f32,
    /// Fixed simulation rate
    pub tick_hz: f32,
    pub physics: PhysicsTuning,
    /// Pool obstacle kinds are drawn from in the obstacle course
    pub obstacle_kinds: Vec<ObstacleKind>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            tick_hz: TICK_HZ,
            physics: PhysicsTuning::default(),
            obstacle_kinds: ObstacleKind::ALL.to_vec(),
        }
    }
}

impl SimConfig {
    /// Default tuning on a field of the given size
    pub fn with_field(width: f32, height: f32) -> Self {
        Self {
            field_width: width,
            field_height: height,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the physics or timer math
    pub fn validate(&self) -> Result<(), SimError> {
        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("tick_hz", self.tick_hz)?;

        let p = &self.physics;
        positive("physics.velocity_scale", p.velocity_scale)?;
        positive("physics.max_velocity", p.max_velocity)?;
        if !(p.min_velocity >= 0.0 && p.min_velocity <= p.max_velocity) {
            return Err(SimError::InvalidSetting {
                name: "physics.min_velocity",
                value: p.min_velocity,
                expected: "between 0 and physics.max_velocity",
            });
        }
        if !(p.drag > 0.0 && p.drag <= 1.0) {
            return Err(SimError::InvalidSetting {
                name: "physics.drag",
                value: p.drag,
                expected: "in (0, 1]",
            });
        }
        if !(p.ground_level >= 0.0 && p.ground_level < self.field_height) {
            return Err(SimError::InvalidSetting {
                name: "physics.ground_level",
                value: p.ground_level,
                expected: "in [0, field_height)",
            });
        }
        if !p.gravity.is_finite() {
            return Err(SimError::InvalidSetting {
                name: "physics.gravity",
                value: p.gravity,
                expected: "a finite number",
            });
        }

        if self.obstacle_kinds.is_empty() {
            return Err(SimError::EmptyCollection {
                name: "obstacle_kinds",
            });
        }
        Ok(())
    }

    /// Length of one tick in simulation ms
    pub fn tick_ms(&self) -> f64 {
        1000.0 / self.tick_hz as f64
    }

    /// Y coordinate of the ground line
    pub fn ground_y(&self) -> f32 {
        self.field_height - self.physics.ground_level
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), SimError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidSetting {
            name,
            value,
            expected: "> 0",
        })
    }
}
