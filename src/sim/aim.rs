//! Aiming model: pointer drag to launch vector
//!
//! The pull is always measured from the archer's body center, wherever the
//! drag started. The start point only feeds a UI hint.

use glam::Vec2;
use serde::Serialize;

use super::state::Archer;
use crate::config::PhysicsTuning;
use crate::consts::*;
use crate::{from_polar, heading};

/// Pull measured from the archer to a pointer position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PullReading {
    pub pull: Vec2,
    pub distance: f32,
    pub angle: f32,
    /// Draw strength 0..=1
    pub power: f32,
}

/// Measure a pull, applying the dead zone
///
/// Full power is reached at `MAX_PULL_FRACTION` of the shorter field side.
/// Pulls shorter than `AIM_DEAD_ZONE` read as zero distance and zero power;
/// the angle is kept so the bow still tracks the pointer.
pub fn measure_pull(origin: Vec2, point: Vec2, field: Vec2) -> PullReading {
    let pull = point - origin;
    let distance = pull.length();
    let angle = heading(pull);

    if distance < AIM_DEAD_ZONE {
        return PullReading {
            pull: Vec2::ZERO,
            distance: 0.0,
            angle,
            power: 0.0,
        };
    }

    let max_pull = field.x.min(field.y) * MAX_PULL_FRACTION;
    PullReading {
        pull,
        distance,
        angle,
        power: (distance / max_pull).min(1.0),
    }
}

/// Launch parameters for a released pull
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub origin: Vec2,
    pub velocity: Vec2,
    pub speed: f32,
    pub angle: f32,
}

/// Launch for a pull, `None` when the pull is too short to fire
pub fn launch_for(
    pull_distance: f32,
    angle: f32,
    origin: Vec2,
    physics: &PhysicsTuning,
) -> Option<Launch> {
    if pull_distance < physics.min_launch_pull() {
        return None;
    }
    let speed = physics.launch_speed(pull_distance);
    Some(Launch {
        origin,
        velocity: from_polar(speed, angle),
        speed,
        angle,
    })
}

/// Live aiming state, readable by the renderer
#[derive(Debug, Clone, Default, Serialize)]
pub struct AimState {
    pub aiming: bool,
    /// Where the drag started
    pub start: Vec2,
    /// Latest pointer position
    pub current: Vec2,
    pub pull: Vec2,
    pub pull_distance: f32,
    pub pull_angle: f32,
    pub power: f32,
    /// Drag started close to the archer (UI hint only)
    pub valid_start: bool,
}

impl AimState {
    /// Pointer pressed: start a fresh draw
    pub fn begin(&mut self, point: Vec2, archer: &mut Archer, field: Vec2) {
        let origin = archer.center();
        self.aiming = true;
        self.start = point;
        self.valid_start = point.distance(origin) <= AIM_VALID_RADIUS;
        self.track(point, origin, field);

        archer.bow_drawn = true;
        archer.bow_power = self.power;
    }

    /// Pointer moved: update the pull (ignored when not aiming)
    pub fn update(&mut self, point: Vec2, archer: &mut Archer, field: Vec2) {
        if !self.aiming {
            return;
        }
        self.track(point, archer.center(), field);
        archer.bow_power = self.power;
    }

    /// Pointer released: reset the draw, returning a launch if the pull was long enough
    pub fn release(&mut self, archer: &mut Archer, physics: &PhysicsTuning) -> Option<Launch> {
        if !self.aiming {
            return None;
        }
        let launch = launch_for(self.pull_distance, self.pull_angle, archer.bow_tip(), physics);

        *self = Self::default();
        archer.bow_drawn = false;
        archer.bow_power = 0.0;
        launch
    }

    fn track(&mut self, point: Vec2, origin: Vec2, field: Vec2) {
        let reading = measure_pull(origin, point, field);
        self.current = point;
        self.pull = reading.pull;
        self.pull_distance = reading.distance;
        self.pull_angle = reading.angle;
        self.power = reading.power;
    }
}
