//! Arrow ballistics
//!
//! Per-tick integration, no dt: every constant is expressed per tick and the
//! simulation only ever advances in fixed steps.

use glam::Vec2;

use super::state::Arrow;
use crate::config::PhysicsTuning;
use crate::consts::TRAJECTORY_STEPS;
use crate::{from_polar, heading};

/// Gravity and drag on a bare velocity
#[inline]
pub fn apply_forces(vel: Vec2, physics: &PhysicsTuning) -> Vec2 {
    Vec2::new(vel.x, vel.y + physics.gravity) * physics.drag
}

/// Advance one arrow by one tick
///
/// Order: trail sample, gravity, drag, position, wind, facing, age.
pub fn integrate(arrow: &mut Arrow, physics: &PhysicsTuning, wind: Vec2) {
    arrow.record_trail();

    arrow.vel = apply_forces(arrow.vel, physics);
    arrow.pos += arrow.vel;
    arrow.vel += wind;

    arrow.rotation = heading(arrow.vel);
    arrow.age += 1;
}

/// Predicted flight path for the current pull (wind not included)
///
/// Stops at the first point that leaves the field horizontally or drops
/// below the ground line.
pub fn predict_trajectory(
    origin: Vec2,
    angle: f32,
    pull_distance: f32,
    physics: &PhysicsTuning,
    field_width: f32,
    ground_y: f32,
) -> Vec<Vec2> {
    let speed = (pull_distance * physics.velocity_scale).min(physics.max_velocity);
    let mut pos = origin;
    let mut vel = from_polar(speed, angle);
    let mut points = Vec::with_capacity(TRAJECTORY_STEPS);

    for _ in 0..TRAJECTORY_STEPS {
        vel = apply_forces(vel, physics);
        pos += vel;

        if pos.x > field_width || pos.x < 0.0 || pos.y > ground_y {
            break;
        }
        points.push(pos);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn tuning() -> PhysicsTuning {
        PhysicsTuning::default()
    }

    #[test]
    fn gravity_then_drag_then_move() {
        let mut arrow = Arrow::new(1, Vec2::new(100.0, 100.0), Vec2::new(10.0, 0.0));
        integrate(&mut arrow, &tuning(), Vec2::ZERO);

        let expected_vel = Vec2::new(10.0 * DRAG, GRAVITY * DRAG);
        assert!((arrow.vel - expected_vel).length() < 1e-5);
        assert!((arrow.pos - (Vec2::new(100.0, 100.0) + expected_vel)).length() < 1e-4);
        assert_eq!(arrow.age, 1);
        assert_eq!(arrow.trail, vec![Vec2::new(100.0, 100.0)]);
    }

    #[test]
    fn wind_lands_after_move() {
        let wind = Vec2::new(0.3, 0.0);
        let mut calm = Arrow::new(1, Vec2::ZERO, Vec2::new(5.0, -5.0));
        let mut windy = calm.clone();
        integrate(&mut calm, &tuning(), Vec2::ZERO);
        integrate(&mut windy, &tuning(), wind);

        // Same position this tick, velocity differs by exactly the wind
        assert!((calm.pos - windy.pos).length() < 1e-6);
        assert!((windy.vel - calm.vel - wind).length() < 1e-6);
    }

    #[test]
    fn rotation_follows_velocity() {
        let mut arrow = Arrow::new(1, Vec2::ZERO, Vec2::new(10.0, -10.0));
        let launch_rotation = arrow.rotation;
        for _ in 0..60 {
            integrate(&mut arrow, &tuning(), Vec2::ZERO);
        }
        // Gravity has turned the arrow downward
        assert!(arrow.vel.y > 0.0);
        assert!(arrow.rotation > 0.0);
        assert!(launch_rotation < 0.0);
        assert!((arrow.rotation - heading(arrow.vel)).abs() < 1e-6);
    }

    #[test]
    fn trajectory_stops_at_ground() {
        let points = predict_trajectory(
            Vec2::new(140.0, 390.0),
            -std::f32::consts::FRAC_PI_4,
            100.0,
            &tuning(),
            FIELD_WIDTH,
            FIELD_HEIGHT - GROUND_LEVEL,
        );
        assert!(!points.is_empty());
        assert!(points.len() < TRAJECTORY_STEPS);
        assert!(points.iter().all(|p| p.y <= FIELD_HEIGHT - GROUND_LEVEL));
        // Rises first
        assert!(points[0].y < 390.0);
    }

    #[test]
    fn trajectory_capped_at_step_limit() {
        // Straight up from high above the ground never leaves the field in 150 steps
        let points = predict_trajectory(
            Vec2::new(500.0, 0.0),
            -std::f32::consts::FRAC_PI_2,
            0.0,
            &tuning(),
            FIELD_WIDTH,
            1.0e6,
        );
        assert_eq!(points.len(), TRAJECTORY_STEPS);
    }
}
