//! Collision detection and response for arrows
//!
//! Checks run per arrow, per tick, after integration, in a fixed order:
//! play bounds, obstacles, ground, targets. Each check reports what happened;
//! the tick applies the gameplay consequences (stats, scheduling, effects).

use glam::Vec2;

use super::state::{Arrow, Obstacle, ObstacleKind, Ring, Target};
use crate::consts::*;
use crate::from_polar;

/// Ring a hit at `distance` from the target center lands in
///
/// Bands are closed on the outside: a distance of exactly 8 is a bullseye.
pub fn classify_ring(distance: f32) -> Option<Ring> {
    Ring::ALL
        .into_iter()
        .find(|ring| distance <= ring.outer_radius())
}

/// Points for a hit at `distance` (0 outside the outer ring)
pub fn ring_points(distance: f32) -> u32 {
    classify_ring(distance).map_or(0, Ring::points)
}

/// True once an arrow has left the play area
pub fn out_of_bounds(pos: Vec2, field_width: f32, field_height: f32) -> bool {
    pos.x > field_width + BOUNDS_MARGIN || pos.x < -BOUNDS_MARGIN || pos.y > field_height
}

/// What an obstacle did to an arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleResponse {
    /// No obstacle touched
    Clear,
    /// Wall stopped the arrow, no further checks this tick
    Absorbed { obstacle_id: u32 },
    Bounced { obstacle_id: u32 },
    Deflected { obstacle_id: u32 },
}

/// Resolve the first obstacle (insertion order) containing the arrow
pub fn resolve_obstacles(arrow: &mut Arrow, obstacles: &[Obstacle]) -> ObstacleResponse {
    let Some(obstacle) = obstacles.iter().find(|o| o.contains(arrow.pos)) else {
        return ObstacleResponse::Clear;
    };
    let obstacle_id = obstacle.id;

    match obstacle.kind {
        ObstacleKind::Wall => {
            arrow.active = false;
            ObstacleResponse::Absorbed { obstacle_id }
        }
        ObstacleKind::Bouncer => {
            bounce_off(arrow, obstacle);
            ObstacleResponse::Bounced { obstacle_id }
        }
        ObstacleKind::Spinner => {
            let speed = arrow.vel.length() * SPINNER_SPEED_RETAIN;
            arrow.vel = from_polar(speed, obstacle.rotation + std::f32::consts::FRAC_PI_2);
            ObstacleResponse::Deflected { obstacle_id }
        }
    }
}

/// Dominant-axis reflection
///
/// The axis is picked from the arrow's offset to the obstacle center. Only
/// that velocity component flips (damped), and the arrow is placed just
/// outside the obstacle on that axis, on the side it is closest to.
fn bounce_off(arrow: &mut Arrow, obstacle: &Obstacle) {
    let offset = arrow.pos - obstacle.center();
    let max = obstacle.pos + obstacle.size;

    if offset.x.abs() > offset.y.abs() {
        arrow.vel.x *= -BOUNCER_RESTITUTION;
        arrow.pos.x = if offset.x > 0.0 {
            max.x + BOUNCER_NUDGE
        } else {
            obstacle.pos.x - BOUNCER_NUDGE
        };
    } else {
        arrow.vel.y *= -BOUNCER_RESTITUTION;
        arrow.pos.y = if offset.y > 0.0 {
            max.y + BOUNCER_NUDGE
        } else {
            obstacle.pos.y - BOUNCER_NUDGE
        };
    }
}

/// What the ground did to an arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundResponse {
    Airborne,
    /// Fast impact, arrow skips along the ground
    Bounced,
    /// Slow impact, arrow comes to rest
    Stuck,
}

/// Bounce or stick an arrow that reached the ground line
pub fn resolve_ground(arrow: &mut Arrow, ground_y: f32) -> GroundResponse {
    if arrow.pos.y < ground_y {
        return GroundResponse::Airborne;
    }

    if arrow.vel.y > GROUND_BOUNCE_MIN_SPEED {
        arrow.pos.y = ground_y;
        arrow.vel.y *= -GROUND_RESTITUTION;
        arrow.vel.x *= GROUND_FRICTION;
        GroundResponse::Bounced
    } else {
        arrow.active = false;
        GroundResponse::Stuck
    }
}

/// A qualifying arrow-target contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingHit {
    /// Index into the scanned target slice
    pub target_index: usize,
    pub ring: Ring,
    pub distance: f32,
}

/// First unhit target (insertion order) with `pos` inside a ring
pub fn find_target_hit(pos: Vec2, targets: &[Target]) -> Option<RingHit> {
    targets
        .iter()
        .enumerate()
        .filter(|(_, target)| !target.is_hit())
        .find_map(|(target_index, target)| {
            let distance = pos.distance(target.center());
            classify_ring(distance).map(|ring| RingHit {
                target_index,
                ring,
                distance,
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{TargetBehavior, TargetHit};
    use proptest::prelude::*;

    fn obstacle(kind: ObstacleKind, rotation: f32) -> Obstacle {
        Obstacle {
            id: 9,
            kind,
            pos: Vec2::new(100.0, 100.0),
            size: Vec2::new(40.0, 80.0),
            rotation,
            rotation_speed: 0.0,
        }
    }

    fn target_at(id: u32, center: Vec2) -> Target {
        Target::new(
            id,
            center - Vec2::splat(TARGET_SIZE / 2.0),
            Vec2::splat(TARGET_SIZE),
            0.0,
            TargetBehavior::Static,
        )
    }

    #[test]
    fn ring_boundaries_are_inclusive() {
        assert_eq!(classify_ring(0.0), Some(Ring::Bullseye));
        assert_eq!(classify_ring(8.0), Some(Ring::Bullseye));
        assert_eq!(classify_ring(8.01), Some(Ring::Inner));
        assert_eq!(classify_ring(15.0), Some(Ring::Inner));
        assert_eq!(classify_ring(22.0), Some(Ring::Middle));
        assert_eq!(classify_ring(30.0), Some(Ring::Outer));
        assert_eq!(classify_ring(30.01), None);
    }

    #[test]
    fn bounds() {
        assert!(!out_of_bounds(Vec2::new(500.0, 300.0), 1280.0, 720.0));
        assert!(!out_of_bounds(Vec2::new(1320.0, 300.0), 1280.0, 720.0));
        assert!(out_of_bounds(Vec2::new(1331.0, 300.0), 1280.0, 720.0));
        assert!(out_of_bounds(Vec2::new(-51.0, 300.0), 1280.0, 720.0));
        assert!(out_of_bounds(Vec2::new(500.0, 721.0), 1280.0, 720.0));
        // Flying high above the field is allowed
        assert!(!out_of_bounds(Vec2::new(500.0, -5000.0), 1280.0, 720.0));
    }

    #[test]
    fn wall_absorbs() {
        let mut arrow = Arrow::new(1, Vec2::new(120.0, 140.0), Vec2::new(10.0, 0.0));
        let response = resolve_obstacles(&mut arrow, &[obstacle(ObstacleKind::Wall, 0.0)]);
        assert_eq!(response, ObstacleResponse::Absorbed { obstacle_id: 9 });
        assert!(!arrow.active);
    }

    #[test]
    fn bouncer_reflects_horizontal_axis() {
        // Center is (120, 140); arrow offset (-15, 5) is horizontal-dominant
        let mut arrow = Arrow::new(1, Vec2::new(105.0, 145.0), Vec2::new(10.0, 2.0));
        let response = resolve_obstacles(&mut arrow, &[obstacle(ObstacleKind::Bouncer, 0.0)]);
        assert_eq!(response, ObstacleResponse::Bounced { obstacle_id: 9 });
        assert!(arrow.active);
        assert!((arrow.vel.x + 8.0).abs() < 1e-5);
        assert_eq!(arrow.vel.y, 2.0);
        assert_eq!(arrow.pos.x, 95.0);
    }

    #[test]
    fn bouncer_reflects_vertical_axis() {
        // Offset (5, 30) is vertical-dominant, below center
        let mut arrow = Arrow::new(1, Vec2::new(125.0, 170.0), Vec2::new(3.0, -6.0));
        resolve_obstacles(&mut arrow, &[obstacle(ObstacleKind::Bouncer, 0.0)]);
        assert_eq!(arrow.vel.x, 3.0);
        assert!((arrow.vel.y - 4.8).abs() < 1e-5);
        assert_eq!(arrow.pos.y, 185.0);
        assert!(arrow.active);
    }

    #[test]
    fn spinner_redirects_at_seventy_percent() {
        let mut arrow = Arrow::new(1, Vec2::new(120.0, 140.0), Vec2::new(6.0, 8.0));
        let response = resolve_obstacles(&mut arrow, &[obstacle(ObstacleKind::Spinner, 0.0)]);
        assert_eq!(response, ObstacleResponse::Deflected { obstacle_id: 9 });
        // rotation 0 -> straight down (+y)
        assert!(arrow.vel.x.abs() < 1e-5);
        assert!((arrow.vel.y - 7.0).abs() < 1e-5);
        assert!(arrow.active);
    }

    #[test]
    fn first_obstacle_wins() {
        let wall = obstacle(ObstacleKind::Wall, 0.0);
        let mut bouncer = obstacle(ObstacleKind::Bouncer, 0.0);
        bouncer.id = 10;
        let mut arrow = Arrow::new(1, Vec2::new(120.0, 140.0), Vec2::new(10.0, 0.0));
        let response = resolve_obstacles(&mut arrow, &[bouncer, wall]);
        assert_eq!(response, ObstacleResponse::Bounced { obstacle_id: 10 });
    }

    #[test]
    fn ground_bounce_and_stick() {
        let mut fast = Arrow::new(1, Vec2::new(300.0, 705.0), Vec2::new(10.0, 5.0));
        assert_eq!(resolve_ground(&mut fast, 700.0), GroundResponse::Bounced);
        assert_eq!(fast.pos.y, 700.0);
        assert!((fast.vel.y + 1.5).abs() < 1e-5);
        assert!((fast.vel.x - 7.0).abs() < 1e-5);
        assert!(fast.active);

        let mut slow = Arrow::new(2, Vec2::new(300.0, 700.0), Vec2::new(4.0, 2.0));
        assert_eq!(resolve_ground(&mut slow, 700.0), GroundResponse::Stuck);
        assert!(!slow.active);

        let mut high = Arrow::new(3, Vec2::new(300.0, 600.0), Vec2::new(4.0, 9.0));
        assert_eq!(resolve_ground(&mut high, 700.0), GroundResponse::Airborne);
    }

    #[test]
    fn target_scan_is_insertion_order() {
        let a = target_at(1, Vec2::new(500.0, 300.0));
        let b = target_at(2, Vec2::new(510.0, 300.0));
        // Closer to b, but a comes first and still qualifies
        let hit = find_target_hit(Vec2::new(508.0, 300.0), &[a, b]).unwrap();
        assert_eq!(hit.target_index, 0);
        assert_eq!(hit.ring, Ring::Bullseye);
    }

    #[test]
    fn hit_targets_are_skipped() {
        let mut a = target_at(1, Vec2::new(500.0, 300.0));
        a.hit = Some(TargetHit {
            ring: Ring::Outer,
            points: 1,
            impact: Vec2::ZERO,
        });
        let b = target_at(2, Vec2::new(510.0, 300.0));
        let hit = find_target_hit(Vec2::new(500.0, 300.0), &[a, b]).unwrap();
        assert_eq!(hit.target_index, 1);
        assert_eq!(hit.ring, Ring::Inner);
    }

    #[test]
    fn far_arrow_misses() {
        let a = target_at(1, Vec2::new(500.0, 300.0));
        assert!(find_target_hit(Vec2::new(600.0, 300.0), &[a]).is_none());
    }

    proptest! {
        #[test]
        fn rings_partition_distance(distance in 0.0f32..100.0) {
            let expected = if distance <= 8.0 {
                Some((Ring::Bullseye, 10))
            } else if distance <= 15.0 {
                Some((Ring::Inner, 5))
            } else if distance <= 22.0 {
                Some((Ring::Middle, 3))
            } else if distance <= 30.0 {
                Some((Ring::Outer, 1))
            } else {
                None
            };
            let ring = classify_ring(distance);
            prop_assert_eq!(ring.map(|r| (r, r.points())), expected);
            prop_assert_eq!(ring_points(distance), expected.map_or(0, |(_, p)| p));

            // Exactly one band claims the distance
            let claims = Ring::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, r)| {
                    let inner = if *i == 0 { -1.0 } else { Ring::ALL[i - 1].outer_radius() };
                    distance > inner && distance <= r.outer_radius()
                })
                .count();
            prop_assert_eq!(claims, usize::from(ring.is_some()));
        }
    }
}
