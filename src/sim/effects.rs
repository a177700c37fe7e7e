//! Hit effect records
//!
//! Bookkeeping only: the renderer draws these, the simulation ages them.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::state::Ring;
use crate::from_polar;

/// Score label lifetime (ticks)
pub const LABEL_MAX_AGE: u32 = 90;
/// Label rise per tick (px, upward)
pub const LABEL_RISE: f32 = 1.5;
/// Expanding ring lifetime (ticks)
pub const RING_MAX_AGE: u32 = 25;
pub const RING_START_RADIUS: f32 = 5.0;
/// Particle velocity decay per tick
pub const PARTICLE_DECAY: f32 = 0.95;

/// Per-kind effect data
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectKind {
    /// Floating "+points" label
    ScoreLabel { ring: Ring, points: u32 },
    /// Radial spark, coasts with decay
    Particle { ring: Ring, vel: Vec2, size: f32 },
    /// Outline growing from the hit point
    ExpandingRing {
        ring: Ring,
        radius: f32,
        max_radius: f32,
    },
}

/// One transient effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Effect {
    pub pos: Vec2,
    pub age: u32,
    pub max_age: u32,
    pub kind: EffectKind,
}

impl Effect {
    /// Remaining life 1..0, for fading
    pub fn alpha(&self) -> f32 {
        1.0 - self.age as f32 / self.max_age as f32
    }

    /// Age one tick; false once the effect is spent
    pub fn tick(&mut self) -> bool {
        self.age += 1;
        if self.age >= self.max_age {
            return false;
        }

        let progress = self.age as f32 / self.max_age as f32;
        match &mut self.kind {
            EffectKind::ScoreLabel { .. } => {
                self.pos.y -= LABEL_RISE;
            }
            EffectKind::Particle { vel, .. } => {
                self.pos += *vel;
                *vel *= PARTICLE_DECAY;
            }
            EffectKind::ExpandingRing {
                radius, max_radius, ..
            } => {
                *radius = RING_START_RADIUS + (*max_radius - RING_START_RADIUS) * progress;
            }
        }
        true
    }
}

/// Sparks emitted for a ring
pub fn particle_count(ring: Ring) -> usize {
    match ring {
        Ring::Bullseye => 15,
        Ring::Inner => 12,
        Ring::Middle => 8,
        Ring::Outer => 6,
    }
}

/// Final radius of the expanding ring
pub fn ring_max_radius(ring: Ring) -> f32 {
    match ring {
        Ring::Bullseye => 50.0,
        Ring::Inner => 40.0,
        Ring::Middle | Ring::Outer => 35.0,
    }
}

/// Emit the full effect set for a scoring hit at `pos`
pub fn spawn_hit_effects(effects: &mut Vec<Effect>, pos: Vec2, ring: Ring, rng: &mut impl Rng) {
    effects.push(Effect {
        pos,
        age: 0,
        max_age: LABEL_MAX_AGE,
        kind: EffectKind::ScoreLabel {
            ring,
            points: ring.points(),
        },
    });

    let count = particle_count(ring);
    for i in 0..count {
        let angle = std::f32::consts::TAU * i as f32 / count as f32;
        let speed = rng.random_range(2.0..6.0);
        effects.push(Effect {
            pos,
            age: 0,
            max_age: rng.random_range(30..60),
            kind: EffectKind::Particle {
                ring,
                vel: from_polar(speed, angle),
                size: rng.random_range(2.0..5.0),
            },
        });
    }

    effects.push(Effect {
        pos,
        age: 0,
        max_age: RING_MAX_AGE,
        kind: EffectKind::ExpandingRing {
            ring,
            radius: RING_START_RADIUS,
            max_radius: ring_max_radius(ring),
        },
    });
}

/// Age every effect, dropping the expired ones
pub fn update_effects(effects: &mut Vec<Effect>) {
    effects.retain_mut(Effect::tick);
}
