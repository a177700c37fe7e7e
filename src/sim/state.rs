//! Game state and core simulation types
//!
//! Everything the tick mutates lives in one owned [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aim::AimState;
use super::effects::Effect;
use super::level;
use super::modes::{GameMode, ModeRegistry};
use super::schedule::{Deferred, Scheduler};
use super::stats::GameStats;
use crate::config::SimConfig;
use crate::consts::*;
use crate::error::SimError;
use crate::heading;

/// Scoring band of a target, innermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ring {
    Bullseye,
    Inner,
    Middle,
    Outer,
}

impl Ring {
    pub const ALL: [Ring; 4] = [Ring::Bullseye, Ring::Inner, Ring::Middle, Ring::Outer];

    /// Points awarded for landing in this ring
    pub fn points(self) -> u32 {
        match self {
            Ring::Bullseye => 10,
            Ring::Inner => 5,
            Ring::Middle => 3,
            Ring::Outer => 1,
        }
    }

    /// Outer edge of the band, distance from target center (inclusive)
    pub fn outer_radius(self) -> f32 {
        match self {
            Ring::Bullseye => 8.0,
            Ring::Inner => 15.0,
            Ring::Middle => 22.0,
            Ring::Outer => 30.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Ring::Bullseye => "bullseye",
            Ring::Inner => "inner",
            Ring::Middle => "middle",
            Ring::Outer => "outer",
        }
    }
}

/// An arrow in flight or at rest
#[derive(Debug, Clone, Serialize)]
pub struct Arrow {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub initial_vel: Vec2,
    /// Facing, always along the current velocity
    pub rotation: f32,
    pub active: bool,
    /// Previous positions, oldest first
    pub trail: Vec<Vec2>,
    /// Ticks since launch
    pub age: u32,
}

impl Arrow {
    pub fn new(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            vel,
            initial_vel: vel,
            rotation: heading(vel),
            active: true,
            trail: Vec::with_capacity(TRAIL_LENGTH + 1),
            age: 0,
        }
    }

    /// Record current position to trail (call each tick before moving)
    pub fn record_trail(&mut self) {
        self.trail.push(self.pos);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.remove(0);
        }
    }
}

/// Mode-specific target behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetBehavior {
    Static,
    /// Drifts and bounces inside the right half of the field
    Moving { vel: Vec2 },
    /// Shrunk target (size already scaled at spawn)
    Precision,
    /// Disappears if not hit within the limit
    Timed { time_limit_ms: f64 },
}

/// Record of the arrow that claimed a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetHit {
    pub ring: Ring,
    pub points: u32,
    pub impact: Vec2,
}

/// A ring target
#[derive(Debug, Clone, Serialize)]
pub struct Target {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Set once, by the first arrow that lands in a ring
    pub hit: Option<TargetHit>,
    /// Simulation time of spawn (ms)
    pub spawn_ms: f64,
    pub behavior: TargetBehavior,
}

impl Target {
    pub fn new(id: u32, pos: Vec2, size: Vec2, spawn_ms: f64, behavior: TargetBehavior) -> Self {
        Self {
            id,
            pos,
            size,
            hit: None,
            spawn_ms,
            behavior,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.hit.is_some()
    }

    /// True for an unclaimed timed target past its limit
    pub fn expired(&self, now_ms: f64) -> bool {
        match self.behavior {
            TargetBehavior::Timed { time_limit_ms } => {
                !self.is_hit() && now_ms - self.spawn_ms > time_limit_ms
            }
            _ => false,
        }
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    /// Absorbs arrows
    Wall,
    /// Reflects arrows along the dominant axis
    Bouncer,
    /// Redirects arrows along its rotating face
    Spinner,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::Wall,
        ObstacleKind::Bouncer,
        ObstacleKind::Spinner,
    ];
}

/// An axis-aligned obstacle
#[derive(Debug, Clone, Serialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Spinner face angle (radians)
    pub rotation: f32,
    /// Radians per tick (0 for non-spinners)
    pub rotation_speed: f32,
}

impl Obstacle {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict interior test (edges do not count)
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.pos + self.size;
        point.x > self.pos.x && point.x < max.x && point.y > self.pos.y && point.y < max.y
    }

    /// Advance spinner rotation by one tick
    pub fn spin(&mut self) {
        if self.kind == ObstacleKind::Spinner {
            self.rotation += self.rotation_speed;
        }
    }
}

/// Constant wind acceleration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Wind {
    pub direction: f32,
    pub strength: f32,
    /// `strength * (cos direction, sin direction)`
    pub vector: Vec2,
}

impl Wind {
    pub fn calm() -> Self {
        Self {
            direction: 0.0,
            strength: 0.0,
            vector: Vec2::ZERO,
        }
    }

    pub fn new(direction: f32, strength: f32) -> Self {
        Self {
            direction,
            strength,
            vector: crate::from_polar(strength, direction),
        }
    }
}

/// The archer standing on the ground line
#[derive(Debug, Clone, Serialize)]
pub struct Archer {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub bow_drawn: bool,
    /// Draw strength 0..=1
    pub bow_power: f32,
}

impl Archer {
    pub fn new(ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(ARCHER_X, ground_y - ARCHER_HEIGHT),
            size: Vec2::new(ARCHER_WIDTH, ARCHER_HEIGHT),
            bow_drawn: false,
            bow_power: 0.0,
        }
    }

    /// Body center, the origin of every pull
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Where arrows leave the bow
    #[inline]
    pub fn bow_tip(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x, self.pos.y + self.size.y / 2.0)
    }
}

/// Per-level progress
#[derive(Debug, Clone, Serialize)]
pub struct LevelState {
    /// 1-based level number
    pub number: u32,
    pub mode: GameMode,
    /// Targets hit this level
    pub progress: u32,
    /// Hits needed to complete the level
    pub quota: u32,
    /// 0 = unlimited
    pub time_limit_ms: f64,
    pub start_ms: f64,
    /// Completion latch, set between quota reached and the next level
    pub completing: bool,
    /// Bumped on every initialization; stale deferred tasks are dropped
    pub epoch: u32,
}

impl LevelState {
    fn new(mode: GameMode) -> Self {
        Self {
            number: 1,
            mode,
            progress: 0,
            quota: mode.quota(1),
            time_limit_ms: 0.0,
            start_ms: 0.0,
            completing: false,
            epoch: 0,
        }
    }

    pub fn quota_met(&self) -> bool {
        self.progress >= self.quota
    }

    /// Progress toward the quota, 0..=1
    pub fn progress_fraction(&self) -> f32 {
        if self.quota == 0 {
            return 1.0;
        }
        (self.progress as f32 / self.quota as f32).min(1.0)
    }

    /// Time left on a limited level, `None` when unlimited
    pub fn remaining_ms(&self, now_ms: f64) -> Option<f64> {
        if self.time_limit_ms > 0.0 {
            Some((self.time_limit_ms - (now_ms - self.start_ms)).max(0.0))
        } else {
            None
        }
    }

    /// True once a limited level has run past its limit
    pub fn timed_out(&self, now_ms: f64) -> bool {
        self.time_limit_ms > 0.0 && now_ms - self.start_ms > self.time_limit_ms
    }
}

/// Complete simulation state (single owner, deterministic per seed)
#[derive(Debug, Clone)]
pub struct GameState {
    config: SimConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub archer: Archer,
    /// Arrows in insertion order
    pub arrows: Vec<Arrow>,
    /// Targets in insertion order (collision scan order)
    pub targets: Vec<Target>,
    pub obstacles: Vec<Obstacle>,
    pub wind: Wind,
    pub aim: AimState,
    /// Visual effect records (not gameplay-affecting)
    pub effects: Vec<Effect>,
    pub stats: GameStats,
    pub level: LevelState,
    pub modes: ModeRegistry,
    pub scheduler: Scheduler,
    next_id: u32,
}

impl GameState {
    /// Build a game in classic mode at level 1
    ///
    /// Fails if the config would break the physics or timer math.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, SimError> {
        config.validate()?;

        let mut state = Self {
            archer: Archer::new(config.ground_y()),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            arrows: Vec::new(),
            targets: Vec::new(),
            obstacles: Vec::new(),
            wind: Wind::calm(),
            aim: AimState::default(),
            effects: Vec::new(),
            stats: GameStats::default(),
            level: LevelState::new(GameMode::Classic),
            modes: ModeRegistry::new(),
            scheduler: Scheduler::new(),
            next_id: 1,
        };

        level::initialize_level(&mut state);
        Ok(state)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current simulation time in ms
    pub fn now_ms(&self) -> f64 {
        self.time_ticks as f64 * self.config.tick_ms()
    }

    /// Queue a deferred task for the current level
    pub fn schedule(&mut self, delay_ms: f64, task: Deferred) {
        let due = self.now_ms() + delay_ms;
        self.scheduler.schedule(due, self.level.epoch, task);
    }

    /// Put a new arrow in flight and count the shot
    pub fn spawn_arrow(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.arrows.push(Arrow::new(id, pos, vel));
        self.stats.record_shot();
        log::debug!(
            "Arrow {} shot: speed={:.2}, angle={:.1}°",
            id,
            vel.length(),
            heading(vel).to_degrees()
        );
        id
    }

    pub fn arrow(&self, id: u32) -> Option<&Arrow> {
        self.arrows.iter().find(|a| a.id == id)
    }

    pub fn target(&self, id: u32) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// Arrows still in flight
    pub fn active_arrows(&self) -> impl Iterator<Item = &Arrow> {
        self.arrows.iter().filter(|a| a.active)
    }
}
