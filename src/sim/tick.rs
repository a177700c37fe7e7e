//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision::{
    GroundResponse, ObstacleResponse, RingHit, find_target_hit, out_of_bounds, resolve_ground,
    resolve_obstacles,
};
use super::effects::{spawn_hit_effects, update_effects};
use super::level;
use super::modes::GameMode;
use super::physics::integrate;
use super::schedule::Deferred;
use super::state::{GameState, TargetHit};
use crate::consts::*;

/// Host input, applied at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    SelectMode(GameMode),
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Applied in order
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn from_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    // Deferred work first, in due order
    let now = state.now_ms();
    for task in state.scheduler.take_due(now) {
        level::run_deferred(state, task);
    }

    for event in &input.events {
        apply_input(state, *event);
    }

    level::check_level_timer(state);
    level::update_targets(state);
    level::update_obstacles(state);

    update_arrows(state);
    update_effects(&mut state.effects);

    level::check_level_completion(state);
}

fn apply_input(state: &mut GameState, event: InputEvent) {
    let field = Vec2::new(state.config().field_width, state.config().field_height);

    match event {
        InputEvent::PointerDown { x, y } => {
            state.aim.begin(Vec2::new(x, y), &mut state.archer, field);
        }
        InputEvent::PointerMove { x, y } => {
            state.aim.update(Vec2::new(x, y), &mut state.archer, field);
        }
        InputEvent::PointerUp => {
            let physics = state.config().physics;
            if let Some(launch) = state.aim.release(&mut state.archer, &physics) {
                state.spawn_arrow(launch.origin, launch.velocity);
            }
        }
        InputEvent::SelectMode(mode) => {
            level::select_mode(state, mode);
        }
    }
}

/// Integrate every active arrow and resolve its collisions
///
/// Per arrow: bounds, obstacles, ground, targets. A wall or a ground stick
/// ends the arrow's checks for this tick.
fn update_arrows(state: &mut GameState) {
    let physics = state.config().physics;
    let width = state.config().field_width;
    let height = state.config().field_height;
    let ground_y = state.config().ground_y();
    let wind = if state.level.mode.has_wind() {
        state.wind.vector
    } else {
        Vec2::ZERO
    };
    let now = state.now_ms();

    let mut index = 0;
    while index < state.arrows.len() {
        if !state.arrows[index].active {
            index += 1;
            continue;
        }

        let arrow = &mut state.arrows[index];
        integrate(arrow, &physics, wind);

        if out_of_bounds(arrow.pos, width, height) {
            log::debug!("Arrow {} left the field", arrow.id);
            state.arrows.remove(index);
            continue;
        }

        let id = arrow.id;
        match resolve_obstacles(arrow, &state.obstacles) {
            ObstacleResponse::Absorbed { obstacle_id } => {
                log::debug!("Arrow {} absorbed by wall {}", id, obstacle_id);
                state.schedule(ARROW_REST_MS, Deferred::RemoveArrow(id));
                index += 1;
                continue;
            }
            ObstacleResponse::Bounced { obstacle_id } => {
                log::debug!("Arrow {} bounced off {}", id, obstacle_id);
            }
            ObstacleResponse::Deflected { obstacle_id } => {
                log::debug!("Arrow {} deflected by spinner {}", id, obstacle_id);
            }
            ObstacleResponse::Clear => {}
        }

        if resolve_ground(arrow, ground_y) == GroundResponse::Stuck {
            state.stats.record_miss(now);
            state.schedule(ARROW_REST_MS, Deferred::RemoveArrow(id));
            log::debug!("Arrow {} missed", id);
            index += 1;
            continue;
        }

        if let Some(hit) = find_target_hit(arrow.pos, &state.targets) {
            register_hit(state, index, hit, now);
        }
        index += 1;
    }
}

/// Apply a scoring hit: claim the target, score, effects, removal
fn register_hit(state: &mut GameState, arrow_index: usize, hit: RingHit, now: f64) {
    let arrow = &mut state.arrows[arrow_index];
    arrow.active = false;
    let arrow_id = arrow.id;
    let impact = arrow.pos;

    let points = state.stats.record_hit(hit.ring, now);
    let target = &mut state.targets[hit.target_index];
    target.hit = Some(TargetHit {
        ring: hit.ring,
        points,
        impact,
    });
    let target_id = target.id;
    let center = target.center();

    state.level.progress += 1;
    spawn_hit_effects(&mut state.effects, center, hit.ring, &mut state.rng);

    state.schedule(TARGET_LINGER_MS, Deferred::RemoveTarget(target_id));
    state.schedule(ARROW_REST_MS, Deferred::RemoveArrow(arrow_id));
    log::debug!(
        "Arrow {} hit target {}: {} (+{}) at {:.1}px",
        arrow_id,
        target_id,
        hit.ring.name(),
        points,
        hit.distance
    );
}
