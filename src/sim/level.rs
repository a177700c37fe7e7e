//! Level and mode progression
//!
//! Level lifecycle: Active -> Completing (quota met, latch set) -> Active at
//! the next level once the advance delay has passed.

use glam::Vec2;
use rand::Rng;

use super::modes::GameMode;
use super::schedule::{Deferred, ScheduledTask};
use super::state::{GameState, Obstacle, ObstacleKind, Target, TargetBehavior, Wind};
use crate::consts::*;

/// Reset the field for the current mode and level number
///
/// Clears arrows, targets, obstacles and every pending task, then applies the
/// mode's rules and queues the first batch of targets.
pub fn initialize_level(state: &mut GameState) {
    state.level.epoch = state.level.epoch.wrapping_add(1);
    state.scheduler.clear();

    state.arrows.clear();
    state.targets.clear();
    state.obstacles.clear();

    let mode = state.level.mode;
    let number = state.level.number;
    state.level.start_ms = state.now_ms();
    state.level.progress = 0;
    state.level.completing = false;
    state.level.quota = mode.quota(number);
    state.level.time_limit_ms = mode.time_limit_ms(number);

    state.wind = if mode.has_wind() {
        let direction = state.rng.random::<f32>() * std::f32::consts::TAU;
        Wind::new(direction, GameMode::wind_strength(number))
    } else {
        Wind::calm()
    };

    for _ in 0..mode.obstacle_count(number) {
        let obstacle = create_obstacle(state);
        state.obstacles.push(obstacle);
    }

    spawn_level_targets(state);
    log::info!(
        "Level {} ({}) initialized: quota={}, obstacles={}, wind={:.2}",
        number,
        mode.id(),
        state.level.quota,
        state.obstacles.len(),
        state.wind.strength
    );
}

/// Queue the next batch of targets, one per stagger slot
fn spawn_level_targets(state: &mut GameState) {
    let remaining = state.level.quota.saturating_sub(state.level.progress);
    for slot in 0..remaining.min(SPAWN_BATCH) {
        state.schedule(slot as f64 * SPAWN_STAGGER_MS, Deferred::SpawnTarget);
    }
}

/// Add one target with the current mode's behavior
pub fn spawn_target(state: &mut GameState) -> u32 {
    let width = state.config().field_width;
    let height = state.config().field_height;
    let now = state.now_ms();
    let number = state.level.number;

    let pos = Vec2::new(
        width - 150.0 + state.rng.random::<f32>() * 100.0,
        100.0 + state.rng.random::<f32>() * (height - 200.0),
    );
    let mut size = Vec2::splat(TARGET_SIZE);

    let behavior = match state.level.mode {
        GameMode::Moving => TargetBehavior::Moving {
            vel: Vec2::new(
                (state.rng.random::<f32>() - 0.5) * 2.0,
                state.rng.random::<f32>() - 0.5,
            ),
        },
        GameMode::Precision => {
            size = Vec2::splat(GameMode::precision_size(number));
            TargetBehavior::Precision
        }
        GameMode::Timed => TargetBehavior::Timed {
            time_limit_ms: GameMode::target_time_limit_ms(number),
        },
        GameMode::Classic | GameMode::Windy | GameMode::Obstacles => TargetBehavior::Static,
    };

    let id = state.next_entity_id();
    state.targets.push(Target::new(id, pos, size, now, behavior));
    id
}

fn create_obstacle(state: &mut GameState) -> Obstacle {
    let width = state.config().field_width;
    let height = state.config().field_height;
    let pool = state.config().obstacle_kinds.len();
    let pick = state.rng.random_range(0..pool);
    let kind = state.config().obstacle_kinds[pick];

    let pos = Vec2::new(
        width * 0.3 + state.rng.random::<f32>() * width * 0.4,
        height * 0.2 + state.rng.random::<f32>() * height * 0.5,
    );
    let size = Vec2::new(
        20.0 + state.rng.random::<f32>() * 40.0,
        40.0 + state.rng.random::<f32>() * 80.0,
    );
    let rotation_speed = match kind {
        ObstacleKind::Spinner => (state.rng.random::<f32>() - 0.5) * 0.1,
        ObstacleKind::Wall | ObstacleKind::Bouncer => 0.0,
    };

    Obstacle {
        id: state.next_entity_id(),
        kind,
        pos,
        size,
        rotation: 0.0,
        rotation_speed,
    }
}

/// Move drifting targets and retire timed ones past their limit
pub fn update_targets(state: &mut GameState) {
    let width = state.config().field_width;
    let floor = state.config().field_height - state.config().physics.ground_level;
    let now = state.now_ms();

    for target in &mut state.targets {
        if target.is_hit() {
            continue;
        }
        if let TargetBehavior::Moving { vel } = &mut target.behavior {
            target.pos += *vel;
            if target.pos.x <= width * 0.5 || target.pos.x >= width - target.size.x {
                vel.x = -vel.x;
            }
            if target.pos.y <= 50.0 || target.pos.y >= floor - target.size.y {
                vel.y = -vel.y;
            }
        }
    }

    let before = state.targets.len();
    state.targets.retain(|t| !t.expired(now));
    for _ in state.targets.len()..before {
        log::debug!("Timed target expired");
        state.schedule(TIMED_RESPAWN_MS, Deferred::SpawnTarget);
    }
}

/// Advance spinner rotation
pub fn update_obstacles(state: &mut GameState) {
    for obstacle in &mut state.obstacles {
        obstacle.spin();
    }
}

/// Restart the level if its time limit ran out; true when it did
pub fn check_level_timer(state: &mut GameState) -> bool {
    if !state.level.timed_out(state.now_ms()) {
        return false;
    }
    log::info!("Time limit reached on level {}", state.level.number);
    initialize_level(state);
    true
}

/// Handle a met quota exactly once per level; true when this call completed it
pub fn check_level_completion(state: &mut GameState) -> bool {
    if state.level.completing || !state.level.quota_met() {
        return false;
    }
    state.level.completing = true;

    log::info!(
        "Level {} completed! Progress: {}/{}",
        state.level.number,
        state.level.progress,
        state.level.quota
    );
    state.level.number += 1;

    for mode in state.modes.unlock_through(state.level.number) {
        log::info!("{} mode unlocked!", mode.name());
    }

    state.schedule(LEVEL_ADVANCE_MS, Deferred::ReinitializeLevel);
    log::info!("Starting level {}", state.level.number);
    true
}

/// Switch to an unlocked mode at level 1; locked modes are ignored
pub fn select_mode(state: &mut GameState, mode: GameMode) -> bool {
    if !state.modes.is_unlocked(mode) {
        log::warn!("Mode '{}' is locked", mode.id());
        return false;
    }
    state.level.mode = mode;
    state.level.number = 1;
    state.level.completing = false;
    initialize_level(state);
    log::info!("Switched to {} mode, starting at level 1", mode.id());
    true
}

/// Execute a due task; tasks from an earlier level are dropped
pub fn run_deferred(state: &mut GameState, scheduled: ScheduledTask) {
    if scheduled.epoch != state.level.epoch {
        return;
    }
    match scheduled.task {
        Deferred::RemoveArrow(id) => {
            state.arrows.retain(|a| a.id != id);
        }
        Deferred::RemoveTarget(id) => {
            let Some(index) = state.targets.iter().position(|t| t.id == id) else {
                return;
            };
            state.targets.remove(index);
            if !state.level.quota_met() && !state.level.completing {
                spawn_target(state);
            }
        }
        Deferred::SpawnTarget => {
            spawn_target(state);
        }
        Deferred::ReinitializeLevel => initialize_level(state),
    }
}
