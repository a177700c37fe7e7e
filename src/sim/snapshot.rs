//! Read-only render view of the simulation
//!
//! Borrows from [`GameState`] and adds the derived values a frontend needs
//! (trajectory preview, HUD numbers, mode list).

use glam::Vec2;
use serde::Serialize;

use super::aim::AimState;
use super::effects::Effect;
use super::modes::GameMode;
use super::physics::predict_trajectory;
use super::state::{Archer, Arrow, GameState, Obstacle, Ring, Target, Wind};
use super::stats::GameStats;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldView {
    pub width: f32,
    pub height: f32,
    pub ground_y: f32,
}

/// Level HUD data
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LevelView {
    pub number: u32,
    pub mode: GameMode,
    pub mode_name: &'static str,
    pub progress: u32,
    pub quota: u32,
    /// 0..=1
    pub progress_fraction: f32,
    pub time_limit_ms: f64,
    /// `None` on untimed levels
    pub remaining_ms: Option<f64>,
    /// Whole seconds left, rounded up
    pub remaining_secs: Option<u32>,
    pub completing: bool,
}

/// Points earned per ring
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RingPoints {
    pub bullseye: u64,
    pub inner: u64,
    pub middle: u64,
    pub outer: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsView<'a> {
    #[serde(flatten)]
    pub totals: &'a GameStats,
    /// Percent, rounded
    pub accuracy: u32,
    pub ring_points: RingPoints,
}

/// Mode list row for menus
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModeView {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
    pub unlock_level: Option<u32>,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub time_ms: f64,
    pub field: FieldView,
    pub archer: &'a Archer,
    /// Each arrow's `trail` runs oldest to newest
    pub arrows: &'a [Arrow],
    pub targets: &'a [Target],
    pub obstacles: &'a [Obstacle],
    pub wind: Wind,
    pub aim: &'a AimState,
    /// Predicted path while aiming, empty otherwise
    pub trajectory: Vec<Vec2>,
    pub effects: &'a [Effect],
    pub level: LevelView,
    pub stats: StatsView<'a>,
    pub modes: Vec<ModeView>,
}

impl<'a> Snapshot<'a> {
    pub fn capture(state: &'a GameState) -> Self {
        let config = state.config();
        let now = state.now_ms();
        let ground_y = config.ground_y();

        let trajectory = if state.aim.aiming && state.aim.pull_distance > 0.0 {
            predict_trajectory(
                state.archer.bow_tip(),
                state.aim.pull_angle,
                state.aim.pull_distance,
                &config.physics,
                config.field_width,
                ground_y,
            )
        } else {
            Vec::new()
        };

        let level = &state.level;
        let remaining_ms = level.remaining_ms(now);

        Self {
            time_ms: now,
            field: FieldView {
                width: config.field_width,
                height: config.field_height,
                ground_y,
            },
            archer: &state.archer,
            arrows: &state.arrows,
            targets: &state.targets,
            obstacles: &state.obstacles,
            wind: state.wind,
            aim: &state.aim,
            trajectory,
            effects: &state.effects,
            level: LevelView {
                number: level.number,
                mode: level.mode,
                mode_name: level.mode.name(),
                progress: level.progress,
                quota: level.quota,
                progress_fraction: level.progress_fraction(),
                time_limit_ms: level.time_limit_ms,
                remaining_ms,
                remaining_secs: remaining_ms.map(|ms| (ms / 1000.0).ceil() as u32),
                completing: level.completing,
            },
            stats: StatsView {
                totals: &state.stats,
                accuracy: state.stats.accuracy(),
                ring_points: RingPoints {
                    bullseye: state.stats.ring_points(Ring::Bullseye),
                    inner: state.stats.ring_points(Ring::Inner),
                    middle: state.stats.ring_points(Ring::Middle),
                    outer: state.stats.ring_points(Ring::Outer),
                },
            },
            modes: state
                .modes
                .entries()
                .iter()
                .map(|entry| ModeView {
                    id: entry.mode.id(),
                    name: entry.mode.name(),
                    description: entry.mode.description(),
                    unlocked: entry.unlocked,
                    unlock_level: entry.mode.unlock_level(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::tick::{InputEvent, TickInput, tick};

    #[test]
    fn fresh_game_view() {
        let state = GameState::new(SimConfig::default(), 1).unwrap();
        let snapshot = Snapshot::capture(&state);
        assert_eq!(snapshot.level.number, 1);
        assert_eq!(snapshot.level.mode_name, "Classic");
        assert_eq!(snapshot.level.remaining_ms, None);
        assert_eq!(snapshot.stats.accuracy, 0);
        assert!(snapshot.trajectory.is_empty());
        assert_eq!(snapshot.modes.len(), 6);
        assert_eq!(snapshot.modes.iter().filter(|m| m.unlocked).count(), 1);
        assert_eq!(snapshot.field.ground_y, 430.0);
    }

    #[test]
    fn trajectory_while_aiming() {
        let mut state = GameState::new(SimConfig::default(), 2).unwrap();
        let origin = state.archer.center();
        let input = TickInput::from_events([
            InputEvent::PointerDown {
                x: origin.x,
                y: origin.y,
            },
            InputEvent::PointerMove {
                x: origin.x + 100.0,
                y: origin.y - 100.0,
            },
        ]);
        tick(&mut state, &input);

        let snapshot = Snapshot::capture(&state);
        assert!(!snapshot.trajectory.is_empty());
        let first = snapshot.trajectory[0];
        assert!(first.x > state.archer.bow_tip().x);
        assert!(first.y < state.archer.bow_tip().y);
    }

    #[test]
    fn timed_hud_rounds_seconds_up() {
        let mut state = GameState::new(SimConfig::default(), 3).unwrap();
        state.modes.unlock_through(12);
        tick(
            &mut state,
            &TickInput::from_events([InputEvent::SelectMode(GameMode::Timed)]),
        );
        tick(&mut state, &TickInput::default());

        let snapshot = Snapshot::capture(&state);
        let remaining = snapshot.level.remaining_ms.unwrap();
        assert!(remaining < 58_000.0 && remaining > 57_900.0);
        assert_eq!(snapshot.level.remaining_secs, Some(58));
    }

    #[test]
    fn serializes_to_json() {
        let mut state = GameState::new(SimConfig::default(), 4).unwrap();
        tick(&mut state, &TickInput::default());
        let json = serde_json::to_value(Snapshot::capture(&state)).unwrap();

        assert_eq!(json["level"]["mode"], "classic");
        assert_eq!(json["stats"]["total_score"], 0);
        assert_eq!(json["stats"]["ring_points"]["bullseye"], 0);
        assert_eq!(json["targets"].as_array().unwrap().len(), 1);
        assert_eq!(json["targets"][0]["behavior"]["kind"], "static");
        assert_eq!(json["modes"][5]["unlock_level"], 12);
    }
}
