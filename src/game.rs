//! Host-facing game driver
//!
//! Owns the simulation, the frame clock and the input queue. Hosts call the
//! pointer methods as events arrive and `frame` once per display frame.

use crate::config::SimConfig;
use crate::error::SimError;
use crate::platform::{FrameClock, InputQueue};
use crate::sim::{GameMode, GameState, InputEvent, Snapshot, TickInput, tick};

pub struct Game {
    state: GameState,
    clock: FrameClock,
    input: InputQueue,
}

impl Game {
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, SimError> {
        let state = GameState::new(config, seed)?;
        let clock = FrameClock::new(state.config().tick_ms());
        log::info!("Game initialized with seed: {}", seed);
        Ok(Self {
            state,
            clock,
            input: InputQueue::new(),
        })
    }

    /// Build from a JSON config, unspecified fields take their defaults
    pub fn from_json(json: &str, seed: u64) -> Result<Self, SimError> {
        Self::new(SimConfig::from_json(json)?, seed)
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.input.push(InputEvent::PointerDown { x, y });
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.input.push(InputEvent::PointerMove { x, y });
    }

    pub fn pointer_up(&mut self) {
        self.input.push(InputEvent::PointerUp);
    }

    /// Queue a mode switch by id; false for unknown or locked modes
    pub fn select_mode(&mut self, id: &str) -> bool {
        let Some(mode) = GameMode::from_id(id) else {
            log::warn!("Unknown mode '{}'", id);
            return false;
        };
        if !self.state.modes.is_unlocked(mode) {
            log::warn!("Mode '{}' is locked", mode.id());
            return false;
        }
        self.input.push(InputEvent::SelectMode(mode));
        true
    }

    /// Advance to host time `now_ms`, returns the ticks run
    ///
    /// Queued input goes into the first tick of the frame.
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let steps = self.clock.advance(now_ms);
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    /// Run exactly one tick with whatever input is queued
    pub fn step(&mut self) {
        let input = TickInput {
            events: self.input.drain(),
        };
        tick(&mut self.state, &input);
    }

    /// Start over with a new seed and the same config
    pub fn restart(&mut self, seed: u64) -> Result<(), SimError> {
        self.state = GameState::new(self.state.config().clone(), seed)?;
        self.clock.reset();
        self.input.drain();
        log::info!("Game restarted with seed: {}", seed);
        Ok(())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::capture(&self.state)
    }

    pub fn snapshot_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Render interpolation between the last two ticks
    pub fn alpha(&self) -> f32 {
        self.clock.alpha()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game::new(SimConfig::default(), 11).unwrap()
    }

    #[test]
    fn first_frame_runs_nothing() {
        let mut game = game();
        assert_eq!(game.frame(12_345.0), 0);
        assert_eq!(game.state().time_ticks, 0);
        assert!(game.frame(12_345.0 + 50.0) >= 2);
    }

    #[test]
    fn input_waits_for_a_tick() {
        let mut game = game();
        let origin = game.state().archer.center();
        game.pointer_down(origin.x, origin.y);
        assert!(!game.state().aim.aiming);

        game.frame(0.0);
        assert!(!game.state().aim.aiming);

        game.frame(20.0);
        assert!(game.state().aim.aiming);
    }

    #[test]
    fn full_shot_through_the_facade() {
        let mut game = game();
        let origin = game.state().archer.center();
        game.pointer_down(origin.x, origin.y);
        game.pointer_move(origin.x + 100.0, origin.y - 120.0);
        game.pointer_up();
        game.step();
        assert_eq!(game.state().stats.arrows_shot, 1);
        assert_eq!(game.state().arrows.len(), 1);
    }

    #[test]
    fn select_mode_by_id() {
        let mut game = game();
        assert!(!game.select_mode("archery"));
        assert!(!game.select_mode("Timed"));
        game.step();
        assert_eq!(game.state().level.mode, GameMode::Classic);

        assert!(game.select_mode(" classic "));
        game.step();
        assert_eq!(game.state().level.number, 1);
    }

    #[test]
    fn select_mode_reports_unlock_state() {
        let mut game = game();
        assert!(!game.select_mode("timed"));
        assert!(game.input.is_empty());

        game.state.modes.unlock_through(12);
        assert!(game.select_mode("timed"));
        game.step();
        assert_eq!(game.state().level.mode, GameMode::Timed);
    }

    #[test]
    fn restart_resets_state() {
        let mut game = game();
        for _ in 0..30 {
            game.step();
        }
        game.restart(99).unwrap();
        assert_eq!(game.state().time_ticks, 0);
        assert_eq!(game.state().seed, 99);
    }

    #[test]
    fn bad_json_config_is_rejected() {
        assert!(Game::from_json("{ not json", 1).is_err());
        assert!(Game::from_json(r#"{"tick_hz": -5}"#, 1).is_err());
        let game = Game::from_json(r#"{"field_width": 1600}"#, 1).unwrap();
        assert_eq!(game.snapshot().field.width, 1600.0);
    }

    #[test]
    fn snapshot_json_has_state() {
        let mut game = game();
        game.step();
        let json = game.snapshot_json().unwrap();
        assert!(json.contains("\"targets\""));
        assert!(json.contains("\"classic\""));
    }
}
