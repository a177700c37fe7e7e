//! Browser bindings
//!
//! The page owns the canvas and the animation frame loop; it forwards pointer
//! events and timestamps here and draws from the JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::config::SimConfig;
use crate::game::Game;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("Bullseye starting...");
    }
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    /// `config_json` overrides defaults field by field; the seed defaults to the clock
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>, seed: Option<f64>) -> Result<WebGame, JsError> {
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        let game = match config_json {
            Some(json) => Game::from_json(&json, seed)?,
            None => Game::new(SimConfig::default(), seed)?,
        };
        Ok(Self { game })
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.game.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.game.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.game.pointer_up();
    }

    /// False for unknown or locked modes
    pub fn select_mode(&mut self, id: &str) -> bool {
        self.game.select_mode(id)
    }

    /// Call from requestAnimationFrame with its timestamp
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        self.game.frame(now_ms)
    }

    pub fn restart(&mut self, seed: f64) -> Result<(), JsError> {
        self.game.restart(seed as u64)?;
        Ok(())
    }

    pub fn snapshot(&self) -> Result<String, JsError> {
        Ok(self.game.snapshot_json()?)
    }

    pub fn alpha(&self) -> f32 {
        self.game.alpha()
    }
}
