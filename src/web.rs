//! Browser facade
//!
//! The page owns the canvas, images and `requestAnimationFrame`; it calls
//! into [`WebGame`] once per frame and for each pointer event, then draws
//! from the JSON snapshot.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::Settings;
use crate::sim::{GameState, SimError, pointer_down, pointer_move, pointer_up, tick};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Slingshot starting...");
}

fn to_js(err: SimError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
}

#[wasm_bindgen]
impl WebGame {
    /// New game sized to the canvas
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<WebGame, JsValue> {
        let settings = Settings::with_canvas(width, height);
        settings
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        Ok(Self {
            state: GameState::new(settings, seed),
        })
    }

    /// Advance one frame. Returns false once the game is complete.
    pub fn tick(&mut self) -> bool {
        tick(&mut self.state);
        self.state.is_running()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> Result<bool, JsValue> {
        pointer_down(&mut self.state, Vec2::new(x, y)).map_err(to_js)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> Result<bool, JsValue> {
        pointer_move(&mut self.state, Vec2::new(x, y)).map_err(to_js)
    }

    pub fn pointer_up(&mut self) -> Result<bool, JsValue> {
        pointer_up(&mut self.state)
            .map(|launched| launched.is_some())
            .map_err(to_js)
    }

    pub fn restart(&mut self) {
        self.state.restart();
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn stars_left(&self) -> usize {
        self.state.stars.len()
    }

    /// Current frame as JSON (see `RenderSnapshot`)
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Pending events as a JSON array; the page shows the level/game notices
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        let events = self.state.drain_events();
        serde_json::to_string(&events).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
