//! wasm-bindgen surface for browser hosts
//!
//! The page owns the canvas, the animation loop and Web Audio. It calls
//! `frame` from `requestAnimationFrame`, forwards taps and keys, and drains
//! events as JSON once per frame.

use wasm_bindgen::prelude::*;

use super::EventQueue;
use crate::engine::{Engine, Key};
use crate::persistence::LocalStorageStore;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Color Match Rush core loaded");
}

#[wasm_bindgen]
pub struct WebGame {
    engine: Engine,
    events: EventQueue,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<WebGame, JsValue> {
        let store = LocalStorageStore::default();
        let seed = rand::random();
        let tuning = Tuning::for_playfield(width, height);
        let mut engine = Engine::with_tuning(tuning, seed, Box::new(store))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let mut events = EventQueue::new();
        events.attach(&mut engine);
        Ok(WebGame { engine, events })
    }

    pub fn frame(&mut self, timestamp_ms: f64) {
        self.engine.frame(timestamp_ms);
    }

    pub fn pointer(&mut self, x: f32, y: f32, timestamp_ms: f64) {
        self.engine.submit_pointer_input(x, y, timestamp_ms);
    }

    /// Forward a `KeyboardEvent.key` value
    pub fn key(&mut self, key: &str) {
        match key {
            " " => self.engine.submit_key(Key::Space),
            "Enter" => self.engine.submit_key(Key::Enter),
            _ => {}
        }
    }

    #[wasm_bindgen(js_name = startGame)]
    pub fn start_game(&mut self) {
        self.engine.start_game();
        // A destroyed engine comes back without listeners
        if !self.events.is_attached() {
            self.events.attach(&mut self.engine);
        }
    }

    #[wasm_bindgen(js_name = pauseGame)]
    pub fn pause_game(&mut self) {
        self.engine.pause_game();
    }

    /// Current state as JSON for the renderer and HUD
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.engine
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Events raised since the last call, as a JSON array
    #[wasm_bindgen(js_name = takeEvents)]
    pub fn take_events(&mut self) -> String {
        self.events.take_json()
    }

    pub fn destroy(&mut self) {
        self.engine.destroy();
        self.events.detach();
    }
}
