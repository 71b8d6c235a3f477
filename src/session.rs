//! Host-facing game session
//!
//! Bundles a [`GameState`] with the key snapshot and clock a host page needs
//! to drive it. On wasm the type is exported to JS; the page forwards key
//! events, calls `frame()` from `requestAnimationFrame`, and drains events as
//! JSON. A new session waits on the menu until `start()` is called.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use glam::Vec2;

use crate::config::GameConfig;
use crate::input::KeyState;
use crate::platform::Clock;
use crate::sim::{GameState, tick};

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub struct Session {
    state: GameState,
    keys: KeyState,
    clock: Clock,
}

/// Config the page persisted, or defaults on native
fn stored_config() -> GameConfig {
    #[cfg(target_arch = "wasm32")]
    {
        GameConfig::load_or_default("")
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        GameConfig::default()
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl Session {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(seed: u64) -> Session {
        Self::with_config(&stored_config(), seed)
    }

    /// Forward a DOM `keydown`/`keyup`; keys are ignored while on the menu
    pub fn key_event(&mut self, key: &str, down: bool) {
        if self.state.is_running() {
            self.keys.apply_dom_event(key, down);
        }
    }

    /// Pointer position in world coordinates
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.keys.set_pointer(Some(Vec2::new(x, y)));
    }

    /// Leave the menu; false if a run is already going
    pub fn start(&mut self) -> bool {
        let now = self.clock.now_ms();
        self.start_at(now)
    }

    pub fn start_at(&mut self, now: f64) -> bool {
        self.keys.clear();
        self.state.start(now)
    }

    /// Advance to the current clock time
    pub fn frame(&mut self) {
        let now = self.clock.now_ms();
        self.frame_at(now);
    }

    pub fn frame_at(&mut self, now: f64) {
        tick(&mut self.state, &self.keys, now);
        if !self.state.is_running() {
            self.keys.clear();
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn score(&self) -> i64 {
        self.state.score
    }

    pub fn final_score(&self) -> i64 {
        self.state.final_score
    }

    pub fn breath_fraction(&self) -> f32 {
        self.state.player.breath_fraction()
    }

    pub fn death_fade_alpha(&self, now: f64) -> f32 {
        self.state.death_fade_alpha(now)
    }

    /// Events since the last drain as a JSON array; the page decides what to persist
    pub fn drain_events_json(&mut self) -> String {
        let events = self.state.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|err| {
            log::error!("Could not encode {} events: {}", events.len(), err);
            "[]".to_string()
        })
    }
}

impl Session {
    pub fn with_config(config: &GameConfig, seed: u64) -> Self {
        let clock = Clock::new();
        let state = GameState::new(config, seed, clock.now_ms());
        log::info!("Session ready on the menu (seed {})", seed);
        Self {
            state,
            keys: KeyState::new(),
            clock,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
}
