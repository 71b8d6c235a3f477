//! Scuba Dive - an underwater breath-holding arcade game
//!
//! Core modules:
//! - `sim`: Simulation engine (physics, spawning, collisions, lifecycle)
//! - `input`: Key-state snapshot and rising-edge detection
//! - `config`: Immutable tuning loaded once at startup
//! - `platform`: Browser/native clock abstraction
//! - `highscores`: Leaderboard fed by reset notifications
//! - `session`: State, keys and clock bundled for a host page

pub mod config;
pub mod error;
pub mod highscores;
pub mod input;
pub mod platform;
pub mod session;
pub mod sim;

pub use config::{GameConfig, PlayerConfig};
pub use error::ConfigError;
pub use highscores::HighScores;
pub use input::{Direction, EdgeDetector, InputSource, Key, KeyState};
pub use session::Session;

/// Game configuration constants
pub mod consts {
    /// Internal world resolution (the canvas is scaled to fit)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 450.0;
    /// Water surface as a fraction of world height
    pub const WATER_SURFACE_RATIO: f32 = 0.15;

    /// Sprite footprints (collision boxes)
    pub const PLAYER_SIZE: (f32, f32) = (100.0, 50.0);
    pub const ENEMY_SIZE: (f32, f32) = (100.0, 45.0);
    pub const COLLECTABLE_SIZE: (f32, f32) = (42.0, 42.0);

    /// Enemies are culled this far past the world edge
    pub const ENEMY_OFFSCREEN_MARGIN: f32 = 50.0;
    /// Enemies spawn this far outside the world edge
    pub const ENEMY_SPAWN_GAP: f32 = 10.0;
    /// Enemy horizontal speed range (px/tick)
    pub const ENEMY_MIN_SPEED_X: f32 = 2.0;
    pub const ENEMY_SPEED_X_RANGE: f32 = 3.0;
    /// Enemy vertical speed magnitude bound (px/tick)
    pub const ENEMY_MAX_SPEED_Y: f32 = 2.0;

    /// Sprite variants per collectable category
    pub const GOOD_VARIANTS: u8 = 4;
    pub const BAD_VARIANTS: u8 = 3;

    /// Blink frequency for the hit flash (half-cycles per ms)
    pub const BLINK_SPEED: f64 = 0.01;
}
