//! Simulation module
//!
//! All gameplay logic lives here. No rendering, no platform calls:
//! - Time is passed in as a millisecond timestamp
//! - Input is read through [`crate::input::InputSource`]
//! - Randomness comes from the seeded RNG in [`GameState`]

pub mod actors;
pub mod collision;
pub mod entity;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use actors::{Collectable, Enemy, ItemKind, ItemState};
pub use collision::{Aabb, overlaps};
pub use entity::Body;
pub use player::{Mood, Player};
pub use spawn::{SpawnKind, SpawnTimers, enemy_spawn_params};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::tick;
