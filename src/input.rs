//! Input abstraction
//!
//! The simulation only sees a snapshot of which keys are held. Whoever owns
//! the real event listeners (DOM, terminal, test harness) writes into a
//! [`KeyState`] between ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keys the simulation cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
}

impl Key {
    pub const ALL: [Key; 8] = [
        Key::ArrowUp,
        Key::ArrowDown,
        Key::ArrowLeft,
        Key::ArrowRight,
        Key::W,
        Key::A,
        Key::S,
        Key::D,
    ];

    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "w" | "W" => Some(Key::W),
            "a" | "A" => Some(Key::A),
            "s" | "S" => Some(Key::S),
            "d" | "D" => Some(Key::D),
            _ => None,
        }
    }

    /// Movement direction this key drives (arrows and WASD are aliases)
    pub fn direction(self) -> Direction {
        match self {
            Key::ArrowUp | Key::W => Direction::Up,
            Key::ArrowDown | Key::S => Direction::Down,
            Key::ArrowLeft | Key::A => Direction::Left,
            Key::ArrowRight | Key::D => Direction::Right,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Read-only view of the current input
pub trait InputSource {
    /// Whether `key` is currently held down
    fn is_held(&self, key: Key) -> bool;

    /// Whether any key aliased to `dir` is held
    fn direction_held(&self, dir: Direction) -> bool {
        Key::ALL
            .iter()
            .any(|&key| key.direction() == dir && self.is_held(key))
    }

    /// Angle (radians, +x axis, +y down) from `from` to the pointer, if there is one
    fn pointer_angle(&self, _from: Vec2) -> Option<f32> {
        None
    }
}

/// Snapshot map of held keys (absent = not held)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyState {
    held: [bool; 8],
    /// Last pointer position in world coordinates
    pointer: Option<Vec2>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, held: bool) {
        self.held[key.index()] = held;
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    /// Release everything (input disabled while on the menu)
    pub fn clear(&mut self) {
        self.held = [false; 8];
    }

    pub fn set_pointer(&mut self, pos: Option<Vec2>) {
        self.pointer = pos;
    }

    /// Apply a DOM-style key event; unknown keys are ignored
    pub fn apply_dom_event(&mut self, key: &str, down: bool) {
        if let Some(key) = Key::from_dom_key(key) {
            self.set(key, down);
        }
    }
}

impl InputSource for KeyState {
    fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    fn pointer_angle(&self, from: Vec2) -> Option<f32> {
        self.pointer
            .map(|p| p - from)
            .filter(|d| *d != Vec2::ZERO)
            .map(Vec2::to_angle)
    }
}

/// Directions that went from released to held this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pressed {
    flags: [bool; 4],
}

impl Pressed {
    pub fn contains(&self, dir: Direction) -> bool {
        self.flags[dir.index()]
    }

    pub fn is_empty(&self) -> bool {
        !self.flags.iter().any(|&f| f)
    }
}

/// Per-direction rising-edge detector
///
/// Call [`EdgeDetector::update`] exactly once per tick, before physics.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    prev: [bool; 4],
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample `input` and report the directions pressed since the last call
    pub fn update(&mut self, input: &dyn InputSource) -> Pressed {
        let mut pressed = Pressed::default();
        for dir in Direction::ALL {
            let held = input.direction_held(dir);
            let i = dir.index();
            pressed.flags[i] = held && !self.prev[i];
            self.prev[i] = held;
        }
        pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_angle_from_position() {
        let mut keys = KeyState::new();
        assert_eq!(keys.pointer_angle(Vec2::ZERO), None);

        keys.set_pointer(Some(Vec2::new(10.0, 10.0)));
        assert_eq!(keys.pointer_angle(Vec2::new(10.0, 10.0)), None);
        let angle = keys.pointer_angle(Vec2::new(10.0, 0.0)).unwrap();
        assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn missing_keys_are_not_held() {
        let keys = KeyState::new();
        for key in Key::ALL {
            assert!(!keys.is_held(key));
        }
    }

    #[test]
    fn dom_keys_map_to_aliases() {
        let mut keys = KeyState::new();
        keys.apply_dom_event("w", true);
        keys.apply_dom_event("Escape", true);
        assert!(keys.direction_held(Direction::Up));
        assert!(!keys.direction_held(Direction::Down));

        keys.apply_dom_event("w", false);
        assert!(!keys.direction_held(Direction::Up));
    }

    #[test]
    fn edge_fires_once_per_press() {
        let mut keys = KeyState::new();
        let mut edges = EdgeDetector::new();

        keys.press(Key::ArrowLeft);
        assert!(edges.update(&keys).contains(Direction::Left));
        // Held: no new edge
        assert!(edges.update(&keys).is_empty());

        keys.release(Key::ArrowLeft);
        assert!(edges.update(&keys).is_empty());

        keys.press(Key::ArrowLeft);
        assert!(edges.update(&keys).contains(Direction::Left));
    }

    #[test]
    fn alias_switch_while_held_is_not_a_press() {
        let mut keys = KeyState::new();
        let mut edges = EdgeDetector::new();

        keys.press(Key::ArrowDown);
        assert!(edges.update(&keys).contains(Direction::Down));

        keys.press(Key::S);
        keys.release(Key::ArrowDown);
        assert!(!edges.update(&keys).contains(Direction::Down));
    }

    #[test]
    fn directions_are_independent() {
        let mut keys = KeyState::new();
        let mut edges = EdgeDetector::new();

        keys.press(Key::D);
        edges.update(&keys);
        keys.press(Key::W);
        let pressed = edges.update(&keys);
        assert!(pressed.contains(Direction::Up));
        assert!(!pressed.contains(Direction::Right));
    }
}
