//! Top-10 leaderboard
//!
//! Filled from [`GameEvent::ReturnedToMenu`]. Stored as JSON: a file on
//! native builds, LocalStorage in the browser.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Leaderboard capacity
pub const MAX_HIGH_SCORES: usize = 10;

/// Names are cut to this many characters
pub const MAX_NAME_LEN: usize = 16;

/// One finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub points: i64,
    /// Wall-clock ms since the Unix epoch
    pub timestamp: f64,
}

/// Runs ordered best first; ties keep the earlier run ahead
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

fn clean_name(name: &str) -> String {
    let name: String = name.trim().chars().take(MAX_NAME_LEN).collect();
    if name.is_empty() { "Diver".into() } else { name }
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot (0-based) a score would land in, if it makes the board
    fn slot_for(&self, points: i64) -> Option<usize> {
        if points <= 0 {
            return None;
        }
        let slot = self.entries.partition_point(|e| e.points >= points);
        (slot < MAX_HIGH_SCORES).then_some(slot)
    }

    /// Whether a run with `points` would enter the board
    pub fn qualifies(&self, points: i64) -> bool {
        self.slot_for(points).is_some()
    }

    /// 1-based rank `points` would take, without inserting it
    pub fn potential_rank(&self, points: i64) -> Option<usize> {
        self.slot_for(points).map(|slot| slot + 1)
    }

    /// Insert a run, dropping whatever falls off the bottom; returns the 1-based rank
    pub fn add_score(&mut self, name: &str, points: i64, timestamp: f64) -> Option<usize> {
        let slot = self.slot_for(points)?;
        self.entries.insert(
            slot,
            HighScoreEntry {
                name: clean_name(name),
                points,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);

        log::info!("High score {} entered at rank {}", points, slot + 1);
        Some(slot + 1)
    }

    /// Submit the final score carried by a reset notification; other events are ignored
    pub fn record(&mut self, event: &GameEvent, name: &str, timestamp: f64) -> Option<usize> {
        match event {
            GameEvent::ReturnedToMenu { final_score } => {
                self.add_score(name, *final_score, timestamp)
            }
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.points)
    }

    /// Parse stored JSON, falling back to an empty board if it is unreadable
    fn from_stored(json: Option<String>) -> Self {
        match json.and_then(|json| serde_json::from_str::<Self>(&json).ok()) {
            Some(mut scores) => {
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            None => {
                log::info!("No stored high scores, starting with an empty board");
                Self::new()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Self {
        Self::from_stored(std::fs::read_to_string(path).ok())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Saved {} high scores", self.entries.len());
        Ok(())
    }

    /// Browser builds ignore `_path` and use LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn load(_path: &str) -> Self {
        use crate::platform::storage;

        let json = storage::get(storage::HIGH_SCORES_KEY);
        Self::from_stored(json)
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self, _path: &str) -> std::io::Result<()> {
        use crate::platform::storage;

        storage::set(storage::HIGH_SCORES_KEY, &serde_json::to_string(self)?);
        log::info!("Saved {} high scores", self.entries.len());
        Ok(())
    }
}
