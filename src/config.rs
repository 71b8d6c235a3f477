//! Game tuning
//!
//! Every tunable lives here with its default. The config is built once at
//! startup, validated, and then only ever read by the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Player movement, breath and damage tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Start position as a fraction of world width/height (0..1)
    pub start_x_ratio: f32,
    pub start_y_ratio: f32,

    // === Movement (px/s² for acceleration and buoyancy, 1/s for drag) ===
    /// Impulse applied on a horizontal key press
    pub acceleration_x: f32,
    /// Impulse applied on a vertical key press
    pub acceleration_y: f32,
    pub drag: f32,
    /// Constant upward pull
    pub buoyancy: f32,

    // === Breath (timings in ms) ===
    pub max_breath: f32,
    /// Time to go from full to empty underwater
    pub breath_decay_ms: f64,
    /// Time to refill from empty to full at the surface
    pub breath_refill_ms: f64,

    // === Damage ===
    /// Invulnerability window after an enemy hit
    pub damage_invul_ms: f64,
    /// Shorter window (and flash) after touching a bad collectable
    pub collectable_invul_ms: f64,
    pub enemy_damage: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_x_ratio: 0.5,
            // Slightly below the water surface
            start_y_ratio: WATER_SURFACE_RATIO + 0.05,

            acceleration_x: 1000.0,
            acceleration_y: 1000.0,
            drag: 2.0,
            buoyancy: 100.0,

            max_breath: 100.0,
            breath_decay_ms: 10_000.0,
            breath_refill_ms: 1_000.0,

            damage_invul_ms: 500.0,
            collectable_invul_ms: 250.0,
            enemy_damage: 50.0,
        }
    }
}

/// Whole-game tuning, passed by reference into the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    /// Water surface as a fraction of world height (player cannot rise above it)
    pub water_surface_ratio: f32,

    // === Enemy spawning (ms) ===
    pub enemy_spawn_base_ms: f64,
    pub enemy_spawn_variance_ms: f64,
    /// Points per difficulty tier
    pub difficulty_step_points: i64,
    /// Spawn delay multiplier applied once per tier
    pub difficulty_factor: f64,
    pub min_enemy_spawn_base_ms: f64,
    pub min_enemy_spawn_variance_ms: f64,

    // === Collectable spawning (ms) ===
    pub collectable_spawn_base_ms: f64,
    pub collectable_spawn_variance_ms: f64,
    pub bad_collectable_spawn_base_ms: f64,
    pub bad_collectable_spawn_variance_ms: f64,
    /// Time before an uncollected item vanishes
    pub collectable_lifetime_ms: f64,

    // === Scoring ===
    pub collectable_score: i64,
    pub bad_collectable_penalty: i64,
    /// Breath lost when touching a bad collectable
    pub bad_collectable_damage: f32,

    // === Collision forgiveness (fraction of each box trimmed away, 0..1) ===
    pub enemy_compenetration: f32,
    pub collectable_compenetration: f32,

    // === Lifecycle ===
    pub death_fade_ms: f64,

    // === Sprite footprints ===
    pub player_size: Vec2,
    pub enemy_size: Vec2,
    pub collectable_size: Vec2,

    pub player: PlayerConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            water_surface_ratio: WATER_SURFACE_RATIO,

            enemy_spawn_base_ms: 3000.0,
            enemy_spawn_variance_ms: 1000.0,
            difficulty_step_points: 100,
            difficulty_factor: 0.75,
            min_enemy_spawn_base_ms: 400.0,
            min_enemy_spawn_variance_ms: 150.0,

            collectable_spawn_base_ms: 3000.0,
            collectable_spawn_variance_ms: 1500.0,
            bad_collectable_spawn_base_ms: 3000.0,
            bad_collectable_spawn_variance_ms: 1500.0,
            collectable_lifetime_ms: 5000.0,

            collectable_score: 10,
            bad_collectable_penalty: 10,
            bad_collectable_damage: 15.0,

            enemy_compenetration: 0.1,
            collectable_compenetration: 0.0,

            death_fade_ms: 1500.0,

            player_size: Vec2::new(PLAYER_SIZE.0, PLAYER_SIZE.1),
            enemy_size: Vec2::new(ENEMY_SIZE.0, ENEMY_SIZE.1),
            collectable_size: Vec2::new(COLLECTABLE_SIZE.0, COLLECTABLE_SIZE.1),

            player: PlayerConfig::default(),
        }
    }
}

fn require(ok: bool, field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason })
    }
}

impl GameConfig {
    /// World size as a vector
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }

    /// Y coordinate of the water surface line
    pub fn water_surface_y(&self) -> f32 {
        self.world_height * self.water_surface_ratio
    }

    /// Parse and validate a JSON config; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value the simulation divides by or relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.player;

        require(self.world_width > 0.0, "world_width", "must be > 0")?;
        require(self.world_height > 0.0, "world_height", "must be > 0")?;
        require(
            (0.0..1.0).contains(&self.water_surface_ratio),
            "water_surface_ratio",
            "must be in [0, 1)",
        )?;

        require(self.enemy_spawn_base_ms > 0.0, "enemy_spawn_base_ms", "must be > 0")?;
        require(
            self.enemy_spawn_variance_ms >= 0.0,
            "enemy_spawn_variance_ms",
            "must be >= 0",
        )?;
        require(
            self.difficulty_step_points > 0,
            "difficulty_step_points",
            "must be > 0",
        )?;
        require(
            self.difficulty_factor > 0.0 && self.difficulty_factor <= 1.0,
            "difficulty_factor",
            "must be in (0, 1]",
        )?;
        require(
            self.collectable_spawn_base_ms > 0.0,
            "collectable_spawn_base_ms",
            "must be > 0",
        )?;
        require(
            self.collectable_spawn_variance_ms >= 0.0,
            "collectable_spawn_variance_ms",
            "must be >= 0",
        )?;
        require(
            self.bad_collectable_spawn_base_ms > 0.0,
            "bad_collectable_spawn_base_ms",
            "must be > 0",
        )?;
        require(
            self.bad_collectable_spawn_variance_ms >= 0.0,
            "bad_collectable_spawn_variance_ms",
            "must be >= 0",
        )?;
        require(
            self.collectable_lifetime_ms > 0.0,
            "collectable_lifetime_ms",
            "must be > 0",
        )?;

        require(
            (0.0..1.0).contains(&self.enemy_compenetration),
            "enemy_compenetration",
            "must be in [0, 1)",
        )?;
        require(
            (0.0..1.0).contains(&self.collectable_compenetration),
            "collectable_compenetration",
            "must be in [0, 1)",
        )?;
        require(self.death_fade_ms >= 0.0, "death_fade_ms", "must be >= 0")?;

        require(p.max_breath > 0.0, "player.max_breath", "must be > 0")?;
        require(p.breath_decay_ms > 0.0, "player.breath_decay_ms", "must be > 0")?;
        require(p.breath_refill_ms > 0.0, "player.breath_refill_ms", "must be > 0")?;
        require(p.drag >= 0.0, "player.drag", "must be >= 0")?;
        require(p.damage_invul_ms >= 0.0, "player.damage_invul_ms", "must be >= 0")?;
        require(
            p.collectable_invul_ms >= 0.0,
            "player.collectable_invul_ms",
            "must be >= 0",
        )?;

        Ok(())
    }

    /// Read a JSON config file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Read a config file, falling back to defaults on any error
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: impl AsRef<std::path::Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{}; using default config", err);
                Self::default()
            }
        }
    }

    /// Load config from LocalStorage, falling back to defaults (browser builds ignore `_path`)
    #[cfg(target_arch = "wasm32")]
    pub fn load_or_default(_path: &str) -> Self {
        use crate::platform::storage;

        let Some(json) = storage::get(storage::CONFIG_KEY) else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded config from LocalStorage");
                config
            }
            Err(err) => {
                log::warn!("{}; using default config", err);
                Self::default()
            }
        }
    }

    /// Persist config to LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), ConfigError> {
        use crate::platform::storage;

        storage::set(storage::CONFIG_KEY, &serde_json::to_string(self)?);
        log::info!("Config saved");
        Ok(())
    }
}
