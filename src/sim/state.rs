//! Game state and core simulation types
//!
//! `GameState` is the single owner of the player, enemies and items. Nothing
//! outside the simulation mutates them; the host only flips the phase with
//! [`GameState::start`] and reads back scores and events.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actors::{Collectable, Enemy};
use super::player::Player;
use super::spawn::{self, SpawnKind, SpawnTimers};
use crate::config::GameConfig;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not running; waiting for a start signal
    Menu,
    /// Active gameplay
    Playing,
    /// Out of breath, screen fading to black since `since` (ms)
    Dying { since: f64 },
}

/// Things that happened during a tick, for audio/UI/leaderboard collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    EnemySpawned { id: u32 },
    CollectableSpawned { id: u32, bad: bool },
    /// Enemy contact that got through invulnerability
    PlayerHit { damage: f32 },
    ItemCollected { id: u32, bad: bool, score_delta: i64 },
    ItemExpired { id: u32 },
    PlayerDied { score: i64 },
    /// Back on the menu; the final score is ready for submission
    ReturnedToMenu { final_score: i64 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub world: Vec2,
    /// Player cannot rise above this Y; enemies bounce off it
    pub surface_y: f32,
    /// Unclamped; bad items can push it negative
    pub score: i64,
    /// Score of the last finished run
    pub final_score: i64,
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub collectables: Vec<Collectable>,
    pub timers: SpawnTimers,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a session sitting on the menu
    pub fn new(config: &GameConfig, seed: u64, now: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let timers = SpawnTimers::new(config, 0, now, &mut rng);

        Self {
            config: config.clone(),
            seed,
            rng,
            world: config.world_size(),
            surface_y: config.water_surface_y(),
            score: 0,
            final_score: 0,
            phase: GamePhase::Menu,
            player: Player::new(config),
            enemies: Vec::new(),
            collectables: Vec::new(),
            timers,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Leave the menu and start playing
    ///
    /// Returns false if a run is already in progress.
    pub fn start(&mut self, now: f64) -> bool {
        if self.is_running() {
            return false;
        }

        self.phase = GamePhase::Playing;
        self.timers = SpawnTimers::new(&self.config, self.score, now, &mut self.rng);
        self.events.push(GameEvent::Started);
        log::info!("Run started (seed {})", self.seed);
        true
    }

    pub fn is_running(&self) -> bool {
        self.phase != GamePhase::Menu
    }

    pub fn is_dead(&self) -> bool {
        matches!(self.phase, GamePhase::Dying { .. })
    }

    /// Opacity of the black death overlay (0 while alive)
    pub fn death_fade_alpha(&self, now: f64) -> f32 {
        match self.phase {
            GamePhase::Dying { since } if self.config.death_fade_ms > 0.0 => {
                ((now - since) / self.config.death_fade_ms).clamp(0.0, 1.0) as f32
            }
            GamePhase::Dying { .. } => 1.0,
            _ => 0.0,
        }
    }

    /// Take the events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Roll the next delay (ms) for one spawner; enemies scale with the current score
    pub(crate) fn roll_delay(&mut self, kind: SpawnKind) -> f64 {
        match kind {
            SpawnKind::Enemy => spawn::next_enemy_delay(&self.config, self.score, &mut self.rng),
            SpawnKind::GoodItem => spawn::next_good_item_delay(&self.config, &mut self.rng),
            SpawnKind::BadItem => spawn::next_bad_item_delay(&self.config, &mut self.rng),
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_enemy(&mut self) {
        let id = self.next_entity_id();
        let enemy = spawn::random_enemy(&self.config, id, &mut self.rng);
        log::debug!(
            "Enemy {} spawned at ({:.0}, {:.0}) vel ({:.2}, {:.2})",
            id,
            enemy.body.pos.x,
            enemy.body.pos.y,
            enemy.body.vel.x,
            enemy.body.vel.y
        );
        self.enemies.push(enemy);
        self.emit(GameEvent::EnemySpawned { id });
    }

    pub fn spawn_collectable(&mut self, bad: bool, now: f64) {
        let id = self.next_entity_id();
        let item = spawn::random_item(&self.config, id, bad, now, &mut self.rng);
        log::debug!(
            "{} item {} spawned at ({:.0}, {:.0})",
            if bad { "Bad" } else { "Good" },
            id,
            item.body.pos.x,
            item.body.pos.y
        );
        self.collectables.push(item);
        self.emit(GameEvent::CollectableSpawned { id, bad });
    }

    /// Finish the run: keep the score, wipe the world, replace the player
    pub fn reset_to_menu(&mut self, now: f64) {
        self.final_score = self.score;

        self.phase = GamePhase::Menu;
        self.score = 0;
        self.enemies.clear();
        self.collectables.clear();
        self.player = Player::new(&self.config);
        self.timers = SpawnTimers::new(&self.config, 0, now, &mut self.rng);

        log::info!("Returned to menu, final score {}", self.final_score);
        self.emit(GameEvent::ReturnedToMenu {
            final_score: self.final_score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_waits_on_menu() {
        let state = GameState::new(&GameConfig::default(), 1, 0.0);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(!state.is_running());
        assert!(state.enemies.is_empty());
        assert!(state.collectables.is_empty());
    }

    #[test]
    fn test_start_only_once() {
        let mut state = GameState::new(&GameConfig::default(), 1, 0.0);
        assert!(state.start(10.0));
        assert!(!state.start(20.0));
        assert_eq!(state.drain_events(), vec![GameEvent::Started]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(&GameConfig::default(), 1, 0.0);
        state.spawn_enemy();
        state.spawn_collectable(true, 0.0);
        state.spawn_collectable(false, 0.0);
        let mut ids: Vec<u32> = state.enemies.iter().map(|e| e.id).collect();
        ids.extend(state.collectables.iter().map(|c| c.id));
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_death_fade_alpha() {
        let mut state = GameState::new(&GameConfig::default(), 1, 0.0);
        assert_eq!(state.death_fade_alpha(100.0), 0.0);
        state.phase = GamePhase::Dying { since: 1000.0 };
        assert!((state.death_fade_alpha(1750.0) - 0.5).abs() < 1e-6);
        assert_eq!(state.death_fade_alpha(5000.0), 1.0);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let config = GameConfig::default();
        let mut a = GameState::new(&config, 99, 0.0);
        let mut b = GameState::new(&config, 99, 0.0);
        assert_eq!(a.timers, b.timers);
        a.spawn_enemy();
        b.spawn_enemy();
        assert_eq!(a.enemies[0].body, b.enemies[0].body);
    }
}
