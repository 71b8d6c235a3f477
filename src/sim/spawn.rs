//! Spawn scheduling and placement
//!
//! Each category runs its own timer. Delays are uniform in
//! `[base - variance, base + variance]`; enemy delays shrink as the score
//! climbs, collectable delays never do.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actors::{Collectable, Enemy, ItemKind};
use crate::config::GameConfig;
use crate::consts::*;

/// Enemy `(base, variance)` in ms for the given score
pub fn enemy_spawn_params(config: &GameConfig, score: i64) -> (f64, f64) {
    let base = config.enemy_spawn_base_ms;
    let variance = config.enemy_spawn_variance_ms;

    let steps = score.div_euclid(config.difficulty_step_points.max(1));
    if steps <= 0 {
        return (base, variance);
    }

    let reduction = config.difficulty_factor.powi(steps.min(i32::MAX as i64) as i32);
    (
        (base * reduction).max(config.min_enemy_spawn_base_ms),
        (variance * reduction).max(config.min_enemy_spawn_variance_ms),
    )
}

/// Draw a delay uniformly from `base ± variance`
pub fn jittered_delay(base: f64, variance: f64, rng: &mut impl Rng) -> f64 {
    base + (rng.random::<f64>() * 2.0 - 1.0) * variance
}

/// The three independent spawners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    Enemy,
    GoodItem,
    BadItem,
}

/// Next-deadline timestamps (ms) for the three independent spawners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub enemy_at: f64,
    pub good_item_at: f64,
    pub bad_item_at: f64,
}

impl SpawnTimers {
    /// Schedule all three spawners relative to `now`
    pub fn new(config: &GameConfig, score: i64, now: f64, rng: &mut impl Rng) -> Self {
        Self {
            enemy_at: now + next_enemy_delay(config, score, rng),
            good_item_at: now + next_good_item_delay(config, rng),
            bad_item_at: now + next_bad_item_delay(config, rng),
        }
    }
}

pub fn next_enemy_delay(config: &GameConfig, score: i64, rng: &mut impl Rng) -> f64 {
    let (base, variance) = enemy_spawn_params(config, score);
    jittered_delay(base, variance, rng)
}

pub fn next_good_item_delay(config: &GameConfig, rng: &mut impl Rng) -> f64 {
    jittered_delay(
        config.collectable_spawn_base_ms,
        config.collectable_spawn_variance_ms,
        rng,
    )
}

pub fn next_bad_item_delay(config: &GameConfig, rng: &mut impl Rng) -> f64 {
    jittered_delay(
        config.bad_collectable_spawn_base_ms,
        config.bad_collectable_spawn_variance_ms,
        rng,
    )
}

/// Enemy entering from a random side at a random height, heading inward
pub fn random_enemy(config: &GameConfig, id: u32, rng: &mut impl Rng) -> Enemy {
    let size = config.enemy_size;
    let from_left = rng.random_bool(0.5);
    let y = rng.random::<f32>() * (config.world_height - size.y);
    let speed_x = ENEMY_MIN_SPEED_X + rng.random::<f32>() * ENEMY_SPEED_X_RANGE;

    let (x, vx) = if from_left {
        (-size.x - ENEMY_SPAWN_GAP, speed_x)
    } else {
        (config.world_width + ENEMY_SPAWN_GAP, -speed_x)
    };
    let vy = (rng.random::<f32>() * 2.0 - 1.0) * ENEMY_MAX_SPEED_Y;

    Enemy::new(id, Vec2::new(x, y), Vec2::new(vx, vy), size)
}

/// Item somewhere in the lower half of the world
pub fn random_item(
    config: &GameConfig,
    id: u32,
    bad: bool,
    now: f64,
    rng: &mut impl Rng,
) -> Collectable {
    let size = config.collectable_size;
    let x = rng.random::<f32>() * (config.world_width - size.x);
    let min_y = config.world_height * 0.5;
    let y = min_y + rng.random::<f32>() * (config.world_height - min_y - size.y);

    let kind = if bad {
        ItemKind::Bad {
            variant: rng.random_range(0..BAD_VARIANTS),
        }
    } else {
        ItemKind::Good {
            variant: rng.random_range(0..GOOD_VARIANTS),
        }
    };

    Collectable::new(id, kind, Vec2::new(x, y), size, now, config.collectable_lifetime_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_no_scaling_below_first_tier() {
        let config = GameConfig::default();
        assert_eq!(enemy_spawn_params(&config, 0), (3000.0, 1000.0));
        assert_eq!(enemy_spawn_params(&config, 99), (3000.0, 1000.0));
        // Penalties can push the score negative
        assert_eq!(enemy_spawn_params(&config, -40), (3000.0, 1000.0));
    }

    #[test]
    fn test_two_tiers_at_250() {
        let config = GameConfig::default();
        let (base, variance) = enemy_spawn_params(&config, 250);
        assert!((base - (3000.0f64 * 0.75 * 0.75).max(400.0)).abs() < 1e-9);
        assert!((variance - (1000.0f64 * 0.5625).max(150.0)).abs() < 1e-9);
    }

    #[test]
    fn test_scaling_floors_at_minimums() {
        let config = GameConfig::default();
        assert_eq!(enemy_spawn_params(&config, 10_000), (400.0, 150.0));
    }

    #[test]
    fn test_delay_within_variance() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let d = jittered_delay(3000.0, 1500.0, &mut rng);
            assert!((1500.0..=4500.0).contains(&d));
        }
    }

    #[test]
    fn test_enemy_spawns_outside_heading_in() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..200 {
            let e = random_enemy(&config, id, &mut rng);
            let b = e.body;
            assert!(b.pos.y >= 0.0 && b.pos.y <= config.world_height - b.size.y);
            assert!((-2.0..2.0).contains(&b.vel.y));
            assert!((2.0..5.0).contains(&b.vel.x.abs()));
            if b.vel.x > 0.0 {
                assert_eq!(b.pos.x, -b.size.x - ENEMY_SPAWN_GAP);
            } else {
                assert_eq!(b.pos.x, config.world_width + ENEMY_SPAWN_GAP);
            }
        }
    }

    #[test]
    fn test_items_spawn_in_lower_half() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for id in 0..200 {
            let bad = id % 2 == 0;
            let c = random_item(&config, id, bad, 1234.0, &mut rng);
            assert_eq!(c.is_bad(), bad);
            assert!(c.body.pos.y >= config.world_height * 0.5);
            assert!(c.body.pos.y + c.body.size.y <= config.world_height);
            assert!(c.body.pos.x >= 0.0 && c.body.pos.x + c.body.size.x <= config.world_width);
            assert_eq!(c.spawned_at, 1234.0);
            assert_eq!(c.body.vel, Vec2::ZERO);
        }
    }

    #[test]
    fn test_timers_are_independent() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let timers = SpawnTimers::new(&config, 0, 100.0, &mut rng);
        assert!((2100.0..=4100.0).contains(&timers.enemy_at));
        assert!((1600.0..=4600.0).contains(&timers.good_item_at));
        assert!((1600.0..=4600.0).contains(&timers.bad_item_at));
    }
}
