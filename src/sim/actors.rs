//! Enemies and collectable items
//!
//! Both wrap a [`Body`] and add their own per-tick rule. The controller owns
//! them and drops them once they flag themselves for removal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use crate::consts::ENEMY_OFFSCREEN_MARGIN;

/// A submarine crossing the world horizontally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub body: Body,
    /// Passed the far edge, ready for removal
    pub offscreen: bool,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, size: Vec2) -> Self {
        Self {
            id,
            body: Body::new(pos, vel, size),
            offscreen: false,
        }
    }

    /// Advance one tick: constant horizontal drift, vertical bounce between
    /// the water surface and the floor
    pub fn update(&mut self, world: Vec2, surface_y: f32) {
        let body = &mut self.body;
        body.pos.x += body.vel.x;

        let next_y = body.pos.y + body.vel.y;
        if next_y < surface_y {
            body.pos.y = surface_y;
            body.vel.y = -body.vel.y;
        } else if next_y + body.size.y > world.y {
            body.pos.y = world.y - body.size.y;
            body.vel.y = -body.vel.y;
        } else {
            body.pos.y = next_y;
        }
        body.update_facing();

        if body.pos.x + body.size.x < -ENEMY_OFFSCREEN_MARGIN
            || body.pos.x > world.x + ENEMY_OFFSCREEN_MARGIN
        {
            self.offscreen = true;
        }
    }
}

/// Good or bad item, with the sprite variant picked at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Fish: adds score
    Good { variant: u8 },
    /// Junk food: costs score and breath
    Bad { variant: u8 },
}

impl ItemKind {
    pub fn is_bad(&self) -> bool {
        matches!(self, ItemKind::Bad { .. })
    }

    pub fn variant(&self) -> u8 {
        match *self {
            ItemKind::Good { variant } | ItemKind::Bad { variant } => variant,
        }
    }
}

/// Where an item is in its short life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemState {
    Active,
    /// Touched by the player
    Collected,
    /// Outlived its lifetime
    Expired,
}

/// A stationary pickup that fades out over its lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectable {
    pub id: u32,
    pub body: Body,
    pub kind: ItemKind,
    /// Timestamp (ms) of the spawn
    pub spawned_at: f64,
    pub lifetime_ms: f64,
    pub state: ItemState,
}

impl Collectable {
    pub fn new(
        id: u32,
        kind: ItemKind,
        pos: Vec2,
        size: Vec2,
        spawned_at: f64,
        lifetime_ms: f64,
    ) -> Self {
        Self {
            id,
            body: Body::new(pos, Vec2::ZERO, size),
            kind,
            spawned_at,
            lifetime_ms,
            state: ItemState::Active,
        }
    }

    pub fn is_bad(&self) -> bool {
        self.kind.is_bad()
    }

    pub fn age(&self, now: f64) -> f64 {
        now - self.spawned_at
    }

    /// Expire once the lifetime has run out
    pub fn update(&mut self, now: f64) {
        if self.state == ItemState::Active && self.age(now) >= self.lifetime_ms {
            self.state = ItemState::Expired;
        }
    }

    pub fn collect(&mut self) {
        self.state = ItemState::Collected;
    }

    /// Ready to be dropped by the controller
    pub fn is_done(&self) -> bool {
        self.state != ItemState::Active
    }

    /// Opacity, fading linearly from 1 to 0 over the lifetime
    pub fn alpha(&self, now: f64) -> f32 {
        if self.lifetime_ms <= 0.0 {
            return 0.0;
        }
        let progress = (self.age(now) / self.lifetime_ms).clamp(0.0, 1.0);
        (1.0 - progress) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: Vec2 = Vec2::new(800.0, 450.0);
    const SURFACE: f32 = 67.5;

    fn enemy(x: f32, y: f32, vx: f32, vy: f32) -> Enemy {
        Enemy::new(1, Vec2::new(x, y), Vec2::new(vx, vy), Vec2::new(100.0, 45.0))
    }

    #[test]
    fn test_enemy_bounces_off_surface() {
        let mut e = enemy(100.0, 68.0, 3.0, -2.0);
        e.update(WORLD, SURFACE);
        assert_eq!(e.body.pos.y, SURFACE);
        assert_eq!(e.body.vel.y, 2.0);
        assert_eq!(e.body.pos.x, 103.0);
    }

    #[test]
    fn test_enemy_bounces_off_floor() {
        let mut e = enemy(100.0, 404.0, -3.0, 2.0);
        e.update(WORLD, SURFACE);
        assert_eq!(e.body.pos.y, 450.0 - 45.0);
        assert_eq!(e.body.vel.y, -2.0);
        assert!(!e.body.inverted);
    }

    #[test]
    fn test_enemy_offscreen_after_margin() {
        // Spawned off the left edge heading right: still on its way in
        let mut e = enemy(-110.0, 200.0, 5.0, 0.0);
        e.update(WORLD, SURFACE);
        assert!(!e.offscreen);

        let mut e = enemy(849.0, 200.0, 2.0, 0.0);
        e.update(WORLD, SURFACE);
        assert!(e.offscreen);

        let mut e = enemy(-148.0, 200.0, -3.0, 0.0);
        e.update(WORLD, SURFACE);
        assert!(e.offscreen);
    }

    #[test]
    fn test_collectable_expires_not_collected() {
        let mut c = Collectable::new(
            1,
            ItemKind::Good { variant: 0 },
            Vec2::new(10.0, 300.0),
            Vec2::splat(42.0),
            0.0,
            5000.0,
        );
        c.update(4999.0);
        assert_eq!(c.state, ItemState::Active);
        c.update(5001.0);
        assert_eq!(c.state, ItemState::Expired);
        assert!(c.is_done());
    }

    #[test]
    fn test_collectable_fades_linearly() {
        let c = Collectable::new(
            1,
            ItemKind::Bad { variant: 2 },
            Vec2::ZERO,
            Vec2::splat(42.0),
            1000.0,
            4000.0,
        );
        assert_eq!(c.alpha(1000.0), 1.0);
        assert!((c.alpha(3000.0) - 0.5).abs() < 1e-6);
        assert_eq!(c.alpha(9000.0), 0.0);
        assert!(c.is_bad());
        assert_eq!(c.kind.variant(), 2);
    }
}
