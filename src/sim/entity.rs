//! Shared physical record for every moving thing

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Position, velocity and footprint shared by the player, enemies and items
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner (px)
    pub pos: Vec2,
    /// Velocity (px/s for the player, px/tick for enemies)
    pub vel: Vec2,
    pub size: Vec2,
    /// Sprite mirrored to face right
    pub inverted: bool,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, size: Vec2) -> Self {
        let mut body = Self {
            pos,
            vel,
            size,
            inverted: false,
        };
        body.update_facing();
        body
    }

    /// Naive Euler step, one velocity unit per tick
    pub fn step(&mut self) {
        self.pos += self.vel;
        self.update_facing();
    }

    /// Face the direction of horizontal travel; keep the last facing when still
    pub fn update_facing(&mut self) {
        if self.vel.x > 0.0 {
            self.inverted = true;
        } else if self.vel.x < 0.0 {
            self.inverted = false;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}
