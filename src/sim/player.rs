//! The diver
//!
//! Movement is impulse-based: a direction key adds its acceleration only on
//! the tick it goes down, so the player swims in strokes instead of
//! thrusting. Buoyancy and drag act every tick.
//!
//! Breath drains underwater and refills at the surface. Damage takes breath
//! directly and opens an invulnerability window; while that window is open
//! the surface does not refill.

use glam::Vec2;

use super::entity::Body;
use crate::config::GameConfig;
use crate::consts::BLINK_SPEED;
use crate::input::{Direction, EdgeDetector, InputSource};

/// Portrait shown next to the score, picked from remaining breath
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Normal,
    /// Below half
    Low,
    /// Below a quarter
    Lower,
    /// Nearly out of air
    Faint,
}

/// Per-millisecond rate that moves `amount` over `duration_ms`
fn rate_per_ms(amount: f32, duration_ms: f64) -> f32 {
    if duration_ms > 0.0 {
        amount / duration_ms as f32
    } else {
        0.0
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,

    // Physics (px/s², 1/s)
    acceleration: Vec2,
    drag: f32,
    buoyancy: f32,
    edges: EdgeDetector,
    last_update: Option<f64>,

    // Breath
    pub breath: f32,
    pub max_breath: f32,
    decay_per_ms: f32,
    refill_per_ms: f32,

    // Damage gate
    last_damage_at: Option<f64>,
    default_invul_ms: f64,
    /// Window opened by the most recent hit (hits may shorten it)
    active_invul_ms: f64,

    // Visual-only flash
    flash_at: Option<f64>,
    flash_ms: f64,
}

impl Player {
    /// Fresh diver at the configured start position with full breath
    pub fn new(config: &GameConfig) -> Self {
        let p = &config.player;
        let start = Vec2::new(
            config.world_width * p.start_x_ratio,
            config.world_height * p.start_y_ratio,
        );

        Self {
            body: Body::new(start, Vec2::ZERO, config.player_size),
            acceleration: Vec2::new(p.acceleration_x, p.acceleration_y),
            drag: p.drag,
            buoyancy: p.buoyancy,
            edges: EdgeDetector::new(),
            last_update: None,
            breath: p.max_breath,
            max_breath: p.max_breath,
            decay_per_ms: rate_per_ms(p.max_breath, p.breath_decay_ms),
            refill_per_ms: rate_per_ms(p.max_breath, p.breath_refill_ms),
            last_damage_at: None,
            default_invul_ms: p.damage_invul_ms,
            active_invul_ms: p.damage_invul_ms,
            flash_at: None,
            flash_ms: 0.0,
        }
    }

    /// Integrate movement and breath up to `now` (ms)
    pub fn update(&mut self, input: &dyn InputSource, world: Vec2, surface_y: f32, now: f64) {
        let dt_ms = self.last_update.map_or(0.0, |last| (now - last).max(0.0));
        self.last_update = Some(now);
        let dt = (dt_ms / 1000.0) as f32;

        self.integrate(input, world, dt);
        self.update_breath(surface_y, dt_ms, now);
    }

    fn integrate(&mut self, input: &dyn InputSource, world: Vec2, dt: f32) {
        let pressed = self.edges.update(input);

        let mut accel = Vec2::ZERO;
        if pressed.contains(Direction::Up) {
            accel.y -= self.acceleration.y;
        }
        if pressed.contains(Direction::Down) {
            accel.y += self.acceleration.y;
        }
        if pressed.contains(Direction::Left) {
            accel.x -= self.acceleration.x;
        }
        if pressed.contains(Direction::Right) {
            accel.x += self.acceleration.x;
        }
        // Buoyancy pulls up (negative Y)
        accel.y -= self.buoyancy;

        let body = &mut self.body;
        body.vel += accel * dt;
        body.vel *= (1.0 - self.drag * dt).max(0.0);

        let next = body.pos + body.vel * dt;
        let limit = world - body.size;

        if next.x >= 0.0 && next.x <= limit.x {
            body.pos.x = next.x;
        } else {
            body.pos.x = next.x.min(limit.x).max(0.0);
            body.vel.x = 0.0;
        }
        if next.y >= 0.0 && next.y <= limit.y {
            body.pos.y = next.y;
        } else {
            body.pos.y = next.y.min(limit.y).max(0.0);
            body.vel.y = 0.0;
        }

        body.update_facing();
    }

    fn update_breath(&mut self, surface_y: f32, dt_ms: f64, now: f64) {
        let dt_ms = dt_ms as f32;
        if self.body.pos.y <= surface_y && !self.is_invulnerable(now) {
            self.breath += dt_ms * self.refill_per_ms;
        } else {
            self.breath -= dt_ms * self.decay_per_ms;
        }
        self.breath = self.breath.clamp(0.0, self.max_breath);
    }

    /// Keep the diver under the surface line and kill any upward drift there
    pub fn clamp_to_surface(&mut self, surface_y: f32) {
        let body = &mut self.body;
        if body.pos.y < surface_y {
            body.pos.y = surface_y;
            if body.vel.y < 0.0 {
                body.vel.y = 0.0;
            }
        }
    }

    pub fn is_invulnerable(&self, now: f64) -> bool {
        self.last_damage_at
            .is_some_and(|hit| now - hit < self.active_invul_ms)
    }

    /// Take `amount` breath unless still invulnerable from a previous hit
    ///
    /// Returns false (and changes nothing) while invulnerable. A successful
    /// hit opens a window of `invul_ms`, or the default window if `None`.
    pub fn take_damage(&mut self, amount: f32, invul_ms: Option<f64>, now: f64) -> bool {
        if self.is_invulnerable(now) {
            return false;
        }

        self.last_damage_at = Some(now);
        self.active_invul_ms = invul_ms.unwrap_or(self.default_invul_ms);
        self.breath = (self.breath - amount).max(0.0);
        true
    }

    /// Request a hit flash without touching the damage gate
    pub fn flash(&mut self, duration_ms: Option<f64>, now: f64) {
        self.flash_at = Some(now);
        self.flash_ms = duration_ms.unwrap_or(self.default_invul_ms);
    }

    pub fn is_flashing(&self, now: f64) -> bool {
        self.flash_at.is_some_and(|at| now - at < self.flash_ms)
    }

    /// Whether the red hit overlay is lit this frame
    pub fn blink_on(&self, now: f64) -> bool {
        let since = if self.is_invulnerable(now) {
            self.last_damage_at.map(|hit| now - hit)
        } else if self.is_flashing(now) {
            self.flash_at.map(|at| now - at)
        } else {
            None
        };

        since.is_some_and(|t| (t * BLINK_SPEED * std::f64::consts::PI).sin() > 0.0)
    }

    pub fn is_out_of_breath(&self) -> bool {
        self.breath <= 0.0
    }

    pub fn breath_fraction(&self) -> f32 {
        if self.max_breath > 0.0 {
            self.breath / self.max_breath
        } else {
            1.0
        }
    }

    pub fn mood(&self) -> Mood {
        let pct = self.breath_fraction();
        if pct < 0.02 {
            Mood::Faint
        } else if pct < 0.25 {
            Mood::Lower
        } else if pct < 0.5 {
            Mood::Low
        } else {
            Mood::Normal
        }
    }
}
