//! Axis-aligned box overlap with compenetration
//!
//! Sprites have transparent margins, so raw bounds feel unfair. Each box can
//! be shrunk about its center before testing, which lets objects sink a little
//! into each other before a hit registers.

use glam::Vec2;

/// An axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Shrink symmetrically about the center, keeping `1 - c` of each side
    pub fn shrunk(&self, compenetration: f32) -> Self {
        let (min, max) = self.shrunk_extents(compenetration);
        Self {
            min,
            size: max - min,
        }
    }

    /// Corners of the shrunk box, computed from the center so both move monotonically
    fn shrunk_extents(&self, compenetration: f32) -> (Vec2, Vec2) {
        let keep = 1.0 - compenetration.clamp(0.0, 1.0);
        let center = self.center();
        let half = self.size * 0.5 * keep;
        (center - half, center + half)
    }

    fn is_degenerate(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }
}

/// Check whether two boxes overlap after shrinking both by `compenetration`
///
/// Touching edges count as overlap. Degenerate boxes never overlap.
pub fn overlaps(a: Aabb, b: Aabb, compenetration: f32) -> bool {
    if a.is_degenerate() || b.is_degenerate() || compenetration >= 1.0 {
        return false;
    }

    let (a_min, a_max) = a.shrunk_extents(compenetration);
    let (b_min, b_max) = b.shrunk_extents(compenetration);
    !(a_max.y < b_min.y || a_min.y > b_max.y || a_max.x < b_min.x || a_min.x > b_max.x)
}
