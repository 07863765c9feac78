//! Axis-aligned bounding boxes
//!
//! Coordinates are device pixels but stay fractional during integration;
//! they are only truncated when handed to the display.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box `{x, y, w, h}`.
///
/// An `empty` box never intersects anything, whatever its extent. Obstacles
/// use this to switch off a sub-box (a hazard has nothing to stand on).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(default)]
    pub empty: bool,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        debug_assert!(w >= 0.0 && h >= 0.0, "negative box extent {w}x{h}");
        Self {
            x,
            y,
            w,
            h,
            empty: false,
        }
    }

    /// A disabled box anchored at `(x, y)`
    pub fn empty_at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            w: 0.0,
            h: 0.0,
            empty: true,
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    /// Closed-interval overlap test: boxes that merely touch on an edge
    /// intersect.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        intersects(self, other)
    }
}

/// Returns true if `a` and `b` overlap on both axes, boundaries included.
///
/// Either box being empty short-circuits to false.
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    if a.empty || b.empty {
        return false;
    }
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());

    b_max.x >= a_min.x && b_min.x <= a_max.x && b_max.y >= a_min.y && b_min.y <= a_max.y
}
