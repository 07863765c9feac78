//! Scrolling obstacles and their hit regions
//!
//! An obstacle owns only its position and kind. The support (stand-on) and
//! lethal regions are derived on demand from a per-kind profile, so they
//! can never drift out of sync with the obstacle after a scroll or wrap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::SPRITE_SIZE;

/// Row used when an obstacle is placed without an explicit template row
/// (one pixel above the bottom sprite row of the display).
pub const DEFAULT_OBSTACLE_Y: f32 = 34.0;

/// Logical sprite ids handed to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Hazard,
    Block,
    Actor,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Spike: cannot be stood on, deadly at its tip
    Hazard,
    /// Solid block: ledge on top, squash zone underneath
    Block,
}

/// Offset of a sub-box from the obstacle origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubBox {
    pub dx: f32,
    pub dy: f32,
    pub w: f32,
    pub h: f32,
    /// Disabled sub-boxes derive to an empty [`Aabb`]
    pub solid: bool,
}

impl SubBox {
    const fn solid(dx: f32, dy: f32, w: f32, h: f32) -> Self {
        Self {
            dx,
            dy,
            w,
            h,
            solid: true,
        }
    }

    const fn disabled(dx: f32, dy: f32) -> Self {
        Self {
            dx,
            dy,
            w: 0.0,
            h: 0.0,
            solid: false,
        }
    }

    /// Place this sub-box relative to `origin`
    pub fn at(&self, origin: Vec2) -> Aabb {
        let x = origin.x + self.dx;
        let y = origin.y + self.dy;
        if self.solid {
            Aabb::new(x, y, self.w, self.h)
        } else {
            Aabb::empty_at(x, y)
        }
    }
}

/// Everything that varies by obstacle kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindProfile {
    pub support: SubBox,
    pub lethal: SubBox,
    pub sprite: SpriteId,
}

const HAZARD_PROFILE: KindProfile = KindProfile {
    support: SubBox::disabled(3.0, 0.0),
    // Narrower than the sprite so grazing the spike's flank is survivable
    lethal: SubBox::solid(1.0, 2.0, 1.0, 3.0),
    sprite: SpriteId::Hazard,
};

const BLOCK_PROFILE: KindProfile = KindProfile {
    support: SubBox::solid(1.0, 0.0, 3.0, 1.0),
    lethal: SubBox::solid(0.0, 2.0, 4.0, 3.0),
    sprite: SpriteId::Block,
};

impl ObstacleKind {
    /// Parse a level template token. `-` and anything unrecognized map to
    /// `None` (an empty cell).
    pub fn from_token(token: char) -> Option<Self> {
        match token {
            '^' => Some(ObstacleKind::Hazard),
            'X' => Some(ObstacleKind::Block),
            _ => None,
        }
    }

    pub fn token(&self) -> char {
        match self {
            ObstacleKind::Hazard => '^',
            ObstacleKind::Block => 'X',
        }
    }

    #[inline]
    pub fn profile(&self) -> &'static KindProfile {
        match self {
            ObstacleKind::Hazard => &HAZARD_PROFILE,
            ObstacleKind::Block => &BLOCK_PROFILE,
        }
    }
}

/// A positioned hazard or platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// Obstacle on the default near-floor row
    pub fn new(x: f32, kind: ObstacleKind) -> Self {
        Self::at(x, DEFAULT_OBSTACLE_Y, kind)
    }

    /// Obstacle on an explicit row (templated placement)
    pub fn at(x: f32, y: f32, kind: ObstacleKind) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::splat(SPRITE_SIZE),
            kind,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Region the actor can stand on (empty for hazards)
    #[inline]
    pub fn support(&self) -> Aabb {
        self.kind.profile().support.at(self.pos)
    }

    /// Region that kills the actor on contact
    #[inline]
    pub fn lethal(&self) -> Aabb {
        self.kind.profile().lethal.at(self.pos)
    }

    #[inline]
    pub fn sprite(&self) -> SpriteId {
        self.kind.profile().sprite
    }

    /// Scroll left by `scroll_speed`. Once the obstacle is past
    /// `wrap_threshold` it jumps `wrap_distance` to the right so the
    /// template repeats. Returns true if it wrapped this call.
    pub fn update(&mut self, scroll_speed: f32, wrap_threshold: f32, wrap_distance: f32) -> bool {
        self.pos.x -= scroll_speed;
        if self.pos.x < wrap_threshold {
            self.pos.x += wrap_distance;
            return true;
        }
        false
    }
}
