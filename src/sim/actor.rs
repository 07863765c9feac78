//! The player-controlled body
//!
//! One constant gravity, one jump impulse, explicit Euler at one step per
//! tick. Nothing here reads elapsed time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::{Aabb, intersects};
use crate::consts::SPRITE_SIZE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick, positive is down
    pub vel_y: f32,
    pub alive: bool,
    /// Resting on the floor or on a block's support box
    pub standing: bool,
}

impl Actor {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            size: Vec2::splat(SPRITE_SIZE),
            vel_y: 0.0,
            alive: true,
            standing: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Apply `jump_impulse` if a jump is requested while standing.
    ///
    /// No air jumps and no buffering: a request while airborne is dropped.
    /// Returns true if the impulse was applied.
    pub fn check_input(&mut self, jump_requested: bool, jump_impulse: f32) -> bool {
        if jump_requested && self.standing {
            self.standing = false;
            self.vel_y += jump_impulse;
            return true;
        }
        false
    }

    /// One fixed step of gravity
    pub fn integrate(&mut self, gravity: f32) {
        self.vel_y += gravity;
        self.pos.y += self.vel_y;
    }

    /// Stop at the scene floor. Once `y` reaches `floor_y` the actor is
    /// parked at `floor_y - epsilon` with zero velocity.
    ///
    /// Returns true if the clamp fired.
    pub fn clamp_to_floor(&mut self, floor_y: f32, epsilon: f32) -> bool {
        if self.pos.y >= floor_y {
            self.pos.y = floor_y - epsilon;
            self.vel_y = 0.0;
            self.standing = true;
            return true;
        }
        false
    }

    /// Closed-interval test of the actor's own box against `other`
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        intersects(&self.bounds(), other)
    }

    /// Snap on top of a support box
    pub fn land_on(&mut self, support: &Aabb) {
        self.pos.y = support.y - self.size.y;
        self.vel_y = 0.0;
        self.standing = true;
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Back to the spawn point. `standing` is left as is; the next
    /// integration and collision pass recomputes it.
    pub fn reset(&mut self, spawn: Vec2) {
        self.alive = true;
        self.vel_y = 0.0;
        self.pos = spawn;
    }
}
