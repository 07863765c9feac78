//! Cubey Runner - a side-scrolling obstacle dodger for a 72x40 handheld
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level assembly)
//! - `tuning`: Configuration presets for the runner and flappy variants
//! - `renderer`: Display seam and per-frame draw passes
//! - `platform`: Input and frame pacing seams
//! - `game`: Session driver tying the simulation to the collaborators

pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{FlappyTuning, Preset, RunnerTuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate. Physics never scales by elapsed time, so the
    /// pacer must hold this rate for the tuning values to mean anything.
    pub const TICK_HZ: u32 = 60;

    /// Display dimensions in pixels
    pub const SCREEN_WIDTH: i32 = 72;
    pub const SCREEN_HEIGHT: i32 = 40;

    /// Footprint of every obstacle and actor sprite
    pub const SPRITE_SIZE: f32 = 5.0;

    /// Horizontal width of one template cell
    pub const CELL_WIDTH: f32 = 5.0;
}

/// Truncate a physics coordinate to a device pixel (toward zero, like the
/// display driver does).
#[inline]
pub fn to_pixel(v: f32) -> i32 {
    v.trunc() as i32
}
