//! Display seam and per-frame draw passes
//!
//! The simulation never draws. After a tick is fully resolved the session
//! calls one of the draw passes here, which clear the surface, stamp one
//! sprite per obstacle plus one for the actor at truncated pixel
//! coordinates, and present.

pub mod ascii;

pub use ascii::AsciiDisplay;

use crate::sim::{FlappyState, RunnerState, SpriteId};
use crate::to_pixel;

/// 1-bit display colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
}

/// A fixed-size 1-bit display surface
pub trait Display {
    fn clear(&mut self, color: Color);
    fn draw_sprite(&mut self, sprite: SpriteId, x: i32, y: i32);
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color);
    fn present(&mut self);
    fn show_start_screen(&mut self);
    fn show_game_over_banner(&mut self);
}

/// Draw one runner frame
pub fn draw_runner(display: &mut dyn Display, state: &RunnerState) {
    display.clear(Color::White);
    for obstacle in state.level.iter() {
        display.draw_sprite(
            obstacle.sprite(),
            to_pixel(obstacle.pos.x),
            to_pixel(obstacle.pos.y),
        );
    }
    display.draw_sprite(
        SpriteId::Actor,
        to_pixel(state.actor.pos.x),
        to_pixel(state.actor.pos.y),
    );
    display.present();
}

/// Draw one flappy frame. Columns vary in height, so they are filled
/// rectangles rather than sprites.
pub fn draw_flappy(display: &mut dyn Display, state: &FlappyState) {
    display.clear(Color::Black);
    display.draw_sprite(
        SpriteId::Actor,
        to_pixel(state.actor.pos.x),
        to_pixel(state.actor.pos.y),
    );
    for column in &state.columns {
        display.fill_rect(
            to_pixel(column.x),
            to_pixel(column.y),
            to_pixel(column.w),
            to_pixel(column.h),
            Color::White,
        );
    }
    display.present();
}
