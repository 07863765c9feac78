//! In-memory character display
//!
//! Stands in for the handheld's 72x40 screen in the headless binary and in
//! tests. One character per pixel; sprites are stamped as solid glyph
//! squares.

use super::{Color, Display};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, SPRITE_SIZE};
use crate::sim::SpriteId;

const GAME_OVER_TEXT: &str = "ded";

pub struct AsciiDisplay {
    width: i32,
    height: i32,
    pixels: Vec<char>,
    sprites_this_frame: usize,
    /// Frames handed to `present`
    pub frames_presented: u64,
    /// Sprites drawn in the most recently presented frame
    pub last_frame_sprites: usize,
    pub start_screens: u32,
    pub banners_shown: u32,
    /// Text of the most recently presented frame, one line per row
    pub last_frame: String,
}

impl Default for AsciiDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl AsciiDisplay {
    pub fn new() -> Self {
        Self::with_size(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pixels: vec![' '; (width.max(0) * height.max(0)) as usize],
            sprites_this_frame: 0,
            frames_presented: 0,
            last_frame_sprites: 0,
            start_screens: 0,
            banners_shown: 0,
            last_frame: String::new(),
        }
    }

    /// Character at `(x, y)`, `None` off screen
    pub fn pixel(&self, x: i32, y: i32) -> Option<char> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    fn fill(&mut self, x: i32, y: i32, w: i32, h: i32, glyph: char) {
        for py in y..y + h {
            for px in x..x + w {
                if let Some(i) = self.index(px, py) {
                    self.pixels[i] = glyph;
                }
            }
        }
    }

    fn write_text(&mut self, x: i32, y: i32, text: &str) {
        for (offset, ch) in text.chars().enumerate() {
            if let Some(i) = self.index(x + offset as i32, y) {
                self.pixels[i] = ch;
            }
        }
    }

    fn render(&self) -> String {
        let mut out = String::with_capacity(self.pixels.len() + self.height as usize);
        for row in self.pixels.chunks(self.width.max(1) as usize) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

fn color_glyph(color: Color) -> char {
    match color {
        Color::White => ' ',
        Color::Black => '.',
    }
}

fn sprite_glyph(sprite: SpriteId) -> char {
    match sprite {
        SpriteId::Hazard => '^',
        SpriteId::Block => '#',
        SpriteId::Actor => '@',
    }
}

impl Display for AsciiDisplay {
    fn clear(&mut self, color: Color) {
        self.pixels.fill(color_glyph(color));
        self.sprites_this_frame = 0;
    }

    fn draw_sprite(&mut self, sprite: SpriteId, x: i32, y: i32) {
        let size = SPRITE_SIZE as i32;
        self.fill(x, y, size, size, sprite_glyph(sprite));
        self.sprites_this_frame += 1;
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        self.fill(x, y, w, h, color_glyph(color));
    }

    fn present(&mut self) {
        self.last_frame = self.render();
        self.last_frame_sprites = self.sprites_this_frame;
        self.frames_presented += 1;
    }

    fn show_start_screen(&mut self) {
        self.clear(Color::White);
        self.write_text(20, self.height / 2, "press to start");
        self.present();
        self.start_screens += 1;
    }

    fn show_game_over_banner(&mut self) {
        self.clear(Color::Black);
        self.write_text(10, 10, GAME_OVER_TEXT);
        self.present();
        self.banners_shown += 1;
    }
}
