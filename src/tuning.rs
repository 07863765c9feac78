//! Game tuning presets
//!
//! Every physics and layout constant lives in an immutable tuning struct
//! handed to the simulation at construction. The two variants ship with
//! their own presets; a JSON file can override any subset of fields.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TICK_HZ;

/// Errors from loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Which game variant to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Gravity, jumping, support and lethal boxes, auto-reset on death
    #[default]
    Runner,
    /// Up/down steering between columns, any contact ends the run
    Flappy,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Runner => "Runner",
            Preset::Flappy => "Flappy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "runner" | "run" => Some(Preset::Runner),
            "flappy" | "flap" => Some(Preset::Flappy),
            _ => None,
        }
    }
}

/// Runner variant constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerTuning {
    // === Physics ===
    /// Added to vertical velocity every tick (px/tick²)
    pub gravity: f32,
    /// Instantaneous velocity change on jump (negative is up)
    pub jump_impulse: f32,
    /// Leftward obstacle speed (px/tick)
    pub scroll_speed: f32,

    // === Field ===
    /// Obstacles left of this x wrap around
    pub wrap_threshold: f32,
    /// Distance a wrapped obstacle jumps to the right
    pub wrap_distance: f32,
    pub floor_y: f32,
    /// Gap kept between the floor and a resting actor
    pub floor_epsilon: f32,
    pub spawn: Vec2,

    // === Flow ===
    /// Rebuild and respawn in the same tick as a death
    pub auto_reset: bool,
    /// Frame pacing rate; physics assumes exactly this many ticks per second
    pub tick_hz: u32,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            gravity: 0.05,
            jump_impulse: -1.23,
            scroll_speed: 0.5,

            wrap_threshold: -20.0,
            wrap_distance: 250.0,
            floor_y: 35.0,
            floor_epsilon: 1.0,
            spawn: Vec2::new(5.0, 5.0),

            auto_reset: true,
            tick_hz: TICK_HZ,
        }
    }
}

impl RunnerTuning {
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = read_file(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded runner tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let floats = [
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("scroll_speed", self.scroll_speed),
            ("wrap_threshold", self.wrap_threshold),
            ("wrap_distance", self.wrap_distance),
            ("floor_y", self.floor_y),
            ("floor_epsilon", self.floor_epsilon),
            ("spawn.x", self.spawn.x),
            ("spawn.y", self.spawn.y),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(TuningError::Invalid(format!("{name} is not finite")));
            }
        }
        if self.jump_impulse >= 0.0 {
            return Err(TuningError::Invalid("jump_impulse must be negative".into()));
        }
        if self.scroll_speed < 0.0 {
            return Err(TuningError::Invalid("scroll_speed must not be negative".into()));
        }
        if self.wrap_distance <= 0.0 {
            return Err(TuningError::Invalid("wrap_distance must be positive".into()));
        }
        if self.floor_epsilon < 0.0 {
            return Err(TuningError::Invalid("floor_epsilon must not be negative".into()));
        }
        check_tick_hz(self.tick_hz)
    }
}

/// Flappy variant constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlappyTuning {
    pub spawn: Vec2,
    /// Pixels moved per step while a direction is held
    pub step: f32,
    /// The actor moves only on ticks divisible by this
    pub move_every: u32,
    pub min_y: f32,
    pub max_y: f32,

    // === Columns ===
    /// Number of top/bottom column pairs
    pub column_pairs: u32,
    pub column_start_x: f32,
    pub column_spacing: f32,
    pub column_width: f32,
    /// Inclusive range for the top column height
    pub top_height: (u32, u32),
    /// Inclusive range for the opening between top and bottom columns
    pub gap: (u32, u32),
    pub bottom_height: f32,
    /// Columns scroll only on ticks divisible by this
    pub scroll_every: u32,
    pub scroll_step: f32,
    /// Columns left of this x respawn at `respawn_x`
    pub wrap_below: f32,
    pub respawn_x: f32,
    /// Seed for column heights and gaps
    pub seed: u64,

    // === Flow ===
    pub auto_reset: bool,
    pub tick_hz: u32,
}

impl Default for FlappyTuning {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(5.0, 5.0),
            step: 1.0,
            move_every: 2,
            min_y: 0.0,
            max_y: 34.0,

            column_pairs: 10,
            column_start_x: 80.0,
            column_spacing: 15.0,
            column_width: 5.0,
            top_height: (4, 20),
            gap: (8, 20),
            bottom_height: 40.0,
            scroll_every: 10,
            scroll_step: 1.0,
            wrap_below: -10.0,
            respawn_x: 80.0,
            seed: 0x5eed_cafe,

            auto_reset: false,
            tick_hz: TICK_HZ,
        }
    }
}

impl FlappyTuning {
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = read_file(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded flappy tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.move_every == 0 || self.scroll_every == 0 {
            return Err(TuningError::Invalid(
                "move_every and scroll_every must be at least 1".into(),
            ));
        }
        if self.min_y > self.max_y {
            return Err(TuningError::Invalid("min_y is above max_y".into()));
        }
        if self.top_height.0 > self.top_height.1 || self.gap.0 > self.gap.1 {
            return Err(TuningError::Invalid("empty height or gap range".into()));
        }
        if self.column_pairs == 0 {
            return Err(TuningError::Invalid("need at least one column pair".into()));
        }
        check_tick_hz(self.tick_hz)
    }
}

fn check_tick_hz(tick_hz: u32) -> Result<(), TuningError> {
    if tick_hz == 0 {
        return Err(TuningError::Invalid("tick_hz must be positive".into()));
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<String, TuningError> {
    std::fs::read_to_string(path).map_err(|source| TuningError::Io {
        path: path.display().to_string(),
        source,
    })
}
