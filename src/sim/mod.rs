//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call is one tick, no delta time)
//! - Seeded RNG only
//! - Stable iteration order (template order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod actor;
pub mod flappy;
pub mod level;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use aabb::{Aabb, intersects};
pub use actor::Actor;
pub use flappy::{FlappyState, generate_columns, tick_flappy};
pub use level::{
    EMPTY_TEMPLATE, Level, LevelLayout, LevelTemplate, RUNNER_TEMPLATE, TemplateError, TemplateRow,
    build_level,
};
pub use obstacle::{DEFAULT_OBSTACLE_Y, KindProfile, Obstacle, ObstacleKind, SpriteId, SubBox};
pub use state::{GameEvent, GamePhase, RunnerState};
pub use tick::{TickInput, autopilot_wants_jump, tick};
