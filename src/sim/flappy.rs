//! Flappy variant
//!
//! No gravity and no standing: the actor is steered up and down directly,
//! every obstacle is a single box, and touching any of them ends the run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::actor::Actor;
use super::state::{GameEvent, GamePhase};
use super::tick::TickInput;
use crate::tuning::{FlappyTuning, TuningError};

/// Complete flappy state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlappyState {
    pub tuning: FlappyTuning,
    pub actor: Actor,
    /// Column boxes, stored as (top, bottom) pairs
    pub columns: Vec<Aabb>,
    pub phase: GamePhase,
    pub time_ticks: u64,
    pub run_ticks: u64,
    pub deaths: u32,
}

/// Build the column field. Same tuning (and seed) gives the same field.
///
/// Range bounds are taken in either order.
pub fn generate_columns(tuning: &FlappyTuning) -> Vec<Aabb> {
    let mut rng = Pcg32::seed_from_u64(tuning.seed);
    let mut columns = Vec::with_capacity(tuning.column_pairs as usize * 2);

    for i in 0..tuning.column_pairs {
        let top = rng.random_range(inclusive(tuning.top_height)) as f32;
        let gap = rng.random_range(inclusive(tuning.gap)) as f32;
        let x = tuning.column_start_x + i as f32 * tuning.column_spacing;

        columns.push(Aabb::new(x, 0.0, tuning.column_width, top));
        columns.push(Aabb::new(
            x,
            top + gap,
            tuning.column_width,
            tuning.bottom_height,
        ));
    }
    columns
}

fn inclusive((a, b): (u32, u32)) -> std::ops::RangeInclusive<u32> {
    a.min(b)..=a.max(b)
}

impl FlappyState {
    /// Fresh field. Fails if `tuning` does not validate.
    pub fn new(tuning: FlappyTuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::assemble(tuning))
    }

    pub fn with_defaults() -> Self {
        Self::assemble(FlappyTuning::default())
    }

    fn assemble(tuning: FlappyTuning) -> Self {
        let columns = generate_columns(&tuning);
        log::info!(
            "Flappy field ready: {} column pairs (seed {:#x})",
            columns.len() / 2,
            tuning.seed
        );
        Self {
            actor: Actor::new(tuning.spawn),
            columns,
            tuning,
            phase: GamePhase::Playing,
            time_ticks: 0,
            run_ticks: 0,
            deaths: 0,
        }
    }

    /// Regenerate the columns and respawn the actor
    pub fn reset(&mut self) {
        self.columns = generate_columns(&self.tuning);
        self.actor.reset(self.tuning.spawn);
        self.phase = GamePhase::Playing;
        self.run_ticks = 0;
        log::info!("Flappy field reset (deaths so far: {})", self.deaths);
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Top and bottom column of each pair
    pub fn pairs(&self) -> impl Iterator<Item = (&Aabb, &Aabb)> {
        self.columns.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }
}

/// Advance the flappy variant by one tick
pub fn tick_flappy(state: &mut FlappyState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase == GamePhase::Dead {
        return events;
    }

    state.time_ticks += 1;
    state.run_ticks += 1;
    let count = state.time_ticks;

    let (up, down) = if input.idle_mode {
        autopilot_steer(state)
    } else {
        (input.up, input.down)
    };

    let tuning = &state.tuning;
    let actor = &mut state.actor;

    // A zero cadence acts as 1
    if count % u64::from(tuning.move_every.max(1)) == 0 {
        if down {
            actor.pos.y += tuning.step;
        }
        if up {
            actor.pos.y -= tuning.step;
        }
    }
    actor.pos.y = actor.pos.y.clamp(tuning.min_y, tuning.max_y);

    if count % u64::from(tuning.scroll_every.max(1)) == 0 {
        for column in &mut state.columns {
            column.x -= tuning.scroll_step;
            if column.x < tuning.wrap_below {
                column.x = tuning.respawn_x;
            }
        }
    }

    let killer = state.columns.iter().position(|c| actor.intersects(c));
    if let Some(obstacle) = killer {
        actor.kill();
        state.phase = GamePhase::Dead;
        state.deaths += 1;
        events.push(GameEvent::Died { obstacle });
        log::debug!(
            "Flappy actor hit column {} after {} ticks",
            obstacle,
            state.run_ticks
        );

        if state.tuning.auto_reset {
            state.reset();
            events.push(GameEvent::LevelReset);
        }
    }
    events
}

/// Demo input: steer toward the middle of the nearest opening ahead.
/// Returns `(up, down)`.
pub fn autopilot_steer(state: &FlappyState) -> (bool, bool) {
    let body = state.actor.bounds();
    let center = body.y + body.h / 2.0;

    let target = state
        .pairs()
        .filter(|(top, _)| top.x + top.w >= body.x)
        .min_by(|(a, _), (b, _)| a.x.total_cmp(&b.x))
        .map(|(top, bottom)| (top.y + top.h + bottom.y) / 2.0);

    match target {
        Some(mid) if center < mid - 1.0 => (false, true),
        Some(mid) if center > mid + 1.0 => (true, false),
        _ => (false, false),
    }
}

/// Gap center of every pair, left to right (debug and tests)
pub fn gap_centers(state: &FlappyState) -> Vec<Vec2> {
    state
        .pairs()
        .map(|(top, bottom)| {
            Vec2::new(
                top.x + top.w / 2.0,
                (top.y + top.h + bottom.y) / 2.0,
            )
        })
        .collect()
}
