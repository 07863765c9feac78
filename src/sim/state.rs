//! Runner game state
//!
//! Owns the actor, the level and the tuning. Entities never point back at
//! the state; the tick inspects and mutates them as plain data.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::level::{Level, LevelLayout, LevelTemplate, RUNNER_TEMPLATE};
use crate::tuning::{RunnerTuning, TuningError};

/// Life-cycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Run ended; only an explicit reset leaves this phase
    Dead,
}

/// Things that happened during one tick, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    /// Became standing after being airborne
    Landed,
    /// Index (template order) of the obstacle or column that killed the actor
    Died { obstacle: usize },
    /// Level rebuilt and actor respawned
    LevelReset,
}

/// Complete runner state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerState {
    pub tuning: RunnerTuning,
    /// Layout the level is rebuilt from on every reset
    pub layout: LevelLayout,
    pub actor: Actor,
    pub level: Level,
    pub phase: GamePhase,
    /// Ticks since the state was created
    pub time_ticks: u64,
    /// Ticks since the last reset
    pub run_ticks: u64,
    pub deaths: u32,
}

impl RunnerState {
    /// Fresh state on `template`. Fails if `tuning` does not validate.
    pub fn new(tuning: RunnerTuning, template: LevelTemplate<'_>) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::assemble(tuning, LevelLayout::from(&template)))
    }

    /// Runner preset on the built-in level
    pub fn with_defaults() -> Self {
        Self::assemble(RunnerTuning::default(), LevelLayout::from(&RUNNER_TEMPLATE))
    }

    fn assemble(tuning: RunnerTuning, layout: LevelLayout) -> Self {
        let actor = Actor::new(tuning.spawn);
        let level = layout.build();
        log::info!(
            "Runner level ready: {} obstacles, spawn ({}, {})",
            level.len(),
            tuning.spawn.x,
            tuning.spawn.y
        );
        Self {
            tuning,
            layout,
            actor,
            level,
            phase: GamePhase::Playing,
            time_ticks: 0,
            run_ticks: 0,
            deaths: 0,
        }
    }

    /// Discard the level, rebuild it from the template and respawn the
    /// actor. Leaves the state in `Playing`.
    pub fn reset(&mut self) {
        self.level = self.layout.build();
        self.actor.reset(self.tuning.spawn);
        self.phase = GamePhase::Playing;
        self.run_ticks = 0;
        log::info!("Level reset (deaths so far: {})", self.deaths);
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::EMPTY_TEMPLATE;
    use crate::sim::obstacle::{Obstacle, ObstacleKind};
    use glam::Vec2;

    #[test]
    fn test_new_state_is_playing() {
        let state = RunnerState::with_defaults();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.actor.pos, Vec2::new(5.0, 5.0));
        assert!(state.actor.alive);
        assert_eq!(state.level.len(), 28);
    }

    #[test]
    fn test_reset_rebuilds_level() {
        let mut state = RunnerState::with_defaults();
        let pristine = state.level.clone();
        for o in &mut state.level.obstacles {
            o.pos.x -= 17.0;
        }
        state.level.obstacles.pop();
        state.actor.pos.y = 30.0;
        state.actor.kill();
        state.phase = GamePhase::Dead;
        state.run_ticks = 99;

        state.reset();
        assert_eq!(state.level, pristine);
        assert!(state.actor.alive);
        assert_eq!(state.actor.pos, state.tuning.spawn);
        assert!(state.is_playing());
        assert_eq!(state.run_ticks, 0);
    }

    #[test]
    fn test_state_snapshot_serializes() {
        let mut state =
            RunnerState::new(RunnerTuning::default(), EMPTY_TEMPLATE).expect("valid tuning");
        state
            .level
            .obstacles
            .push(Obstacle::at(20.0, 34.0, ObstacleKind::Hazard));

        let json = serde_json::to_string(&state).expect("serialize");
        let mut back: RunnerState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.actor, state.actor);
        assert_eq!(back.phase, state.phase);
        assert_eq!(back.level, state.level);

        // A restored state rebuilds its own layout, not the built-in one
        state.reset();
        back.reset();
        assert!(back.level.is_empty());
        assert_eq!(back.level, state.level);
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = RunnerTuning {
            jump_impulse: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            RunnerState::new(tuning, RUNNER_TEMPLATE),
            Err(TuningError::Invalid(_))
        ));
    }
}
