//! Fixed timestep runner tick
//!
//! Per tick: input, gravity, floor, scroll, collisions, then death and
//! reset. There is no delta time; one call is one step.

use super::state::{GameEvent, GamePhase, RunnerState};

/// How far ahead of the actor's leading edge the autopilot looks for danger
const AUTOPILOT_LOOKAHEAD: f32 = 6.0;

/// Button state sampled once for a tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Runner: jump button held
    pub jump: bool,
    /// Flappy: steer up held
    pub up: bool,
    /// Flappy: steer down held
    pub down: bool,
    /// Demo mode - the tick computes its own input
    pub idle_mode: bool,
}

/// Advance the runner by one tick. Returns the events produced, in order.
///
/// A dead state is left untouched. With `auto_reset` the level is rebuilt
/// inside the same tick as the death, so the state never rests in `Dead`.
pub fn tick(state: &mut RunnerState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase == GamePhase::Dead {
        return events;
    }

    state.time_ticks += 1;
    state.run_ticks += 1;

    let jump = if input.idle_mode {
        autopilot_wants_jump(state)
    } else {
        input.jump
    };

    let tuning = &state.tuning;
    let actor = &mut state.actor;

    if actor.check_input(jump, tuning.jump_impulse) {
        events.push(GameEvent::Jumped);
    }
    let airborne = !actor.standing;

    actor.integrate(tuning.gravity);
    actor.clamp_to_floor(tuning.floor_y, tuning.floor_epsilon);

    for obstacle in &mut state.level.obstacles {
        obstacle.update(
            tuning.scroll_speed,
            tuning.wrap_threshold,
            tuning.wrap_distance,
        );
    }

    // Template order. Support hits snap and keep scanning; the first
    // lethal hit ends resolution. Both boxes of one obstacle are tested
    // against the same actor position, so lethal beats support.
    let mut killer = None;
    for (index, obstacle) in state.level.obstacles.iter().enumerate() {
        let support = obstacle.support();
        if actor.intersects(&obstacle.lethal()) {
            killer = Some(index);
            break;
        }
        if actor.intersects(&support) {
            actor.land_on(&support);
        }
    }

    if let Some(obstacle) = killer {
        actor.kill();
        state.phase = GamePhase::Dead;
        state.deaths += 1;
        events.push(GameEvent::Died { obstacle });
        log::debug!(
            "Actor died on obstacle {} after {} ticks",
            obstacle,
            state.run_ticks
        );

        if state.tuning.auto_reset {
            state.reset();
            events.push(GameEvent::LevelReset);
        }
        return events;
    }

    if airborne && actor.standing {
        events.push(GameEvent::Landed);
    }
    events
}

/// Demo input: jump when grounded and a lethal box is coming up in the
/// actor's lane.
pub fn autopilot_wants_jump(state: &RunnerState) -> bool {
    let actor = &state.actor;
    if !actor.standing {
        return false;
    }
    let body = actor.bounds();
    let front = body.x + body.w;

    state.level.iter().any(|obstacle| {
        let lethal = obstacle.lethal();
        let ahead = lethal.x >= front && lethal.x <= front + AUTOPILOT_LOOKAHEAD;
        let in_lane = lethal.y <= body.y + body.h && lethal.y + lethal.h >= body.y;
        ahead && in_lane
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{EMPTY_TEMPLATE, RUNNER_TEMPLATE, build_level};
    use crate::sim::obstacle::{Obstacle, ObstacleKind};
    use crate::tuning::RunnerTuning;
    use glam::Vec2;

    fn no_reset() -> RunnerTuning {
        RunnerTuning {
            auto_reset: false,
            ..Default::default()
        }
    }

    fn empty_state(tuning: RunnerTuning) -> RunnerState {
        RunnerState::new(tuning, EMPTY_TEMPLATE).expect("valid tuning")
    }

    #[test]
    fn test_settles_on_floor() {
        let mut state = empty_state(RunnerTuning::default());
        let input = TickInput::default();

        let mut landed_at = None;
        for n in 0..200 {
            let events = tick(&mut state, &input);
            if events.contains(&GameEvent::Landed) {
                landed_at = Some(n);
                break;
            }
        }
        assert!(landed_at.is_some(), "actor never reached the floor");
        assert_eq!(state.actor.pos.y, 34.0);
        assert_eq!(state.actor.vel_y, 0.0);
        assert!(state.actor.standing);

        for _ in 0..100 {
            let events = tick(&mut state, &input);
            assert!(events.is_empty());
            assert!(state.actor.alive);
            assert!(state.actor.standing);
            assert!(state.actor.pos.y < 35.0);
        }
        assert_eq!(state.deaths, 0);
    }

    #[test]
    fn test_gravity_without_floor_contact() {
        let mut state = empty_state(RunnerTuning::default());
        for _ in 0..3 {
            tick(&mut state, &TickInput::default());
        }
        assert!((state.actor.vel_y - 0.15).abs() < 1e-6);
        assert!((state.actor.pos.y - 5.3).abs() < 1e-5);
    }

    #[test]
    fn test_jump_then_land() {
        let mut state = empty_state(RunnerTuning::default());
        state.actor.pos = Vec2::new(5.0, 34.0);
        state.actor.standing = true;

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        let events = tick(&mut state, &jump);
        assert_eq!(events, vec![GameEvent::Jumped]);
        assert!((state.actor.vel_y - (-1.23 + 0.05)).abs() < 1e-6);

        // Holding jump mid-air does nothing until touchdown
        let mut ticks = 0;
        loop {
            let events = tick(&mut state, &jump);
            ticks += 1;
            assert!(!events.contains(&GameEvent::Jumped));
            if events.contains(&GameEvent::Landed) {
                break;
            }
            assert!(ticks < 200, "never landed");
        }
        assert_eq!(state.actor.pos.y, 34.0);
    }

    #[test]
    fn test_lethal_beats_support_on_same_obstacle() {
        let mut state = empty_state(no_reset());
        state.actor.pos = Vec2::new(5.0, 34.0);
        state.actor.standing = true;
        // After one scroll step: support [9,12]x[34,35], lethal [8,12]x[36,39]
        state
            .level
            .obstacles
            .push(Obstacle::at(8.5, 34.0, ObstacleKind::Block));

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::Died { obstacle: 0 }]);
        assert_eq!(state.phase, GamePhase::Dead);
        assert!(!state.actor.alive);
    }

    #[test]
    fn test_support_does_not_shield_later_lethal() {
        let mut state = empty_state(no_reset());
        state.actor.pos = Vec2::new(5.0, 28.0);
        state.level.obstacles.push(Obstacle::at(5.5, 33.0, ObstacleKind::Block));
        state.level.obstacles.push(Obstacle::at(8.5, 24.0, ObstacleKind::Hazard));

        let events = tick(&mut state, &TickInput::default());
        // Snapped onto the block first, then the spike tip got us
        assert_eq!(state.actor.pos.y, 28.0);
        assert_eq!(events, vec![GameEvent::Died { obstacle: 1 }]);
        assert_eq!(state.phase, GamePhase::Dead);
    }

    #[test]
    fn test_first_lethal_hit_wins() {
        let mut state = empty_state(no_reset());
        state.actor.pos = Vec2::new(5.0, 34.0);
        state.actor.standing = true;
        state.level.obstacles.push(Obstacle::at(7.5, 34.0, ObstacleKind::Hazard));
        state.level.obstacles.push(Obstacle::at(6.5, 34.0, ObstacleKind::Hazard));

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::Died { obstacle: 0 }]);
    }

    #[test]
    fn test_standing_on_block_is_stable() {
        let mut state = empty_state(RunnerTuning {
            scroll_speed: 0.0,
            ..Default::default()
        });
        state.actor.pos = Vec2::new(5.0, 14.0);
        state.level.obstacles.push(Obstacle::at(5.0, 19.0, ObstacleKind::Block));

        for _ in 0..50 {
            tick(&mut state, &TickInput::default());
            assert!(state.actor.alive);
            assert_eq!(state.actor.pos.y, 14.0);
            assert!(state.actor.standing);
        }
    }

    #[test]
    fn test_land_on_block_and_jump_off() {
        let mut state = empty_state(RunnerTuning {
            scroll_speed: 0.0,
            ..Default::default()
        });
        state.actor.pos = Vec2::new(5.0, 14.0);
        state.level.obstacles.push(Obstacle::at(5.0, 19.0, ObstacleKind::Block));

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::Landed]);
        assert_eq!(state.actor.pos.y, 14.0);
        assert!(tick(&mut state, &TickInput::default()).is_empty());

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &jump), vec![GameEvent::Jumped]);
        assert!(!state.actor.standing);

        let mut ticks = 0;
        loop {
            let events = tick(&mut state, &TickInput::default());
            ticks += 1;
            assert!(state.actor.alive);
            if events == vec![GameEvent::Landed] {
                break;
            }
            assert!(events.is_empty());
            assert!(ticks < 100, "never came back down");
        }
        assert_eq!(state.actor.pos.y, 14.0);
        assert_eq!(state.deaths, 0);
    }

    #[test]
    fn test_dead_state_does_not_advance() {
        let mut state = empty_state(no_reset());
        state.actor.pos = Vec2::new(5.0, 34.0);
        state.level.obstacles.push(Obstacle::at(6.5, 34.0, ObstacleKind::Hazard));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Dead);

        let before = state.time_ticks;
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, before);

        state.reset();
        assert!(state.is_playing());
        assert!(state.level.is_empty(), "rebuilt from the empty template");
    }

    #[test]
    fn test_auto_reset_in_same_tick() {
        let mut state = RunnerState::with_defaults();
        state.actor.pos = Vec2::new(5.0, 34.0);
        state.actor.standing = true;
        state.level.obstacles.push(Obstacle::at(6.5, 34.0, ObstacleKind::Hazard));
        let hazard = state.level.len() - 1;

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(
            events,
            vec![GameEvent::Died { obstacle: hazard }, GameEvent::LevelReset]
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.actor.alive);
        assert_eq!(state.actor.pos, Vec2::new(5.0, 5.0));
        assert_eq!(state.level, build_level(&RUNNER_TEMPLATE));
        assert_eq!(state.deaths, 1);
        assert_eq!(state.run_ticks, 0);
    }

    #[test]
    fn test_obstacles_wrap_during_play() {
        let mut state = RunnerState::with_defaults();
        let start_x = state.level.obstacles[0].pos.x;
        // 0.5 px/tick: after 2 ticks everything has moved exactly 1 px
        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.level.obstacles[0].pos.x, start_x - 1.0);
    }

    #[test]
    fn test_autopilot_jumps_over_spike() {
        let mut state = empty_state(RunnerTuning::default());
        state.actor.pos = Vec2::new(5.0, 34.0);
        state.actor.standing = true;
        state.level.obstacles.push(Obstacle::at(12.0, 34.0, ObstacleKind::Hazard));
        assert!(autopilot_wants_jump(&state));

        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let events = tick(&mut state, &idle);
        assert_eq!(events, vec![GameEvent::Jumped]);

        // Nothing in the lane: stay put
        let mut calm = empty_state(RunnerTuning::default());
        calm.actor.standing = true;
        assert!(!autopilot_wants_jump(&calm));
    }

    #[test]
    fn test_determinism() {
        let mut a = RunnerState::with_defaults();
        let mut b = RunnerState::with_defaults();
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for n in 0..2_000u32 {
            let input = if n % 97 == 0 {
                TickInput {
                    jump: true,
                    ..Default::default()
                }
            } else {
                idle.clone()
            };
            assert_eq!(tick(&mut a, &input), tick(&mut b, &input));
        }
        assert_eq!(a.actor, b.actor);
        assert_eq!(a.level, b.level);
        assert_eq!(a.deaths, b.deaths);
    }
}
