//! Platform abstraction layer
//!
//! The simulation only sees these seams:
//! - Input: "is held" button queries, sampled once per tick
//! - Time: a pacer that blocks until the next frame boundary
//!
//! Debouncing, edge detection and real hardware live behind them.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::sim::TickInput;

/// Held-button queries
pub trait InputSource {
    fn poll_jump_pressed(&mut self) -> bool;
    fn poll_up_pressed(&mut self) -> bool;
    fn poll_down_pressed(&mut self) -> bool;

    /// Sample every button once for the coming tick
    fn sample(&mut self) -> TickInput {
        TickInput {
            jump: self.poll_jump_pressed(),
            up: self.poll_up_pressed(),
            down: self.poll_down_pressed(),
            idle_mode: false,
        }
    }
}

/// Holds the tick rate. The simulation is fixed-step, so this is the only
/// thing tying game speed to wall-clock time.
pub trait FramePacer {
    fn wait_next_frame(&mut self);
}

/// Sleeps to hold a fixed rate, carrying any overshoot into the next frame
pub struct FixedRatePacer {
    frame: Duration,
    next: Option<Instant>,
}

impl FixedRatePacer {
    pub fn new(tick_hz: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / tick_hz.max(1),
            next: None,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }
}

impl FramePacer for FixedRatePacer {
    fn wait_next_frame(&mut self) {
        let now = Instant::now();
        let target = self.next.unwrap_or(now) + self.frame;
        if target > now {
            std::thread::sleep(target - now);
            self.next = Some(target);
        } else {
            // Fell behind; resync instead of bursting to catch up
            self.next = Some(now);
        }
    }
}

/// Never blocks (tests, fast-forward)
#[derive(Debug, Default)]
pub struct Unpaced {
    pub frames: u64,
}

impl FramePacer for Unpaced {
    fn wait_next_frame(&mut self) {
        self.frames += 1;
    }
}

/// Replays a fixed list of per-tick inputs, then reports nothing held
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<TickInput>,
    current: TickInput,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            current: TickInput::default(),
        }
    }

    /// Hold jump for `n` polls of the jump button
    pub fn press_jump_for(n: usize) -> Self {
        Self::new(std::iter::repeat_n(
            TickInput {
                jump: true,
                ..Default::default()
            },
            n,
        ))
    }
}

impl InputSource for ScriptedInput {
    fn poll_jump_pressed(&mut self) -> bool {
        // Jump is polled first each tick; advance the script here
        self.current = self.frames.pop_front().unwrap_or_default();
        self.current.jump
    }

    fn poll_up_pressed(&mut self) -> bool {
        self.current.up
    }

    fn poll_down_pressed(&mut self) -> bool {
        self.current.down
    }
}

/// Lets the simulation drive itself through its autopilot
#[derive(Debug, Default)]
pub struct AutopilotInput;

impl InputSource for AutopilotInput {
    /// Always pressed, so the start screen is passed straight away
    fn poll_jump_pressed(&mut self) -> bool {
        true
    }

    fn poll_up_pressed(&mut self) -> bool {
        false
    }

    fn poll_down_pressed(&mut self) -> bool {
        false
    }

    fn sample(&mut self) -> TickInput {
        TickInput {
            idle_mode: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_replays_in_order() {
        let mut input = ScriptedInput::new([
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput {
                up: true,
                down: true,
                ..Default::default()
            },
        ]);
        assert_eq!(
            input.sample(),
            TickInput {
                jump: true,
                ..Default::default()
            }
        );
        let second = input.sample();
        assert!(second.up && second.down && !second.jump);
        assert_eq!(input.sample(), TickInput::default());
    }

    #[test]
    fn test_autopilot_sets_idle_mode() {
        let sampled = AutopilotInput.sample();
        assert!(sampled.idle_mode);
        assert!(!sampled.jump, "the tick decides when to jump");
    }

    #[test]
    fn test_pacer_frame_length() {
        let pacer = FixedRatePacer::new(60);
        assert_eq!(pacer.frame_duration(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn test_pacer_holds_rate() {
        let mut pacer = FixedRatePacer::new(200);
        let start = Instant::now();
        for _ in 0..4 {
            pacer.wait_next_frame();
        }
        assert!(start.elapsed() >= Duration::from_millis(19));
    }
}
