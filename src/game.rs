//! Session driver
//!
//! Owns the collaborators and runs the per-frame loop: sample input, tick,
//! draw, present, wait for the next frame. The loop ends on death (the
//! game-over banner is shown exactly once) or after an optional tick limit.

use crate::platform::{FramePacer, InputSource};
use crate::renderer::{Display, draw_flappy, draw_runner};
use crate::sim::{FlappyState, GameEvent, GamePhase, RunnerState, TickInput, tick, tick_flappy};

/// A game variant the session can drive
pub trait Simulation {
    fn name(&self) -> &'static str;
    fn step(&mut self, input: &TickInput) -> Vec<GameEvent>;
    fn draw(&self, display: &mut dyn Display);
    fn phase(&self) -> GamePhase;
    fn summary(&self) -> RunSummary;
}

impl Simulation for RunnerState {
    fn name(&self) -> &'static str {
        "runner"
    }

    fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        tick(self, input)
    }

    fn draw(&self, display: &mut dyn Display) {
        draw_runner(display, self);
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.time_ticks,
            run_ticks: self.run_ticks,
            deaths: self.deaths,
            phase: self.phase,
        }
    }
}

impl Simulation for FlappyState {
    fn name(&self) -> &'static str {
        "flappy"
    }

    fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        tick_flappy(self, input)
    }

    fn draw(&self, display: &mut dyn Display) {
        draw_flappy(display, self);
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.time_ticks,
            run_ticks: self.run_ticks,
            deaths: self.deaths,
            phase: self.phase,
        }
    }
}

/// Outcome of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks simulated in total
    pub ticks: u64,
    /// Ticks since the last reset
    pub run_ticks: u64,
    pub deaths: u32,
    pub phase: GamePhase,
}

pub struct Session<I, D, P> {
    pub input: I,
    pub display: D,
    pub pacer: P,
}

impl<I: InputSource, D: Display, P: FramePacer> Session<I, D, P> {
    pub fn new(input: I, display: D, pacer: P) -> Self {
        Self {
            input,
            display,
            pacer,
        }
    }

    /// Show the start screen and wait for a jump press edge.
    ///
    /// Returns false if `max_frames` elapsed first.
    pub fn wait_for_start(&mut self, max_frames: Option<u64>) -> bool {
        self.display.show_start_screen();
        let mut was_pressed = false;
        let mut frames = 0u64;
        loop {
            let pressed = self.input.poll_jump_pressed();
            if pressed && !was_pressed {
                log::info!("Start pressed after {} frames", frames);
                return true;
            }
            was_pressed = pressed;

            frames += 1;
            if max_frames.is_some_and(|max| frames >= max) {
                return false;
            }
            self.pacer.wait_next_frame();
        }
    }

    /// Run `sim` until it dies or `max_ticks` ticks have been simulated.
    ///
    /// A state that is already dead was shown its banner by the run that
    /// killed it; it is returned as is.
    pub fn run(&mut self, sim: &mut dyn Simulation, max_ticks: Option<u64>) -> RunSummary {
        if sim.phase() == GamePhase::Dead {
            log::debug!("Session skipped: {} is already dead", sim.name());
            return sim.summary();
        }
        log::info!("Session start: {}", sim.name());
        let mut ticks = 0u64;

        while sim.phase() == GamePhase::Playing {
            if max_ticks.is_some_and(|max| ticks >= max) {
                break;
            }
            let input = self.input.sample();
            let events = sim.step(&input);
            for event in &events {
                log_event(event);
            }
            sim.draw(&mut self.display);
            self.pacer.wait_next_frame();
            ticks += 1;
        }

        if sim.phase() == GamePhase::Dead {
            self.display.show_game_over_banner();
        }

        let summary = sim.summary();
        log::info!(
            "Session end: {} ticks, {} deaths, {:?}",
            summary.ticks,
            summary.deaths,
            summary.phase
        );
        summary
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Died { obstacle } => log::info!("Died on obstacle {}", obstacle),
        GameEvent::LevelReset => log::info!("Level reset"),
        other => log::debug!("{:?}", other),
    }
}
