//! Cubey Runner entry point
//!
//! Headless demo: runs the chosen variant on the autopilot against the
//! character display, paced at the tuning's tick rate, and prints the last
//! frame.
//!
//! Usage: `cubey-runner [runner|flappy] [tuning.json] [ticks]`

use cubey_runner::game::{RunSummary, Session};
use cubey_runner::platform::{AutopilotInput, FixedRatePacer};
use cubey_runner::renderer::AsciiDisplay;
use cubey_runner::sim::{FlappyState, RUNNER_TEMPLATE, RunnerState};
use cubey_runner::{FlappyTuning, Preset, RunnerTuning, TuningError};

/// Ten seconds at the default rate
const DEFAULT_DEMO_TICKS: u64 = 600;

fn main() {
    env_logger::init();
    log::info!("Cubey Runner (headless) starting...");

    let mut args = std::env::args().skip(1);
    let preset = match args.next() {
        Some(name) => Preset::from_str(&name).unwrap_or_else(|| {
            log::warn!("Unknown preset {:?}, using Runner", name);
            Preset::Runner
        }),
        None => Preset::default(),
    };
    let tuning_path = args.next();
    let ticks = args
        .next()
        .and_then(|t| t.parse().ok())
        .unwrap_or(DEFAULT_DEMO_TICKS);

    match run(preset, tuning_path.as_deref(), ticks) {
        Ok((summary, frame)) => {
            println!("{frame}");
            println!(
                "{}: {} ticks, {} deaths, ended {:?}",
                preset.as_str(),
                summary.ticks,
                summary.deaths,
                summary.phase
            );
        }
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}

fn run(
    preset: Preset,
    tuning_path: Option<&str>,
    ticks: u64,
) -> Result<(RunSummary, String), TuningError> {
    let summary;
    let mut session;
    match preset {
        Preset::Runner => {
            let tuning = match tuning_path {
                Some(path) => RunnerTuning::load(path)?,
                None => RunnerTuning::default(),
            };
            session = Session::new(
                AutopilotInput,
                AsciiDisplay::new(),
                FixedRatePacer::new(tuning.tick_hz),
            );
            let mut state = RunnerState::new(tuning, RUNNER_TEMPLATE)?;
            session.wait_for_start(None);
            summary = session.run(&mut state, Some(ticks));
        }
        Preset::Flappy => {
            let tuning = match tuning_path {
                Some(path) => FlappyTuning::load(path)?,
                None => FlappyTuning::default(),
            };
            session = Session::new(
                AutopilotInput,
                AsciiDisplay::new(),
                FixedRatePacer::new(tuning.tick_hz),
            );
            let mut state = FlappyState::new(tuning)?;
            session.wait_for_start(None);
            summary = session.run(&mut state, Some(ticks));
        }
    }
    Ok((summary, session.display.last_frame))
}
