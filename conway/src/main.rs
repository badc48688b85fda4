// main.rs - Conway's Game of Life sandbox
// Window front end over conway_core, plus a headless mode on the same loop

use clap::{Parser, ValueEnum};
use conway_core::runner::{self, FixedRate, Outcome, Unpaced};
use conway_core::{Action, InputAdapter, LifeError, Palette, Scene, SessionConfig, SessionState};
use eframe::egui;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, EnvFilter};

mod ui;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SeedArg {
    Empty,
    RPentomino,
    Screensaver,
    Random,
}

#[derive(Parser, Debug)]
#[command(about = "Conway's Game of Life: edit, place patterns, run until it settles")]
struct Args {
    /// grid width in cells
    #[arg(long, default_value_t = 50)]
    cols: usize,

    /// grid height in cells
    #[arg(long, default_value_t = 50)]
    rows: usize,

    /// size the grid to fill this many pixels across (needs --fit-height)
    #[arg(long, requires = "fit_height")]
    fit_width: Option<u32>,

    /// size the grid to fill this many pixels down (needs --fit-width)
    #[arg(long, requires = "fit_width")]
    fit_height: Option<u32>,

    /// pixels per cell
    #[arg(long, default_value_t = 15)]
    cell_size: u32,

    /// simulation ticks per second
    #[arg(long, default_value_t = 5)]
    fps: u32,

    /// starting scene
    #[arg(long, value_enum, default_value_t = SeedArg::RPentomino)]
    seed: SeedArg,

    /// fill probability for the random scene
    #[arg(long, default_value_t = 0.33)]
    density: f64,

    /// seed for the random scene
    #[arg(long, default_value_t = 0xC0FFEE)]
    rng_seed: u64,

    /// start simulating after this many seconds unless there is input first
    #[arg(long)]
    autostart_secs: Option<f64>,

    /// file used by the save/load controls
    #[arg(long, default_value = "pattern.json")]
    file: PathBuf,

    /// run without a window and print the result
    #[arg(long)]
    headless: bool,

    /// headless: stop after this many ticks
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// headless: do not pace ticks to --fps
    #[arg(long)]
    fast: bool,
}

impl Args {
    fn session_config(&self) -> Result<SessionConfig, LifeError> {
        let scene = match self.seed {
            SeedArg::Empty => Scene::Empty,
            SeedArg::RPentomino => Scene::RPentomino,
            SeedArg::Screensaver => Scene::Screensaver,
            SeedArg::Random => Scene::Random { density: self.density, seed: self.rng_seed },
        };
        let autostart = self
            .autostart_secs
            .map(|secs| {
                Duration::try_from_secs_f64(secs)
                    .map_err(|_| LifeError::InvalidConfig(format!("bad autostart delay {secs}")))
            })
            .transpose()?;
        let config = match (self.fit_width, self.fit_height) {
            (Some(width), Some(height)) => SessionConfig {
                scene,
                autostart,
                ..SessionConfig::for_surface(width, height, self.cell_size, self.fps)?
            },
            _ => SessionConfig {
                rows: self.rows,
                cols: self.cols,
                cell_size: self.cell_size,
                tick_rate: self.fps,
                scene,
                autostart,
            },
        };
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), eframe::Error> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("conway=info,conway_core=info")),
        )
        .init();

    let args = Args::parse();
    let state = match args.session_config().and_then(SessionState::new) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("conway: {e}");
            std::process::exit(2);
        }
    };

    if args.headless {
        run_headless(state, &args);
        return Ok(());
    }

    let (rows, cols) = (state.config().rows, state.config().cols);
    let cell = args.cell_size as f32 + ui::SPACING;
    let width = cols as f32 * cell + ui::LIBRARY_WIDTH + 40.0;
    let height = rows as f32 * cell + 160.0;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width.max(640.0), height.max(480.0)]),
        ..Default::default()
    };

    let file = args.file.clone();
    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(LifeApp::new(state, file))),
    )
}

/// Window state around the session: pacing, the pending input and the
/// palette used to draw.
pub struct LifeApp {
    pub state: SessionState,
    pub input: ui::EguiInput,
    pub palette: Palette,
    pub file: String,
    pub last_tick: Instant,
    pub tick_interval: Duration,
}

impl LifeApp {
    fn new(state: SessionState, file: PathBuf) -> Self {
        let tick_interval = state.config().tick_interval();
        Self {
            state,
            input: ui::EguiInput::default(),
            palette: Palette::default(),
            file: file.display().to_string(),
            last_tick: Instant::now(),
            tick_interval,
        }
    }
}

/// Starts the run on the first frame, then acknowledges every frame so the
/// loop ends as soon as a verdict is reached.
struct AutoPilot {
    started: bool,
}

impl InputAdapter for AutoPilot {
    fn poll(&mut self, out: &mut Vec<Action>) -> bool {
        if !self.started {
            self.started = true;
            out.push(Action::Start);
        } else {
            out.push(Action::Acknowledge);
        }
        true
    }
}

fn run_headless(mut state: SessionState, args: &Args) {
    let mut input = AutoPilot { started: false };
    let max = Some(args.max_ticks);
    let interval = state.config().tick_interval();
    let outcome = if args.fast {
        runner::run(&mut state, &mut input, &mut Unpaced(interval), max)
    } else {
        runner::run(&mut state, &mut input, &mut FixedRate::new(interval), max)
    };

    match outcome {
        Outcome::Exited { termination: Some(t) } | Outcome::InputClosed { termination: Some(t) } => {
            println!("{}", t.report());
        }
        Outcome::Exited { termination: None } | Outcome::InputClosed { termination: None } => {
            println!("Simulation stopped at generation {}.", state.generation());
        }
        Outcome::FrameLimit => {
            println!(
                "No stable or periodic state after {} generations ({} live cells).",
                state.generation(),
                state.grid().live_count()
            );
        }
    }
}
