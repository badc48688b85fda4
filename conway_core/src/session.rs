// session.rs - Editor/simulation state machine threaded through each frame

use crate::config::SessionConfig;
use crate::detector::{Detector, Termination};
use crate::engine;
use crate::error::{LifeError, Result};
use crate::grid::Grid;
use crate::input::Action;
use crate::patterns::{Library, Pattern};
use crate::storage::{self, Loaded};
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub enum Mode {
    Editing,
    PlacingPattern {
        pattern: Pattern,
        anchor: Option<(usize, usize)>,
    },
    Simulating,
    /// Halted; waits for [`Action::Acknowledge`] or [`Action::Quit`].
    Terminated(Termination),
}

/// Whether the loop should keep going after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Clone, Debug)]
struct Countdown {
    remaining: Duration,
    cancelled: bool,
}

/// Everything a running session owns.
#[derive(Clone, Debug)]
pub struct SessionState {
    config: SessionConfig,
    grid: Grid,
    mode: Mode,
    generation: u64,
    detector: Detector,
    countdown: Option<Countdown>,
    /// Latest user-facing message from a file action.
    status: Option<String>,
}

impl SessionState {
    /// Validates `config`, builds the grid and lays down the starting scene.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let mut grid = Grid::new(config.rows, config.cols)?;
        config.scene.apply(&mut grid);
        let countdown = config.autostart.map(|remaining| Countdown { remaining, cancelled: false });
        tracing::info!(rows = config.rows, cols = config.cols, live = grid.live_count(), "session created");
        Ok(Self {
            config,
            grid,
            mode: Mode::Editing,
            generation: 0,
            detector: Detector::new(),
            countdown,
            status: None,
        })
    }

    pub fn config(&self) -> &SessionConfig { &self.config }
    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn mode(&self) -> &Mode { &self.mode }
    pub fn generation(&self) -> u64 { self.generation }
    pub fn stable_count(&self) -> u32 { self.detector.stable_count() }
    pub fn status(&self) -> Option<&str> { self.status.as_deref() }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing | Mode::PlacingPattern { .. })
    }

    /// `Start` is honoured only from plain editing, not mid-placement.
    pub fn can_start(&self) -> bool {
        self.mode == Mode::Editing
    }

    pub fn termination(&self) -> Option<&Termination> {
        match &self.mode {
            Mode::Terminated(t) => Some(t),
            _ => None,
        }
    }

    /// Time left before the automatic start, if one is still pending.
    pub fn countdown(&self) -> Option<Duration> {
        match &self.countdown {
            Some(c) if !c.cancelled && self.mode == Mode::Editing => Some(c.remaining),
            _ => None,
        }
    }

    /// One frame: apply the actions in order, run the countdown, then take at
    /// most one simulation step.
    pub fn tick<I>(&mut self, actions: I, elapsed: Duration) -> Flow
    where
        I: IntoIterator<Item = Action>,
    {
        for action in actions {
            if self.apply(action) == Flow::Exit {
                return Flow::Exit;
            }
        }

        if let Some(c) = self.countdown.as_mut() {
            if !c.cancelled && self.mode == Mode::Editing {
                c.remaining = c.remaining.saturating_sub(elapsed);
                if c.remaining.is_zero() {
                    c.cancelled = true;
                    tracing::info!("countdown elapsed");
                    self.start();
                }
            }
        }

        if self.mode == Mode::Simulating {
            self.advance();
        }
        Flow::Continue
    }

    /// Applies a single action to the current mode.
    pub fn apply(&mut self, action: Action) -> Flow {
        if let Some(c) = self.countdown.as_mut() {
            c.cancelled = true;
        }
        if action == Action::Quit {
            tracing::info!(generation = self.generation, "quit");
            return Flow::Exit;
        }

        let mode = std::mem::replace(&mut self.mode, Mode::Editing);
        self.mode = match (mode, action) {
            (Mode::Editing, Action::Toggle { row, col }) => {
                if let Err(e) = self.grid.toggle(row, col) {
                    tracing::debug!(%e, "toggle ignored");
                }
                Mode::Editing
            }
            (Mode::Editing, Action::Paint { row, col, alive }) => {
                if let Err(e) = self.grid.paint(row, col, alive) {
                    tracing::debug!(%e, "paint ignored");
                }
                Mode::Editing
            }
            (Mode::Editing, Action::Start) => {
                self.start();
                return Flow::Continue;
            }

            (Mode::PlacingPattern { pattern, .. }, Action::MoveCursor { row, col }) => {
                let anchor = (row < self.grid.rows() && col < self.grid.cols()).then_some((row, col));
                Mode::PlacingPattern { pattern, anchor }
            }
            (Mode::PlacingPattern { pattern, anchor: Some((row, col)) }, Action::ConfirmPlacement) => {
                let written = self.grid.stamp(&pattern, row, col);
                tracing::info!(pattern = pattern.name(), row, col, written, "pattern placed");
                Mode::Editing
            }
            (Mode::PlacingPattern { .. }, Action::CancelPlacement) => Mode::Editing,

            (Mode::Editing | Mode::PlacingPattern { .. }, Action::SelectPattern(name)) => {
                match Library.find(&name) {
                    Some(pattern) => Mode::PlacingPattern { pattern, anchor: None },
                    None => {
                        tracing::warn!(%name, "unknown pattern");
                        self.status = Some(format!("Unknown pattern: {name}"));
                        Mode::Editing
                    }
                }
            }
            (Mode::Editing | Mode::PlacingPattern { .. }, Action::Clear) => {
                self.grid.clear();
                Mode::Editing
            }
            (mode @ (Mode::Editing | Mode::PlacingPattern { .. }), Action::Save(path)) => {
                self.save(&path, false);
                mode
            }
            (mode @ (Mode::Editing | Mode::PlacingPattern { .. }), Action::SaveGrid(path)) => {
                self.save(&path, true);
                mode
            }
            (mode @ (Mode::Editing | Mode::PlacingPattern { .. }), Action::Load(path)) => self.load(&path, mode),

            (mode @ Mode::Terminated(_), Action::Acknowledge) => {
                tracing::info!("result acknowledged");
                self.mode = mode;
                return Flow::Exit;
            }

            (mode, action) => {
                tracing::debug!(?action, "action ignored in current mode");
                mode
            }
        };
        Flow::Continue
    }

    fn start(&mut self) {
        let promoted = self.grid.promote_unaged();
        self.generation = 0;
        self.detector.reset(&self.grid);
        self.mode = Mode::Simulating;
        tracing::info!(live = self.grid.live_count(), promoted, "simulation started");
    }

    fn advance(&mut self) {
        let next = engine::step(&self.grid);
        let verdict = self.detector.observe(&self.grid, &next, self.generation);
        self.grid = next;
        match verdict {
            Some(t) => {
                tracing::info!(generation = t.generation, reason = %t.reason, "simulation terminated");
                self.mode = Mode::Terminated(t);
            }
            None => self.generation += 1,
        }
    }

    fn save(&mut self, path: &Path, whole_grid: bool) {
        let result = if whole_grid {
            storage::save_grid(&self.grid, path)
        } else {
            let name = path.file_stem().and_then(|s| s.to_str());
            storage::save_pattern(&self.grid, path, name).map(|_| ())
        };
        self.status = Some(match result {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => self.report(e),
        });
    }

    fn load(&mut self, path: &Path, mode: Mode) -> Mode {
        match storage::load_any(path, self.grid.rows(), self.grid.cols()) {
            Ok(Loaded::Pattern(pattern)) => {
                self.status = Some(format!("Loaded {}; click to place", pattern.name()));
                Mode::PlacingPattern { pattern, anchor: None }
            }
            Ok(Loaded::Cells(cells)) => {
                self.grid.overwrite(cells);
                self.status = Some(format!("Loaded grid from {}", path.display()));
                tracing::info!(path = %path.display(), live = self.grid.live_count(), "grid restored");
                Mode::Editing
            }
            Err(e) => {
                self.status = Some(self.report(e));
                mode
            }
        }
    }

    fn report(&self, e: LifeError) -> String {
        if e.is_notice() {
            tracing::info!("nothing to save");
        } else {
            tracing::warn!(%e, "file action failed");
        }
        match e {
            LifeError::EmptySave => "Nothing to save".to_string(),
            e => e.to_string(),
        }
    }
}
