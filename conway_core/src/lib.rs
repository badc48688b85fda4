//! Game of Life engine: toroidal grid with cell ages, the B3/S23 step,
//! stability/periodicity detection, a pattern library with file formats, and
//! the editor/simulation state machine that consumes abstract [`Action`]s.

pub mod config;
pub mod detector;
pub mod engine;
pub mod error;
pub mod grid;
pub mod input;
pub mod patterns;
pub mod render;
pub mod runner;
pub mod session;
pub mod storage;

pub use config::{Scene, SessionConfig};
pub use detector::{Detector, EndReason, Termination};
pub use error::{LifeError, Result};
pub use grid::Grid;
pub use input::{Action, ClickHits, InputAdapter, ScriptedInput, resolve_click};
pub use patterns::{Library, Pattern};
pub use render::{Palette, Rgb};
pub use session::{Flow, Mode, SessionState};
