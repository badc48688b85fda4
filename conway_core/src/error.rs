// error.rs - Error taxonomy for the Game of Life core

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifeError {
    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfRange { row: usize, col: usize },

    #[error("format error: {0}")]
    Format(String),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("grid is {expected:?} but file holds {found:?} (rows, cols)")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("nothing to save")]
    EmptySave,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl LifeError {
    /// Save on an all-dead grid is reported, never treated as a failure.
    pub fn is_notice(&self) -> bool {
        matches!(self, LifeError::EmptySave)
    }
}

pub type Result<T> = std::result::Result<T, LifeError>;
