// detector.rs - Stability and periodicity detection

use crate::grid::Grid;
use std::collections::VecDeque;
use std::fmt;

pub const HISTORY_LEN: usize = 10;
pub const STABLE_TICKS: u32 = 10;
/// Periodicity is only checked once the generation counter exceeds this.
pub const PERIOD_WARMUP: u64 = 20;

/// Canonical, exactly comparable form of a generation: liveness packed 64 cells per word.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Snapshot {
    rows: usize,
    cols: usize,
    bits: Vec<u64>,
}

impl Snapshot {
    pub fn of(grid: &Grid) -> Self {
        let mut bits = vec![0u64; grid.cells().len().div_ceil(64)];
        for (i, _) in grid.cells().iter().enumerate().filter(|(_, alive)| **alive) {
            bits[i / 64] |= 1 << (i % 64);
        }
        Self { rows: grid.rows(), cols: grid.cols(), bits }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    Stable,
    Periodic,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::Stable => f.write_str("Stable state"),
            EndReason::Periodic => f.write_str("Periodic state"),
        }
    }
}

/// Why and when a run halted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Termination {
    pub reason: EndReason,
    /// Generation counter value on the tick the verdict fired.
    pub generation: u64,
    /// First generation of the identical run for a stable halt; equal to
    /// `generation` for a periodic one.
    pub onset: u64,
}

impl Termination {
    pub fn report(&self) -> String {
        format!(
            "Simulation ended at generation {} due to a {}.",
            self.generation, self.reason
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct Detector {
    stable_count: u32,
    history: VecDeque<Snapshot>,
}

impl Detector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh run with `initial` as the only remembered generation.
    pub fn reset(&mut self, initial: &Grid) {
        self.stable_count = 0;
        self.history.clear();
        self.history.push_back(Snapshot::of(initial));
    }

    pub fn stable_count(&self) -> u32 { self.stable_count }
    pub fn history_len(&self) -> usize { self.history.len() }

    /// Feeds one step. `generation` is the counter before it is advanced.
    pub fn observe(&mut self, previous: &Grid, next: &Grid, generation: u64) -> Option<Termination> {
        if next.same_cells(previous) {
            self.stable_count += 1;
        } else {
            self.stable_count = 0;
        }

        if self.stable_count >= STABLE_TICKS {
            return Some(Termination {
                reason: EndReason::Stable,
                generation,
                onset: (generation + 1).saturating_sub(u64::from(self.stable_count)),
            });
        }

        if generation > PERIOD_WARMUP {
            let snapshot = Snapshot::of(next);
            if self.history.contains(&snapshot) {
                return Some(Termination {
                    reason: EndReason::Periodic,
                    generation,
                    onset: generation,
                });
            }
            self.history.push_back(snapshot);
            while self.history.len() > HISTORY_LEN {
                self.history.pop_front();
            }
        }
        None
    }
}
