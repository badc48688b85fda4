// grid.rs - Toroidal cell lattice with per-cell ages

use crate::error::{LifeError, Result};
use crate::patterns::Pattern;
use rand::Rng;

/// Largest grid accepted, in cells.
pub const MAX_CELLS: usize = 1 << 24;

/// Cell count for a `rows` x `cols` grid, if it is non-empty and within
/// [`MAX_CELLS`].
pub fn cell_count(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(LifeError::InvalidConfig(format!(
            "grid must be at least 1x1, got {rows}x{cols}"
        )));
    }
    match rows.checked_mul(cols) {
        Some(n) if n <= MAX_CELLS => Ok(n),
        _ => Err(LifeError::InvalidConfig(format!(
            "grid {rows}x{cols} exceeds {MAX_CELLS} cells"
        ))),
    }
}

/// Live/dead lattice plus a parallel age counter.
///
/// `age == 0` exactly when the cell is dead, except for cells set through
/// [`Grid::paint`], which stay unaged until [`Grid::promote_unaged`] runs.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
    ages: Vec<u32>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let n = cell_count(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![false; n],
            ages: vec![0; n],
        })
    }

    pub(crate) fn from_parts(rows: usize, cols: usize, cells: Vec<bool>, ages: Vec<u32>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        debug_assert_eq!(ages.len(), rows * cols);
        Self { rows, cols, cells, ages }
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.rows && col < self.cols {
            Ok(self.index(row, col))
        } else {
            Err(LifeError::OutOfRange { row, col })
        }
    }

    fn set(&mut self, row: usize, col: usize, alive: bool, age: u32) {
        let i = self.index(row, col);
        self.cells[i] = alive;
        self.ages[i] = age;
    }

    /// Out-of-range lookups read as dead.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[self.index(row, col)]
    }

    pub fn age(&self, row: usize, col: usize) -> u32 {
        if row < self.rows && col < self.cols { self.ages[self.index(row, col)] } else { 0 }
    }

    pub fn cells(&self) -> &[bool] { &self.cells }
    pub fn ages(&self) -> &[u32] { &self.ages }

    /// Flips a cell. Returns the new liveness.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<bool> {
        let i = self.check(row, col)?;
        let alive = !self.cells[i];
        self.cells[i] = alive;
        self.ages[i] = u32::from(alive);
        Ok(alive)
    }

    /// Brush write: sets liveness without ageing a newly drawn cell.
    pub fn paint(&mut self, row: usize, col: usize, alive: bool) -> Result<()> {
        let i = self.check(row, col)?;
        if !alive {
            self.ages[i] = 0;
        }
        self.cells[i] = alive;
        Ok(())
    }

    /// Stamps `pattern` with its origin at the anchor. Offsets that land
    /// outside the grid are dropped; placement never wraps. Returns the number
    /// of cells written.
    pub fn stamp(&mut self, pattern: &Pattern, anchor_row: usize, anchor_col: usize) -> usize {
        let mut written = 0;
        for &(dr, dc) in pattern.cells() {
            if let Some((r, c)) = self.offset(anchor_row, anchor_col, dr, dc) {
                self.set(r, c, true, 1);
                written += 1;
            }
        }
        written
    }

    /// Absolute target of an offset from an anchor, if it lies inside the grid.
    pub fn offset(&self, anchor_row: usize, anchor_col: usize, dr: i32, dc: i32) -> Option<(usize, usize)> {
        let r = anchor_row as i64 + i64::from(dr);
        let c = anchor_col as i64 + i64::from(dc);
        if r < 0 || c < 0 || r >= self.rows as i64 || c >= self.cols as i64 {
            return None;
        }
        Some((r as usize, c as usize))
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.ages.fill(0);
    }

    /// Overwrites liveness wholesale; every live cell restarts at age 1.
    pub(crate) fn overwrite(&mut self, cells: Vec<bool>) {
        debug_assert_eq!(cells.len(), self.rows * self.cols);
        self.ages = cells.iter().map(|&alive| u32::from(alive)).collect();
        self.cells = cells;
    }

    /// Gives age 1 to live cells that were drawn without an age.
    pub fn promote_unaged(&mut self) -> usize {
        let mut promoted = 0;
        for (alive, age) in self.cells.iter().zip(self.ages.iter_mut()) {
            if *alive && *age == 0 {
                *age = 1;
                promoted += 1;
            }
        }
        promoted
    }

    /// Fills the grid at random; each cell is alive with probability `density`.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, density: f64) {
        let density = density.clamp(0.0, 1.0);
        for i in 0..self.cells.len() {
            let alive = rng.gen_bool(density);
            self.cells[i] = alive;
            self.ages[i] = u32::from(alive);
        }
    }

    /// Live cells among the 8 toroidal neighbours of `(row, col)`.
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;
        for (i, dr) in [self.rows - 1, 0, 1].into_iter().enumerate() {
            for (j, dc) in [self.cols - 1, 0, 1].into_iter().enumerate() {
                if i == 1 && j == 1 {
                    continue;
                }
                let nr = (row + dr) % self.rows;
                let nc = (col + dc) % self.cols;
                if self.cells[self.index(nr, nc)] {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.contains(&true)
    }

    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(i, _)| (i / cols, i % cols))
    }

    /// Liveness equality; ages are not compared.
    pub fn same_cells(&self, other: &Grid) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.cells == other.cells
    }

    /// Minimal `(top, left, bottom, right)` box around the live cells, inclusive.
    pub fn bounding_box(&self) -> Option<(usize, usize, usize, usize)> {
        self.live_cells().fold(None, |acc, (r, c)| match acc {
            None => Some((r, c, r, c)),
            Some((t, l, b, rt)) => Some((t.min(r), l.min(c), b.max(r), rt.max(c))),
        })
    }

    /// Liveness as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.cells.chunks(self.cols).map(<[bool]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blinker() -> Pattern {
        Pattern::new("Blinker", vec![(0, 0), (0, 1), (0, 2)])
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(Grid::new(0, 5), Err(LifeError::InvalidConfig(_))));
        assert!(matches!(Grid::new(5, 0), Err(LifeError::InvalidConfig(_))));
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        assert!(matches!(Grid::new(1 << 32, 1 << 32), Err(LifeError::InvalidConfig(_))));
        assert!(matches!(Grid::new(usize::MAX, 2), Err(LifeError::InvalidConfig(_))));
        assert!(matches!(Grid::new(MAX_CELLS, 2), Err(LifeError::InvalidConfig(_))));
        assert_eq!(cell_count(MAX_CELLS, 1).unwrap(), MAX_CELLS);
    }

    #[test]
    fn toggle_sets_age_on_birth_and_death() {
        let mut g = Grid::new(4, 4).unwrap();
        assert!(g.toggle(1, 2).unwrap());
        assert_eq!(g.age(1, 2), 1);
        assert!(!g.toggle(1, 2).unwrap());
        assert_eq!(g.age(1, 2), 0);
    }

    #[test]
    fn toggle_out_of_range_fails() {
        let mut g = Grid::new(4, 4).unwrap();
        assert!(matches!(g.toggle(4, 0), Err(LifeError::OutOfRange { row: 4, col: 0 })));
        assert!(g.is_empty());
    }

    #[test]
    fn stamp_clips_without_wrapping() {
        let mut g = Grid::new(5, 5).unwrap();
        let written = g.stamp(&blinker(), 2, 3);
        assert_eq!(written, 2);
        assert!(g.is_alive(2, 3));
        assert!(g.is_alive(2, 4));
        assert!(!g.is_alive(2, 0));
        assert_eq!(g.live_count(), 2);
        assert_eq!(g.age(2, 4), 1);
    }

    #[test]
    fn stamp_skips_negative_offsets() {
        let mut g = Grid::new(3, 3).unwrap();
        let p = Pattern::new("odd", vec![(-1, 0), (0, 0)]);
        assert_eq!(g.stamp(&p, 0, 0), 1);
        assert!(!g.is_alive(2, 0));
    }

    #[test]
    fn neighbors_wrap_both_axes() {
        let mut g = Grid::new(5, 5).unwrap();
        g.toggle(4, 4).unwrap();
        g.toggle(0, 4).unwrap();
        g.toggle(4, 0).unwrap();
        assert_eq!(g.live_neighbors(0, 0), 3);
    }

    #[test]
    fn single_row_grid_counts_itself_through_wraparound() {
        let mut g = Grid::new(1, 3).unwrap();
        g.toggle(0, 0).unwrap();
        // (0,0) is each of the vertical neighbours of (0,1) on a one-row torus.
        assert_eq!(g.live_neighbors(0, 1), 3);
    }

    #[test]
    fn paint_then_promote() {
        let mut g = Grid::new(3, 3).unwrap();
        g.paint(1, 1, true).unwrap();
        assert_eq!(g.age(1, 1), 0);
        assert_eq!(g.promote_unaged(), 1);
        assert_eq!(g.age(1, 1), 1);
        g.paint(1, 1, false).unwrap();
        assert_eq!(g.age(1, 1), 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut g = Grid::new(3, 3).unwrap();
        g.stamp(&blinker(), 1, 0);
        g.clear();
        assert!(g.is_empty());
        assert!(g.ages().iter().all(|&a| a == 0));
    }

    #[test]
    fn bounding_box_covers_live_cells() {
        let mut g = Grid::new(6, 6).unwrap();
        assert_eq!(g.bounding_box(), None);
        g.toggle(1, 4).unwrap();
        g.toggle(3, 2).unwrap();
        assert_eq!(g.bounding_box(), Some((1, 2, 3, 4)));
    }
}
