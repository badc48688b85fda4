// engine.rs - B3/S23 generation step over a full snapshot

use crate::grid::Grid;

/// Conway's rule for one cell.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3)            => true, // Birth
        _                     => false, // Death or stays dead
    }
}

/// Age after a step, from old and new liveness.
pub fn next_age(was_alive: bool, old_age: u32, alive: bool) -> u32 {
    match (was_alive, alive) {
        (true, true)  => old_age.saturating_add(1),
        (false, true) => 1,
        (_, false)    => 0,
    }
}

/// Computes the next generation. `grid` is only read, so every neighbour
/// count sees the prior generation.
pub fn step(grid: &Grid) -> Grid {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut cells = Vec::with_capacity(rows * cols);
    let mut ages = Vec::with_capacity(rows * cols);

    for row in 0..rows {
        for col in 0..cols {
            let was_alive = grid.is_alive(row, col);
            let alive = next_state(was_alive, grid.live_neighbors(row, col));
            cells.push(alive);
            ages.push(next_age(was_alive, grid.age(row, col), alive));
        }
    }

    Grid::from_parts(rows, cols, cells, ages)
}
