// render.rs - Deterministic colours handed to whatever surface draws the grid

use crate::grid::Grid;
use crate::patterns::Pattern;

/// Ages past this all share the mature colour.
pub const AGE_CAP: u32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub dead: Rgb,
    /// Colour of a cell born this generation.
    pub newborn: Rgb,
    /// Colour at [`AGE_CAP`] and beyond.
    pub mature: Rgb,
    pub preview: Rgb,
    pub preview_clipped: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            dead: Rgb(40, 40, 40),
            newborn: Rgb(255, 255, 255),
            mature: Rgb(0, 200, 0),
            preview: Rgb(80, 160, 255),
            preview_clipped: Rgb(200, 60, 60),
        }
    }
}

impl Palette {
    pub fn cell(&self, alive: bool, age: u32) -> Rgb {
        if !alive {
            return self.dead;
        }
        let t = (age.clamp(1, AGE_CAP) - 1) as f32 / (AGE_CAP - 1) as f32;
        self.newborn.lerp(self.mature, t)
    }

    pub fn cell_at(&self, grid: &Grid, row: usize, col: usize) -> Rgb {
        self.cell(grid.is_alive(row, col), grid.age(row, col))
    }
}

/// Overlay targets for `pattern` anchored at `(row, col)`, in pattern order.
/// `None` marks an offset outside the grid that a stamp would drop.
pub fn preview(grid: &Grid, pattern: &Pattern, anchor: (usize, usize)) -> Vec<Option<(usize, usize)>> {
    pattern
        .cells()
        .iter()
        .map(|&(dr, dc)| grid.offset(anchor.0, anchor.1, dr, dc))
        .collect()
}
