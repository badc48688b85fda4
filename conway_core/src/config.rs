// config.rs - Session construction options

use crate::error::{LifeError, Result};
use crate::grid::{self, Grid};
use crate::patterns::{Library, Pattern};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

/// The screensaver's glider, heading up and to the left.
const SCREENSAVER_GLIDER: &[(i32, i32)] = &[(0, 0), (1, 1), (1, 2), (2, 0), (2, 1)];

/// Starting content of the grid.
#[derive(Clone, Debug, PartialEq)]
pub enum Scene {
    Empty,
    /// R-pentomino just left of centre.
    RPentomino,
    /// "A Star is Born", "Celestial Harmony" and a glider.
    Screensaver,
    Random { density: f64, seed: u64 },
}

impl Scene {
    pub fn apply(&self, grid: &mut Grid) {
        let (rows, cols) = (grid.rows(), grid.cols());
        let place = |grid: &mut Grid, name: &str, row: usize, col: usize| {
            if let Some(p) = Library.find(name) {
                grid.stamp(&p, row, col);
            }
        };
        match self {
            Scene::Empty => {}
            Scene::RPentomino => {
                place(grid, "R-pentomino", rows / 2, (cols / 2).saturating_sub(3));
            }
            Scene::Screensaver => {
                place(grid, "A Star is Born", rows / 3, 2 * cols / 3);
                place(grid, "Celestial Harmony", 2 * rows / 3, 2 * cols / 3);
                let glider = Pattern::new("Glider", SCREENSAVER_GLIDER.to_vec());
                grid.stamp(&glider, rows / 2, cols / 2);
            }
            Scene::Random { density, seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                grid.randomize(&mut rng, *density);
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    /// Pixels per cell edge, for the drawing surface.
    pub cell_size: u32,
    /// Simulation ticks per second.
    pub tick_rate: u32,
    pub scene: Scene,
    /// Start simulating on its own after this long unless input arrives first.
    pub autostart: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            cell_size: 15,
            tick_rate: 5,
            scene: Scene::RPentomino,
            autostart: None,
        }
    }
}

impl SessionConfig {
    /// Grid sized to fill a `width` x `height` pixel surface.
    pub fn for_surface(width: u32, height: u32, cell_size: u32, tick_rate: u32) -> Result<Self> {
        if cell_size == 0 {
            return Err(LifeError::InvalidConfig("cell size must be positive".into()));
        }
        let config = Self {
            rows: (height / cell_size) as usize,
            cols: (width / cell_size) as usize,
            cell_size,
            tick_rate,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        grid::cell_count(self.rows, self.cols)?;
        if self.cell_size == 0 {
            return Err(LifeError::InvalidConfig("cell size must be positive".into()));
        }
        if self.tick_rate == 0 {
            return Err(LifeError::InvalidConfig("tick rate must be positive".into()));
        }
        if let Scene::Random { density, .. } = self.scene {
            if !(0.0..=1.0).contains(&density) {
                return Err(LifeError::InvalidConfig(format!("density {density} is not in 0..=1")));
            }
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }
}
