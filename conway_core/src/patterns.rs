// patterns.rs - Built-in pattern library and the owned Pattern record

/// A relocatable set of live-cell offsets from an implicit origin.
///
/// Library entries and loaded files hand out clones, so a placed or selected
/// pattern never aliases its source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    name: String,
    cells: Vec<(i32, i32)>,
    width: u32,
    height: u32,
}

impl Pattern {
    /// Builds a pattern whose declared size is the extent of its offsets.
    pub fn new(name: impl Into<String>, cells: Vec<(i32, i32)>) -> Self {
        let height = cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0).max(0) as u32;
        let width = cells.iter().map(|&(_, c)| c + 1).max().unwrap_or(0).max(0) as u32;
        Self::with_size(name, cells, width, height)
    }

    /// Declared width/height are informational only; placement clips per cell.
    pub fn with_size(name: impl Into<String>, cells: Vec<(i32, i32)>, width: u32, height: u32) -> Self {
        Self { name: name.into(), cells, width, height }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn cells(&self) -> &[(i32, i32)] { &self.cells }
    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
}

pub struct PatternDef {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
}

impl PatternDef {
    pub fn to_pattern(&self) -> Pattern {
        Pattern::new(self.name, self.cells.to_vec())
    }
}

pub struct Category {
    pub name: &'static str,
    pub patterns: &'static [PatternDef],
}

pub const STILL_LIFES: &[PatternDef] = &[
    PatternDef { name: "Block", cells: &[(0, 0), (0, 1), (1, 0), (1, 1)] },
    PatternDef { name: "Beehive", cells: &[(0, 1), (0, 2), (1, 0), (1, 3), (2, 1), (2, 2)] },
    PatternDef { name: "Loaf", cells: &[(0, 1), (0, 2), (1, 0), (1, 3), (2, 1), (2, 3), (3, 2)] },
    PatternDef { name: "Boat", cells: &[(0, 0), (0, 1), (1, 0), (1, 2), (2, 1)] },
    PatternDef { name: "Tub", cells: &[(0, 1), (1, 0), (1, 2), (2, 1)] },
];

pub const OSCILLATORS: &[PatternDef] = &[
    PatternDef { name: "Blinker", cells: &[(0, 0), (0, 1), (0, 2)] },
    PatternDef { name: "Toad", cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)] },
    PatternDef {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    PatternDef {
        name: "Pulsar",
        cells: &[
            // Top half
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom half (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    PatternDef {
        name: "Pentadecathlon",
        cells: &[
            (0, 2), (0, 7),
            (1, 0), (1, 1), (1, 3), (1, 4), (1, 5), (1, 6), (1, 8), (1, 9),
            (2, 2), (2, 7),
        ],
    },
    PatternDef { name: "Celestial Harmony", cells: &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)] },
];

pub const SPACESHIPS: &[PatternDef] = &[
    PatternDef { name: "Glider", cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)] },
    PatternDef {
        name: "Lightweight Spaceship",
        cells: &[(0, 1), (0, 4), (1, 0), (2, 0), (2, 4), (3, 0), (3, 1), (3, 2), (3, 3)],
    },
    PatternDef {
        name: "Middleweight Spaceship",
        cells: &[
            (0, 3), (1, 1), (1, 5), (2, 0), (3, 0), (3, 5),
            (4, 0), (4, 1), (4, 2), (4, 3), (4, 4),
        ],
    },
];

pub const METHUSELAHS: &[PatternDef] = &[
    PatternDef { name: "R-pentomino", cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)] },
    PatternDef { name: "Diehard", cells: &[(0, 6), (1, 0), (1, 1), (2, 1), (2, 5), (2, 6), (2, 7)] },
    PatternDef { name: "Acorn", cells: &[(0, 1), (1, 3), (2, 0), (2, 1), (2, 4), (2, 5), (2, 6)] },
    PatternDef { name: "A Star is Born", cells: &[(0, 2), (1, 0), (1, 2), (2, 1), (2, 2)] },
];

pub const GUNS: &[PatternDef] = &[PatternDef {
    name: "Gosper Glider Gun",
    cells: &[
        (4, 0), (4, 1), (5, 0), (5, 1),
        (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
        (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
        (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
        (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
        (2, 34), (3, 34), (2, 35), (3, 35),
    ],
}];

pub const CATEGORIES: &[Category] = &[
    Category { name: "Still Lifes", patterns: STILL_LIFES },
    Category { name: "Oscillators", patterns: OSCILLATORS },
    Category { name: "Spaceships", patterns: SPACESHIPS },
    Category { name: "Methuselahs", patterns: METHUSELAHS },
    Category { name: "Guns", patterns: GUNS },
];

/// Read-only view over the static category tables.
#[derive(Clone, Copy, Debug, Default)]
pub struct Library;

impl Library {
    pub fn categories(&self) -> &'static [Category] {
        CATEGORIES
    }

    /// Owned copy of the named pattern, searched across every category.
    pub fn find(&self, name: &str) -> Option<Pattern> {
        CATEGORIES
            .iter()
            .flat_map(|c| c.patterns.iter())
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(PatternDef::to_pattern)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        CATEGORIES.iter().flat_map(|c| c.patterns.iter().map(|p| p.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: Vec<_> = Library.names().collect();
        let unique: HashSet<_> = names.iter().map(|n| n.to_ascii_lowercase()).collect();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn offsets_are_normalised_and_distinct() {
        for cat in Library.categories() {
            for def in cat.patterns {
                let set: HashSet<_> = def.cells.iter().collect();
                assert_eq!(set.len(), def.cells.len(), "{} repeats a cell", def.name);
                assert_eq!(def.cells.iter().map(|c| c.0).min(), Some(0), "{} row origin", def.name);
                assert_eq!(def.cells.iter().map(|c| c.1).min(), Some(0), "{} col origin", def.name);
            }
        }
    }

    #[test]
    fn find_returns_an_owned_copy() {
        let mut glider = Library.find("glider").unwrap();
        assert_eq!(glider.name(), "Glider");
        assert_eq!((glider.width(), glider.height()), (3, 3));
        glider.cells.clear();
        assert_eq!(Library.find("Glider").unwrap().cells().len(), 5);
    }

    #[test]
    fn gun_extent() {
        let gun = Library.find("Gosper Glider Gun").unwrap();
        assert_eq!((gun.width(), gun.height()), (36, 9));
        assert_eq!(gun.cells().len(), 36);
    }

    #[test]
    fn every_category_is_populated() {
        let names: Vec<_> = Library.categories().iter().map(|c| c.name).collect();
        assert_eq!(names, ["Still Lifes", "Oscillators", "Spaceships", "Methuselahs", "Guns"]);
        assert!(Library.categories().iter().all(|c| !c.patterns.is_empty()));
    }
}
