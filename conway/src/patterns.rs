// patterns.rs - Initial states: named patterns and random soup

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{LifeError, Result};
use crate::grid::Grid;

/// Live cells as `(row, col)` offsets from the pattern's top-left corner.
pub struct Pattern {
    pub name  : &'static str,
    pub cells : &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
];

/// Case-insensitive lookup by name.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|pattern| pattern.name.eq_ignore_ascii_case(name))
}

pub fn require(name: &str) -> Result<&'static Pattern> {
    find(name).ok_or_else(|| LifeError::UnknownPattern(name.to_string()))
}

/// Clears `grid` and stamps `pattern` with its corner at `origin`, wrapping
/// around both edges.
pub fn apply_pattern(grid: &mut Grid, pattern: &Pattern, origin: (usize, usize)) {
    grid.clear();
    for &(row, col) in pattern.cells {
        let row = (origin.0 + row) % grid.rows();
        let col = (origin.1 + col) % grid.columns();
        grid.set(row, col, true);
    }
}

/// Fills `grid` so that each cell is alive with probability 3/10,
/// reproducibly for a given `seed`.
pub fn apply_random_pattern(grid: &mut Grid, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for cell in grid.cells_mut() {
        *cell = rng.gen_range(0..10) >= 7;
    }
}
