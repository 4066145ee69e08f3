// kernel.rs - Moore-neighbourhood update rule and row sweeps

use crate::grid::{Cell, Grid};
use crate::partition::RowSpan;

/// Conway's rule for one cell with `neighbours` live Moore neighbours.
pub fn next_state(alive: Cell, neighbours: u8) -> Cell {
    match (alive, neighbours) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}

/// Live neighbours of `here[col]`, wrapping around the column axis.
/// `above` and `below` are whatever rows sit next to `here` in the
/// toroidal (or ghost-padded) grid.
pub fn live_neighbours(above: &[Cell], here: &[Cell], below: &[Cell], col: usize) -> u8 {
    let width = here.len();
    let left = (col + width - 1) % width;
    let right = (col + 1) % width;

    let mut count = 0;
    for row in [above, below] {
        count += row[left] as u8 + row[col] as u8 + row[right] as u8;
    }
    count + here[left] as u8 + here[right] as u8
}

/// Computes the next generation of `here` into `out`.
pub fn evolve_row(above: &[Cell], here: &[Cell], below: &[Cell], out: &mut [Cell]) {
    debug_assert_eq!(here.len(), out.len());
    for (col, cell) in out.iter_mut().enumerate() {
        *cell = next_state(here[col], live_neighbours(above, here, below, col));
    }
}

/// Sweeps the interior rows `1..rows-1` of a ghost-padded partition.
/// The row axis does not wrap here: rows 0 and `rows-1` already hold the
/// neighbours' boundary rows.
pub fn sweep_partition(current: &Grid, next: &mut Grid) {
    debug_assert_eq!((current.rows(), current.columns()), (next.rows(), next.columns()));
    for row in 1..current.rows() - 1 {
        evolve_row(current.row(row - 1), current.row(row), current.row(row + 1), next.row_mut(row));
    }
}

/// Sweeps the global rows in `span` of a fully resident grid, wrapping the
/// row axis modulo the grid height. `band` holds exactly those rows of the
/// next generation.
pub fn sweep_band(current: &Grid, span: RowSpan, band: &mut [Cell]) {
    let height = current.rows();
    let width = current.columns();
    debug_assert_eq!(band.len(), span.interior_rows * width);

    for (row, out) in (span.first_row..span.end()).zip(band.chunks_exact_mut(width)) {
        let above = current.row((row + height - 1) % height);
        let below = current.row((row + 1) % height);
        evolve_row(above, current.row(row), below, out);
    }
}

/// Whole-grid sweep on the calling thread; the sequential reference.
pub fn sweep_toroidal(current: &Grid, next: &mut Grid) {
    let span = RowSpan { first_row: 0, interior_rows: current.rows() };
    sweep_band(current, span, next.cells_mut());
}
