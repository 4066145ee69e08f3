// grid.rs - Grid types for Conway's Game of Life

use std::ops::{Index, IndexMut};

use crate::error::{LifeError, Result};

/// A cell is alive (`true`) or dead (`false`).
pub type Cell = bool;

/// Row-major `rows x columns` block of cells in one flat allocation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows    : usize,
    columns : usize,
    cells   : Vec<Cell>,
}

impl Grid {
    /// Allocates an all-dead grid.
    ///
    /// Fails on a zero dimension, and fails fast with
    /// [`LifeError::Allocation`] instead of aborting when the buffer cannot
    /// be reserved.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(LifeError::InvalidDimensions { rows, columns });
        }
        let len = rows
            .checked_mul(columns)
            .ok_or(LifeError::Allocation { cells: usize::MAX })?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| LifeError::Allocation { cells: len })?;
        cells.resize(len, false);

        Ok(Self { rows, columns, cells })
    }

    /// Builds a grid from `rows` of equal length.
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Result<Self> {
        let columns = rows.first().map_or(0, |row| row.as_ref().len());
        let mut grid = Self::new(rows.len(), columns)?;
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != columns {
                return Err(LifeError::InvalidDimensions { rows: rows.len(), columns: row.len() });
            }
            grid.row_mut(index).copy_from_slice(row);
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn columns(&self) -> usize { self.columns }

    /// Bounds-checked lookup; `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.rows && col < self.columns).then(|| self.cells[row * self.columns + col])
    }

    pub fn set(&mut self, row: usize, col: usize, alive: Cell) {
        self[(row, col)] = alive;
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.columns;
        &self.cells[start..start + self.columns]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [Cell] {
        let start = row * self.columns;
        &mut self.cells[start..start + self.columns]
    }

    /// The whole buffer, row after row.
    pub fn cells(&self) -> &[Cell] { &self.cells }
    pub fn cells_mut(&mut self) -> &mut [Cell] { &mut self.cells }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of every live cell, in row-major order.
    pub fn alive_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(index, _)| (index / self.columns, index % self.columns))
            .collect()
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.columns,
            "cell ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.columns
        );
        row * self.columns + col
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Cell;

    fn index(&self, (row, col): (usize, usize)) -> &Cell {
        &self.cells[self.offset(row, col)]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Cell {
        let offset = self.offset(row, col);
        &mut self.cells[offset]
    }
}

/// "current" and "next" grids of identical shape. A sweep reads `current`
/// and writes `next`; [`DoubleBuffer::swap`] then hands ownership over
/// without copying cells.
#[derive(Debug)]
pub struct DoubleBuffer {
    current : Grid,
    next    : Grid,
}

impl DoubleBuffer {
    pub fn new(initial: Grid) -> Result<Self> {
        let next = Grid::new(initial.rows(), initial.columns())?;
        Ok(Self { current: initial, next })
    }

    pub fn current(&self) -> &Grid { &self.current }
    pub fn current_mut(&mut self) -> &mut Grid { &mut self.current }

    /// Read-only `current` alongside writable `next`, for one sweep.
    pub fn split(&mut self) -> (&Grid, &mut Grid) {
        (&self.current, &mut self.next)
    }

    /// The old `current` is not freed: it becomes the scratch `next` of the
    /// following sweep, which overwrites every cell before it is read again.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    pub fn into_current(self) -> Grid {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(Grid::new(0, 4), Err(LifeError::InvalidDimensions { rows: 0, columns: 4 })));
        assert!(matches!(Grid::new(4, 0), Err(LifeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_oversized_grid_fails_fast() {
        assert!(matches!(Grid::new(usize::MAX, 2), Err(LifeError::Allocation { .. })));
    }

    #[test]
    fn test_row_major_layout() {
        let mut grid = Grid::new(3, 4).unwrap();
        grid.set(1, 2, true);
        assert_eq!(grid.cells()[1 * 4 + 2], true);
        assert_eq!(grid.row(1), &[false, false, true, false]);
        assert_eq!(grid.get(1, 2), Some(true));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 4), None);
        assert_eq!(grid.alive_cells(), vec![(1, 2)]);
    }

    #[test]
    #[should_panic(expected = "outside 2x2 grid")]
    fn test_index_is_bounds_checked() {
        let grid = Grid::new(2, 2).unwrap();
        let _ = grid[(0, 2)];
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let rows = vec![vec![true, false], vec![true]];
        assert!(Grid::from_rows(&rows).is_err());
    }

    #[test]
    fn test_swap_hands_over_next() {
        let mut initial = Grid::new(2, 3).unwrap();
        initial.set(0, 0, true);
        let mut buffers = DoubleBuffer::new(initial.clone()).unwrap();

        let (current, next) = buffers.split();
        assert_eq!(current, &initial);
        next.set(1, 2, true);
        let computed = next.clone();

        buffers.swap();
        assert_eq!(buffers.current(), &computed);
        assert_eq!(buffers.into_current().alive_cells(), vec![(1, 2)]);
    }

    #[test]
    fn test_old_current_is_reused_as_scratch() {
        let mut initial = Grid::new(3, 3).unwrap();
        initial.set(1, 1, true);
        let mut buffers = DoubleBuffer::new(initial.clone()).unwrap();

        buffers.split().1.set(0, 0, true);
        buffers.swap();
        let (current, scratch) = buffers.split();
        assert_eq!(current.alive_cells(), vec![(0, 0)]);
        assert_eq!(scratch, &initial);

        scratch.clear();
        scratch.set(2, 2, true);
        buffers.swap();
        assert_eq!(buffers.current().alive_cells(), vec![(2, 2)]);
    }
}
