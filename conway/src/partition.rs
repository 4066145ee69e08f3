// partition.rs - Row-wise domain decomposition and per-worker partitions

use crate::error::{LifeError, Result};
use crate::grid::{Cell, DoubleBuffer, Grid};
use crate::kernel;
use crate::topology::WorkerContext;

/// Contiguous run of global rows owned by one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowSpan {
    pub first_row     : usize,
    pub interior_rows : usize,
}

impl RowSpan {
    pub fn end(&self) -> usize {
        self.first_row + self.interior_rows
    }
}

/// Splits `height` rows across `workers`: every worker gets
/// `height / workers` rows and the last one also takes the remainder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partitioner {
    height  : usize,
    width   : usize,
    workers : usize,
}

impl Partitioner {
    pub fn new(height: usize, width: usize, workers: usize) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(LifeError::InvalidDimensions { rows: height, columns: width });
        }
        if workers == 0 {
            return Err(LifeError::NoWorkers);
        }
        if workers > height {
            return Err(LifeError::TooManyWorkers { workers, height });
        }
        Ok(Self { height, width, workers })
    }

    pub fn height(&self) -> usize { self.height }
    pub fn width(&self) -> usize { self.width }
    pub fn workers(&self) -> usize { self.workers }

    /// Interior rows assigned to `rank`.
    pub fn interior_rows(&self, rank: usize) -> usize {
        let base = self.height / self.workers;
        if rank == self.workers - 1 { base + self.height % self.workers } else { base }
    }

    pub fn span(&self, rank: usize) -> RowSpan {
        RowSpan {
            first_row     : rank * (self.height / self.workers),
            interior_rows : self.interior_rows(rank),
        }
    }

    pub fn spans(&self) -> impl Iterator<Item = RowSpan> + '_ {
        (0..self.workers).map(|rank| self.span(rank))
    }
}

/// One worker's slice of the global grid: `interior_rows + 2` rows, where
/// row 0 mirrors the predecessor's last interior row and the final row
/// mirrors the successor's first interior row.
#[derive(Debug)]
pub struct Partition {
    context : WorkerContext,
    buffers : DoubleBuffer,
}

impl Partition {
    /// Copies the rows `context` owns out of the global initial grid.
    /// Ghost rows start dead and are filled by the first halo exchange.
    pub fn scatter(global: &Grid, context: WorkerContext) -> Result<Self> {
        let span = context.span;
        let mut local = Grid::new(span.interior_rows + 2, global.columns())?;
        for (offset, row) in (span.first_row..span.end()).enumerate() {
            local.row_mut(offset + 1).copy_from_slice(global.row(row));
        }
        Ok(Self { context, buffers: DoubleBuffer::new(local)? })
    }

    pub fn context(&self) -> &WorkerContext { &self.context }

    /// Local buffer including both ghost rows.
    pub fn local(&self) -> &Grid { self.buffers.current() }

    pub fn first_interior_row(&self) -> &[Cell] {
        self.local().row(1)
    }

    pub fn last_interior_row(&self) -> &[Cell] {
        self.local().row(self.context.span.interior_rows)
    }

    pub fn set_top_ghost(&mut self, row: &[Cell]) -> Result<()> {
        self.write_ghost(0, row)
    }

    pub fn set_bottom_ghost(&mut self, row: &[Cell]) -> Result<()> {
        self.write_ghost(self.context.span.interior_rows + 1, row)
    }

    fn write_ghost(&mut self, index: usize, row: &[Cell]) -> Result<()> {
        let local = self.buffers.current_mut();
        if row.len() != local.columns() {
            return Err(LifeError::HaloWidthMismatch { expected: local.columns(), received: row.len() });
        }
        local.row_mut(index).copy_from_slice(row);
        Ok(())
    }

    /// Applies the rule to every interior row. Ghost rows are read, never written.
    pub fn step(&mut self) {
        let (current, next) = self.buffers.split();
        kernel::sweep_partition(current, next);
    }

    pub fn swap(&mut self) {
        self.buffers.swap();
    }

    /// Writes the interior rows back to their global position.
    pub fn gather_into(&self, global: &mut Grid) {
        let span = self.context.span;
        for (offset, row) in (span.first_row..span.end()).enumerate() {
            global.row_mut(row).copy_from_slice(self.local().row(offset + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Ring;

    #[test]
    fn test_remainder_goes_to_last_worker() {
        let partitioner = Partitioner::new(10, 5, 3).unwrap();
        assert_eq!(partitioner.interior_rows(0), 3);
        assert_eq!(partitioner.interior_rows(1), 3);
        assert_eq!(partitioner.interior_rows(2), 3 + 1);
    }

    #[test]
    fn test_spans_cover_height_without_overlap() {
        for (height, workers) in [(20, 1), (20, 3), (7, 7), (23, 4), (5, 2)] {
            let partitioner = Partitioner::new(height, 8, workers).unwrap();
            let mut next_row = 0;
            for span in partitioner.spans() {
                assert_eq!(span.first_row, next_row);
                assert!(span.interior_rows >= 1);
                next_row = span.end();
            }
            assert_eq!(next_row, height);
        }
    }

    #[test]
    fn test_invalid_worker_counts_rejected() {
        assert!(matches!(Partitioner::new(4, 4, 0), Err(LifeError::NoWorkers)));
        assert!(matches!(
            Partitioner::new(4, 4, 5),
            Err(LifeError::TooManyWorkers { workers: 5, height: 4 })
        ));
    }

    #[test]
    fn test_scatter_and_gather_round_trip_interior() {
        let mut global = Grid::new(5, 3).unwrap();
        global.set(0, 0, true);
        global.set(3, 1, true);
        global.set(4, 2, true);

        let partitioner = Partitioner::new(5, 3, 2).unwrap();
        let ring = Ring::new(2).unwrap();
        let mut gathered = Grid::new(5, 3).unwrap();
        for context in ring.contexts(&partitioner) {
            let partition = Partition::scatter(&global, context).unwrap();
            assert_eq!(partition.local().rows(), context.span.interior_rows + 2);
            partition.gather_into(&mut gathered);
        }
        assert_eq!(gathered, global);
    }

    #[test]
    fn test_boundary_rows_and_ghosts() {
        let rows = vec![
            vec![true, false, false],
            vec![false, true, false],
            vec![false, false, true],
        ];
        let global = Grid::from_rows(&rows).unwrap();
        let partitioner = Partitioner::new(3, 3, 1).unwrap();
        let context = Ring::new(1).unwrap().context(0, &partitioner);
        let mut partition = Partition::scatter(&global, context).unwrap();

        assert_eq!(partition.first_interior_row(), &[true, false, false]);
        assert_eq!(partition.last_interior_row(), &[false, false, true]);

        partition.set_top_ghost(&[true, true, true]).unwrap();
        assert_eq!(partition.local().row(0), &[true, true, true]);
        assert!(matches!(
            partition.set_bottom_ghost(&[true]),
            Err(LifeError::HaloWidthMismatch { expected: 3, received: 1 })
        ));
    }
}
