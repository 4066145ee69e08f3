// shared.rs - Shared-memory sweep over disjoint row bands

use std::thread;

use tracing::trace;

use crate::error::{LifeError, Result};
use crate::grid::Grid;
use crate::kernel;
use crate::partition::{Partitioner, RowSpan};

/// Fixed pool of row bands for one resident grid. Band `i` is swept by its
/// own thread, reading the shared `current` grid and writing only its slice
/// of `next`. With more threads than rows each row is its own band and the
/// remaining threads have nothing to do.
#[derive(Clone, Debug)]
pub struct SharedKernel {
    columns : usize,
    threads : usize,
    bands   : Vec<RowSpan>,
}

impl SharedKernel {
    pub fn new(height: usize, width: usize, threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(LifeError::NoWorkers);
        }
        let partitioner = Partitioner::new(height, width, threads.min(height))?;
        Ok(Self {
            columns : width,
            threads,
            bands   : partitioner.spans().collect(),
        })
    }

    /// Threads requested, including idle ones.
    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn bands(&self) -> &[RowSpan] {
        &self.bands
    }

    /// One generation: fans the bands out to scoped threads and returns once
    /// every one of them has joined, so `next` is complete on return.
    pub fn sweep(&self, current: &Grid, next: &mut Grid) {
        debug_assert_eq!(current.columns(), self.columns);
        debug_assert_eq!((current.rows(), current.columns()), (next.rows(), next.columns()));

        let mut rest = next.cells_mut();
        thread::scope(|scope| {
            for &span in &self.bands {
                let (band, tail) = std::mem::take(&mut rest).split_at_mut(span.interior_rows * self.columns);
                rest = tail;
                scope.spawn(move || {
                    trace!(first_row = span.first_row, rows = span.interior_rows, "sweeping band");
                    kernel::sweep_band(current, span, band);
                });
            }
        });
    }
}
