// topology.rs - Ring of workers and the per-worker context

use crate::error::{LifeError, Result};
use crate::partition::{Partitioner, RowSpan};

/// Circular ordering of workers `0..N`; used only to pick halo neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ring {
    workers: usize,
}

impl Ring {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(LifeError::NoWorkers);
        }
        Ok(Self { workers })
    }

    pub fn workers(&self) -> usize { self.workers }

    pub fn predecessor(&self, rank: usize) -> usize {
        (rank + self.workers - 1) % self.workers
    }

    pub fn successor(&self, rank: usize) -> usize {
        (rank + 1) % self.workers
    }

    pub fn context(&self, rank: usize, partitioner: &Partitioner) -> WorkerContext {
        WorkerContext {
            rank,
            workers     : self.workers,
            predecessor : self.predecessor(rank),
            successor   : self.successor(rank),
            span        : partitioner.span(rank),
            columns     : partitioner.width(),
        }
    }

    pub fn contexts<'a>(&'a self, partitioner: &'a Partitioner) -> impl Iterator<Item = WorkerContext> + 'a {
        (0..self.workers).map(move |rank| self.context(rank, partitioner))
    }
}

/// Everything a worker needs to know about itself, computed once up front
/// and never changed during the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerContext {
    pub rank        : usize,
    pub workers     : usize,
    pub predecessor : usize,
    pub successor   : usize,
    pub span        : RowSpan,
    pub columns     : usize,
}

impl WorkerContext {
    /// The first worker in ring order owns the run's timing.
    pub fn is_coordinator(&self) -> bool {
        self.rank == 0
    }
}
