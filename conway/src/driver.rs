// driver.rs - Fixed-iteration evolution for both execution models

use std::time::Instant;

use tracing::{debug, info};

use crate::error::Result;
use crate::grid::{DoubleBuffer, Grid};
use crate::halo::{self, HaloLinks};
use crate::kernel;
use crate::partition::{Partition, Partitioner};
use crate::shared::SharedKernel;
use crate::timing::TimingAccumulator;
use crate::topology::Ring;

/// Final grid of a run plus the time spent in the measured update phase.
#[derive(Debug)]
pub struct Evolution {
    pub grid   : Grid,
    pub timing : TimingAccumulator,
}

struct WorkerReport {
    partition : Partition,
    timing    : Option<TimingAccumulator>,
}

/// Distributed model: one tokio task per row partition, ghost rows refreshed
/// over channels before every sweep. The returned timing is the
/// coordinator's (rank 0) exchange-plus-sweep time.
pub async fn run_distributed(initial: &Grid, workers: usize, iterations: usize) -> Result<Evolution> {
    let partitioner = Partitioner::new(initial.rows(), initial.columns(), workers)?;
    let ring = Ring::new(workers)?;
    info!(
        width = initial.columns(),
        height = initial.rows(),
        workers,
        iterations,
        "starting distributed run"
    );

    let mut handles = Vec::with_capacity(workers);
    for (context, links) in ring.contexts(&partitioner).zip(halo::wire(&ring)) {
        let partition = Partition::scatter(initial, context)?;
        handles.push(tokio::spawn(run_worker(partition, links, iterations)));
    }

    let mut grid = Grid::new(initial.rows(), initial.columns())?;
    let mut timing = TimingAccumulator::default();
    for handle in handles {
        let report = handle.await??;
        report.partition.gather_into(&mut grid);
        if let Some(coordinator) = report.timing {
            timing = coordinator;
        }
    }

    info!(elapsed_ms = timing.total_millis(), alive = grid.count_alive(), "distributed run finished");
    Ok(Evolution { grid, timing })
}

async fn run_worker(mut partition: Partition, mut links: HaloLinks, iterations: usize) -> Result<WorkerReport> {
    let mut timing = partition.context().is_coordinator().then(TimingAccumulator::default);

    for iteration in 0..iterations {
        let started = Instant::now();
        links.exchange(iteration, &mut partition).await?;
        partition.step();
        if let Some(timing) = timing.as_mut() {
            timing.record(started.elapsed());
        }
        partition.swap();
        debug!(rank = links.rank(), iteration, "iteration complete");
    }

    Ok(WorkerReport { partition, timing })
}

/// Shared-memory model: the whole grid stays resident and each generation
/// is one parallel sweep over `threads` disjoint row bands. Only the sweep
/// is timed; the swap happens after every band has joined.
pub fn run_shared(initial: Grid, threads: usize, iterations: usize) -> Result<Evolution> {
    let kernel = SharedKernel::new(initial.rows(), initial.columns(), threads)?;
    info!(
        width = initial.columns(),
        height = initial.rows(),
        threads,
        iterations,
        "starting shared-memory run"
    );

    let mut buffers = DoubleBuffer::new(initial)?;
    let mut timing = TimingAccumulator::default();
    for iteration in 0..iterations {
        let (current, next) = buffers.split();
        timing.measure(|| kernel.sweep(current, next));
        buffers.swap();
        debug!(iteration, "iteration complete");
    }

    let grid = buffers.into_current();
    info!(elapsed_ms = timing.total_millis(), alive = grid.count_alive(), "shared-memory run finished");
    Ok(Evolution { grid, timing })
}

/// Single-threaded reference evolution.
pub fn run_sequential(initial: Grid, iterations: usize) -> Result<Grid> {
    let mut buffers = DoubleBuffer::new(initial)?;
    for _ in 0..iterations {
        let (current, next) = buffers.split();
        kernel::sweep_toroidal(current, next);
        buffers.swap();
    }
    Ok(buffers.into_current())
}
