// halo.rs - Boundary-row exchange between ring neighbours
//
// Every worker owns two inbound channels: one carrying its predecessor's
// last interior row (lands in the top ghost row) and one carrying its
// successor's first interior row (lands in the bottom ghost row). Because
// the destination is fixed by the channel, receive order cannot swap the
// ghost rows.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::trace;

use crate::error::{LifeError, Result};
use crate::grid::Cell;
use crate::partition::Partition;
use crate::topology::Ring;

/// One boundary row, tagged with the iteration that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HaloRow {
    pub iteration : usize,
    pub cells     : Box<[Cell]>,
}

/// A worker's ends of the four halo channels it takes part in.
#[derive(Debug)]
pub struct HaloLinks {
    rank             : usize,
    predecessor      : usize,
    successor        : usize,
    to_predecessor   : UnboundedSender<HaloRow>,
    to_successor     : UnboundedSender<HaloRow>,
    from_predecessor : UnboundedReceiver<HaloRow>,
    from_successor   : UnboundedReceiver<HaloRow>,
}

/// Builds the channel mesh for `ring`; entry `r` belongs to worker `r`.
/// With a single worker both links loop back to the worker itself.
pub fn wire(ring: &Ring) -> Vec<HaloLinks> {
    let workers = ring.workers();
    let (above_tx, above_rx): (Vec<_>, Vec<_>) =
        (0..workers).map(|_| mpsc::unbounded_channel::<HaloRow>()).unzip();
    let (below_tx, below_rx): (Vec<_>, Vec<_>) =
        (0..workers).map(|_| mpsc::unbounded_channel::<HaloRow>()).unzip();

    above_rx
        .into_iter()
        .zip(below_rx)
        .enumerate()
        .map(|(rank, (from_predecessor, from_successor))| {
            let predecessor = ring.predecessor(rank);
            let successor = ring.successor(rank);
            HaloLinks {
                rank,
                predecessor,
                successor,
                // Our first row is the predecessor's bottom ghost.
                to_predecessor: below_tx[predecessor].clone(),
                // Our last row is the successor's top ghost.
                to_successor: above_tx[successor].clone(),
                from_predecessor,
                from_successor,
            }
        })
        .collect()
}

impl HaloLinks {
    pub fn rank(&self) -> usize { self.rank }

    /// Refreshes both ghost rows of `partition` for `iteration`.
    ///
    /// Both sends are posted before either receive is awaited. Sends on an
    /// unbounded channel complete immediately, so no worker can block on a
    /// send and the ring cannot deadlock. The receives are then awaited
    /// together.
    pub async fn exchange(&mut self, iteration: usize, partition: &mut Partition) -> Result<()> {
        let first = HaloRow { iteration, cells: partition.first_interior_row().into() };
        let last = HaloRow { iteration, cells: partition.last_interior_row().into() };

        self.to_predecessor
            .send(first)
            .map_err(|_| self.hung_up(self.predecessor))?;
        self.to_successor
            .send(last)
            .map_err(|_| self.hung_up(self.successor))?;

        let (above, below) = tokio::join!(self.from_predecessor.recv(), self.from_successor.recv());
        let above = above.ok_or_else(|| self.hung_up(self.predecessor))?;
        let below = below.ok_or_else(|| self.hung_up(self.successor))?;

        self.check_iteration(iteration, &above)?;
        self.check_iteration(iteration, &below)?;
        partition.set_top_ghost(&above.cells)?;
        partition.set_bottom_ghost(&below.cells)?;

        trace!(rank = self.rank, iteration, "halo rows exchanged");
        Ok(())
    }

    fn check_iteration(&self, expected: usize, row: &HaloRow) -> Result<()> {
        if row.iteration != expected {
            return Err(LifeError::HaloOutOfStep { rank: self.rank, expected, received: row.iteration });
        }
        Ok(())
    }

    fn hung_up(&self, neighbour: usize) -> LifeError {
        LifeError::NeighbourHungUp { rank: self.rank, neighbour }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::partition::Partitioner;

    fn striped(height: usize, width: usize) -> Grid {
        // Row r has exactly its first (r % width) + 1 cells alive, so every
        // row is distinguishable.
        let mut grid = Grid::new(height, width).unwrap();
        for row in 0..height {
            for col in 0..=(row % width) {
                grid.set(row, col, true);
            }
        }
        grid
    }

    async fn exchange_all(global: &Grid, workers: usize) -> Vec<Partition> {
        let partitioner = Partitioner::new(global.rows(), global.columns(), workers).unwrap();
        let ring = Ring::new(workers).unwrap();
        let links = wire(&ring);

        let mut handles = Vec::new();
        for (context, mut link) in ring.contexts(&partitioner).zip(links) {
            let mut partition = Partition::scatter(global, context).unwrap();
            handles.push(tokio::spawn(async move {
                link.exchange(0, &mut partition).await.unwrap();
                partition
            }));
        }

        let mut partitions = Vec::new();
        for handle in handles {
            partitions.push(handle.await.unwrap());
        }
        partitions
    }

    #[tokio::test]
    async fn test_ghost_rows_follow_global_wraparound() {
        let height = 11;
        let global = striped(height, 6);

        for workers in 1..=4 {
            for partition in exchange_all(&global, workers).await {
                let span = partition.context().span;
                let above = (span.first_row + height - 1) % height;
                let below = span.end() % height;
                let local = partition.local();
                assert_eq!(local.row(0), global.row(above), "top ghost, {workers} workers");
                assert_eq!(local.row(local.rows() - 1), global.row(below), "bottom ghost, {workers} workers");
            }
        }
    }

    #[tokio::test]
    async fn test_single_worker_exchanges_with_itself() {
        let global = striped(4, 4);
        let partitions = exchange_all(&global, 1).await;
        let local = partitions[0].local();
        assert_eq!(local.row(0), global.row(3));
        assert_eq!(local.row(5), global.row(0));
    }

    #[tokio::test]
    async fn test_departed_neighbour_is_reported() {
        let global = striped(4, 3);
        let partitioner = Partitioner::new(4, 3, 2).unwrap();
        let ring = Ring::new(2).unwrap();
        let mut links = wire(&ring);
        drop(links.pop());

        let mut link = links.pop().unwrap();
        let mut partition = Partition::scatter(&global, ring.context(0, &partitioner)).unwrap();
        let result = link.exchange(0, &mut partition).await;
        assert!(matches!(result, Err(LifeError::NeighbourHungUp { rank: 0, neighbour: 1 })));
    }

    #[tokio::test]
    async fn test_stale_row_is_rejected() {
        let global = striped(3, 3);
        let partitioner = Partitioner::new(3, 3, 1).unwrap();
        let ring = Ring::new(1).unwrap();
        let mut link = wire(&ring).pop().unwrap();
        let mut partition = Partition::scatter(&global, ring.context(0, &partitioner)).unwrap();

        // A leftover row from an earlier iteration sits in the queue.
        link.to_successor
            .send(HaloRow { iteration: 4, cells: vec![false; 3].into() })
            .unwrap();
        let result = link.exchange(5, &mut partition).await;
        assert!(matches!(result, Err(LifeError::HaloOutOfStep { expected: 5, received: 4, .. })));
    }
}
