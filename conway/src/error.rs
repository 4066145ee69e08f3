// error.rs - Failure modes of a Game of Life run

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifeError {
    #[error("Invalid grid dimensions: {rows}x{columns} (both must be at least 1)")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("Out of memory allocating a grid of {cells} cells")]
    Allocation { cells: usize },

    #[error("Worker count must be at least 1")]
    NoWorkers,

    #[error("Worker count {workers} exceeds grid height {height}")]
    TooManyWorkers { workers: usize, height: usize },

    #[error("Worker {rank} lost its halo link to neighbour {neighbour}")]
    NeighbourHungUp { rank: usize, neighbour: usize },

    #[error("Worker {rank} received a halo row for iteration {received}, expected {expected}")]
    HaloOutOfStep {
        rank: usize,
        expected: usize,
        received: usize,
    },

    #[error("Halo row has {received} cells, partition is {expected} columns wide")]
    HaloWidthMismatch { expected: usize, received: usize },

    #[error("Worker task failed: {0}")]
    WorkerJoin(#[from] tokio::task::JoinError),

    #[error("Results file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown pattern: {0}")]
    UnknownPattern(String),
}

pub type Result<T> = std::result::Result<T, LifeError>;
