// lib.rs - Toroidal Game of Life with two parallel execution models
//
// Distributed: the grid is split into row partitions, one tokio task each,
// and neighbouring partitions swap boundary rows over channels every
// generation. Shared memory: one resident grid, swept by scoped threads over
// disjoint row bands. Both produce bit-identical generations.

pub mod config;
pub mod driver;
pub mod error;
pub mod grid;
pub mod halo;
pub mod kernel;
pub mod logging;
pub mod partition;
pub mod patterns;
pub mod results;
pub mod shared;
pub mod timing;
pub mod topology;

pub use error::{LifeError, Result};
pub use grid::{Cell, DoubleBuffer, Grid};
