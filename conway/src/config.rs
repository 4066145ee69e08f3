// config.rs - Run configuration and defaults

use crate::error::{LifeError, Result};

pub const DEFAULT_WIDTH: usize = 20;
pub const DEFAULT_HEIGHT: usize = 20;
pub const DEFAULT_ITERATIONS: usize = 20;
pub const DEFAULT_THREADS: usize = 2;

/// Which execution model a configuration is for. The two models treat the
/// requested worker count differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Model {
    Distributed,
    SharedMemory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub model      : Model,
    pub width      : usize,
    pub height     : usize,
    pub workers    : usize,
    pub iterations : usize,
    /// Logical node count recorded alongside distributed results.
    pub nodes      : Option<usize>,
}

/// Keeps the default unless the requested value is strictly larger.
fn at_least_default(requested: usize, default: usize) -> usize {
    if requested > default { requested } else { default }
}

impl RunConfig {
    /// Builds a configuration from the three positional values.
    ///
    /// Width and height replace their defaults only when larger. The shared
    /// memory thread count follows the same rule; a distributed worker count
    /// is taken as given.
    pub fn resolve(model: Model, width: usize, height: usize, workers: usize) -> Self {
        let workers = match model {
            Model::Distributed  => workers,
            Model::SharedMemory => at_least_default(workers, DEFAULT_THREADS),
        };
        Self {
            model,
            width      : at_least_default(width, DEFAULT_WIDTH),
            height     : at_least_default(height, DEFAULT_HEIGHT),
            workers,
            iterations : DEFAULT_ITERATIONS,
            nodes      : None,
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_nodes(mut self, nodes: usize) -> Self {
        self.nodes = Some(nodes);
        self
    }

    /// Rejects configurations that cannot be partitioned, before any grid is
    /// allocated. Shared-memory threads beyond the grid height are allowed
    /// and sit idle; distributed workers beyond it are an error.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LifeError::InvalidDimensions { rows: self.height, columns: self.width });
        }
        if self.workers == 0 {
            return Err(LifeError::NoWorkers);
        }
        if self.model == Model::Distributed && self.workers > self.height {
            return Err(LifeError::TooManyWorkers { workers: self.workers, height: self.height });
        }
        Ok(())
    }
}
