// main.rs - Distributed Conway's Game of Life with partition coroutines
//
// Each row partition runs as its own tokio task and trades boundary rows
// with its ring neighbours over channels before every generation.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use conway::config::{Model, RunConfig, DEFAULT_ITERATIONS};
use conway::driver::run_distributed;
use conway::logging::init_tracing;
use conway::patterns;
use conway::results::RunRecord;
use conway::Grid;

/// Time a toroidal Game of Life split into row partitions that exchange halo rows.
#[derive(Parser, Debug)]
#[command(name = "conway_coro")]
struct Args {
    /// Grid width; used only if larger than the default of 20.
    width: usize,

    /// Grid height; used only if larger than the default of 20.
    height: usize,

    /// Number of partition workers (at most the grid height).
    workers: usize,

    /// Logical node count recorded in the results file.
    #[arg(long, default_value_t = 1)]
    nodes: usize,

    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Seed for the random initial soup.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Start from a named pattern (glider, blinker, toad, beacon) instead of a soup.
    #[arg(long)]
    pattern: Option<String>,

    #[arg(long, default_value = "coro-results.csv")]
    output: PathBuf,
}

/// Parses the command line. A bad command line is reported on the terminal
/// but is not a failed run: the caller returns without doing any work.
fn parse_args<I, T>(args: I) -> Option<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(args) {
        Ok(args) => Some(args),
        Err(error) => {
            let _ = error.print();
            None
        }
    }
}

fn run_config(args: &Args) -> RunConfig {
    RunConfig::resolve(Model::Distributed, args.width, args.height, args.workers)
        .with_iterations(args.iterations)
        .with_nodes(args.nodes)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info");

    let Some(args) = parse_args(std::env::args_os()) else {
        return Ok(());
    };

    let config = run_config(&args);
    config.validate()?;

    let mut grid = Grid::new(config.height, config.width)?;
    match args.pattern.as_deref() {
        Some(name) => patterns::apply_pattern(&mut grid, patterns::require(name)?, (0, 0)),
        None => patterns::apply_random_pattern(&mut grid, args.seed),
    }
    info!(alive = grid.count_alive(), "initial state");

    let evolution = run_distributed(&grid, config.workers, config.iterations).await?;
    info!(alive = evolution.grid.count_alive(), "final state");

    let record = RunRecord {
        width      : config.width,
        height     : config.height,
        workers    : config.workers,
        nodes      : config.nodes,
        elapsed_ms : evolution.timing.total_millis(),
    };
    record.append(&args.output)?;
    info!(output = %args.output.display(), %record, "results written");

    Ok(())
}
