// main.rs - Shared-memory Conway's Game of Life with scoped row-band threads

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use conway::config::{Model, RunConfig, DEFAULT_ITERATIONS};
use conway::driver::run_shared;
use conway::logging::init_tracing;
use conway::patterns;
use conway::results::RunRecord;
use conway::Grid;

/// Time a toroidal Game of Life swept in parallel over one shared grid.
#[derive(Parser, Debug)]
#[command(name = "conway_threads")]
struct Args {
    /// Grid width; used only if larger than the default of 20.
    width: usize,

    /// Grid height; used only if larger than the default of 20.
    height: usize,

    /// Thread count; used only if larger than the default of 2.
    threads: usize,

    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Seed for the random initial soup.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Start from a named pattern (glider, blinker, toad, beacon) instead of a soup.
    #[arg(long)]
    pattern: Option<String>,

    #[arg(long, default_value = "threads-results.csv")]
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
    RunConfig::resolve(Model::SharedMemory, args.width, args.height, args.threads)
        .with_iterations(args.iterations)
}

fn main() -> Result<()> {
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
    println!("Number of active cells at the beginning of the execution: {}", grid.count_alive());

    let evolution = run_shared(grid, config.workers, config.iterations)?;

    let record = RunRecord {
        width      : config.width,
        height     : config.height,
        workers    : config.workers,
        nodes      : None,
        elapsed_ms : evolution.timing.total_millis(),
    };
    record.append(&args.output)?;
    info!(output = %args.output.display(), %record, "results written");

    println!("Number of active cells at the end of the execution: {}", evolution.grid.count_alive());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_argument_is_not_a_run() {
        assert!(parse_args(["conway_threads", "20", "20"]).is_none());
        assert!(Args::try_parse_from(["conway_threads", "20", "20"]).is_err());
    }

    #[test]
    fn test_non_numeric_value_is_not_a_run() {
        assert!(parse_args(["conway_threads", "20", "20", "many"]).is_none());
        assert!(parse_args(["conway_threads", "20", "20", "4", "extra"]).is_none());
    }

    #[test]
    fn test_small_values_keep_defaults() {
        let args = parse_args(["conway_threads", "5", "5", "1"]).unwrap();
        let config = run_config(&args);
        assert_eq!((config.width, config.height, config.workers), (20, 20, 2));
        assert_eq!(config.nodes, None);
    }

    #[test]
    fn test_larger_thread_count_overrides_default() {
        let args = parse_args(["conway_threads", "30", "40", "8", "--iterations", "3"]).unwrap();
        let config = run_config(&args);
        assert_eq!((config.width, config.height, config.workers), (30, 40, 8));
        assert_eq!(config.iterations, 3);
        assert_eq!(args.output, PathBuf::from("threads-results.csv"));
    }
}
