// results.rs - One CSV line per run, appended to a results file

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunRecord {
    pub width      : usize,
    pub height     : usize,
    pub workers    : usize,
    /// Logical node count; only the distributed model records one.
    pub nodes      : Option<usize>,
    pub elapsed_ms : f64,
}

impl fmt::Display for RunRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.width, self.height, self.workers)?;
        if let Some(nodes) = self.nodes {
            write!(f, ",{nodes}")?;
        }
        write!(f, ",{:.6}", self.elapsed_ms)
    }
}

impl RunRecord {
    /// Appends this record as one line, creating the file if needed. The
    /// file is flushed and closed before returning.
    pub fn append(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{self}")?;
        file.flush()?;
        debug!(path = %path.display(), record = %self, "results appended");
        Ok(())
    }
}
