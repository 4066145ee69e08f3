// timing.rs - Accumulated wall-clock time of the measured update phase

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimingAccumulator {
    total : Duration,
    laps  : usize,
}

impl TimingAccumulator {
    pub fn record(&mut self, lap: Duration) {
        self.total += lap;
        self.laps += 1;
    }

    /// Runs `work`, adding its duration to the total.
    pub fn measure<T>(&mut self, work: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let result = work();
        self.record(started.elapsed());
        result
    }

    pub fn total(&self) -> Duration { self.total }
    pub fn laps(&self) -> usize { self.laps }

    pub fn total_millis(&self) -> f64 {
        self.total.as_secs_f64() * 1000.0
    }
}
