//! Load-factor sweeps: run a fresh table for every (strategy, threshold)
//! pair over the same key sequence, time the insertions and hand each result
//! to a [`ReportSink`]. The table itself keeps no experiment state.

use crate::config::validate_threshold;
use crate::error::{Result, TableError};
use crate::hashing::HashKind;
use crate::table::OpenAddressingHashSet;
use rand::Rng;
use std::time::{Duration, Instant};

/// Thresholds swept by default.
pub const DEFAULT_THRESHOLDS: [f64; 7] = [0.5, 0.6, 0.7, 0.8, 0.9, 0.95, 0.99];

#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentConfig {
    pub thresholds: Vec<f64>,
    pub hashes: Vec<HashKind>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
            hashes: HashKind::ALL.to_vec(),
        }
    }
}

impl ExperimentConfig {
    pub fn new(thresholds: Vec<f64>, hashes: Vec<HashKind>) -> Self {
        Self { thresholds, hashes }
    }

    /// Number of runs the sweep will perform.
    pub fn runs(&self) -> usize {
        self.thresholds.len() * self.hashes.len()
    }

    pub fn validate(&self) -> Result<()> {
        if self.runs() == 0 {
            return Err(TableError::invalid_config(
                "experiment needs at least one threshold and one hash strategy",
            ));
        }
        self.thresholds
            .iter()
            .try_for_each(|&t| validate_threshold(t))
    }
}

/// Outcome of inserting the whole key sequence into one table.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub threshold: f64,
    pub hash: HashKind,
    pub elapsed: Duration,
    pub len: usize,
    pub capacity: usize,
    pub resize_count: usize,
    pub collision_count: u64,
    pub total_collisions: u64,
}

/// Receives one report per run.
pub trait ReportSink {
    fn record(&mut self, report: &RunReport);
}

impl ReportSink for Vec<RunReport> {
    fn record(&mut self, report: &RunReport) {
        self.push(report.clone());
    }
}

impl<F> ReportSink for F
where
    F: FnMut(&RunReport),
{
    fn record(&mut self, report: &RunReport) {
        self(report)
    }
}

/// Logs each report at `info` level.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn record(&mut self, r: &RunReport) {
        log::info!(
            "hash={} load_factor={:.2} time={:.4}s resizes={} collisions={} total_collisions={} len={} capacity={}",
            r.hash,
            r.threshold,
            r.elapsed.as_secs_f64(),
            r.resize_count,
            r.collision_count,
            r.total_collisions,
            r.len,
            r.capacity
        );
    }
}

/// Insert all of `keys` into a fresh table and report the result.
pub fn run_once(threshold: f64, hash: HashKind, keys: &[i64]) -> Result<RunReport> {
    let mut table = OpenAddressingHashSet::new(threshold, hash)?;
    let start = Instant::now();
    for &key in keys {
        table.insert(key)?;
    }
    let elapsed = start.elapsed();
    let stats = table.stats();
    Ok(RunReport {
        threshold,
        hash,
        elapsed,
        len: stats.len,
        capacity: stats.capacity,
        resize_count: stats.resize_count,
        collision_count: stats.collision_count,
        total_collisions: stats.total_collisions,
    })
}

/// Sweep every strategy (outer loop) over every threshold (inner loop).
/// Returns the number of runs recorded.
pub fn run_experiment<S>(config: &ExperimentConfig, keys: &[i64], sink: &mut S) -> Result<usize>
where
    S: ReportSink + ?Sized,
{
    config.validate()?;
    log::debug!(
        "running {} configurations over {} keys",
        config.runs(),
        keys.len()
    );
    let mut runs = 0;
    for &hash in &config.hashes {
        for &threshold in &config.thresholds {
            let report = run_once(threshold, hash, keys)?;
            sink.record(&report);
            runs += 1;
        }
    }
    Ok(runs)
}

/// `0..n`, the key sequence of the pure resize-cost sweep.
pub fn sequential_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

/// `n` keys drawn uniformly from `lo..=hi`. Duplicates are possible.
pub fn random_keys<R: Rng + ?Sized>(n: usize, lo: i64, hi: i64, rng: &mut R) -> Vec<i64> {
    (0..n).map(|_| rng.gen_range(lo..=hi)).collect()
}
