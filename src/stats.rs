// src/stats.rs
//! Run statistics for cn-harvest

use crate::types::{FetchOutcome, SkipReason};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Thread-safe statistics collector shared by all workers
#[derive(Clone)]
pub struct StatsCollector {
    total_processed: Arc<AtomicU64>,
    found: Arc<AtomicU64>,
    skipped: Arc<AtomicU64>,
    timeouts: Arc<AtomicU64>,
    start_time: Instant,
}

/// Snapshot of statistics at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub total_processed: u64,
    pub found: u64,
    pub skipped: u64,
    pub timeouts: u64,
    pub elapsed_secs: u64,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self {
            total_processed: Arc::new(AtomicU64::new(0)),
            found: Arc::new(AtomicU64::new(0)),
            skipped: Arc::new(AtomicU64::new(0)),
            timeouts: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    /// Record the outcome of one target
    pub fn record(&self, outcome: &FetchOutcome) {
        self.total_processed.fetch_add(1, Ordering::Relaxed);
        match outcome {
            FetchOutcome::Found(_) => {
                self.found.fetch_add(1, Ordering::Relaxed);
            }
            FetchOutcome::Skipped(reason) => {
                self.skipped.fetch_add(1, Ordering::Relaxed);
                if *reason == SkipReason::Timeout {
                    self.timeouts.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_processed: self.total_processed.load(Ordering::Relaxed),
            found: self.found.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            elapsed_secs: self.start_time.elapsed().as_secs(),
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_stats(&self) -> String {
        let snapshot = self.snapshot();
        format!(
            "{} processed | {} found | {} skipped ({} timeouts) | {}s elapsed",
            snapshot.total_processed,
            snapshot.found,
            snapshot.skipped,
            snapshot.timeouts,
            snapshot.elapsed_secs
        )
    }
}

impl Default for StatsCollector {
    fn default() -> Self {
        Self::new()
    }
}
