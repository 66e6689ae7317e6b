// src/fetch/dispatcher.rs
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::client::Fetcher;
use super::worker::{FetchWorker, WorkQueue};
use crate::output::OutputHandler;
use crate::stats::{StatsCollector, StatsSnapshot};

/// Summary returned once every worker has exited
#[derive(Debug, Clone)]
pub struct DispatchSummary {
    pub workers_started: usize,
    pub workers_finished: usize,
    /// Targets handled by each worker, indexed by worker id
    pub per_worker: Vec<u64>,
    pub stats: StatsSnapshot,
}

/// Owns the worker pool lifecycle
pub struct Dispatcher {
    concurrency: usize,
    fetcher: Arc<Fetcher>,
    output: Arc<dyn OutputHandler>,
    stats: StatsCollector,
}

impl Dispatcher {
    /// `concurrency` is clamped to at least one worker
    pub fn new(concurrency: usize, fetcher: Arc<Fetcher>, output: Arc<dyn OutputHandler>) -> Self {
        Self {
            concurrency: concurrency.max(1),
            fetcher,
            output,
            stats: StatsCollector::new(),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Start the workers over `queue` and wait for all of them to finish
    pub async fn run(self, queue: WorkQueue) -> DispatchSummary {
        info!("Starting {} fetch workers", self.concurrency);

        let handles: Vec<JoinHandle<u64>> = (0..self.concurrency)
            .map(|id| {
                let worker = FetchWorker::new(
                    id,
                    Arc::clone(&queue),
                    Arc::clone(&self.fetcher),
                    Arc::clone(&self.output),
                    self.stats.clone(),
                );
                tokio::spawn(worker.run())
            })
            .collect();

        let workers_started = handles.len();
        let mut per_worker = Vec::with_capacity(workers_started);
        let mut workers_finished = 0;

        for result in futures_util::future::join_all(handles).await {
            workers_finished += 1;
            match result {
                Ok(handled) => per_worker.push(handled),
                Err(e) => {
                    error!("Worker task failed: {}", e);
                    per_worker.push(0);
                }
            }
        }

        if let Err(e) = self.output.flush().await {
            error!("Failed to flush output: {:?}", e);
        }

        debug!("All workers stopped: {}", self.stats.format_stats());

        DispatchSummary {
            workers_started,
            workers_finished,
            per_worker,
            stats: self.stats.snapshot(),
        }
    }
}
