// src/fetch/worker.rs
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{trace, warn};

use super::client::Fetcher;
use crate::output::OutputHandler;
use crate::stats::StatsCollector;
use crate::types::{FetchOutcome, Target};

/// Receiving half of the work queue, shared by all workers
pub type WorkQueue = Arc<Mutex<mpsc::Receiver<Target>>>;

/// Consumes targets from the shared queue until it is closed and drained
pub struct FetchWorker {
    id: usize,
    queue: WorkQueue,
    fetcher: Arc<Fetcher>,
    output: Arc<dyn OutputHandler>,
    stats: StatsCollector,
}

impl FetchWorker {
    pub fn new(
        id: usize,
        queue: WorkQueue,
        fetcher: Arc<Fetcher>,
        output: Arc<dyn OutputHandler>,
        stats: StatsCollector,
    ) -> Self {
        Self {
            id,
            queue,
            fetcher,
            output,
            stats,
        }
    }

    /// Main loop, returns the number of targets this worker handled
    pub async fn run(self) -> u64 {
        let mut handled = 0u64;

        while let Some(target) = self.next_target().await {
            handled += 1;
            let outcome = self.fetcher.fetch(&target).await;
            self.stats.record(&outcome);

            match outcome {
                FetchOutcome::Found(result) => {
                    if let Err(e) = self.output.emit(&result).await {
                        warn!("Output error: {:?}", e);
                    }
                }
                FetchOutcome::Skipped(reason) => {
                    trace!("worker {} skipped {:?}: {}", self.id, target, reason);
                }
            }
        }

        trace!("worker {} exiting after {} targets", self.id, handled);
        handled
    }

    /// Take the next target; the lock is held only while waiting on the queue
    async fn next_target(&self) -> Option<Target> {
        self.queue.lock().await.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::ConnectionPolicy;
    use crate::output::PlainOutput;
    use std::time::Duration;

    #[tokio::test]
    async fn test_worker_drains_queue_and_exits() {
        let (tx, rx) = mpsc::channel(8);
        for t in ["", "bad host", "https://"] {
            tx.send(t.to_string()).await.unwrap();
        }
        drop(tx);

        let policy = ConnectionPolicy {
            timeout: Some(Duration::from_secs(1)),
            follow_redirects: false,
        };
        let stats = StatsCollector::new();
        let worker = FetchWorker::new(
            0,
            Arc::new(Mutex::new(rx)),
            Arc::new(Fetcher::new(&policy).unwrap()),
            Arc::new(PlainOutput::to_writer(std::io::sink(), false)),
            stats.clone(),
        );

        assert_eq!(worker.run().await, 3);
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.skipped, 3);
        assert_eq!(snapshot.found, 0);
    }
}
