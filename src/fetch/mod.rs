// src/fetch/mod.rs
pub mod client;
pub mod dispatcher;
pub mod worker;

pub use client::{ConnectionPolicy, Fetcher, normalize_target};
pub use dispatcher::{DispatchSummary, Dispatcher};
pub use worker::{FetchWorker, WorkQueue};

use crate::source::TargetSource;
use std::sync::Arc;
use tokio::io::AsyncRead;
use tokio::sync::{Mutex, mpsc};

/// Queued targets per worker before the producer waits
const QUEUE_DEPTH_PER_WORKER: usize = 4;
const MAX_QUEUE_DEPTH: usize = 1024;

/// Work queue capacity for `concurrency` workers
pub fn queue_depth(concurrency: usize) -> usize {
    concurrency
        .saturating_mul(QUEUE_DEPTH_PER_WORKER)
        .clamp(1, MAX_QUEUE_DEPTH)
}

/// Run the whole pipeline: stream targets from `input` through `dispatcher`
pub async fn harvest<R>(input: R, dispatcher: Dispatcher) -> DispatchSummary
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (work_tx, work_rx) = mpsc::channel(queue_depth(dispatcher.concurrency()));

    let producer = TargetSource::new(input).spawn(work_tx);
    let summary = dispatcher.run(Arc::new(Mutex::new(work_rx))).await;

    if let Err(e) = producer.await {
        tracing::error!("Input task failed: {}", e);
    }

    summary
}
