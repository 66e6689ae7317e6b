// src/source.rs
//! Target source: streams newline-delimited targets into the work queue

use crate::types::Target;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Boxed line-oriented input (file or stdin)
pub type TargetInput = Box<dyn AsyncRead + Unpin + Send>;

/// Open the input named by `path`, or stdin when `path` is `None`
pub async fn open_input(path: Option<&str>) -> Result<TargetInput> {
    match path {
        Some(p) => {
            let file = tokio::fs::File::open(Path::new(p))
                .await
                .with_context(|| format!("unable to open input file {}", p))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(tokio::io::stdin())),
    }
}

/// Produces targets from a reader until end of stream
pub struct TargetSource<R> {
    reader: R,
}

impl<R: AsyncRead + Unpin + Send + 'static> TargetSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Send every line to `work_tx`, returning the number of targets sent
    ///
    /// Lines are trimmed; empty lines are passed through. A read error ends
    /// the stream after being reported. Dropping `work_tx` on return closes
    /// the queue, and the reader is dropped with `self`.
    pub async fn run(self, work_tx: mpsc::Sender<Target>) -> u64 {
        let mut lines = BufReader::new(self.reader).lines();
        let mut sent = 0u64;

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if work_tx.send(line.trim().to_string()).await.is_err() {
                        debug!("All workers gone, stopping input after {} targets", sent);
                        break;
                    }
                    sent += 1;
                }
                Ok(None) => break,
                Err(e) => {
                    error!("error while scanning input: {}", e);
                    break;
                }
            }
        }

        debug!("Input exhausted: {} targets queued", sent);
        sent
    }

    /// Run the source on its own task
    pub fn spawn(self, work_tx: mpsc::Sender<Target>) -> JoinHandle<u64> {
        tokio::spawn(self.run(work_tx))
    }
}
