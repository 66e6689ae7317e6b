//! Output handling abstraction for cn-harvest
//!
//! Workers emit results concurrently, so handlers must write whole lines
//! atomically.

use crate::types::FetchResult;
use async_trait::async_trait;

pub mod plain;

pub use plain::PlainOutput;

/// Trait for output handlers that receive harvested common names
#[async_trait]
pub trait OutputHandler: Send + Sync {
    /// Emit a single harvested result
    async fn emit(&self, result: &FetchResult) -> anyhow::Result<()>;

    /// Flush any buffered output
    async fn flush(&self) -> anyhow::Result<()>;
}
