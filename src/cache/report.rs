//! Completion reporting for resolution batches.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::error::Result;

/// Outcome of one `init` batch.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionReport {
    /// Sequence number of the `init` call, starting at 1.
    pub generation: u64,
    /// Language the batch was resolved for.
    pub language: String,
    /// Number of tokens the loader resolved.
    pub resolved: usize,
    /// Tokens the loader could not resolve, in identifier order.
    pub unresolved: Vec<String>,
    /// Whether the batch was dropped because a newer `init` superseded it.
    pub discarded: bool,
    /// When the batch finished.
    pub completed_at: DateTime<Utc>,
}

/// Handle to an in-flight `init` batch.
///
/// Dropping the handle does not cancel resolution.
#[derive(Debug)]
pub struct InitHandle {
    task: JoinHandle<ResolutionReport>,
}

impl InitHandle {
    pub(super) const fn new(task: JoinHandle<ResolutionReport>) -> Self {
        Self { task }
    }

    /// Wait for the batch to be applied.
    ///
    /// Fails only if the completion callback panicked. The batch has been
    /// applied and its report broadcast by then.
    pub async fn wait(self) -> Result<ResolutionReport> {
        Ok(self.task.await?)
    }
}
