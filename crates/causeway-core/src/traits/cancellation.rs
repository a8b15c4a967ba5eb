//! Round-boundary cancellation for adjacency searches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::errors::SearchError;

/// Shared stop flag for a running search.
///
/// Clones observe the same flag. The adjacency search polls it only after a
/// round has been applied, so a cancelled search reports the last complete
/// depth and never a partially pruned graph.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop at the next round boundary.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Called once round `depth` is complete.
    pub fn check_round(&self, depth: usize) -> Result<(), SearchError> {
        if self.is_cancelled() {
            info!(depth, "adjacency search cancelled");
            return Err(SearchError::Cancelled { depth });
        }
        Ok(())
    }
}
