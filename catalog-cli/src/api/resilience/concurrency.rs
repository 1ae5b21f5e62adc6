//! Per-client cap on open delete requests

use anyhow::{Context, Result};
use log::debug;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Hands out one permit per open request; clones share the same cap
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    permits: usize,
}

impl ConcurrencyLimiter {
    /// A cap of 0 is treated as 1
    pub fn new(max_concurrent_requests: usize) -> Self {
        let permits = max_concurrent_requests.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            semaphore: Arc::new(Semaphore::new(permits)),
            permits,
        }
    }

    /// Wait for a free slot. The slot is released when the permit is dropped.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit> {
        if self.semaphore.available_permits() == 0 {
            debug!("All {} request slots busy, waiting", self.permits);
        }

        self.semaphore
            .clone()
            .acquire_owned()
            .await
            .context("Request limiter closed")
    }
}
