//! Catalog admin API module
//!
//! The bulk-delete workflow only needs one thing from the admin app: a way to
//! delete every product matching a vendor goods code. [`DeleteByKey`] is that
//! seam; [`CatalogClient`] implements it over HTTP.

pub mod client;
pub mod operations;
pub mod resilience;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::OwnedSemaphorePermit;

use crate::sheet::Identifier;

pub use client::{CatalogClient, DEFAULT_DELETE_PATH};
pub use operations::{DeleteRequest, DeleteResponse, ResponseBody};
pub use resilience::{ConcurrencyConfig, ConcurrencyLimiter, ResilienceConfig, TimeoutConfig};

/// Capacity held for one delete; dropping it frees the slot.
/// `None` when the collaborator has no cap of its own.
pub type DeleteSlot = Option<OwnedSemaphorePermit>;

/// Delete-by-key collaborator.
///
/// `Ok` carries every answer the server gave, including "not found" and
/// server faults. `Err` is reserved for transport-level failures where no
/// answer arrived.
///
/// Callers hold a slot from [`reserve`](Self::reserve) while calling
/// [`delete`](Self::delete), so time spent queueing for capacity is kept
/// apart from the call itself.
#[async_trait]
pub trait DeleteByKey: Send + Sync {
    /// Wait until another delete may be issued
    async fn reserve(&self) -> Result<DeleteSlot> {
        Ok(None)
    }

    async fn delete(&self, identifier: &Identifier) -> Result<DeleteResponse>;
}

#[async_trait]
impl<T: DeleteByKey + ?Sized> DeleteByKey for std::sync::Arc<T> {
    async fn reserve(&self) -> Result<DeleteSlot> {
        (**self).reserve().await
    }

    async fn delete(&self, identifier: &Identifier) -> Result<DeleteResponse> {
        (**self).delete(identifier).await
    }
}
