use super::{DelegationRepository, ResolutionRepository};
use crate::shared::Result;
use async_trait::async_trait;

/// Unit of work spanning one lifecycle operation
///
/// Writes made through the handle become visible to other callers only on
/// [`commit`](StoreTransaction::commit). Dropping the handle without
/// committing discards them.
#[async_trait]
pub trait StoreTransaction: ResolutionRepository + DelegationRepository + Send {
    /// Publishes every write made through this handle atomically
    async fn commit(self) -> Result<()>;

    /// Discards every write made through this handle
    async fn rollback(self) -> Result<()>;
}

/// TransactionalStore port: durable resolution and delegation storage
///
/// # Concurrency
/// The store is shared between callers; isolation between concurrent
/// transactions is the store's responsibility.
///
/// # Ownership
/// Hand the store to a `ManageResolutionsUseCase` and write only through it.
/// A transaction opened elsewhere can insert or delete edges and statuses
/// without propagation, leaving delegators out of sync with their roots.
#[async_trait]
pub trait TransactionalStore: Send + Sync {
    type Transaction: StoreTransaction;

    async fn begin(&self) -> Result<Self::Transaction>;
}
