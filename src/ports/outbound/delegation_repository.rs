use crate::resolution::domain::{Delegation, ResolutionId};
use crate::shared::Result;
use async_trait::async_trait;

/// DelegationRepository port for the directed delegation edges
///
/// Edges are keyed by their source. Lookups return vectors so that a store
/// whose one-outgoing-edge invariant has been broken can still be inspected.
#[async_trait]
pub trait DelegationRepository: Send {
    /// Outgoing edges of `source` (zero or one under the invariant)
    async fn delegations_by_source(&mut self, source: ResolutionId) -> Result<Vec<Delegation>>;

    /// Incoming edges of `target`
    async fn delegations_by_target(&mut self, target: ResolutionId) -> Result<Vec<Delegation>>;

    /// Inserts an edge
    ///
    /// # Errors
    /// Returns a persistence error if the source already has an outgoing edge.
    async fn insert_delegation(&mut self, delegation: &Delegation) -> Result<()>;

    async fn delete_delegations_by_source(&mut self, source: ResolutionId) -> Result<()>;

    async fn delete_delegations_by_target(&mut self, target: ResolutionId) -> Result<()>;
}
