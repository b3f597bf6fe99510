use crate::application::dto::{CreateResolutionRequest, UpdateResolutionRequest};
use crate::application::read_models::DelegationChainView;
use crate::ports::inbound::ResolutionLifecyclePort;
use crate::ports::outbound::{
    DelegationRepository, ResolutionRepository, StoreTransaction, TransactionalStore,
};
use crate::resolution::domain::{
    ComponentId, Delegation, Resolution, ResolutionId, ResolutionStatus,
    ResolutionWithDelegation, ThreatAssignmentId,
};
use crate::resolution::services::{PropagationOutcome, RootResolver, UpstreamPropagator};
use crate::shared::error::ResolutionError;
use crate::shared::Result;
use async_trait::async_trait;


/// ManageResolutionsUseCase - Lifecycle manager for resolutions and delegations
///
/// Every public operation opens exactly one store transaction, runs all reads,
/// writes and graph walks through it, and commits only if everything
/// succeeded. Any error rolls the transaction back and is returned unchanged,
/// so partial propagation is never visible to other callers.
///
/// # Type Parameters
/// * `S` - TransactionalStore implementation
pub struct ManageResolutionsUseCase<S> {
    store: S,
}

impl<S> ManageResolutionsUseCase<S>
where
    S: TransactionalStore,
{
    /// Creates a new ManageResolutionsUseCase with the injected store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// Creates a resolution with no outgoing delegation
    ///
    /// No propagation happens: nothing can delegate into a resolution that
    /// did not exist a moment ago.
    pub async fn create_resolution(&self, request: CreateResolutionRequest) -> Result<Resolution> {
        let resolution = Resolution::new(
            request.threat_assignment_id,
            request.component_id,
            request.status,
            request.description,
        )?;

        let mut tx = self.store.begin().await?;
        let outcome = Self::insert_new(&mut tx, &resolution).await;
        Self::finish(tx, outcome, "create").await?;

        tracing::info!(
            resolution = %resolution.id(),
            threat_assignment = %resolution.threat_assignment_id(),
            component = %resolution.component_id(),
            status = %resolution.status(),
            "created resolution"
        );
        Ok(resolution)
    }

    /// Applies a direct update
    ///
    /// The resolution becomes authoritative for itself: its outgoing
    /// delegation is removed and its status is pushed to every resolution
    /// that delegates into it, directly or transitively.
    pub async fn update_resolution(&self, request: UpdateResolutionRequest) -> Result<Resolution> {
        let mut tx = self.store.begin().await?;
        let outcome = Self::apply_update(&mut tx, request).await;
        Self::finish(tx, outcome, "update").await
    }

    /// Makes `source` follow `target`
    ///
    /// Any previous delegation of `source` is replaced. After wiring the
    /// edge, every resolution delegating into the root of `target`'s chain
    /// takes `target`'s current status. A cycle aborts the operation and
    /// leaves the store untouched.
    pub async fn delegate_resolution(&self, source: ResolutionId, target: ResolutionId) -> Result<()> {
        let mut tx = self.store.begin().await?;
        let outcome = Self::apply_delegation(&mut tx, source, target).await;
        let propagation = Self::finish(tx, outcome, "delegate").await?;

        tracing::info!(
            delegated_by = %source,
            delegated_to = %target,
            updated = propagation.updated_count(),
            "delegated resolution"
        );
        Ok(())
    }

    /// Deletes a resolution
    ///
    /// Delegators revert to `Awaiting` and every edge touching the resolution
    /// is removed before the record itself. Deleting an unknown id is a no-op.
    pub async fn delete_resolution(&self, id: ResolutionId) -> Result<()> {
        let mut tx = self.store.begin().await?;
        let outcome = Self::apply_delete(&mut tx, id).await;
        let deleted = Self::finish(tx, outcome, "delete").await?;

        if deleted {
            tracing::info!(resolution = %id, "deleted resolution");
        } else {
            tracing::debug!(resolution = %id, "delete of unknown resolution ignored");
        }
        Ok(())
    }

    pub async fn get_resolution(&self, id: ResolutionId) -> Result<Resolution> {
        let mut tx = self.store.begin().await?;
        let outcome = tx.get_resolution(id).await;
        Self::finish_read(tx, outcome).await
    }

    /// Returns the terminal resolution of `id`'s delegation chain
    pub async fn find_resolution_root(&self, id: ResolutionId) -> Result<Resolution> {
        let mut tx = self.store.begin().await?;
        let outcome = match tx.get_resolution(id).await {
            Ok(start) => RootResolver::find_root(&mut tx, start).await,
            Err(e) => Err(e),
        };
        Self::finish_read(tx, outcome).await
    }

    /// Describes the chain from `id` to its root
    pub async fn describe_chain(&self, id: ResolutionId) -> Result<DelegationChainView> {
        let mut tx = self.store.begin().await?;
        let outcome = match tx.get_resolution(id).await {
            Ok(start) => RootResolver::resolve_path(&mut tx, start).await,
            Err(e) => Err(e),
        };
        Self::finish_read(tx, outcome)
            .await
            .map(DelegationChainView::from_path)
    }

    /// Resolution judged by `component_id` for one threat assignment, if any
    pub async fn get_component_resolution(
        &self,
        threat_assignment_id: ThreatAssignmentId,
        component_id: ComponentId,
    ) -> Result<Option<Resolution>> {
        let mut tx = self.store.begin().await?;
        let outcome = tx
            .find_by_assignment_and_component(threat_assignment_id, component_id)
            .await;
        Self::finish_read(tx, outcome).await
    }

    /// Like [`get_component_resolution`](Self::get_component_resolution), with
    /// the resolution's outgoing delegation attached
    pub async fn get_resolution_with_delegation(
        &self,
        threat_assignment_id: ThreatAssignmentId,
        component_id: ComponentId,
    ) -> Result<Option<ResolutionWithDelegation>> {
        let mut tx = self.store.begin().await?;
        let outcome = Self::load_with_delegation(&mut tx, threat_assignment_id, component_id).await;
        Self::finish_read(tx, outcome).await
    }

    /// The resolution `id` directly delegates to, if it delegates at all
    pub async fn get_delegation_target(&self, id: ResolutionId) -> Result<Option<Resolution>> {
        let mut tx = self.store.begin().await?;
        let outcome = Self::load_delegation_target(&mut tx, id).await;
        Self::finish_read(tx, outcome).await
    }

    pub async fn list_resolutions_by_component(
        &self,
        component_id: ComponentId,
    ) -> Result<Vec<Resolution>> {
        let mut tx = self.store.begin().await?;
        let outcome = tx.list_by_component(component_id).await;
        Self::finish_read(tx, outcome).await
    }

    pub async fn list_resolutions_by_assignment(
        &self,
        threat_assignment_id: ThreatAssignmentId,
    ) -> Result<Vec<Resolution>> {
        let mut tx = self.store.begin().await?;
        let outcome = tx.list_by_assignment(threat_assignment_id).await;
        Self::finish_read(tx, outcome).await
    }

    async fn insert_new(tx: &mut S::Transaction, resolution: &Resolution) -> Result<()> {
        let existing = tx
            .find_by_assignment_and_component(
                resolution.threat_assignment_id(),
                resolution.component_id(),
            )
            .await?;
        if existing.is_some() {
            return Err(ResolutionError::Duplicate {
                threat_assignment_id: resolution.threat_assignment_id(),
                component_id: resolution.component_id(),
            });
        }
        tx.insert_resolution(resolution).await
    }

    async fn apply_update(
        tx: &mut S::Transaction,
        request: UpdateResolutionRequest,
    ) -> Result<Resolution> {
        let mut resolution = tx.get_resolution(request.id).await?;
        if let Some(status) = request.status {
            resolution.apply_status(status);
        }
        if let Some(description) = request.description {
            resolution.apply_description(description)?;
        }
        tx.update_resolution(&resolution).await?;

        tx.delete_delegations_by_source(resolution.id()).await?;
        let propagation =
            UpstreamPropagator::propagate_status(tx, resolution.id(), resolution.status()).await?;

        tracing::info!(
            resolution = %resolution.id(),
            status = %resolution.status(),
            updated_upstream = propagation.updated_count(),
            "updated resolution"
        );
        Ok(resolution)
    }

    async fn apply_delegation(
        tx: &mut S::Transaction,
        source: ResolutionId,
        target: ResolutionId,
    ) -> Result<PropagationOutcome> {
        let source = tx.get_resolution(source).await?;
        let target = tx.get_resolution(target).await?;

        tx.delete_delegations_by_source(source.id()).await?;
        tx.insert_delegation(&Delegation::new(source.id(), target.id()))
            .await?;

        let status = target.status();
        let root = RootResolver::find_root(tx, target).await?;
        UpstreamPropagator::propagate_status(tx, root.id(), status).await
    }

    async fn apply_delete(tx: &mut S::Transaction, id: ResolutionId) -> Result<bool> {
        if tx.find_resolution(id).await?.is_none() {
            return Ok(false);
        }

        let propagation =
            UpstreamPropagator::propagate_status(tx, id, ResolutionStatus::Awaiting).await?;
        tx.delete_delegations_by_target(id).await?;
        tx.delete_delegations_by_source(id).await?;
        tx.delete_resolution(id).await?;

        tracing::debug!(
            resolution = %id,
            reset_upstream = propagation.updated_count(),
            "reset delegators before delete"
        );
        Ok(true)
    }

    async fn load_with_delegation(
        tx: &mut S::Transaction,
        threat_assignment_id: ThreatAssignmentId,
        component_id: ComponentId,
    ) -> Result<Option<ResolutionWithDelegation>> {
        let Some(resolution) = tx
            .find_by_assignment_and_component(threat_assignment_id, component_id)
            .await?
        else {
            return Ok(None);
        };
        let delegation = tx
            .delegations_by_source(resolution.id())
            .await?
            .into_iter()
            .next();
        Ok(Some(ResolutionWithDelegation {
            resolution,
            delegation,
        }))
    }

    async fn load_delegation_target(
        tx: &mut S::Transaction,
        id: ResolutionId,
    ) -> Result<Option<Resolution>> {
        match tx.delegations_by_source(id).await?.first() {
            Some(edge) => tx.get_resolution(edge.delegated_to()).await.map(Some),
            None => Ok(None),
        }
    }

    /// Commits on success, rolls back on failure
    ///
    /// A failed rollback is logged; the caller always sees the original error.
    async fn finish<T: Send>(
        tx: S::Transaction,
        outcome: Result<T>,
        operation: &'static str,
    ) -> Result<T> {
        match outcome {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback_error) = tx.rollback().await {
                    tracing::warn!(operation, error = %rollback_error, "rollback failed");
                }
                tracing::warn!(operation, %error, "operation aborted, transaction rolled back");
                Err(error)
            }
        }
    }

    /// Ends a read-only transaction without publishing anything
    async fn finish_read<T: Send>(tx: S::Transaction, outcome: Result<T>) -> Result<T> {
        if let Err(rollback_error) = tx.rollback().await {
            tracing::warn!(error = %rollback_error, "rollback of read transaction failed");
        }
        outcome
    }
}

#[async_trait]
impl<S> ResolutionLifecyclePort for ManageResolutionsUseCase<S>
where
    S: TransactionalStore,
{
    async fn create_resolution(
        &self,
        threat_assignment_id: ThreatAssignmentId,
        component_id: ComponentId,
        status: ResolutionStatus,
        description: String,
    ) -> Result<Resolution> {
        let request =
            CreateResolutionRequest::new(threat_assignment_id, component_id, status, description);
        ManageResolutionsUseCase::create_resolution(self, request).await
    }

    async fn update_resolution(
        &self,
        id: ResolutionId,
        status: Option<ResolutionStatus>,
        description: Option<String>,
    ) -> Result<Resolution> {
        let request = UpdateResolutionRequest {
            id,
            status,
            description,
        };
        ManageResolutionsUseCase::update_resolution(self, request).await
    }

    async fn delegate_resolution(&self, source: ResolutionId, target: ResolutionId) -> Result<()> {
        ManageResolutionsUseCase::delegate_resolution(self, source, target).await
    }

    async fn delete_resolution(&self, id: ResolutionId) -> Result<()> {
        ManageResolutionsUseCase::delete_resolution(self, id).await
    }

    async fn get_resolution(&self, id: ResolutionId) -> Result<Resolution> {
        ManageResolutionsUseCase::get_resolution(self, id).await
    }

    async fn find_resolution_root(&self, id: ResolutionId) -> Result<Resolution> {
        ManageResolutionsUseCase::find_resolution_root(self, id).await
    }
}
