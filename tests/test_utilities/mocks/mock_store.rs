use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use threatreg::adapters::outbound::memory::InMemoryTransaction;
use threatreg::prelude::*;

/// Transaction boundary observed by a [`MockStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Begin,
    Commit,
    Rollback,
}

/// Mock store wrapping a real [`InMemoryStore`] that records transaction
/// boundaries and can be told to fail commits or delegation writes
#[derive(Default, Clone)]
pub struct MockStore {
    inner: InMemoryStore,
    events: Arc<Mutex<Vec<StoreEvent>>>,
    fail_commits: Arc<AtomicBool>,
    fail_delegation_writes: Arc<AtomicBool>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }

    pub fn events(&self) -> Vec<StoreEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear_events(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delegation_writes(&self, fail: bool) {
        self.fail_delegation_writes.store(fail, Ordering::SeqCst);
    }

    fn record(&self, event: StoreEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub struct MockTransaction {
    inner: InMemoryTransaction,
    store: MockStore,
}

#[async_trait]
impl TransactionalStore for MockStore {
    type Transaction = MockTransaction;

    async fn begin(&self) -> Result<MockTransaction> {
        let inner = self.inner.begin().await?;
        self.record(StoreEvent::Begin);
        Ok(MockTransaction {
            inner,
            store: self.clone(),
        })
    }
}

#[async_trait]
impl ResolutionRepository for MockTransaction {
    async fn find_resolution(&mut self, id: ResolutionId) -> Result<Option<Resolution>> {
        self.inner.find_resolution(id).await
    }

    async fn insert_resolution(&mut self, resolution: &Resolution) -> Result<()> {
        self.inner.insert_resolution(resolution).await
    }

    async fn update_resolution(&mut self, resolution: &Resolution) -> Result<()> {
        self.inner.update_resolution(resolution).await
    }

    async fn delete_resolution(&mut self, id: ResolutionId) -> Result<()> {
        self.inner.delete_resolution(id).await
    }

    async fn find_by_assignment_and_component(
        &mut self,
        threat_assignment_id: ThreatAssignmentId,
        component_id: ComponentId,
    ) -> Result<Option<Resolution>> {
        self.inner
            .find_by_assignment_and_component(threat_assignment_id, component_id)
            .await
    }

    async fn list_by_component(&mut self, component_id: ComponentId) -> Result<Vec<Resolution>> {
        self.inner.list_by_component(component_id).await
    }

    async fn list_by_assignment(
        &mut self,
        threat_assignment_id: ThreatAssignmentId,
    ) -> Result<Vec<Resolution>> {
        self.inner.list_by_assignment(threat_assignment_id).await
    }
}

#[async_trait]
impl DelegationRepository for MockTransaction {
    async fn delegations_by_source(&mut self, source: ResolutionId) -> Result<Vec<Delegation>> {
        self.inner.delegations_by_source(source).await
    }

    async fn delegations_by_target(&mut self, target: ResolutionId) -> Result<Vec<Delegation>> {
        self.inner.delegations_by_target(target).await
    }

    async fn insert_delegation(&mut self, delegation: &Delegation) -> Result<()> {
        if self.store.fail_delegation_writes.load(Ordering::SeqCst) {
            return Err(ResolutionError::persistence(
                "inserting delegation",
                "mock store rejected the write",
            ));
        }
        self.inner.insert_delegation(delegation).await
    }

    async fn delete_delegations_by_source(&mut self, source: ResolutionId) -> Result<()> {
        self.inner.delete_delegations_by_source(source).await
    }

    async fn delete_delegations_by_target(&mut self, target: ResolutionId) -> Result<()> {
        self.inner.delete_delegations_by_target(target).await
    }
}

#[async_trait]
impl StoreTransaction for MockTransaction {
    async fn commit(self) -> Result<()> {
        if self.store.fail_commits.load(Ordering::SeqCst) {
            self.inner.rollback().await?;
            return Err(ResolutionError::persistence(
                "committing transaction",
                "mock store rejected the commit",
            ));
        }
        self.store.record(StoreEvent::Commit);
        self.inner.commit().await
    }

    async fn rollback(self) -> Result<()> {
        self.store.record(StoreEvent::Rollback);
        self.inner.rollback().await
    }
}
