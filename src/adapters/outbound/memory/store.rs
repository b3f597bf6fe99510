use super::state::StoreState;
use crate::adapters::outbound::filesystem::SnapshotFile;
use crate::ports::outbound::{
    DelegationRepository, ResolutionRepository, StoreTransaction, TransactionalStore,
};
use crate::resolution::domain::{
    ComponentId, Delegation, Resolution, ResolutionId, ThreatAssignmentId,
};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// InMemoryStore adapter implementing the TransactionalStore port
///
/// Each transaction holds the store lock from `begin` until it is committed,
/// rolled back or dropped, and works on a private copy of the state. Commit
/// swaps the copy in. Transactions are therefore serialized, and a caller
/// must not begin a second transaction while holding the first.
///
/// When opened with a snapshot file, every commit writes the new state to
/// disk before publishing it, so a failed write leaves the store unchanged.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
    snapshot: Option<Arc<SnapshotFile>>,
}

impl InMemoryStore {
    /// Creates an empty, purely in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: StoreState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            snapshot: None,
        }
    }

    /// Opens a store backed by a JSON snapshot file
    ///
    /// A missing file starts an empty store; the file is created on the first commit.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let snapshot = SnapshotFile::new(path);
        let state = snapshot.load()?;
        tracing::info!(
            path = %snapshot.path().display(),
            resolutions = state.resolution_count(),
            delegations = state.delegation_count(),
            "opened resolution store snapshot"
        );
        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            snapshot: Some(Arc::new(snapshot)),
        })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot.as_deref().map(SnapshotFile::path)
    }

    /// Copy of the committed state; waits for any running transaction
    pub async fn export_state(&self) -> StoreState {
        self.state.lock().await.clone()
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("snapshot", &self.snapshot_path())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TransactionalStore for InMemoryStore {
    type Transaction = InMemoryTransaction;

    async fn begin(&self) -> Result<InMemoryTransaction> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(InMemoryTransaction {
            guard,
            working,
            snapshot: self.snapshot.clone(),
        })
    }
}

/// Transaction handle of an [`InMemoryStore`]
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<StoreState>,
    working: StoreState,
    snapshot: Option<Arc<SnapshotFile>>,
}

#[async_trait]
impl ResolutionRepository for InMemoryTransaction {
    async fn find_resolution(&mut self, id: ResolutionId) -> Result<Option<Resolution>> {
        Ok(self.working.get(id).cloned())
    }

    async fn insert_resolution(&mut self, resolution: &Resolution) -> Result<()> {
        self.working.insert_resolution(resolution.clone())
    }

    async fn update_resolution(&mut self, resolution: &Resolution) -> Result<()> {
        self.working.update_resolution(resolution.clone())
    }

    async fn delete_resolution(&mut self, id: ResolutionId) -> Result<()> {
        self.working.remove_resolution(id);
        Ok(())
    }

    async fn find_by_assignment_and_component(
        &mut self,
        threat_assignment_id: ThreatAssignmentId,
        component_id: ComponentId,
    ) -> Result<Option<Resolution>> {
        Ok(self
            .working
            .find_by_pair(threat_assignment_id, component_id)
            .cloned())
    }

    async fn list_by_component(&mut self, component_id: ComponentId) -> Result<Vec<Resolution>> {
        Ok(self.working.list_by_component(component_id))
    }

    async fn list_by_assignment(
        &mut self,
        threat_assignment_id: ThreatAssignmentId,
    ) -> Result<Vec<Resolution>> {
        Ok(self.working.list_by_assignment(threat_assignment_id))
    }
}

#[async_trait]
impl DelegationRepository for InMemoryTransaction {
    async fn delegations_by_source(&mut self, source: ResolutionId) -> Result<Vec<Delegation>> {
        Ok(self.working.outgoing(source))
    }

    async fn delegations_by_target(&mut self, target: ResolutionId) -> Result<Vec<Delegation>> {
        Ok(self.working.incoming(target))
    }

    async fn insert_delegation(&mut self, delegation: &Delegation) -> Result<()> {
        self.working.insert_delegation(*delegation)
    }

    async fn delete_delegations_by_source(&mut self, source: ResolutionId) -> Result<()> {
        self.working.remove_outgoing(source);
        Ok(())
    }

    async fn delete_delegations_by_target(&mut self, target: ResolutionId) -> Result<()> {
        self.working.remove_incoming(target);
        Ok(())
    }
}

#[async_trait]
impl StoreTransaction for InMemoryTransaction {
    async fn commit(self) -> Result<()> {
        let Self {
            mut guard,
            working,
            snapshot,
        } = self;

        if let Some(snapshot) = snapshot {
            snapshot.save(&working).await?;
        }
        *guard = working;
        Ok(())
    }

    async fn rollback(self) -> Result<()> {
        Ok(())
    }
}
