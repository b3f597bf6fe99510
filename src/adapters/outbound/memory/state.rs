use crate::resolution::domain::{
    ComponentId, Delegation, Resolution, ResolutionId, ThreatAssignmentId,
};
use crate::shared::error::ResolutionError;
use crate::shared::Result;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Committed contents of an [`InMemoryStore`](super::InMemoryStore)
///
/// Delegations are stored as parent pointers keyed by their source, which
/// makes "at most one outgoing edge" structural. `incoming` and `by_pair`
/// are derived indexes, rebuilt whenever state is loaded from records.
/// `by_pair` is ordered by assignment first, so it also answers
/// per-assignment listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    resolutions: BTreeMap<ResolutionId, Resolution>,
    delegations: BTreeMap<ResolutionId, Delegation>,
    incoming: BTreeMap<ResolutionId, BTreeSet<ResolutionId>>,
    by_pair: BTreeMap<(ThreatAssignmentId, ComponentId), ResolutionId>,
}

impl StoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds state from flat record lists, checking every storage invariant
    ///
    /// # Errors
    /// Returns a validation error for duplicate ids, a second resolution for
    /// the same (assignment, component) pair, a source with two outgoing
    /// edges, or an edge whose endpoints do not exist.
    pub fn from_records(resolutions: Vec<Resolution>, delegations: Vec<Delegation>) -> Result<Self> {
        let mut state = Self::new();

        for resolution in resolutions {
            if state.resolutions.contains_key(&resolution.id()) {
                return Err(ResolutionError::validation(format!(
                    "duplicate resolution id {} in stored records",
                    resolution.id()
                )));
            }
            state.insert_resolution(resolution)?;
        }

        for delegation in delegations {
            for endpoint in [delegation.delegated_by(), delegation.delegated_to()] {
                if !state.resolutions.contains_key(&endpoint) {
                    return Err(ResolutionError::validation(format!(
                        "delegation {} references missing resolution {}",
                        delegation.id(),
                        endpoint
                    )));
                }
            }
            state.insert_delegation(delegation)?;
        }

        Ok(state)
    }

    pub fn resolution_count(&self) -> usize {
        self.resolutions.len()
    }

    pub fn delegation_count(&self) -> usize {
        self.delegations.len()
    }

    pub fn resolutions(&self) -> impl Iterator<Item = &Resolution> {
        self.resolutions.values()
    }

    pub fn delegations(&self) -> impl Iterator<Item = &Delegation> {
        self.delegations.values()
    }

    pub(super) fn get(&self, id: ResolutionId) -> Option<&Resolution> {
        self.resolutions.get(&id)
    }

    pub(super) fn find_by_pair(
        &self,
        threat_assignment_id: ThreatAssignmentId,
        component_id: ComponentId,
    ) -> Option<&Resolution> {
        self.by_pair
            .get(&(threat_assignment_id, component_id))
            .and_then(|id| self.resolutions.get(id))
    }

    pub(super) fn list_by_component(&self, component_id: ComponentId) -> Vec<Resolution> {
        self.resolutions
            .values()
            .filter(|r| r.component_id() == component_id)
            .cloned()
            .collect()
    }

    pub(super) fn list_by_assignment(&self, threat_assignment_id: ThreatAssignmentId) -> Vec<Resolution> {
        let first = (threat_assignment_id, ComponentId::from_uuid(Uuid::nil()));
        let last = (threat_assignment_id, ComponentId::from_uuid(Uuid::max()));
        self.by_pair
            .range(first..=last)
            .filter_map(|(_, id)| self.resolutions.get(id).cloned())
            .collect()
    }

    pub(super) fn insert_resolution(&mut self, resolution: Resolution) -> Result<()> {
        if self.resolutions.contains_key(&resolution.id()) {
            return Err(ResolutionError::persistence(
                "inserting resolution",
                format!("resolution {} already exists", resolution.id()),
            ));
        }
        if self
            .find_by_pair(resolution.threat_assignment_id(), resolution.component_id())
            .is_some()
        {
            return Err(ResolutionError::Duplicate {
                threat_assignment_id: resolution.threat_assignment_id(),
                component_id: resolution.component_id(),
            });
        }
        self.by_pair.insert(
            (resolution.threat_assignment_id(), resolution.component_id()),
            resolution.id(),
        );
        self.resolutions.insert(resolution.id(), resolution);
        Ok(())
    }

    pub(super) fn update_resolution(&mut self, resolution: Resolution) -> Result<()> {
        let Some(existing) = self.resolutions.get(&resolution.id()) else {
            return Err(ResolutionError::NotFound {
                id: resolution.id(),
            });
        };
        let old_pair = (existing.threat_assignment_id(), existing.component_id());
        let new_pair = (resolution.threat_assignment_id(), resolution.component_id());
        if old_pair != new_pair {
            if self.by_pair.contains_key(&new_pair) {
                return Err(ResolutionError::Duplicate {
                    threat_assignment_id: new_pair.0,
                    component_id: new_pair.1,
                });
            }
            self.by_pair.remove(&old_pair);
            self.by_pair.insert(new_pair, resolution.id());
        }
        self.resolutions.insert(resolution.id(), resolution);
        Ok(())
    }

    pub(super) fn remove_resolution(&mut self, id: ResolutionId) {
        if let Some(removed) = self.resolutions.remove(&id) {
            self.by_pair
                .remove(&(removed.threat_assignment_id(), removed.component_id()));
        }
    }

    pub(super) fn outgoing(&self, source: ResolutionId) -> Vec<Delegation> {
        self.delegations.get(&source).copied().into_iter().collect()
    }

    pub(super) fn incoming(&self, target: ResolutionId) -> Vec<Delegation> {
        self.incoming
            .get(&target)
            .into_iter()
            .flatten()
            .filter_map(|source| self.delegations.get(source).copied())
            .collect()
    }

    pub(super) fn insert_delegation(&mut self, delegation: Delegation) -> Result<()> {
        let source = delegation.delegated_by();
        if let Some(existing) = self.delegations.get(&source) {
            return Err(ResolutionError::persistence(
                "inserting delegation",
                format!(
                    "resolution {} already delegates to {}",
                    source,
                    existing.delegated_to()
                ),
            ));
        }
        self.incoming
            .entry(delegation.delegated_to())
            .or_default()
            .insert(source);
        self.delegations.insert(source, delegation);
        Ok(())
    }

    pub(super) fn remove_outgoing(&mut self, source: ResolutionId) {
        if let Some(removed) = self.delegations.remove(&source) {
            let target = removed.delegated_to();
            if let Some(sources) = self.incoming.get_mut(&target) {
                sources.remove(&source);
                if sources.is_empty() {
                    self.incoming.remove(&target);
                }
            }
        }
    }

    pub(super) fn remove_incoming(&mut self, target: ResolutionId) {
        for source in self.incoming.remove(&target).unwrap_or_default() {
            self.delegations.remove(&source);
        }
    }
}
