//! Delegation chain view for read paths
//!
//! Flattens a walk from one resolution to its root into the ids a caller
//! displays and the status that is actually in force.

use crate::resolution::domain::{Resolution, ResolutionId, ResolutionStatus};
use crate::resolution::services::DelegationPath;

/// View of one resolution's position in its delegation chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationChainView {
    /// The resolution the chain was requested for
    pub resolution: Resolution,
    /// Ids from `resolution` to `root`, both included
    pub path: Vec<ResolutionId>,
    /// Terminal resolution of the chain
    pub root: Resolution,
}

impl DelegationChainView {
    pub fn from_path(path: DelegationPath) -> Self {
        let ids = path.ids();
        let resolution = path
            .hops()
            .first()
            .cloned()
            .unwrap_or_else(|| path.root().clone());
        Self {
            resolution,
            path: ids,
            root: path.into_root(),
        }
    }

    /// Status of the chain's root, which every member mirrors
    pub fn effective_status(&self) -> ResolutionStatus {
        self.root.status()
    }

    pub fn is_delegated(&self) -> bool {
        self.resolution.id() != self.root.id()
    }

    /// Number of delegation edges between the resolution and its root
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}
