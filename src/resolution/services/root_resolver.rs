use crate::ports::outbound::{DelegationRepository, ResolutionRepository};
use crate::resolution::domain::{Resolution, ResolutionId};
use crate::shared::error::ResolutionError;
use crate::shared::Result;
use std::collections::HashSet;

/// Result of walking outgoing delegation edges from a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationPath {
    hops: Vec<Resolution>,
    root: Resolution,
}

impl DelegationPath {
    /// Resolutions passed through before the root, starting with the walk's origin
    pub fn hops(&self) -> &[Resolution] {
        &self.hops
    }

    pub fn root(&self) -> &Resolution {
        &self.root
    }

    pub fn into_root(self) -> Resolution {
        self.root
    }

    /// Number of delegation edges followed
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// Ids along the path, origin first and root last
    pub fn ids(&self) -> Vec<ResolutionId> {
        self.hops
            .iter()
            .chain(std::iter::once(&self.root))
            .map(Resolution::id)
            .collect()
    }
}

/// RootResolver service for finding the authoritative end of a delegation chain
///
/// Follows outgoing edges until it reaches a resolution that delegates to
/// nothing. The walk is bounded by the number of distinct resolutions: a
/// revisited id fails with [`ResolutionError::CycleDetected`].
pub struct RootResolver;

impl RootResolver {
    /// Returns the terminal resolution reached from `start`
    ///
    /// A resolution without an outgoing edge is its own root.
    pub async fn find_root<G>(graph: &mut G, start: Resolution) -> Result<Resolution>
    where
        G: ResolutionRepository + DelegationRepository,
    {
        Ok(Self::resolve_path(graph, start).await?.into_root())
    }

    /// Walks from `start` to its root, keeping every resolution passed through
    pub async fn resolve_path<G>(graph: &mut G, start: Resolution) -> Result<DelegationPath>
    where
        G: ResolutionRepository + DelegationRepository,
    {
        let mut visited: HashSet<ResolutionId> = HashSet::new();
        let mut hops = Vec::new();
        let mut current = start;

        loop {
            if !visited.insert(current.id()) {
                let mut chain: Vec<ResolutionId> = hops.iter().map(Resolution::id).collect();
                chain.push(current.id());
                return Err(ResolutionError::CycleDetected { chain });
            }

            let outgoing = graph.delegations_by_source(current.id()).await?;
            if outgoing.len() > 1 {
                tracing::warn!(
                    resolution = %current.id(),
                    edges = outgoing.len(),
                    "resolution has more than one outgoing delegation; following the first"
                );
            }

            let Some(edge) = outgoing.first() else {
                return Ok(DelegationPath {
                    hops,
                    root: current,
                });
            };

            let next = graph.get_resolution(edge.delegated_to()).await?;
            hops.push(current);
            current = next;
        }
    }
}
