use crate::ports::outbound::{DelegationRepository, ResolutionRepository};
use crate::resolution::domain::{ResolutionId, ResolutionStatus};
use crate::shared::error::ResolutionError;
use crate::shared::Result;
use std::collections::{HashMap, HashSet};

/// Resolutions rewritten by one propagation, in the order they were persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationOutcome {
    updated: Vec<ResolutionId>,
}

impl PropagationOutcome {
    pub fn updated(&self) -> &[ResolutionId] {
        &self.updated
    }

    pub fn updated_count(&self) -> usize {
        self.updated.len()
    }

    pub fn contains(&self, id: ResolutionId) -> bool {
        self.updated.contains(&id)
    }
}

/// UpstreamPropagator service for pushing a status to every transitive delegator
///
/// Walks incoming edges with an explicit worklist, so chain depth never
/// grows the call stack. The target itself is left untouched.
pub struct UpstreamPropagator;

impl UpstreamPropagator {
    /// Sets `status` on every resolution that delegates, directly or
    /// transitively, into `target`, persisting each change
    ///
    /// # Errors
    /// Returns [`ResolutionError::CycleDetected`] if a resolution is reached
    /// twice, which can only happen when the edge set contains a cycle.
    /// Storage errors are returned as-is; the caller's transaction discards
    /// any partial writes.
    pub async fn propagate_status<G>(
        graph: &mut G,
        target: ResolutionId,
        status: ResolutionStatus,
    ) -> Result<PropagationOutcome>
    where
        G: ResolutionRepository + DelegationRepository,
    {
        let mut visited: HashSet<ResolutionId> = HashSet::from([target]);
        // delegator -> the resolution it was reached from (its delegation target)
        let mut reached_from: HashMap<ResolutionId, ResolutionId> = HashMap::new();
        let mut pending = vec![target];
        let mut outcome = PropagationOutcome::default();

        while let Some(current) = pending.pop() {
            for edge in graph.delegations_by_target(current).await? {
                let upstream_id = edge.delegated_by();
                if !visited.insert(upstream_id) {
                    return Err(ResolutionError::CycleDetected {
                        chain: walked_chain(&reached_from, upstream_id, current),
                    });
                }
                reached_from.insert(upstream_id, current);

                let mut upstream = graph.get_resolution(upstream_id).await?;
                upstream.apply_status(status);
                graph.update_resolution(&upstream).await?;

                outcome.updated.push(upstream_id);
                pending.push(upstream_id);
            }
        }

        tracing::debug!(
            target_resolution = %target,
            %status,
            updated = outcome.updated_count(),
            "propagated status upstream"
        );

        Ok(outcome)
    }
}

/// Rebuilds the delegation path `revisited -> current -> ...` back to `revisited`
///
/// Follows the links recorded during the walk in delegation direction. Stops
/// at the walk's start if `revisited` is not on the path, which only happens
/// when a resolution has more than one outgoing edge.
fn walked_chain(
    reached_from: &HashMap<ResolutionId, ResolutionId>,
    revisited: ResolutionId,
    current: ResolutionId,
) -> Vec<ResolutionId> {
    let mut chain = vec![revisited];
    let mut next = Some(current);
    while let Some(id) = next {
        chain.push(id);
        if id == revisited {
            break;
        }
        next = reached_from.get(&id).copied();
    }
    chain
}
