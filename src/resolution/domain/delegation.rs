use super::ids::{DelegationId, ResolutionId};
use serde::{Deserialize, Serialize};

/// Directed delegation edge `delegated_by -> delegated_to`
///
/// The source's status follows the target's status. A source has at most one
/// outgoing edge; a target may have any number of incoming edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delegation {
    id: DelegationId,
    delegated_by: ResolutionId,
    delegated_to: ResolutionId,
}

impl Delegation {
    pub fn new(delegated_by: ResolutionId, delegated_to: ResolutionId) -> Self {
        Self {
            id: DelegationId::new(),
            delegated_by,
            delegated_to,
        }
    }

    pub fn id(&self) -> DelegationId {
        self.id
    }

    /// The delegating (source) resolution
    pub fn delegated_by(&self) -> ResolutionId {
        self.delegated_by
    }

    /// The resolution whose status is followed (target)
    pub fn delegated_to(&self) -> ResolutionId {
        self.delegated_to
    }

    pub fn is_self_loop(&self) -> bool {
        self.delegated_by == self.delegated_to
    }
}
