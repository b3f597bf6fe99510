pub mod delegation;
pub mod ids;
pub mod resolution;
pub mod status;

pub use delegation::Delegation;
pub use ids::{ComponentId, DelegationId, ResolutionId, ThreatAssignmentId};
pub use resolution::{Resolution, ResolutionWithDelegation};
pub use status::ResolutionStatus;
