use crate::resolution::domain::{
    ComponentId, Resolution, ResolutionId, ResolutionStatus, ThreatAssignmentId,
};
use crate::shared::Result;
use async_trait::async_trait;

/// ResolutionLifecyclePort - Inbound port for managing resolutions
///
/// This port defines the interface that calling services (API handlers,
/// CLIs, importers) use to drive the resolution core. Every mutating call
/// runs as one atomic transaction.
#[async_trait]
pub trait ResolutionLifecyclePort: Send + Sync {
    /// Creates a resolution with no delegation
    ///
    /// # Errors
    /// Returns an error if:
    /// - A reference is nil or the description is too long (validation)
    /// - A resolution already exists for the assignment and component
    /// - The store write fails
    async fn create_resolution(
        &self,
        threat_assignment_id: ThreatAssignmentId,
        component_id: ComponentId,
        status: ResolutionStatus,
        description: String,
    ) -> Result<Resolution>;

    /// Applies the given fields, severs the resolution's own delegation and
    /// pushes its status to every transitive delegator
    async fn update_resolution(
        &self,
        id: ResolutionId,
        status: Option<ResolutionStatus>,
        description: Option<String>,
    ) -> Result<Resolution>;

    /// Makes `source` follow `target`, replacing any previous delegation of `source`
    ///
    /// # Errors
    /// Returns an error if:
    /// - Either resolution does not exist
    /// - The new edge would close a cycle (nothing is committed)
    async fn delegate_resolution(&self, source: ResolutionId, target: ResolutionId) -> Result<()>;

    /// Deletes a resolution; delegators fall back to `Awaiting`.
    /// Deleting an unknown id succeeds.
    async fn delete_resolution(&self, id: ResolutionId) -> Result<()>;

    async fn get_resolution(&self, id: ResolutionId) -> Result<Resolution>;

    /// Returns the authoritative resolution at the end of `id`'s delegation chain
    async fn find_resolution_root(&self, id: ResolutionId) -> Result<Resolution>;
}
