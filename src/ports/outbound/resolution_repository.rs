use crate::resolution::domain::{ComponentId, Resolution, ResolutionId, ThreatAssignmentId};
use crate::shared::error::ResolutionError;
use crate::shared::Result;
use async_trait::async_trait;

/// ResolutionRepository port for keyed access to resolution records
///
/// Implemented by a transaction handle: every call made through one value
/// observes and contributes to the same unit of work.
///
/// # Errors
/// Implementations report storage failures as [`ResolutionError::Persistence`].
#[async_trait]
pub trait ResolutionRepository: Send {
    /// Point lookup; `Ok(None)` when no record has the id
    async fn find_resolution(&mut self, id: ResolutionId) -> Result<Option<Resolution>>;

    /// Point lookup that treats absence as [`ResolutionError::NotFound`]
    async fn get_resolution(&mut self, id: ResolutionId) -> Result<Resolution> {
        self.find_resolution(id)
            .await?
            .ok_or(ResolutionError::NotFound { id })
    }

    /// Inserts a new record
    ///
    /// # Errors
    /// Returns [`ResolutionError::Duplicate`] if a record already exists for the
    /// same threat assignment and component.
    async fn insert_resolution(&mut self, resolution: &Resolution) -> Result<()>;

    /// Full overwrite by id
    ///
    /// # Errors
    /// Returns [`ResolutionError::NotFound`] if no record has the id.
    async fn update_resolution(&mut self, resolution: &Resolution) -> Result<()>;

    /// Removes a record; removing an absent id is not an error
    async fn delete_resolution(&mut self, id: ResolutionId) -> Result<()>;

    async fn find_by_assignment_and_component(
        &mut self,
        threat_assignment_id: ThreatAssignmentId,
        component_id: ComponentId,
    ) -> Result<Option<Resolution>>;

    async fn list_by_component(&mut self, component_id: ComponentId) -> Result<Vec<Resolution>>;

    async fn list_by_assignment(
        &mut self,
        threat_assignment_id: ThreatAssignmentId,
    ) -> Result<Vec<Resolution>>;
}
