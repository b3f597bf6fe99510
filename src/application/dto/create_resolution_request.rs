use crate::resolution::domain::{ComponentId, ResolutionStatus, ThreatAssignmentId};
use crate::shared::error::ResolutionError;
use crate::shared::Result;

/// CreateResolutionRequest - Request DTO for creating a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateResolutionRequest {
    /// Threat assignment the resolution belongs to
    pub threat_assignment_id: ThreatAssignmentId,
    /// Component providing the judgment
    pub component_id: ComponentId,
    pub status: ResolutionStatus,
    pub description: String,
}

impl CreateResolutionRequest {
    pub fn new(
        threat_assignment_id: ThreatAssignmentId,
        component_id: ComponentId,
        status: ResolutionStatus,
        description: impl Into<String>,
    ) -> Self {
        Self {
            threat_assignment_id,
            component_id,
            status,
            description: description.into(),
        }
    }

    pub fn builder() -> CreateResolutionRequestBuilder {
        CreateResolutionRequestBuilder::default()
    }
}

/// Builder for [`CreateResolutionRequest`]
///
/// Status defaults to `Awaiting` and description to the empty string.
#[derive(Debug, Default)]
pub struct CreateResolutionRequestBuilder {
    threat_assignment_id: Option<ThreatAssignmentId>,
    component_id: Option<ComponentId>,
    status: ResolutionStatus,
    description: String,
}

impl CreateResolutionRequestBuilder {
    pub fn threat_assignment(mut self, id: ThreatAssignmentId) -> Self {
        self.threat_assignment_id = Some(id);
        self
    }

    pub fn component(mut self, id: ComponentId) -> Self {
        self.component_id = Some(id);
        self
    }

    pub fn status(mut self, status: ResolutionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn build(self) -> Result<CreateResolutionRequest> {
        let threat_assignment_id = self
            .threat_assignment_id
            .ok_or_else(|| ResolutionError::validation("threat_assignment is required"))?;
        let component_id = self
            .component_id
            .ok_or_else(|| ResolutionError::validation("component is required"))?;

        Ok(CreateResolutionRequest {
            threat_assignment_id,
            component_id,
            status: self.status,
            description: self.description,
        })
    }
}
