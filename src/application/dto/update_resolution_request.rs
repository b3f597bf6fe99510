use crate::resolution::domain::{ResolutionId, ResolutionStatus};

/// UpdateResolutionRequest - Request DTO for a direct update
///
/// Only fields that are `Some` are applied. An update always severs the
/// resolution's own delegation, even when no field changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResolutionRequest {
    pub id: ResolutionId,
    pub status: Option<ResolutionStatus>,
    pub description: Option<String>,
}

impl UpdateResolutionRequest {
    pub fn new(id: ResolutionId) -> Self {
        Self {
            id,
            status: None,
            description: None,
        }
    }

    pub fn with_status(mut self, status: ResolutionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
