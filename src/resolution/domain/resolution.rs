use super::delegation::Delegation;
use super::ids::{ComponentId, ResolutionId, ThreatAssignmentId};
use super::status::ResolutionStatus;
use crate::shared::error::ResolutionError;
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of a resolution description
const MAX_DESCRIPTION_LENGTH: usize = 64 * 1024;

/// Resolution entity: one component's judgment about one threat assignment
///
/// Status may change in two ways: directly through an update, or as a side
/// effect of propagation from a resolution further down its delegation chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    id: ResolutionId,
    threat_assignment_id: ThreatAssignmentId,
    component_id: ComponentId,
    status: ResolutionStatus,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Resolution {
    /// Creates a new resolution with a freshly generated id
    ///
    /// # Errors
    /// Returns a validation error if either reference is nil or the
    /// description exceeds the length limit.
    pub fn new(
        threat_assignment_id: ThreatAssignmentId,
        component_id: ComponentId,
        status: ResolutionStatus,
        description: impl Into<String>,
    ) -> Result<Self> {
        if threat_assignment_id.is_nil() {
            return Err(ResolutionError::validation(
                "threat assignment resolution must have a threat assignment id",
            ));
        }
        if component_id.is_nil() {
            return Err(ResolutionError::validation(
                "threat assignment resolution must have a component id",
            ));
        }
        let description = description.into();
        validate_description(&description)?;

        let now = Utc::now();
        Ok(Self {
            id: ResolutionId::new(),
            threat_assignment_id,
            component_id,
            status,
            description,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> ResolutionId {
        self.id
    }

    pub fn threat_assignment_id(&self) -> ThreatAssignmentId {
        self.threat_assignment_id
    }

    pub fn component_id(&self) -> ComponentId {
        self.component_id
    }

    pub fn status(&self) -> ResolutionStatus {
        self.status
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn apply_status(&mut self, status: ResolutionStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub(crate) fn apply_description(&mut self, description: String) -> Result<()> {
        validate_description(&description)?;
        self.description = description;
        self.updated_at = Utc::now();
        Ok(())
    }
}

fn validate_description(description: &str) -> Result<()> {
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(ResolutionError::validation(format!(
            "description is too long ({} bytes). Maximum allowed: {} bytes",
            description.len(),
            MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(())
}

/// A resolution together with its outgoing delegation, if it has one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionWithDelegation {
    pub resolution: Resolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegation: Option<Delegation>,
}

impl ResolutionWithDelegation {
    pub fn is_delegated(&self) -> bool {
        self.delegation.is_some()
    }
}
