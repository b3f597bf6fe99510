use crate::resolution::domain::{ComponentId, ResolutionId, ThreatAssignmentId};
use thiserror::Error;

/// Boxed cause carried by persistence failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by the resolution and delegation core.
///
/// Uses thiserror to derive Display and Error traits automatically.
/// Adapters report storage failures through [`ResolutionError::Persistence`];
/// every other variant originates in the domain or application layer.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Resolution not found: {id}")]
    NotFound { id: ResolutionId },

    #[error("Cycle detected in delegation chain: {}", format_chain(chain))]
    CycleDetected { chain: Vec<ResolutionId> },

    #[error("A resolution already exists for threat assignment {threat_assignment_id} and component {component_id}")]
    Duplicate {
        threat_assignment_id: ThreatAssignmentId,
        component_id: ComponentId,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Persistence error: {context}")]
    Persistence {
        context: String,
        #[source]
        source: BoxError,
    },
}

impl ResolutionError {
    /// Wraps a storage failure with a short description of the failed operation.
    pub fn persistence(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Persistence {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected { .. })
    }
}

fn format_chain(chain: &[ResolutionId]) -> String {
    chain
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
