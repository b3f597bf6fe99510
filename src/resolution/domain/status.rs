use crate::shared::error::ResolutionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resolution status of one threat assignment as judged by one component
///
/// Propagation always copies the value verbatim, so adding a variant never
/// changes how delegation chains behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    /// Unresolved; the state every delegator falls back to when its authority disappears
    #[default]
    Awaiting,
    Resolved,
    /// Risk accepted without remediation
    Accepted,
    FalsePositive,
}

impl ResolutionStatus {
    pub const ALL: [ResolutionStatus; 4] = [
        ResolutionStatus::Awaiting,
        ResolutionStatus::Resolved,
        ResolutionStatus::Accepted,
        ResolutionStatus::FalsePositive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStatus::Awaiting => "awaiting",
            ResolutionStatus::Resolved => "resolved",
            ResolutionStatus::Accepted => "accepted",
            ResolutionStatus::FalsePositive => "false_positive",
        }
    }
}

impl FromStr for ResolutionStatus {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "awaiting" => Ok(ResolutionStatus::Awaiting),
            "resolved" => Ok(ResolutionStatus::Resolved),
            "accepted" => Ok(ResolutionStatus::Accepted),
            "false_positive" => Ok(ResolutionStatus::FalsePositive),
            _ => Err(ResolutionError::validation(format!(
                "Invalid status: {}. Expected one of: awaiting, resolved, accepted, false_positive",
                s
            ))),
        }
    }
}

impl fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
