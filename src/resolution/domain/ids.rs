use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Declares a UUID-backed identifier newtype.
///
/// Each identifier is a distinct type so a component id can never be passed
/// where a resolution id is expected.
macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random (v4) identifier.
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_identifier!(
    /// Identifier of a resolution record
    ResolutionId
);

uuid_identifier!(
    /// Identifier of a delegation edge
    DelegationId
);

uuid_identifier!(
    /// Opaque reference to a threat-to-component assignment
    ThreatAssignmentId
);

uuid_identifier!(
    /// Opaque reference to a component (product, instance, ...) that judges a threat
    ComponentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique_and_not_nil() {
        let a = ResolutionId::new();
        let b = ResolutionId::new();
        assert_ne!(a, b);
        assert!(!a.is_nil());
    }

    #[test]
    fn test_nil_detection() {
        let id = ComponentId::from_uuid(Uuid::nil());
        assert!(id.is_nil());
    }

    #[test]
    fn test_parse_and_display() {
        let raw = "6f1c1e9e-8f8d-4f7c-9a4f-2b1d0f5e3c21";
        let id: ThreatAssignmentId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
        assert!("not-a-uuid".parse::<ThreatAssignmentId>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_uuid_string() {
        let raw = "6f1c1e9e-8f8d-4f7c-9a4f-2b1d0f5e3c21";
        let id: ResolutionId = raw.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", raw));
    }
}
