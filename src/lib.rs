//! threatreg - Threat resolution tracking with delegation chains
//!
//! This library records how components resolve the threats assigned to them
//! and keeps statuses consistent when one component's resolution follows
//! another's, following hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`resolution`): Resolutions, delegations, root resolution and propagation
//! - **Application Layer** (`application`): The lifecycle use case, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for callers and storage
//! - **Adapters** (`adapters`): The in-memory store and its JSON snapshot file
//! - **Shared** (`shared`): Error types, logging and file safety checks
//!
//! # Example
//!
//! ```no_run
//! use threatreg::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let use_case = ManageResolutionsUseCase::new(InMemoryStore::new());
//!
//! let shared = use_case
//!     .create_resolution(
//!         CreateResolutionRequest::builder()
//!             .threat_assignment(ThreatAssignmentId::new())
//!             .component(ComponentId::new())
//!             .build()?,
//!     )
//!     .await?;
//! let service = use_case
//!     .create_resolution(
//!         CreateResolutionRequest::builder()
//!             .threat_assignment(ThreatAssignmentId::new())
//!             .component(ComponentId::new())
//!             .build()?,
//!     )
//!     .await?;
//!
//! use_case.delegate_resolution(service.id(), shared.id()).await?;
//! use_case
//!     .update_resolution(
//!         UpdateResolutionRequest::new(shared.id()).with_status(ResolutionStatus::Resolved),
//!     )
//!     .await?;
//!
//! let service = use_case.get_resolution(service.id()).await?;
//! assert_eq!(service.status(), ResolutionStatus::Resolved);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod resolution;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::filesystem::SnapshotFile;
    pub use crate::adapters::outbound::memory::{InMemoryStore, StoreState};
    pub use crate::application::dto::{CreateResolutionRequest, UpdateResolutionRequest};
    pub use crate::application::read_models::DelegationChainView;
    pub use crate::application::use_cases::ManageResolutionsUseCase;
    pub use crate::config::{discover_config, load_config_from_path, open_store, ConfigFile};
    pub use crate::ports::inbound::ResolutionLifecyclePort;
    pub use crate::ports::outbound::{
        DelegationRepository, ResolutionRepository, StoreTransaction, TransactionalStore,
    };
    pub use crate::resolution::domain::{
        ComponentId, Delegation, DelegationId, Resolution, ResolutionId, ResolutionStatus,
        ResolutionWithDelegation, ThreatAssignmentId,
    };
    pub use crate::resolution::services::{RootResolver, UpstreamPropagator};
    pub use crate::shared::logging::init_logging;
    pub use crate::shared::{ResolutionError, Result};
}
