/// Outbound ports (Driven ports) - Storage interfaces
///
/// These ports define the interfaces that the application core uses
/// to read and write resolutions and delegation edges.
pub mod delegation_repository;
pub mod resolution_repository;
pub mod transactional_store;

pub use delegation_repository::DelegationRepository;
pub use resolution_repository::ResolutionRepository;
pub use transactional_store::{StoreTransaction, TransactionalStore};
