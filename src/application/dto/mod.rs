/// Data Transfer Objects for application layer
///
/// DTOs carry caller input into the use cases, keeping the domain layer isolated.
mod create_resolution_request;
mod update_resolution_request;

pub use create_resolution_request::{CreateResolutionRequest, CreateResolutionRequestBuilder};
pub use update_resolution_request::UpdateResolutionRequest;
