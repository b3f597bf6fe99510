/// Use cases module containing application business logic orchestration
mod manage_resolutions;

pub use manage_resolutions::ManageResolutionsUseCase;
