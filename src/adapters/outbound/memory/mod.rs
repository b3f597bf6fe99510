/// In-memory transactional store adapter
mod state;
mod store;

pub use state::StoreState;
pub use store::{InMemoryStore, InMemoryTransaction};
