/// Mock implementations for testing
mod mock_store;

pub use mock_store::{MockStore, StoreEvent};
