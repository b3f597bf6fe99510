/// Filesystem adapters for durable snapshots
mod snapshot_file;

pub use snapshot_file::{SnapshotFile, SNAPSHOT_FORMAT_VERSION};
