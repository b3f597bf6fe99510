use crate::adapters::outbound::memory::StoreState;
use crate::resolution::domain::{Delegation, Resolution};
use crate::shared::error::ResolutionError;
use crate::shared::security::{
    validate_file_size, validate_not_symlink, validate_parent_directory, validate_regular_file,
    MAX_SNAPSHOT_SIZE,
};
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Version written into every snapshot; loading any other version fails
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotDocument {
    format_version: u32,
    written_at: DateTime<Utc>,
    resolutions: Vec<Resolution>,
    delegations: Vec<Delegation>,
}

/// SnapshotFile adapter persisting store state as one JSON document
///
/// Writes go to a temporary file in the target directory which is then
/// renamed over the snapshot, so readers never observe a half-written file.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot; a missing file yields an empty state
    ///
    /// # Errors
    /// Returns a persistence error if the file is unsafe to read, too large or
    /// not a valid snapshot, and a validation error if its records break a
    /// storage invariant.
    pub fn load(&self) -> Result<StoreState> {
        if !self.path.exists() && fs::symlink_metadata(&self.path).is_err() {
            return Ok(StoreState::new());
        }

        let content = self.read_checked().map_err(|e| {
            ResolutionError::persistence(
                format!("reading snapshot {}", self.path.display()),
                e,
            )
        })?;

        let document: SnapshotDocument = serde_json::from_str(&content).map_err(|e| {
            ResolutionError::persistence(
                format!("parsing snapshot {}", self.path.display()),
                e,
            )
        })?;

        if document.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(ResolutionError::persistence(
                format!("loading snapshot {}", self.path.display()),
                format!(
                    "unsupported snapshot format version {} (expected {})",
                    document.format_version, SNAPSHOT_FORMAT_VERSION
                ),
            ));
        }

        StoreState::from_records(document.resolutions, document.delegations)
    }

    /// Writes `state` atomically, replacing any previous snapshot
    pub async fn save(&self, state: &StoreState) -> Result<()> {
        let document = SnapshotDocument {
            format_version: SNAPSHOT_FORMAT_VERSION,
            written_at: Utc::now(),
            resolutions: state.resolutions().cloned().collect(),
            delegations: state.delegations().copied().collect(),
        };
        let bytes = serde_json::to_vec_pretty(&document).map_err(|e| {
            ResolutionError::persistence("serializing snapshot", e)
        })?;

        let path = self.path.clone();
        let context = format!("writing snapshot {}", self.path.display());
        tokio::task::spawn_blocking(move || write_atomically(&path, &bytes))
            .await
            .map_err(|e| ResolutionError::persistence(context.clone(), e))?
            .map_err(|e| ResolutionError::persistence(context, e))?;

        tracing::debug!(
            path = %self.path.display(),
            resolutions = document.resolutions.len(),
            delegations = document.delegations.len(),
            "wrote resolution snapshot"
        );
        Ok(())
    }

    fn read_checked(&self) -> anyhow::Result<String> {
        validate_regular_file(&self.path, "snapshot")?;
        let size = fs::metadata(&self.path)?.len();
        validate_file_size(size, &self.path, MAX_SNAPSHOT_SIZE)?;
        Ok(fs::read_to_string(&self.path)?)
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    validate_parent_directory(path)?;
    if fs::symlink_metadata(path).is_ok() {
        validate_not_symlink(path, "write")?;
    }

    let directory = match path.parent() {
        Some(parent) if parent != Path::new("") => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::NamedTempFile::new_in(directory)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::domain::{ComponentId, ResolutionStatus, ThreatAssignmentId};
    use tempfile::TempDir;

    fn sample_state() -> StoreState {
        let a = Resolution::new(
            ThreatAssignmentId::new(),
            ComponentId::new(),
            ResolutionStatus::Awaiting,
            "follows b",
        )
        .unwrap();
        let b = Resolution::new(
            ThreatAssignmentId::new(),
            ComponentId::new(),
            ResolutionStatus::Resolved,
            "patched",
        )
        .unwrap();
        let edge = Delegation::new(a.id(), b.id());
        StoreState::from_records(vec![a, b], vec![edge]).unwrap()
    }

    #[test]
    fn test_missing_file_loads_empty_state() {
        let dir = TempDir::new().unwrap();
        let snapshot = SnapshotFile::new(dir.path().join("store.json"));
        assert_eq!(snapshot.load().unwrap(), StoreState::new());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let snapshot = SnapshotFile::new(dir.path().join("store.json"));
        let state = sample_state();

        snapshot.save(&state).await.unwrap();
        let loaded = snapshot.load().unwrap();
        assert_eq!(loaded, state);

        let raw = fs::read_to_string(snapshot.path()).unwrap();
        assert!(raw.contains("\"formatVersion\": 1"));
        assert!(raw.contains("\"delegatedBy\""));
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let snapshot = SnapshotFile::new(dir.path().join("missing").join("store.json"));

        let err = snapshot.save(&sample_state()).await.unwrap_err();
        assert!(err.to_string().contains("writing snapshot"));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{ not json").unwrap();

        let err = SnapshotFile::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("parsing snapshot"));
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(
            &path,
            r#"{"formatVersion": 99, "writtenAt": "2026-01-01T00:00:00Z", "resolutions": [], "delegations": []}"#,
        )
        .unwrap();

        let err = SnapshotFile::new(&path).load().unwrap_err();
        let source = std::error::Error::source(&err).unwrap().to_string();
        assert!(source.contains("unsupported snapshot format version 99"));
    }

    #[test]
    fn test_load_rejects_directory() {
        let dir = TempDir::new().unwrap();
        let err = SnapshotFile::new(dir.path()).load().unwrap_err();
        assert!(err.to_string().contains("reading snapshot"));
    }
}
