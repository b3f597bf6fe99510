//! Configuration file support for threatreg.
//!
//! Provides YAML-based configuration through `threatreg.config.yml` files,
//! `APP_`-prefixed environment overrides, validation, and construction of
//! the store a configuration describes.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::adapters::outbound::memory::InMemoryStore;

const CONFIG_FILENAME: &str = "threatreg.config.yml";

/// Prefix of environment variables that override file settings
pub const ENV_PREFIX: &str = "APP_";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub store: StoreConfig,
    pub log_filter: Option<String>,
    pub environment: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Where resolutions are kept.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Snapshot file; `None` keeps everything in memory
    pub path: Option<PathBuf>,
}

impl ConfigFile {
    /// Applies `APP_STORE_PATH`, `APP_LOG_FILTER` and `APP_ENVIRONMENT`
    /// from the process environment. Environment values win over the file.
    pub fn with_env_overrides(self) -> anyhow::Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Like [`with_env_overrides`](Self::with_env_overrides), reading
    /// variables through `lookup`.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(path) = var("STORE_PATH") {
            self.store.path = Some(PathBuf::from(path));
        }
        if let Some(filter) = var("LOG_FILTER") {
            self.log_filter = Some(filter);
        }
        if let Some(environment) = var("ENVIRONMENT") {
            self.environment = Some(environment);
        }

        validate_config(&self)?;
        Ok(self)
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> anyhow::Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\nHint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\nHint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> anyhow::Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Builds the store described by `config`, loading an existing snapshot.
pub fn open_store(config: &ConfigFile) -> anyhow::Result<InMemoryStore> {
    match &config.store.path {
        Some(path) => InMemoryStore::open(path.clone())
            .with_context(|| format!("Failed to open resolution store: {}", path.display())),
        None => {
            tracing::debug!("no store path configured, using in-memory store");
            Ok(InMemoryStore::new())
        }
    }
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> anyhow::Result<()> {
    if let Some(ref path) = config.store.path {
        if path.as_os_str().is_empty() {
            bail!(
                "Invalid config: store.path must not be empty.\n\n\
                 Hint: Omit store.path to keep resolutions in memory only."
            );
        }
    }
    if let Some(ref filter) = config.log_filter {
        if filter.trim().is_empty() {
            bail!(
                "Invalid config: log_filter must not be empty.\n\n\
                 Hint: Use a tracing filter such as \"info\" or \"threatreg=debug\"."
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "unknown config field will be ignored");
    }
}
