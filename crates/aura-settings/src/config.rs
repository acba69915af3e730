// config.rs — AuraConfig (`.aura/config.toml`) and the on-disk layout.

use std::path::{Path, PathBuf};

use aura_backend::LatencyProfile;
use aura_dashboard::AggregatorPolicy;
use aura_notify::ToastConfig;
use aura_stream::StreamConfig;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Top-level configuration from `.aura/config.toml`.
///
/// Every section and every field is optional; omitted values take their
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuraConfig {
    /// Toast lifetime
    #[serde(default)]
    pub notifications: ToastConfig,

    /// Chat fragment pacing
    #[serde(default)]
    pub stream: StreamConfig,

    /// Per-source timeout and retry for dashboard loads
    #[serde(default)]
    pub aggregator: AggregatorPolicy,

    /// Simulated backend latency per operation
    #[serde(default)]
    pub latency: LatencyProfile,
}

impl AuraConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| SettingsError::Config {
            path: path.display().to_string(),
            source,
        })
    }

    /// Try to load config, returning the default if the file is missing or
    /// invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default config");
            Self::default()
        })
    }
}

/// Where Aura keeps its files under a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuraPaths {
    pub root: PathBuf,
    pub aura_dir: PathBuf,
    pub config: PathBuf,
    pub settings: PathBuf,
    pub events_log: PathBuf,
}

impl AuraPaths {
    /// Standard layout: everything lives in `<root>/.aura/`.
    pub fn for_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let aura_dir = root.join(".aura");
        Self {
            config: aura_dir.join("config.toml"),
            settings: aura_dir.join("settings.json"),
            events_log: aura_dir.join("events.jsonl"),
            aura_dir,
            root,
        }
    }
}
