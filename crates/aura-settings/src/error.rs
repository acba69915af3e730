// error.rs — Error types for settings, automations, and configuration.

use aura_backend::{BackendError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    /// A settings or config file could not be read or written.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The settings document is not valid JSON.
    #[error("settings document is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    /// `.aura/config.toml` is not valid.
    #[error("invalid config at {path}: {source}")]
    Config {
        path: String,
        source: toml::de::Error,
    },

    /// Rejected input (blank key, unknown automation).
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("automation not found: {0}")]
    UnknownAutomation(String),

    /// The backend could not serve automations.
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("settings lock poisoned")]
    Lock,
}

impl SettingsError {
    /// Taxonomy category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SettingsError::Validation(_)
            | SettingsError::UnknownAutomation(_)
            | SettingsError::Config { .. } => ErrorKind::Validation,
            SettingsError::Io { .. } | SettingsError::Parse(_) | SettingsError::Lock => {
                ErrorKind::Persistence
            }
            SettingsError::Backend(e) => e.kind(),
        }
    }
}
