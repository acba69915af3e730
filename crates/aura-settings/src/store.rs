// store.rs — SettingsStore: integration keys and session flags.
//
// Persistent state is one JSON document (`settings.json`), read once and
// rewritten whole on every change. A change is applied to a copy, written,
// and only then swapped in, so a failed write leaves the store unchanged.
// The session flag is process-local and never written.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use aura_notify::NotificationCenter;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SettingsError;
use crate::integrations::{self, Integration};

pub const WELCOME_MESSAGE: &str = "Welcome to Aura! Your AI Life OS is now active.";
pub const LOGOUT_MESSAGE: &str = "You have been logged out.";

/// The persisted settings document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsDocument {
    /// Credential per integration id.
    #[serde(default)]
    pub api_keys: BTreeMap<String, String>,

    #[serde(default)]
    pub onboarding_complete: bool,
}

/// Which top-level screen to show at startup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Landing,
    Onboarding,
    Dashboard,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Landing => write!(f, "landing"),
            Screen::Onboarding => write!(f, "onboarding"),
            Screen::Dashboard => write!(f, "dashboard"),
        }
    }
}

/// An integration and whether a key is stored for it.
#[derive(Debug, Clone, Serialize)]
pub struct IntegrationStatus {
    pub integration: Integration,
    pub connected: bool,
}

#[derive(Debug, Default)]
struct State {
    document: SettingsDocument,
    session_entered: bool,
}

pub struct SettingsStore {
    state: Mutex<State>,
    path: Option<PathBuf>,
    notifications: NotificationCenter,
}

impl SettingsStore {
    /// A store that never touches disk.
    pub fn in_memory(notifications: NotificationCenter) -> Self {
        Self {
            state: Mutex::new(State::default()),
            path: None,
            notifications,
        }
    }

    /// Open the document at `path`. A missing file starts empty; a
    /// malformed one is logged and replaced on the next write.
    pub fn open(
        path: impl AsRef<Path>,
        notifications: NotificationCenter,
    ) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();
        let document = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::error!(path = %path.display(), error = %e, "failed to parse settings");
                SettingsDocument::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SettingsDocument::default(),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        Ok(Self {
            state: Mutex::new(State {
                document,
                session_entered: false,
            }),
            path: Some(path),
            notifications,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, SettingsError> {
        self.state.lock().map_err(|_| SettingsError::Lock)
    }

    pub fn document(&self) -> Result<SettingsDocument, SettingsError> {
        Ok(self.lock()?.document.clone())
    }

    /// Landing until the session is entered, then onboarding until it is
    /// completed, then the dashboard.
    pub fn initial_screen(&self) -> Result<Screen, SettingsError> {
        let state = self.lock()?;
        Ok(if !state.session_entered {
            Screen::Landing
        } else if !state.document.onboarding_complete {
            Screen::Onboarding
        } else {
            Screen::Dashboard
        })
    }

    pub fn enter_session(&self) -> Result<(), SettingsError> {
        self.lock()?.session_entered = true;
        Ok(())
    }

    /// Leave the session and return to the landing screen.
    pub fn log_out(&self) -> Result<Uuid, SettingsError> {
        self.lock()?.session_entered = false;
        Ok(self.notifications.info(LOGOUT_MESSAGE))
    }

    pub fn complete_onboarding(&self) -> Result<Uuid, SettingsError> {
        self.update(|document| document.onboarding_complete = true)?;
        tracing::info!("onboarding complete");
        Ok(self.notifications.success(WELCOME_MESSAGE))
    }

    /// Store `key` for integration `id`, replacing any earlier key.
    pub fn connect(&self, id: &str, key: &str) -> Result<Uuid, SettingsError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(SettingsError::Validation(format!(
                "API key for {} is empty",
                integrations::display_name(id)
            )));
        }
        self.update(|document| {
            document.api_keys.insert(id.to_string(), key.to_string());
        })?;
        tracing::info!(integration = id, "integration connected");
        Ok(self.notifications.success(format!(
            "{} connected successfully!",
            integrations::display_name(id)
        )))
    }

    /// Forget the key for `id`. Disconnecting an unconnected integration
    /// still confirms.
    pub fn disconnect(&self, id: &str) -> Result<Uuid, SettingsError> {
        self.update(|document| {
            document.api_keys.remove(id);
        })?;
        tracing::info!(integration = id, "integration disconnected");
        Ok(self.notifications.info(format!(
            "{} has been disconnected.",
            integrations::display_name(id)
        )))
    }

    pub fn is_connected(&self, id: &str) -> Result<bool, SettingsError> {
        Ok(self.lock()?.document.api_keys.contains_key(id))
    }

    pub fn api_key(&self, id: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.lock()?.document.api_keys.get(id).cloned())
    }

    /// Every catalog integration with its connection status.
    pub fn integrations(&self) -> Result<Vec<IntegrationStatus>, SettingsError> {
        let state = self.lock()?;
        Ok(integrations::INTEGRATIONS
            .iter()
            .map(|integration| IntegrationStatus {
                integration: *integration,
                connected: state.document.api_keys.contains_key(integration.id),
            })
            .collect())
    }

    /// Apply `change` to a copy of the document, persist it, then commit.
    fn update<F>(&self, change: F) -> Result<(), SettingsError>
    where
        F: FnOnce(&mut SettingsDocument),
    {
        let mut state = self.lock()?;
        let mut next = state.document.clone();
        change(&mut next);
        self.persist(&next)?;
        state.document = next;
        Ok(())
    }

    fn persist(&self, document: &SettingsDocument) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let io_err = |source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(document)?;
        fs::write(path, json).map_err(io_err)
    }
}
