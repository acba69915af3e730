//! # aura-settings
//!
//! User-level state that outlives a single view.
//!
//! - [`SettingsStore`] — integration API keys and the onboarding flag,
//!   persisted as `.aura/settings.json`, plus the process-local session flag
//! - [`AutomationBoard`] — the user's automations and their on/off toggles
//! - [`AuraConfig`] / [`AuraPaths`] — `.aura/config.toml` and the `.aura/`
//!   directory layout
//! - [`integrations`] — the static catalog of connectable services

pub mod automations;
pub mod config;
pub mod error;
pub mod integrations;
pub mod store;

pub use automations::AutomationBoard;
pub use config::{AuraConfig, AuraPaths};
pub use error::SettingsError;
pub use integrations::{Integration, IntegrationCategory, INTEGRATIONS};
pub use store::{
    IntegrationStatus, Screen, SettingsDocument, SettingsStore, LOGOUT_MESSAGE, WELCOME_MESSAGE,
};
