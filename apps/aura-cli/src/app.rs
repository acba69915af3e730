// app.rs — Shared wiring for every subcommand.
//
// One App is built per invocation: config from `.aura/config.toml`, a
// notification center, the mock backend, and the settings store. Every
// toast shown while a command runs is printed when it finishes, including
// ones that already expired.

use std::path::Path;
use std::sync::{Arc, Mutex};

use aura_backend::{Backend, LatencyProfile, MockBackend};
use aura_dashboard::{DashboardLoader, DataAggregator, QuickActions};
use aura_notify::{NotificationCenter, Toast, ToastEvent};
use aura_settings::{AuraConfig, AuraPaths, SettingsStore};
use aura_stream::CancellationToken;
use tokio::sync::broadcast;

pub struct App {
    pub paths: AuraPaths,
    pub config: AuraConfig,
    pub notifications: NotificationCenter,
    pub backend: Arc<dyn Backend>,
    pub settings: SettingsStore,
    shown: Mutex<broadcast::Receiver<ToastEvent>>,
}

impl App {
    pub fn open(project_root: &Path, instant: bool) -> anyhow::Result<Self> {
        let paths = AuraPaths::for_root(project_root);
        let mut config = AuraConfig::load_or_default(&paths.config);
        if instant {
            config.latency = LatencyProfile::instant();
            config.stream.fragment_interval_ms = 0;
        }
        tracing::debug!(config = %paths.config.display(), "configuration loaded");

        let notifications = NotificationCenter::new(&config.notifications);
        let shown = Mutex::new(notifications.subscribe());
        let backend: Arc<dyn Backend> = Arc::new(MockBackend::seeded(config.latency.clone()));
        let settings = SettingsStore::open(&paths.settings, notifications.clone())?;

        Ok(Self {
            paths,
            config,
            notifications,
            backend,
            settings,
            shown,
        })
    }

    pub fn dashboard_loader(&self) -> DashboardLoader {
        DashboardLoader::new(
            self.backend.clone(),
            DataAggregator::new(self.config.aggregator.clone()),
            self.notifications.clone(),
        )
    }

    pub fn quick_actions(&self) -> QuickActions {
        QuickActions::new(self.notifications.clone())
    }

    /// Toasts shown since the last call, oldest first.
    pub fn drain_toasts(&self) -> Vec<Toast> {
        let Ok(mut shown) = self.shown.lock() else {
            return Vec::new();
        };
        let mut toasts = Vec::new();
        loop {
            match shown.try_recv() {
                Ok(ToastEvent::Shown(toast)) => toasts.push(toast),
                Ok(_) => {}
                Err(broadcast::error::TryRecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "toast report lagged");
                }
                Err(_) => break,
            }
        }
        toasts
    }

    pub fn report_toasts(&self) {
        for toast in self.drain_toasts() {
            println!("{}", format_toast(&toast));
        }
    }
}

pub fn format_toast(toast: &Toast) -> String {
    format!("[{}] {}", toast.kind, toast.message)
}

/// A token cancelled on Ctrl-C, so long loads and streams stop cleanly.
pub fn interrupt_token() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted");
            child.cancel();
        }
    });
    token
}
