// automations.rs — AutomationBoard: the user's background routines.
//
// Toggling flips the flag of the matching entry in place under one lock.
// Entries are never removed and re-inserted, so list order is stable.

use std::sync::{Mutex, MutexGuard};

use aura_backend::{Automation, Backend};
use aura_notify::NotificationCenter;

use crate::error::SettingsError;

pub struct AutomationBoard {
    automations: Mutex<Vec<Automation>>,
    notifications: NotificationCenter,
}

impl AutomationBoard {
    pub fn new(notifications: NotificationCenter) -> Self {
        Self::with_automations(Vec::new(), notifications)
    }

    pub fn with_automations(automations: Vec<Automation>, notifications: NotificationCenter) -> Self {
        Self {
            automations: Mutex::new(automations),
            notifications,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Automation>>, SettingsError> {
        self.automations.lock().map_err(|_| SettingsError::Lock)
    }

    /// Replace the board's contents with the backend's automations.
    pub async fn load(&self, backend: &dyn Backend) -> Result<usize, SettingsError> {
        let fetched = backend.fetch_automations().await?;
        let count = fetched.len();
        *self.lock()? = fetched;
        tracing::debug!(count, "automations loaded");
        Ok(count)
    }

    pub fn list(&self) -> Result<Vec<Automation>, SettingsError> {
        Ok(self.lock()?.clone())
    }

    /// Flip one automation and confirm with an info toast. Returns the
    /// updated automation.
    pub fn toggle(&self, id: &str) -> Result<Automation, SettingsError> {
        let updated = {
            let mut automations = self.lock()?;
            let automation = automations
                .iter_mut()
                .find(|automation| automation.id == id)
                .ok_or_else(|| SettingsError::UnknownAutomation(id.to_string()))?;
            automation.enabled = !automation.enabled;
            automation.clone()
        };

        let verb = if updated.enabled { "enabled" } else { "disabled" };
        tracing::info!(automation = %updated.id, enabled = updated.enabled, "automation toggled");
        self.notifications
            .info(format!("{} has been {}.", updated.title, verb));
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_backend::{catalog, LatencyProfile, MockBackend};
    use aura_notify::{ToastConfig, ToastKind};

    fn board() -> (AutomationBoard, NotificationCenter) {
        let notifications = NotificationCenter::new(&ToastConfig::default());
        let board = AutomationBoard::with_automations(catalog::automations(), notifications.clone());
        (board, notifications)
    }

    #[tokio::test]
    async fn double_toggle_restores_with_two_info_toasts() {
        let (board, notifications) = board();
        let before = board.list().unwrap();

        let first = board.toggle("auto1").unwrap();
        assert!(!first.enabled);
        let second = board.toggle("auto1").unwrap();
        assert!(second.enabled);

        assert_eq!(board.list().unwrap(), before);
        let toasts = notifications.active();
        assert_eq!(toasts.len(), 2);
        assert!(toasts.iter().all(|t| t.kind == ToastKind::Info));
        assert_eq!(toasts[0].message, "Pay Credit Card Bill has been disabled.");
        assert_eq!(toasts[1].message, "Pay Credit Card Bill has been enabled.");
    }

    #[tokio::test]
    async fn toggle_keeps_position() {
        let (board, _) = board();
        board.toggle("auto3").unwrap();

        let ids: Vec<String> = board.list().unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["auto1", "auto2", "auto3", "auto4", "auto5"]);
        assert!(board.list().unwrap()[2].enabled);
    }

    #[tokio::test]
    async fn unknown_automation_is_rejected() {
        let (board, notifications) = board();
        assert!(matches!(
            board.toggle("auto9"),
            Err(SettingsError::UnknownAutomation(_))
        ));
        assert!(notifications.is_empty());
    }

    #[tokio::test]
    async fn load_replaces_contents_from_backend() {
        let notifications = NotificationCenter::new(&ToastConfig::default());
        let board = AutomationBoard::new(notifications);
        let backend = MockBackend::seeded(LatencyProfile::instant());

        assert_eq!(board.load(&backend).await.unwrap(), 5);
        assert_eq!(board.list().unwrap().len(), 5);
    }
}
