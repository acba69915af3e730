// center.rs — NotificationCenter: owns the active toast set.
//
// enqueue() inserts the toast and spawns one expiry task under the same
// lock, so the timer can never run before the toast it removes exists.
// The expiry task holds only a Weak reference; dropping the last center
// handle lets pending timers finish as no-ops.
//
// Removal is idempotent from both sides: dismiss() aborts the timer, and a
// timer that still fires finds nothing to remove.
//
// Expiry timers are tokio tasks. A toast enqueued outside a runtime gets
// no timer and a warning in the log; it stays until dismissed.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::toast::{Toast, ToastKind};

/// Toast behavior settings (`[notifications]` in `.aura/config.toml`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToastConfig {
    /// How long a toast stays visible before it expires.
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
}

fn default_ttl_ms() -> u64 {
    5000
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
        }
    }
}

/// Change to the active toast set, for redrawing a UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    Shown(Toast),
    Expired(Uuid),
    Dismissed(Uuid),
}

struct Entry {
    toast: Toast,
    expiry: Option<JoinHandle<()>>,
}

struct Inner {
    active: Mutex<Vec<Entry>>,
    ttl: Duration,
    events: broadcast::Sender<ToastEvent>,
}

impl Inner {
    // A poisoned lock still guards a valid Vec; keep going rather than fail.
    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn take(&self, id: Uuid) -> Option<Entry> {
        let mut active = self.lock();
        let index = active.iter().position(|e| e.toast.id == id)?;
        Some(active.remove(index))
    }

    fn expire(&self, id: Uuid) {
        if self.take(id).is_some() {
            tracing::debug!(toast_id = %id, "toast expired");
            let _ = self.events.send(ToastEvent::Expired(id));
        }
    }
}

/// Owner of the active toast set. Cloning yields another handle to the
/// same set.
///
/// Enqueue from inside a tokio runtime: the TTL timer is spawned onto the
/// current runtime, and without one the toast never expires.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

impl NotificationCenter {
    pub fn new(config: &ToastConfig) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            inner: Arc::new(Inner {
                active: Mutex::new(Vec::new()),
                ttl: Duration::from_millis(config.ttl_ms),
                events,
            }),
        }
    }

    /// Show a toast and schedule its removal after the configured TTL.
    ///
    /// Always succeeds. Outside a tokio runtime no timer can be scheduled;
    /// the toast then stays until dismissed.
    pub fn enqueue(&self, message: impl Into<String>, kind: ToastKind) -> Uuid {
        let toast = Toast::new(message, kind);
        let id = toast.id;

        {
            let mut active = self.inner.lock();
            let expiry = self.schedule_expiry(id);
            active.push(Entry {
                toast: toast.clone(),
                expiry,
            });
        }

        tracing::info!(toast_id = %id, kind = %toast.kind, message = %toast.message, "toast");
        let _ = self.inner.events.send(ToastEvent::Shown(toast));
        id
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.enqueue(message, ToastKind::Success)
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.enqueue(message, ToastKind::Info)
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.enqueue(message, ToastKind::Error)
    }

    /// Remove a toast now. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let Some(entry) = self.inner.take(id) else {
            return false;
        };
        if let Some(expiry) = entry.expiry {
            expiry.abort();
        }
        tracing::debug!(toast_id = %id, "toast dismissed");
        let _ = self.inner.events.send(ToastEvent::Dismissed(id));
        true
    }

    /// Active toasts in insertion order.
    pub fn active(&self) -> Vec<Toast> {
        self.inner.lock().iter().map(|e| e.toast.clone()).collect()
    }

    pub fn get(&self, id: Uuid) -> Option<Toast> {
        self.inner
            .lock()
            .iter()
            .find(|e| e.toast.id == id)
            .map(|e| e.toast.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Receive every subsequent show/expire/dismiss.
    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.inner.events.subscribe()
    }

    fn schedule_expiry(&self, id: Uuid) -> Option<JoinHandle<()>> {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(toast_id = %id, "no tokio runtime; toast will not expire until dismissed");
            return None;
        };
        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        let ttl = self.inner.ttl;
        Some(handle.spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(inner) = inner.upgrade() {
                inner.expire(id);
            }
        }))
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(&ToastConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn toast_present_until_ttl_elapses() {
        let center = NotificationCenter::default();
        let id = center.success("Goal added");

        assert!(center.get(id).is_some());
        tokio::time::sleep(ms(4999)).await;
        assert!(center.get(id).is_some());

        tokio::time::sleep(ms(2)).await;
        assert!(center.get(id).is_none());
        assert!(center.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_twice_is_a_no_op() {
        let center = NotificationCenter::default();
        let keep = center.info("stays");
        let id = center.info("goes");

        assert!(center.dismiss(id));
        let after_first = center.active();
        assert!(!center.dismiss(id));
        assert_eq!(center.active(), after_first);
        assert_eq!(after_first.len(), 1);
        assert_eq!(after_first[0].id, keep);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_unknown_id_changes_nothing() {
        let center = NotificationCenter::default();
        center.error("boom");
        assert!(!center.dismiss(Uuid::new_v4()));
        assert_eq!(center.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dismissed_toast_timer_does_not_remove_a_later_toast() {
        let center = NotificationCenter::new(&ToastConfig { ttl_ms: 1000 });
        let first = center.info("first");
        center.dismiss(first);

        tokio::time::sleep(ms(500)).await;
        let second = center.info("second");

        // First toast's deadline passes; the second must survive it.
        tokio::time::sleep(ms(600)).await;
        assert!(center.get(second).is_some());

        tokio::time::sleep(ms(500)).await;
        assert!(center.get(second).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn active_preserves_insertion_order() {
        let center = NotificationCenter::default();
        center.info("a");
        center.success("b");
        center.error("c");

        let messages: Vec<String> = center.active().into_iter().map(|t| t.message).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn ids_are_unique() {
        let center = NotificationCenter::default();
        let ids: std::collections::HashSet<Uuid> =
            (0..100).map(|i| center.info(format!("t{}", i))).collect();
        assert_eq!(ids.len(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_lifecycle_events() {
        let center = NotificationCenter::new(&ToastConfig { ttl_ms: 100 });
        let mut events = center.subscribe();

        let expiring = center.info("expires");
        let dismissed = center.info("dismissed");
        center.dismiss(dismissed);
        tokio::time::sleep(ms(150)).await;

        assert!(matches!(events.recv().await.unwrap(), ToastEvent::Shown(t) if t.id == expiring));
        assert!(matches!(events.recv().await.unwrap(), ToastEvent::Shown(t) if t.id == dismissed));
        assert_eq!(events.recv().await.unwrap(), ToastEvent::Dismissed(dismissed));
        assert_eq!(events.recv().await.unwrap(), ToastEvent::Expired(expiring));
    }

    #[test]
    fn enqueue_outside_runtime_still_succeeds() {
        let center = NotificationCenter::default();
        let id = center.info("no runtime");
        assert!(center.get(id).is_some());
        assert!(center.dismiss(id));
    }

    #[test]
    fn toast_enqueued_outside_runtime_waits_for_dismissal() {
        let center = NotificationCenter::new(&ToastConfig { ttl_ms: 100 });
        let id = center.info("no runtime");

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();
        rt.block_on(async { tokio::time::sleep(ms(1000)).await });

        assert!(center.get(id).is_some());
        assert!(center.dismiss(id));
        assert!(center.is_empty());
    }
}
