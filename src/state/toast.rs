//! Transient toast notifications with optional self-expiry.
//!
//! DESIGN
//! ======
//! Notifications live in an ordered `Store<Vec<_>>` (insertion order, newest
//! last). A notification with a positive timeout gets a tokio timer task;
//! its `AbortHandle` is kept in a side table keyed by notification id so an
//! early dismissal cancels the timer explicitly. The timer path removes by
//! id, never by position, so it is a no-op once the target is gone.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::AbortHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use super::store::{Store, Subscription};

/// Visual severity of a toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Error,
    Success,
}

/// A toast as supplied by a caller, before the queue assigns its id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewToast {
    /// Headline text.
    pub title: String,
    /// Secondary line under the title. Empty hides it.
    #[serde(default)]
    pub subtitle: String,
    /// Small print at the bottom. Empty hides it.
    #[serde(default)]
    pub caption: String,
    /// Auto-dismiss delay in milliseconds. `0` keeps the toast until dismissed.
    #[serde(default)]
    pub timeout: u64,
    /// Severity; `type` on the wire.
    #[serde(rename = "type")]
    pub kind: ToastKind,
}

impl NewToast {
    #[must_use]
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title)
    }

    #[must_use]
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title)
    }

    fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self { title: title.into(), subtitle: String::new(), caption: String::new(), timeout: 0, kind }
    }

    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout = timeout_ms;
        self
    }
}

/// A queued toast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastNotification {
    /// UUID v4 assigned by the queue on insertion.
    pub id: Uuid,
    /// Headline text.
    pub title: String,
    /// Secondary line under the title. Empty hides it.
    pub subtitle: String,
    /// Small print at the bottom. Empty hides it.
    pub caption: String,
    /// Auto-dismiss delay in milliseconds; `0` persists until dismissed.
    pub timeout: u64,
    /// Severity; `type` on the wire.
    #[serde(rename = "type")]
    pub kind: ToastKind,
}

impl ToastNotification {
    fn from_new(id: Uuid, toast: NewToast) -> Self {
        Self {
            id,
            title: toast.title,
            subtitle: toast.subtitle,
            caption: toast.caption,
            timeout: toast.timeout,
            kind: toast.kind,
        }
    }

    /// Delay before auto-dismissal, or `None` if the toast persists.
    #[must_use]
    pub fn expires_after(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_millis(self.timeout))
    }
}

/// Ordered queue of toast notifications shared across the UI.
#[derive(Clone, Debug, Default)]
pub struct ToastQueue {
    notifications: Store<Vec<ToastNotification>>,
    timers: Arc<Mutex<HashMap<Uuid, AbortHandle>>>,
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a toast and return its generated id.
    ///
    /// A positive `timeout` schedules removal `timeout` ms from now. Scheduling
    /// needs a tokio runtime; without one the toast stays until dismissed.
    pub fn add_toast_notification(&self, toast: NewToast) -> Uuid {
        let id = Uuid::new_v4();
        let notification = ToastNotification::from_new(id, toast);
        let expires_after = notification.expires_after();
        debug!(%id, kind = ?notification.kind, timeout_ms = notification.timeout, "toast added");

        self.notifications.update(|list| list.push(notification));

        if let Some(delay) = expires_after {
            self.schedule_expiry(id, delay);
        }
        id
    }

    /// Remove the toast with `id`. Returns whether anything was removed;
    /// an unknown id is a no-op and notifies nobody.
    pub fn dismiss_toast_notification(&self, id: Uuid) -> bool {
        if let Some(timer) = self.lock_timers().remove(&id) {
            timer.abort();
        }
        self.remove(id)
    }

    /// Snapshot of the queued toasts, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<ToastNotification> {
        self.notifications.get()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notifications.with(Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, id: Uuid) -> bool {
        self.notifications.with(|list| list.iter().any(|n| n.id == id))
    }

    /// Number of expiry timers that have not fired or been cancelled.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.lock_timers().len()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Vec<ToastNotification>) + Send + Sync + 'static,
    {
        self.notifications.subscribe(callback)
    }

    fn schedule_expiry(&self, id: Uuid, delay: Duration) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(%id, "no tokio runtime; toast will not auto-dismiss");
            return;
        };

        // Registered under the lock so the timer cannot fire before its handle is recorded.
        let mut timers = self.lock_timers();
        let queue = self.clone();
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            queue.expire(id);
        });
        timers.insert(id, task.abort_handle());
    }

    fn expire(&self, id: Uuid) {
        self.lock_timers().remove(&id);
        if self.remove(id) {
            debug!(%id, "toast expired");
        }
    }

    fn remove(&self, id: Uuid) -> bool {
        let removed = self.notifications.update_if(|list| {
            let before = list.len();
            list.retain(|n| n.id != id);
            list.len() != before
        });
        if removed {
            debug!(%id, "toast dismissed");
        }
        removed
    }

    fn lock_timers(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, AbortHandle>> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
