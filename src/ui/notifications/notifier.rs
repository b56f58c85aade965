// SPDX-License-Identifier: MPL-2.0
//! Shared handle for raising notifications from anywhere in the client.
//!
//! Cloning a `Notifier` is cheap; all clones feed the same [`Manager`].
//! When called inside a Tokio runtime, each notification gets a timer task
//! that removes it once its lifetime has elapsed.

use super::banner::Banner;
use super::manager::Manager;
use super::notification::{Kind, Notification, NotificationId, Text};
use crate::i18n::fluent::I18n;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Notifier {
    manager: Arc<Mutex<Manager>>,
    default_ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Manager::new(), Duration::from_millis(crate::config::DEFAULT_NOTIFICATION_TTL_MS))
    }
}

impl Notifier {
    #[must_use]
    pub fn new(manager: Manager, default_ttl: Duration) -> Self {
        Self {
            manager: Arc::new(Mutex::new(manager)),
            default_ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Manager> {
        // A panic while holding the lock cannot leave the stack half-updated.
        self.manager.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Shows a banner with the default lifetime.
    pub fn notify(&self, kind: Kind, text: impl Into<Text>) -> NotificationId {
        self.notify_with_ttl(kind, text, self.default_ttl)
    }

    /// Shows a banner that disappears after `ttl`.
    pub fn notify_with_ttl(
        &self,
        kind: Kind,
        text: impl Into<Text>,
        ttl: Duration,
    ) -> NotificationId {
        let notification = Notification::new(kind, text).with_ttl(ttl);
        let id = notification.id();
        let deadline = notification.expires_at();

        tracing::debug!(%id, ?kind, ?ttl, "showing notification");
        if let Some(evicted) = self.lock().push(notification) {
            tracing::debug!(id = %evicted, "notification stack full, dropped oldest");
        }

        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let manager = Arc::clone(&self.manager);
            runtime.spawn(async move {
                tokio::time::sleep_until(deadline).await;
                let mut manager = manager.lock().unwrap_or_else(PoisonError::into_inner);
                if manager.dismiss(id) {
                    tracing::trace!(%id, "notification expired");
                }
            });
        }

        id
    }

    pub fn success(&self, text: impl Into<Text>) -> NotificationId {
        self.notify(Kind::Success, text)
    }

    pub fn error(&self, text: impl Into<Text>) -> NotificationId {
        self.notify(Kind::Error, text)
    }

    pub fn warning(&self, text: impl Into<Text>) -> NotificationId {
        self.notify(Kind::Warning, text)
    }

    pub fn info(&self, text: impl Into<Text>) -> NotificationId {
        self.notify(Kind::Info, text)
    }

    /// Closes a banner immediately. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        self.lock().dismiss(id)
    }

    /// Removes expired banners without waiting for timer tasks.
    pub fn tick(&self) {
        self.lock().tick();
    }

    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.lock().contains(id)
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.lock().visible_count()
    }

    /// Returns a copy of the visible banners, newest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().visible().cloned().collect()
    }

    /// Renders the visible banners as markup.
    #[must_use]
    pub fn render(&self, i18n: &I18n) -> String {
        Banner::render_stack(&self.snapshot(), i18n)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_outside_runtime_still_shows_banner() {
        let notifier = Notifier::default();
        let id = notifier.success("saved");
        assert!(notifier.contains(id));
        assert!(notifier.dismiss(id));
        assert!(!notifier.contains(id));
    }

    #[test]
    fn clones_share_the_same_stack() {
        let notifier = Notifier::default();
        let other = notifier.clone();
        other.error("boom");
        assert_eq!(notifier.visible_count(), 1);
    }

    #[test]
    fn cap_is_enforced_through_handle() {
        let notifier = Notifier::new(Manager::with_capacity(2), Duration::from_secs(5));
        for i in 0..10 {
            notifier.info(format!("n{i}"));
        }
        assert_eq!(notifier.visible_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn banner_disappears_after_ttl() {
        let notifier = Notifier::default();
        let id = notifier.notify_with_ttl(Kind::Info, "short", Duration::from_millis(200));

        tokio::time::sleep(Duration::from_millis(199)).await;
        assert!(notifier.contains(id));

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!notifier.contains(id));
    }

    #[tokio::test(start_paused = true)]
    async fn default_ttl_is_applied() {
        let notifier = Notifier::default();
        let id = notifier.warning("careful");

        tokio::time::sleep(Duration::from_millis(4999)).await;
        assert!(notifier.contains(id));
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!notifier.contains(id));
    }

    #[tokio::test(start_paused = true)]
    async fn manual_dismiss_before_timer_is_harmless() {
        let notifier = Notifier::default();
        let id = notifier.notify_with_ttl(Kind::Success, "done", Duration::from_millis(100));
        assert!(notifier.dismiss(id));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(notifier.visible_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn each_banner_is_timed_independently() {
        let notifier = Notifier::default();
        let first = notifier.notify_with_ttl(Kind::Info, "a", Duration::from_millis(100));
        let second = notifier.notify_with_ttl(Kind::Info, "a", Duration::from_millis(300));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(!notifier.contains(first));
        assert!(notifier.contains(second));
    }
}
