// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` holds the banners currently on screen, enforces the
//! visible cap and removes banners whose lifetime has elapsed.

use super::notification::{Notification, NotificationId};
use crate::config::DEFAULT_MAX_NOTIFICATIONS;
use std::collections::VecDeque;
use tokio::time::Instant;

/// Manages the visible notifications.
#[derive(Debug)]
pub struct Manager {
    /// Currently visible notifications (newest first).
    visible: VecDeque<Notification>,
    /// Maximum number of banners on screen; the oldest is evicted beyond it.
    capacity: usize,
}

impl Default for Manager {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_NOTIFICATIONS)
    }
}

impl Manager {
    /// Creates a new empty notification manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager showing at most `capacity` banners (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            visible: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes a new notification to the top of the stack.
    ///
    /// When the stack is full, the oldest banner is dropped and its ID returned.
    pub fn push(&mut self, notification: Notification) -> Option<NotificationId> {
        self.visible.push_front(notification);
        if self.visible.len() > self.capacity {
            return self.visible.pop_back().map(|evicted| evicted.id());
        }
        None
    }

    /// Dismisses a notification by its ID.
    ///
    /// Returns `true` if the notification was found and removed.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            return true;
        }
        false
    }

    /// Removes every notification whose lifetime has elapsed at `now`.
    ///
    /// Returns the IDs that were removed.
    pub fn expire(&mut self, now: Instant) -> Vec<NotificationId> {
        let expired: Vec<NotificationId> = self
            .visible
            .iter()
            .filter(|n| n.is_expired_at(now))
            .map(Notification::id)
            .collect();

        self.visible.retain(|n| !n.is_expired_at(now));
        expired
    }

    /// Processes a tick event against the current time.
    pub fn tick(&mut self) {
        self.expire(Instant::now());
    }

    /// Returns the currently visible notifications, newest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    /// Returns whether a notification with `id` is still visible.
    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.visible.iter().any(|n| n.id() == id)
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty()
    }

    /// Clears all notifications.
    pub fn clear(&mut self) {
        self.visible.clear();
    }
}
