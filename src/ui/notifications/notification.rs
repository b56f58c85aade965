// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct and `Kind` enum
//! used throughout the notification system.

use crate::config::DEFAULT_NOTIFICATION_TTL_MS;
use std::time::Duration;
use tokio::time::Instant;

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric ID.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "alert-{}", self.0)
    }
}

/// Kind of banner; determines styling and icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kind {
    Success,
    Error,
    Warning,
    /// Fallback for anything unrecognized.
    #[default]
    Info,
}

impl Kind {
    /// Returns the CSS class of the banner.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Kind::Success => "alert-success",
            Kind::Error => "alert-danger",
            Kind::Warning => "alert-warning",
            Kind::Info => "alert-info",
        }
    }

    /// Returns the icon name shown in front of the message.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Kind::Success => "check-circle",
            Kind::Error => "exclamation-triangle",
            Kind::Warning => "exclamation-circle",
            Kind::Info => "info-circle",
        }
    }

    /// Parses a kind name; unknown names map to [`Kind::Info`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "success" => Kind::Success,
            "error" => Kind::Error,
            "warning" => Kind::Warning,
            _ => Kind::Info,
        }
    }
}

/// What a banner says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    /// An i18n key resolved at render time, with interpolation arguments.
    Key {
        key: String,
        args: Vec<(String, String)>,
    },
    /// Text shown as-is (usually a message supplied by the server).
    Literal(String),
}

impl Text {
    pub fn key(key: impl Into<String>) -> Self {
        Text::Key {
            key: key.into(),
            args: Vec::new(),
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Text::Literal(text.into())
    }

    /// Adds an interpolation argument. Ignored for literal text.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Text::Key { args, .. } = &mut self {
            args.push((name.into(), value.into()));
        }
        self
    }
}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        Text::literal(text)
    }
}

impl From<String> for Text {
    fn from(text: String) -> Self {
        Text::Literal(text)
    }
}

/// A banner shown to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    kind: Kind,
    text: Text,
    created_at: Instant,
    ttl: Duration,
}

impl Notification {
    /// Creates a notification with the default lifetime (5s).
    pub fn new(kind: Kind, text: impl Into<Text>) -> Self {
        Self {
            id: NotificationId::new(),
            kind,
            text: text.into(),
            created_at: Instant::now(),
            ttl: Duration::from_millis(DEFAULT_NOTIFICATION_TTL_MS),
        }
    }

    pub fn success(text: impl Into<Text>) -> Self {
        Self::new(Kind::Success, text)
    }

    pub fn error(text: impl Into<Text>) -> Self {
        Self::new(Kind::Error, text)
    }

    pub fn warning(text: impl Into<Text>) -> Self {
        Self::new(Kind::Warning, text)
    }

    pub fn info(text: impl Into<Text>) -> Self {
        Self::new(Kind::Info, text)
    }

    /// Overrides the lifetime.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn text(&self) -> &Text {
        &self.text
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Returns when this notification is due for removal.
    #[must_use]
    pub fn expires_at(&self) -> Instant {
        self.created_at + self.ttl
    }

    /// Returns whether the lifetime has elapsed at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}
