// SPDX-License-Identifier: MPL-2.0
//! Banner notification system for user feedback.
//!
//! Notifications appear temporarily to report the outcome of an action
//! (item added, request failed, form rejected) and remove themselves after
//! their lifetime elapses, or earlier when closed.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct with kinds and lifetime
//! - [`manager`] - `Manager` holding the visible stack and the cap
//! - [`notifier`] - `Notifier`, the cloneable handle with timer tasks
//! - [`banner`] - `Banner` renderer
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::notifications::{Kind, Notifier, Text};
//!
//! let notifier = Notifier::default();
//! notifier.notify(Kind::Success, Text::key("order-deleted"));
//! let markup = notifier.render(&i18n);
//! ```
//!
//! # Design Considerations
//!
//! - Default lifetime: 5s, overridable per call
//! - Max visible banners: 5 by default; the oldest is dropped beyond that

mod banner;
mod manager;
mod notification;
mod notifier;

pub use banner::Banner;
pub use manager::Manager;
pub use notification::{Kind, Notification, NotificationId, Text};
pub use notifier::Notifier;
