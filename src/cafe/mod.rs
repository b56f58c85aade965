// SPDX-License-Identifier: MPL-2.0
//! Café feature actions built on the gateway and notification service.
//!
//! - [`api`] - Request and response shapes of the café server
//! - [`cart`] - Customer cart actions
//! - [`admin`] - Order and menu management for staff

pub mod admin;
pub mod api;
pub mod cart;

pub use admin::Admin;
pub use cart::Cart;

use crate::gateway::REQUEST_FAILED_KEY;
use crate::ui::notifications::{Notifier, Text};

/// How a feature action ended. Banners have already been raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server accepted the action.
    Done,
    /// The server answered with `success: false`.
    Rejected,
    /// The request never produced a usable reply.
    Failed,
    /// The user declined the confirmation prompt.
    Cancelled,
}

impl Outcome {
    #[must_use]
    pub fn is_done(self) -> bool {
        self == Outcome::Done
    }
}

/// Shows the server's rejection message, or the generic failure text when
/// the server gave none.
pub(crate) fn reject(notifier: &Notifier, message: Option<String>) -> Outcome {
    let text = match message {
        Some(message) if !message.trim().is_empty() => Text::literal(message),
        _ => Text::key(REQUEST_FAILED_KEY),
    };
    notifier.error(text);
    Outcome::Rejected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_prefers_server_message() {
        let notifier = Notifier::default();
        assert_eq!(reject(&notifier, Some("품절".into())), Outcome::Rejected);
        assert_eq!(notifier.snapshot()[0].text(), &Text::literal("품절"));
    }

    #[test]
    fn rejection_without_message_uses_generic_text() {
        let notifier = Notifier::default();
        reject(&notifier, Some("  ".into()));
        reject(&notifier, None);
        assert!(notifier
            .snapshot()
            .iter()
            .all(|n| n.text() == &Text::key(REQUEST_FAILED_KEY)));
    }
}
