// SPDX-License-Identifier: MPL-2.0
//! Headless user interface pieces shared by every page.
//!
//! - [`notifications`] - Transient status banners with auto-dismiss
//! - [`form`] - Submit-time form validation and live error clearing
//! - [`page`] - Page-level effects (cart counter, reload, confirmation)

pub mod form;
pub mod notifications;
pub mod page;
