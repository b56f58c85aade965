// SPDX-License-Identifier: MPL-2.0
//! `cafe_client` is the client toolkit of the café ordering service.
//!
//! It provides the cross-cutting pieces every page relies on: transient
//! notification banners, a uniform request gateway to the café server, and a
//! submit-time form validation pass, plus the cart and admin actions built
//! on top of them.

#![doc(html_root_url = "https://docs.rs/cafe_client/0.1.0")]

pub mod app;
pub mod cafe;
pub mod config;
pub mod error;
pub mod format;
pub mod gateway;
pub mod i18n;
pub mod ui;
