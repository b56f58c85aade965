// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! Banner and validation messages are stored as Fluent keys and resolved at
//! render time, so the same notification can be shown in Korean or English.
//!
//! # Features
//!
//! - Locale detection from CLI, config, or system settings
//! - `.ftl` translation files embedded into the binary
//! - Fallback to `en-US` when a locale or key is missing

pub mod fluent;
