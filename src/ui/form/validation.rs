// SPDX-License-Identifier: MPL-2.0
//! The validation pass run when a form is submitted, plus the live clear
//! run on every input/change event.

use super::field::{Field, FieldId, FieldKind, FieldState, Form};
use crate::ui::notifications::{Notifier, Text};
use regex::Regex;
use std::sync::LazyLock;

pub const REQUIRED_KEY: &str = "field-required";
pub const INVALID_EMAIL_KEY: &str = "field-invalid-email";
pub const INVALID_PHONE_KEY: &str = "field-invalid-phone";
pub const FORM_INVALID_KEY: &str = "form-invalid";

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\-\s()]+$").expect("phone pattern compiles"));

/// Outcome of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Every rule passed; let the submit go through.
    Proceed,
    /// At least one field failed; the submit must be suppressed.
    Blocked { first_invalid: FieldId },
}

impl Submission {
    #[must_use]
    pub fn is_blocked(self) -> bool {
        matches!(self, Submission::Blocked { .. })
    }
}

/// Result of checking one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldResult {
    pub field: FieldId,
    pub valid: bool,
    pub message: Option<Text>,
}

/// Checks `value` against the email rule: non-whitespace ASCII shaped like
/// `local@domain.tld`.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    value.is_ascii() && EMAIL_PATTERN.is_match(value)
}

/// Checks `value` against the phone rule: digits, spaces, hyphens and
/// parentheses only.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

/// Runs every rule against one field. Returns the message key of the first
/// failing rule.
#[must_use]
pub fn check_field(field: &Field) -> Option<&'static str> {
    let value = field.value().trim();

    if value.is_empty() {
        return field.is_required().then_some(REQUIRED_KEY);
    }

    match field.kind() {
        FieldKind::Email if !is_valid_email(value) => Some(INVALID_EMAIL_KEY),
        FieldKind::Tel if !is_valid_phone(value) => Some(INVALID_PHONE_KEY),
        _ => None,
    }
}

/// Re-validates every field and refreshes its inline annotation.
///
/// No banner, focus or scrolling; see [`validate`] for the full submit pass.
pub fn annotate(form: &mut Form) -> Vec<FieldResult> {
    let ids: Vec<FieldId> = form.ids().collect();
    let mut results = Vec::with_capacity(ids.len());

    for id in ids {
        let Some(field) = form.field_mut(id) else {
            continue;
        };
        let message = check_field(field).map(Text::key);
        let state = match &message {
            Some(message) => FieldState::Invalid(message.clone()),
            None => FieldState::Valid,
        };
        field.set_state(state);
        results.push(FieldResult {
            field: id,
            valid: message.is_none(),
            message,
        });
    }

    results
}

/// Full validation pass for a submit attempt.
///
/// On failure a single generic error banner is raised and the first
/// invalid field is scrolled into view and focused.
pub fn validate(form: &mut Form, notifier: &Notifier) -> Submission {
    let results = annotate(form);
    let Some(first_invalid) = results.iter().find(|r| !r.valid).map(|r| r.field) else {
        tracing::debug!(form = form.name(), "form passed validation");
        return Submission::Proceed;
    };

    let failed = results.iter().filter(|r| !r.valid).count();
    tracing::debug!(form = form.name(), failed, "form submission blocked");

    notifier.error(Text::key(FORM_INVALID_KEY));
    form.reveal(first_invalid);
    form.focus(first_invalid);
    Submission::Blocked { first_invalid }
}

/// Handles an input/change event on `id`.
///
/// Stores the value and, if the field was flagged invalid and is now
/// non-empty, clears the flag. Never flags a field as invalid.
pub fn input(form: &mut Form, id: FieldId, value: impl Into<String>) {
    let Some(field) = form.field_mut(id) else {
        return;
    };
    let value = value.into();
    let clears = field.is_invalid() && !value.trim().is_empty();
    form.set_value(id, value);

    if clears {
        if let Some(field) = form.field_mut(id) {
            field.set_state(FieldState::Valid);
        }
    }
}
