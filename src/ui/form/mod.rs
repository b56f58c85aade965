// SPDX-License-Identifier: MPL-2.0
//! Form validation.
//!
//! - [`field`] - `Form` and `Field` handles with per-field validation state
//! - [`validation`] - the submit-time pass and the live input clear

pub mod field;
pub mod validation;

pub use field::{Field, FieldId, FieldKind, FieldState, Form};
pub use validation::{
    annotate, check_field, input, is_valid_email, is_valid_phone, validate, FieldResult,
    Submission,
};
