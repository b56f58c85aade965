// SPDX-License-Identifier: MPL-2.0
//! Form and field handles.
//!
//! A `Form` is passed explicitly to the validation pass, so checks on one
//! form never touch fields of another form on the same page.

use crate::ui::notifications::Text;

/// Index of a field within its form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(usize);

impl FieldId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Input type of a field; selects which format rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Tel,
    Number,
    Select,
    TextArea,
}

/// Validation state of a field.
///
/// `Unvalidated` until the first submit attempt. Afterwards a submit sets
/// `Valid` or `Invalid`; live input can only move `Invalid` to `Valid`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Unvalidated,
    Valid,
    /// Carries the inline error message shown next to the field.
    Invalid(Text),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    kind: FieldKind,
    required: bool,
    value: String,
    state: FieldState,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            value: String::new(),
            state: FieldState::Unvalidated,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Email)
    }

    pub fn tel(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Tel)
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn state(&self) -> &FieldState {
        &self.state
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self.state, FieldState::Invalid(_))
    }

    /// The inline error message, if the field is invalid.
    #[must_use]
    pub fn error_message(&self) -> Option<&Text> {
        match &self.state {
            FieldState::Invalid(message) => Some(message),
            _ => None,
        }
    }

    pub(crate) fn set_state(&mut self, state: FieldState) {
        self.state = state;
    }
}

#[derive(Debug, Clone, Default)]
pub struct Form {
    name: String,
    fields: Vec<Field>,
    focused: Option<FieldId>,
    revealed: Option<FieldId>,
}

impl Form {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.push(field);
        self
    }

    pub fn push(&mut self, field: Field) -> FieldId {
        self.fields.push(field);
        FieldId(self.fields.len() - 1)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(id.0)
    }

    pub(crate) fn field_mut(&mut self, id: FieldId) -> Option<&mut Field> {
        self.fields.get_mut(id.0)
    }

    /// Looks a field up by name.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<FieldId> {
        self.fields.iter().position(|f| f.name == name).map(FieldId)
    }

    /// Iterates fields in document order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldId, &Field)> {
        self.fields.iter().enumerate().map(|(i, f)| (FieldId(i), f))
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = FieldId> {
        (0..self.fields.len()).map(FieldId)
    }

    /// Replaces a value without any validation side effects.
    pub fn set_value(&mut self, id: FieldId, value: impl Into<String>) {
        if let Some(field) = self.field_mut(id) {
            field.value = value.into();
        }
    }

    /// First invalid field in document order.
    #[must_use]
    pub fn first_invalid(&self) -> Option<FieldId> {
        self.fields().find(|(_, f)| f.is_invalid()).map(|(id, _)| id)
    }

    /// Number of inline error messages currently shown.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.fields.iter().filter(|f| f.is_invalid()).count()
    }

    pub fn focus(&mut self, id: FieldId) {
        self.focused = Some(id);
    }

    /// Scrolls `id` into view.
    pub fn reveal(&mut self, id: FieldId) {
        self.revealed = Some(id);
    }

    #[must_use]
    pub fn focused(&self) -> Option<FieldId> {
        self.focused
    }

    #[must_use]
    pub fn revealed(&self) -> Option<FieldId> {
        self.revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_keep_document_order() {
        let form = Form::new("order")
            .with_field(Field::text("customer_name").required())
            .with_field(Field::tel("phone"));

        let names: Vec<_> = form.fields().map(|(_, f)| f.name().to_string()).collect();
        assert_eq!(names, vec!["customer_name", "phone"]);
        assert_eq!(form.id_of("phone").map(FieldId::index), Some(1));
        assert_eq!(form.id_of("missing"), None);
    }

    #[test]
    fn new_fields_are_unvalidated() {
        let field = Field::email("email").with_value("a@b.co");
        assert_eq!(field.state(), &FieldState::Unvalidated);
        assert!(field.error_message().is_none());
    }

    #[test]
    fn set_value_does_not_touch_state() {
        let mut form = Form::new("f").with_field(Field::text("name").required());
        let id = form.id_of("name").unwrap();
        form.field_mut(id)
            .unwrap()
            .set_state(FieldState::Invalid(Text::key("field-required")));

        form.set_value(id, "Kim");
        assert!(form.field(id).unwrap().is_invalid());
    }
}
