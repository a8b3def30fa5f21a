//! Registration form values and focus handling

use super::field::{FieldName, Gender};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Values entered into the registration form.
///
/// Serializes to the exact body posted to the users endpoint.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormState {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub email: String,
    pub password: String,
}

impl FormState {
    /// Get the current value of a field as text
    pub fn value(&self, field: FieldName) -> &str {
        match field {
            FieldName::FirstName => &self.first_name,
            FieldName::LastName => &self.last_name,
            FieldName::Email => &self.email,
            FieldName::Password => &self.password,
            FieldName::Gender => self.gender.as_str(),
        }
    }

    /// Mutable access to a free-text field (None for the gender choice)
    pub fn text_mut(&mut self, field: FieldName) -> Option<&mut String> {
        match field {
            FieldName::FirstName => Some(&mut self.first_name),
            FieldName::LastName => Some(&mut self.last_name),
            FieldName::Email => Some(&mut self.email),
            FieldName::Password => Some(&mut self.password),
            FieldName::Gender => None,
        }
    }

    /// Non-emptiness check performed right before a request is issued.
    ///
    /// Looser than validation: it ignores the email pattern and password
    /// length, and it requires last_name, which validation does not.
    pub fn passes_submit_guard(&self) -> bool {
        !self.first_name.is_empty()
            && !self.last_name.is_empty()
            && !self.email.is_empty()
            && !self.password.is_empty()
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("gender", &self.gender)
            .field("email", &self.email)
            .field("password", &format_args!("<{} chars>", self.password.chars().count()))
            .finish()
    }
}

/// Focus state of the registration view.
///
/// Indices 0..=4 map to [`FieldName::ALL`]; index 5 is the buttons row.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub active_field_index: usize,
    /// Which button is selected when on the buttons row (0=Log In, 1=Sign Up)
    pub selected_button: usize,
}

pub const BUTTON_LOGIN: usize = 0;
pub const BUTTON_SIGN_UP: usize = 1;
const BUTTONS_ROW: usize = FieldName::ALL.len();

impl RegisterForm {
    pub fn new() -> Self {
        Self {
            active_field_index: 0,
            selected_button: BUTTON_SIGN_UP,
        }
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == BUTTONS_ROW
    }

    /// Field under focus, None on the buttons row
    pub fn active_field_name(&self) -> Option<FieldName> {
        FieldName::ALL.get(self.active_field_index).copied()
    }

    /// Move to the next button (wraps around)
    pub fn next_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % 2;
    }

    /// Move to the previous button (wraps around)
    pub fn prev_button(&mut self) {
        self.next_button();
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for RegisterForm {
    fn field_count(&self) -> usize {
        BUTTONS_ROW + 1 // five inputs, buttons
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(BUTTONS_ROW);
    }
}
