//! Validation rules for the registration form

use super::field::FieldName;
use super::form_state::FormState;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Minimum password length, in UTF-16 code units
pub const PASSWORD_MIN_LEN: usize = 5;

/// HTML "valid e-mail address" production
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

/// Per-field error messages derived from a [`FormState`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<FieldName, String>,
}

impl ValidationResult {
    /// True when no field has an error
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Record an error unless the field already has one
    fn reject(&mut self, field: FieldName, message: String) {
        self.errors.entry(field).or_insert(message);
    }
}

pub fn is_well_formed_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Evaluate every rule against the form values.
///
/// Only the first failing rule of a field is reported. last_name and gender
/// carry no rules.
pub fn validate(state: &FormState) -> ValidationResult {
    let mut result = ValidationResult::default();

    require(&mut result, FieldName::FirstName, &state.first_name);

    require(&mut result, FieldName::Email, &state.email);
    if !state.email.is_empty() && !is_well_formed_email(&state.email) {
        result.reject(
            FieldName::Email,
            format!("{} must be a valid email", FieldName::Email),
        );
    }

    require(&mut result, FieldName::Password, &state.password);
    if !state.password.is_empty() && password_len(&state.password) < PASSWORD_MIN_LEN {
        result.reject(
            FieldName::Password,
            format!(
                "{} must be at least {PASSWORD_MIN_LEN} characters",
                FieldName::Password
            ),
        );
    }

    result
}

/// Length as measured by the registration backend's browser client
fn password_len(password: &str) -> usize {
    password.encode_utf16().count()
}

fn require(result: &mut ValidationResult, field: FieldName, value: &str) {
    if value.is_empty() {
        result.reject(field, format!("{field} is a required field"));
    }
}
