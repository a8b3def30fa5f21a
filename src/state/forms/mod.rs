//! Form domain layer
//!
//! Type-safe values, focus handling and validation rules for the
//! registration form.

mod field;
mod form_state;
mod validation;

pub use field::{FieldName, Gender};
pub use form_state::{Form, FormState, RegisterForm, BUTTON_LOGIN, BUTTON_SIGN_UP};
pub use validation::{validate, ValidationResult, PASSWORD_MIN_LEN};
