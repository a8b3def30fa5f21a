//! Registration form session
//!
//! Owns the form values and their derived validation errors, decides when a
//! request may be issued, and turns settled requests into effects for the
//! application shell to apply. The session performs no I/O itself.

use super::forms::{validate, FieldName, FormState, Gender, ValidationResult};

/// Notification shown after the backend accepts a registration
pub const SUCCESS_NOTICE: &str = "Registration successful";

/// Lifecycle of a registration request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Pending,
    Succeeded,
    Failed(String),
}

/// Work requested by the session once a request settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// Show a user-visible notification
    Notify(String),
    /// Move to the login view
    NavigateToLogin,
    /// Record on the diagnostic channel only
    Diagnose(String),
}

#[derive(Debug, Default)]
pub struct FormSession {
    values: FormState,
    errors: ValidationResult,
    in_flight: usize,
    last_outcome: Option<SubmissionOutcome>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &FormState {
        &self.values
    }

    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    /// Number of requests issued but not yet settled
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    #[allow(dead_code)] // Inspection only; failures stay hidden from the UI
    pub fn last_outcome(&self) -> Option<&SubmissionOutcome> {
        self.last_outcome.as_ref()
    }

    /// Replace the value of a field.
    ///
    /// Gender accepts only `male` or `female`; anything else is ignored.
    pub fn set_field(&mut self, field: FieldName, value: &str) {
        match self.values.text_mut(field) {
            Some(text) => *text = value.to_string(),
            None => match Gender::parse(value) {
                Some(gender) => self.values.gender = gender,
                None => {
                    tracing::debug!(field = %field, value, "ignoring unknown choice");
                    return;
                }
            },
        }
        self.revalidate();
    }

    pub fn push_char(&mut self, field: FieldName, c: char) {
        if let Some(text) = self.values.text_mut(field) {
            text.push(c);
            self.revalidate();
        }
    }

    pub fn pop_char(&mut self, field: FieldName) {
        if let Some(text) = self.values.text_mut(field) {
            if text.pop().is_some() {
                self.revalidate();
            }
        }
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.values.gender = gender;
        self.revalidate();
    }

    pub fn toggle_gender(&mut self) {
        self.set_gender(self.values.gender.toggle());
    }

    /// Attempt a submission.
    ///
    /// Returns the request body when every required text field is non-empty.
    /// Validation errors are refreshed for display but do not block the
    /// request. Each successful call counts as a separate in-flight request.
    pub fn submit(&mut self) -> Option<FormState> {
        self.errors = validate(&self.values);
        tracing::debug!(values = ?self.values, "submit requested");

        if !self.values.passes_submit_guard() {
            return None;
        }
        if !self.errors.is_valid() {
            tracing::debug!(
                errors = self.errors.len(),
                "submitting despite validation errors"
            );
        }

        self.in_flight += 1;
        self.last_outcome = Some(SubmissionOutcome::Pending);
        Some(self.values.clone())
    }

    /// Apply the outcome of a finished request
    pub fn settle(&mut self, outcome: SubmissionOutcome) -> Vec<SessionEffect> {
        let effects = match &outcome {
            SubmissionOutcome::Pending => return Vec::new(),
            SubmissionOutcome::Succeeded => {
                self.values = FormState::default();
                self.errors = ValidationResult::default();
                vec![
                    SessionEffect::Notify(SUCCESS_NOTICE.to_string()),
                    SessionEffect::NavigateToLogin,
                ]
            }
            SubmissionOutcome::Failed(reason) => vec![SessionEffect::Diagnose(reason.clone())],
        };

        self.in_flight = self.in_flight.saturating_sub(1);
        self.last_outcome = Some(outcome);
        effects
    }

    fn revalidate(&mut self) {
        self.errors = validate(&self.values);
        tracing::debug!(values = ?self.values, errors = self.errors.len(), "form values changed");
    }
}
