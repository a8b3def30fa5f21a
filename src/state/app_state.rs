//! Application state definitions

use super::forms::{FieldName, Form, Gender, RegisterForm};
use super::session::FormSession;
use chrono::{DateTime, Utc};

/// Number of diagnostics kept in memory
const MAX_DIAGNOSTICS: usize = 50;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Register,
    Login,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Register => "Create New Account",
            View::Login => "Log In",
        }
    }
}

/// Entry on the diagnostic channel
#[allow(dead_code)] // Kept for inspection; the UI never displays diagnostics
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub at: DateTime<Utc>,
    pub message: String,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Registration
    pub session: FormSession,
    pub register_form: RegisterForm,

    // Feedback
    pub notification: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl AppState {
    /// Field under focus in the registration view
    pub fn active_field(&self) -> Option<FieldName> {
        self.register_form.active_field_name()
    }

    /// Move to next form field
    pub fn next_form_field(&mut self) {
        self.register_form.next_field();
    }

    /// Move to previous form field
    pub fn prev_form_field(&mut self) {
        self.register_form.prev_field();
    }

    /// Handle character input in form
    pub fn form_input_char(&mut self, c: char) {
        match self.active_field() {
            Some(FieldName::Gender) => match c {
                'm' | 'M' => self.session.set_gender(Gender::Male),
                'f' | 'F' => self.session.set_gender(Gender::Female),
                ' ' => self.session.toggle_gender(),
                _ => {}
            },
            Some(field) => self.session.push_char(field, c),
            None => {}
        }
    }

    /// Handle backspace in form
    pub fn form_backspace(&mut self) {
        if let Some(field) = self.active_field() {
            self.session.pop_char(field);
        }
    }

    pub fn show_notification(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
    }

    pub fn has_notification(&self) -> bool {
        self.notification.is_some()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Record a message on the diagnostic channel, never shown to the user
    pub fn record_diagnostic(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(%message, "registration request failed");
        self.diagnostics.push(Diagnostic {
            at: Utc::now(),
            message,
        });
        if self.diagnostics.len() > MAX_DIAGNOSTICS {
            let overflow = self.diagnostics.len() - MAX_DIAGNOSTICS;
            self.diagnostics.drain(..overflow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_register() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Register);
        assert_eq!(state.current_view.title(), "Create New Account");
    }

    #[test]
    fn test_form_input_goes_to_active_field() {
        let mut state = AppState::default();
        state.form_input_char('J');
        state.next_form_field();
        state.form_input_char('D');
        assert_eq!(state.session.values().first_name, "J");
        assert_eq!(state.session.values().last_name, "D");
    }

    #[test]
    fn test_form_backspace() {
        let mut state = AppState::default();
        state.form_input_char('a');
        state.form_input_char('b');
        state.form_backspace();
        assert_eq!(state.session.values().first_name, "a");
    }

    #[test]
    fn test_gender_input_keys() {
        let mut state = AppState::default();
        state.register_form.set_active_field(4);
        assert_eq!(state.active_field(), Some(FieldName::Gender));

        state.form_input_char('f');
        assert_eq!(state.session.values().gender, Gender::Female);
        state.form_input_char(' ');
        assert_eq!(state.session.values().gender, Gender::Male);
        state.form_input_char('z');
        assert_eq!(state.session.values().gender, Gender::Male);
    }

    #[test]
    fn test_input_on_buttons_row_is_ignored() {
        let mut state = AppState::default();
        state.prev_form_field();
        assert_eq!(state.active_field(), None);
        state.form_input_char('x');
        state.form_backspace();
        assert_eq!(state.session.values().first_name, "");
    }

    #[test]
    fn test_notification_lifecycle() {
        let mut state = AppState::default();
        assert!(!state.has_notification());
        state.show_notification("done");
        assert_eq!(state.notification.as_deref(), Some("done"));
        state.dismiss_notification();
        assert!(!state.has_notification());
    }

    #[test]
    fn test_record_diagnostic_does_not_notify() {
        let mut state = AppState::default();
        state.record_diagnostic("connection refused");
        assert_eq!(state.diagnostics.len(), 1);
        assert_eq!(state.diagnostics[0].message, "connection refused");
        assert!(!state.has_notification());
    }

    #[test]
    fn test_diagnostics_are_bounded() {
        let mut state = AppState::default();
        for i in 0..(MAX_DIAGNOSTICS + 5) {
            state.record_diagnostic(format!("failure {i}"));
        }
        assert_eq!(state.diagnostics.len(), MAX_DIAGNOSTICS);
        assert_eq!(state.diagnostics[0].message, "failure 5");
    }
}
