//! Application state and core logic

use crate::api::{UsersApi, UsersClient};
use crate::config::TuiConfig;
use crate::state::{
    AppState, SessionEffect, SubmissionOutcome, View, BUTTON_LOGIN, BUTTON_SIGN_UP,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Users service client shared with request tasks
    api: Arc<dyn UsersApi>,
    /// Address shown in the status bar
    pub api_url: String,
    /// Sender handed to each request task
    outcome_tx: mpsc::UnboundedSender<SubmissionOutcome>,
    /// Settled requests waiting to be applied
    outcome_rx: mpsc::UnboundedReceiver<SubmissionOutcome>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance from configuration
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let client = UsersClient::new(&config.api_base_url(), config.request_timeout())?;
        let api_url = client.users_url().to_string();
        tracing::info!(%api_url, "users service configured");
        Ok(Self::with_api(Arc::new(client), api_url))
    }

    /// Create an App around any users API implementation
    pub fn with_api(api: Arc<dyn UsersApi>, api_url: String) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            api,
            api_url,
            outcome_tx,
            outcome_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Notification dismissal first (modal)
        if self.state.has_notification() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_notification();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Register => self.handle_register_key(key),
            View::Login => self.handle_login_key(key),
        }
        Ok(())
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        if self.state.current_view == view {
            return;
        }
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
        tracing::debug!(?view, "navigated");
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        self.state.current_view = self.state.view_history.pop().unwrap_or_default();
    }

    /// Handle keys in the registration view
    fn handle_register_key(&mut self, key: KeyEvent) {
        // Submit (Ctrl+S or Cmd+Enter / Ctrl+Enter)
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.submit_registration();
            return;
        }
        if key.code == KeyCode::Enter && key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) {
            self.submit_registration();
            return;
        }

        if self.state.register_form.is_buttons_row_active() {
            match key.code {
                KeyCode::Left | KeyCode::Char('h') => self.state.register_form.prev_button(),
                KeyCode::Right | KeyCode::Char('l') => self.state.register_form.next_button(),
                KeyCode::Enter | KeyCode::Char(' ') => self.press_selected_button(),
                KeyCode::Tab | KeyCode::Down => self.state.next_form_field(),
                KeyCode::BackTab | KeyCode::Up => self.state.prev_form_field(),
                KeyCode::Esc => self.go_back(),
                _ => {}
            }
            return;
        }

        let on_choice = self.state.active_field().is_some_and(|f| f.is_choice());
        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => self.state.next_form_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_form_field(),
            KeyCode::Left | KeyCode::Right if on_choice => self.state.session.toggle_gender(),
            KeyCode::Char(c) => self.state.form_input_char(c),
            KeyCode::Backspace => self.state.form_backspace(),
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }

    fn press_selected_button(&mut self) {
        match self.state.register_form.selected_button {
            BUTTON_SIGN_UP => self.submit_registration(),
            BUTTON_LOGIN => self.navigate(View::Login),
            _ => {}
        }
    }

    /// Handle keys in the login view
    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('r') => {
                if self.state.view_history.is_empty() {
                    self.navigate(View::Register);
                } else {
                    self.go_back();
                }
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Issue a registration request if the submit guard passes.
    ///
    /// The request runs on its own task; its outcome comes back through the
    /// outcome channel and is applied by [`App::drain_submissions`].
    pub fn submit_registration(&mut self) {
        let Some(body) = self.state.session.submit() else {
            tracing::debug!("submit skipped: required fields are empty");
            return;
        };

        let api = Arc::clone(&self.api);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = match api.create_user(&body).await {
                Ok(()) => SubmissionOutcome::Succeeded,
                Err(err) => {
                    tracing::warn!(status = ?err.status(), "registration rejected");
                    SubmissionOutcome::Failed(err.to_string())
                }
            };
            // Receiver only goes away when the app is shutting down
            let _ = tx.send(outcome);
        });
    }

    /// Apply every outcome that has arrived since the last call
    pub fn drain_submissions(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: SubmissionOutcome) {
        for effect in self.state.session.settle(outcome) {
            match effect {
                SessionEffect::Notify(message) => self.state.show_notification(message),
                SessionEffect::NavigateToLogin => {
                    self.state.register_form.reset();
                    self.navigate(View::Login);
                }
                SessionEffect::Diagnose(reason) => self.state.record_diagnostic(reason),
            }
        }
    }

    /// Wait for the next request to settle and apply it
    #[cfg(test)]
    async fn settle_next(&mut self) {
        if let Some(outcome) = self.outcome_rx.recv().await {
            self.apply_outcome(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockUsersApi};
    use crate::state::{FieldName, FormState, Gender, SUCCESS_NOTICE};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with(mock: MockUsersApi) -> App {
        App::with_api(Arc::new(mock), "http://test/users".to_string())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn fill(app: &mut App, first: &str, last: &str, email: &str, password: &str) {
        let session = &mut app.state.session;
        session.set_field(FieldName::FirstName, first);
        session.set_field(FieldName::LastName, last);
        session.set_field(FieldName::Gender, "male");
        session.set_field(FieldName::Email, email);
        session.set_field(FieldName::Password, password);
    }

    fn jane() -> FormState {
        FormState {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            gender: Gender::Male,
            email: "jane@x.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_on_register() {
            let app = app_with(MockUsersApi::new());
            assert_eq!(app.state.current_view, View::Register);
            assert!(!app.should_quit());
        }

        #[test]
        fn test_navigate_saves_history() {
            let mut app = app_with(MockUsersApi::new());
            app.navigate(View::Login);
            assert_eq!(app.state.current_view, View::Login);
            assert_eq!(app.state.view_history, vec![View::Register]);
        }

        #[test]
        fn test_navigate_to_same_view_is_noop() {
            let mut app = app_with(MockUsersApi::new());
            app.navigate(View::Register);
            assert!(app.state.view_history.is_empty());
        }

        #[test]
        fn test_go_back_restores_previous_view() {
            let mut app = app_with(MockUsersApi::new());
            app.navigate(View::Login);
            app.go_back();
            assert_eq!(app.state.current_view, View::Register);
        }

        #[test]
        fn test_go_back_empty_history_lands_on_register() {
            let mut app = app_with(MockUsersApi::new());
            app.state.current_view = View::Login;
            app.go_back();
            assert_eq!(app.state.current_view, View::Register);
        }

        #[test]
        fn test_login_button_navigates() {
            let mut app = app_with(MockUsersApi::new());
            app.handle_key(key(KeyCode::BackTab)).unwrap();
            app.handle_key(key(KeyCode::Left)).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.state.current_view, View::Login);
        }

        #[test]
        fn test_login_view_keys() {
            let mut app = app_with(MockUsersApi::new());
            app.navigate(View::Login);
            app.handle_key(key(KeyCode::Char('r'))).unwrap();
            assert_eq!(app.state.current_view, View::Register);

            app.navigate(View::Login);
            app.handle_key(key(KeyCode::Char('q'))).unwrap();
            assert!(app.should_quit());
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_fills_fields_in_order() {
            let mut app = app_with(MockUsersApi::new());
            type_text(&mut app, "Jane");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "Doe");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            type_text(&mut app, "jane@x.com");
            app.handle_key(key(KeyCode::Down)).unwrap();
            type_text(&mut app, "secret1");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.handle_key(key(KeyCode::Right)).unwrap();

            let values = app.state.session.values();
            assert_eq!(values.first_name, "Jane");
            assert_eq!(values.last_name, "Doe");
            assert_eq!(values.email, "jane@x.com");
            assert_eq!(values.password, "secret1");
            assert_eq!(values.gender, Gender::Female);
        }

        #[test]
        fn test_backspace_removes_char() {
            let mut app = app_with(MockUsersApi::new());
            type_text(&mut app, "Janex");
            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert_eq!(app.state.session.values().first_name, "Jane");
        }

        #[test]
        fn test_errors_update_while_typing() {
            let mut app = app_with(MockUsersApi::new());
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "jane");
            assert_eq!(
                app.state.session.errors().error(FieldName::Email),
                Some("email must be a valid email")
            );
            type_text(&mut app, "@x.com");
            assert_eq!(app.state.session.errors().error(FieldName::Email), None);
        }

        #[test]
        fn test_notification_is_modal() {
            let mut app = app_with(MockUsersApi::new());
            app.state.show_notification("hello");
            type_text(&mut app, "abc");
            assert_eq!(app.state.session.values().first_name, "");

            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(!app.state.has_notification());
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_complete_form_posts_exact_body() {
            let mut mock = MockUsersApi::new();
            mock.expect_create_user()
                .withf(|user| *user == jane())
                .times(1)
                .returning(|_| Ok(()));
            let mut app = app_with(mock);
            fill(&mut app, "Jane", "Doe", "jane@x.com", "secret1");

            app.handle_key(ctrl('s')).unwrap();
            assert_eq!(app.state.session.in_flight(), 1);
            app.settle_next().await;
            assert_eq!(app.state.session.in_flight(), 0);
        }

        #[tokio::test]
        async fn test_empty_first_name_issues_no_request() {
            let mut mock = MockUsersApi::new();
            mock.expect_create_user().times(0);
            let mut app = app_with(mock);
            fill(&mut app, "", "Doe", "jane@x.com", "secret1");

            app.submit_registration();
            tokio::task::yield_now().await;
            app.drain_submissions();

            assert_eq!(app.state.session.in_flight(), 0);
            assert!(app.state.session.last_outcome().is_none());
            assert!(app
                .state
                .session
                .errors()
                .error(FieldName::FirstName)
                .is_some());
        }

        #[tokio::test]
        async fn test_invalid_email_still_posts() {
            let mut mock = MockUsersApi::new();
            mock.expect_create_user()
                .withf(|user| user.email == "not-an-email")
                .times(1)
                .returning(|_| Ok(()));
            let mut app = app_with(mock);
            fill(&mut app, "Jane", "Doe", "not-an-email", "secret1");

            app.submit_registration();
            assert!(app.state.session.errors().error(FieldName::Email).is_some());
            app.settle_next().await;
        }

        #[tokio::test]
        async fn test_success_resets_notifies_and_navigates() {
            let mut mock = MockUsersApi::new();
            mock.expect_create_user().times(1).returning(|_| Ok(()));
            let mut app = app_with(mock);
            fill(&mut app, "Jane", "Doe", "jane@x.com", "secret1");
            app.state.session.set_gender(Gender::Female);

            app.submit_registration();
            app.settle_next().await;

            assert_eq!(app.state.session.values(), &FormState::default());
            assert_eq!(app.state.notification.as_deref(), Some(SUCCESS_NOTICE));
            assert_eq!(app.state.current_view, View::Login);
            assert!(app.state.diagnostics.is_empty());
        }

        #[tokio::test]
        async fn test_failure_is_silent_and_keeps_values() {
            let mut mock = MockUsersApi::new();
            mock.expect_create_user().times(1).returning(|_| {
                Err(ApiError::Status {
                    status: 500,
                    message: "boom".to_string(),
                })
            });
            let mut app = app_with(mock);
            fill(&mut app, "Jane", "Doe", "jane@x.com", "secret1");

            app.submit_registration();
            app.settle_next().await;

            assert_eq!(app.state.session.values(), &jane());
            assert!(!app.state.has_notification());
            assert_eq!(app.state.current_view, View::Register);
            assert_eq!(app.state.diagnostics.len(), 1);
            assert_eq!(app.state.diagnostics[0].message, "API error: 500 - boom");
        }

        #[tokio::test]
        async fn test_double_submit_issues_two_requests() {
            let mut mock = MockUsersApi::new();
            mock.expect_create_user().times(2).returning(|_| Ok(()));
            let mut app = app_with(mock);
            fill(&mut app, "Jane", "Doe", "jane@x.com", "secret1");

            app.submit_registration();
            app.submit_registration();
            assert_eq!(app.state.session.in_flight(), 2);

            app.settle_next().await;
            app.settle_next().await;
            assert_eq!(app.state.session.in_flight(), 0);
        }

        #[tokio::test]
        async fn test_sign_up_button_submits() {
            let mut mock = MockUsersApi::new();
            mock.expect_create_user().times(1).returning(|_| Ok(()));
            let mut app = app_with(mock);
            fill(&mut app, "Jane", "Doe", "jane@x.com", "secret1");

            app.handle_key(key(KeyCode::BackTab)).unwrap();
            assert!(app.state.register_form.is_buttons_row_active());
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.settle_next().await;
            assert_eq!(app.state.current_view, View::Login);
        }

        #[tokio::test]
        async fn test_drain_applies_settled_outcomes() {
            let mut mock = MockUsersApi::new();
            mock.expect_create_user().times(1).returning(|_| Ok(()));
            let mut app = app_with(mock);
            fill(&mut app, "Jane", "Doe", "jane@x.com", "secret1");

            app.submit_registration();
            for _ in 0..100 {
                tokio::task::yield_now().await;
                app.drain_submissions();
                if app.state.session.in_flight() == 0 {
                    break;
                }
            }
            assert_eq!(app.state.session.in_flight(), 0);
            assert!(app.state.has_notification());
        }
    }
}
