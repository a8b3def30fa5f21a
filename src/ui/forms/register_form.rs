//! Registration form rendering

use super::field_renderer::{draw_choice_field, draw_field_error, draw_help_text, draw_text_field};
use crate::app::App;
use crate::state::{FieldName, View, BUTTON_LOGIN, BUTTON_SIGN_UP, PASSWORD_MIN_LEN};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Rows per input: bordered box plus inline error line
const FIELD_ROWS: u16 = 4;

const TERMS_NOTICE: &str =
    "By signing up, I agree to the Terms and Conditions and the Privacy Policy.";
const LOGIN_HINT: &str = "Already have an account? Select Log In.";

/// Draw registration form with action sidebar
pub fn draw_register(frame: &mut Frame, area: Rect, app: &App) {
    // Split into form (left) and action panel (right)
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(20), // Action panel
        ])
        .split(area);

    draw_form(frame, main_chunks[0], app);
    draw_action_panel(frame, main_chunks[1], app);
}

/// Draw the form fields
fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let form_focused = !app.state.register_form.is_buttons_row_active();
    let block = Block::default()
        .title(format!(" {} ", View::Register.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if form_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = FieldName::ALL
        .iter()
        .map(|_| Constraint::Length(FIELD_ROWS))
        .collect();
    constraints.push(Constraint::Length(3)); // Terms and login hint
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    let session = &app.state.session;
    let active = app.state.active_field();

    for (idx, field) in FieldName::ALL.into_iter().enumerate() {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(1)])
            .split(chunks[idx]);
        let is_active = active == Some(field);
        let error = session.errors().error(field);

        if field.is_choice() {
            draw_choice_field(
                frame,
                rows[0],
                field,
                session.values().gender.label(),
                is_active,
            );
        } else {
            draw_text_field(
                frame,
                rows[0],
                field,
                session.values().value(field),
                is_active,
                error.is_some(),
            );
        }
        draw_field_error(frame, rows[1], error);
    }

    draw_help_text(frame, chunks[FieldName::ALL.len()], &[TERMS_NOTICE, LOGIN_HINT]);
}

/// Draw the action panel sidebar
fn draw_action_panel(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.register_form;
    let is_focused = form.is_buttons_row_active();

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if is_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }));
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Sign Up (primary)
            Constraint::Length(BUTTON_HEIGHT), // Log In
            Constraint::Min(0),                // Help text
        ])
        .split(inner_area);

    render_action_button(
        frame,
        button_chunks[0],
        "Sign Up",
        is_focused && form.selected_button == BUTTON_SIGN_UP,
        Color::Green,
    );
    render_action_button(
        frame,
        button_chunks[1],
        "Log In",
        is_focused && form.selected_button == BUTTON_LOGIN,
        Color::Blue,
    );

    let min_len = format!("Password: {PASSWORD_MIN_LEN}+ chars");
    draw_help_text(frame, button_chunks[2], &["", min_len.as_str()]);
}
