//! Login view shown after a successful registration

use super::components::{render_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" {} ", View::Login.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(4),             // Message
            Constraint::Length(BUTTON_HEIGHT), // Back button
            Constraint::Min(0),
        ])
        .horizontal_margin(2)
        .split(inner);

    let message = Paragraph::new(vec![
        Line::from(Span::styled(
            "Welcome!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Sign in with the email address and password you registered."),
        Line::from(Span::styled(
            format!("Service: {}", app.api_url),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(message, chunks[1]);

    let button_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(30),
            Constraint::Min(0),
        ])
        .split(chunks[2])[1];
    render_button(frame, button_area, "r  Create another account", false, true);
}
