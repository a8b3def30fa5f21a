//! Field rendering utilities for forms

use crate::state::FieldName;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const MASK_CHAR: char = '•';
const CURSOR: &str = "▌";

/// Text shown for a field value; secret fields are masked
pub fn display_value(field: FieldName, value: &str) -> String {
    if field.is_secret() {
        MASK_CHAR.to_string().repeat(value.chars().count())
    } else {
        value.to_string()
    }
}

fn border_style(is_active: bool, has_error: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else if has_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Draw a single-line text input
pub fn draw_text_field(
    frame: &mut Frame,
    area: Rect,
    field: FieldName,
    value: &str,
    is_active: bool,
    has_error: bool,
) {
    let mut spans = if value.is_empty() {
        vec![Span::styled(
            field.placeholder(),
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        let text_style = if is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        vec![Span::styled(display_value(field, value), text_style)]
    };
    if is_active {
        // Cursor sits before the placeholder, after typed text
        let cursor = Span::styled(CURSOR, Style::default().fg(Color::Cyan));
        if value.is_empty() {
            spans.insert(0, cursor);
        } else {
            spans.push(cursor);
        }
    }

    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, has_error));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Draw a two-way choice rendered as `◀ value ▶`
pub fn draw_choice_field(
    frame: &mut Frame,
    area: Rect,
    field: FieldName,
    choice_label: &str,
    is_active: bool,
) {
    let arrow_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let value_style = if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled("◀ ", arrow_style),
        Span::styled(choice_label.to_string(), value_style),
        Span::styled(" ▶", arrow_style),
    ]);

    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, false));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Draw the inline error line under a field (blank when valid)
pub fn draw_field_error(frame: &mut Frame, area: Rect, error: Option<&str>) {
    if let Some(message) = error {
        let line = Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Draw dim, wrapped help text
pub fn draw_help_text(frame: &mut Frame, area: Rect, lines: &[&str]) {
    let lines: Vec<Line> = lines
        .iter()
        .map(|l| Line::from(Span::styled(*l, Style::default().fg(Color::DarkGray))))
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
