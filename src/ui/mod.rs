//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod login;

use crate::app::App;
use crate::state::View;
use components::render_notice_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    // Draw main content based on current view
    match app.state.current_view {
        View::Register => forms::draw_register(frame, main_area, app),
        View::Login => login::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Notification overlay goes last so it sits on top
    if let Some(message) = &app.state.notification {
        render_notice_dialog(frame, message);
    }
}
