//! UI module for rendering the TUI

mod answers;
mod components;
mod forms;
mod layout;
mod widgets;

use crate::app::App;
use crate::receiver::SubmissionReceiver;
use crate::state::View;
use ratatui::Frame;
use widgets::render_scrollable_list;

/// Main draw function
pub fn draw<R: SubmissionReceiver>(frame: &mut Frame, app: &App<R>) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match app.state.current_view {
        View::Form => forms::draw_booking_form(frame, main_area, &app.state),
        View::Answers => answers::draw(frame, main_area, &app.state),
    }

    layout::draw_status_bar(
        frame,
        status_area,
        &app.state,
        app.status_message.as_deref(),
    );

    // Notifications block everything else until dismissed
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message);
    }
}
