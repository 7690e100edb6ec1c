//! Layout components (content area and status bar)

use crate::state::{AppState, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    status_message: Option<&str>,
) {
    let mut spans = vec![];

    let occasions = state.editor.form().group_count();
    spans.push(Span::styled(
        format!(" {occasions} occasion(s) "),
        Style::default().fg(Color::Cyan),
    ));

    let hints = get_view_hints(state.current_view);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View) -> String {
    match view {
        View::Form => format!(
            "Tab:next  Enter:press  +:add occasion  {}:submit",
            crate::platform::SAVE_SHORTCUT
        ),
        View::Answers => format!(
            "j/k:nav  h/l:respondent  n:new respondent  Space:cycle answer  Tab:booking  {}:copy  Esc:back",
            crate::platform::COPY_SHORTCUT
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_reserves_status_line() {
        let (content, status) = create_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(content.height, 23);
        assert_eq!(status.height, 1);
        assert_eq!(status.y, 23);
    }

    #[test]
    fn test_hints_differ_per_view() {
        assert!(get_view_hints(View::Form).contains("add occasion"));
        assert!(get_view_hints(View::Answers).contains("cycle answer"));
    }
}
