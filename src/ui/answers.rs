//! Answers view: submitted bookings and one tri-state answer per respondent
//! per occasion

use super::forms::draw_help_text;
use super::render_scrollable_list;
use crate::state::{AppState, Booking, FormField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

const BOOKINGS_WIDTH: u16 = 30;

/// Draw the answers view
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(booking) = state.current_booking() else {
        let content = Paragraph::new("Nothing submitted yet.\nPress Esc to return to the form.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(" Answers ").borders(Borders::ALL));
        frame.render_widget(content, area);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(BOOKINGS_WIDTH), Constraint::Min(0)])
        .split(area);
    draw_bookings(frame, columns[0], state);

    let input_height = if state.respondent_input.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),            // Booking summary
            Constraint::Min(0),               // Answer table
            Constraint::Length(input_height), // New respondent
            Constraint::Length(1),            // Help text
        ])
        .split(columns[1]);

    draw_summary(frame, chunks[0], booking);
    draw_table(frame, chunks[1], booking, state);
    if let Some(input) = &state.respondent_input {
        draw_respondent_input(frame, chunks[2], input);
    }

    let states = booking.states();
    let cycle_hint = format!("cycle {} → {} → {}", states.first, states.second, states.third);
    let hints = if state.respondent_input.is_some() {
        vec![("Enter", "add respondent"), ("Esc", "cancel")]
    } else {
        vec![
            ("j/k", "occasion"),
            ("h/l", "respondent"),
            ("Space", cycle_hint.as_str()),
            ("n", "new respondent"),
            ("Tab", "next booking"),
            (crate::platform::COPY_SHORTCUT, "copy"),
            ("Esc", "back"),
        ]
    };
    draw_help_text(frame, chunks[3], &hints);
}

/// Every booking submitted this session, by title and description
fn draw_bookings(frame: &mut Frame, area: Rect, state: &AppState) {
    let items: Vec<ListItem> = state
        .bookings
        .iter()
        .enumerate()
        .map(|(idx, booking)| {
            let is_selected = idx == state.selected_booking;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            let title = if booking.title.is_empty() {
                "(untitled)"
            } else {
                booking.title.as_str()
            };

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled(title, style.add_modifier(Modifier::BOLD)),
                ]),
                Line::from(Span::styled(
                    format!("  {}", booking.description.lines().next().unwrap_or("")),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Bookings ({}) ", state.bookings.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    render_scrollable_list(frame, area, list, state.selected_booking);
}

fn draw_summary(frame: &mut Frame, area: Rect, booking: &Booking) {
    let mut lines = vec![Line::from(Span::styled(
        booking.title.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if !booking.location.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Location: ", Style::default().fg(Color::DarkGray)),
            Span::raw(booking.location.as_str()),
        ]));
    }
    lines.push(Line::from(Span::styled(
        booking.description.as_str(),
        Style::default().fg(Color::Gray),
    )));

    let summary = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(format!(" Booking {} ", booking.created_local()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(summary, area);
}

/// Occasions down, respondents across; the selected cell is highlighted
fn draw_table(frame: &mut Frame, area: Rect, booking: &Booking, state: &AppState) {
    let table = booking.to_table();
    let fixed = 4;

    let header = Row::new(
        table
            .header
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let style = if i >= fixed && i - fixed == state.selected_respondent {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                Cell::from(title.as_str()).style(style)
            })
            .collect::<Vec<_>>(),
    );

    let rows: Vec<Row> = table
        .rows
        .iter()
        .enumerate()
        .map(|(r, cells)| {
            let row_selected = r == state.selected_answer;
            let row_style = if row_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Row::new(
                cells
                    .iter()
                    .enumerate()
                    .map(|(c, value)| {
                        let cell = Cell::from(value.as_str());
                        if c < fixed {
                            cell.style(Style::default().fg(Color::Gray))
                        } else if row_selected && c - fixed == state.selected_respondent {
                            cell.style(
                                Style::default()
                                    .fg(Color::Black)
                                    .bg(Color::Yellow)
                                    .add_modifier(Modifier::BOLD),
                            )
                        } else {
                            cell.style(Style::default().fg(Color::Yellow))
                        }
                    })
                    .collect::<Vec<_>>(),
            )
            .style(row_style)
        })
        .collect();

    let mut widths = vec![
        Constraint::Length(10), // Weekday
        Constraint::Length(12), // Date
        Constraint::Length(7),  // From
        Constraint::Length(7),  // To
    ];
    widths.extend(
        booking
            .respondents()
            .iter()
            .map(|name| Constraint::Length(name.chars().count().max(3) as u16 + 1)),
    );

    let title = if booking.respondents().is_empty() {
        format!(" Occasions ({}) - press n to add a respondent ", table.rows.len())
    } else {
        format!(" Occasions ({}) ", table.rows.len())
    };
    let widget = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    let mut table_state = TableState::default().with_selected(Some(state.selected_answer));
    frame.render_stateful_widget(widget, area, &mut table_state);
}

fn draw_respondent_input(frame: &mut Frame, area: Rect, input: &FormField) {
    let content = Paragraph::new(Line::from(vec![
        Span::raw(input.display_value()),
        Span::styled("▌", Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .title(format!(" {} ", input.label))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(content, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        AffordanceKind, AffordanceRef, EditorOptions, FieldNaming, Form, GroupDefaults,
        Submission, TriState,
    };
    use ratatui::{backend::TestBackend, Terminal};

    fn state_with_booking() -> AppState {
        let mut state = AppState::new(
            Form::booking(FieldNaming::List, &GroupDefaults::default()),
            EditorOptions::default(),
            TriState::default(),
        );
        let form = state.editor.form_mut();
        form.field_mut("title").unwrap().set_text("Choir practice");
        let tail = state.editor.active_tail().unwrap();
        state
            .editor
            .activate(AffordanceRef {
                group: tail,
                kind: AffordanceKind::Add,
            })
            .unwrap();
        let submission = Submission::from_form(state.editor.form());
        state.push_booking(Booking::from_submission(&submission, TriState::default()));
        state
    }

    fn render(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| draw(frame, frame.area(), state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_empty_state_explains_itself() {
        let state = AppState::new(
            Form::booking(FieldNaming::List, &GroupDefaults::default()),
            EditorOptions::default(),
            TriState::default(),
        );
        assert!(render(&state).contains("Nothing submitted yet"));
    }

    #[test]
    fn test_bookings_and_respondents_are_listed() {
        let mut state = state_with_booking();
        let booking = state.current_booking_mut().unwrap();
        booking.add_respondent("Ana").unwrap();
        booking.add_respondent("Bo").unwrap();

        let text = render(&state);
        assert!(text.contains("Bookings (1)"));
        assert!(text.contains("Choir practice"));
        assert!(text.contains("Ana"));
        assert!(text.contains("Bo"));
        assert!(text.contains("✓"));
    }

    #[test]
    fn test_respondent_input_is_shown_while_typing() {
        let mut state = state_with_booking();
        state.begin_respondent_input();
        state
            .respondent_input
            .as_mut()
            .unwrap()
            .set_text("Cleo");
        let text = render(&state);
        assert!(text.contains("Cleo▌"));
        assert!(text.contains("add respondent"));
    }
}
