//! Booking form rendering: metadata fields, occasion rows, submit button

use super::field_renderer::{draw_field, draw_help_text};
use crate::state::{AffordanceKind, AppState, FieldGroup, FocusTarget, InputKind, Node};
use crate::ui::components::{render_affordance, render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};
use std::ops::Range;

const MULTILINE_HEIGHT: u16 = 5;

/// Draw the booking form, scrolled so the focused row stays visible
pub fn draw_booking_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" New Booking ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);
    let (rows_area, help_area) = (chunks[0], chunks[1]);

    let nodes = state.editor.form().nodes();
    let focused = state.focused();
    let heights: Vec<u16> = nodes.iter().map(row_height).collect();
    let focused_row = focused
        .as_ref()
        .and_then(|target| row_of(nodes, target))
        .unwrap_or(0);

    let mut y = rows_area.y;
    for index in visible_rows(&heights, focused_row, rows_area.height) {
        let height = heights[index].min(rows_area.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let row = Rect {
            x: rows_area.x,
            y,
            width: rows_area.width,
            height,
        };
        y += height;

        match &nodes[index] {
            Node::Field(field) => {
                let active = matches!(&focused, Some(FocusTarget::Field(name)) if *name == field.name);
                draw_field(frame, row, field, active);
            }
            Node::Group(group) => draw_group_row(frame, row, group, focused.as_ref()),
            Node::Submit(submit) => {
                let button = Rect {
                    width: (submit.label.chars().count() as u16 + 4).min(row.width),
                    ..row
                };
                render_button(
                    frame,
                    button,
                    &submit.label,
                    focused == Some(FocusTarget::Submit),
                );
            }
        }
    }

    draw_help_text(
        frame,
        help_area,
        &[
            ("Tab", "next"),
            ("Enter", "press"),
            ("+", "add occasion"),
            (crate::platform::SAVE_SHORTCUT, "submit"),
        ],
    );
}

/// One occasion: three inputs followed by the "+" / "-" pair
fn draw_group_row(frame: &mut Frame, area: Rect, group: &FieldGroup, focused: Option<&FocusTarget>) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16), // Date
            Constraint::Length(11), // From
            Constraint::Length(11), // To
            Constraint::Length(5),  // +
            Constraint::Length(5),  // -
            Constraint::Min(0),
        ])
        .split(area);

    for kind in InputKind::ALL {
        let active = focused == Some(&FocusTarget::Input(group.id, kind));
        draw_field(frame, cells[kind.index()], group.input(kind), active);
    }

    for (cell, kind) in [(cells[3], AffordanceKind::Add), (cells[4], AffordanceKind::Remove)] {
        let affordance = group.affordance(kind);
        let selected = matches!(
            focused,
            Some(FocusTarget::Affordance(r)) if r.group == group.id && r.kind == kind
        );
        render_affordance(frame, cell, kind, affordance.visible, selected);
    }
}

fn row_height(node: &Node) -> u16 {
    match node {
        Node::Field(f) if f.is_multiline => MULTILINE_HEIGHT,
        Node::Field(_) | Node::Group(_) | Node::Submit(_) => BUTTON_HEIGHT,
    }
}

/// Index of the node that contains `target`
fn row_of(nodes: &[Node], target: &FocusTarget) -> Option<usize> {
    nodes.iter().position(|node| match (node, target) {
        (Node::Field(f), FocusTarget::Field(name)) => f.name == *name,
        (Node::Group(g), FocusTarget::Input(id, _)) => g.id == *id,
        (Node::Group(g), FocusTarget::Affordance(r)) => g.id == r.group,
        (Node::Submit(_), FocusTarget::Submit) => true,
        _ => false,
    })
}

/// Rows that fit in `available` lines while keeping `focused` on screen.
///
/// Scrolls only as far as needed to bring the focused row into view.
fn visible_rows(heights: &[u16], focused: usize, available: u16) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let focused = focused.min(heights.len() - 1);

    let available = u32::from(available);

    // earliest start that still fits everything up to the focused row
    let mut start = focused;
    let mut used = u32::from(heights[focused]);
    while start > 0 && used + u32::from(heights[start - 1]) <= available {
        start -= 1;
        used += u32::from(heights[start]);
    }

    let mut end = start;
    used = 0;
    while end < heights.len() && used + u32::from(heights[end]) <= available {
        used += u32::from(heights[end]);
        end += 1;
    }
    start..end.max(focused + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EditorOptions, FieldNaming, Form, GroupDefaults, GroupId, TriState};
    use ratatui::{backend::TestBackend, Terminal};

    mod scrolling {
        use super::*;

        #[test]
        fn test_everything_fits() {
            assert_eq!(visible_rows(&[3, 5, 3, 3, 3], 4, 40), 0..5);
        }

        #[test]
        fn test_focus_at_top_shows_first_rows() {
            assert_eq!(visible_rows(&[3, 3, 3, 3, 3, 3], 0, 9), 0..3);
        }

        #[test]
        fn test_focus_past_bottom_scrolls_minimally() {
            // rows 2..=4 fill 9 lines exactly
            assert_eq!(visible_rows(&[3, 3, 3, 3, 3, 3], 4, 9), 2..5);
        }

        #[test]
        fn test_focused_row_always_included() {
            let range = visible_rows(&[3, 3, 3], 2, 2);
            assert!(range.contains(&2));
        }

        #[test]
        fn test_huge_forms_do_not_overflow() {
            let heights = vec![BUTTON_HEIGHT; 30_000];
            assert_eq!(visible_rows(&heights, 29_999, 30), 29_990..30_000);
            assert_eq!(visible_rows(&heights, 0, u16::MAX), 0..21_845);
        }

        #[test]
        fn test_empty_form() {
            assert_eq!(visible_rows(&[], 0, 10), 0..0);
        }
    }

    #[test]
    fn test_row_of_maps_targets_to_nodes() {
        let form = Form::booking(FieldNaming::List, &GroupDefaults::default());
        let nodes = form.nodes();
        assert_eq!(row_of(nodes, &FocusTarget::Field("location".to_string())), Some(2));
        assert_eq!(
            row_of(nodes, &FocusTarget::Input(GroupId(0), InputKind::EndTime)),
            Some(3)
        );
        assert_eq!(row_of(nodes, &FocusTarget::Submit), Some(4));
        assert_eq!(
            row_of(nodes, &FocusTarget::Input(GroupId(7), InputKind::Date)),
            None
        );
    }

    #[test]
    fn test_draw_shows_add_but_not_remove_initially() {
        let state = AppState::new(
            Form::booking(FieldNaming::List, &GroupDefaults::default()),
            EditorOptions::default(),
            TriState::default(),
        );
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| draw_booking_form(frame, frame.area(), &state))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains(" + "));
        assert!(!text.contains(" - "));
        assert!(text.contains("Submit"));
        assert!(text.contains("YYYY-MM-DD"));
    }
}
