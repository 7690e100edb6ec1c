//! Application state definitions

use super::booking::Booking;
use super::forms::{
    AffordanceKind, AffordanceRef, EditorOptions, FocusTarget, Form, FormField, GroupEditor,
    InputKind, TriState,
};
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// The booking form with its repeating occasions
    #[default]
    Form,
    /// Answering the occasions of the last submitted booking
    Answers,
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub current_view: View,
    pub editor: GroupEditor,
    /// Index into the form's focus targets
    pub focus_index: usize,
    pub answer_states: TriState,
    /// Every booking submitted this session, oldest first
    pub bookings: Vec<Booking>,
    pub selected_booking: usize,
    /// Occasion row in the selected booking
    pub selected_answer: usize,
    /// Respondent column in the selected booking
    pub selected_respondent: usize,
    /// Name being typed for a new respondent
    pub respondent_input: Option<FormField>,
    /// Blocking notifications, oldest first
    errors: VecDeque<String>,
}

impl AppState {
    pub fn new(form: Form, options: EditorOptions, answer_states: TriState) -> Self {
        Self {
            current_view: View::default(),
            editor: GroupEditor::new(form, options),
            focus_index: 0,
            answer_states,
            bookings: Vec::new(),
            selected_booking: 0,
            selected_answer: 0,
            selected_respondent: 0,
            respondent_input: None,
            errors: VecDeque::new(),
        }
    }

    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The notification currently shown
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    pub fn focus_targets(&self) -> Vec<FocusTarget> {
        self.editor.form().focus_targets()
    }

    pub fn focused(&self) -> Option<FocusTarget> {
        let targets = self.focus_targets();
        targets
            .get(self.focus_index.min(targets.len().saturating_sub(1)))
            .cloned()
    }

    pub fn next_focus(&mut self) {
        let count = self.focus_targets().len();
        if count > 0 {
            self.focus_index = (self.focus_index.min(count - 1) + 1) % count;
        }
    }

    pub fn prev_focus(&mut self) {
        let count = self.focus_targets().len();
        if count == 0 {
            return;
        }
        let current = self.focus_index.min(count - 1);
        self.focus_index = if current == 0 { count - 1 } else { current - 1 };
    }

    /// Move focus onto `target`; returns false when it is not focusable
    pub fn focus_on(&mut self, target: &FocusTarget) -> bool {
        match self.focus_targets().iter().position(|t| t == target) {
            Some(index) => {
                self.focus_index = index;
                true
            }
            None => false,
        }
    }

    /// Keep the focus index inside the current target list
    pub fn clamp_focus(&mut self) {
        let count = self.focus_targets().len();
        self.focus_index = self.focus_index.min(count.saturating_sub(1));
    }

    /// Type into the focused text input, if any
    pub fn form_input_char(&mut self, c: char) {
        if let Some(target) = self.focused() {
            if let Some(field) = self.editor.form_mut().text_input_mut(&target) {
                field.push_char(c);
            }
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(target) = self.focused() {
            if let Some(field) = self.editor.form_mut().text_input_mut(&target) {
                field.pop_char();
            }
        }
    }

    /// Whether Enter should insert a newline rather than act
    pub fn is_focused_multiline(&self) -> bool {
        match self.focused() {
            Some(FocusTarget::Field(name)) => self
                .editor
                .form()
                .field(&name)
                .is_some_and(|f| f.is_multiline),
            _ => false,
        }
    }

    /// After an add, the cursor lands on the new group's date
    pub fn focus_new_group(&mut self) {
        if let Some(id) = self.editor.last_created() {
            self.focus_on(&FocusTarget::Input(id, InputKind::Date));
        }
    }

    /// The add affordance that currently holds the tail, if any
    pub fn tail_add_affordance(&self) -> Option<AffordanceRef> {
        self.editor.active_tail().map(|group| AffordanceRef {
            group,
            kind: AffordanceKind::Add,
        })
    }

    pub fn current_booking(&self) -> Option<&Booking> {
        self.bookings.get(self.selected_booking)
    }

    pub fn current_booking_mut(&mut self) -> Option<&mut Booking> {
        self.bookings.get_mut(self.selected_booking)
    }

    /// Keep a freshly submitted booking and select it
    pub fn push_booking(&mut self, booking: Booking) {
        self.bookings.push(booking);
        self.select_booking(self.bookings.len() - 1);
    }

    fn select_booking(&mut self, index: usize) {
        self.selected_booking = index;
        self.selected_answer = 0;
        self.selected_respondent = 0;
        self.respondent_input = None;
    }

    pub fn next_booking(&mut self) {
        let count = self.bookings.len();
        if count > 1 {
            self.select_booking((self.selected_booking + 1) % count);
        }
    }

    pub fn prev_booking(&mut self) {
        let count = self.bookings.len();
        if count > 1 {
            self.select_booking((self.selected_booking + count - 1) % count);
        }
    }

    pub fn answer_count(&self) -> usize {
        self.current_booking().map_or(0, |b| b.rows().len())
    }

    pub fn respondent_count(&self) -> usize {
        self.current_booking().map_or(0, |b| b.respondents().len())
    }

    pub fn move_answer_down(&mut self) {
        let count = self.answer_count();
        if count > 0 && self.selected_answer < count - 1 {
            self.selected_answer += 1;
        }
    }

    pub fn move_answer_up(&mut self) {
        self.selected_answer = self.selected_answer.saturating_sub(1);
    }

    pub fn move_respondent_right(&mut self) {
        let count = self.respondent_count();
        if count > 0 && self.selected_respondent < count - 1 {
            self.selected_respondent += 1;
        }
    }

    pub fn move_respondent_left(&mut self) {
        self.selected_respondent = self.selected_respondent.saturating_sub(1);
    }

    pub fn begin_respondent_input(&mut self) {
        self.respondent_input = Some(FormField::text("respondent", "Name", false));
    }
}
