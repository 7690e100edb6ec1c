//! Application state and core logic

use crate::config::TuiConfig;
use crate::receiver::SubmissionReceiver;
use crate::state::{
    AffordanceKind, AffordanceRef, AppState, Booking, FocusTarget, Form, InputKind, Submission,
    View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App<R: SubmissionReceiver> {
    /// Current application state
    pub state: AppState,
    /// Consumer of submitted forms
    pub receiver: R,
    /// Whether the app should quit
    quit: bool,
    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,
}

impl<R: SubmissionReceiver> App<R> {
    /// Create a new App around the booking form described by `config`
    pub fn new(config: &TuiConfig, receiver: R) -> Self {
        let options = config.editor_options();
        let form = Form::booking(options.naming, &options.defaults);
        Self {
            state: AppState::new(form, options, config.answer_states()),
            receiver,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return Ok(());
        }

        match self.state.current_view {
            View::Form => self.handle_form_key(key).await?,
            View::Answers => self.handle_answers_key(key)?,
        }
        Ok(())
    }

    /// Handle keys in the booking form
    async fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let focused = self.state.focused();
        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit().await;
            }
            KeyCode::Tab | KeyCode::Down => self.state.next_focus(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_focus(),
            KeyCode::Enter | KeyCode::Char(' ') => match focused {
                Some(FocusTarget::Affordance(target)) => self.activate_affordance(target),
                Some(FocusTarget::Submit) => self.submit().await,
                Some(_) if key.code == KeyCode::Char(' ') => self.state.form_input_char(' '),
                Some(_) if self.state.is_focused_multiline() => self.state.form_input_char('\n'),
                Some(_) => self.state.next_focus(),
                None => {}
            },
            KeyCode::Char('+') if !matches!(focused, Some(FocusTarget::Field(_))) => {
                // Shortcut for the visible add control, wherever the cursor is
                if let Some(target) = self.state.tail_add_affordance() {
                    self.activate_affordance(target);
                }
            }
            KeyCode::Char(c) => self.state.form_input_char(c),
            KeyCode::Backspace => self.state.form_backspace(),
            _ => {}
        }
        Ok(())
    }

    /// Forward an activation to the editor and repair focus afterwards
    fn activate_affordance(&mut self, target: AffordanceRef) {
        let group_start = self
            .state
            .focus_targets()
            .iter()
            .position(|t| *t == FocusTarget::Input(target.group, InputKind::Date));

        match self.state.editor.activate(target) {
            Ok(()) => match target.kind {
                AffordanceKind::Add => self.state.focus_new_group(),
                AffordanceKind::Remove => {
                    if let Some(index) = group_start {
                        self.state.focus_index = index;
                    }
                    self.state.clamp_focus();
                }
            },
            Err(e) => {
                tracing::warn!("Ignoring activation of {target:?}: {e}");
                self.push_error(e.to_string());
            }
        }
    }

    /// Hand the form to the receiver and open its answers
    async fn submit(&mut self) {
        let submission = Submission::from_form(self.state.editor.form());
        if let Err(e) = self.receiver.receive(&submission).await {
            self.push_error(format!("Failed to submit: {e}"));
            return;
        }
        tracing::info!(
            "Submitted booking {} with {} occasion(s)",
            submission.id,
            submission.occasions.len()
        );

        self.state.push_booking(Booking::from_submission(
            &submission,
            self.state.answer_states,
        ));
        self.state.current_view = View::Answers;
        self.status_message = Some(format!(
            "Submitted {} occasion(s)",
            submission.occasions.len()
        ));
    }

    /// Handle keys in the answers view
    fn handle_answers_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.respondent_input.is_some() {
            self.handle_respondent_input_key(key);
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => self.state.current_view = View::Form,
            KeyCode::Char('y') if key.modifiers.contains(crate::platform::COPY_MODIFIER) => {
                self.copy_booking();
            }
            KeyCode::Down | KeyCode::Char('j') => self.state.move_answer_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_answer_up(),
            KeyCode::Right | KeyCode::Char('l') => self.state.move_respondent_right(),
            KeyCode::Left | KeyCode::Char('h') => self.state.move_respondent_left(),
            KeyCode::Tab => self.state.next_booking(),
            KeyCode::BackTab => self.state.prev_booking(),
            KeyCode::Char('n') if self.state.current_booking().is_some() => {
                self.state.begin_respondent_input();
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.cycle_selected_answer(),
            _ => {}
        }
        Ok(())
    }

    /// Typing a new respondent's name; Enter adds the column, Esc cancels
    fn handle_respondent_input_key(&mut self, key: KeyEvent) {
        let Some(input) = self.state.respondent_input.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.state.respondent_input = None,
            KeyCode::Backspace => input.pop_char(),
            KeyCode::Char(c) => input.push_char(c),
            KeyCode::Enter => {
                let name = input.value.clone();
                self.state.respondent_input = None;
                let Some(booking) = self.state.current_booking_mut() else {
                    return;
                };
                match booking.add_respondent(&name) {
                    Ok(column) => {
                        self.state.selected_respondent = column;
                        self.status_message = Some(format!("Added {}", name.trim()));
                    }
                    Err(e) => self.push_error(e.to_string()),
                }
            }
            _ => {}
        }
    }

    fn cycle_selected_answer(&mut self) {
        let (row, column) = (self.state.selected_answer, self.state.selected_respondent);
        let Some(booking) = self.state.current_booking_mut() else {
            return;
        };
        if booking.respondents().is_empty() {
            self.status_message = Some("Press n to add a respondent".to_string());
            return;
        }
        if let Err(e) = booking.cycle_answer(row, column) {
            self.push_error(e.to_string());
        }
    }

    fn copy_booking(&mut self) {
        let Some(booking) = self.state.current_booking() else {
            return;
        };
        let result = booking
            .to_json()
            .map_err(anyhow::Error::from)
            .and_then(|json| self.copy_to_clipboard(&json));
        match result {
            Ok(()) => self.status_message = Some("Copied booking to clipboard".to_string()),
            Err(e) => self.push_error(format!("Failed to copy: {e}")),
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}
