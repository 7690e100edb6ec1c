//! Submitted bookings and the answers respondents give per occasion

use super::forms::{cycle, CycleError, Form, FormField, InputKind, TriState};
use chrono::{DateTime, Local, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// One submitted name/value pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedField {
    pub name: String,
    pub value: String,
}

/// A date with a start and end time, exactly as entered
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Occasion {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

impl Occasion {
    /// English weekday name when the date is an ISO calendar date
    pub fn weekday(&self) -> Option<String> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .ok()
            .map(|d| d.format("%A").to_string())
    }

    pub fn display(&self) -> String {
        let day = match self.weekday() {
            Some(weekday) => format!("{weekday} {}", self.date),
            None => self.date.clone(),
        };
        format!("{day}  {}–{}", self.start_time, self.end_time)
    }
}

/// Everything a receiver gets when the form is submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Name/value pairs in document order
    pub fields: Vec<SubmittedField>,
    /// One entry per surviving field group, in document order
    pub occasions: Vec<Occasion>,
}

impl Submission {
    pub fn from_form(form: &Form) -> Self {
        let fields = form
            .pairs()
            .into_iter()
            .map(|(name, value)| SubmittedField { name, value })
            .collect();
        let occasions = form
            .groups()
            .map(|g| Occasion {
                date: g.input(InputKind::Date).value.clone(),
                start_time: g.input(InputKind::StartTime).value.clone(),
                end_time: g.input(InputKind::EndTime).value.clone(),
            })
            .collect();
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now().trunc_subsecs(0),
            fields,
            occasions,
        }
    }

    /// All values submitted under `name`, in order
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.name == name)
            .map(|f| f.value.as_str())
            .collect()
    }

    /// First value submitted under `name`, or empty
    pub fn value(&self, name: &str) -> &str {
        self.values(name).first().copied().unwrap_or("")
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Respondent name is empty")]
    EmptyName,
    #[error("{0} already answers this booking")]
    DuplicateRespondent(String),
    #[error(transparent)]
    Cycle(#[from] CycleError),
}

/// An occasion with one answer control per respondent, in respondent order
#[derive(Debug, Clone)]
pub struct OccasionRow {
    pub occasion: Occasion,
    pub answers: Vec<FormField>,
}

/// Header plus one row per occasion: weekday, date, start, end, answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A submitted booking opened for answering
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    respondents: Vec<String>,
    rows: Vec<OccasionRow>,
    states: TriState,
}

impl Booking {
    /// Occasions are sorted by date, then start, then end. Nobody has
    /// answered yet.
    pub fn from_submission(submission: &Submission, states: TriState) -> Self {
        let mut occasions = submission.occasions.clone();
        occasions.sort();
        let rows = occasions
            .into_iter()
            .map(|occasion| OccasionRow {
                occasion,
                answers: Vec::new(),
            })
            .collect();

        Self {
            id: submission.id,
            title: submission.value("title").to_string(),
            description: submission.value("description").to_string(),
            location: submission.value("location").to_string(),
            created_at: submission.created_at,
            respondents: Vec::new(),
            rows,
            states,
        }
    }

    pub fn states(&self) -> TriState {
        self.states
    }

    pub fn respondents(&self) -> &[String] {
        &self.respondents
    }

    pub fn rows(&self) -> &[OccasionRow] {
        &self.rows
    }

    /// Creation time in the local timezone, minutes precision
    pub fn created_local(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }

    /// Add an answer column; every occasion starts at the first state.
    ///
    /// Returns the new respondent's column index.
    pub fn add_respondent(&mut self, name: &str) -> Result<usize, BookingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BookingError::EmptyName);
        }
        if self.respondents.iter().any(|r| r == name) {
            return Err(BookingError::DuplicateRespondent(name.to_string()));
        }

        let column = self.respondents.len();
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.answers.push(FormField::text_with_value(
                &format!("{name}_{i}"),
                name,
                self.states.first.to_string(),
                false,
            ));
        }
        self.respondents.push(name.to_string());
        tracing::debug!("Added respondent {name} to booking {}", self.id);
        Ok(column)
    }

    pub fn answer(&self, occasion: usize, respondent: usize) -> Option<&str> {
        self.rows
            .get(occasion)?
            .answers
            .get(respondent)
            .map(FormField::as_text)
    }

    pub fn answer_mut(&mut self, occasion: usize, respondent: usize) -> Option<&mut FormField> {
        self.rows.get_mut(occasion)?.answers.get_mut(respondent)
    }

    /// Step one respondent's answer for one occasion; out of range is a no-op
    pub fn cycle_answer(&mut self, occasion: usize, respondent: usize) -> Result<(), BookingError> {
        let states = self.states;
        let Some(control) = self.answer_mut(occasion, respondent) else {
            return Ok(());
        };
        cycle(control, states.first, states.second, states.third)?;
        Ok(())
    }

    pub fn to_table(&self) -> AnswerTable {
        let mut header: Vec<String> = ["", "Date", "From", "To"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        header.extend(self.respondents.iter().cloned());

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let occasion = &row.occasion;
                let mut cells = vec![
                    occasion.weekday().unwrap_or_default(),
                    occasion.date.clone(),
                    occasion.start_time.clone(),
                    occasion.end_time.clone(),
                ];
                cells.extend(row.answers.iter().map(|a| a.value.clone()));
                cells
            })
            .collect();

        AnswerTable { header, rows }
    }

    /// JSON summary used for the clipboard
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&serde_json::json!({
            "id": self.id,
            "title": self.title,
            "description": self.description,
            "location": self.location,
            "created_at": self.created_at,
            "respondents": self.respondents,
            "table": self.to_table(),
        }))
    }
}
