//! Form field value objects

use serde::{Deserialize, Serialize};

/// The fixed set of inputs every field group carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Date,
    StartTime,
    EndTime,
}

impl InputKind {
    /// Inputs in the order they appear inside a group
    pub const ALL: [InputKind; 3] = [InputKind::Date, InputKind::StartTime, InputKind::EndTime];

    /// Submission name without any list suffix
    pub fn base_name(self) -> &'static str {
        match self {
            Self::Date => "dates",
            Self::StartTime => "start_times",
            Self::EndTime => "end_times",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::StartTime => "From",
            Self::EndTime => "To",
        }
    }

    /// Hint shown while the input is empty
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Date => "YYYY-MM-DD",
            Self::StartTime | Self::EndTime => "HH:MM",
        }
    }

    /// Position inside a group
    pub fn index(self) -> usize {
        match self {
            Self::Date => 0,
            Self::StartTime => 1,
            Self::EndTime => 2,
        }
    }
}

/// Naming convention for group inputs in a submission.
///
/// `List` produces `dates[]`-style names so a receiver gets parallel ordered
/// lists; `Plain` produces bare repeated names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldNaming {
    #[default]
    List,
    Plain,
}

impl FieldNaming {
    pub fn field_name(self, kind: InputKind) -> String {
        match self {
            Self::List => format!("{}[]", kind.base_name()),
            Self::Plain => kind.base_name().to_string(),
        }
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub is_multiline: bool,
    pub placeholder: Option<&'static str>,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str, is_multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
            is_multiline,
            placeholder: None,
        }
    }

    /// Create a new text field with initial value
    pub fn text_with_value(name: &str, label: &str, value: String, is_multiline: bool) -> Self {
        Self {
            value,
            ..Self::text(name, label, is_multiline)
        }
    }

    /// Create one of the date/time inputs of a field group
    pub fn group_input(kind: InputKind, naming: FieldNaming, value: String) -> Self {
        Self {
            name: naming.field_name(kind),
            label: kind.label().to_string(),
            value,
            is_multiline: false,
            placeholder: Some(kind.placeholder()),
        }
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        self.value.clone()
    }
}
