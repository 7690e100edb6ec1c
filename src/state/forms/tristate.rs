//! Three-state value cycling for a single control

use super::field::FormField;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CycleError {
    /// The control holds something outside the cycle; carries the raw value
    #[error("Unexpected value: {0}")]
    UnexpectedValue(String),
}

/// An ordered cycle first → second → third → first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriState {
    pub first: char,
    pub second: char,
    pub third: char,
}

impl Default for TriState {
    fn default() -> Self {
        Self::new('✓', '?', '✗')
    }
}

impl TriState {
    pub fn new(first: char, second: char, third: char) -> Self {
        Self {
            first,
            second,
            third,
        }
    }

    /// Build from string tokens, each of which must be exactly one character
    pub fn from_tokens(tokens: &[String]) -> Option<Self> {
        let mut chars = tokens.iter().map(|t| {
            let mut it = t.chars();
            match (it.next(), it.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        });
        match (chars.next(), chars.next(), chars.next(), chars.next()) {
            (Some(Some(a)), Some(Some(b)), Some(Some(c)), None) => Some(Self::new(a, b, c)),
            _ => None,
        }
    }

    pub fn states(&self) -> [char; 3] {
        [self.first, self.second, self.third]
    }

    /// The state following `current`, if it belongs to the cycle
    pub fn next_after(&self, current: char) -> Option<char> {
        if current == self.first {
            Some(self.second)
        } else if current == self.second {
            Some(self.third)
        } else if current == self.third {
            Some(self.first)
        } else {
            None
        }
    }

    /// Advance the control by one step, judging only its first character.
    ///
    /// An unrecognised (or empty) value leaves the control untouched.
    pub fn cycle(&self, control: &mut FormField) -> Result<char, CycleError> {
        let next = control
            .as_text()
            .chars()
            .next()
            .and_then(|c| self.next_after(c))
            .ok_or_else(|| CycleError::UnexpectedValue(control.as_text().to_string()))?;
        control.set_text(next.to_string());
        tracing::debug!("Cycled {} to {next}", control.name);
        Ok(next)
    }
}

/// Advance `control` through the cycle `a → b → c → a`
pub fn cycle(control: &mut FormField, a: char, b: char, c: char) -> Result<(), CycleError> {
    TriState::new(a, b, c).cycle(control).map(|_| ())
}
