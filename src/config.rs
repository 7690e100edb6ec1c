//! Configuration handling for the TUI

use crate::state::{EditorOptions, FieldNaming, GroupDefaults, TriState};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Submission naming for occasion inputs ("list" or "plain")
    pub field_naming: Option<FieldNaming>,
    /// Refuse to add an occasion while the previous date is blank
    pub require_date_before_add: Option<bool>,
    /// Value pre-filled into the first occasion's date
    pub default_date: Option<String>,
    /// Value pre-filled into the first occasion's start time
    pub default_start_time: Option<String>,
    /// Value pre-filled into the first occasion's end time
    pub default_end_time: Option<String>,
    /// Pre-fill every new occasion, not only the first
    pub copy_defaults_to_new_groups: Option<bool>,
    /// Three single-character answer states, cycled in order
    pub answer_states: Option<Vec<String>>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "occasion", "occasion-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path, falling back to defaults when it is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn naming(&self) -> FieldNaming {
        self.field_naming.unwrap_or_default()
    }

    pub fn group_defaults(&self) -> GroupDefaults {
        GroupDefaults {
            date: self.default_date.clone(),
            start_time: self.default_start_time.clone(),
            end_time: self.default_end_time.clone(),
        }
    }

    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            naming: self.naming(),
            require_date_before_add: self.require_date_before_add.unwrap_or(false),
            defaults: self.group_defaults(),
            copy_defaults_to_new_groups: self.copy_defaults_to_new_groups.unwrap_or(false),
        }
    }

    /// Configured answer cycle, or the default one when unset or malformed
    pub fn answer_states(&self) -> TriState {
        match &self.answer_states {
            None => TriState::default(),
            Some(tokens) => TriState::from_tokens(tokens).unwrap_or_else(|| {
                tracing::warn!(
                    "Ignoring answer_states {tokens:?}: expected three single characters"
                );
                TriState::default()
            }),
        }
    }
}
