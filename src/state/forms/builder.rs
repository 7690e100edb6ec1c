//! Typed construction of field groups

use super::field::{FieldNaming, FormField, InputKind};
use super::form_state::{Affordance, AffordanceHandler, AffordanceKind, FieldGroup, GroupId};
use serde::{Deserialize, Serialize};

/// Values to pre-populate a group's inputs with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDefaults {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl GroupDefaults {
    pub fn get(&self, kind: InputKind) -> Option<&str> {
        match kind {
            InputKind::Date => self.date.as_deref(),
            InputKind::StartTime => self.start_time.as_deref(),
            InputKind::EndTime => self.end_time.as_deref(),
        }
    }
}

/// Listeners attached to a group's affordances when it is built
#[derive(Debug, Clone, Copy)]
pub struct Handlers {
    pub on_add: AffordanceHandler,
    pub on_remove: AffordanceHandler,
}

/// Builds a [`FieldGroup`] from the fixed set of inputs and affordances.
///
/// Both affordances start visible unless told otherwise.
#[derive(Debug, Clone)]
pub struct FieldGroupBuilder {
    id: GroupId,
    naming: FieldNaming,
    values: [String; 3],
    add_visible: bool,
    remove_visible: bool,
}

impl FieldGroupBuilder {
    pub fn new(id: GroupId, naming: FieldNaming) -> Self {
        Self {
            id,
            naming,
            values: Default::default(),
            add_visible: true,
            remove_visible: true,
        }
    }

    pub fn value(mut self, kind: InputKind, value: impl Into<String>) -> Self {
        self.values[kind.index()] = value.into();
        self
    }

    pub fn defaults(mut self, defaults: &GroupDefaults) -> Self {
        for kind in InputKind::ALL {
            if let Some(value) = defaults.get(kind) {
                self.values[kind.index()] = value.to_string();
            }
        }
        self
    }

    pub fn show(mut self, kind: AffordanceKind, visible: bool) -> Self {
        match kind {
            AffordanceKind::Add => self.add_visible = visible,
            AffordanceKind::Remove => self.remove_visible = visible,
        }
        self
    }

    pub fn build(self, handlers: Handlers) -> FieldGroup {
        let naming = self.naming;
        let [date, start, end] = self.values;
        FieldGroup {
            id: self.id,
            inputs: [
                FormField::group_input(InputKind::Date, naming, date),
                FormField::group_input(InputKind::StartTime, naming, start),
                FormField::group_input(InputKind::EndTime, naming, end),
            ],
            add: Affordance::new(AffordanceKind::Add, self.add_visible, handlers.on_add),
            remove: Affordance::new(
                AffordanceKind::Remove,
                self.remove_visible,
                handlers.on_remove,
            ),
        }
    }
}
