//! Form domain layer
//!
//! The booking form is a tree of metadata fields, repeating date/time field
//! groups and a trailing submit control. `GroupEditor` owns that tree and is
//! the only thing that adds or removes groups; `TriState` cycles a single
//! control through three symbolic states.

mod builder;
mod field;
mod form_state;
mod group_editor;
mod tristate;

pub use builder::{FieldGroupBuilder, GroupDefaults, Handlers};
pub use field::{FieldNaming, FormField, InputKind};
pub use form_state::{
    Affordance, AffordanceHandler, AffordanceKind, AffordanceRef, FieldGroup, FocusTarget, Form,
    FormError, GroupId, Node, SubmitControl,
};
pub use group_editor::{EditorError, EditorOptions, GroupEditor};
pub use tristate::{cycle, CycleError, TriState};
