//! The in-memory form tree: metadata fields, field groups and the submit control

use super::builder::{FieldGroupBuilder, GroupDefaults};
use super::field::{FieldNaming, FormField, InputKind};
use super::group_editor::{EditorError, GroupEditor};
use thiserror::Error;

/// Identifies a field group for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u64);

/// The two clickable controls of a field group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AffordanceKind {
    Add,
    Remove,
}

impl AffordanceKind {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Remove => "-",
        }
    }
}

/// Addresses one affordance of one group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AffordanceRef {
    pub group: GroupId,
    pub kind: AffordanceKind,
}

/// Listener invoked when an affordance is activated
pub type AffordanceHandler = fn(&mut GroupEditor, GroupId) -> Result<(), EditorError>;

#[derive(Debug, Clone)]
pub struct Affordance {
    pub kind: AffordanceKind,
    pub visible: bool,
    pub(super) handler: AffordanceHandler,
}

impl Affordance {
    pub(super) fn new(kind: AffordanceKind, visible: bool, handler: AffordanceHandler) -> Self {
        Self {
            kind,
            visible,
            handler,
        }
    }

    pub fn handler(&self) -> AffordanceHandler {
        self.handler
    }
}

/// One repeatable date + start + end unit with its add/remove pair
#[derive(Debug, Clone)]
pub struct FieldGroup {
    pub id: GroupId,
    pub inputs: [FormField; 3],
    pub add: Affordance,
    pub remove: Affordance,
}

impl FieldGroup {
    pub fn input(&self, kind: InputKind) -> &FormField {
        &self.inputs[kind.index()]
    }

    pub fn input_mut(&mut self, kind: InputKind) -> &mut FormField {
        &mut self.inputs[kind.index()]
    }

    pub fn affordance(&self, kind: AffordanceKind) -> &Affordance {
        match kind {
            AffordanceKind::Add => &self.add,
            AffordanceKind::Remove => &self.remove,
        }
    }

    /// (date, start, end) values as currently entered
    pub fn values(&self) -> (&str, &str, &str) {
        (
            self.inputs[0].as_text(),
            self.inputs[1].as_text(),
            self.inputs[2].as_text(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            label: "Submit".to_string(),
        }
    }
}

/// A direct child of the form
#[derive(Debug, Clone)]
pub enum Node {
    Field(FormField),
    Group(FieldGroup),
    Submit(SubmitControl),
}

/// Something the keyboard cursor can rest on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    Field(String),
    Input(GroupId, InputKind),
    Affordance(AffordanceRef),
    Submit,
}

/// Violations of the host markup contract
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("the form must end with a submit control")]
    MissingSubmit,
    #[error("the form has {0} submit controls, expected exactly one")]
    MultipleSubmits(usize),
    #[error("the form must contain an initial field group")]
    NoInitialGroup,
}

/// The single form under management
#[derive(Debug, Clone)]
pub struct Form {
    nodes: Vec<Node>,
    next_group_id: u64,
}

impl Form {
    /// Adopt host-supplied markup after checking its shape
    pub fn new(nodes: Vec<Node>) -> Result<Self, FormError> {
        let submits = nodes
            .iter()
            .filter(|n| matches!(n, Node::Submit(_)))
            .count();
        if submits > 1 {
            return Err(FormError::MultipleSubmits(submits));
        }
        if !matches!(nodes.last(), Some(Node::Submit(_))) {
            return Err(FormError::MissingSubmit);
        }
        let max_id = nodes
            .iter()
            .filter_map(|n| match n {
                Node::Group(g) => Some(g.id.0),
                _ => None,
            })
            .max()
            .ok_or(FormError::NoInitialGroup)?;

        Ok(Self {
            nodes,
            next_group_id: max_id + 1,
        })
    }

    /// Markup of the booking page: metadata fields, one initial group, submit.
    ///
    /// The initial group shows its add affordance and hides its remove one.
    pub fn booking(naming: FieldNaming, defaults: &GroupDefaults) -> Self {
        let first = FieldGroupBuilder::new(GroupId(0), naming)
            .defaults(defaults)
            .show(AffordanceKind::Add, true)
            .show(AffordanceKind::Remove, false)
            .build(GroupEditor::handlers());

        Self {
            nodes: vec![
                Node::Field(FormField::text("title", "Title", false)),
                Node::Field(FormField::text("description", "Description", true)),
                Node::Field(FormField::text("location", "Location", false)),
                Node::Group(first),
                Node::Submit(SubmitControl::default()),
            ],
            next_group_id: 1,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(super) fn allocate_group_id(&mut self) -> GroupId {
        let id = GroupId(self.next_group_id);
        self.next_group_id += 1;
        id
    }

    pub fn groups(&self) -> impl Iterator<Item = &FieldGroup> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Group(g) => Some(g),
            _ => None,
        })
    }

    pub fn group_count(&self) -> usize {
        self.groups().count()
    }

    pub fn group(&self, id: GroupId) -> Option<&FieldGroup> {
        self.groups().find(|g| g.id == id)
    }

    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut FieldGroup> {
        self.nodes.iter_mut().find_map(|n| match n {
            Node::Group(g) if g.id == id => Some(g),
            _ => None,
        })
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.nodes.iter().find_map(|n| match n {
            Node::Field(f) if f.name == name => Some(f),
            _ => None,
        })
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.nodes.iter_mut().find_map(|n| match n {
            Node::Field(f) if f.name == name => Some(f),
            _ => None,
        })
    }

    pub fn submit(&self) -> Option<&SubmitControl> {
        self.nodes.iter().find_map(|n| match n {
            Node::Submit(s) => Some(s),
            _ => None,
        })
    }

    /// Place a group directly before the submit control
    pub(super) fn insert_before_submit(&mut self, group: FieldGroup) {
        let at = self
            .nodes
            .iter()
            .position(|n| matches!(n, Node::Submit(_)))
            .unwrap_or(self.nodes.len());
        self.nodes.insert(at, Node::Group(group));
    }

    /// Detach a group and everything it contains
    pub(super) fn remove_group(&mut self, id: GroupId) -> Option<FieldGroup> {
        let at = self
            .nodes
            .iter()
            .position(|n| matches!(n, Node::Group(g) if g.id == id))?;
        match self.nodes.remove(at) {
            Node::Group(g) => Some(g),
            _ => None,
        }
    }

    /// The text input addressed by a focus target, if it is one
    pub fn text_input_mut(&mut self, target: &FocusTarget) -> Option<&mut FormField> {
        match target {
            FocusTarget::Field(name) => self.field_mut(name),
            FocusTarget::Input(id, kind) => self.group_mut(*id).map(|g| g.input_mut(*kind)),
            _ => None,
        }
    }

    /// Focusable items in document order; hidden affordances are skipped
    pub fn focus_targets(&self) -> Vec<FocusTarget> {
        let mut targets = Vec::new();
        for node in &self.nodes {
            match node {
                Node::Field(f) => targets.push(FocusTarget::Field(f.name.clone())),
                Node::Group(g) => {
                    for kind in InputKind::ALL {
                        targets.push(FocusTarget::Input(g.id, kind));
                    }
                    for affordance in [&g.add, &g.remove] {
                        if affordance.visible {
                            targets.push(FocusTarget::Affordance(AffordanceRef {
                                group: g.id,
                                kind: affordance.kind,
                            }));
                        }
                    }
                }
                Node::Submit(_) => targets.push(FocusTarget::Submit),
            }
        }
        targets
    }

    /// Name/value pairs in document order, as a receiver would see them
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for node in &self.nodes {
            match node {
                Node::Field(f) => pairs.push((f.name.clone(), f.value.clone())),
                Node::Group(g) => {
                    pairs.extend(g.inputs.iter().map(|i| (i.name.clone(), i.value.clone())))
                }
                Node::Submit(_) => {}
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn group(id: u64) -> FieldGroup {
        FieldGroupBuilder::new(GroupId(id), FieldNaming::List).build(GroupEditor::handlers())
    }

    mod construction {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_requires_trailing_submit() {
            let result = Form::new(vec![
                Node::Submit(SubmitControl::default()),
                Node::Group(group(0)),
            ]);
            assert_eq!(result.unwrap_err(), FormError::MissingSubmit);
        }

        #[test]
        fn test_new_rejects_two_submits() {
            let result = Form::new(vec![
                Node::Group(group(0)),
                Node::Submit(SubmitControl::default()),
                Node::Submit(SubmitControl::default()),
            ]);
            assert_eq!(result.unwrap_err(), FormError::MultipleSubmits(2));
        }

        #[test]
        fn test_new_requires_initial_group() {
            let result = Form::new(vec![Node::Submit(SubmitControl::default())]);
            assert_eq!(result.unwrap_err(), FormError::NoInitialGroup);
        }

        #[test]
        fn test_new_continues_ids_after_host_groups() {
            let mut form = Form::new(vec![
                Node::Group(group(4)),
                Node::Submit(SubmitControl::default()),
            ])
            .unwrap();
            assert_eq!(form.allocate_group_id(), GroupId(5));
            assert_eq!(form.allocate_group_id(), GroupId(6));
        }

        #[test]
        fn test_booking_layout() {
            let form = Form::booking(FieldNaming::List, &GroupDefaults::default());
            assert_eq!(form.nodes().len(), 5);
            assert_eq!(form.group_count(), 1);
            assert!(matches!(form.nodes().last(), Some(Node::Submit(_))));

            let first = form.groups().next().unwrap();
            assert!(first.add.visible);
            assert!(!first.remove.visible);
        }

        #[test]
        fn test_booking_applies_defaults() {
            let defaults = GroupDefaults {
                date: Some("2024-05-01".to_string()),
                ..Default::default()
            };
            let form = Form::booking(FieldNaming::List, &defaults);
            let first = form.groups().next().unwrap();
            assert_eq!(first.values(), ("2024-05-01", "", ""));
        }
    }

    mod tree_edits {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_insert_before_submit_keeps_submit_last() {
            let mut form = Form::booking(FieldNaming::List, &GroupDefaults::default());
            let id = form.allocate_group_id();
            form.insert_before_submit(group(id.0));
            assert!(matches!(form.nodes().last(), Some(Node::Submit(_))));
            let ids: Vec<_> = form.groups().map(|g| g.id).collect();
            assert_eq!(ids, vec![GroupId(0), GroupId(1)]);
        }

        #[test]
        fn test_remove_group_unknown_returns_none() {
            let mut form = Form::booking(FieldNaming::List, &GroupDefaults::default());
            assert!(form.remove_group(GroupId(42)).is_none());
            assert_eq!(form.group_count(), 1);
        }

        #[test]
        fn test_text_input_mut_reaches_fields_and_inputs() {
            let mut form = Form::booking(FieldNaming::List, &GroupDefaults::default());
            form.text_input_mut(&FocusTarget::Field("title".to_string()))
                .unwrap()
                .push_char('x');
            form.text_input_mut(&FocusTarget::Input(GroupId(0), InputKind::EndTime))
                .unwrap()
                .push_char('9');
            assert_eq!(form.field("title").unwrap().as_text(), "x");
            assert_eq!(form.group(GroupId(0)).unwrap().values().2, "9");
            assert!(form.text_input_mut(&FocusTarget::Submit).is_none());
        }
    }

    mod focus {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_focus_targets_skip_hidden_affordances() {
            let form = Form::booking(FieldNaming::List, &GroupDefaults::default());
            let targets = form.focus_targets();
            assert!(targets.contains(&FocusTarget::Affordance(AffordanceRef {
                group: GroupId(0),
                kind: AffordanceKind::Add,
            })));
            assert!(!targets.contains(&FocusTarget::Affordance(AffordanceRef {
                group: GroupId(0),
                kind: AffordanceKind::Remove,
            })));
            assert_eq!(targets.last(), Some(&FocusTarget::Submit));
            assert_eq!(targets.len(), 3 + 3 + 1 + 1);
        }
    }

    #[test]
    fn test_pairs_in_document_order() {
        let mut form = Form::booking(FieldNaming::Plain, &GroupDefaults::default());
        form.field_mut("title").unwrap().set_text("Board meeting");
        let pairs = form.pairs();
        let names: Vec<_> = pairs.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["title", "description", "location", "dates", "start_times", "end_times"]
        );
        assert_eq!(pairs[0].1, "Board meeting");
    }
}
