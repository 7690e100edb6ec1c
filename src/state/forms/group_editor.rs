//! Repeating field-group editor
//!
//! Owns the form and keeps exactly one "active tail": the most recently
//! created group is the only one whose add affordance is visible. Groups are
//! created by activating that add affordance and destroyed by activating
//! their own remove affordance.

use super::builder::{FieldGroupBuilder, GroupDefaults, Handlers};
use super::field::{FieldNaming, InputKind};
use super::form_state::{AffordanceKind, AffordanceRef, FieldGroup, Form, GroupId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("field group {0:?} does not exist")]
    UnknownGroup(GroupId),
    #[error("the {kind:?} control of field group {group:?} is hidden")]
    HiddenAffordance { group: GroupId, kind: AffordanceKind },
    #[error("fill in the date before adding another occasion")]
    EmptyDate(GroupId),
}

/// Editor behaviour knobs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorOptions {
    pub naming: FieldNaming,
    /// Refuse to add a group while the triggering group's date is blank
    pub require_date_before_add: bool,
    pub defaults: GroupDefaults,
    /// Pre-populate every new group, not only the host's first one
    pub copy_defaults_to_new_groups: bool,
}

#[derive(Debug, Clone)]
pub struct GroupEditor {
    form: Form,
    options: EditorOptions,
    last_created: Option<GroupId>,
}

impl GroupEditor {
    pub fn new(form: Form, options: EditorOptions) -> Self {
        Self {
            form,
            options,
            last_created: None,
        }
    }

    /// Listeners every group built for this editor gets
    pub fn handlers() -> Handlers {
        Handlers {
            on_add: Self::add_group,
            on_remove: Self::remove_group,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Group created by the most recent successful add
    pub fn last_created(&self) -> Option<GroupId> {
        self.last_created
    }

    /// Dispatch an activation to the listener registered on the affordance
    pub fn activate(&mut self, target: AffordanceRef) -> Result<(), EditorError> {
        let group = self
            .form
            .group(target.group)
            .ok_or(EditorError::UnknownGroup(target.group))?;
        let affordance = group.affordance(target.kind);
        if !affordance.visible {
            return Err(EditorError::HiddenAffordance {
                group: target.group,
                kind: target.kind,
            });
        }
        let handler = affordance.handler();
        handler(self, target.group)
    }

    /// Append a new group before the submit control and hand it the tail.
    ///
    /// `source` is the group whose add affordance was activated. Only the
    /// current tail may add, so at most one add affordance stays visible.
    fn add_group(&mut self, source: GroupId) -> Result<(), EditorError> {
        let source_group = self
            .form
            .group(source)
            .ok_or(EditorError::UnknownGroup(source))?;
        if !source_group.add.visible {
            return Err(EditorError::HiddenAffordance {
                group: source,
                kind: AffordanceKind::Add,
            });
        }

        if self.options.require_date_before_add
            && source_group.input(InputKind::Date).as_text().trim().is_empty()
        {
            return Err(EditorError::EmptyDate(source));
        }

        let id = self.form.allocate_group_id();
        let mut builder = FieldGroupBuilder::new(id, self.options.naming);
        if self.options.copy_defaults_to_new_groups {
            builder = builder.defaults(&self.options.defaults);
        }
        let group = builder.build(Self::handlers());
        self.form.insert_before_submit(group);

        if let Some(source_group) = self.form.group_mut(source) {
            source_group.remove.visible = true;
            source_group.add.visible = false;
        }
        self.last_created = Some(id);

        tracing::debug!(
            "Added field group {id:?} after {source:?} ({} total)",
            self.form.group_count()
        );
        Ok(())
    }

    /// Delete the group owning the activated remove affordance
    fn remove_group(&mut self, source: GroupId) -> Result<(), EditorError> {
        let removed: FieldGroup = self
            .form
            .remove_group(source)
            .ok_or(EditorError::UnknownGroup(source))?;
        if self.last_created == Some(removed.id) {
            self.last_created = None;
        }

        tracing::debug!(
            "Removed field group {source:?} ({} left)",
            self.form.group_count()
        );
        Ok(())
    }

    /// The single group whose add affordance is visible, if any
    pub fn active_tail(&self) -> Option<GroupId> {
        let mut visible = self.form.groups().filter(|g| g.add.visible);
        let tail = visible.next()?;
        debug_assert!(visible.next().is_none(), "more than one visible add control");
        Some(tail.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::form_state::{Node, SubmitControl};
    use pretty_assertions::assert_eq;

    fn editor() -> GroupEditor {
        GroupEditor::new(
            Form::booking(FieldNaming::List, &GroupDefaults::default()),
            EditorOptions::default(),
        )
    }

    fn add_ref(group: GroupId) -> AffordanceRef {
        AffordanceRef {
            group,
            kind: AffordanceKind::Add,
        }
    }

    fn remove_ref(group: GroupId) -> AffordanceRef {
        AffordanceRef {
            group,
            kind: AffordanceKind::Remove,
        }
    }

    /// (add visible, remove visible) per group in document order
    fn visibility(editor: &GroupEditor) -> Vec<(bool, bool)> {
        editor
            .form()
            .groups()
            .map(|g| (g.add.visible, g.remove.visible))
            .collect()
    }

    /// Activate the tail's add control `n` times
    fn grow(editor: &mut GroupEditor, n: usize) {
        for _ in 0..n {
            let tail = editor.active_tail().unwrap();
            editor.activate(add_ref(tail)).unwrap();
        }
    }

    mod adding {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_single_add_hands_over_tail() {
            let mut editor = editor();
            editor.activate(add_ref(GroupId(0))).unwrap();

            assert_eq!(editor.form().group_count(), 2);
            assert_eq!(visibility(&editor), vec![(false, true), (true, true)]);
            assert_eq!(editor.active_tail(), Some(GroupId(1)));
            assert_eq!(editor.last_created(), Some(GroupId(1)));
        }

        #[test]
        fn test_n_adds_leave_one_visible_add_on_newest() {
            for n in 0..8 {
                let mut editor = editor();
                grow(&mut editor, n);

                assert_eq!(editor.form().group_count(), n + 1);
                let vis = visibility(&editor);
                let adds: Vec<bool> = vis.iter().map(|(a, _)| *a).collect();
                assert_eq!(adds.iter().filter(|a| **a).count(), 1);
                assert_eq!(adds.last(), Some(&true));

                let newest = editor.form().groups().last().unwrap().id;
                assert_eq!(editor.active_tail(), Some(newest));

                // every group but possibly the first shows its remove control
                assert!(vis.iter().skip(1).all(|(_, r)| *r));
            }
        }

        #[test]
        fn test_new_groups_go_before_submit_in_order() {
            let mut editor = editor();
            grow(&mut editor, 3);

            let ids: Vec<_> = editor.form().groups().map(|g| g.id).collect();
            assert_eq!(ids, vec![GroupId(0), GroupId(1), GroupId(2), GroupId(3)]);
            assert!(matches!(editor.form().nodes().last(), Some(Node::Submit(_))));
        }

        #[test]
        fn test_add_accepts_empty_fields_by_default() {
            let mut editor = editor();
            assert!(editor.add_group(GroupId(0)).is_ok());
        }

        #[test]
        fn test_date_guard_blocks_blank_date() {
            let mut editor = GroupEditor::new(
                Form::booking(FieldNaming::List, &GroupDefaults::default()),
                EditorOptions {
                    require_date_before_add: true,
                    ..Default::default()
                },
            );
            editor
                .form_mut()
                .group_mut(GroupId(0))
                .unwrap()
                .input_mut(InputKind::Date)
                .set_text("   ");

            assert_eq!(
                editor.activate(add_ref(GroupId(0))),
                Err(EditorError::EmptyDate(GroupId(0)))
            );
            assert_eq!(editor.form().group_count(), 1);
            assert_eq!(visibility(&editor), vec![(true, false)]);
        }

        #[test]
        fn test_date_guard_allows_filled_date() {
            let mut editor = GroupEditor::new(
                Form::booking(FieldNaming::List, &GroupDefaults::default()),
                EditorOptions {
                    require_date_before_add: true,
                    ..Default::default()
                },
            );
            editor
                .form_mut()
                .group_mut(GroupId(0))
                .unwrap()
                .input_mut(InputKind::Date)
                .set_text("2024-06-01");

            assert!(editor.activate(add_ref(GroupId(0))).is_ok());
            assert_eq!(editor.form().group_count(), 2);
        }

        #[test]
        fn test_defaults_copied_only_when_enabled() {
            let defaults = GroupDefaults {
                date: Some("2024-06-01".to_string()),
                ..Default::default()
            };

            let mut plain = GroupEditor::new(
                Form::booking(FieldNaming::List, &defaults),
                EditorOptions {
                    defaults: defaults.clone(),
                    ..Default::default()
                },
            );
            plain.add_group(GroupId(0)).unwrap();
            assert_eq!(plain.form().group(GroupId(1)).unwrap().values().0, "");

            let mut copying = GroupEditor::new(
                Form::booking(FieldNaming::List, &defaults),
                EditorOptions {
                    defaults,
                    copy_defaults_to_new_groups: true,
                    ..Default::default()
                },
            );
            copying.add_group(GroupId(0)).unwrap();
            assert_eq!(
                copying.form().group(GroupId(1)).unwrap().values().0,
                "2024-06-01"
            );
        }

        #[test]
        fn test_new_inputs_follow_naming() {
            let mut editor = GroupEditor::new(
                Form::booking(FieldNaming::Plain, &GroupDefaults::default()),
                EditorOptions {
                    naming: FieldNaming::Plain,
                    ..Default::default()
                },
            );
            editor.add_group(GroupId(0)).unwrap();
            let group = editor.form().group(GroupId(1)).unwrap();
            assert_eq!(group.input(InputKind::Date).name, "dates");
        }
    }

    mod removing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_remove_newest_restores_group_count() {
            let mut editor = editor();
            editor.activate(add_ref(GroupId(0))).unwrap();
            editor.activate(remove_ref(GroupId(1))).unwrap();

            assert_eq!(editor.form().group_count(), 1);
            // the first group keeps the state the add left it in
            assert_eq!(visibility(&editor), vec![(false, true)]);
            assert_eq!(editor.last_created(), None);
        }

        #[test]
        fn test_remove_any_position_keeps_other_visibility() {
            for target in 0..4u64 {
                let mut editor = editor();
                grow(&mut editor, 3);

                let before: Vec<_> = editor
                    .form()
                    .groups()
                    .filter(|g| g.id != GroupId(target))
                    .map(|g| (g.id, g.add.visible, g.remove.visible))
                    .collect();

                let count = editor.form().group_count();
                editor.activate(remove_ref(GroupId(target))).unwrap();

                let after: Vec<_> = editor
                    .form()
                    .groups()
                    .map(|g| (g.id, g.add.visible, g.remove.visible))
                    .collect();
                assert_eq!(editor.form().group_count(), count - 1);
                assert_eq!(after, before);
            }
        }

        #[test]
        fn test_removing_everything_leaves_no_add_control() {
            let mut editor = editor();
            grow(&mut editor, 1);
            editor.activate(remove_ref(GroupId(0))).unwrap();
            editor.activate(remove_ref(GroupId(1))).unwrap();

            assert_eq!(editor.form().group_count(), 0);
            assert_eq!(editor.active_tail(), None);
            assert!(matches!(editor.form().nodes().last(), Some(Node::Submit(_))));
        }

        #[test]
        fn test_remove_unknown_group_errors() {
            let mut editor = editor();
            assert_eq!(
                editor.remove_group(GroupId(9)),
                Err(EditorError::UnknownGroup(GroupId(9)))
            );
        }
    }

    mod dispatch {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_hidden_affordance_is_rejected() {
            let mut editor = editor();
            assert_eq!(
                editor.activate(remove_ref(GroupId(0))),
                Err(EditorError::HiddenAffordance {
                    group: GroupId(0),
                    kind: AffordanceKind::Remove,
                })
            );
            assert_eq!(editor.form().group_count(), 1);
        }

        #[test]
        fn test_add_handler_refuses_groups_that_lost_the_tail() {
            let mut editor = editor();
            assert!(editor.add_group(GroupId(0)).is_ok());
            assert_eq!(
                editor.add_group(GroupId(0)),
                Err(EditorError::HiddenAffordance {
                    group: GroupId(0),
                    kind: AffordanceKind::Add,
                })
            );
            assert_eq!(editor.form().group_count(), 2);
            assert_eq!(visibility(&editor), vec![(false, true), (true, true)]);
            assert_eq!(editor.active_tail(), Some(GroupId(1)));
        }

        #[test]
        fn test_stale_reference_is_rejected() {
            let mut editor = editor();
            grow(&mut editor, 1);
            editor.activate(remove_ref(GroupId(1))).unwrap();
            assert_eq!(
                editor.activate(add_ref(GroupId(1))),
                Err(EditorError::UnknownGroup(GroupId(1)))
            );
        }

        #[test]
        fn test_host_markup_groups_are_wired() {
            let first = FieldGroupBuilder::new(GroupId(10), FieldNaming::List)
                .show(AffordanceKind::Remove, false)
                .build(GroupEditor::handlers());
            let form = Form::new(vec![
                Node::Group(first),
                Node::Submit(SubmitControl::default()),
            ])
            .unwrap();
            let mut editor = GroupEditor::new(form, EditorOptions::default());

            editor.activate(add_ref(GroupId(10))).unwrap();
            let newest = editor.last_created().unwrap();
            assert_eq!(newest, GroupId(11));

            // the chain continues through dynamically created groups
            editor.activate(add_ref(newest)).unwrap();
            assert_eq!(editor.form().group_count(), 3);
        }
    }
}
