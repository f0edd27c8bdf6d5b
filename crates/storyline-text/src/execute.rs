//! Action execution for style documents.
//!
//! This module provides `execute_format_action`, which applies a
//! `FormatAction` to any type implementing `StyleDocument` and
//! `UndoManager`, and `handle_keydown`, which routes a key combo through a
//! keybinding table first.

use crate::actions::{FormatAction, KeyCombo, KeydownResult, Keybindings};
use crate::attrs::{AttrName, AttrValue};
use crate::document::{FormatTarget, StyleDocument};
use crate::error::Result;
use crate::mutate::apply_attribute;
use crate::toggle::ToggleResolver;
use crate::undo::UndoManager;

/// Execute a formatting action against `targets`.
///
/// Returns true if the document was modified. An error leaves every element
/// untouched.
pub fn execute_format_action<D>(
    doc: &mut D,
    resolver: &ToggleResolver,
    targets: &[FormatTarget],
    action: &FormatAction,
) -> Result<bool>
where
    D: StyleDocument + UndoManager,
{
    tracing::debug!(target: "storyline::execute", ?action, targets = targets.len(), "format action");
    match action {
        FormatAction::ToggleBold => execute_toggle(doc, resolver, targets, AttrName::Bold),
        FormatAction::ToggleItalic => execute_toggle(doc, resolver, targets, AttrName::Italic),
        FormatAction::ToggleUnderline => {
            execute_toggle(doc, resolver, targets, AttrName::Underline)
        }
        FormatAction::SetAttribute { attr, value } => execute_set(doc, targets, *attr, value),
        FormatAction::Undo => Ok(doc.undo()),
        FormatAction::Redo => Ok(doc.redo()),
    }
}

fn execute_toggle<D: StyleDocument>(
    doc: &mut D,
    resolver: &ToggleResolver,
    targets: &[FormatTarget],
    attr: AttrName,
) -> Result<bool> {
    let updates: Vec<_> = {
        let grouped = doc.resolve_grouped(targets)?;
        let elements: Vec<_> = grouped
            .iter()
            .map(|g| (g.runs, g.selections.as_slice()))
            .collect();
        let updated = resolver.toggle_flag_grouped(&elements, attr)?;
        grouped
            .iter()
            .map(|g| g.element.clone())
            .zip(updated)
            .collect()
    };
    doc.replace_runs(updates)
}

fn execute_set<D: StyleDocument>(
    doc: &mut D,
    targets: &[FormatTarget],
    attr: AttrName,
    value: &AttrValue,
) -> Result<bool> {
    let updates = doc
        .resolve_grouped(targets)?
        .into_iter()
        .map(|g| {
            let runs = g.selections.iter().try_fold(g.runs.clone(), |acc, selection| {
                apply_attribute(&acc, *selection, attr, value)
            })?;
            Ok((g.element, runs))
        })
        .collect::<Result<Vec<_>>>()?;
    doc.replace_runs(updates)
}

/// Handle a keydown against a keybinding table.
///
/// Bound combos run their action. Unbound navigation keys pass through to
/// the platform; anything else is not handled.
pub fn handle_keydown<D>(
    doc: &mut D,
    resolver: &ToggleResolver,
    bindings: &Keybindings,
    targets: &[FormatTarget],
    combo: &KeyCombo,
) -> Result<KeydownResult>
where
    D: StyleDocument + UndoManager,
{
    if let Some(action) = bindings.lookup(combo) {
        execute_format_action(doc, resolver, targets, action)?;
        return Ok(KeydownResult::Handled);
    }
    if combo.key.is_navigation() {
        return Ok(KeydownResult::PassThrough);
    }
    Ok(KeydownResult::NotHandled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Key, Modifiers};
    use crate::error::ErrorKind;
    use crate::store::{ElementId, StyleStore};
    use crate::types::Selection;

    fn store() -> StyleStore {
        let mut store = StyleStore::new();
        store.create_element("title", 6);
        store.create_element("body", 4);
        store.clear_history();
        store
    }

    fn runs_of(store: &StyleStore, id: &str) -> String {
        store.runs(&ElementId::new(id)).unwrap().to_string()
    }

    #[test]
    fn test_toggle_bold_then_undo() {
        let mut store = store();
        let targets = [FormatTarget::new("title", Selection::new(0, 3))];
        let resolver = ToggleResolver::default();

        assert!(execute_format_action(&mut store, &resolver, &targets, &FormatAction::ToggleBold).unwrap());
        assert_eq!(runs_of(&store, "title"), "0..3 [w700] | 3..6 [w400]");

        assert!(execute_format_action(&mut store, &resolver, &targets, &FormatAction::Undo).unwrap());
        assert_eq!(runs_of(&store, "title"), "0..6 [w400]");
        assert!(!execute_format_action(&mut store, &resolver, &targets, &FormatAction::Undo).unwrap());
    }

    #[test]
    fn test_multi_element_set_is_one_undo_step() {
        let mut store = store();
        let targets = [
            FormatTarget::new("title", Selection::all(6)),
            FormatTarget::new("body", Selection::all(4)),
        ];
        let action = FormatAction::SetAttribute {
            attr: AttrName::Underline,
            value: AttrValue::Bool(true),
        };
        let resolver = ToggleResolver::default();
        assert!(execute_format_action(&mut store, &resolver, &targets, &action).unwrap());
        assert_eq!(runs_of(&store, "body"), "0..4 [w400 underline]");

        assert!(store.undo());
        assert_eq!(runs_of(&store, "title"), "0..6 [w400]");
        assert_eq!(runs_of(&store, "body"), "0..4 [w400]");
    }

    #[test]
    fn test_caret_target_changes_nothing() {
        let mut store = store();
        let targets = [FormatTarget::new("body", Selection::collapsed(2))];
        let changed = execute_format_action(
            &mut store,
            &ToggleResolver::default(),
            &targets,
            &FormatAction::ToggleItalic,
        )
        .unwrap();
        assert!(!changed);
        assert!(!store.can_undo());
    }

    #[test]
    fn test_unknown_element_fails_whole_action() {
        let mut store = store();
        let targets = [
            FormatTarget::new("title", Selection::all(6)),
            FormatTarget::new("ghost", Selection::all(1)),
        ];
        let err = execute_format_action(
            &mut store,
            &ToggleResolver::default(),
            &targets,
            &FormatAction::ToggleBold,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownElement);
        assert_eq!(runs_of(&store, "title"), "0..6 [w400]");
    }

    #[test]
    fn test_keydown_routing() {
        let mut store = store();
        let bindings = Keybindings::default_for(true);
        let resolver = ToggleResolver::default();
        let targets = [FormatTarget::new("body", Selection::all(4))];

        let cmd_u = KeyCombo::with_modifiers(Key::character("u"), Modifiers::META);
        let result = handle_keydown(&mut store, &resolver, &bindings, &targets, &cmd_u).unwrap();
        assert_eq!(result, KeydownResult::Handled);
        assert_eq!(runs_of(&store, "body"), "0..4 [w400 underline]");

        let up = KeyCombo::new(Key::ArrowUp);
        let result = handle_keydown(&mut store, &resolver, &bindings, &targets, &up).unwrap();
        assert_eq!(result, KeydownResult::PassThrough);

        let plain = KeyCombo::new(Key::character("q"));
        let result = handle_keydown(&mut store, &resolver, &bindings, &targets, &plain).unwrap();
        assert_eq!(result, KeydownResult::NotHandled);
    }

    #[test]
    fn test_two_targets_in_one_element_both_land() {
        let mut store = StyleStore::new();
        store.create_element("title", 10);
        store.clear_history();
        let targets = [
            FormatTarget::new("title", Selection::new(0, 2)),
            FormatTarget::new("title", Selection::new(6, 8)),
        ];
        let resolver = ToggleResolver::default();

        assert!(execute_format_action(&mut store, &resolver, &targets, &FormatAction::ToggleItalic).unwrap());
        assert_eq!(
            runs_of(&store, "title"),
            "0..2 [w400 italic] | 2..6 [w400] | 6..8 [w400 italic] | 8..10 [w400]"
        );

        let action = FormatAction::SetAttribute {
            attr: AttrName::FontWeight,
            value: AttrValue::Number(900.0),
        };
        assert!(execute_format_action(&mut store, &resolver, &targets, &action).unwrap());
        assert_eq!(
            runs_of(&store, "title"),
            "0..2 [w900 italic] | 2..6 [w400] | 6..8 [w900 italic] | 8..10 [w400]"
        );

        // One element is still the inline scope, so black does not carry over.
        let wider = [
            FormatTarget::new("title", Selection::new(0, 4)),
            FormatTarget::new("title", Selection::new(6, 8)),
        ];
        assert!(execute_format_action(&mut store, &resolver, &wider, &FormatAction::ToggleBold).unwrap());
        assert_eq!(
            runs_of(&store, "title"),
            "0..2 [w700 italic] | 2..4 [w700] | 4..6 [w400] | 6..8 [w700 italic] | 8..10 [w400]"
        );

        assert!(store.undo());
        assert!(store.undo());
        assert!(store.undo());
        assert_eq!(runs_of(&store, "title"), "0..10 [w400]");
        assert!(!store.can_undo());
    }
}
