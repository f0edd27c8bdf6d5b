//! In-memory style store with undo.
//!
//! [`StyleStore`] owns the run list of every text element in a story. Edits
//! land through [`StyleDocument::replace_runs`], which validates the whole
//! batch before touching anything and records one history entry per batch,
//! so a multi-element toggle undoes in a single step.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::actions::FormatAction;
use crate::attrs::StyleAttributes;
use crate::document::{FormatTarget, StyleDocument};
use crate::error::Result;
use crate::execute::execute_format_action;
use crate::runs::StyleRuns;
use crate::toggle::ToggleResolver;
use crate::undo::{History, UndoManager};

/// Identifier of a text element.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(SmolStr);

impl ElementId {
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<SmolStr> for ElementId {
    fn from(id: SmolStr) -> Self {
        Self(id)
    }
}

/// One element's runs before and after an edit. `None` means absent.
#[derive(Clone, Debug, PartialEq)]
struct RunsChange {
    element: ElementId,
    before: Option<StyleRuns>,
    after: Option<StyleRuns>,
}

type ChangeSet = Vec<RunsChange>;

#[derive(Clone, Debug, Default)]
pub struct StyleStore {
    elements: BTreeMap<ElementId, StyleRuns>,
    history: History<ChangeSet>,
}

impl StyleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store keeping at most `max_steps` undo entries.
    pub fn with_max_steps(max_steps: usize) -> Self {
        Self {
            elements: BTreeMap::new(),
            history: History::new(max_steps),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn element_ids(&self) -> impl Iterator<Item = &ElementId> + '_ {
        self.elements.keys()
    }

    /// Add a plain element of `len` chars. Replaces any element with that id.
    pub fn create_element(&mut self, id: impl Into<ElementId>, len: usize) {
        self.insert_element(id, StyleRuns::plain(len));
    }

    /// Add an element with existing runs. Replaces any element with that id.
    pub fn insert_element(&mut self, id: impl Into<ElementId>, runs: StyleRuns) {
        let element = id.into();
        let before = self.elements.get(&element).cloned();
        self.record(vec![RunsChange {
            element,
            before,
            after: Some(runs),
        }]);
    }

    pub fn remove_element(&mut self, id: &ElementId) -> Result<StyleRuns> {
        let before = self.require_runs(id)?.clone();
        self.record(vec![RunsChange {
            element: id.clone(),
            before: Some(before.clone()),
            after: None,
        }]);
        Ok(before)
    }

    /// Insert `count` typed chars into an element. See [`StyleRuns::insert`].
    pub fn insert_text(
        &mut self,
        id: &ElementId,
        at: usize,
        count: usize,
        attributes: Option<StyleAttributes>,
    ) -> Result<bool> {
        let runs = self.require_runs(id)?.insert(at, count, attributes)?;
        self.replace_runs(vec![(id.clone(), runs)])
    }

    /// Delete a range of chars from an element. See [`StyleRuns::remove`].
    pub fn remove_text(&mut self, id: &ElementId, range: Range<usize>) -> Result<bool> {
        let runs = self.require_runs(id)?.remove(range)?;
        self.replace_runs(vec![(id.clone(), runs)])
    }

    /// Run a format action against this store.
    ///
    /// See [`execute_format_action`]; returns whether anything changed.
    pub fn dispatch(
        &mut self,
        resolver: &ToggleResolver,
        targets: &[FormatTarget],
        action: &FormatAction,
    ) -> Result<bool> {
        execute_format_action(self, resolver, targets, action)
    }

    fn record(&mut self, changes: ChangeSet) {
        let changes: ChangeSet = changes
            .into_iter()
            .filter(|c| c.before != c.after)
            .collect();
        if changes.is_empty() {
            return;
        }
        self.apply(&changes, true);
        tracing::debug!(target: "storyline::store", elements = changes.len(), "recorded style edit");
        self.history.record(changes);
    }

    fn apply(&mut self, changes: &ChangeSet, forward: bool) {
        for change in changes {
            let state = if forward { &change.after } else { &change.before };
            match state {
                Some(runs) => {
                    self.elements.insert(change.element.clone(), runs.clone());
                }
                None => {
                    self.elements.remove(&change.element);
                }
            }
        }
    }
}

impl StyleDocument for StyleStore {
    fn runs(&self, id: &ElementId) -> Option<&StyleRuns> {
        self.elements.get(id)
    }

    fn replace_runs(&mut self, updates: Vec<(ElementId, StyleRuns)>) -> Result<bool> {
        let mut changes: ChangeSet = Vec::with_capacity(updates.len());
        for (element, runs) in updates {
            // A repeated id replaces what the earlier update in this batch wrote.
            let earlier = changes
                .iter()
                .rev()
                .find(|c| c.element == element)
                .and_then(|c| c.after.clone());
            let before = match earlier {
                Some(runs) => runs,
                None => self.require_runs(&element)?.clone(),
            };
            changes.push(RunsChange {
                element,
                before: Some(before),
                after: Some(runs),
            });
        }
        let changed = changes.iter().any(|c| c.before != c.after);
        self.record(changes);
        Ok(changed)
    }
}

impl UndoManager for StyleStore {
    fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn undo(&mut self) -> bool {
        let Some(changes) = self.history.pop_undo() else {
            return false;
        };
        // Reverse so repeated ids in one batch unwind in order.
        let reversed: ChangeSet = changes.iter().rev().cloned().collect();
        self.apply(&reversed, false);
        tracing::debug!(target: "storyline::store", elements = changes.len(), "undo");
        self.history.push_redo(changes);
        true
    }

    fn redo(&mut self) -> bool {
        let Some(changes) = self.history.pop_redo() else {
            return false;
        };
        self.apply(&changes, true);
        tracing::debug!(target: "storyline::store", elements = changes.len(), "redo");
        self.history.push_undo(changes);
        true
    }

    fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::{AttrName, AttrValue};
    use crate::error::ErrorKind;
    use crate::mutate::apply_attribute;
    use crate::types::Selection;

    fn id(s: &str) -> ElementId {
        ElementId::new(s)
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let mut store = StyleStore::new();
        store.create_element("title", 5);
        let bold = apply_attribute(
            store.runs(&id("title")).unwrap(),
            Selection::all(5),
            AttrName::FontWeight,
            &AttrValue::Number(700.0),
        )
        .unwrap();

        let err = store
            .replace_runs(vec![
                (id("title"), bold),
                (id("missing"), StyleRuns::plain(1)),
            ])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownElement);
        assert_eq!(store.runs(&id("title")).unwrap(), &StyleRuns::plain(5));
    }

    #[test]
    fn test_undo_redo_restores_runs() {
        let mut store = StyleStore::new();
        store.create_element("body", 4);
        store.clear_history();
        assert!(!store.can_undo());

        assert!(store.insert_text(&id("body"), 4, 2, None).unwrap());
        assert_eq!(store.runs(&id("body")).unwrap().len(), 6);

        assert!(store.undo());
        assert_eq!(store.runs(&id("body")).unwrap(), &StyleRuns::plain(4));
        assert!(store.redo());
        assert_eq!(store.runs(&id("body")).unwrap().len(), 6);
        assert!(!store.redo());
    }

    #[test]
    fn test_unchanged_batch_records_nothing() {
        let mut store = StyleStore::new();
        store.create_element("a", 3);
        store.clear_history();
        let changed = store
            .replace_runs(vec![(id("a"), StyleRuns::plain(3))])
            .unwrap();
        assert!(!changed);
        assert!(!store.can_undo());
    }

    #[test]
    fn test_remove_element_is_undoable() {
        let mut store = StyleStore::new();
        store.create_element("a", 3);
        let removed = store.remove_element(&id("a")).unwrap();
        assert_eq!(removed.len(), 3);
        assert!(!store.contains(&id("a")));
        assert!(store.undo());
        assert!(store.contains(&id("a")));
        assert_eq!(
            store.remove_element(&id("zzz")).unwrap_err().kind(),
            ErrorKind::UnknownElement
        );
    }

    #[test]
    fn test_history_depth_is_bounded() {
        let mut store = StyleStore::with_max_steps(2);
        store.create_element("a", 1);
        for _ in 0..3 {
            store.insert_text(&id("a"), 0, 1, None).unwrap();
        }
        assert!(store.undo());
        assert!(store.undo());
        assert!(!store.undo());
        assert_eq!(store.runs(&id("a")).unwrap().len(), 2);
    }

    #[test]
    fn test_repeated_id_in_batch_unwinds_to_original() {
        let mut store = StyleStore::new();
        store.create_element("title", 4);
        store.clear_history();
        let plain = StyleRuns::plain(4);
        let bold = apply_attribute(
            &plain,
            Selection::all(4),
            AttrName::FontWeight,
            &AttrValue::Number(700.0),
        )
        .unwrap();
        let italic = apply_attribute(
            &bold,
            Selection::new(0, 2),
            AttrName::Italic,
            &AttrValue::Bool(true),
        )
        .unwrap();

        assert!(store
            .replace_runs(vec![(id("title"), bold), (id("title"), italic.clone())])
            .unwrap());
        assert_eq!(store.runs(&id("title")), Some(&italic));

        assert!(store.undo());
        assert_eq!(store.runs(&id("title")), Some(&plain));
        assert!(!store.can_undo());
    }
}
