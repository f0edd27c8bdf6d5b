//! Core style document trait.
//!
//! Defines the `StyleDocument` trait for whatever owns the run lists of a
//! story's text elements, so formatting commands can run against the bundled
//! [`StyleStore`](crate::StyleStore) or a host's own state container.

use crate::attrs::AttrName;
use crate::error::{Result, StyleError};
use crate::query::{AttrQuery, AttributeSummary, query_attribute, query_attributes};
use crate::runs::StyleRuns;
use crate::store::ElementId;
use crate::types::Selection;

/// A selection inside one text element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FormatTarget {
    pub element: ElementId,
    pub selection: Selection,
}

impl FormatTarget {
    pub fn new(element: impl Into<ElementId>, selection: Selection) -> Self {
        Self {
            element: element.into(),
            selection,
        }
    }
}

/// Every selection a command holds on one element.
#[derive(Clone, Debug)]
pub struct ElementTargets<'a> {
    pub element: ElementId,
    pub runs: &'a StyleRuns,
    pub selections: Vec<Selection>,
}

/// Owner of per-element run lists.
pub trait StyleDocument {
    // === Required ===

    /// Current runs of an element.
    fn runs(&self, id: &ElementId) -> Option<&StyleRuns>;

    /// Swap in new run lists for several elements at once.
    ///
    /// Either every update lands or, on error, none does. Returns whether
    /// anything actually changed.
    fn replace_runs(&mut self, updates: Vec<(ElementId, StyleRuns)>) -> Result<bool>;

    // === Provided ===

    /// Runs of an element, or [`StyleError::UnknownElement`].
    fn require_runs(&self, id: &ElementId) -> Result<&StyleRuns> {
        self.runs(id)
            .ok_or_else(|| StyleError::UnknownElement(id.clone()))
    }

    /// Resolve targets into `(runs, selection)` pairs.
    fn resolve_targets<'a>(
        &'a self,
        targets: &[FormatTarget],
    ) -> Result<Vec<(&'a StyleRuns, Selection)>> {
        targets
            .iter()
            .map(|t| Ok((self.require_runs(&t.element)?, t.selection)))
            .collect()
    }

    /// Resolve targets grouped by element, in first-seen order.
    ///
    /// Several targets naming the same element collapse into one entry that
    /// holds each of their selections.
    fn resolve_grouped<'a>(
        &'a self,
        targets: &[FormatTarget],
    ) -> Result<Vec<ElementTargets<'a>>> {
        let mut grouped: Vec<ElementTargets<'a>> = Vec::new();
        for target in targets {
            match grouped.iter_mut().find(|g| g.element == target.element) {
                Some(group) => group.selections.push(target.selection),
                None => grouped.push(ElementTargets {
                    element: target.element.clone(),
                    runs: self.require_runs(&target.element)?,
                    selections: vec![target.selection],
                }),
            }
        }
        Ok(grouped)
    }

    /// Common value of `attr` across all targets.
    fn query(&self, targets: &[FormatTarget], attr: AttrName) -> Result<AttrQuery> {
        let mut merged: Option<AttrQuery> = None;
        for (runs, selection) in self.resolve_targets(targets)? {
            let q = query_attribute(runs, selection, attr)?;
            merged = Some(match merged {
                Some(prev) => prev.merge(q),
                None => q,
            });
        }
        Ok(merged.unwrap_or(AttrQuery::Mixed))
    }

    /// Inspector summary across all targets; `None` without targets.
    fn summary(&self, targets: &[FormatTarget]) -> Result<Option<AttributeSummary>> {
        let mut merged: Option<AttributeSummary> = None;
        for (runs, selection) in self.resolve_targets(targets)? {
            let s = query_attributes(runs, selection)?;
            merged = Some(match merged {
                Some(prev) => prev.merge(&s),
                None => s,
            });
        }
        Ok(merged)
    }
}
