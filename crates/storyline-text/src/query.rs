//! Reading the common value of an attribute over a selection.

use serde::{Deserialize, Serialize};

use crate::attrs::{AttrName, AttrValue, StyleAttributes};
use crate::error::Result;
use crate::runs::StyleRuns;
use crate::types::Selection;

/// Result of querying one attribute over a selection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttrQuery {
    /// Every queried char shares this value.
    Value(AttrValue),
    /// The selection covers more than one distinct value.
    Mixed,
}

impl AttrQuery {
    pub fn is_mixed(&self) -> bool {
        matches!(self, Self::Mixed)
    }

    pub fn value(&self) -> Option<&AttrValue> {
        match self {
            Self::Value(v) => Some(v),
            Self::Mixed => None,
        }
    }

    /// `Some` only for a uniform boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        self.value().and_then(AttrValue::as_bool)
    }

    /// Combine results from two selections, e.g. across text elements.
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) if a == b => Self::Value(a),
            _ => Self::Mixed,
        }
    }
}

/// `None` for no values, otherwise the single distinct value or `Mixed`.
fn uniform(mut values: impl Iterator<Item = AttrValue>) -> Option<AttrQuery> {
    let first = values.next()?;
    for value in values {
        if value != first {
            return Some(AttrQuery::Mixed);
        }
    }
    Some(AttrQuery::Value(first))
}

/// Attributes a selection reads from: the caret style, or every overlapping run.
pub(crate) fn selected_attributes(
    runs: &StyleRuns,
    selection: Selection,
) -> Result<Vec<StyleAttributes>> {
    let range = runs.check_selection(selection)?;
    if range.is_empty() {
        return Ok(vec![runs.attributes_at(range.start)]);
    }
    Ok(runs.overlapping(range).map(|run| run.attributes).collect())
}

/// The common value of `attr` over `selection`, or [`AttrQuery::Mixed`].
///
/// A collapsed selection reads the caret style (see
/// [`StyleRuns::caret_run_index`]); an empty text reads the defaults.
pub fn query_attribute(
    runs: &StyleRuns,
    selection: Selection,
    attr: AttrName,
) -> Result<AttrQuery> {
    let attrs = selected_attributes(runs, selection)?;
    let result = uniform(attrs.iter().map(|a| a.get(attr)))
        .unwrap_or_else(|| AttrQuery::Value(StyleAttributes::default().get(attr)));
    tracing::trace!(
        target: "storyline::runs",
        %attr,
        start = selection.start(),
        end = selection.end(),
        ?result,
        "queried attribute"
    );
    Ok(result)
}

/// Per-attribute results for an inspector panel.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeSummary {
    entries: [AttrQuery; AttrName::ALL.len()],
}

impl AttributeSummary {
    pub fn get(&self, attr: AttrName) -> AttrQuery {
        self.entries[attr.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttrName, AttrQuery)> + '_ {
        AttrName::ALL.into_iter().map(|name| (name, self.get(name)))
    }

    /// Attribute-wise merge, used for multi-element selections.
    pub fn merge(&self, other: &Self) -> Self {
        let mut entries = self.entries;
        for (entry, theirs) in entries.iter_mut().zip(other.entries) {
            *entry = entry.merge(theirs);
        }
        Self { entries }
    }
}

/// Query every attribute over `selection` in one pass over the runs.
pub fn query_attributes(runs: &StyleRuns, selection: Selection) -> Result<AttributeSummary> {
    let attrs = selected_attributes(runs, selection)?;
    let defaults = StyleAttributes::default();
    let entries = AttrName::ALL.map(|name| {
        uniform(attrs.iter().map(|a| a.get(name)))
            .unwrap_or_else(|| AttrQuery::Value(defaults.get(name)))
    });
    Ok(AttributeSummary { entries })
}
