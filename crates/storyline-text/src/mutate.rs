//! Applying attribute changes over a selection.

use crate::attrs::{AttrEdit, AttrName, AttrValue, StyleAttributes};
use crate::error::Result;
use crate::runs::{StyleRun, StyleRuns};
use crate::types::Selection;

/// Set `attr` to `value` over `selection`, returning the new run list.
///
/// The value is validated before anything else, and the selection checked
/// against the text, so an error never leaves a partial result. A collapsed
/// selection returns the runs unchanged: styling a bare caret belongs to the
/// editing surface's [`CaretStyle`](crate::CaretStyle).
pub fn apply_attribute(
    runs: &StyleRuns,
    selection: Selection,
    attr: AttrName,
    value: &AttrValue,
) -> Result<StyleRuns> {
    let edit = AttrEdit::new(attr, value)?;
    apply_with(runs, selection, |attrs| edit.apply(attrs))
}

/// Run `edit` on the attributes of every char inside `selection`.
///
/// Runs straddling a selection edge are split there first, so the edit only
/// reaches selected chars. Runs outside the selection are copied unchanged,
/// then equal neighbours are merged.
pub fn apply_with<F>(runs: &StyleRuns, selection: Selection, mut edit: F) -> Result<StyleRuns>
where
    F: FnMut(&mut StyleAttributes),
{
    let range = runs.check_selection(selection)?;
    if range.is_empty() {
        return Ok(runs.clone());
    }

    let mut out = Vec::with_capacity(runs.runs().len() + 2);
    for run in runs {
        if !run.overlaps(&range) {
            out.push(*run);
            continue;
        }
        if run.start < range.start {
            out.push(StyleRun::new(run.start..range.start, run.attributes));
        }
        let mut attributes = run.attributes;
        edit(&mut attributes);
        out.push(StyleRun::new(
            run.start.max(range.start)..run.end.min(range.end),
            attributes,
        ));
        if run.end > range.end {
            out.push(StyleRun::new(range.end..run.end, run.attributes));
        }
    }

    let split = out.len();
    let result = StyleRuns::from_parts(runs.len(), out);
    tracing::debug!(
        target: "storyline::runs",
        ?range,
        before = runs.runs().len(),
        split,
        after = result.runs().len(),
        "applied style over selection"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::FontWeight;
    use crate::color::Color;
    use crate::error::ErrorKind;
    use crate::query::{AttrQuery, query_attribute};

    fn sample() -> StyleRuns {
        let italic = StyleAttributes {
            italic: true,
            ..Default::default()
        };
        StyleRuns::from_runs(
            10,
            vec![
                StyleRun::new(0..4, StyleAttributes::default()),
                StyleRun::new(4..10, italic),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_splits_at_both_edges() {
        let runs = StyleRuns::plain(10);
        let out = apply_attribute(
            &runs,
            Selection::new(3, 6),
            AttrName::Underline,
            &AttrValue::Bool(true),
        )
        .unwrap();
        assert_eq!(
            out.to_string(),
            "0..3 [w400] | 3..6 [w400 underline] | 6..10 [w400]"
        );
        // Input untouched.
        assert_eq!(runs, StyleRuns::plain(10));
    }

    #[test]
    fn test_merges_when_value_already_matches_neighbour() {
        let runs = sample();
        let out = apply_attribute(
            &runs,
            Selection::new(2, 4),
            AttrName::Italic,
            &AttrValue::Bool(true),
        )
        .unwrap();
        assert_eq!(out.to_string(), "0..2 [w400] | 2..10 [w400 italic]");
    }

    #[test]
    fn test_backwards_selection_is_normalized() {
        let runs = StyleRuns::plain(5);
        let forward = apply_attribute(
            &runs,
            Selection::new(1, 4),
            AttrName::Color,
            &AttrValue::Color(Color::rgb(255, 0, 0)),
        )
        .unwrap();
        let backward = apply_attribute(
            &runs,
            Selection::new(4, 1),
            AttrName::Color,
            &AttrValue::Color(Color::rgb(255, 0, 0)),
        )
        .unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_collapsed_selection_is_noop() {
        let runs = sample();
        let out = apply_attribute(
            &runs,
            Selection::collapsed(4),
            AttrName::FontWeight,
            &AttrValue::weight(FontWeight::BLACK),
        )
        .unwrap();
        assert_eq!(out, runs);
    }

    #[test]
    fn test_invalid_value_is_rejected_before_range() {
        let runs = sample();
        let err = apply_attribute(
            &runs,
            Selection::new(0, 50),
            AttrName::FontWeight,
            &AttrValue::Bool(true),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAttributeValue);

        let err = apply_attribute(
            &runs,
            Selection::new(0, 50),
            AttrName::FontWeight,
            &AttrValue::Number(700.0),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
    }

    #[test]
    fn test_query_reads_back_applied_value() {
        let runs = sample();
        let sel = Selection::new(1, 8);
        let value = AttrValue::Number(2.5);
        let out = apply_attribute(&runs, sel, AttrName::LetterSpacing, &value).unwrap();
        assert_eq!(
            query_attribute(&out, sel, AttrName::LetterSpacing).unwrap(),
            AttrQuery::Value(value)
        );
        // Neighbouring attribute untouched and still mixed.
        assert!(query_attribute(&out, sel, AttrName::Italic).unwrap().is_mixed());
    }
}
