//! Style runs: the per-character formatting of one text element.
//!
//! A [`StyleRuns`] list always partitions `0..len` into sorted, contiguous,
//! non-empty runs, and never holds two neighbouring runs with equal
//! attributes. Every constructor and transform re-establishes both rules, so
//! two lists describing the same formatting compare equal.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::attrs::StyleAttributes;
use crate::error::{Result, StyleError};
use crate::types::Selection;

/// A contiguous range of chars sharing one set of attributes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleRun {
    pub start: usize,
    pub end: usize,
    pub attributes: StyleAttributes,
}

impl StyleRun {
    pub fn new(range: Range<usize>, attributes: StyleAttributes) -> Self {
        Self {
            start: range.start,
            end: range.end,
            attributes,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether the run shares at least one char with `range`.
    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        self.start < range.end && range.start < self.end
    }
}

/// The ordered run list of a text element with `len` chars.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRuns", into = "RawRuns")]
pub struct StyleRuns {
    len: usize,
    runs: Vec<StyleRun>,
}

impl StyleRuns {
    /// A single run covering the whole text; no runs when `len` is zero.
    pub fn new(len: usize, attributes: StyleAttributes) -> Self {
        let runs = if len == 0 {
            Vec::new()
        } else {
            vec![StyleRun::new(0..len, attributes)]
        };
        Self { len, runs }
    }

    /// Default attributes over the whole text.
    pub fn plain(len: usize) -> Self {
        Self::new(len, StyleAttributes::default())
    }

    /// Build from externally supplied runs.
    ///
    /// Runs must be sorted, non-empty and cover `0..len` without gaps or
    /// overlaps, and every attribute value must be one an edit could write.
    /// Neighbours with equal attributes are merged.
    pub fn from_runs(len: usize, runs: Vec<StyleRun>) -> Result<Self> {
        let mut cursor = 0;
        for run in &runs {
            run.attributes.validate()?;
            if run.is_empty() || run.start > run.end {
                return Err(StyleError::invalid_runs(
                    len,
                    format!("run {}..{} is empty", run.start, run.end),
                ));
            }
            if run.start != cursor {
                let reason = if run.start > cursor {
                    format!("gap at {cursor}..{}", run.start)
                } else {
                    format!("overlap at {}..{cursor}", run.start)
                };
                return Err(StyleError::invalid_runs(len, reason));
            }
            cursor = run.end;
        }
        if cursor != len {
            return Err(StyleError::invalid_runs(
                len,
                format!("runs cover 0..{cursor}"),
            ));
        }
        Ok(Self::from_parts(len, runs))
    }

    /// Wrap runs a transform produced, merging equal neighbours.
    pub(crate) fn from_parts(len: usize, runs: Vec<StyleRun>) -> Self {
        let runs = coalesce(runs);
        debug_assert!(
            partitions(len, &runs),
            "transform produced runs that do not partition 0..{len}: {runs:?}"
        );
        Self { len, runs }
    }

    /// Text length in chars.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn runs(&self) -> &[StyleRun] {
        &self.runs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StyleRun> {
        self.runs.iter()
    }

    /// Index of the run a caret at `offset` takes its style from.
    ///
    /// Inside a run that is the run itself. On a boundary it is the run to
    /// the left, so typing continues the preceding character's style; offset
    /// zero uses the first run.
    pub fn caret_run_index(&self, offset: usize) -> Option<usize> {
        if self.runs.is_empty() || offset > self.len {
            return None;
        }
        if offset == 0 {
            return Some(0);
        }
        Some(self.runs.partition_point(|run| run.end < offset))
    }

    /// Style a caret at `offset` would type with.
    pub fn attributes_at(&self, offset: usize) -> StyleAttributes {
        self.caret_run_index(offset)
            .map(|ix| self.runs[ix].attributes)
            .unwrap_or_default()
    }

    /// Runs sharing at least one char with `range`.
    pub fn overlapping(&self, range: Range<usize>) -> impl Iterator<Item = &StyleRun> + '_ {
        let first = self.runs.partition_point(|run| run.end <= range.start);
        self.runs[first..]
            .iter()
            .take_while(move |run| run.start < range.end)
    }

    /// Check a selection against the text bounds.
    pub fn check_selection(&self, selection: Selection) -> Result<Range<usize>> {
        if selection.end() > self.len {
            return Err(StyleError::InvalidRange {
                start: selection.start(),
                end: selection.end(),
                len: self.len,
            });
        }
        Ok(selection.to_range())
    }

    /// Insert `count` chars at `at`.
    ///
    /// The new chars take `attributes`, or the caret style at `at` when none
    /// is given. Runs after `at` shift right.
    pub fn insert(&self, at: usize, count: usize, attributes: Option<StyleAttributes>) -> Result<Self> {
        self.check_selection(Selection::collapsed(at))?;
        if count == 0 {
            return Ok(self.clone());
        }
        let inserted = attributes.unwrap_or_else(|| self.attributes_at(at));
        let mut out = Vec::with_capacity(self.runs.len() + 2);
        let mut placed = false;
        for run in &self.runs {
            if run.end <= at {
                out.push(*run);
                if run.end == at {
                    out.push(StyleRun::new(at..at + count, inserted));
                    placed = true;
                }
                continue;
            }
            if run.start >= at {
                if !placed {
                    out.push(StyleRun::new(at..at + count, inserted));
                    placed = true;
                }
                out.push(StyleRun::new(run.start + count..run.end + count, run.attributes));
                continue;
            }
            // `at` falls strictly inside this run.
            out.push(StyleRun::new(run.start..at, run.attributes));
            out.push(StyleRun::new(at..at + count, inserted));
            out.push(StyleRun::new(at + count..run.end + count, run.attributes));
            placed = true;
        }
        if !placed {
            out.push(StyleRun::new(at..at + count, inserted));
        }
        tracing::trace!(target: "storyline::runs", at, count, "inserted styled text");
        Ok(Self::from_parts(self.len + count, out))
    }

    /// Remove the chars in `range`, shrinking or dropping the runs it covers.
    pub fn remove(&self, range: Range<usize>) -> Result<Self> {
        let range = self.check_selection(Selection::from(range))?;
        let removed = range.len();
        if removed == 0 {
            return Ok(self.clone());
        }
        let mut out = Vec::with_capacity(self.runs.len());
        for run in &self.runs {
            if run.end <= range.start {
                out.push(*run);
            } else if run.start >= range.end {
                out.push(StyleRun::new(
                    run.start - removed..run.end - removed,
                    run.attributes,
                ));
            } else {
                let kept = run.len() - (run.end.min(range.end) - run.start.max(range.start));
                if kept > 0 {
                    let start = run.start.min(range.start);
                    out.push(StyleRun::new(start..start + kept, run.attributes));
                }
            }
        }
        tracing::trace!(target: "storyline::runs", ?range, "removed styled text");
        Ok(Self::from_parts(self.len - removed, out))
    }
}

impl Default for StyleRuns {
    fn default() -> Self {
        Self::plain(0)
    }
}

impl<'a> IntoIterator for &'a StyleRuns {
    type Item = &'a StyleRun;
    type IntoIter = std::slice::Iter<'a, StyleRun>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}

/// Compact rendering used in logs and snapshots: `0..5 [w400] | 5..9 [w700]`.
impl fmt::Display for StyleRuns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.runs.is_empty() {
            return f.write_str("(empty)");
        }
        for (i, run) in self.runs.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}..{} [", run.start, run.end)?;
            run.attributes.describe(f)?;
            f.write_str("]")?;
        }
        Ok(())
    }
}

/// Serialized form: length plus runs, validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawRuns {
    len: usize,
    runs: Vec<StyleRun>,
}

impl TryFrom<RawRuns> for StyleRuns {
    type Error = StyleError;

    fn try_from(raw: RawRuns) -> Result<Self> {
        Self::from_runs(raw.len, raw.runs)
    }
}

impl From<StyleRuns> for RawRuns {
    fn from(runs: StyleRuns) -> Self {
        Self {
            len: runs.len,
            runs: runs.runs,
        }
    }
}

/// Merge neighbours with equal attributes.
pub(crate) fn coalesce(runs: Vec<StyleRun>) -> Vec<StyleRun> {
    let mut out: Vec<StyleRun> = Vec::with_capacity(runs.len());
    for run in runs {
        if run.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some(prev) if prev.end == run.start && prev.attributes == run.attributes => {
                prev.end = run.end;
            }
            _ => out.push(run),
        }
    }
    out
}

fn partitions(len: usize, runs: &[StyleRun]) -> bool {
    let mut cursor = 0;
    for run in runs {
        if run.start != cursor || run.end <= run.start {
            return false;
        }
        cursor = run.end;
    }
    cursor == len
}
