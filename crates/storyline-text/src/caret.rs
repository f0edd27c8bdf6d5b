//! Pending style for a bare caret.
//!
//! Formatting a collapsed selection changes nothing in the runs; instead the
//! editing surface remembers the style for the next typed text. Moving the
//! caret forgets it.

use crate::attrs::{AttrEdit, AttrName, AttrValue, FontWeight, StyleAttributes};
use crate::error::Result;
use crate::runs::StyleRuns;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CaretStyle {
    offset: usize,
    pending: Option<StyleAttributes>,
}

impl CaretStyle {
    pub fn new(offset: usize) -> Self {
        Self {
            offset,
            pending: None,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The style the next typed char gets.
    pub fn resolve(&self, runs: &StyleRuns) -> StyleAttributes {
        self.pending
            .unwrap_or_else(|| runs.attributes_at(self.offset))
    }

    /// Move the caret, dropping any pending style.
    pub fn move_to(&mut self, offset: usize) {
        if offset != self.offset {
            self.pending = None;
        }
        self.offset = offset;
    }

    pub fn set(&mut self, runs: &StyleRuns, attr: AttrName, value: &AttrValue) -> Result<()> {
        let mut attrs = self.resolve(runs);
        AttrEdit::new(attr, value)?.apply(&mut attrs);
        self.pending = Some(attrs);
        Ok(())
    }

    /// Caret toggles have no mixed case: bold flips between 400 and 700.
    pub fn toggle_bold(&mut self, runs: &StyleRuns) {
        let mut attrs = self.resolve(runs);
        attrs.font_weight = if attrs.is_bold() {
            FontWeight::REGULAR
        } else {
            FontWeight::BOLD
        };
        self.pending = Some(attrs);
    }

    pub fn toggle_flag(&mut self, runs: &StyleRuns, attr: AttrName) -> Result<()> {
        if attr == AttrName::Bold {
            self.toggle_bold(runs);
            return Ok(());
        }
        let current = self.resolve(runs).get(attr);
        let flipped = AttrValue::Bool(current != AttrValue::Bool(true));
        self.set(runs, attr, &flipped)
    }

    /// Insert `count` typed chars at the caret with the resolved style.
    pub fn type_text(&mut self, runs: &StyleRuns, count: usize) -> Result<StyleRuns> {
        let out = runs.insert(self.offset, count, Some(self.resolve(runs)))?;
        self.offset += count;
        self.pending = None;
        Ok(out)
    }
}
