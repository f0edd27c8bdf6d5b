//! Selection types shared by queries, mutations and the toggle policy.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A char-offset selection inside one text element.
///
/// `anchor` stays where the drag began and `head` follows the pointer, so
/// either may be the lower bound. A caret has both at the same offset.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// A caret at `offset`.
    pub fn collapsed(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Every char of a text with `len` chars.
    pub fn all(len: usize) -> Self {
        Self::new(0, len)
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Ordered chars covered, empty for a caret.
    pub fn to_range(&self) -> Range<usize> {
        self.start()..self.end()
    }
}

impl From<Range<usize>> for Selection {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// How many text elements a formatting command spans.
///
/// The bold toggle resolves differently for an inline selection inside one
/// element and for a selection of several whole elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionScope {
    Inline,
    MultiElement,
}

impl SelectionScope {
    pub fn for_element_count(count: usize) -> Self {
        if count > 1 {
            Self::MultiElement
        } else {
            Self::Inline
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_direction_does_not_change_range() {
        let leftwards = Selection::new(9, 4);
        assert_eq!(leftwards.to_range(), 4..9);
        assert_eq!(leftwards.to_range(), Selection::from(4..9).to_range());
        assert!(!leftwards.is_collapsed());
    }

    #[test]
    fn test_caret_covers_nothing() {
        let caret = Selection::collapsed(3);
        assert!(caret.is_collapsed());
        assert_eq!((caret.start(), caret.end()), (3, 3));
        assert!(caret.to_range().is_empty());
        assert_eq!(Selection::all(0), Selection::collapsed(0));
    }

    #[test]
    fn test_scope_from_element_count() {
        assert_eq!(SelectionScope::for_element_count(0), SelectionScope::Inline);
        assert_eq!(SelectionScope::for_element_count(1), SelectionScope::Inline);
        assert_eq!(
            SelectionScope::for_element_count(3),
            SelectionScope::MultiElement
        );
    }
}
