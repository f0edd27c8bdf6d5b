//! Error types for style reconciliation.

use miette::Diagnostic;
use smol_str::SmolStr;
use thiserror::Error;

use crate::attrs::AttrName;
use crate::store::ElementId;

/// Coarse classification of a [`StyleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Selection offsets fall outside the text.
    InvalidRange,
    /// A value does not fit the attribute's declared type or range.
    InvalidAttributeValue,
    /// Runs handed to a constructor do not partition the text.
    InvalidRuns,
    /// The store has no element with the requested id.
    UnknownElement,
}

/// Errors raised by the reconciliation core.
///
/// Every operation that returns one of these has left its inputs untouched.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
#[non_exhaustive]
pub enum StyleError {
    /// Selection outside `0..=len`.
    #[error("selection {start}..{end} is outside text of length {len}")]
    #[diagnostic(code(storyline::invalid_range))]
    InvalidRange { start: usize, end: usize, len: usize },

    /// Value rejected for an attribute.
    #[error("invalid value for `{attr}`: {reason}")]
    #[diagnostic(
        code(storyline::invalid_attribute_value),
        help("coerce raw user input before it reaches the mutator")
    )]
    InvalidAttributeValue { attr: AttrName, reason: SmolStr },

    /// Runs that leave gaps, overlap, or exceed the text length.
    #[error("style runs do not partition 0..{len}: {reason}")]
    #[diagnostic(code(storyline::invalid_runs))]
    InvalidRuns { len: usize, reason: SmolStr },

    /// No such element in the store.
    #[error("no text element with id `{0}`")]
    #[diagnostic(code(storyline::unknown_element))]
    UnknownElement(ElementId),
}

impl StyleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRange { .. } => ErrorKind::InvalidRange,
            Self::InvalidAttributeValue { .. } => ErrorKind::InvalidAttributeValue,
            Self::InvalidRuns { .. } => ErrorKind::InvalidRuns,
            Self::UnknownElement(_) => ErrorKind::UnknownElement,
        }
    }

    pub(crate) fn invalid_value(attr: AttrName, reason: impl Into<SmolStr>) -> Self {
        Self::InvalidAttributeValue {
            attr,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_runs(len: usize, reason: impl Into<SmolStr>) -> Self {
        Self::InvalidRuns {
            len,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StyleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let err = StyleError::InvalidRange {
            start: 3,
            end: 12,
            len: 10,
        };
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
        assert_eq!(
            err.to_string(),
            "selection 3..12 is outside text of length 10"
        );

        let err = StyleError::invalid_value(AttrName::FontWeight, "expected a number");
        assert_eq!(err.kind(), ErrorKind::InvalidAttributeValue);
        assert_eq!(
            err.to_string(),
            "invalid value for `fontWeight`: expected a number"
        );
    }

    #[test]
    fn test_diagnostic_code() {
        let err = StyleError::UnknownElement(ElementId::new("title"));
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("storyline::unknown_element"));
    }
}
