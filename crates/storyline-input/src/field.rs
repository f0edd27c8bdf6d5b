//! Field kinds a [`CommitInput`](crate::CommitInput) can edit.

use std::fmt;

use smol_str::SmolStr;
use storyline_text::Color;

use crate::validate::{InputValue, StepDirection, ValidateOptions, validate_input};

/// How a field renders, coerces and steps its value.
pub trait FieldKind {
    type Value: Clone + PartialEq + fmt::Debug;

    /// Text shown while the field is not being edited.
    fn display(&self, value: &Self::Value) -> String;

    /// Text placed in the editor on focus.
    fn edit_text(&self, value: &Self::Value) -> String;

    /// Coerce raw text. Must not fail; fall back to `committed` or a default.
    fn commit(&self, raw: &str, committed: &Self::Value) -> Self::Value;

    /// Arrow-key step, or `None` where stepping does not apply.
    fn step(
        &self,
        _current: &Self::Value,
        _direction: StepDirection,
        _fine: bool,
    ) -> Option<Self::Value> {
        None
    }
}

/// Number field with an optional unit suffix such as `%` or `px`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumericField {
    pub options: ValidateOptions,
    pub suffix: SmolStr,
}

impl NumericField {
    pub fn new(options: ValidateOptions) -> Self {
        Self {
            options,
            suffix: SmolStr::default(),
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<SmolStr>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

impl FieldKind for NumericField {
    type Value = InputValue;

    fn display(&self, value: &InputValue) -> String {
        match value {
            InputValue::Empty => String::new(),
            InputValue::Number(_) => format!("{value}{}", self.suffix),
        }
    }

    fn edit_text(&self, value: &InputValue) -> String {
        value.to_string()
    }

    fn commit(&self, raw: &str, _committed: &InputValue) -> InputValue {
        validate_input(raw, &self.options)
    }

    fn step(&self, current: &InputValue, direction: StepDirection, fine: bool) -> Option<InputValue> {
        let base = current.as_number().unwrap_or(self.options.default_value);
        Some(InputValue::Number(self.options.step(base, direction, fine)))
    }
}

/// Hex color field. Invalid text reverts to the committed color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HexField;

impl FieldKind for HexField {
    type Value = Color;

    fn display(&self, value: &Color) -> String {
        format!("#{}", value.to_hex())
    }

    fn edit_text(&self, value: &Color) -> String {
        value.to_hex()
    }

    /// Hex text carries no alpha, so the committed opacity is kept.
    fn commit(&self, raw: &str, committed: &Color) -> Color {
        match Color::from_hex(raw) {
            Some(parsed) => Color {
                a: committed.a,
                ..parsed
            },
            None => {
                tracing::trace!(target: "storyline::input", raw, "invalid hex, reverting");
                *committed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_display_has_suffix_only_when_viewing() {
        let field = NumericField::default().with_suffix("%");
        let value = InputValue::Number(50.0);
        assert_eq!(field.display(&value), "50%");
        assert_eq!(field.edit_text(&value), "50");
        assert_eq!(field.display(&InputValue::Empty), "");
        assert_eq!(field.commit("75%", &value), InputValue::Number(75.0));
    }

    #[test]
    fn test_hex_commit() {
        let committed = Color::rgb(1, 2, 3);
        assert_eq!(HexField.commit("#A1F", &committed), Color::rgb(0xAA, 0x11, 0xFF));
        assert_eq!(HexField.commit("zz0000", &committed), committed);
        assert_eq!(HexField.display(&committed), "#010203");
        assert_eq!(HexField.step(&committed, StepDirection::Up, false), None);
    }

    #[test]
    fn test_hex_commit_keeps_opacity() {
        let committed = Color::rgba(10, 20, 30, 128);
        let next = HexField.commit("ff8000", &committed);
        assert_eq!(next, Color::rgba(0xFF, 0x80, 0x00, 128));
        assert!(!next.is_opaque());
    }
}
