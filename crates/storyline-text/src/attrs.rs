//! Inline style attributes carried by each run.
//!
//! `bold` is not stored: it is a view over `fontWeight`. Reading it reports
//! whether the weight is at least [`FontWeight::BOLD`], writing it stores
//! either [`FontWeight::BOLD`] or [`FontWeight::REGULAR`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::color::Color;
use crate::error::{Result, StyleError};

/// Name of a styleable inline attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttrName {
    Bold,
    Italic,
    Underline,
    FontWeight,
    LetterSpacing,
    Color,
    LineHeight,
}

impl AttrName {
    pub const ALL: [AttrName; 7] = [
        Self::Bold,
        Self::Italic,
        Self::Underline,
        Self::FontWeight,
        Self::LetterSpacing,
        Self::Color,
        Self::LineHeight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::FontWeight => "fontWeight",
            Self::LetterSpacing => "letterSpacing",
            Self::Color => "color",
            Self::LineHeight => "lineHeight",
        }
    }

    /// Whether the attribute reads and writes as a plain boolean flag.
    pub fn is_flag(self) -> bool {
        matches!(self, Self::Bold | Self::Italic | Self::Underline)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AttrName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an attribute name that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown attribute `{0}`")]
pub struct UnknownAttribute(pub SmolStr);

impl FromStr for AttrName {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownAttribute(s.into()))
    }
}

/// Numeric font weight, 1 through 1000.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct FontWeight(u16);

impl FontWeight {
    pub const THIN: Self = Self(100);
    pub const LIGHT: Self = Self(300);
    pub const REGULAR: Self = Self(400);
    pub const MEDIUM: Self = Self(500);
    pub const BOLD: Self = Self(700);
    pub const BLACK: Self = Self(900);

    pub const MIN: u16 = 1;
    pub const MAX: u16 = 1000;

    pub fn new(weight: u16) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&weight).then_some(Self(weight))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// The bold checkbox reads as checked from 700 upwards.
    pub fn is_bold(self) -> bool {
        self >= Self::BOLD
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::REGULAR
    }
}

impl TryFrom<u16> for FontWeight {
    type Error = String;

    fn try_from(value: u16) -> std::result::Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("font weight {value} is outside 1..=1000"))
    }
}

impl From<FontWeight> for u16 {
    fn from(value: FontWeight) -> Self {
        value.0
    }
}

/// A loosely typed attribute value as it arrives from a panel or shortcut.
///
/// Values are checked against the attribute they target by [`AttrEdit::new`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Number(f32),
    Color(Color),
}

impl AttrValue {
    pub fn weight(weight: FontWeight) -> Self {
        Self::Number(f32::from(weight.get()))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Color(_) => "color",
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Color(c) => write!(f, "{c}"),
        }
    }
}

/// The full set of inline attributes of one run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleAttributes {
    pub font_weight: FontWeight,
    pub italic: bool,
    pub underline: bool,
    pub letter_spacing: f32,
    pub line_height: f32,
    pub color: Color,
}

impl Default for StyleAttributes {
    fn default() -> Self {
        Self {
            font_weight: FontWeight::REGULAR,
            italic: false,
            underline: false,
            letter_spacing: 0.0,
            line_height: 1.5,
            color: Color::BLACK,
        }
    }
}

impl StyleAttributes {
    pub fn is_bold(&self) -> bool {
        self.font_weight.is_bold()
    }

    pub fn get(&self, attr: AttrName) -> AttrValue {
        match attr {
            AttrName::Bold => AttrValue::Bool(self.is_bold()),
            AttrName::Italic => AttrValue::Bool(self.italic),
            AttrName::Underline => AttrValue::Bool(self.underline),
            AttrName::FontWeight => AttrValue::weight(self.font_weight),
            AttrName::LetterSpacing => AttrValue::Number(self.letter_spacing),
            AttrName::Color => AttrValue::Color(self.color),
            AttrName::LineHeight => AttrValue::Number(self.line_height),
        }
    }

    /// Returns a copy with `attr` set, or an error if `value` does not fit.
    pub fn with(mut self, attr: AttrName, value: &AttrValue) -> Result<Self> {
        AttrEdit::new(attr, value)?.apply(&mut self);
        Ok(self)
    }

    /// Check every stored value against the rules a single edit must meet.
    pub fn validate(&self) -> Result<()> {
        for attr in AttrName::ALL {
            if attr != AttrName::Bold {
                AttrEdit::new(attr, &self.get(attr))?;
            }
        }
        Ok(())
    }

    pub(crate) fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let defaults = Self::default();
        let mut parts: Vec<String> = vec![format!("w{}", self.font_weight.get())];
        if self.italic {
            parts.push("italic".into());
        }
        if self.underline {
            parts.push("underline".into());
        }
        if self.letter_spacing != defaults.letter_spacing {
            parts.push(format!("ls={}", self.letter_spacing));
        }
        if self.line_height != defaults.line_height {
            parts.push(format!("lh={}", self.line_height));
        }
        if self.color != defaults.color {
            parts.push(self.color.to_string());
        }
        f.write_str(&parts.join(" "))
    }
}

/// A validated single-attribute write.
///
/// Building the edit is the only fallible step, so applying it across many
/// runs cannot fail halfway.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttrEdit {
    FontWeight(FontWeight),
    Italic(bool),
    Underline(bool),
    LetterSpacing(f32),
    LineHeight(f32),
    Color(Color),
}

impl AttrEdit {
    pub fn new(attr: AttrName, value: &AttrValue) -> Result<Self> {
        let mismatch = || {
            StyleError::invalid_value(attr, format!("unexpected {} value", value.type_name()))
        };
        match attr {
            AttrName::Bold => {
                let bold = value.as_bool().ok_or_else(mismatch)?;
                Ok(Self::FontWeight(if bold {
                    FontWeight::BOLD
                } else {
                    FontWeight::REGULAR
                }))
            }
            AttrName::Italic => value.as_bool().map(Self::Italic).ok_or_else(mismatch),
            AttrName::Underline => value.as_bool().map(Self::Underline).ok_or_else(mismatch),
            AttrName::FontWeight => {
                let n = value.as_number().ok_or_else(mismatch)?;
                if !n.is_finite() || n.fract() != 0.0 {
                    return Err(StyleError::invalid_value(
                        attr,
                        format!("{n} is not a whole weight"),
                    ));
                }
                let weight = u16::try_from(n as i64)
                    .ok()
                    .and_then(FontWeight::new)
                    .ok_or_else(|| {
                        StyleError::invalid_value(attr, format!("{n} is outside 1..=1000"))
                    })?;
                Ok(Self::FontWeight(weight))
            }
            AttrName::LetterSpacing => {
                let n = value.as_number().ok_or_else(mismatch)?;
                if !n.is_finite() {
                    return Err(StyleError::invalid_value(attr, "must be finite"));
                }
                Ok(Self::LetterSpacing(n))
            }
            AttrName::LineHeight => {
                let n = value.as_number().ok_or_else(mismatch)?;
                if !n.is_finite() || n <= 0.0 {
                    return Err(StyleError::invalid_value(attr, "must be a positive number"));
                }
                Ok(Self::LineHeight(n))
            }
            AttrName::Color => value.as_color().map(Self::Color).ok_or_else(mismatch),
        }
    }

    pub fn apply(self, attrs: &mut StyleAttributes) {
        match self {
            Self::FontWeight(w) => attrs.font_weight = w,
            Self::Italic(b) => attrs.italic = b,
            Self::Underline(b) => attrs.underline = b,
            Self::LetterSpacing(n) => attrs.letter_spacing = n,
            Self::LineHeight(n) => attrs.line_height = n,
            Self::Color(c) => attrs.color = c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_bold_is_derived_from_weight() {
        let attrs = StyleAttributes::default();
        assert_eq!(attrs.get(AttrName::Bold), AttrValue::Bool(false));

        let attrs = attrs
            .with(AttrName::Bold, &AttrValue::Bool(true))
            .unwrap();
        assert_eq!(attrs.font_weight, FontWeight::BOLD);
        assert_eq!(attrs.get(AttrName::FontWeight), AttrValue::Number(700.0));

        let black = attrs
            .with(AttrName::FontWeight, &AttrValue::Number(900.0))
            .unwrap();
        assert_eq!(black.get(AttrName::Bold), AttrValue::Bool(true));

        let semibold = attrs
            .with(AttrName::FontWeight, &AttrValue::Number(600.0))
            .unwrap();
        assert_eq!(semibold.get(AttrName::Bold), AttrValue::Bool(false));
    }

    #[test]
    fn test_rejects_mismatched_types() {
        let err = AttrEdit::new(AttrName::FontWeight, &AttrValue::Bool(true)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAttributeValue);

        let err = AttrEdit::new(AttrName::Color, &AttrValue::Number(1.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAttributeValue);

        let err = AttrEdit::new(AttrName::Italic, &AttrValue::Color(Color::WHITE)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAttributeValue);
    }

    #[test]
    fn test_rejects_out_of_range_numbers() {
        for bad in [0.0, 1001.0, 450.5, f32::NAN, -100.0] {
            assert!(
                AttrEdit::new(AttrName::FontWeight, &AttrValue::Number(bad)).is_err(),
                "{bad} should be rejected"
            );
        }
        assert!(AttrEdit::new(AttrName::LineHeight, &AttrValue::Number(0.0)).is_err());
        assert!(AttrEdit::new(AttrName::LetterSpacing, &AttrValue::Number(f32::INFINITY)).is_err());
        assert!(AttrEdit::new(AttrName::LetterSpacing, &AttrValue::Number(-2.0)).is_ok());
    }

    #[test]
    fn test_attr_name_round_trips_through_str() {
        for name in AttrName::ALL {
            assert_eq!(name.as_str().parse::<AttrName>().unwrap(), name);
        }
        assert!("fontSize".parse::<AttrName>().is_err());
    }

    #[test]
    fn test_font_weight_bounds() {
        assert_eq!(FontWeight::new(0), None);
        assert_eq!(FontWeight::new(1000), Some(FontWeight(1000)));
        assert!(FontWeight::BLACK.is_bold());
        assert!(!FontWeight::MEDIUM.is_bold());
    }
}
