//! Coercion of raw numeric field text.
//!
//! Validation never fails. Text that does not start with a number falls back
//! to the configured default, so a stray keystroke can't wedge a panel.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rules for turning raw text into a committed number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ValidateOptions {
    /// Keep a fractional part; otherwise the integer part is kept.
    pub float: bool,
    pub can_be_negative: bool,
    /// Empty text commits [`InputValue::Empty`] instead of the default.
    pub can_be_empty: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub default_value: f64,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            float: false,
            can_be_negative: false,
            can_be_empty: false,
            min: None,
            max: None,
            default_value: 0.0,
        }
    }
}

impl ValidateOptions {
    pub fn clamp(&self, n: f64) -> f64 {
        let n = self.min.map_or(n, |min| n.max(min));
        self.max.map_or(n, |max| n.min(max))
    }

    /// One arrow-key step from `value`.
    ///
    /// The step is 1, or 0.1 for `fine` steps on float fields. The result is
    /// clamped and kept non-negative unless negatives are allowed.
    pub fn step(&self, value: f64, direction: StepDirection, fine: bool) -> f64 {
        let amount = if fine && self.float { 0.1 } else { 1.0 };
        let next = match direction {
            StepDirection::Up => value + amount,
            StepDirection::Down => value - amount,
        };
        let next = if self.float {
            tidy(next)
        } else {
            next.trunc()
        };
        let next = if self.can_be_negative { next } else { next.max(0.0) };
        self.clamp(next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

/// A committed numeric field value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Empty,
    Number(f64),
}

impl InputValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<f64> for InputValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Plain number with no trailing `.0`; empty renders as nothing.
impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(n) => write!(f, "{}", tidy(*n)),
        }
    }
}

/// Drop float noise from repeated 0.1 steps, and negative zero.
fn tidy(n: f64) -> f64 {
    let rounded = (n * 1e6).round() / 1e6;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Coerce raw field text into a committed value.
///
/// Leading numeric text is read and the rest ignored, so `"12px"` reads as
/// 12. Integers drop any fractional part. The sign is dropped unless
/// negatives are allowed, then the result is clamped.
pub fn validate_input(raw: &str, options: &ValidateOptions) -> InputValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return if options.can_be_empty {
            InputValue::Empty
        } else {
            InputValue::Number(options.default_value)
        };
    }

    let Some(mut n) = parse_numeric_prefix(trimmed, options.float) else {
        tracing::trace!(target: "storyline::input", raw, "non-numeric input, using default");
        return InputValue::Number(options.default_value);
    };
    if !options.can_be_negative {
        n = n.abs();
    }
    InputValue::Number(options.clamp(n))
}

fn parse_numeric_prefix(s: &str, float: bool) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if float && bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > frac_start {
            has_digits = true;
            end = frac_end;
        }
    }

    if !has_digits {
        return None;
    }
    s[..end].parse().ok()
}
