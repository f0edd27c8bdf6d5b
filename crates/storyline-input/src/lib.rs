//! storyline-input: form-field plumbing for style panels.
//!
//! This crate provides:
//! - `CommitInput` - focus/edit/commit state machine with debounced reporting
//! - `validate_input` - never-failing numeric coercion
//! - `DoubleClickDetector`, `FocusSelect` - small pointer and focus helpers
//! - `InputConfig` - timings and toggle policy, loadable from TOML or JSON

pub mod commit;
pub mod config;
pub mod double_click;
pub mod error;
pub mod field;
pub mod focus;
#[cfg(feature = "telemetry")]
pub mod telemetry;
pub mod timer;
pub mod validate;


pub use commit::{CommitInput, InputEffect, InputEvent, InputState};
pub use config::InputConfig;
pub use double_click::{ClickEvent, DoubleClickDetector};
pub use error::ConfigError;
pub use field::{FieldKind, HexField, NumericField};
pub use focus::FocusSelect;
pub use timer::TimerSlot;
pub use validate::{InputValue, StepDirection, ValidateOptions, validate_input};
pub use web_time::Instant;
