//! storyline-text: selection-scoped inline style reconciliation.
//!
//! This crate provides:
//! - `StyleRuns` - per-element partition of text into uniformly styled runs
//! - `query_attribute` / `query_attributes` - read a selection as a value or MIXED
//! - `apply_attribute` - write one attribute over a selection
//! - `ToggleResolver` - bold/italic/underline toggle policy
//! - `StyleStore` - multi-element document with undo, behind `StyleDocument`
//! - `execute_format_action` - dispatch for shortcuts and panel commands

pub mod actions;
pub mod attrs;
pub mod caret;
pub mod color;
pub mod document;
pub mod error;
pub mod execute;
pub mod mutate;
pub mod query;
pub mod runs;
pub mod store;
pub mod toggle;
pub mod types;
pub mod undo;


pub use actions::{FormatAction, Key, KeyCombo, KeydownResult, Keybindings, Modifiers};
pub use attrs::{AttrEdit, AttrName, AttrValue, FontWeight, StyleAttributes, UnknownAttribute};
pub use caret::CaretStyle;
pub use color::{Color, get_hex_from_value};
pub use document::{ElementTargets, FormatTarget, StyleDocument};
pub use error::{ErrorKind, Result, StyleError};
pub use execute::{execute_format_action, handle_keydown};
pub use mutate::{apply_attribute, apply_with};
pub use query::{AttrQuery, AttributeSummary, query_attribute, query_attributes};
pub use runs::{StyleRun, StyleRuns};
pub use smol_str::SmolStr;
pub use store::{ElementId, StyleStore};
pub use toggle::{BoldTarget, TogglePolicy, ToggleResolver, is_bold, is_bold_elements};
pub use types::{Selection, SelectionScope};
pub use undo::{History, UndoManager};
