//! Formatting actions and keyboard shortcut types.
//!
//! Platform-agnostic definitions. The `FormatAction` enum represents semantic
//! formatting operations, while `Key`/`KeyCombo` describe the keyboard side.
//! Platform code converts native key events into these types and looks them
//! up in a [`Keybindings`] table.

use std::collections::HashMap;
use std::fmt;

use smol_str::SmolStr;

use crate::attrs::{AttrName, AttrValue};

/// All formatting actions the shortcut layer and panels can request.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatAction {
    /// Toggle bold through the weight policy.
    ToggleBold,

    /// Toggle italic on selection.
    ToggleItalic,

    /// Toggle underline on selection.
    ToggleUnderline,

    /// Explicit value from a panel control, e.g. the weight dropdown.
    SetAttribute { attr: AttrName, value: AttrValue },

    // === History ===
    /// Undo the last change.
    Undo,

    /// Redo the last undone change.
    Redo,
}

impl FormatAction {
    /// Whether the action edits runs, as opposed to walking history.
    pub fn is_formatting(&self) -> bool {
        !matches!(self, Self::Undo | Self::Redo)
    }
}

/// Key values for keyboard input.
///
/// Platform-agnostic key representation. Platform-specific code converts
/// from native key events to this enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key.
    Character(SmolStr),

    /// Unknown/unidentified key.
    Unidentified,

    // === Whitespace / editing ===
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    Space,

    // === Navigation ===
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,

    // === Modifiers ===
    Alt,
    Control,
    Meta,
    Shift,
}

impl Key {
    /// Create a character key.
    pub fn character(s: impl Into<SmolStr>) -> Self {
        Self::Character(s.into())
    }

    /// Check if this is a navigation key.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::ArrowLeft
                | Self::ArrowRight
                | Self::ArrowUp
                | Self::ArrowDown
                | Self::Home
                | Self::End
                | Self::PageUp
                | Self::PageDown
        )
    }

    /// Check if this is a modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Self::Alt | Self::Control | Self::Meta | Self::Shift)
    }

    /// Parse a key name as used in shortcut strings (`"b"`, `"enter"`, `"up"`).
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "backspace" => Self::Backspace,
            "delete" | "del" => Self::Delete,
            "enter" | "return" => Self::Enter,
            "tab" => Self::Tab,
            "escape" | "esc" => Self::Escape,
            "space" => Self::Space,
            "left" | "arrowleft" => Self::ArrowLeft,
            "right" | "arrowright" => Self::ArrowRight,
            "up" | "arrowup" => Self::ArrowUp,
            "down" | "arrowdown" => Self::ArrowDown,
            "home" => Self::Home,
            "end" => Self::End,
            "pageup" => Self::PageUp,
            "pagedown" => Self::PageDown,
            "" => Self::Unidentified,
            other => Self::Character(other.into()),
        }
    }
}

/// Modifier key state for a key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const ALT: Self = Self {
        ctrl: false,
        alt: true,
        shift: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        ctrl: false,
        alt: false,
        shift: true,
        meta: false,
    };

    pub const META: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: true,
    };

    /// Get the primary modifier for the platform (Cmd on Mac, Ctrl elsewhere).
    pub fn primary(is_mac: bool) -> Self {
        if is_mac { Self::META } else { Self::CTRL }
    }

    /// Get the primary modifier + Shift for the platform.
    pub fn primary_shift(is_mac: bool) -> Self {
        Self {
            shift: true,
            ..Self::primary(is_mac)
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// A key combination for triggering an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn primary(key: Key, is_mac: bool) -> Self {
        Self {
            key,
            modifiers: Modifiers::primary(is_mac),
        }
    }

    pub fn primary_shift(key: Key, is_mac: bool) -> Self {
        Self {
            key,
            modifiers: Modifiers::primary_shift(is_mac),
        }
    }

    /// Parse a shortcut like `"mod+shift+z"`.
    ///
    /// `mod` is Cmd on Mac and Ctrl elsewhere; `cmd`, `ctrl`, `alt` and
    /// `shift` are taken literally. Character keys are lowercased.
    pub fn parse(shortcut: &str, is_mac: bool) -> Option<Self> {
        let mut modifiers = Modifiers::NONE;
        let mut key = None;
        for part in shortcut.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "mod" => {
                    let primary = Modifiers::primary(is_mac);
                    modifiers.ctrl |= primary.ctrl;
                    modifiers.meta |= primary.meta;
                }
                "cmd" | "meta" => modifiers.meta = true,
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                _ if key.is_some() => return None,
                _ => key = Some(Key::from_name(part)),
            }
        }
        key.filter(|k| *k != Key::Unidentified)
            .map(|key| Self { key, modifiers })
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.modifiers;
        for (on, name) in [
            (m.ctrl, "ctrl"),
            (m.meta, "cmd"),
            (m.alt, "alt"),
            (m.shift, "shift"),
        ] {
            if on {
                write!(f, "{name}+")?;
            }
        }
        match &self.key {
            Key::Character(c) => f.write_str(c),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Result of handling a keydown event.
#[derive(Debug, Clone, PartialEq)]
pub enum KeydownResult {
    /// Event was handled, prevent default.
    Handled,
    /// Event was not a keybinding, let platform handle it.
    NotHandled,
    /// Event should be passed through (navigation, etc.).
    PassThrough,
}

/// Shortcut table from key combinations to formatting actions.
#[derive(Debug, Clone, Default)]
pub struct Keybindings {
    bindings: HashMap<KeyCombo, FormatAction>,
}

impl Keybindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// `mod+b`, `mod+i`, `mod+u`, `mod+z` and `mod+shift+z`.
    pub fn default_for(is_mac: bool) -> Self {
        let mut bindings = Self::new();
        for (shortcut, action) in [
            ("mod+b", FormatAction::ToggleBold),
            ("mod+i", FormatAction::ToggleItalic),
            ("mod+u", FormatAction::ToggleUnderline),
            ("mod+z", FormatAction::Undo),
            ("mod+shift+z", FormatAction::Redo),
        ] {
            if let Some(combo) = KeyCombo::parse(shortcut, is_mac) {
                bindings.bind(combo, action);
            }
        }
        bindings
    }

    pub fn bind(&mut self, combo: KeyCombo, action: FormatAction) -> Option<FormatAction> {
        self.bindings.insert(combo, action)
    }

    pub fn unbind(&mut self, combo: &KeyCombo) -> Option<FormatAction> {
        self.bindings.remove(combo)
    }

    /// Look up a combo; character keys match case-insensitively.
    pub fn lookup(&self, combo: &KeyCombo) -> Option<&FormatAction> {
        if let Key::Character(c) = &combo.key {
            let lowered = KeyCombo::with_modifiers(Key::character(c.to_lowercase()), combo.modifiers);
            return self.bindings.get(&lowered);
        }
        self.bindings.get(combo)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
