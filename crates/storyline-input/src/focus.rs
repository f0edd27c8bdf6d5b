//! Focus tracking that selects field contents on entry.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusSelect {
    focused: bool,
    select_on_focus: bool,
}

impl Default for FocusSelect {
    fn default() -> Self {
        Self {
            focused: false,
            select_on_focus: true,
        }
    }
}

impl FocusSelect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track focus without selecting contents.
    pub fn without_select() -> Self {
        Self {
            focused: false,
            select_on_focus: false,
        }
    }

    /// Record focus. Returns true when the contents should be selected.
    ///
    /// Repeated focus events while already focused select nothing.
    pub fn focus(&mut self) -> bool {
        let entered = !self.focused;
        self.focused = true;
        entered && self.select_on_focus
    }

    /// Record blur. Returns whether the field was focused.
    pub fn blur(&mut self) -> bool {
        std::mem::replace(&mut self.focused, false)
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }
}
