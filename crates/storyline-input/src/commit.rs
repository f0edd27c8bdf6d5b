//! Debounced commit inputs.
//!
//! A [`CommitInput`] sits between a text box and whatever consumes its value.
//! It buffers keystrokes verbatim while focused and coerces them only on
//! Enter or blur. Escape reverts without reporting. Arrow keys step numeric
//! fields in place. Reported values can be held back by a debounce so a burst
//! of arrow presses reaches the consumer once.
//!
//! The input owns no clock. Events carry the current time, and the host calls
//! [`CommitInput::poll`] at [`CommitInput::next_deadline`] to let timers fire.

use std::time::Duration;

use storyline_text::{Color, Key, KeyCombo};
use web_time::Instant;

use crate::config::InputConfig;
use crate::field::{FieldKind, HexField, NumericField};
use crate::focus::FocusSelect;
use crate::timer::TimerSlot;
use crate::validate::{InputValue, StepDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    /// Showing the committed value.
    Viewing,
    /// Focused, buffering raw text.
    Editing,
    /// Committed, waiting for the debounce to report it.
    Validating,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Focus,
    /// The full new text of the box.
    Input(String),
    KeyDown(KeyCombo),
    Blur,
}

/// Things the host has to do in response to an event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEffect<V> {
    /// Select the whole contents of the box.
    SelectContents,
    /// Move focus out of the box.
    RequestBlur,
    /// Report a new value to the consumer.
    Changed(V),
}

pub struct CommitInput<F: FieldKind> {
    field: F,
    state: InputState,
    focus: FocusSelect,
    committed: F::Value,
    reported: F::Value,
    buffer: String,
    skip_validation: bool,
    commit_delay: Option<Duration>,
    select_delay: Duration,
    pending_commit: TimerSlot<F::Value>,
    pending_select: TimerSlot<()>,
    disposed: bool,
}

impl<F: FieldKind> CommitInput<F> {
    /// An input that reports immediately.
    pub fn new(field: F, initial: F::Value) -> Self {
        let defaults = InputConfig::default();
        Self {
            buffer: field.edit_text(&initial),
            field,
            state: InputState::Viewing,
            focus: FocusSelect::new(),
            committed: initial.clone(),
            reported: initial,
            skip_validation: false,
            commit_delay: None,
            select_delay: defaults.select_delay(),
            pending_commit: TimerSlot::new(),
            pending_select: TimerSlot::new(),
            disposed: false,
        }
    }

    /// Hold reports back until `delay` passes without another commit.
    pub fn with_commit_delay(mut self, delay: Option<Duration>) -> Self {
        self.commit_delay = delay;
        self
    }

    pub fn with_select_delay(mut self, delay: Duration) -> Self {
        self.select_delay = delay;
        self
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    pub fn committed(&self) -> &F::Value {
        &self.committed
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Text the box should show right now.
    pub fn display_value(&self) -> String {
        match self.state {
            InputState::Editing => self.buffer.clone(),
            InputState::Viewing | InputState::Validating => self.field.display(&self.committed),
        }
    }

    /// Earliest time [`poll`](Self::poll) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.pending_commit.deadline(), self.pending_select.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Replace the value from outside, e.g. after undo.
    ///
    /// Ignored while the user is editing; their commit wins.
    pub fn set_value(&mut self, value: F::Value) {
        if self.disposed || self.state == InputState::Editing {
            return;
        }
        self.pending_commit.cancel();
        self.buffer = self.field.edit_text(&value);
        self.committed = value.clone();
        self.reported = value;
        self.state = InputState::Viewing;
    }

    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Vec<InputEffect<F::Value>> {
        let mut effects = Vec::new();
        if self.disposed {
            tracing::trace!(target: "storyline::input", ?event, "event on unmounted input");
            return effects;
        }
        match event {
            InputEvent::Focus => self.on_focus(&mut effects),
            InputEvent::Input(text) => self.on_input(text, now),
            InputEvent::KeyDown(combo) => self.on_key(&combo, now, &mut effects),
            InputEvent::Blur => self.on_blur(now, &mut effects),
        }
        effects
    }

    /// Fire any due timers.
    pub fn poll(&mut self, now: Instant) -> Vec<InputEffect<F::Value>> {
        let mut effects = Vec::new();
        if self.disposed {
            return effects;
        }
        if let Some(value) = self.pending_commit.fire(now) {
            self.report(value, &mut effects);
            if self.state == InputState::Validating {
                self.state = InputState::Viewing;
            }
        }
        if self.pending_select.fire(now).is_some() && self.state == InputState::Editing {
            effects.push(InputEffect::SelectContents);
        }
        effects
    }

    /// Drop all pending timers. The input reports nothing afterwards.
    pub fn unmount(&mut self) {
        let dropped = self.pending_commit.cancel().is_some();
        self.pending_select.cancel();
        self.disposed = true;
        tracing::trace!(target: "storyline::input", dropped, "input unmounted");
    }

    fn on_focus(&mut self, effects: &mut Vec<InputEffect<F::Value>>) {
        if self.focus.focus() {
            effects.push(InputEffect::SelectContents);
        }
        if self.state != InputState::Editing {
            self.buffer = self.field.edit_text(&self.committed);
            self.state = InputState::Editing;
        }
        self.skip_validation = false;
    }

    fn on_input(&mut self, text: String, now: Instant) {
        if self.state != InputState::Editing {
            self.state = InputState::Editing;
            self.skip_validation = false;
        }
        self.buffer = text;
        if self.pending_commit.restart(now) {
            tracing::trace!(target: "storyline::input", "keystroke restarted pending commit");
        }
    }

    fn on_key(&mut self, combo: &KeyCombo, now: Instant, effects: &mut Vec<InputEffect<F::Value>>) {
        if self.state != InputState::Editing {
            return;
        }
        match combo.key {
            Key::Escape => {
                self.buffer = self.field.edit_text(&self.committed);
                self.skip_validation = true;
                self.pending_select.cancel();
                self.state = InputState::Viewing;
                effects.push(InputEffect::RequestBlur);
            }
            Key::Enter => {
                self.validate(now, effects);
                effects.push(InputEffect::RequestBlur);
            }
            Key::ArrowUp => self.step(StepDirection::Up, combo, now, effects),
            Key::ArrowDown => self.step(StepDirection::Down, combo, now, effects),
            _ => {}
        }
    }

    fn on_blur(&mut self, now: Instant, effects: &mut Vec<InputEffect<F::Value>>) {
        self.focus.blur();
        self.pending_select.cancel();
        if std::mem::take(&mut self.skip_validation) {
            self.state = InputState::Viewing;
            return;
        }
        if self.state == InputState::Editing {
            self.validate(now, effects);
        }
    }

    fn step(
        &mut self,
        direction: StepDirection,
        combo: &KeyCombo,
        now: Instant,
        effects: &mut Vec<InputEffect<F::Value>>,
    ) {
        let current = self.field.commit(&self.buffer, &self.committed);
        let Some(next) = self.field.step(&current, direction, combo.modifiers.alt) else {
            return;
        };
        self.buffer = self.field.edit_text(&next);
        self.submit(next, now, effects);
        self.pending_select.schedule(now, self.select_delay, ());
    }

    fn validate(&mut self, now: Instant, effects: &mut Vec<InputEffect<F::Value>>) {
        self.state = InputState::Validating;
        let value = self.field.commit(&self.buffer, &self.committed);
        self.buffer = self.field.edit_text(&value);
        self.submit(value, now, effects);
        if !self.pending_commit.is_pending() {
            self.state = InputState::Viewing;
        }
    }

    fn submit(&mut self, value: F::Value, now: Instant, effects: &mut Vec<InputEffect<F::Value>>) {
        self.committed = value.clone();
        match self.commit_delay {
            Some(delay) => self.pending_commit.schedule(now, delay, value),
            None => self.report(value, effects),
        }
    }

    fn report(&mut self, value: F::Value, effects: &mut Vec<InputEffect<F::Value>>) {
        if value == self.reported {
            return;
        }
        tracing::debug!(target: "storyline::input", ?value, "input changed");
        self.reported = value.clone();
        effects.push(InputEffect::Changed(value));
    }
}

impl CommitInput<NumericField> {
    /// Numeric input debounced by the configured commit delay.
    pub fn numeric(field: NumericField, initial: InputValue, config: &InputConfig) -> Self {
        Self::new(field, initial)
            .with_commit_delay(Some(config.commit_delay()))
            .with_select_delay(config.select_delay())
    }
}

impl CommitInput<HexField> {
    /// Hex color input debounced by the configured color delay.
    pub fn color(initial: Color, config: &InputConfig) -> Self {
        Self::new(HexField, initial)
            .with_commit_delay(Some(config.color_delay()))
            .with_select_delay(config.select_delay())
    }
}
