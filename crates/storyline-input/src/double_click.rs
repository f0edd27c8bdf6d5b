//! Double-click detection over host click events.
//!
//! A first click is held for the detection window. A second click on the
//! same target inside the window becomes a double click and the held single
//! click is dropped; otherwise the single click is released by
//! [`DoubleClickDetector::poll`] once the window closes, or flushed early by
//! a click on another target.

use std::time::Duration;

use web_time::Instant;

use crate::config::InputConfig;
use crate::timer::TimerSlot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickEvent<T> {
    Single(T),
    Double(T),
}

#[derive(Debug, Clone)]
pub struct DoubleClickDetector<T> {
    window: Duration,
    pending: TimerSlot<T>,
}

impl<T: PartialEq> DoubleClickDetector<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: TimerSlot::new(),
        }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self::new(config.double_click_window())
    }

    /// Register a click, returning any event it resolves.
    pub fn click(&mut self, target: T, now: Instant) -> Option<ClickEvent<T>> {
        let in_window = self.pending.deadline().is_some_and(|d| now < d);
        match self.pending.cancel() {
            Some(held) if in_window && held == target => Some(ClickEvent::Double(target)),
            held => {
                self.pending.schedule(now, self.window, target);
                held.map(ClickEvent::Single)
            }
        }
    }

    /// Release a held single click whose window has closed.
    pub fn poll(&mut self, now: Instant) -> Option<ClickEvent<T>> {
        self.pending.fire(now).map(ClickEvent::Single)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.deadline()
    }

    /// Drop any held click without reporting it.
    pub fn cancel(&mut self) {
        self.pending.cancel();
    }
}
