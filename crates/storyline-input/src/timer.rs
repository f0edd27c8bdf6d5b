//! Single-slot timers driven by the host's clock.
//!
//! A slot holds at most one pending value with a deadline. Scheduling again
//! replaces it, so the last value wins. Nothing fires on its own; the owner
//! calls [`TimerSlot::fire`] from its event loop with the current time.

use std::time::Duration;

use web_time::Instant;

#[derive(Debug, Clone)]
pub struct TimerSlot<T> {
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    deadline: Instant,
    delay: Duration,
    value: T,
}

impl<T> Default for TimerSlot<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> TimerSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the slot, dropping any previous pending value.
    pub fn schedule(&mut self, now: Instant, delay: Duration, value: T) {
        self.pending = Some(Pending {
            deadline: now + delay,
            delay,
            value,
        });
    }

    /// Push the deadline out by the original delay, counted from `now`.
    ///
    /// Returns false when nothing is pending.
    pub fn restart(&mut self, now: Instant) -> bool {
        match &mut self.pending {
            Some(p) => {
                p.deadline = now + p.delay;
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Take the value if its deadline has passed.
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.cancel(),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn peek(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.value)
    }
}
