//! Keystroke debouncing.

use std::time::{Duration, Instant};

/// Holds at most one pending query until its quiet period elapses.
///
/// Scheduling replaces (cancels) whatever was pending and restarts the
/// deadline.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `term`, cancelling any pending one.
    pub fn schedule(&mut self, term: impl Into<String>, now: Instant) {
        self.pending = Some((term.into(), now + self.delay));
    }

    /// Drop the pending term, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Deadline of the pending term.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Take the pending term if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|(_, deadline)| *deadline <= now);
        if due {
            self.pending.take().map(|(term, _)| term)
        } else {
            None
        }
    }
}
