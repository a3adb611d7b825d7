//! Leading-then-trailing throttle.
//!
//! The first call in a quiet period runs immediately. Calls arriving inside
//! the window replace a single pending value, which the host releases with
//! [`Throttle::poll`] once the window has elapsed. Time is passed in, so
//! the throttle is deterministic and needs no timer of its own.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Throttle<T> {
    window: Duration,
    last_ran: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_ran: None,
            pending: None,
        }
    }

    /// Offer a value. Returns it back when it should run now; otherwise it
    /// becomes the pending trailing call.
    pub fn call(&mut self, now: Instant, value: T) -> Option<T> {
        match self.last_ran {
            Some(last) if now.saturating_duration_since(last) < self.window => {
                self.pending = Some(value);
                None
            }
            _ => {
                self.pending = None;
                self.last_ran = Some(now);
                Some(value)
            }
        }
    }

    /// Release the pending trailing call once its window has closed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        self.last_ran = Some(now);
        self.pending.take()
    }

    /// When the pending call becomes due, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref()?;
        self.last_ran.map(|last| last + self.window)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending call and forget the last run.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.last_ran = None;
    }
}
