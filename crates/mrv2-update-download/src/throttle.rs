//! Progress throttling.

use std::time::{Duration, Instant};

/// Limits how often byte counters are pushed to the progress reporter.
///
/// Chunks arrive every few kilobytes; redrawing a progress bar for each of
/// them costs more than the transfer.
#[derive(Debug)]
pub struct ProgressThrottle {
    interval: Duration,
    next_due: Option<Instant>,
}

impl ProgressThrottle {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// True when an update may be emitted now.
    pub fn should_emit(&mut self) -> bool {
        self.should_emit_at(Instant::now())
    }

    /// Same as [`should_emit`](Self::should_emit) with an explicit clock.
    pub fn should_emit_at(&mut self, now: Instant) -> bool {
        if self.next_due.is_some_and(|due| now < due) {
            return false;
        }
        self.next_due = Some(now + self.interval);
        true
    }
}
