//! Fixed-rate frame scheduling.

use std::time::{Duration, Instant};

/// Decides when the next frame is due.
///
/// Missed frames are dropped rather than replayed, so a stalled terminal
/// never causes a burst of catch-up frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    interval: Duration,
    next: Instant,
}

impl FrameClock {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now,
        }
    }

    /// Returns `true` when a frame is due at `now` and schedules the next one.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }

    /// How long to wait for input before the next frame is due.
    pub fn timeout(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }
}
