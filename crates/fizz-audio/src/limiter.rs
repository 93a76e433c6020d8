//! Cooldown gates for high-frequency sound events

use std::time::{Duration, Instant};

/// Drops events that arrive within a cooldown window of the last one.
///
/// High-frequency physics contacts would otherwise flood the mixer; calls
/// inside the window are silently discarded, not queued.
pub struct RateLimiter {
    min_interval: Duration,
    last_fired: Option<Instant>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_fired: None,
        }
    }

    /// Attempt to fire now
    pub fn try_fire(&mut self) -> bool {
        self.try_fire_at(Instant::now())
    }

    /// Attempt to fire at an explicit instant (test driving)
    pub fn try_fire_at(&mut self, now: Instant) -> bool {
        match self.last_fired {
            Some(last) if now.duration_since(last) < self.min_interval => false,
            _ => {
                self.last_fired = Some(now);
                true
            }
        }
    }
}
