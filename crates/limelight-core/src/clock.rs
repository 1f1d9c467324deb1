#![forbid(unsafe_code)]

//! Monotonic time sources.
//!
//! Every time-dependent decision in this crate takes `now: Duration` from a
//! [`MonotonicClock`]. The browser host reads `performance.now()`; tests use
//! [`DeterministicClock`] and advance it explicitly.

use core::time::Duration;

/// A source of monotonic time measured from an arbitrary origin.
pub trait MonotonicClock {
    fn now_mono(&self) -> Duration;
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Advance by whole milliseconds and return the new time.
    pub fn advance_ms(&mut self, ms: u64) -> Duration {
        self.advance(Duration::from_millis(ms));
        self.now
    }
}

impl MonotonicClock for DeterministicClock {
    fn now_mono(&self) -> Duration {
        self.now
    }
}

/// Convert a `DOMHighResTimeStamp` (fractional milliseconds) to a `Duration`.
///
/// Negative and non-finite inputs map to zero.
#[must_use]
pub fn duration_from_millis_f64(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::from_secs_f64(ms / 1000.0)
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_clock_advances() {
        let mut clock = DeterministicClock::new();
        assert_eq!(clock.now_mono(), Duration::ZERO);
        assert_eq!(clock.advance_ms(16), Duration::from_millis(16));
        clock.set(Duration::from_secs(2));
        assert_eq!(clock.now_mono(), Duration::from_secs(2));
    }

    #[test]
    fn high_res_timestamps_convert() {
        assert_eq!(duration_from_millis_f64(1500.0), Duration::from_millis(1500));
        assert_eq!(duration_from_millis_f64(-3.0), Duration::ZERO);
        assert_eq!(duration_from_millis_f64(f64::NAN), Duration::ZERO);
    }
}
