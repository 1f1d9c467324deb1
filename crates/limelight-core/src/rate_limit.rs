#![forbid(unsafe_code)]

//! Rate limiting for high-frequency DOM events (scroll, resize, pointer).
//!
//! Both limiters are pure state machines driven by host time. They never own a
//! timer: when a trailing call is needed they tell the caller how long to wait,
//! and the caller arms a timeout that later calls `poll` with the current time.
//!
//! # Invariants
//!
//! 1. [`Throttle`] runs at most one leading call per `delay` window and keeps
//!    at most one pending trailing call (later calls replace earlier ones).
//! 2. [`Debounce`] runs exactly once after `delay` of quiet, no matter how many
//!    calls arrived before the quiet period.
//! 3. `poll` fires at most once per armed deadline.

use core::time::Duration;

/// What the caller of [`Throttle::call`] should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// Run the handler now.
    RunNow,
    /// Cancel any armed timeout and arm a new one that calls
    /// [`Throttle::poll`] after `after`.
    Schedule { after: Duration },
}

/// Leading-edge throttle with a trailing call.
///
/// The first call (or any call made more than `delay` after the last run)
/// executes immediately. Calls inside the window schedule a single trailing
/// execution at `last_run + delay`.
#[derive(Debug, Clone)]
pub struct Throttle {
    delay: Duration,
    last_run: Option<Duration>,
    pending_at: Option<Duration>,
}

impl Throttle {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_run: None,
            pending_at: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Register a call at `now`.
    pub fn call(&mut self, now: Duration) -> ThrottleDecision {
        match self.last_run {
            Some(last) if now.saturating_sub(last) <= self.delay => {
                let elapsed = now.saturating_sub(last);
                let after = self.delay.saturating_sub(elapsed);
                self.pending_at = Some(now.saturating_add(after));
                ThrottleDecision::Schedule { after }
            }
            _ => {
                self.last_run = Some(now);
                self.pending_at = None;
                ThrottleDecision::RunNow
            }
        }
    }

    /// Fire the pending trailing call if it is due. Returns `true` when the
    /// handler should run.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.pending_at {
            Some(at) if now >= at => {
                self.pending_at = None;
                self.last_run = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Whether a trailing call is armed.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending_at.is_some()
    }

    /// Time left until the pending trailing call is due.
    #[must_use]
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.pending_at.map(|at| at.saturating_sub(now))
    }

    /// Drop any pending trailing call.
    pub fn cancel(&mut self) {
        self.pending_at = None;
    }
}

/// Trailing-edge debounce.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Duration>,
}

impl Debounce {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Register a call at `now`, re-arming the quiet period. Returns how long
    /// the caller should wait before polling.
    pub fn call(&mut self, now: Duration) -> Duration {
        self.deadline = Some(now.saturating_add(self.delay));
        self.delay
    }

    /// Returns `true` once the quiet period after the latest call has elapsed.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Quiet time left before the debounced call is due.
    #[must_use]
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.deadline.map(|at| at.saturating_sub(now))
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{DeterministicClock, MonotonicClock};

    const DELAY: Duration = Duration::from_millis(100);

    #[test]
    fn first_call_runs_immediately() {
        let mut throttle = Throttle::new(DELAY);
        assert_eq!(throttle.call(Duration::from_secs(5)), ThrottleDecision::RunNow);
        assert!(!throttle.has_pending());
    }

    #[test]
    fn call_inside_window_schedules_remaining_delay() {
        let mut clock = DeterministicClock::new();
        let mut throttle = Throttle::new(DELAY);
        assert_eq!(throttle.call(clock.now_mono()), ThrottleDecision::RunNow);

        let now = clock.advance_ms(30);
        assert_eq!(
            throttle.call(now),
            ThrottleDecision::Schedule {
                after: Duration::from_millis(70)
            }
        );
        assert!(!throttle.poll(clock.advance_ms(69)));
        assert!(throttle.poll(clock.advance_ms(1)));
        assert!(!throttle.poll(clock.advance_ms(500)));
    }

    #[test]
    fn later_calls_replace_pending_trailing_call() {
        let mut throttle = Throttle::new(DELAY);
        throttle.call(Duration::ZERO);
        throttle.call(Duration::from_millis(10));
        let decision = throttle.call(Duration::from_millis(60));
        assert_eq!(
            decision,
            ThrottleDecision::Schedule {
                after: Duration::from_millis(40)
            }
        );
        assert!(throttle.poll(Duration::from_millis(100)));
        assert!(!throttle.has_pending());
    }

    #[test]
    fn call_after_window_runs_and_clears_pending() {
        let mut throttle = Throttle::new(DELAY);
        throttle.call(Duration::ZERO);
        throttle.call(Duration::from_millis(50));
        assert!(throttle.has_pending());
        assert_eq!(
            throttle.call(Duration::from_millis(150)),
            ThrottleDecision::RunNow
        );
        assert!(!throttle.has_pending());
    }

    #[test]
    fn throttle_cancel_drops_trailing_call() {
        let mut throttle = Throttle::new(DELAY);
        throttle.call(Duration::ZERO);
        throttle.call(Duration::from_millis(20));
        throttle.cancel();
        assert!(!throttle.poll(Duration::from_secs(1)));
    }

    #[test]
    fn debounce_fires_once_after_last_call() {
        let mut debounce = Debounce::new(DELAY);
        for t in [0u64, 40, 80, 120] {
            debounce.call(Duration::from_millis(t));
            assert!(!debounce.poll(Duration::from_millis(t)));
        }
        assert!(!debounce.poll(Duration::from_millis(219)));
        assert!(debounce.poll(Duration::from_millis(220)));
        assert!(!debounce.poll(Duration::from_millis(400)));
    }

    #[test]
    fn remaining_tracks_moving_deadline() {
        let mut throttle = Throttle::new(DELAY);
        throttle.call(Duration::ZERO);
        assert_eq!(throttle.remaining(Duration::ZERO), None);
        throttle.call(Duration::from_millis(25));
        assert_eq!(
            throttle.remaining(Duration::from_millis(40)),
            Some(Duration::from_millis(60))
        );

        let mut debounce = Debounce::new(DELAY);
        debounce.call(Duration::ZERO);
        debounce.call(Duration::from_millis(90));
        // A timer armed by the first call fires early and must re-arm.
        assert!(!debounce.poll(Duration::from_millis(100)));
        assert_eq!(
            debounce.remaining(Duration::from_millis(100)),
            Some(Duration::from_millis(90))
        );
    }

    #[test]
    fn debounce_cancel() {
        let mut debounce = Debounce::new(DELAY);
        assert_eq!(debounce.call(Duration::ZERO), DELAY);
        debounce.cancel();
        assert!(!debounce.has_pending());
        assert!(!debounce.poll(Duration::from_secs(1)));
    }
}
