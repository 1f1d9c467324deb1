#![forbid(unsafe_code)]

//! Frame-driven animation primitives.
//!
//! The browser hands every `requestAnimationFrame` callback a high-resolution
//! timestamp. The runs in this module are anchored on the first timestamp
//! they see and map each later timestamp to a progress fraction clamped to
//! `[0, 1]`; the caller keeps requesting frames until a sample reports
//! `done`.
//!
//! Runs hold no timers and no DOM references, so cancelling one is just
//! dropping it (the web layer also cancels the pending frame request).

pub mod stagger;

use core::time::Duration;

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// Quadratic ease-in-out. Used by in-page smooth scrolling.
#[inline]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Progress of `elapsed` through `duration`, clamped to `[0, 1]`.
///
/// A zero duration is complete immediately.
#[must_use]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Frame anchor
// ---------------------------------------------------------------------------

/// Tracks the first frame timestamp of a run.
#[derive(Debug, Clone, Copy, Default)]
struct FrameAnchor {
    start: Option<Duration>,
}

impl FrameAnchor {
    fn elapsed(&mut self, timestamp: Duration) -> Duration {
        let start = *self.start.get_or_insert(timestamp);
        timestamp.saturating_sub(start)
    }
}

// ---------------------------------------------------------------------------
// Numeric tween
// ---------------------------------------------------------------------------

/// Integer interpolation from `from` to `to` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tween {
    pub from: i64,
    pub to: i64,
    pub duration: Duration,
}

/// One sampled frame of a [`TweenRun`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenFrame {
    pub value: i64,
    pub progress: f64,
    pub done: bool,
}

impl Tween {
    #[must_use]
    pub const fn new(from: i64, to: i64, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    /// Value at a given progress: `floor(progress * (to - from) + from)`.
    #[must_use]
    pub fn value_at(&self, progress: f64) -> i64 {
        let p = progress.clamp(0.0, 1.0);
        if p >= 1.0 {
            return self.to;
        }
        let span = (self.to - self.from) as f64;
        (p * span + self.from as f64).floor() as i64
    }

    /// Begin a run; the first sampled timestamp becomes its origin.
    #[must_use]
    pub fn start(self) -> TweenRun {
        TweenRun {
            tween: self,
            anchor: FrameAnchor::default(),
        }
    }
}

/// An in-flight [`Tween`].
#[derive(Debug, Clone, Copy)]
pub struct TweenRun {
    tween: Tween,
    anchor: FrameAnchor,
}

impl TweenRun {
    /// Sample the run at a frame timestamp.
    pub fn sample(&mut self, timestamp: Duration) -> TweenFrame {
        let elapsed = self.anchor.elapsed(timestamp);
        let p = progress(elapsed, self.tween.duration);
        TweenFrame {
            value: self.tween.value_at(p),
            progress: p,
            done: p >= 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Smooth scroll
// ---------------------------------------------------------------------------

/// Eased vertical scroll between two document offsets.
#[derive(Debug, Clone, Copy)]
pub struct ScrollTween {
    from: f64,
    to: f64,
    duration: Duration,
    anchor: FrameAnchor,
}

/// One sampled frame of a [`ScrollTween`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrame {
    pub position: f64,
    pub done: bool,
}

impl ScrollTween {
    /// Ease-in-out quadratic scroll from `from` to `to`.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            anchor: FrameAnchor::default(),
        }
    }

    #[must_use]
    pub const fn target(&self) -> f64 {
        self.to
    }

    /// Position at a normalized progress.
    #[must_use]
    pub fn position_at(&self, progress: f64) -> f64 {
        let eased = ease_in_out(progress);
        self.from + (self.to - self.from) * eased
    }

    /// Sample at a frame timestamp. The elapsed time is clamped to the
    /// duration, so the final frame lands exactly on the target.
    pub fn sample(&mut self, timestamp: Duration) -> ScrollFrame {
        let elapsed = self.anchor.elapsed(timestamp);
        let p = progress(elapsed, self.duration);
        if p >= 1.0 {
            return ScrollFrame {
                position: self.to,
                done: true,
            };
        }
        ScrollFrame {
            position: self.position_at(p),
            done: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn easing_endpoints_and_clamping() {
        assert!(ease_in_out(0.0).abs() < f64::EPSILON);
        assert!((ease_in_out(1.0) - 1.0).abs() < f64::EPSILON);
        assert_eq!(ease_in_out(-1.0), 0.0);
        assert_eq!(ease_in_out(2.0), 1.0);
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-9);
        assert!((ease_in_out(0.25) + ease_in_out(0.75) - 1.0).abs() < 1e-9);
        assert!(ease_in_out(0.25) < 0.25);
        assert!(ease_in_out(0.75) > 0.75);
    }

    #[test]
    fn progress_handles_zero_duration() {
        assert_eq!(progress(Duration::ZERO, Duration::ZERO), 1.0);
        assert_eq!(progress(ms(50), ms(100)), 0.5);
        assert_eq!(progress(ms(500), ms(100)), 1.0);
    }

    #[test]
    fn tween_first_sample_is_origin() {
        let mut run = Tween::new(0, 100, ms(1000)).start();
        let frame = run.sample(ms(12_345));
        assert_eq!(frame.value, 0);
        assert_eq!(frame.progress, 0.0);
        assert!(!frame.done);
    }

    #[test]
    fn tween_floors_intermediate_values() {
        let tween = Tween::new(0, 88, ms(1500));
        assert_eq!(tween.value_at(0.5), 44);
        assert_eq!(tween.value_at(0.999), 87);
        assert_eq!(tween.value_at(1.0), 88);
    }

    #[test]
    fn tween_ends_exactly_at_target() {
        let mut run = Tween::new(0, 100, ms(1000)).start();
        let mut t = ms(5);
        let mut last = run.sample(t);
        while !last.done {
            t += MS_16;
            let frame = run.sample(t);
            assert!(frame.value >= last.value);
            last = frame;
        }
        assert_eq!(last.value, 100);
        assert_eq!(last.progress, 1.0);
    }

    #[test]
    fn scroll_tween_lands_on_target_after_overshoot() {
        let mut scroll = ScrollTween::new(0.0, 1200.0, ms(800));
        scroll.sample(ms(100));
        let mid = scroll.sample(ms(500));
        assert!((mid.position - 600.0).abs() < 1e-6);
        assert!(!mid.done);
        let end = scroll.sample(ms(950));
        assert_eq!(end.position, 1200.0);
        assert!(end.done);
    }

    #[test]
    fn scroll_tween_upwards() {
        let mut scroll = ScrollTween::new(900.0, 100.0, ms(800));
        scroll.sample(Duration::ZERO);
        let half = scroll.sample(ms(400));
        assert!((half.position - 500.0).abs() < 1e-6);
        let quarter = scroll.sample(ms(200));
        assert!(quarter.position < 900.0 && quarter.position > 700.0);
        assert_eq!(scroll.target(), 100.0);
    }
}
