//! Property-based invariant tests for the motion and interaction core.
//!
//! Verifies:
//! 1. Throttle: a second call within the window never runs immediately and is
//!    scheduled exactly `delay - Δ` later; exactly one trailing run follows.
//! 2. Debounce: a burst of calls spaced under the delay yields one run, `delay`
//!    after the last call.
//! 3. Tween: integer values are non-decreasing and end exactly at the target
//!    with progress 1, for any frame cadence.
//! 4. Count-up: rendering the final value reproduces the label's digits and
//!    suffix.
//! 5. Key sequence: the target is found after any prefix of other keys, and
//!    any single-position mutation of the target is rejected.
//! 6. Active section: a marker inside span `i` of non-overlapping spans selects
//!    exactly `i`.
//! 7. Progress fractions stay within [0, 1].

use std::time::Duration;

use limelight_core::animation::{ScrollTween, Tween, progress};
use limelight_core::count_up::CountUpLabel;
use limelight_core::geometry::{SectionSpan, active_section, scroll_progress};
use limelight_core::key_sequence::{KONAMI_CODE, KeySequenceDetector};
use limelight_core::rate_limit::{Debounce, Throttle, ThrottleDecision};
use proptest::prelude::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

proptest! {
    #[test]
    fn throttle_schedules_remaining_window(
        start in 0u64..10_000,
        delay in 1u64..1_000,
        delta_frac in 0.0f64..1.0,
    ) {
        let delta = ((delay as f64) * delta_frac) as u64;
        let mut throttle = Throttle::new(ms(delay));
        prop_assert_eq!(throttle.call(ms(start)), ThrottleDecision::RunNow);

        let decision = throttle.call(ms(start + delta));
        prop_assert_eq!(decision, ThrottleDecision::Schedule { after: ms(delay - delta) });

        let mut runs = 0;
        for t in (start + delta)..=(start + delay) {
            if throttle.poll(ms(t)) {
                runs += 1;
                prop_assert_eq!(t, start + delay);
            }
        }
        prop_assert_eq!(runs, 1);
    }

    #[test]
    fn debounce_burst_runs_once(
        delay in 2u64..500,
        gaps in prop::collection::vec(0u64..1_000, 1..20),
    ) {
        let mut debounce = Debounce::new(ms(delay));
        let mut t = 0u64;
        let mut runs = 0;
        for gap in gaps {
            let gap = gap % delay;
            // Poll everything between calls: nothing may fire inside the burst.
            for at in t..t + gap {
                if debounce.poll(ms(at)) {
                    runs += 1;
                }
            }
            t += gap;
            debounce.call(ms(t));
        }
        prop_assert_eq!(runs, 0);
        prop_assert!(!debounce.poll(ms(t + delay - 1)));
        prop_assert!(debounce.poll(ms(t + delay)));
        prop_assert!(!debounce.poll(ms(t + 10 * delay)));
    }

    #[test]
    fn tween_is_monotonic_and_exact(
        to in 0i64..1_000_000,
        duration in 1u64..5_000,
        frames in prop::collection::vec(1u64..64, 1..400),
    ) {
        let mut run = Tween::new(0, to, ms(duration)).start();
        let mut t = 1_000u64;
        let mut last = run.sample(ms(t));
        for dt in frames.iter().copied().chain(std::iter::repeat(16)) {
            if last.done {
                break;
            }
            t += dt;
            let frame = run.sample(ms(t));
            prop_assert!(frame.value >= last.value);
            prop_assert!((0.0..=1.0).contains(&frame.progress));
            last = frame;
        }
        prop_assert_eq!(last.value, to);
        prop_assert_eq!(last.progress, 1.0);
    }

    #[test]
    fn count_up_final_text_round_trips(value in 0u64..10_000_000, suffix in "[A-Za-z+%]{0,3}") {
        let text = format!("{value}{suffix}");
        let label = CountUpLabel::parse(&text).unwrap();
        prop_assert_eq!(label.value, value);
        prop_assert_eq!(label.final_text(), text.clone());
        prop_assert_eq!(label.render(label.value as i64), text);
    }

    #[test]
    fn konami_found_after_any_prefix(prefix in prop::collection::vec(0u32..256, 0..30)) {
        let mut detector = KeySequenceDetector::konami();
        for code in &prefix {
            detector.feed(*code);
        }
        let mut matched_at = None;
        for (i, code) in KONAMI_CODE.iter().enumerate() {
            if detector.feed(*code) {
                matched_at = Some(i);
            }
        }
        prop_assert_eq!(matched_at, Some(KONAMI_CODE.len() - 1));
        prop_assert!(detector.buffered() <= KONAMI_CODE.len());
    }

    #[test]
    fn mutated_sequence_never_matches(pos in 0usize..10, replacement in 0u32..256) {
        let mut codes = KONAMI_CODE;
        prop_assume!(codes[pos] != replacement);
        codes[pos] = replacement;
        let mut detector = KeySequenceDetector::konami();
        for code in codes {
            prop_assert!(!detector.feed(code));
        }
    }

    #[test]
    fn marker_selects_its_span(
        heights in prop::collection::vec(1.0f64..2_000.0, 1..8),
        pick in any::<prop::sample::Index>(),
        frac in 0.0f64..1.0,
    ) {
        let mut top = 0.0;
        let spans: Vec<SectionSpan> = heights
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let span = SectionSpan::new(format!("s{i}"), top, *h);
                top += h;
                span
            })
            .collect();
        let i = pick.index(spans.len());
        let marker = spans[i].top + spans[i].height * frac;
        prop_assume!(spans[i].contains(marker));
        prop_assert_eq!(active_section(marker, &spans), Some(i));
    }

    #[test]
    fn fractions_are_clamped(
        elapsed in 0u64..100_000,
        duration in 0u64..10_000,
        scroll in -1e6f64..1e6,
        doc in 0.0f64..1e6,
        viewport in 0.0f64..1e5,
    ) {
        let p = progress(ms(elapsed), ms(duration));
        prop_assert!((0.0..=1.0).contains(&p));
        let s = scroll_progress(scroll, doc, viewport);
        prop_assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn smooth_scroll_ends_on_target(from in 0.0f64..10_000.0, to in 0.0f64..10_000.0) {
        let mut scroll = ScrollTween::new(from, to, ms(800));
        scroll.sample(ms(0));
        let mut t = 0;
        let end = loop {
            t += 16;
            let frame = scroll.sample(ms(t));
            let lo = from.min(to) - 1e-6;
            let hi = from.max(to) + 1e-6;
            prop_assert!(frame.position >= lo && frame.position <= hi);
            if frame.done {
                break frame;
            }
        };
        prop_assert_eq!(end.position, to);
    }
}
