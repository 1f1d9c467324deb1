#![forbid(unsafe_code)]

//! Stagger offsets for cascading entrance animations.
//!
//! Hero elements after the loading screen and platform cards inside their
//! grid reveal one after another, each `step` after the previous one.
//!
//! # Invariants
//!
//! 1. `stagger_offsets(0, ..)` is empty.
//! 2. The first offset is always `Duration::ZERO`.
//! 3. `offset[i] == i * step` exactly.

use core::time::Duration;

/// Start delay of the item at `index`.
#[must_use]
pub fn sibling_delay(index: usize, step: Duration) -> Duration {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    step.saturating_mul(index)
}

/// Start delays for `count` items.
#[must_use]
pub fn stagger_offsets(count: usize, step: Duration) -> Vec<Duration> {
    (0..count).map(|i| sibling_delay(i, step)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_150: Duration = Duration::from_millis(150);
    const MS_200: Duration = Duration::from_millis(200);

    #[test]
    fn empty_and_single() {
        assert!(stagger_offsets(0, MS_200).is_empty());
        assert_eq!(stagger_offsets(1, MS_200), vec![Duration::ZERO]);
    }

    #[test]
    fn hero_elements_cascade_every_200ms() {
        let offsets = stagger_offsets(4, MS_200);
        let expected: Vec<Duration> = [0, 200, 400, 600]
            .into_iter()
            .map(Duration::from_millis)
            .collect();
        assert_eq!(offsets, expected);
    }

    #[test]
    fn platform_card_delay_by_sibling_index() {
        assert_eq!(sibling_delay(0, MS_150), Duration::ZERO);
        assert_eq!(sibling_delay(3, MS_150), Duration::from_millis(450));
    }

    #[test]
    fn huge_index_saturates() {
        assert_eq!(sibling_delay(usize::MAX, Duration::MAX), Duration::MAX);
    }
}
