#![forbid(unsafe_code)]

//! Fixed key-sequence detection over DOM key codes.
//!
//! The detector keeps a sliding window of the most recent key codes, exactly
//! as long as the target sequence, and reports a match whenever the window
//! equals the target. Keys typed before the sequence simply slide out of the
//! window, so a stray leading key never prevents a match.
//!
//! # Invariants
//! 1. The window never holds more codes than the target has.
//! 2. A match requires a full window; shorter prefixes never match.
//! 3. After a match the window is kept, so overlapping repeats are detected
//!    exactly like a fresh sequence would be.

use std::collections::VecDeque;

/// Legacy `KeyboardEvent.keyCode` values used by the built-in sequence.
pub mod key_codes {
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const A: u32 = 65;
    pub const B: u32 = 66;
}

/// Up Up Down Down Left Right Left Right B A.
pub const KONAMI_CODE: [u32; 10] = {
    use key_codes::*;
    [UP, UP, DOWN, DOWN, LEFT, RIGHT, LEFT, RIGHT, B, A]
};

/// Sliding-window matcher for one target sequence.
#[derive(Debug, Clone)]
pub struct KeySequenceDetector {
    target: Vec<u32>,
    window: VecDeque<u32>,
}

impl Default for KeySequenceDetector {
    fn default() -> Self {
        Self::konami()
    }
}

impl KeySequenceDetector {
    /// Detector for an arbitrary target. An empty target never matches.
    #[must_use]
    pub fn new(target: impl Into<Vec<u32>>) -> Self {
        let target = target.into();
        Self {
            window: VecDeque::with_capacity(target.len()),
            target,
        }
    }

    /// Detector for [`KONAMI_CODE`].
    #[must_use]
    pub fn konami() -> Self {
        Self::new(KONAMI_CODE)
    }

    /// Push one key code. Returns `true` when the window now equals the target.
    pub fn feed(&mut self, code: u32) -> bool {
        if self.target.is_empty() {
            return false;
        }
        if self.window.len() == self.target.len() {
            self.window.pop_front();
        }
        self.window.push_back(code);
        let matched = self.is_match();
        if matched {
            crate::debug!(
                target: crate::logging::targets::EASTER_EGG,
                len = self.target.len(),
                "key sequence matched"
            );
        }
        matched
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        !self.target.is_empty() && self.window.iter().eq(self.target.iter())
    }

    /// Number of codes currently buffered.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.window.len()
    }

    #[must_use]
    pub fn target(&self) -> &[u32] {
        &self.target
    }

    pub fn reset(&mut self) {
        self.window.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::key_codes::*;
    use super::*;

    fn feed_all(detector: &mut KeySequenceDetector, codes: &[u32]) -> Vec<bool> {
        codes.iter().map(|&c| detector.feed(c)).collect()
    }

    #[test]
    fn exact_sequence_matches_on_last_key() {
        let mut detector = KeySequenceDetector::konami();
        let hits = feed_all(&mut detector, &KONAMI_CODE);
        assert_eq!(hits.iter().filter(|&&h| h).count(), 1);
        assert!(hits[9]);
    }

    #[test]
    fn one_wrong_position_does_not_match() {
        for i in 0..KONAMI_CODE.len() {
            let mut codes = KONAMI_CODE;
            codes[i] = 13;
            let mut detector = KeySequenceDetector::konami();
            assert!(
                !feed_all(&mut detector, &codes).contains(&true),
                "position {i}"
            );
        }
    }

    #[test]
    fn leading_extra_key_slides_out() {
        let mut detector = KeySequenceDetector::konami();
        assert!(!detector.feed(A));
        let hits = feed_all(&mut detector, &KONAMI_CODE);
        assert!(hits[9]);
        assert_eq!(detector.buffered(), KONAMI_CODE.len());
    }

    #[test]
    fn window_is_bounded() {
        let mut detector = KeySequenceDetector::konami();
        for _ in 0..100 {
            detector.feed(UP);
        }
        assert_eq!(detector.buffered(), 10);
    }

    #[test]
    fn prefix_never_matches() {
        let mut detector = KeySequenceDetector::new([UP, DOWN]);
        assert!(!detector.feed(UP));
        assert!(detector.feed(DOWN));
        assert!(!detector.feed(RIGHT));
    }

    #[test]
    fn empty_target_never_matches() {
        let mut detector = KeySequenceDetector::new(Vec::new());
        assert!(!detector.feed(B));
        assert_eq!(detector.buffered(), 0);
    }

    #[test]
    fn reset_clears_window() {
        let mut detector = KeySequenceDetector::konami();
        feed_all(&mut detector, &KONAMI_CODE[..9]);
        detector.reset();
        assert!(!detector.feed(A));
    }
}
