#![forbid(unsafe_code)]

//! Hover glow lifecycle for one card.
//!
//! A card has at most one glow overlay. Leaving starts a fade-out that ends
//! with the overlay's removal; entering again before the removal lands keeps
//! the overlay and cancels the removal.
//!
//! ```text
//! Absent --enter--> Shown --leave--> FadingOut --removed--> Absent
//!                     ^                  |
//!                     +------enter-------+
//! ```

/// What the host does on `mouseenter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlowEnter {
    /// Build and append a new overlay.
    Create,
    /// Keep the overlay already on the card.
    Reuse,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Absent,
    Shown,
    FadingOut,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlowState {
    phase: Phase,
    removal: u64,
}

impl GlowState {
    /// Whether an overlay is on the card (shown or fading out).
    #[must_use]
    pub fn has_overlay(&self) -> bool {
        self.phase != Phase::Absent
    }

    pub fn enter(&mut self) -> GlowEnter {
        match self.phase {
            Phase::Absent => {
                self.phase = Phase::Shown;
                GlowEnter::Create
            }
            Phase::Shown => GlowEnter::Reuse,
            Phase::FadingOut => {
                // Invalidate the pending removal.
                self.removal = self.removal.wrapping_add(1);
                self.phase = Phase::Shown;
                GlowEnter::Reuse
            }
        }
    }

    /// Start fading out. Returns the ticket the removal timer must present
    /// to [`removed`](Self::removed); `None` when there is nothing to fade.
    pub fn leave(&mut self) -> Option<u64> {
        if self.phase != Phase::Shown {
            return None;
        }
        self.phase = Phase::FadingOut;
        self.removal = self.removal.wrapping_add(1);
        Some(self.removal)
    }

    /// Removal timer fired. Returns `true` when the host should remove the
    /// overlay now.
    pub fn removed(&mut self, ticket: u64) -> bool {
        if self.phase != Phase::FadingOut || ticket != self.removal {
            return false;
        }
        self.phase = Phase::Absent;
        true
    }

    /// The overlay could not be created or was torn down externally.
    pub fn discard(&mut self) {
        self.removal = self.removal.wrapping_add(1);
        self.phase = Phase::Absent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_most_one_overlay() {
        let mut glow = GlowState::default();
        assert_eq!(glow.enter(), GlowEnter::Create);
        assert_eq!(glow.enter(), GlowEnter::Reuse);
        assert!(glow.has_overlay());
    }

    #[test]
    fn leave_then_removal_clears() {
        let mut glow = GlowState::default();
        glow.enter();
        let ticket = glow.leave().unwrap();
        assert!(glow.has_overlay());
        assert!(glow.removed(ticket));
        assert!(!glow.has_overlay());
        assert_eq!(glow.enter(), GlowEnter::Create);
    }

    #[test]
    fn reenter_during_fade_cancels_removal() {
        let mut glow = GlowState::default();
        glow.enter();
        let ticket = glow.leave().unwrap();
        assert_eq!(glow.enter(), GlowEnter::Reuse);
        assert!(!glow.removed(ticket));
        assert!(glow.has_overlay());
    }

    #[test]
    fn only_the_latest_removal_counts() {
        let mut glow = GlowState::default();
        glow.enter();
        let stale = glow.leave().unwrap();
        glow.enter();
        let fresh = glow.leave().unwrap();
        assert_ne!(stale, fresh);
        assert!(!glow.removed(stale));
        assert!(glow.removed(fresh));
    }

    #[test]
    fn leave_without_overlay_is_ignored() {
        let mut glow = GlowState::default();
        assert_eq!(glow.leave(), None);
        glow.enter();
        assert!(glow.leave().is_some());
        assert_eq!(glow.leave(), None);
    }

    #[test]
    fn discard_resets_to_absent() {
        let mut glow = GlowState::default();
        glow.enter();
        let ticket = glow.leave().unwrap();
        glow.discard();
        assert!(!glow.removed(ticket));
        assert_eq!(glow.enter(), GlowEnter::Create);
    }
}
