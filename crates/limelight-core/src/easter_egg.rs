#![forbid(unsafe_code)]

//! Easter egg activation state.
//!
//! While the egg is showing, a further activation only pushes the revert
//! deadline back; it never stacks a second overlay. Each activation hands out
//! a generation number, and only the revert timer armed by the latest
//! activation may hide the egg.
//!
//! The host arms its revert timer for [`EggActivation::upcoming`] *before*
//! calling [`EggActivation::activate`], so a timer that fails to arm leaves
//! the state untouched.

/// What the host must do for an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EggAction {
    /// Nothing on screen yet: build the overlay.
    Show,
    /// Already showing: only replace the revert timer.
    Extend,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EggActivation {
    showing: bool,
    generation: u64,
}

impl EggActivation {
    #[must_use]
    pub const fn is_showing(&self) -> bool {
        self.showing
    }

    /// Generation the next [`activate`](Self::activate) will hand out.
    #[must_use]
    pub const fn upcoming(&self) -> u64 {
        self.generation.wrapping_add(1)
    }

    pub fn activate(&mut self) -> EggAction {
        self.generation = self.upcoming();
        if self.showing {
            crate::debug!(target: crate::logging::targets::EASTER_EGG, "easter egg extended");
            return EggAction::Extend;
        }
        self.showing = true;
        crate::info!(target: crate::logging::targets::EASTER_EGG, "easter egg activated");
        EggAction::Show
    }

    /// Revert timer for `generation` fired. Returns `true` when the host
    /// should tear the egg down; stale generations are ignored.
    pub fn expire(&mut self, generation: u64) -> bool {
        if !self.showing || generation != self.generation {
            return false;
        }
        self.showing = false;
        true
    }

    /// Hide immediately, whatever timer is pending. Returns whether the egg
    /// was showing.
    pub fn dismiss(&mut self) -> bool {
        // Bump so any outstanding timer is stale.
        self.generation = self.upcoming();
        core::mem::replace(&mut self.showing, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_activation_shows() {
        let mut egg = EggActivation::default();
        let generation = egg.upcoming();
        assert_eq!(egg.activate(), EggAction::Show);
        assert!(egg.is_showing());
        assert!(egg.expire(generation));
        assert!(!egg.is_showing());
    }

    #[test]
    fn reactivation_extends_instead_of_stacking() {
        let mut egg = EggActivation::default();
        let first = egg.upcoming();
        assert_eq!(egg.activate(), EggAction::Show);
        let second = egg.upcoming();
        assert_eq!(egg.activate(), EggAction::Extend);
        assert_eq!(egg.activate(), EggAction::Extend);
        assert!(egg.is_showing());
        // The first revert deadline was replaced.
        assert!(!egg.expire(first));
        assert!(!egg.expire(second));
        assert!(egg.is_showing());
    }

    #[test]
    fn latest_generation_reverts_once() {
        let mut egg = EggActivation::default();
        egg.activate();
        let latest = egg.upcoming();
        egg.activate();
        assert!(egg.expire(latest));
        assert!(!egg.expire(latest));
    }

    #[test]
    fn shows_again_after_revert() {
        let mut egg = EggActivation::default();
        let generation = egg.upcoming();
        egg.activate();
        egg.expire(generation);
        assert_eq!(egg.activate(), EggAction::Show);
    }

    #[test]
    fn unarmed_upcoming_leaves_state_untouched() {
        let mut egg = EggActivation::default();
        let before = egg;
        let _ = egg.upcoming();
        assert_eq!(egg, before);
        assert!(!egg.expire(before.upcoming()));
    }

    #[test]
    fn dismiss_invalidates_pending_timer() {
        let mut egg = EggActivation::default();
        let generation = egg.upcoming();
        egg.activate();
        assert!(egg.dismiss());
        assert!(!egg.dismiss());
        assert!(!egg.expire(generation));
    }
}
