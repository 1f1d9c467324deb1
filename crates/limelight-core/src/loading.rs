#![forbid(unsafe_code)]

//! Loading splash timeline.
//!
//! The splash runs a fixed script measured from construction: emphasize the
//! logo, fade in the caption, hide the splash and unlock scrolling, then
//! cascade the hero elements in. [`LoadingSchedule::plan`] lays the script out
//! as absolute offsets so the host can arm one timer per step.

use core::time::Duration;

use crate::animation::stagger::stagger_offsets;
use crate::config::SiteConfig;

/// Splash state. The only transition is `Loading -> Revealed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadingPhase {
    #[default]
    Loading,
    Revealed,
}

impl LoadingPhase {
    /// Move to `Revealed`. Returns `false` if the splash was already gone.
    pub fn reveal(&mut self) -> bool {
        match self {
            Self::Loading => {
                *self = Self::Revealed;
                crate::debug!(target: crate::logging::targets::LOADING, "splash revealed");
                true
            }
            Self::Revealed => false,
        }
    }
}

/// One scripted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingStep {
    /// Scale the logo up and add its glow.
    EmphasizeLogo,
    /// Fade and slide the caption into place.
    ShowText,
    /// Hide the splash and restore page scrolling.
    Reveal,
    /// Bring the hero element at this index into view.
    HeroEntrance(usize),
}

/// Absolute offsets of every [`LoadingStep`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingSchedule {
    steps: Vec<(Duration, LoadingStep)>,
}

impl LoadingSchedule {
    /// Lay out the script for `hero_count` hero elements.
    #[must_use]
    pub fn plan(config: &SiteConfig, hero_count: usize) -> Self {
        let reveal_at = config.loading_duration();
        let entrance_at = reveal_at.saturating_add(config.hero_entrance_delay());

        let mut steps = vec![
            (config.logo_emphasis_at(), LoadingStep::EmphasizeLogo),
            (config.loading_text_at(), LoadingStep::ShowText),
            (reveal_at, LoadingStep::Reveal),
        ];
        steps.extend(
            stagger_offsets(hero_count, config.hero_stagger())
                .into_iter()
                .enumerate()
                .map(|(i, offset)| (entrance_at.saturating_add(offset), LoadingStep::HeroEntrance(i))),
        );
        // Stable: equal offsets keep script order.
        steps.sort_by_key(|(at, _)| *at);
        Self { steps }
    }

    #[must_use]
    pub fn steps(&self) -> &[(Duration, LoadingStep)] {
        &self.steps
    }

    /// Offset of a step, if scheduled.
    #[must_use]
    pub fn at(&self, step: LoadingStep) -> Option<Duration> {
        self.steps.iter().find(|(_, s)| *s == step).map(|(at, _)| *at)
    }

    /// Offset of the last step.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.steps.last().map_or(Duration::ZERO, |(at, _)| *at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn reveal_is_one_way() {
        let mut phase = LoadingPhase::default();
        assert!(phase.reveal());
        assert!(!phase.reveal());
        assert_eq!(phase, LoadingPhase::Revealed);
    }

    #[test]
    fn default_script_timings() {
        let schedule = LoadingSchedule::plan(&SiteConfig::default(), 4);
        assert_eq!(schedule.at(LoadingStep::EmphasizeLogo), Some(ms(500)));
        assert_eq!(schedule.at(LoadingStep::ShowText), Some(ms(1000)));
        assert_eq!(schedule.at(LoadingStep::Reveal), Some(ms(2500)));
        assert_eq!(schedule.at(LoadingStep::HeroEntrance(0)), Some(ms(3000)));
        assert_eq!(schedule.at(LoadingStep::HeroEntrance(3)), Some(ms(3600)));
        assert_eq!(schedule.total(), ms(3600));
    }

    #[test]
    fn steps_are_sorted() {
        let config = SiteConfig {
            loading_duration_ms: 300,
            ..SiteConfig::default()
        };
        let schedule = LoadingSchedule::plan(&config, 2);
        for pair in schedule.steps().windows(2) {
            assert!(pair[0].0 <= pair[1].0);
        }
        assert_eq!(schedule.steps()[0], (ms(300), LoadingStep::Reveal));
    }

    #[test]
    fn no_hero_elements() {
        let schedule = LoadingSchedule::plan(&SiteConfig::default(), 0);
        assert_eq!(schedule.steps().len(), 3);
        assert_eq!(schedule.total(), ms(2500));
    }
}
