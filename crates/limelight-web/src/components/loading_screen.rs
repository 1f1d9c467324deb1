use std::cell::Cell;
use std::rc::Rc;

use limelight_core::loading::{LoadingPhase, LoadingSchedule, LoadingStep};
use limelight_core::logging::targets;
use limelight_core::navigation::BodyOverflow;
use limelight_core::{SiteConfig, SiteError};
use web_sys::HtmlElement;

use super::Component;
use crate::dom::{self, PageElements, selectors};
use crate::scheduling::Timeout;
use crate::styles;

/// Splash screen script followed by the hero entrance cascade.
pub struct LoadingScreen {
    config: Rc<SiteConfig>,
    phase: Rc<Cell<LoadingPhase>>,
    timers: Vec<Timeout>,
}

impl LoadingScreen {
    pub fn new(config: Rc<SiteConfig>) -> Self {
        Self {
            config,
            phase: Rc::new(Cell::new(LoadingPhase::Loading)),
            timers: Vec::new(),
        }
    }
}

#[derive(Clone)]
struct LoadingElements {
    screen: Option<HtmlElement>,
    logo: Option<HtmlElement>,
    text: Option<HtmlElement>,
    hero: Vec<HtmlElement>,
    body: HtmlElement,
}

fn perform(step: LoadingStep, els: &LoadingElements, phase: &Cell<LoadingPhase>) {
    match step {
        LoadingStep::EmphasizeLogo => {
            if let Some(logo) = &els.logo {
                dom::set_style(logo, "transform", styles::LOGO_EMPHASIS_TRANSFORM);
                dom::set_style(logo, "filter", styles::LOGO_EMPHASIS_FILTER);
            }
        }
        LoadingStep::ShowText => {
            if let Some(text) = &els.text {
                dom::set_style(text, "opacity", "1");
                dom::set_style(text, "transform", styles::SETTLED_TRANSFORM);
            }
        }
        LoadingStep::Reveal => {
            let mut current = phase.get();
            if !current.reveal() {
                return;
            }
            phase.set(current);
            if let Some(screen) = &els.screen {
                dom::add_class(screen, "hidden");
            }
            dom::set_style(&els.body, "overflow", BodyOverflow::Visible.as_css());
            tracing::debug!(target: targets::LOADING, "splash hidden");
        }
        LoadingStep::HeroEntrance(index) => {
            if let Some(el) = els.hero.get(index) {
                dom::set_style(el, "opacity", "1");
                dom::set_style(el, "transform", styles::SETTLED_TRANSFORM);
            }
        }
    }
}

impl Component for LoadingScreen {
    fn name(&self) -> &'static str {
        "loading_screen"
    }

    fn attach(&mut self, page: &PageElements) -> Result<(), SiteError> {
        let els = LoadingElements {
            screen: page.loading_screen.clone(),
            logo: page.loading_logo.clone(),
            text: page.loading_text.clone(),
            hero: page.hero.clone(),
            body: page.body.clone(),
        };
        let schedule = LoadingSchedule::plan(&self.config, els.hero.len());

        for &(at, step) in schedule.steps() {
            let els = els.clone();
            let phase = Rc::clone(&self.phase);
            self.timers
                .push(Timeout::new(at, move || perform(step, &els, &phase))?);
        }
        tracing::debug!(
            target: targets::LOADING,
            steps = schedule.steps().len(),
            total_ms = schedule.total().as_millis() as u64,
            "loading script armed"
        );

        // The script still unlocks scrolling and runs the hero cascade.
        if els.screen.is_none() {
            return Err(SiteError::missing(selectors::LOADING_SCREEN));
        }
        Ok(())
    }

    fn detach(&mut self) {
        self.timers.clear();
    }
}
