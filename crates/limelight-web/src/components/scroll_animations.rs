use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use limelight_core::animation::stagger::sibling_delay;
use limelight_core::count_up::CountUpRegistry;
use limelight_core::geometry::parallax_offset;
use limelight_core::logging::targets;
use limelight_core::{SiteConfig, SiteError};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use super::Component;
use crate::dom::{self, PageElements, selectors};
use crate::events::{EventListener, ObserverOptions, VisibilityObserver};
use crate::scheduling::{AnimationFrame, Frame, Throttled, Timeout};
use crate::styles;

/// In-flight count-ups keyed by element. Starting a new one on an element
/// drops (and so cancels) the previous run.
#[derive(Clone, Default)]
struct CountUps {
    registry: Rc<RefCell<CountUpRegistry<Element, AnimationFrame>>>,
}

impl CountUps {
    /// Count `el` up to its label. With `only_positive`, a zero label is left
    /// alone and the text is reset to zero before counting.
    fn start(&self, el: &Element, duration: Duration, only_positive: bool) {
        let live_text = el.text_content().unwrap_or_default();
        let Some(label) = self.registry.borrow_mut().label(el, &live_text) else {
            tracing::debug!(target: targets::SCROLL, text = %live_text, "label has no digits");
            return;
        };
        if only_positive {
            if !label.is_countable() {
                return;
            }
            el.set_text_content(Some(&label.zero_text()));
        }

        let mut run = label.tween(duration).start();
        let target = el.clone();
        let frames = AnimationFrame::start(move |timestamp| {
            let frame = run.sample(timestamp);
            target.set_text_content(Some(&label.render(frame.value)));
            if frame.done { Frame::Done } else { Frame::Continue }
        });
        let replaced = self.registry.borrow_mut().track(el, frames);
        drop(replaced);
    }

    /// Cancel every run and put interrupted labels back to their text.
    fn clear(&self) {
        let interrupted = self.registry.borrow_mut().clear();
        for (el, text) in interrupted {
            el.set_text_content(Some(&text));
        }
    }
}

/// Reveal-on-scroll, stat count-ups, staggered platform cards and parallax.
pub struct ScrollAnimations {
    config: Rc<SiteConfig>,
    observers: Vec<VisibilityObserver>,
    listeners: Vec<EventListener>,
    parallax: Option<Throttled>,
    count_ups: CountUps,
    card_timers: Rc<RefCell<Vec<Timeout>>>,
}

impl ScrollAnimations {
    pub fn new(config: Rc<SiteConfig>) -> Self {
        Self {
            config,
            observers: Vec::new(),
            listeners: Vec::new(),
            parallax: None,
            count_ups: CountUps::default(),
            card_timers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn reveal_observer(&mut self, page: &PageElements) -> Result<(), SiteError> {
        let options = ObserverOptions {
            threshold: Some(self.config.reveal_threshold),
            root_margin: Some(self.config.reveal_root_margin.clone()),
        };
        let count_ups = self.count_ups.clone();
        let card_timers = Rc::clone(&self.card_timers);
        let stat_duration = self.config.stat_count_up();
        let stagger = self.config.platform_stagger();

        let observer = VisibilityObserver::new(&options, move |target, observer| {
            dom::add_class(&target, "animate");
            let classes = target.class_list();
            if classes.contains("stat-card") {
                match target.query_selector(selectors::STAT_NUMBER) {
                    Ok(Some(number)) => count_ups.start(&number, stat_duration, false),
                    _ => tracing::debug!(target: targets::SCROLL, "stat card without number"),
                }
            }
            if classes.contains("platform-card") {
                if let Ok(card) = target.clone().dyn_into::<HtmlElement>() {
                    let delay = sibling_delay(dom::sibling_index(&card), stagger);
                    let settle = move || {
                        dom::set_style(&card, "opacity", "1");
                        dom::set_style(&card, "transform", styles::PLATFORM_SETTLED_TRANSFORM);
                    };
                    match Timeout::new(delay, settle) {
                        Ok(timer) => card_timers.borrow_mut().push(timer),
                        Err(err) => tracing::warn!(target: targets::SCROLL, %err, "card reveal not armed"),
                    }
                }
            }
            observer.unobserve(&target);
        })?;

        for el in &page.reveal_targets {
            dom::set_style(el, "opacity", "0");
            dom::set_style(el, "transform", styles::REVEAL_OFFSET);
            dom::set_style(el, "transition", styles::REVEAL_TRANSITION);
            observer.observe(el);
        }
        tracing::debug!(target: targets::SCROLL, observed = page.reveal_targets.len(), "reveal observer attached");
        self.observers.push(observer);
        Ok(())
    }

    fn count_up_observer(&mut self, page: &PageElements) -> Result<(), SiteError> {
        let count_ups = self.count_ups.clone();
        let duration = self.config.number_count_up();
        let observer = VisibilityObserver::new(&ObserverOptions::default(), move |target, observer| {
            if target.class_list().contains("counted") {
                return;
            }
            dom::add_class(&target, "counted");
            count_ups.start(&target, duration, true);
            observer.unobserve(&target);
        })?;
        for el in &page.stat_numbers {
            observer.observe(el);
        }
        self.observers.push(observer);
        Ok(())
    }

    fn parallax(&mut self, page: &PageElements) -> Result<(), SiteError> {
        if page.parallax.is_empty() {
            return Err(SiteError::missing(selectors::PARALLAX));
        }
        let window = page.window.clone();
        let elements = page.parallax.clone();
        let factor = self.config.parallax_factor;
        let handler = Throttled::new(self.config.scroll_throttle(), move || {
            let scroll_y = dom::scroll_y(&window);
            let viewport_h = dom::inner_height(&window);
            for el in &elements {
                let rect = dom::client_rect(el);
                let top = rect.top + scroll_y;
                if let Some(y) = parallax_offset(scroll_y, viewport_h, top, rect.height, factor) {
                    dom::set_style(el, "transform", &styles::parallax_transform(y));
                }
            }
        });
        let on_scroll = handler.clone();
        self.listeners
            .push(EventListener::new(&page.window, "scroll", move |_| on_scroll.call())?);
        self.parallax = Some(handler);
        Ok(())
    }
}

impl Component for ScrollAnimations {
    fn name(&self) -> &'static str {
        "scroll_animations"
    }

    fn attach(&mut self, page: &PageElements) -> Result<(), SiteError> {
        if !VisibilityObserver::supported(&page.window) {
            tracing::warn!(target: targets::SCROLL, "IntersectionObserver unavailable; reveals skipped");
        } else {
            self.reveal_observer(page)?;
            self.count_up_observer(page)?;
        }
        self.parallax(page)
    }

    fn detach(&mut self) {
        self.observers.clear();
        self.listeners.clear();
        if let Some(parallax) = self.parallax.take() {
            parallax.cancel();
        }
        self.count_ups.clear();
        self.card_timers.borrow_mut().clear();
    }
}
