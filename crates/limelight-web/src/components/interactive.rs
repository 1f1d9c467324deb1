use std::cell::RefCell;
use std::rc::{Rc, Weak};

use limelight_core::geometry::{Point, RippleGeometry, magnetic_hover, magnetic_offset};
use limelight_core::glow::{GlowEnter, GlowState};
use limelight_core::logging::targets;
use limelight_core::{SiteConfig, SiteError};
use web_sys::{HtmlElement, MouseEvent};

use super::Component;
use crate::dom::{self, PageElements, selectors};
use crate::events::EventListener;
use crate::scheduling::Timeout;
use crate::styles;

fn pointer(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

/// Glow overlay attached to one card.
#[derive(Default)]
struct Glow {
    state: GlowState,
    overlay: Option<HtmlElement>,
    fade_in: Option<Timeout>,
    removal: Option<Timeout>,
}

/// Ripples, magnetic hover, card glow and touch feedback.
pub struct InteractiveEffects {
    config: Rc<SiteConfig>,
    listeners: Vec<EventListener>,
    glows: Vec<Rc<RefCell<Glow>>>,
}

impl InteractiveEffects {
    pub fn new(config: Rc<SiteConfig>) -> Self {
        Self {
            config,
            listeners: Vec::new(),
            glows: Vec::new(),
        }
    }

    fn buttons(&mut self, page: &PageElements) -> Result<(), SiteError> {
        if page.buttons.is_empty() {
            return Err(SiteError::missing(selectors::BUTTONS));
        }
        for button in &page.buttons {
            let host = button.clone();
            let document = page.document.clone();
            let duration_ms = self.config.ripple_duration_ms;
            let duration = self.config.ripple_duration();
            self.listeners.push(EventListener::typed(
                button,
                "click",
                move |event: MouseEvent| {
                    let ripple = RippleGeometry::new(dom::client_rect(&host), pointer(&event));
                    let Ok(span) = document.create_element("span") else {
                        return;
                    };
                    let _ = span.set_attribute("style", &styles::ripple_css(&ripple, duration_ms));
                    dom::set_style(&host, "position", "relative");
                    dom::set_style(&host, "overflow", "hidden");
                    if host.append_child(&span).is_ok() {
                        Timeout::detached(duration, move || span.remove());
                    }
                },
            )?);

            let host = button.clone();
            let window = page.window.clone();
            let strength = self.config.button_magnet_strength;
            let breakpoint = self.config.mobile_breakpoint_px;
            self.listeners.push(EventListener::typed(
                button,
                "mousemove",
                move |event: MouseEvent| {
                    let offset = magnetic_hover(
                        dom::client_rect(&host),
                        pointer(&event),
                        strength,
                        dom::inner_width(&window),
                        breakpoint,
                    );
                    if let Some(offset) = offset {
                        dom::set_style(&host, "transform", &styles::magnetic_transform(offset, 1.05));
                    }
                },
            )?);

            let host = button.clone();
            self.listeners.push(EventListener::new(button, "mouseleave", move |_| {
                dom::set_style(&host, "transform", styles::BUTTON_REST_TRANSFORM);
            })?);
        }
        Ok(())
    }

    fn magnetic_images(&mut self, page: &PageElements) -> Result<(), SiteError> {
        if dom::is_mobile(&page.window, self.config.mobile_breakpoint_px) {
            return Ok(());
        }
        let strength = self.config.image_magnet_strength;
        for image in &page.magnetic_images {
            let host = image.clone();
            self.listeners.push(EventListener::typed(
                image,
                "mousemove",
                move |event: MouseEvent| {
                    let offset = magnetic_offset(dom::client_rect(&host), pointer(&event), strength);
                    dom::set_style(&host, "transform", &styles::magnetic_transform(offset, 1.02));
                },
            )?);
            let host = image.clone();
            self.listeners.push(EventListener::new(image, "mouseleave", move |_| {
                dom::set_style(&host, "transform", styles::IMAGE_REST_TRANSFORM);
            })?);
        }
        Ok(())
    }

    fn card_glow(&mut self, page: &PageElements) -> Result<(), SiteError> {
        for card in &page.glow_cards {
            let glow = Rc::new(RefCell::new(Glow::default()));

            let host = card.clone();
            let state = Rc::downgrade(&glow);
            let config = Rc::clone(&self.config);
            let document = page.document.clone();
            self.listeners.push(EventListener::new(card, "mouseenter", move |_| {
                if let Some(state) = state.upgrade() {
                    glow_in(&state, &host, &document, &config);
                }
            })?);

            let state = Rc::downgrade(&glow);
            let fade_out = self.config.glow_fade_out();
            self.listeners.push(EventListener::new(card, "mouseleave", move |_| {
                if let Some(state) = state.upgrade() {
                    glow_out(&state, fade_out);
                }
            })?);

            self.glows.push(glow);
        }
        Ok(())
    }

    fn touch_feedback(&mut self, page: &PageElements) -> Result<(), SiteError> {
        if !dom::is_mobile(&page.window, self.config.mobile_breakpoint_px) {
            return Ok(());
        }
        for el in &page.touch_targets {
            let host = el.clone();
            self.listeners.push(EventListener::new(el, "touchstart", move |_| {
                dom::add_class(&host, "touch-active");
                dom::set_style(&host, "transform", styles::TOUCH_PRESSED_TRANSFORM);
            })?);
            let host = el.clone();
            self.listeners.push(EventListener::new(el, "touchend", move |_| {
                dom::remove_class(&host, "touch-active");
                dom::set_style(&host, "transform", styles::TOUCH_RELEASED_TRANSFORM);
            })?);
        }
        Ok(())
    }
}

fn glow_in(
    state: &Rc<RefCell<Glow>>,
    host: &HtmlElement,
    document: &web_sys::Document,
    config: &SiteConfig,
) {
    let mut glow = state.borrow_mut();
    // Dropping the removal timer cancels it; the state already ignores it.
    glow.removal = None;
    let overlay = match (glow.state.enter(), glow.overlay.clone()) {
        (GlowEnter::Reuse, Some(overlay)) => overlay,
        (_, stale) => {
            if let Some(stale) = stale {
                stale.remove();
            }
            match attach_glow(document, host, config) {
                Ok(overlay) => {
                    glow.overlay = Some(overlay.clone());
                    overlay
                }
                Err(err) => {
                    glow.overlay = None;
                    glow.state.discard();
                    tracing::debug!(target: targets::INTERACTIVE, %err, "glow not attached");
                    return;
                }
            }
        }
    };
    let fade = Timeout::new(config.glow_fade_in_delay(), move || {
        dom::set_style(&overlay, "opacity", "1");
    });
    match fade {
        Ok(timer) => glow.fade_in = Some(timer),
        Err(err) => tracing::debug!(target: targets::INTERACTIVE, %err, "glow fade-in not armed"),
    }
}

fn attach_glow(
    document: &web_sys::Document,
    host: &HtmlElement,
    config: &SiteConfig,
) -> Result<HtmlElement, SiteError> {
    let overlay = dom::create(document, "div")?;
    overlay.set_class_name("hover-glow");
    dom::set_css_text(&overlay, &styles::glow_css(config.glow_fade_out_ms));
    dom::set_style(host, "position", "relative");
    host.append_child(&overlay).map_err(dom::js_error)?;
    Ok(overlay)
}

fn glow_out(state: &Rc<RefCell<Glow>>, fade_out: std::time::Duration) {
    let mut glow = state.borrow_mut();
    let Some(ticket) = glow.state.leave() else {
        return;
    };
    let Some(overlay) = glow.overlay.clone() else {
        glow.state.discard();
        return;
    };
    glow.fade_in = None;
    dom::set_style(&overlay, "opacity", "0");

    let weak: Weak<RefCell<Glow>> = Rc::downgrade(state);
    let removal = Timeout::new(fade_out, move || {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let mut glow = state.borrow_mut();
        if glow.state.removed(ticket) {
            if let Some(overlay) = glow.overlay.take() {
                overlay.remove();
            }
        }
        glow.removal = None;
    });
    match removal {
        Ok(timer) => glow.removal = Some(timer),
        Err(err) => {
            tracing::debug!(target: targets::INTERACTIVE, %err, "glow removal not armed; removing now");
            glow.state.removed(ticket);
            glow.overlay = None;
            overlay.remove();
        }
    }
}

impl Component for InteractiveEffects {
    fn name(&self) -> &'static str {
        "interactive_effects"
    }

    fn attach(&mut self, page: &PageElements) -> Result<(), SiteError> {
        let results = [
            self.buttons(page),
            self.card_glow(page),
            self.magnetic_images(page),
            self.touch_feedback(page),
        ];
        let mut first_err = None;
        for err in results.into_iter().filter_map(Result::err) {
            tracing::warn!(target: targets::INTERACTIVE, %err, "effect skipped");
            first_err.get_or_insert(err);
        }
        first_err.map_or(Ok(()), Err)
    }

    fn detach(&mut self) {
        self.listeners.clear();
        for glow in self.glows.drain(..) {
            let mut glow = glow.borrow_mut();
            glow.fade_in = None;
            glow.removal = None;
            glow.state.discard();
            if let Some(overlay) = glow.overlay.take() {
                overlay.remove();
            }
        }
    }
}
