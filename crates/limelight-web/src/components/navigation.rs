use std::cell::RefCell;
use std::rc::Rc;

use limelight_core::animation::ScrollTween;
use limelight_core::logging::targets;
use limelight_core::navigation::{
    ActiveLinkTracker, LayoutWatch, MobileMenu, fragment_target, header_scrolled,
};
use limelight_core::{SiteConfig, SiteError};
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, Node, Window};

use super::Component;
use crate::dom::{self, PageElements, selectors};
use crate::events::EventListener;
use crate::scheduling::{AnimationFrame, Debounced, Frame, Throttled};

/// Sticky header, mobile menu, smooth in-page scrolling and active-link
/// highlighting.
pub struct Navigation {
    config: Rc<SiteConfig>,
    listeners: Vec<EventListener>,
    throttled: Vec<Throttled>,
    resize: Option<Debounced>,
    scroll: Rc<RefCell<Option<AnimationFrame>>>,
}

impl Navigation {
    pub fn new(config: Rc<SiteConfig>) -> Self {
        Self {
            config,
            listeners: Vec::new(),
            throttled: Vec::new(),
            resize: None,
            scroll: Rc::new(RefCell::new(None)),
        }
    }

    fn header_effect(&mut self, page: &PageElements) -> Result<(), SiteError> {
        let nav = dom::require(&page.nav, selectors::NAV)?.clone();
        let window = page.window.clone();
        let threshold = self.config.header_scrolled_threshold_px;
        let handler = Throttled::new(self.config.scroll_throttle(), move || {
            let scrolled = header_scrolled(dom::scroll_y(&window), threshold);
            dom::toggle_class(&nav, "scrolled", scrolled);
        });
        let on_scroll = handler.clone();
        self.listeners
            .push(EventListener::new(&page.window, "scroll", move |_| on_scroll.call())?);
        self.throttled.push(handler);
        Ok(())
    }

    fn mobile_menu(&mut self, page: &PageElements) -> Result<(), SiteError> {
        let toggle = dom::require(&page.nav_toggle, selectors::NAV_TOGGLE)?.clone();
        let menu = MenuView {
            state: Rc::new(RefCell::new(MobileMenu::default())),
            toggle: toggle.clone(),
            menu: page.nav_menu.clone(),
            body: page.body.clone(),
        };

        let view = menu.clone();
        self.listeners.push(EventListener::new(&toggle, "click", move |_| {
            let open = view.state.borrow_mut().toggle();
            tracing::debug!(target: targets::NAVIGATION, open, "menu toggled");
            view.render();
        })?);

        for link in &page.nav_links {
            let view = menu.clone();
            self.listeners
                .push(EventListener::new(link, "click", move |_| view.close())?);
        }

        match &page.nav {
            Some(nav) => {
                let nav: Node = nav.clone().into();
                let view = menu.clone();
                self.listeners.push(EventListener::new(
                    &page.document,
                    "click",
                    move |event: Event| {
                        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
                        if !nav.contains(target.as_ref()) {
                            view.close();
                        }
                    },
                )?);
            }
            None => tracing::warn!(
                target: targets::NAVIGATION,
                "no #nav; outside clicks will not close the menu"
            ),
        }

        self.resize_watch(page, menu);
        Ok(())
    }

    /// Leaving the mobile layout with the menu open would leave the page
    /// scroll-locked, so close it.
    fn resize_watch(&mut self, page: &PageElements, menu: MenuView) {
        let window = page.window.clone();
        let mut layout = LayoutWatch::new(
            dom::inner_width(&window),
            self.config.mobile_breakpoint_px,
        );
        let handler = Debounced::new(self.config.resize_debounce(), move || {
            let left_mobile = layout.resize(dom::inner_width(&window));
            let closed = menu.state.borrow_mut().close_on_desktop(left_mobile);
            if closed {
                menu.render();
            }
        });
        let on_resize = handler.clone();
        match EventListener::new(&page.window, "resize", move |_| on_resize.call()) {
            Ok(listener) => {
                self.listeners.push(listener);
                self.resize = Some(handler);
            }
            Err(err) => tracing::warn!(target: targets::NAVIGATION, %err, "resize watch unavailable"),
        }
    }

    fn smooth_scrolling(&mut self, page: &PageElements) -> Result<(), SiteError> {
        for link in &page.nav_links {
            let href = link.get_attribute("href").unwrap_or_default();
            let window = page.window.clone();
            let document = page.document.clone();
            let slot = Rc::clone(&self.scroll);
            let config = Rc::clone(&self.config);
            self.listeners
                .push(EventListener::new(link, "click", move |event: Event| {
                    event.prevent_default();
                    let Some(section) = section_for(&document, &href) else {
                        tracing::debug!(target: targets::NAVIGATION, href = %href, "link target not found");
                        return;
                    };
                    let target = f64::from(section.offset_top()) - config.scroll_offset_px;
                    // Replacing the slot cancels a scroll already in flight.
                    *slot.borrow_mut() = Some(scroll_to(&window, target, &config));
                })?);
        }
        Ok(())
    }

    fn active_link(&mut self, page: &PageElements) -> Result<(), SiteError> {
        if page.sections.is_empty() {
            return Err(SiteError::missing(selectors::SECTIONS));
        }
        let window = page.window.clone();
        let sections = page.sections.clone();
        let links = page.nav_links.clone();
        let marker_offset = self.config.active_link_marker_offset();
        let mut tracker = ActiveLinkTracker::new();
        let handler = Throttled::new(self.config.active_link_throttle(), move || {
            let spans = dom::section_spans(&sections);
            let marker = dom::scroll_y(&window) + marker_offset;
            let Some(id) = tracker.update(marker, &spans) else {
                return;
            };
            let wanted = format!("#{id}");
            for link in &links {
                let is_target = link.get_attribute("href").as_deref() == Some(wanted.as_str());
                dom::toggle_class(link, "active", is_target);
            }
        });
        let on_scroll = handler.clone();
        self.listeners
            .push(EventListener::new(&page.window, "scroll", move |_| on_scroll.call())?);
        self.throttled.push(handler);
        Ok(())
    }
}

fn section_for(document: &Document, href: &str) -> Option<HtmlElement> {
    let id = fragment_target(href)?;
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn scroll_to(window: &Window, target: f64, config: &SiteConfig) -> AnimationFrame {
    let window = window.clone();
    let mut tween = ScrollTween::new(
        dom::scroll_y(&window),
        target,
        config.smooth_scroll_duration(),
    );
    AnimationFrame::start(move |timestamp| {
        let frame = tween.sample(timestamp);
        window.scroll_to_with_x_and_y(0.0, frame.position);
        if frame.done { Frame::Done } else { Frame::Continue }
    })
}

/// Menu state plus the elements that mirror it.
#[derive(Clone)]
struct MenuView {
    state: Rc<RefCell<MobileMenu>>,
    toggle: HtmlElement,
    menu: Option<HtmlElement>,
    body: HtmlElement,
}

impl MenuView {
    fn render(&self) {
        let state = self.state.borrow();
        dom::toggle_class(&self.toggle, "active", state.is_open());
        if let Some(menu) = &self.menu {
            dom::toggle_class(menu, "active", state.is_open());
        }
        dom::set_style(&self.body, "overflow", state.body_overflow().as_css());
    }

    fn close(&self) {
        self.state.borrow_mut().close();
        self.render();
    }
}

impl Component for Navigation {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn attach(&mut self, page: &PageElements) -> Result<(), SiteError> {
        // Each feature degrades on its own; report the first gap.
        let results = [
            self.header_effect(page),
            self.mobile_menu(page),
            self.smooth_scrolling(page),
            self.active_link(page),
        ];
        let mut first_err = None;
        for err in results.into_iter().filter_map(Result::err) {
            tracing::warn!(target: targets::NAVIGATION, %err, "navigation feature skipped");
            first_err.get_or_insert(err);
        }
        first_err.map_or(Ok(()), Err)
    }

    fn detach(&mut self) {
        self.listeners.clear();
        for handler in self.throttled.drain(..) {
            handler.cancel();
        }
        if let Some(resize) = self.resize.take() {
            resize.cancel();
        }
        let _ = self.scroll.borrow_mut().take();
    }
}
