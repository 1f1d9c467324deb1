use std::cell::RefCell;
use std::rc::{Rc, Weak};

use limelight_core::easter_egg::{EggAction, EggActivation};
use limelight_core::key_sequence::KeySequenceDetector;
use limelight_core::logging::targets;
use limelight_core::{SiteConfig, SiteError};
use web_sys::{Document, HtmlElement, KeyboardEvent};

use super::Component;
use crate::dom::{self, PageElements};
use crate::events::EventListener;
use crate::scheduling::Timeout;
use crate::styles;

/// Elements added while the easter egg is showing.
struct Overlay {
    style: HtmlElement,
    message: HtmlElement,
}

impl Overlay {
    fn remove(self) {
        self.message.remove();
        self.style.remove();
    }
}

#[derive(Default)]
struct EggState {
    detector: KeySequenceDetector,
    activation: EggActivation,
    overlay: Option<Overlay>,
    revert: Option<Timeout>,
}

#[derive(Clone)]
struct EggPage {
    document: Document,
    body: HtmlElement,
    head: Option<HtmlElement>,
}

/// Key-sequence easter egg: hue-rotating page and a banner for a few seconds.
pub struct EasterEgg {
    config: Rc<SiteConfig>,
    state: Rc<RefCell<EggState>>,
    keydown: Option<EventListener>,
    body: Option<HtmlElement>,
}

impl EasterEgg {
    pub fn new(config: Rc<SiteConfig>) -> Self {
        Self {
            config,
            state: Rc::new(RefCell::new(EggState::default())),
            keydown: None,
            body: None,
        }
    }
}

fn show(page: &EggPage, config: &SiteConfig) -> Result<Overlay, SiteError> {
    let style = dom::create(&page.document, "style")?;
    style.set_text_content(Some(styles::RAINBOW_KEYFRAMES));
    let message = dom::create(&page.document, "div")?;
    message.set_text_content(Some(&config.easter_egg_message));
    dom::set_css_text(&message, styles::EASTER_EGG_MESSAGE_CSS);

    let style_parent = page.head.as_ref().unwrap_or(&page.body);
    style_parent.append_child(&style).map_err(dom::js_error)?;
    let overlay = Overlay { style, message };
    if let Err(err) = page.body.append_child(&overlay.message) {
        overlay.remove();
        return Err(dom::js_error(err));
    }
    dom::set_style(&page.body, "animation", styles::RAINBOW_ANIMATION);
    Ok(overlay)
}

fn hide(body: &HtmlElement, overlay: Option<Overlay>) {
    dom::set_style(body, "animation", "");
    if let Some(overlay) = overlay {
        overlay.remove();
    }
    tracing::debug!(target: targets::EASTER_EGG, "easter egg reverted");
}

fn activate(
    state: &Rc<RefCell<EggState>>,
    page: &EggPage,
    config: &SiteConfig,
) -> Result<(), SiteError> {
    let mut egg = state.borrow_mut();
    // Arm the revert first: if that fails nothing has changed on screen.
    let generation = egg.activation.upcoming();
    let weak: Weak<RefCell<EggState>> = Rc::downgrade(state);
    let body = page.body.clone();
    let timer = Timeout::new(config.easter_egg_duration(), move || {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let mut egg = state.borrow_mut();
        if egg.activation.expire(generation) {
            let overlay = egg.overlay.take();
            egg.revert = None;
            hide(&body, overlay);
        }
    })?;

    if egg.activation.activate() == EggAction::Show {
        match show(page, config) {
            Ok(overlay) => egg.overlay = Some(overlay),
            Err(err) => {
                egg.activation.dismiss();
                return Err(err);
            }
        }
    }
    // Replacing the handle cancels the previous revert.
    egg.revert = Some(timer);
    Ok(())
}

impl Component for EasterEgg {
    fn name(&self) -> &'static str {
        "easter_egg"
    }

    fn attach(&mut self, page: &PageElements) -> Result<(), SiteError> {
        let state = Rc::clone(&self.state);
        let config = Rc::clone(&self.config);
        let egg_page = EggPage {
            document: page.document.clone(),
            body: page.body.clone(),
            head: page.head.clone(),
        };
        self.body = Some(page.body.clone());
        self.keydown = Some(EventListener::typed(
            &page.document,
            "keydown",
            move |event: KeyboardEvent| {
                let matched = state.borrow_mut().detector.feed(event.key_code());
                if matched {
                    if let Err(err) = activate(&state, &egg_page, &config) {
                        tracing::warn!(target: targets::EASTER_EGG, %err, "activation failed");
                    }
                }
            },
        )?);
        Ok(())
    }

    fn detach(&mut self) {
        self.keydown = None;
        let mut egg = self.state.borrow_mut();
        egg.detector.reset();
        egg.revert = None;
        let was_showing = egg.activation.dismiss();
        let overlay = egg.overlay.take();
        if let (true, Some(body)) = (was_showing, &self.body) {
            hide(body, overlay);
        }
    }
}
