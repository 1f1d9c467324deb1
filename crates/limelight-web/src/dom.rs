//! DOM access helpers and the page element snapshot.

use limelight_core::SiteError;
use limelight_core::geometry::{self, Rect, SectionSpan};
use limelight_core::logging::targets;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, Window};

pub mod selectors {
    pub const NAV: &str = "#nav";
    pub const NAV_TOGGLE: &str = "#nav-toggle";
    pub const NAV_MENU: &str = "#nav-menu";
    pub const NAV_LINKS: &str = ".nav-link";
    pub const SECTIONS: &str = "section[id]";
    pub const LOADING_SCREEN: &str = "#loading-screen";
    pub const LOADING_LOGO: &str = ".loading-logo";
    pub const LOADING_TEXT: &str = ".loading-text";
    pub const HERO: &str = ".hero-badge, .hero-title, .hero-description, .hero-buttons";
    pub const REVEAL: &str = ".stat-card, .platform-card, .concert-info, .concert-visual, \
                              .about-visual, .about-info, .social-link, .feature";
    pub const STAT_NUMBER: &str = ".stat-number";
    pub const PARALLAX: &str = ".hero-image-container, .concert-visual";
    pub const BUTTONS: &str = ".btn";
    pub const GLOW_CARDS: &str = ".platform-card, .stat-card, .social-link";
    pub const MAGNETIC_IMAGES: &str = ".hero-image, .concert-image";
    pub const TOUCH_TARGETS: &str = ".btn, .platform-card, .social-link";
    pub const LAZY_IMAGES: &str = "img[loading=\"lazy\"]";
    pub const ANIMATED: &str = "[class*=\"animation\"], [class*=\"pulse\"], [class*=\"float\"]";
    pub const MUSIC: &str = ".music";
}

/// Render a thrown JS value as a [`SiteError`].
pub fn js_error(value: JsValue) -> SiteError {
    let message = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"));
    SiteError::Js(message)
}

pub fn window() -> Result<Window, SiteError> {
    web_sys::window().ok_or(SiteError::missing("window"))
}

/// Elements matching `selector` under `document`, skipping non-HTML nodes.
pub fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        tracing::warn!(target: targets::SITE, selector, "invalid selector");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn query(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = el.style().set_property(property, value) {
        tracing::trace!(target: targets::SITE, property, error = ?err, "set_property failed");
    }
}

pub fn set_css_text(el: &HtmlElement, css: &str) {
    el.style().set_css_text(css);
}

pub fn add_class(el: &Element, class: &str) {
    let _ = el.class_list().add_1(class);
}

pub fn remove_class(el: &Element, class: &str) {
    let _ = el.class_list().remove_1(class);
}

pub fn toggle_class(el: &Element, class: &str, on: bool) {
    if on {
        add_class(el, class);
    } else {
        remove_class(el, class);
    }
}

pub fn client_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn inner_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn inner_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// Document-space span of every `section[id]`, measured now.
pub fn section_spans(sections: &[HtmlElement]) -> Vec<SectionSpan> {
    sections
        .iter()
        .map(|s| {
            SectionSpan::new(
                s.id(),
                f64::from(s.offset_top()),
                f64::from(s.offset_height()),
            )
        })
        .collect()
}

/// Index of `el` among its parent's element children.
pub fn sibling_index(el: &Element) -> usize {
    let mut index = 0;
    let mut cursor = el.previous_element_sibling();
    while let Some(prev) = cursor {
        index += 1;
        cursor = prev.previous_element_sibling();
    }
    index
}

/// Whether the viewport is in its mobile class right now. Reads the live
/// width every call; nothing is cached.
pub fn is_mobile(window: &Window, breakpoint: f64) -> bool {
    geometry::is_mobile(inner_width(window), breakpoint)
}

/// Create an element and cast it to `HtmlElement`.
pub fn create(document: &Document, tag: &str) -> Result<HtmlElement, SiteError> {
    document
        .create_element(tag)
        .map_err(js_error)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| SiteError::Js(format!("<{tag}> is not an HTMLElement")))
}

/// Every element the components touch, resolved once at startup.
///
/// Optional elements that are missing are logged here; the owning component
/// turns them into [`SiteError::MissingElement`] when it needs them.
pub struct PageElements {
    pub window: Window,
    pub document: Document,
    pub body: HtmlElement,
    pub head: Option<HtmlElement>,
    pub root: Option<Element>,

    pub loading_screen: Option<HtmlElement>,
    pub loading_logo: Option<HtmlElement>,
    pub loading_text: Option<HtmlElement>,
    pub hero: Vec<HtmlElement>,

    pub nav: Option<HtmlElement>,
    pub nav_toggle: Option<HtmlElement>,
    pub nav_menu: Option<HtmlElement>,
    pub nav_links: Vec<HtmlElement>,
    pub sections: Vec<HtmlElement>,

    pub reveal_targets: Vec<HtmlElement>,
    pub stat_numbers: Vec<HtmlElement>,
    pub parallax: Vec<HtmlElement>,

    pub buttons: Vec<HtmlElement>,
    pub glow_cards: Vec<HtmlElement>,
    pub magnetic_images: Vec<HtmlElement>,
    pub touch_targets: Vec<HtmlElement>,

    pub lazy_images: Vec<HtmlImageElement>,
    pub music: Option<HtmlElement>,
}

impl PageElements {
    pub fn resolve(window: Window) -> Result<Self, SiteError> {
        let document = window.document().ok_or(SiteError::missing("document"))?;
        let body = document.body().ok_or(SiteError::missing("body"))?;
        let head = document.head().map(Into::into);
        let root = document.document_element();

        let one = |selector: &'static str| {
            let found = query(&document, selector);
            if found.is_none() {
                tracing::warn!(target: targets::SITE, selector, "element not found");
            }
            found
        };

        let page = Self {
            loading_screen: one(selectors::LOADING_SCREEN),
            loading_logo: one(selectors::LOADING_LOGO),
            loading_text: one(selectors::LOADING_TEXT),
            hero: query_all(&document, selectors::HERO),
            nav: one(selectors::NAV),
            nav_toggle: one(selectors::NAV_TOGGLE),
            nav_menu: one(selectors::NAV_MENU),
            nav_links: query_all(&document, selectors::NAV_LINKS),
            sections: query_all(&document, selectors::SECTIONS),
            reveal_targets: query_all(&document, selectors::REVEAL),
            stat_numbers: query_all(&document, selectors::STAT_NUMBER),
            parallax: query_all(&document, selectors::PARALLAX),
            buttons: query_all(&document, selectors::BUTTONS),
            glow_cards: query_all(&document, selectors::GLOW_CARDS),
            magnetic_images: query_all(&document, selectors::MAGNETIC_IMAGES),
            touch_targets: query_all(&document, selectors::TOUCH_TARGETS),
            lazy_images: query_all(&document, selectors::LAZY_IMAGES)
                .into_iter()
                .filter_map(|el| el.dyn_into::<HtmlImageElement>().ok())
                .collect(),
            music: one(selectors::MUSIC),
            window,
            document,
            body,
            head,
            root,
        };
        tracing::debug!(
            target: targets::SITE,
            sections = page.sections.len(),
            reveal_targets = page.reveal_targets.len(),
            buttons = page.buttons.len(),
            "page elements resolved"
        );
        Ok(page)
    }

    pub fn create(&self, tag: &str) -> Result<HtmlElement, SiteError> {
        create(&self.document, tag)
    }
}

/// Turn an optional element into a hard requirement for one component.
pub fn require<'a>(
    el: &'a Option<HtmlElement>,
    selector: &'static str,
) -> Result<&'a HtmlElement, SiteError> {
    el.as_ref().ok_or(SiteError::missing(selector))
}
