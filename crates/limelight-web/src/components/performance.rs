use std::rc::Rc;

use limelight_core::logging::targets;
use limelight_core::performance::{PlayState, ReducedMotion, lazy_image_source, preload_hints};
use limelight_core::{SiteConfig, SiteError};
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

use super::Component;
use crate::dom::{self, PageElements, selectors};
use crate::events::{EventListener, ObserverOptions, VisibilityObserver};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Lazy images, background-tab animation pausing, preload hints and the
/// reduced-motion class.
pub struct PerformanceOptimizer {
    config: Rc<SiteConfig>,
    lazy_images: Option<VisibilityObserver>,
    visibility: Option<EventListener>,
    reduced_motion: ReducedMotion,
}

impl PerformanceOptimizer {
    pub fn new(config: Rc<SiteConfig>) -> Self {
        Self {
            config,
            lazy_images: None,
            visibility: None,
            reduced_motion: ReducedMotion::default(),
        }
    }

    fn lazy_load(&mut self, page: &PageElements) -> Result<(), SiteError> {
        if !VisibilityObserver::supported(&page.window) {
            tracing::info!(target: targets::PERFORMANCE, "IntersectionObserver unavailable; images load eagerly");
            return Ok(());
        }
        let observer = VisibilityObserver::new(&ObserverOptions::default(), |target, observer| {
            if let Some(img) = target.dyn_ref::<HtmlImageElement>() {
                let data_src = img.get_attribute("data-src");
                let current = img.src();
                img.set_src(lazy_image_source(data_src.as_deref(), &current));
                dom::remove_class(img, "lazy");
            }
            observer.unobserve(&target);
        })?;
        for img in &page.lazy_images {
            observer.observe(img);
        }
        tracing::debug!(target: targets::PERFORMANCE, images = page.lazy_images.len(), "lazy images observed");
        self.lazy_images = Some(observer);
        Ok(())
    }

    fn pause_when_hidden(&mut self, page: &PageElements) -> Result<(), SiteError> {
        let document = page.document.clone();
        self.visibility = Some(EventListener::new(
            &page.document,
            "visibilitychange",
            move |_| {
                let state = PlayState::for_visibility(document.hidden());
                for el in dom::query_all(&document, selectors::ANIMATED) {
                    dom::set_style(&el, "animation-play-state", state.as_css());
                }
                tracing::debug!(target: targets::PERFORMANCE, state = state.as_css(), "animations toggled");
            },
        )?);
        Ok(())
    }

    fn preload(&self, page: &PageElements) -> Result<(), SiteError> {
        let head = page.head.as_ref().ok_or(SiteError::missing("head"))?;
        for hint in preload_hints(&self.config.preload_assets) {
            let link = page.document.create_element("link").map_err(dom::js_error)?;
            link.set_attribute("rel", "preload").map_err(dom::js_error)?;
            link.set_attribute("as", hint.kind).map_err(dom::js_error)?;
            link.set_attribute("href", &hint.href).map_err(dom::js_error)?;
            head.append_child(&link).map_err(dom::js_error)?;
        }
        Ok(())
    }

    fn reduced_motion(&mut self, page: &PageElements) {
        let prefers = page
            .window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .is_some_and(|query| query.matches());
        if self.reduced_motion.observe(prefers) {
            if let Some(root) = &page.root {
                dom::add_class(root, "reduce-motion");
                tracing::info!(target: targets::PERFORMANCE, "reduced motion applied");
            }
        }
    }
}

impl Component for PerformanceOptimizer {
    fn name(&self) -> &'static str {
        "performance"
    }

    fn attach(&mut self, page: &PageElements) -> Result<(), SiteError> {
        self.reduced_motion(page);
        let results = [
            self.lazy_load(page),
            self.pause_when_hidden(page),
            self.preload(page),
        ];
        let mut first_err = None;
        for err in results.into_iter().filter_map(Result::err) {
            tracing::warn!(target: targets::PERFORMANCE, %err, "optimization skipped");
            first_err.get_or_insert(err);
        }
        first_err.map_or(Ok(()), Err)
    }

    fn detach(&mut self) {
        self.lazy_images = None;
        self.visibility = None;
    }
}
