//! `wasm-bindgen` entry points.

use std::rc::Rc;
use std::time::Duration;

use limelight_core::logging::targets;
use limelight_core::{Components, SiteConfig, SiteError};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::components::{
    AudioVisualizer, Component, EasterEgg, InteractiveEffects, LoadingScreen, Navigation,
    PerformanceOptimizer, ScrollAnimations,
};
use crate::dom::{self, PageElements};
use crate::events::EventListener;
use crate::logging;
use crate::report::AttachReport;
use crate::scheduling::Timeout;
use crate::styles;

const WELCOME_DELAY: Duration = Duration::from_millis(3000);

/// Module start: panic hook and console logging.
#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "panic-hook")]
    console_error_panic_hook::set_once();
    logging::init(tracing::Level::DEBUG);
}

fn to_js(err: SiteError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// The landing page behaviour layer.
///
/// ```js
/// const site = new LimelightSite(JSON.stringify({ visualizer_bars: 32 }));
/// const report = JSON.parse(site.start());
/// ```
#[wasm_bindgen]
pub struct LimelightSite {
    config: Rc<SiteConfig>,
    page: Option<PageElements>,
    components: Vec<Box<dyn Component>>,
    stylesheet: Option<HtmlElement>,
    on_load: Option<EventListener>,
    welcome: Option<Timeout>,
}

#[wasm_bindgen]
impl LimelightSite {
    /// Options are a JSON object of `SiteConfig` fields; anything invalid
    /// falls back to the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: Option<String>) -> Self {
        let config = match options_json.as_deref() {
            None => SiteConfig::default(),
            Some(json) => SiteConfig::from_json(json).unwrap_or_else(|err| {
                tracing::warn!(target: targets::SITE, %err, "ignoring site options");
                SiteConfig::default()
            }),
        };
        Self {
            config: Rc::new(config),
            page: None,
            components: Vec::new(),
            stylesheet: None,
            on_load: None,
            welcome: None,
        }
    }

    /// Attach every enabled component. Returns the attach report as JSON.
    pub fn start(&mut self) -> Result<String, JsValue> {
        if self.page.is_some() {
            tracing::debug!(target: targets::SITE, "restarting");
            self.destroy();
        }
        tracing::info!(target: targets::SITE, "website loading");

        let window = dom::window().map_err(to_js)?;
        let page = PageElements::resolve(window).map_err(to_js)?;
        self.inject_stylesheet(&page);

        let mut report = AttachReport::default();
        for (flag, mut component) in self.build_components() {
            if !self.config.enabled(flag) {
                report.skip(component.name());
                continue;
            }
            let result = component.attach(&page);
            if let Err(err) = &result {
                tracing::warn!(
                    target: targets::SITE,
                    component = component.name(),
                    %err,
                    "component degraded"
                );
            }
            report.record(component.name(), result);
            self.components.push(component);
        }

        tracing::info!(
            target: targets::SITE,
            attached = report.attached.len(),
            degraded = report.degraded.len(),
            skipped = report.skipped.len(),
            "website initialized"
        );
        self.schedule_welcome(&page);
        self.page = Some(page);
        Ok(report.to_json())
    }

    /// Detach every component and remove the injected stylesheet.
    pub fn destroy(&mut self) {
        for component in &mut self.components {
            component.detach();
        }
        self.components.clear();
        self.on_load = None;
        self.welcome = None;
        if let Some(sheet) = self.stylesheet.take() {
            sheet.remove();
        }
        self.page = None;
        tracing::debug!(target: targets::SITE, "detached");
    }

    /// Whether the viewport is below the mobile breakpoint right now.
    /// Measures the live width and changes no state.
    #[wasm_bindgen(js_name = isMobile)]
    pub fn is_mobile(&self) -> bool {
        let window = match &self.page {
            Some(page) => Some(page.window.clone()),
            None => web_sys::window(),
        };
        window.is_some_and(|w| dom::is_mobile(&w, self.config.mobile_breakpoint_px))
    }
}

impl LimelightSite {
    fn build_components(&self) -> Vec<(Components, Box<dyn Component>)> {
        fn boxed(flag: Components, c: impl Component + 'static) -> (Components, Box<dyn Component>) {
            (flag, Box::new(c))
        }
        let config = &self.config;
        vec![
            boxed(Components::LOADING, LoadingScreen::new(Rc::clone(config))),
            boxed(Components::NAVIGATION, Navigation::new(Rc::clone(config))),
            boxed(Components::SCROLL, ScrollAnimations::new(Rc::clone(config))),
            boxed(Components::INTERACTIVE, InteractiveEffects::new(Rc::clone(config))),
            boxed(Components::PERFORMANCE, PerformanceOptimizer::new(Rc::clone(config))),
            boxed(Components::VISUALIZER, AudioVisualizer::new(Rc::clone(config))),
            boxed(Components::EASTER_EGG, EasterEgg::new(Rc::clone(config))),
        ]
    }

    fn inject_stylesheet(&mut self, page: &PageElements) {
        let sheet = match page.create("style") {
            Ok(sheet) => sheet,
            Err(err) => {
                tracing::warn!(target: targets::SITE, %err, "stylesheet not injected");
                return;
            }
        };
        sheet.set_text_content(Some(styles::GLOBAL_STYLESHEET));
        let parent = page.head.as_ref().unwrap_or(&page.body);
        match parent.append_child(&sheet) {
            Ok(_) => self.stylesheet = Some(sheet),
            Err(err) => tracing::warn!(target: targets::SITE, err = ?err, "stylesheet not injected"),
        }
    }

    fn schedule_welcome(&mut self, page: &PageElements) {
        if page.document.ready_state() == "complete" {
            self.welcome = Timeout::new(WELCOME_DELAY, welcome).ok();
            return;
        }
        let listener = EventListener::new(&page.window, "load", |_| {
            Timeout::detached(WELCOME_DELAY, welcome);
        });
        match listener {
            Ok(listener) => self.on_load = Some(listener),
            Err(err) => tracing::debug!(target: targets::SITE, %err, "no load listener"),
        }
    }
}

fn welcome() {
    tracing::info!(target: targets::SITE, "Welcome to the realest website in Lagos!");
    tracing::info!(target: targets::SITE, "Don't forget to stream Ajé's music!");
}
