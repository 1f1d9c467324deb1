use std::rc::Rc;

use limelight_core::logging::targets;
use limelight_core::visualizer::{BarField, bar_height_css};
use limelight_core::{SiteConfig, SiteError};
use web_sys::HtmlElement;

use super::Component;
use crate::dom::{self, PageElements, selectors};
use crate::scheduling::Interval;
use crate::styles;

/// Decorative bar field over the music section. No audio is analysed.
pub struct AudioVisualizer {
    config: Rc<SiteConfig>,
    overlay: Option<HtmlElement>,
    ticker: Option<Interval>,
}

impl AudioVisualizer {
    pub fn new(config: Rc<SiteConfig>) -> Self {
        Self {
            config,
            overlay: None,
            ticker: None,
        }
    }
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

impl Component for AudioVisualizer {
    fn name(&self) -> &'static str {
        "audio_visualizer"
    }

    fn attach(&mut self, page: &PageElements) -> Result<(), SiteError> {
        let section = dom::require(&page.music, selectors::MUSIC)?;

        let overlay = page.create("div")?;
        overlay.set_class_name("audio-visualizer");
        dom::set_css_text(&overlay, styles::VISUALIZER_CSS);

        let mut bars = Vec::with_capacity(self.config.visualizer_bars);
        for _ in 0..self.config.visualizer_bars {
            let bar = page.create("div")?;
            dom::set_css_text(&bar, styles::VISUALIZER_BAR_CSS);
            overlay.append_child(&bar).map_err(dom::js_error)?;
            bars.push(bar);
        }
        dom::set_style(section, "position", "relative");
        section.append_child(&overlay).map_err(dom::js_error)?;
        self.overlay = Some(overlay);

        let mut field = BarField::new(
            bars.len(),
            self.config.visualizer_min_height_px,
            self.config.visualizer_height_range_px,
            random_seed(),
        );
        self.ticker = Some(Interval::new(self.config.visualizer_interval(), move || {
            for (bar, height) in bars.iter().zip(field.tick()) {
                dom::set_style(bar, "height", &bar_height_css(*height));
            }
        })?);
        tracing::debug!(target: targets::VISUALIZER, bars = self.config.visualizer_bars, "visualizer running");
        Ok(())
    }

    fn detach(&mut self) {
        self.ticker = None;
        if let Some(overlay) = self.overlay.take() {
            overlay.remove();
        }
    }
}
