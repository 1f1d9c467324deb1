#![forbid(unsafe_code)]

//! WASM frontend for the Limelight landing page.
//!
//! The page loads this crate as an ES module. `#[wasm_bindgen(start)]` installs
//! the panic hook and the console tracing subscriber; the page script then
//! builds a [`LimelightSite`] and calls `start()`, which attaches:
//! - the loading screen and hero entrance,
//! - navigation (sticky header, mobile menu, smooth scroll, active link),
//! - scroll-driven reveals, count-ups and parallax,
//! - pointer and touch effects,
//! - performance helpers (lazy images, preload hints, reduced motion),
//! - the decorative audio visualizer and the key-sequence easter egg.
//!
//! Every decision is made by `limelight-core`; the modules here only read the
//! DOM, arm browser timers and write styles back.

pub mod logging;
pub mod report;
pub mod styles;

#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod scheduling;
#[cfg(target_arch = "wasm32")]
mod site;

#[cfg(target_arch = "wasm32")]
pub use site::LimelightSite;

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct LimelightSite {
    config: limelight_core::SiteConfig,
}

#[cfg(not(target_arch = "wasm32"))]
impl LimelightSite {
    /// Parse host options the same way the browser build does, falling back
    /// to defaults on error.
    pub fn new(options_json: Option<String>) -> Self {
        let config = options_json
            .as_deref()
            .and_then(|json| limelight_core::SiteConfig::from_json(json).ok())
            .unwrap_or_default();
        Self { config }
    }

    pub fn config(&self) -> &limelight_core::SiteConfig {
        &self.config
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn stub_parses_options_and_falls_back() {
        let site = LimelightSite::new(Some(r#"{ "visualizer_bars": 8 }"#.to_string()));
        assert_eq!(site.config().visualizer_bars, 8);

        let site = LimelightSite::new(Some("{ broken".to_string()));
        assert_eq!(site.config(), &limelight_core::SiteConfig::default());
    }
}
