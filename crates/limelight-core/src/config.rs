#![forbid(unsafe_code)]

//! Site configuration.
//!
//! [`SiteConfig::default`] carries the production timings. The host may
//! override any subset by passing a JSON object to the web entry point; absent
//! fields keep their defaults (`#[serde(default)]`).
//!
//! Durations are stored as whole milliseconds so the JSON stays readable;
//! accessor methods hand out [`Duration`]s.

use core::time::Duration;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::SiteError;

bitflags! {
    /// Page components the orchestrator attaches.
    ///
    /// Serialized as `"LOADING | NAVIGATION | ..."` in JSON.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Components: u8 {
        const LOADING     = 1 << 0;
        const NAVIGATION  = 1 << 1;
        const SCROLL      = 1 << 2;
        const INTERACTIVE = 1 << 3;
        const PERFORMANCE = 1 << 4;
        const VISUALIZER  = 1 << 5;
        const EASTER_EGG  = 1 << 6;
    }
}

impl Default for Components {
    fn default() -> Self {
        Self::all()
    }
}

/// The three shared animation speeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSpeeds {
    pub fast_ms: u32,
    pub normal_ms: u32,
    pub slow_ms: u32,
}

impl Default for AnimationSpeeds {
    fn default() -> Self {
        Self {
            fast_ms: 200,
            normal_ms: 400,
            slow_ms: 800,
        }
    }
}

/// Read-only runtime configuration for every component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub animation: AnimationSpeeds,
    pub scroll_offset_px: f64,
    pub mobile_breakpoint_px: f64,

    // Loading screen
    pub loading_duration_ms: u32,
    pub logo_emphasis_at_ms: u32,
    pub loading_text_at_ms: u32,
    pub hero_entrance_delay_ms: u32,
    pub hero_stagger_ms: u32,

    // Navigation
    pub header_scrolled_threshold_px: f64,
    pub scroll_throttle_ms: u32,
    pub active_link_throttle_ms: u32,
    pub active_link_extra_offset_px: f64,
    pub smooth_scroll_duration_ms: u32,
    pub resize_debounce_ms: u32,

    // Scroll animations
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub stat_count_up_ms: u32,
    pub number_count_up_ms: u32,
    pub platform_stagger_ms: u32,
    pub parallax_factor: f64,

    // Interactive effects
    pub ripple_duration_ms: u32,
    pub button_magnet_strength: f64,
    pub image_magnet_strength: f64,
    pub glow_fade_in_delay_ms: u32,
    pub glow_fade_out_ms: u32,

    // Audio visualizer
    pub visualizer_bars: usize,
    pub visualizer_interval_ms: u32,
    pub visualizer_min_height_px: f64,
    pub visualizer_height_range_px: f64,

    // Easter egg
    pub easter_egg_duration_ms: u32,
    pub easter_egg_message: String,

    // Performance
    pub preload_assets: Vec<String>,

    pub components: Components,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            animation: AnimationSpeeds::default(),
            scroll_offset_px: 80.0,
            mobile_breakpoint_px: 768.0,
            loading_duration_ms: 2500,
            logo_emphasis_at_ms: 500,
            loading_text_at_ms: 1000,
            hero_entrance_delay_ms: 500,
            hero_stagger_ms: 200,
            header_scrolled_threshold_px: 50.0,
            scroll_throttle_ms: 16,
            active_link_throttle_ms: 100,
            active_link_extra_offset_px: 100.0,
            smooth_scroll_duration_ms: 800,
            resize_debounce_ms: 150,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -100px 0px".to_string(),
            stat_count_up_ms: 1500,
            number_count_up_ms: 2000,
            platform_stagger_ms: 150,
            parallax_factor: 0.1,
            ripple_duration_ms: 600,
            button_magnet_strength: 0.1,
            image_magnet_strength: 0.05,
            glow_fade_in_delay_ms: 10,
            glow_fade_out_ms: 300,
            visualizer_bars: 50,
            visualizer_interval_ms: 200,
            visualizer_min_height_px: 10.0,
            visualizer_height_range_px: 100.0,
            easter_egg_duration_ms: 5000,
            easter_egg_message: "🎵 AJÉ THE REALEST MODE ACTIVATED! 🔥".to_string(),
            preload_assets: vec![
                "1900x1900-000000-80-0-0.jpg".to_string(),
                "Concert.jpeg".to_string(),
            ],
            components: Components::all(),
        }
    }
}

#[inline]
const fn ms(v: u32) -> Duration {
    Duration::from_millis(v as u64)
}

impl SiteConfig {
    /// Parse host options, filling unspecified fields with defaults, then
    /// validate the result.
    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        let config: Self = serde_json::from_str(json).map_err(|err| {
            crate::warn!(
                target: crate::logging::targets::SITE,
                error = %err,
                "site options are not valid JSON"
            );
            SiteError::from(err)
        })?;
        if let Err(err) = config.validate() {
            crate::warn!(target: crate::logging::targets::SITE, %err, "site options rejected");
            return Err(err);
        }
        crate::debug!(
            target: crate::logging::targets::SITE,
            components = ?config.components,
            "site options accepted"
        );
        Ok(config)
    }

    /// Reject values that would make a component misbehave.
    pub fn validate(&self) -> Result<(), SiteError> {
        let finite_non_negative = [
            ("scroll_offset_px", self.scroll_offset_px),
            ("header_scrolled_threshold_px", self.header_scrolled_threshold_px),
            ("active_link_extra_offset_px", self.active_link_extra_offset_px),
            ("parallax_factor", self.parallax_factor),
            ("button_magnet_strength", self.button_magnet_strength),
            ("image_magnet_strength", self.image_magnet_strength),
            ("visualizer_min_height_px", self.visualizer_min_height_px),
            ("visualizer_height_range_px", self.visualizer_height_range_px),
        ];
        for (name, value) in finite_non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SiteError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if !self.mobile_breakpoint_px.is_finite() || self.mobile_breakpoint_px <= 0.0 {
            return Err(SiteError::InvalidConfig(
                "mobile_breakpoint_px must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(SiteError::InvalidConfig(format!(
                "reveal_threshold must be within [0, 1], got {}",
                self.reveal_threshold
            )));
        }
        if self.visualizer_interval_ms == 0 {
            return Err(SiteError::InvalidConfig(
                "visualizer_interval_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a component is enabled.
    #[must_use]
    pub fn enabled(&self, component: Components) -> bool {
        self.components.contains(component)
    }

    pub fn loading_duration(&self) -> Duration {
        ms(self.loading_duration_ms)
    }

    pub fn logo_emphasis_at(&self) -> Duration {
        ms(self.logo_emphasis_at_ms)
    }

    pub fn loading_text_at(&self) -> Duration {
        ms(self.loading_text_at_ms)
    }

    pub fn hero_entrance_delay(&self) -> Duration {
        ms(self.hero_entrance_delay_ms)
    }

    pub fn hero_stagger(&self) -> Duration {
        ms(self.hero_stagger_ms)
    }

    pub fn scroll_throttle(&self) -> Duration {
        ms(self.scroll_throttle_ms)
    }

    pub fn active_link_throttle(&self) -> Duration {
        ms(self.active_link_throttle_ms)
    }

    pub fn smooth_scroll_duration(&self) -> Duration {
        ms(self.smooth_scroll_duration_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        ms(self.resize_debounce_ms)
    }

    pub fn stat_count_up(&self) -> Duration {
        ms(self.stat_count_up_ms)
    }

    pub fn number_count_up(&self) -> Duration {
        ms(self.number_count_up_ms)
    }

    pub fn platform_stagger(&self) -> Duration {
        ms(self.platform_stagger_ms)
    }

    pub fn ripple_duration(&self) -> Duration {
        ms(self.ripple_duration_ms)
    }

    pub fn glow_fade_in_delay(&self) -> Duration {
        ms(self.glow_fade_in_delay_ms)
    }

    pub fn glow_fade_out(&self) -> Duration {
        ms(self.glow_fade_out_ms)
    }

    pub fn visualizer_interval(&self) -> Duration {
        ms(self.visualizer_interval_ms)
    }

    pub fn easter_egg_duration(&self) -> Duration {
        ms(self.easter_egg_duration_ms)
    }

    /// Scroll marker offset used for active-link highlighting.
    pub fn active_link_marker_offset(&self) -> f64 {
        self.scroll_offset_px + self.active_link_extra_offset_px
    }
}
