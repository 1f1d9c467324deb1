#![forbid(unsafe_code)]

//! Inline styles and injected stylesheets.
//!
//! The page stylesheet owns colors, gradients and the `pulse-glow` keyframes;
//! these strings only reference them.

use limelight_core::geometry::{Point, RippleGeometry};

/// Rules injected once at startup.
pub const GLOBAL_STYLESHEET: &str = "
@keyframes ripple {
    0% { transform: translate(var(--x), var(--y)) scale(0); opacity: 1; }
    100% { transform: translate(var(--x), var(--y)) scale(4); opacity: 0; }
}
.animate { opacity: 1 !important; transform: translateY(0) !important; }
.reduce-motion * {
    animation-duration: 0.01ms !important;
    animation-iteration-count: 1 !important;
    transition-duration: 0.01ms !important;
}
";

/// Keyframes for the easter-egg hue rotation.
pub const RAINBOW_KEYFRAMES: &str = "
@keyframes rainbow {
    0% { filter: hue-rotate(0deg); }
    100% { filter: hue-rotate(360deg); }
}
";

/// Body animation while the easter egg is active.
pub const RAINBOW_ANIMATION: &str = "rainbow 2s ease infinite";

/// Transition applied to elements waiting for their reveal.
pub const REVEAL_TRANSITION: &str = "all 0.8s cubic-bezier(0.25, 0.46, 0.45, 0.94)";

/// Hidden-and-lowered starting transform for reveal targets.
pub const REVEAL_OFFSET: &str = "translateY(50px)";

pub const LOGO_EMPHASIS_TRANSFORM: &str = "scale(1.2)";
pub const LOGO_EMPHASIS_FILTER: &str = "drop-shadow(0 0 50px rgba(255, 107, 53, 0.8))";

pub const SETTLED_TRANSFORM: &str = "translateY(0)";
pub const PLATFORM_SETTLED_TRANSFORM: &str = "translateY(0) scale(1)";
pub const BUTTON_REST_TRANSFORM: &str = "translateY(0) scale(1)";
pub const IMAGE_REST_TRANSFORM: &str = "translate(0, 0) scale(1)";
pub const TOUCH_PRESSED_TRANSFORM: &str = "scale(0.98)";
pub const TOUCH_RELEASED_TRANSFORM: &str = "scale(1)";

/// Inline style for a click ripple.
#[must_use]
pub fn ripple_css(ripple: &RippleGeometry, duration_ms: u32) -> String {
    let RippleGeometry { size, x, y } = *ripple;
    format!(
        "position: absolute; width: {size}px; height: {size}px; \
         background: rgba(255, 255, 255, 0.3); border-radius: 50%; \
         transform: translate({x}px, {y}px) scale(0); \
         animation: ripple {secs}s ease-out; pointer-events: none; z-index: 1000;",
        secs = f64::from(duration_ms) / 1000.0,
    )
}

/// `transform` for a magnetic hover.
#[must_use]
pub fn magnetic_transform(offset: Point, scale: f64) -> String {
    format!("translate({}px, {}px) scale({scale})", offset.x, offset.y)
}

/// `transform` for a parallax shift.
#[must_use]
pub fn parallax_transform(y: f64) -> String {
    format!("translateY({y}px)")
}

/// Inline style for a card glow overlay (starts transparent).
#[must_use]
pub fn glow_css(fade_ms: u32) -> String {
    format!(
        "position: absolute; top: -2px; left: -2px; right: -2px; bottom: -2px; \
         background: linear-gradient(135deg, rgba(124, 77, 255, 0.3), rgba(255, 107, 53, 0.3)); \
         border-radius: inherit; z-index: -1; opacity: 0; transition: opacity {secs}s ease;",
        secs = f64::from(fade_ms) / 1000.0,
    )
}

pub const VISUALIZER_CSS: &str = "position: absolute; top: 0; left: 0; width: 100%; height: 100%; \
     display: flex; justify-content: space-around; align-items: flex-end; \
     opacity: 0.1; pointer-events: none; z-index: 1;";

pub const VISUALIZER_BAR_CSS: &str = "width: 2px; height: 10px; \
     background: linear-gradient(to top, var(--orange-fire), var(--purple-bright)); \
     margin: 0 1px; border-radius: 2px; transition: height 0.3s ease;";

pub const EASTER_EGG_MESSAGE_CSS: &str = "position: fixed; top: 50%; left: 50%; \
     transform: translate(-50%, -50%); background: var(--gradient-accent); color: white; \
     padding: 2rem; border-radius: 20px; font-size: 1.5rem; font-weight: bold; \
     z-index: 10000; animation: pulse-glow 1s infinite;";

#[cfg(test)]
mod tests {
    use super::*;
    use limelight_core::geometry::Rect;

    #[test]
    fn ripple_style_carries_geometry() {
        let ripple = RippleGeometry::new(Rect::new(0.0, 0.0, 120.0, 40.0), Point::new(60.0, 20.0));
        let css = ripple_css(&ripple, 600);
        assert!(css.contains("width: 120px; height: 120px;"), "{css}");
        assert!(css.contains("translate(0px, -40px) scale(0)"), "{css}");
        assert!(css.contains("animation: ripple 0.6s ease-out"), "{css}");
    }

    #[test]
    fn transforms() {
        assert_eq!(
            magnetic_transform(Point::new(4.5, -2.0), 1.05),
            "translate(4.5px, -2px) scale(1.05)"
        );
        assert_eq!(parallax_transform(-20.0), "translateY(-20px)");
    }

    #[test]
    fn glow_fades_with_configured_duration() {
        assert!(glow_css(300).contains("transition: opacity 0.3s ease"));
    }

    #[test]
    fn global_stylesheet_defines_contract_rules() {
        assert!(GLOBAL_STYLESHEET.contains("@keyframes ripple"));
        assert!(GLOBAL_STYLESHEET.contains(".animate"));
        assert!(GLOBAL_STYLESHEET.contains(".reduce-motion *"));
        assert!(RAINBOW_KEYFRAMES.contains("hue-rotate(360deg)"));
    }
}
