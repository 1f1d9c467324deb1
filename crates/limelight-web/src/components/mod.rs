//! Page components attached by [`crate::LimelightSite`].
//!
//! Each component owns the listeners, observers and timers it registers.
//! `detach` drops them, which removes listeners, disconnects observers and
//! cancels pending timers and frames.

use limelight_core::SiteError;

use crate::dom::PageElements;

mod easter_egg;
mod interactive;
mod loading_screen;
mod navigation;
mod performance;
mod scroll_animations;
mod visualizer;

pub use easter_egg::EasterEgg;
pub use interactive::InteractiveEffects;
pub use loading_screen::LoadingScreen;
pub use navigation::Navigation;
pub use performance::PerformanceOptimizer;
pub use scroll_animations::ScrollAnimations;
pub use visualizer::AudioVisualizer;

pub trait Component {
    /// Stable name used in logs and the attach report.
    fn name(&self) -> &'static str;

    /// Wire the component into the page. An error means the component (or
    /// part of it) is unavailable; the rest of the page keeps working.
    fn attach(&mut self, page: &PageElements) -> Result<(), SiteError>;

    fn detach(&mut self);
}
