#![forbid(unsafe_code)]

//! Navigation state: scrolled header, mobile menu, active section link.

use crate::geometry::{SectionSpan, active_section, is_mobile};

/// Value of `document.body.style.overflow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyOverflow {
    Hidden,
    Visible,
}

impl BodyOverflow {
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Visible => "visible",
        }
    }
}

/// Whether the header should carry its `scrolled` style.
#[must_use]
pub fn header_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Open/closed state of the mobile menu.
///
/// The page scroll is locked exactly while the menu is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the menu. Returns the new open state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Close the menu. Closing an already-closed menu is a no-op.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Close the menu when the layout has just left the mobile class.
    /// Returns whether it was open and is now closed.
    pub fn close_on_desktop(&mut self, left_mobile: bool) -> bool {
        if !(left_mobile && self.open) {
            return false;
        }
        self.open = false;
        crate::debug!(
            target: crate::logging::targets::NAVIGATION,
            "left mobile layout; closing menu"
        );
        true
    }

    #[must_use]
    pub const fn body_overflow(&self) -> BodyOverflow {
        if self.open {
            BodyOverflow::Hidden
        } else {
            BodyOverflow::Visible
        }
    }
}

/// Mobile/desktop class of the viewport, re-evaluated on resize.
///
/// Only [`LayoutWatch::resize`] changes the class, so a transition is
/// reported exactly once no matter who else measures the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutWatch {
    mobile: bool,
    breakpoint: f64,
}

impl LayoutWatch {
    #[must_use]
    pub fn new(width: f64, breakpoint: f64) -> Self {
        Self {
            mobile: is_mobile(width, breakpoint),
            breakpoint,
        }
    }

    #[must_use]
    pub const fn is_mobile(&self) -> bool {
        self.mobile
    }

    /// Re-classify at the new width. Returns `true` when the layout just
    /// left the mobile class.
    pub fn resize(&mut self, width: f64) -> bool {
        let was_mobile = self.mobile;
        self.mobile = is_mobile(width, self.breakpoint);
        was_mobile && !self.mobile
    }
}

/// Section id referenced by an in-page link (`"#music"` → `"music"`).
///
/// Links that point elsewhere yield `None`.
#[must_use]
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Tracks which section link is highlighted.
#[derive(Debug, Clone, Default)]
pub struct ActiveLinkTracker {
    active: Option<String>,
}

impl ActiveLinkTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Recompute the active section for the marker position
    /// (`scrollY + marker offset`). Returns the id to highlight when it
    /// differs from the current one; the caller then clears every link and
    /// marks that one. `None` leaves the highlight untouched.
    pub fn update(&mut self, marker: f64, spans: &[SectionSpan]) -> Option<&str> {
        let index = active_section(marker, spans)?;
        let id = &spans[index].id;
        if self.active.as_deref() == Some(id.as_str()) {
            return None;
        }
        crate::trace!(
            target: crate::logging::targets::NAVIGATION,
            section = %id,
            "active section changed"
        );
        self.active = Some(id.clone());
        self.active.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans() -> Vec<SectionSpan> {
        vec![
            SectionSpan::new("home", 0.0, 900.0),
            SectionSpan::new("music", 900.0, 700.0),
            SectionSpan::new("tour", 1600.0, 800.0),
        ]
    }

    #[test]
    fn header_threshold_is_exclusive() {
        assert!(!header_scrolled(50.0, 50.0));
        assert!(header_scrolled(50.5, 50.0));
    }

    #[test]
    fn menu_toggle_locks_scroll() {
        let mut menu = MobileMenu::default();
        assert!(menu.toggle());
        assert_eq!(menu.body_overflow(), BodyOverflow::Hidden);
        assert!(!menu.toggle());
        assert_eq!(menu.body_overflow().as_css(), "visible");
    }

    #[test]
    fn menu_close_is_idempotent() {
        let mut menu = MobileMenu::default();
        menu.toggle();
        menu.close();
        menu.close();
        assert!(!menu.is_open());
    }

    #[test]
    fn widening_past_breakpoint_closes_open_menu() {
        let mut layout = LayoutWatch::new(700.0, 768.0);
        let mut menu = MobileMenu::default();
        menu.toggle();
        assert!(menu.close_on_desktop(layout.resize(1200.0)));
        assert!(!menu.is_open());
        assert_eq!(menu.body_overflow(), BodyOverflow::Visible);
    }

    #[test]
    fn resize_within_a_class_keeps_menu() {
        let mut layout = LayoutWatch::new(700.0, 768.0);
        let mut menu = MobileMenu::default();
        menu.toggle();
        assert!(!menu.close_on_desktop(layout.resize(760.0)));
        assert!(menu.is_open());

        let mut desktop = LayoutWatch::new(1200.0, 768.0);
        assert!(!desktop.resize(1300.0));
        // Narrowing into mobile is not a transition the menu reacts to.
        assert!(!desktop.resize(500.0));
        assert!(desktop.is_mobile());
    }

    #[test]
    fn closed_menu_ignores_layout_change() {
        let mut layout = LayoutWatch::new(500.0, 768.0);
        let mut menu = MobileMenu::default();
        assert!(!menu.close_on_desktop(layout.resize(1024.0)));
    }

    #[test]
    fn transition_is_reported_once_regardless_of_other_reads() {
        let mut layout = LayoutWatch::new(700.0, 768.0);
        // An independent read of the live width does not touch the watch.
        assert!(!is_mobile(1200.0, 768.0));
        assert!(layout.is_mobile());
        assert!(layout.resize(1200.0));
        assert!(!layout.resize(1200.0));
    }

    #[test]
    fn fragments() {
        assert_eq!(fragment_target("#tour"), Some("tour"));
        assert_eq!(fragment_target("#"), None);
        assert_eq!(fragment_target("https://example.com"), None);
    }

    #[test]
    fn marker_inside_second_span_activates_it_only() {
        let mut tracker = ActiveLinkTracker::new();
        // scrollY 900 + 80 + 100
        assert_eq!(tracker.update(1080.0, &spans()), Some("music"));
        assert_eq!(tracker.active(), Some("music"));
    }

    #[test]
    fn unchanged_section_reports_nothing() {
        let mut tracker = ActiveLinkTracker::new();
        tracker.update(100.0, &spans());
        assert_eq!(tracker.update(200.0, &spans()), None);
        assert_eq!(tracker.active(), Some("home"));
    }

    #[test]
    fn marker_past_last_section_keeps_highlight() {
        let mut tracker = ActiveLinkTracker::new();
        tracker.update(1700.0, &spans());
        assert_eq!(tracker.update(9000.0, &spans()), None);
        assert_eq!(tracker.active(), Some("tour"));
    }
}
