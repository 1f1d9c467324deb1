#![forbid(unsafe_code)]

//! Page-performance decisions: lazy image sources, pausing decorative
//! animations in hidden tabs, preload hints, and the reduced-motion latch.

/// CSS `animation-play-state` for decorative animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Running,
    Paused,
}

impl PlayState {
    /// Paused while the document is hidden.
    #[must_use]
    pub const fn for_visibility(hidden: bool) -> Self {
        if hidden { Self::Paused } else { Self::Running }
    }

    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }
}

/// Source a lazy image should load: its deferred `data-src` when present and
/// non-empty, otherwise whatever `src` already holds.
#[must_use]
pub fn lazy_image_source<'a>(data_src: Option<&'a str>, current_src: &'a str) -> &'a str {
    data_src
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(current_src)
}

/// A `<link rel="preload">` to inject into the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadHint {
    pub href: String,
    pub kind: &'static str,
}

impl PreloadHint {
    #[must_use]
    pub fn image(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            kind: "image",
        }
    }
}

/// Image preload hints for the configured critical assets, in order,
/// skipping blanks and duplicates.
#[must_use]
pub fn preload_hints(assets: &[String]) -> Vec<PreloadHint> {
    let mut hints: Vec<PreloadHint> = Vec::with_capacity(assets.len());
    for asset in assets.iter().map(|a| a.trim()).filter(|a| !a.is_empty()) {
        if !hints.iter().any(|h| h.href == asset) {
            hints.push(PreloadHint::image(asset));
        }
    }
    hints
}

/// One-shot latch for the reduced-motion class.
///
/// The platform preference is consulted once at startup; when it is set the
/// class is applied exactly once and never removed by this code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReducedMotion {
    applied: bool,
}

impl ReducedMotion {
    /// Returns `true` when the caller should add the class now.
    pub fn observe(&mut self, prefers_reduced: bool) -> bool {
        if prefers_reduced && !self.applied {
            self.applied = true;
            return true;
        }
        false
    }

    #[must_use]
    pub const fn is_applied(&self) -> bool {
        self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hidden_tabs_pause() {
        assert_eq!(PlayState::for_visibility(true).as_css(), "paused");
        assert_eq!(PlayState::for_visibility(false).as_css(), "running");
    }

    #[test]
    fn lazy_source_prefers_data_src() {
        assert_eq!(lazy_image_source(Some("hero.jpg"), "blank.gif"), "hero.jpg");
        assert_eq!(lazy_image_source(Some("  "), "blank.gif"), "blank.gif");
        assert_eq!(lazy_image_source(None, "blank.gif"), "blank.gif");
    }

    #[test]
    fn preload_hints_dedupe() {
        let assets = vec![
            "Concert.jpeg".to_string(),
            "".to_string(),
            "Concert.jpeg".to_string(),
            "cover.jpg".to_string(),
        ];
        assert_eq!(
            preload_hints(&assets),
            vec![PreloadHint::image("Concert.jpeg"), PreloadHint::image("cover.jpg")]
        );
    }

    #[test]
    fn reduced_motion_applies_once() {
        let mut latch = ReducedMotion::default();
        assert!(!latch.observe(false));
        assert!(latch.observe(true));
        assert!(!latch.observe(true));
        assert!(!latch.observe(false));
        assert!(latch.is_applied());
    }
}
