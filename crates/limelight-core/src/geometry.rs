#![forbid(unsafe_code)]

//! Viewport and pointer geometry in CSS pixels.
//!
//! All inputs are what the DOM reports (`getBoundingClientRect`, `clientX`,
//! `scrollY`, `innerHeight`); outputs are the numbers written into inline
//! `transform` styles.

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// A pointer position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Whether the layout is in its narrow (mobile) form.
#[must_use]
pub fn is_mobile(viewport_width: f64, breakpoint: f64) -> bool {
    viewport_width < breakpoint
}

/// Fraction of the document scrolled, in `[0, 1]`.
///
/// A document no taller than the viewport reports `0`.
#[must_use]
pub fn scroll_progress(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 || !scrollable.is_finite() {
        return 0.0;
    }
    (scroll_top / scrollable).clamp(0.0, 1.0)
}

/// Placement of a click ripple inside its host element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    /// Diameter: the larger host dimension.
    pub size: f64,
    /// Offset of the ripple's top-left corner from the host's top-left.
    pub x: f64,
    pub y: f64,
}

impl RippleGeometry {
    /// Center a ripple on the click point.
    #[must_use]
    pub fn new(host: Rect, click: Point) -> Self {
        let size = host.width.max(host.height);
        Self {
            size,
            x: click.x - host.left - size / 2.0,
            y: click.y - host.top - size / 2.0,
        }
    }
}

/// Pull toward the pointer: `(pointer - center) * strength` on each axis.
#[must_use]
pub fn magnetic_offset(host: Rect, pointer: Point, strength: f64) -> Point {
    let center = host.center();
    Point::new(
        (pointer.x - center.x) * strength,
        (pointer.y - center.y) * strength,
    )
}

/// Magnetic hover offset for the current event, or `None` while the viewport
/// is in its mobile class. The width is the live `innerWidth`, so the
/// decision follows resizes without any shared state.
#[must_use]
pub fn magnetic_hover(
    host: Rect,
    pointer: Point,
    strength: f64,
    viewport_width: f64,
    breakpoint: f64,
) -> Option<Point> {
    (!is_mobile(viewport_width, breakpoint)).then(|| magnetic_offset(host, pointer, strength))
}

/// Vertical parallax shift for an element while it is on screen.
///
/// `element_top` is the element's document offset (`rect.top + scrollY`).
/// Returns `None` once the element is entirely above or below the viewport,
/// in which case its last offset is left alone.
#[must_use]
pub fn parallax_offset(
    scroll_y: f64,
    viewport_height: f64,
    element_top: f64,
    element_height: f64,
    factor: f64,
) -> Option<f64> {
    let visible = scroll_y + viewport_height > element_top
        && scroll_y < element_top + element_height;
    visible.then(|| -(scroll_y - element_top) * factor)
}

/// Vertical span of a page section in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    #[must_use]
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Half-open containment: `[top, top + height)`.
    #[must_use]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Index of the section containing `marker`.
///
/// When spans overlap the last matching span in document order wins. `None`
/// means no section contains the marker and the current highlight should stay.
#[must_use]
pub fn active_section(marker: f64, spans: &[SectionSpan]) -> Option<usize> {
    spans.iter().rposition(|span| span.contains(marker))
}
