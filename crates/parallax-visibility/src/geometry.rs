//! Viewport geometry in document coordinates (y grows downward)

/// Clamp a size to zero from below. NaN is kept so corrupt measurements stay
/// detectable through `is_finite`.
fn non_negative(size: f32) -> f32 {
    if size.is_nan() {
        size
    } else {
        size.max(0.0)
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: non_negative(width),
            height: non_negative(height),
        }
    }

    /// Full-width band between two vertical offsets
    pub fn band(top: f32, bottom: f32, width: f32) -> Self {
        Self::new(0.0, top, width, bottom - top)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Overlap with another rect. Touching edges give a zero-area overlap,
    /// disjoint rects give `None`.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());

        if left > right || top > bottom {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Insets applied to the viewport before intersecting (positive shrinks)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootMargin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub fn uniform(inset: f32) -> Self {
        Self {
            top: inset,
            right: inset,
            bottom: inset,
            left: inset,
        }
    }
}

/// The visible window onto the document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
    pub margin: RootMargin,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: non_negative(width),
            height: non_negative(height),
            margin: RootMargin::ZERO,
        }
    }

    pub fn with_margin(mut self, margin: RootMargin) -> Self {
        self.margin = margin;
        self
    }

    pub fn scrolled_to(mut self, scroll_y: f32) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    pub fn scroll_to(&mut self, scroll_y: f32) {
        self.scroll_y = scroll_y;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = non_negative(width);
        self.height = non_negative(height);
    }

    /// Document-space rect sections are intersected against
    pub fn root_rect(&self) -> Rect {
        let m = &self.margin;
        Rect::new(
            self.scroll_x + m.left,
            self.scroll_y + m.top,
            self.width - m.left - m.right,
            self.height - m.top - m.bottom,
        )
    }
}

/// Fraction of `section` inside the viewport's root rect, in [0, 1].
///
/// Intersection area over section area. A zero-area section has no meaningful
/// ratio; it reads as fully visible when it sits inside the root and hidden
/// otherwise.
///
/// Non-finite geometry yields NaN, which detectors ignore.
pub fn visible_fraction(section: &Rect, viewport: &Viewport) -> f32 {
    let root = viewport.root_rect();
    if !(section.is_finite() && root.is_finite()) {
        return f32::NAN;
    }

    if section.area() <= 0.0 {
        return if root.contains(section) { 1.0 } else { 0.0 };
    }

    match section.intersect(&root) {
        Some(overlap) => (overlap.area() / section.area()).clamp(0.0, 1.0),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_visible() {
        let viewport = Viewport::new(1000.0, 800.0);
        let section = Rect::band(100.0, 500.0, 1000.0);
        assert_eq!(visible_fraction(&section, &viewport), 1.0);
    }

    #[test]
    fn test_partially_visible() {
        let viewport = Viewport::new(1000.0, 800.0).scrolled_to(400.0);
        // Section spans 0..800, viewport covers 400..1200
        let section = Rect::band(0.0, 800.0, 1000.0);
        assert!((visible_fraction(&section, &viewport) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_not_visible() {
        let viewport = Viewport::new(1000.0, 800.0);
        let section = Rect::band(2000.0, 2800.0, 1000.0);
        assert_eq!(visible_fraction(&section, &viewport), 0.0);
    }

    #[test]
    fn test_root_margin_shrinks_viewport() {
        let viewport = Viewport::new(1000.0, 800.0).with_margin(RootMargin {
            top: 200.0,
            ..RootMargin::ZERO
        });
        // Section 0..400, root covers 200..800
        let section = Rect::band(0.0, 400.0, 1000.0);
        assert!((visible_fraction(&section, &viewport) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_area_section() {
        let viewport = Viewport::new(1000.0, 800.0);
        assert_eq!(visible_fraction(&Rect::band(100.0, 100.0, 1000.0), &viewport), 1.0);
        assert_eq!(visible_fraction(&Rect::band(900.0, 900.0, 1000.0), &viewport), 0.0);
    }

    #[test]
    fn test_nan_size_is_kept() {
        let rect = Rect::new(0.0, 100.0, 1000.0, f32::NAN);
        assert!(!rect.is_finite());
        assert_eq!(Rect::new(0.0, 0.0, -5.0, 10.0).width, 0.0);

        let viewport = Viewport::new(1000.0, 800.0);
        assert!(visible_fraction(&rect, &viewport).is_nan());
    }

    #[test]
    fn test_intersect_touching_edges() {
        let a = Rect::band(0.0, 100.0, 10.0);
        let b = Rect::band(100.0, 200.0, 10.0);
        let overlap = a.intersect(&b).unwrap();
        assert_eq!(overlap.area(), 0.0);
        assert!(a.intersect(&Rect::band(150.0, 200.0, 10.0)).is_none());
    }
}
