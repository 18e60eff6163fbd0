//! Pixel-space rectangles for figure cells and plot areas.

/// Axis-aligned rectangle in pixel coordinates (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Shrink by per-side margins. Sizes never go negative.
    #[must_use]
    pub fn inset(&self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(
            self.x + left,
            self.y + top,
            (self.width - left - right).max(0.0),
            (self.height - top - bottom).max(0.0),
        )
    }

    /// True when the rectangle has no drawable area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width < 1.0 || self.height < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert!((rect.right() - 40.0).abs() < f32::EPSILON);
        assert!((rect.bottom() - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rect_inset() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0).inset(10.0, 5.0, 10.0, 5.0);
        assert_eq!(rect, Rect::new(10.0, 5.0, 80.0, 40.0));
    }

    #[test]
    fn test_rect_inset_saturates() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0).inset(20.0, 0.0, 20.0, 0.0);
        assert!(rect.is_empty());
    }
}
