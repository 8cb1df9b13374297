//! The pan/zoom transform between content space and screen space.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// The single source of truth for the canvas pan/zoom state.
///
/// A content-space point `p` appears on screen at `p * scale + translate`.
/// The transform is persisted across sessions and validated before every
/// application: a non-finite or non-positive scale never becomes current.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    scale: f32,
    translate: Point,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: Point::default(),
        }
    }
}

impl Transform {
    /// Creates a transform from a scale factor and a screen-space translation.
    pub fn new(scale: f32, translate: Point) -> Self {
        Self { scale, translate }
    }

    /// The zoom factor.
    pub fn scale(self) -> f32 {
        self.scale
    }

    /// The screen-space translation.
    pub fn translate(self) -> Point {
        self.translate
    }

    /// Returns a copy with the given scale.
    pub fn with_scale(self, scale: f32) -> Self {
        Self { scale, ..self }
    }

    /// Returns a copy with the given translation.
    pub fn with_translate(self, translate: Point) -> Self {
        Self { translate, ..self }
    }

    /// Maps a content-space point to screen space.
    pub fn to_screen(self, content: Point) -> Point {
        content.scale(self.scale).add(self.translate)
    }

    /// Maps a screen-space point back to content space.
    pub fn to_content(self, screen: Point) -> Point {
        screen.sub(self.translate).scale(1.0 / self.scale)
    }

    /// Maps a content-space rectangle to screen space.
    pub fn rect_to_screen(self, rect: Rect) -> Rect {
        Rect::new(self.to_screen(rect.origin()), rect.size().scale(self.scale))
    }

    /// Returns true if the transform can safely be applied.
    ///
    /// Guards against non-finite components and a collapsed or negative
    /// scale, either of which would make the screen mapping unusable.
    pub fn is_valid(self) -> bool {
        self.scale.is_finite() && self.scale > 0.0 && self.translate.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::geometry::Size;

    #[test]
    fn test_default_is_identity() {
        let transform = Transform::default();
        let point = Point::new(12.0, -7.0);
        assert_eq!(transform.to_screen(point), point);
        assert_eq!(transform.to_content(point), point);
    }

    #[test]
    fn test_to_screen() {
        let transform = Transform::new(2.0, Point::new(100.0, 50.0));
        let screen = transform.to_screen(Point::new(10.0, 20.0));
        assert_approx_eq!(f32, screen.x(), 120.0);
        assert_approx_eq!(f32, screen.y(), 90.0);
    }

    #[test]
    fn test_roundtrip() {
        let transform = Transform::new(0.5, Point::new(-30.0, 240.0));
        let content = Point::new(412.0, 96.0);
        let back = transform.to_content(transform.to_screen(content));
        assert_approx_eq!(f32, back.x(), content.x(), epsilon = 1e-3);
        assert_approx_eq!(f32, back.y(), content.y(), epsilon = 1e-3);
    }

    #[test]
    fn test_rect_to_screen() {
        let transform = Transform::new(2.0, Point::new(10.0, 10.0));
        let rect = Rect::new(Point::new(5.0, 5.0), Size::new(20.0, 10.0));
        let screen = transform.rect_to_screen(rect);

        assert_eq!(screen.origin(), Point::new(20.0, 20.0));
        assert_approx_eq!(f32, screen.width(), 40.0);
        assert_approx_eq!(f32, screen.height(), 20.0);
    }

    #[test]
    fn test_is_valid() {
        assert!(Transform::default().is_valid());
        assert!(!Transform::new(0.0, Point::default()).is_valid());
        assert!(!Transform::new(-1.0, Point::default()).is_valid());
        assert!(!Transform::new(f32::NAN, Point::default()).is_valid());
        assert!(!Transform::new(1.0, Point::new(f32::INFINITY, 0.0)).is_valid());
    }
}
