//! Geometric value types for content-space layout.
//!
//! All coordinates live in an unbounded logical coordinate system ("content
//! space") that is independent of the current zoom and pan. Rectangles are
//! anchored at their top-left corner.

use serde::{Deserialize, Serialize};

/// A point in content space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns the point rounded to the nearest multiple of `unit` on both
    /// axes.
    ///
    /// A non-positive unit leaves the point unchanged.
    pub fn snapped(self, unit: f32) -> Self {
        if unit <= 0.0 {
            return self;
        }
        Self {
            x: (self.x / unit).round() * unit,
            y: (self.y / unit).round() * unit,
        }
    }

    /// Returns true if both coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    origin: Point,
    size: Size,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Returns the top-left corner.
    pub fn origin(self) -> Point {
        self.origin
    }

    /// Returns the size.
    pub fn size(self) -> Size {
        self.size
    }

    /// Returns the minimum x-coordinate.
    pub fn min_x(self) -> f32 {
        self.origin.x
    }

    /// Returns the minimum y-coordinate.
    pub fn min_y(self) -> f32 {
        self.origin.y
    }

    /// Returns the maximum x-coordinate.
    pub fn max_x(self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Returns the maximum y-coordinate.
    pub fn max_y(self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Returns the width of the rectangle.
    pub fn width(self) -> f32 {
        self.size.width
    }

    /// Returns the height of the rectangle.
    pub fn height(self) -> f32 {
        self.size.height
    }

    /// Returns the center point.
    pub fn center(self) -> Point {
        Point {
            x: self.origin.x + self.size.width / 2.0,
            y: self.origin.y + self.size.height / 2.0,
        }
    }

    /// Returns the midpoint of the left edge.
    pub fn left_center(self) -> Point {
        Point {
            x: self.min_x(),
            y: self.origin.y + self.size.height / 2.0,
        }
    }

    /// Returns the midpoint of the right edge.
    pub fn right_center(self) -> Point {
        Point {
            x: self.max_x(),
            y: self.origin.y + self.size.height / 2.0,
        }
    }

    /// Moves the rectangle by the specified offset.
    pub fn translate(self, offset: Point) -> Self {
        Self {
            origin: self.origin.add(offset),
            size: self.size,
        }
    }

    /// Grows the rectangle by `amount` on every side.
    ///
    /// A negative amount shrinks it; the size never goes below zero.
    pub fn inflate(self, amount: f32) -> Self {
        Self {
            origin: Point {
                x: self.origin.x - amount,
                y: self.origin.y - amount,
            },
            size: Size {
                width: (self.size.width + amount * 2.0).max(0.0),
                height: (self.size.height + amount * 2.0).max(0.0),
            },
        }
    }

    /// Returns true if this rectangle and `other` overlap.
    ///
    /// Rectangles that merely touch along an edge count as intersecting.
    pub fn intersects(self, other: Rect) -> bool {
        self.min_x() <= other.max_x()
            && other.min_x() <= self.max_x()
            && self.min_y() <= other.max_y()
            && other.min_y() <= self.max_y()
    }

    /// Returns true if `point` lies inside the rectangle (edges included).
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    /// Merges two rectangles into the smallest rectangle containing both.
    pub fn union(self, other: Rect) -> Self {
        let min_x = self.min_x().min(other.min_x());
        let min_y = self.min_y().min(other.min_y());
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Self {
            origin: Point { x: min_x, y: min_y },
            size: Size {
                width: max_x - min_x,
                height: max_y - min_y,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_approx_eq!(f32, point.x(), 3.5);
        assert_approx_eq!(f32, point.y(), 4.2);
    }

    #[test]
    fn test_point_add_sub() {
        let p1 = Point::new(1.0, 2.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.add(p2), Point::new(4.0, 6.0));
        assert_eq!(p2.sub(p1), Point::new(2.0, 2.0));
    }

    #[test]
    fn test_point_scale() {
        let scaled = Point::new(2.0, 3.0).scale(2.5);
        assert_approx_eq!(f32, scaled.x(), 5.0);
        assert_approx_eq!(f32, scaled.y(), 7.5);
    }

    #[test]
    fn test_point_snapped() {
        let point = Point::new(37.0, 88.0);
        let snapped = point.snapped(25.0);
        assert_approx_eq!(f32, snapped.x(), 25.0);
        assert_approx_eq!(f32, snapped.y(), 75.0);

        // Exactly halfway rounds away from zero
        let half = Point::new(12.5, -12.5).snapped(25.0);
        assert_approx_eq!(f32, half.x(), 25.0);
        assert_approx_eq!(f32, half.y(), -25.0);

        // Non-positive unit is a no-op
        assert_eq!(point.snapped(0.0), point);
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f32::NAN, 2.0).is_finite());
        assert!(!Point::new(1.0, f32::INFINITY).is_finite());
    }

    #[test]
    fn test_size_max() {
        let size1 = Size::new(10.0, 20.0);
        let size2 = Size::new(15.0, 18.0);
        let max_size = size1.max(size2);

        assert_approx_eq!(f32, max_size.width(), 15.0);
        assert_approx_eq!(f32, max_size.height(), 20.0);
    }

    #[test]
    fn test_size_is_zero() {
        assert!(Size::default().is_zero());
        assert!(!Size::new(1.0, 0.0).is_zero());
        assert!(!Size::new(0.0, 1.0).is_zero());
    }

    #[test]
    fn test_rect_accessors() {
        let rect = Rect::new(Point::new(10.0, 20.0), Size::new(100.0, 50.0));
        assert_approx_eq!(f32, rect.min_x(), 10.0);
        assert_approx_eq!(f32, rect.min_y(), 20.0);
        assert_approx_eq!(f32, rect.max_x(), 110.0);
        assert_approx_eq!(f32, rect.max_y(), 70.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_rect_edge_midpoints() {
        let rect = Rect::new(Point::new(0.0, 0.0), Size::new(40.0, 30.0));
        assert_eq!(rect.left_center(), Point::new(0.0, 15.0));
        assert_eq!(rect.right_center(), Point::new(40.0, 15.0));
    }

    #[test]
    fn test_rect_translate() {
        let rect = Rect::new(Point::new(5.0, 5.0), Size::new(10.0, 10.0));
        let moved = rect.translate(Point::new(3.0, -2.0));
        assert_eq!(moved.origin(), Point::new(8.0, 3.0));
        assert_eq!(moved.size(), rect.size());
    }

    #[test]
    fn test_rect_inflate() {
        let rect = Rect::new(Point::new(10.0, 10.0), Size::new(20.0, 20.0));
        let grown = rect.inflate(5.0);
        assert_approx_eq!(f32, grown.min_x(), 5.0);
        assert_approx_eq!(f32, grown.max_x(), 35.0);

        // Shrinking past zero clamps the size
        let collapsed = rect.inflate(-50.0);
        assert_approx_eq!(f32, collapsed.width(), 0.0);
        assert_approx_eq!(f32, collapsed.height(), 0.0);
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let b = Rect::new(Point::new(5.0, 5.0), Size::new(10.0, 10.0));
        let c = Rect::new(Point::new(20.0, 20.0), Size::new(5.0, 5.0));

        assert!(a.intersects(b));
        assert!(b.intersects(a));
        assert!(!a.intersects(c));

        // Touching edges intersect
        let touching = Rect::new(Point::new(10.0, 0.0), Size::new(5.0, 5.0));
        assert!(a.intersects(touching));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        assert!(rect.contains(Point::new(5.0, 5.0)));
        assert!(rect.contains(Point::new(0.0, 10.0)));
        assert!(!rect.contains(Point::new(11.0, 5.0)));
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let b = Rect::new(Point::new(20.0, -5.0), Size::new(5.0, 10.0));
        let merged = a.union(b);

        assert_approx_eq!(f32, merged.min_x(), 0.0);
        assert_approx_eq!(f32, merged.min_y(), -5.0);
        assert_approx_eq!(f32, merged.max_x(), 25.0);
        assert_approx_eq!(f32, merged.max_y(), 10.0);
    }
}
