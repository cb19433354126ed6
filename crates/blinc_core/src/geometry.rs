//! Core geometry types
//!
//! All positions are in viewport coordinates with the origin at the top-left
//! corner and `y` growing downwards.

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset between this point and `origin`
    pub fn delta_from(&self, origin: Point) -> (f32, f32) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn left(&self) -> f32 {
        self.origin.x
    }

    pub fn top(&self) -> f32 {
        self.origin.y
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Inclusive on all four edges
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Projection onto the x axis as `(left, right)`
    pub fn horizontal_span(&self) -> Span {
        Span::new(self.left(), self.right())
    }

    /// Projection onto the y axis as `(top, bottom)`
    pub fn vertical_span(&self) -> Span {
        Span::new(self.top(), self.bottom())
    }
}

/// A closed range on one axis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Span {
    pub start: f32,
    pub end: f32,
}

impl Span {
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Open-interval overlap: spans that merely touch do not overlap.
    pub fn overlaps(&self, other: Span) -> bool {
        self.end > other.start && other.end > self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let rect = Rect::new(10.0, 10.0, 100.0, 20.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(110.0, 30.0)));
        assert!(!rect.contains(Point::new(110.5, 30.0)));
        assert!(!rect.contains(Point::new(50.0, 9.0)));
    }

    #[test]
    fn test_span_overlap_is_open() {
        let a = Span::new(0.0, 50.0);
        assert!(a.overlaps(Span::new(49.0, 80.0)));
        assert!(!a.overlaps(Span::new(50.0, 80.0)));
        assert!(!Span::new(50.0, 80.0).overlaps(a));
        assert!(a.overlaps(Span::new(10.0, 20.0)));
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(5.0, 15.0, 40.0, 10.0);
        assert_eq!(rect.right(), 45.0);
        assert_eq!(rect.bottom(), 25.0);
        assert_eq!(rect.vertical_span(), Span::new(15.0, 25.0));
    }
}
