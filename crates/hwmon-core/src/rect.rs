use serde::Serialize;

/// A point in virtual-screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle representing a window frame, monitor, or work area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from Win32-style edges.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Right edge (exclusive in pixel terms, inclusive for hit tests).
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Same size, new position.
    pub fn moved_to(&self, pos: Point) -> Self {
        Self::new(pos.x, pos.y, self.width, self.height)
    }

    /// Same position, new size.
    pub fn resized(&self, width: i32, height: i32) -> Self {
        Self::new(self.x, self.y, width, height)
    }

    /// Returns whether the point lies inside or on any edge.
    ///
    /// Edges are inclusive on all four sides, so a cursor sitting on the
    /// shared edge of two side-by-side monitors is inside both.
    pub fn contains_point(&self, p: Point) -> bool {
        self.x <= p.x && p.x <= self.right() && self.y <= p.y && p.y <= self.bottom()
    }

    /// Squared distance from the point to the nearest point of the rectangle.
    ///
    /// Zero when the point is inside. Computed in `i64` so far-apart
    /// virtual-screen coordinates cannot overflow.
    pub fn distance_sq(&self, p: Point) -> i64 {
        let cx = p.x.clamp(self.x, self.right());
        let cy = p.y.clamp(self.y, self.bottom());
        let dx = i64::from(p.x - cx);
        let dy = i64::from(p.y - cy);
        dx * dx + dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_inclusive() {
        // Arrange
        let r = Rect::new(0, 0, 1920, 1080);

        // Assert
        assert!(r.contains_point(Point::new(0, 0)));
        assert!(r.contains_point(Point::new(1920, 1080)));
        assert!(!r.contains_point(Point::new(1921, 500)));
        assert!(!r.contains_point(Point::new(500, -1)));
    }

    #[test]
    fn distance_is_zero_inside() {
        let r = Rect::new(100, 100, 50, 50);
        assert_eq!(r.distance_sq(Point::new(120, 130)), 0);
    }

    #[test]
    fn distance_to_corner_is_squared_diagonal() {
        // Arrange
        let r = Rect::new(0, 0, 100, 100);

        // Act
        let d = r.distance_sq(Point::new(103, 104));

        // Assert
        assert_eq!(d, 9 + 16);
    }

    #[test]
    fn distance_to_edge_uses_one_axis() {
        let r = Rect::new(0, 0, 100, 100);
        assert_eq!(r.distance_sq(Point::new(-10, 50)), 100);
    }

    #[test]
    fn from_edges_matches_new() {
        assert_eq!(
            Rect::from_edges(10, 20, 110, 220),
            Rect::new(10, 20, 100, 200)
        );
    }
}
