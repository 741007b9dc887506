use core::ops::{Add, Sub};

/// Integer position in logical pixels (top-left origin, +Y down).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.wrapping_add(rhs.x), self.y.wrapping_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.wrapping_sub(rhs.x), self.y.wrapping_sub(rhs.y))
    }
}

/// Integer extent in logical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Closed-interval containment of `p` in the box at `origin` with this size.
    ///
    /// Both edges are inclusive: a box at (0, 0) of size 10×10 contains (10, 10).
    #[inline]
    pub fn contains_at(self, origin: Point, p: Point) -> bool {
        p.x >= origin.x
            && p.x <= origin.x.saturating_add(self.width)
            && p.y >= origin.y
            && p.y <= origin.y.saturating_add(self.height)
    }
}
