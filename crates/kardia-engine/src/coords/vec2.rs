/// 2D vector in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Truncates both components towards negative infinity onto the integer pixel grid.
    #[inline]
    pub fn floor_i32(self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }
}
