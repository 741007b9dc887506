use crate::geom::{Point, Size};

/// Construction parameters for a [`Scene`](crate::Scene).
///
/// The defaults reproduce the classic demo window: a 600×605 surface with the
/// first sprite at (0, 25).
///
/// The wrap targets are asymmetric. Leaving through the right
/// edge re-enters at `wrap_left` (0), leaving through the bottom re-enters at
/// `wrap_top` (25), while leaving through the left or top re-enters flush
/// against the opposite edge.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SceneConfig {
    /// Drawable surface size; the wrap rule is evaluated against it.
    pub surface_size: Size,
    /// Size of every placed sprite, used for hit-testing and wrapping.
    pub sprite_size: Size,
    /// Position of the sprite placed at construction.
    pub initial_position: Point,
    /// X coordinate assigned after leaving through the right edge.
    pub wrap_left: i32,
    /// Y coordinate assigned after leaving through the bottom edge.
    pub wrap_top: i32,
}

impl SceneConfig {
    pub const DEFAULT_SURFACE: Size = Size::new(600, 605);
    pub const DEFAULT_SPRITE: Size = Size::new(64, 64);
    pub const DEFAULT_INITIAL_POSITION: Point = Point::new(0, 25);
    pub const DEFAULT_WRAP_LEFT: i32 = 0;
    pub const DEFAULT_WRAP_TOP: i32 = 25;

    pub fn with_surface_size(mut self, size: Size) -> Self {
        self.surface_size = size;
        self
    }

    pub fn with_sprite_size(mut self, size: Size) -> Self {
        self.sprite_size = size;
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            surface_size: Self::DEFAULT_SURFACE,
            sprite_size: Self::DEFAULT_SPRITE,
            initial_position: Self::DEFAULT_INITIAL_POSITION,
            wrap_left: Self::DEFAULT_WRAP_LEFT,
            wrap_top: Self::DEFAULT_WRAP_TOP,
        }
    }
}

/// Keyboard movement step, in pixels per key event.
///
/// Two states only: the boost is either held or not. Holding it longer does
/// not accelerate further.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MoveSpeed {
    normal: i32,
    boosted: i32,
    boost: bool,
}

impl MoveSpeed {
    pub const DEFAULT_NORMAL: i32 = 10;
    pub const DEFAULT_BOOSTED: i32 = 20;

    pub const fn new(normal: i32, boosted: i32) -> Self {
        Self { normal, boosted, boost: false }
    }

    /// Engages or releases the boost. Returns `true` if the state changed.
    pub fn set_boost(&mut self, boost: bool) -> bool {
        let changed = self.boost != boost;
        self.boost = boost;
        changed
    }

    #[inline]
    pub fn is_boosted(&self) -> bool {
        self.boost
    }

    /// Step applied by the next movement event.
    #[inline]
    pub fn current(&self) -> i32 {
        if self.boost { self.boosted } else { self.normal }
    }
}

impl Default for MoveSpeed {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NORMAL, Self::DEFAULT_BOOSTED)
    }
}
