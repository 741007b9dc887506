use crate::coords::Rect;
use crate::paint::Color;
use crate::texture::TextureId;

use super::{DrawCmd, SpriteCmd};

/// Recorded draw stream for a frame.
///
/// `push` is O(1); `clear` keeps allocated capacity for reuse.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns commands in paint order.
    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(cmd);
    }

    /// Records an untinted sprite.
    #[inline]
    pub fn push_sprite(&mut self, texture: TextureId, rect: Rect) {
        self.push_tinted_sprite(texture, rect, Color::WHITE);
    }

    #[inline]
    pub fn push_tinted_sprite(&mut self, texture: TextureId, rect: Rect, tint: Color) {
        self.push(DrawCmd::Sprite(SpriteCmd { texture, rect, tint }));
    }
}
