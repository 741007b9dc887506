use crate::coords::Rect;
use crate::paint::Color;
use crate::texture::TextureId;

/// Textured quad.
///
/// `tint` is premultiplied and multiplies the sampled texel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpriteCmd {
    pub texture: TextureId,
    pub rect: Rect,
    pub tint: Color,
}

/// Renderer-agnostic draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Sprite(SpriteCmd),
}
