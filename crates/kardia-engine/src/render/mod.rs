//! GPU rendering subsystem.
//!
//! Renderers consume `draw` streams and issue GPU commands via wgpu. Each
//! renderer owns its GPU resources (pipelines, buffers, textures).
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.

mod common;
mod ctx;
pub mod sprite;

pub use ctx::{RenderCtx, RenderTarget};
pub use sprite::SpriteRenderer;
