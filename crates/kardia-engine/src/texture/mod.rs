//! CPU-side images and GPU texture handles.

mod image;

pub use self::image::{ImageData, ImageLoadError};

/// Opaque handle to a texture registered with the sprite renderer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub(crate) usize);
