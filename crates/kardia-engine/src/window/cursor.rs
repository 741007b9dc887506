use anyhow::{Context, Result};
use winit::event_loop::ActiveEventLoop;
use winit::window::{CustomCursor, CustomCursorSource, Window};

use crate::texture::ImageData;

/// Image-based mouse cursor with its hotspot in image pixels.
#[derive(Debug, Clone)]
pub struct CursorImage {
    pub image: ImageData,
    pub hotspot: (u16, u16),
}

impl CursorImage {
    pub fn new(image: ImageData, hotspot: (u16, u16)) -> Self {
        Self { image, hotspot }
    }

    /// Builds the platform cursor source.
    ///
    /// The hotspot is clamped into the image; images wider or taller than
    /// `u16::MAX` are rejected.
    pub(crate) fn to_source(&self) -> Result<CustomCursorSource> {
        let width = u16::try_from(self.image.width()).context("cursor image too wide")?;
        let height = u16::try_from(self.image.height()).context("cursor image too tall")?;
        let (hx, hy) = self.clamped_hotspot(width, height);

        CustomCursor::from_rgba(self.image.rgba().to_vec(), width, height, hx, hy)
            .map_err(|e| anyhow::anyhow!("invalid cursor image: {e}"))
    }

    fn clamped_hotspot(&self, width: u16, height: u16) -> (u16, u16) {
        (
            self.hotspot.0.min(width.saturating_sub(1)),
            self.hotspot.1.min(height.saturating_sub(1)),
        )
    }
}

/// Installs `cursor` on `window`. On failure the platform default stays.
pub(crate) fn apply_cursor(event_loop: &ActiveEventLoop, window: &Window, cursor: &CursorImage) {
    match cursor.to_source() {
        Ok(source) => {
            let custom = event_loop.create_custom_cursor(source);
            window.set_cursor(custom);
            log::debug!(
                "custom cursor installed ({}x{}, hotspot {:?})",
                cursor.image.width(),
                cursor.image.height(),
                cursor.hotspot
            );
        }
        Err(e) => log::warn!("keeping default cursor: {e:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotspot_is_clamped_into_image() {
        let cursor = CursorImage::new(ImageData::solid(16, 8, [0, 0, 0, 255]), (40, 3));
        assert_eq!(cursor.clamped_hotspot(16, 8), (15, 3));
    }

    #[test]
    fn valid_image_builds_source() {
        let cursor = CursorImage::new(ImageData::solid(32, 32, [255, 0, 0, 255]), (0, 0));
        assert!(cursor.to_source().is_ok());
    }

    #[test]
    fn oversized_image_is_rejected() {
        let cursor = CursorImage::new(ImageData::solid(70_000, 1, [0; 4]), (0, 0));
        assert!(cursor.to_source().is_err());
    }
}
