use std::path::{Path, PathBuf};

use kardia_engine::texture::ImageData;
use kardia_engine::window::CursorImage;

use crate::config::StudioConfig;

const PLACEHOLDER_PIXEL: [u8; 4] = [220, 30, 60, 255];

/// Images decoded at startup.
#[derive(Debug, Clone)]
pub struct Assets {
    pub sprite: ImageData,
    /// `true` when `sprite` is the solid stand-in for a missing asset.
    pub sprite_is_placeholder: bool,
    pub cursor: Option<CursorImage>,
}

impl Assets {
    /// Loads the sprite and cursor. Never fails: problems are logged and
    /// replaced by a placeholder sprite or the platform cursor.
    pub fn load(config: &StudioConfig) -> Self {
        let (sprite, sprite_is_placeholder) = match ImageData::load(resolve(&config.sprite_path)) {
            Ok(image) => {
                log::info!(
                    "sprite {} loaded ({}x{})",
                    config.sprite_path.display(),
                    image.width(),
                    image.height()
                );
                (image, false)
            }
            Err(e) => {
                log::error!("failed to load sprite: {e}");
                let size = config.fallback_sprite_size;
                (ImageData::solid(size, size, PLACEHOLDER_PIXEL), true)
            }
        };

        let cursor = match ImageData::load(resolve(&config.cursor_path)) {
            Ok(image) => {
                log::info!("cursor {} loaded", config.cursor_path.display());
                Some(CursorImage::new(image, config.cursor_hotspot))
            }
            Err(e) => {
                log::error!("failed to load cursor: {e}");
                None
            }
        };

        Self { sprite, sprite_is_placeholder, cursor }
    }
}

/// Relative asset paths are tried against the working directory first, then
/// against the studio crate directory.
fn resolve(path: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    let beside_crate = Path::new(env!("CARGO_MANIFEST_DIR")).join(path);
    if beside_crate.exists() { beside_crate } else { path.to_path_buf() }
}
