use std::path::PathBuf;

use kardia_engine::paint::Color;
use kardia_engine::window::{CursorImage, RuntimeConfig};
use kardia_scene::{MoveSpeed, SceneConfig, Size};
use winit::dpi::LogicalSize;

/// Everything the studio binary needs to start, with the demo's values as defaults.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub title: String,
    /// Window size in logical pixels; also the initial wrap surface.
    pub window_size: Size,
    pub sprite_path: PathBuf,
    pub cursor_path: PathBuf,
    pub cursor_hotspot: (u16, u16),
    /// Placeholder sprite edge length when the sprite asset fails to load.
    pub fallback_sprite_size: u32,
    pub clear_color: Color,
    pub speed: MoveSpeed,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            title: "Moving Image and Mouse Interaction".to_string(),
            window_size: SceneConfig::DEFAULT_SURFACE,
            sprite_path: PathBuf::from("assets/heart.png"),
            cursor_path: PathBuf::from("assets/cursor.png"),
            cursor_hotspot: (0, 0),
            fallback_sprite_size: 64,
            clear_color: Color::from_srgb_u8(255, 255, 255, 255),
            speed: MoveSpeed::default(),
        }
    }
}

impl StudioConfig {
    /// Scene configuration for a sprite of the given size.
    pub fn scene_config(&self, sprite: Size) -> SceneConfig {
        SceneConfig::default()
            .with_surface_size(self.window_size)
            .with_sprite_size(sprite)
    }

    pub fn runtime_config(&self, cursor: Option<CursorImage>) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(
                self.window_size.width as f64,
                self.window_size.height as f64,
            ),
            cursor,
            ..RuntimeConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_window() {
        let cfg = StudioConfig::default();
        assert_eq!(cfg.title, "Moving Image and Mouse Interaction");
        assert_eq!(cfg.window_size, Size::new(600, 605));
        assert_eq!(cfg.cursor_hotspot, (0, 0));
        assert_eq!(cfg.speed.current(), 10);
    }

    #[test]
    fn scene_config_uses_window_as_surface() {
        let cfg = StudioConfig::default();
        let scene = cfg.scene_config(Size::new(32, 30));
        assert_eq!(scene.surface_size, Size::new(600, 605));
        assert_eq!(scene.sprite_size, Size::new(32, 30));
        assert_eq!(scene.wrap_top, 25);
    }

    #[test]
    fn runtime_config_carries_title_and_size() {
        let rc = StudioConfig::default().runtime_config(None);
        assert_eq!(rc.title, "Moving Image and Mouse Interaction");
        assert_eq!(rc.initial_size, LogicalSize::new(600.0, 605.0));
        assert!(rc.cursor.is_none());
    }
}
