//! `kardia-studio`: a window with draggable sprites.
//!
//! Left click spawns a sprite, middle click removes one, right-drag moves one,
//! and the arrow keys move them all (faster while Shift is held).

mod app;
mod assets;
mod bindings;
mod config;

use anyhow::Result;
use kardia_engine::device::GpuInit;
use kardia_engine::logging::{init_logging, LoggingConfig};
use kardia_engine::window::Runtime;

use crate::app::StudioApp;
use crate::assets::Assets;
use crate::config::StudioConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = StudioConfig::default();
    let assets = Assets::load(&config);
    if assets.sprite_is_placeholder {
        log::warn!("drawing placeholder sprites");
    }

    let runtime = config.runtime_config(assets.cursor.clone());
    let app = StudioApp::new(&config, assets);

    log::info!("starting {}", config.title);
    Runtime::run(runtime, GpuInit::default(), app)
}
