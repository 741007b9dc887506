//! Scene state for the **kardia** sprite demo.
//!
//! Owns the ordered list of placed sprites and the single optional drag, and
//! exposes one method per user gesture. Nothing in here knows about windows,
//! input devices or GPUs; the studio binary translates platform events into
//! calls on [`Scene`].
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`geom`] | `Point`, `Size` (integer logical pixels) |
//! | [`config`] | `SceneConfig`, `MoveSpeed` |
//! | [`scene`] | `Scene`, `PlacedImage`, `DragState`, `Direction` |
//!
//! # Quick start
//!
//! ```rust
//! use kardia_scene::{Scene, SceneConfig, Size};
//!
//! let mut scene = Scene::new(SceneConfig::default().with_sprite_size(Size::new(50, 50)));
//! scene.spawn(100, 100);
//! assert_eq!(scene.len(), 2);
//! assert_eq!(scene.images()[1].position.x, 75);
//! ```

pub mod config;
pub mod geom;
pub mod scene;

pub use config::{MoveSpeed, SceneConfig};
pub use geom::{Point, Size};
pub use scene::{Direction, DragState, PlacedImage, Scene};
