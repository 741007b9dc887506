//! Kardia engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the studio binary: the winit
//! window loop, input translation, the wgpu device, image decoding and the
//! sprite renderer.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod draw;
pub mod texture;
