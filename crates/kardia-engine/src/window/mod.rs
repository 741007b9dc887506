//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single Window, and wires them to the
//! GPU layer and the application.

mod cursor;
mod runtime;

pub use cursor::CursorImage;
pub use runtime::{Runtime, RuntimeConfig};
