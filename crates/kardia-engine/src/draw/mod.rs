//! Draw stream types.
//!
//! The application records renderer-agnostic commands into a `DrawList` each
//! frame. Commands paint in insertion order (later on top).

mod cmd;
mod list;

pub use cmd::{DrawCmd, SpriteCmd};
pub use list::DrawList;
