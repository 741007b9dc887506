use crate::input::{InputEvent, InputState};

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    /// Nothing visible changed.
    Continue,
    /// State changed; schedule a repaint.
    Redraw,
    /// Close the window and leave the event loop.
    Exit,
}

impl AppControl {
    /// Combines two directives, keeping the stronger one (`Exit > Redraw > Continue`).
    #[inline]
    pub fn merge(self, other: AppControl) -> AppControl {
        match (self, other) {
            (AppControl::Exit, _) | (_, AppControl::Exit) => AppControl::Exit,
            (AppControl::Redraw, _) | (_, AppControl::Redraw) => AppControl::Redraw,
            _ => AppControl::Continue,
        }
    }
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called for every translated input event, after `input` was updated.
    fn on_input(&mut self, event: &InputEvent, input: &InputState) -> AppControl {
        let _ = (event, input);
        AppControl::Continue
    }

    /// Called once at startup and whenever the logical surface size changes.
    fn on_resize(&mut self, width: f32, height: f32) -> AppControl {
        let _ = (width, height);
        AppControl::Continue
    }

    /// Called when the window needs repainting.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_exit() {
        assert_eq!(AppControl::Redraw.merge(AppControl::Exit), AppControl::Exit);
        assert_eq!(AppControl::Exit.merge(AppControl::Continue), AppControl::Exit);
    }

    #[test]
    fn merge_prefers_redraw_over_continue() {
        assert_eq!(AppControl::Continue.merge(AppControl::Redraw), AppControl::Redraw);
        assert_eq!(AppControl::Continue.merge(AppControl::Continue), AppControl::Continue);
    }
}
