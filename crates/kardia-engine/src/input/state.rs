use std::collections::HashSet;

use super::types::{
    InputEvent,
    Key,
    KeyState,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};
use super::Modifiers;

/// Current input state for a single window.
///
/// Holds "is down" information and the current pointer position.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss the matching release events never arrive.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        self.keys_down.insert(*key);
                    }
                    KeyState::Released => {
                        self.keys_down.remove(key);
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
                modifiers,
            }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;

                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(*button);
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(button);
                    }
                }
            }
        }
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, modifiers: Modifiers::default(), repeat: false }
    }

    fn button(button: MouseButton, state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state,
            x,
            y,
            modifiers: Modifiers::default(),
        })
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn key_press_and_release_tracked() {
        let mut s = InputState::default();
        s.apply_event(&key(Key::Shift, KeyState::Pressed));
        assert!(s.keys_down.contains(&Key::Shift));
        s.apply_event(&key(Key::Shift, KeyState::Released));
        assert!(!s.keys_down.contains(&Key::Shift));
    }

    #[test]
    fn key_event_refreshes_modifiers() {
        let mut s = InputState::default();
        let shift = Modifiers { shift: true, ..Modifiers::default() };
        s.apply_event(&InputEvent::Key {
            key: Key::ArrowLeft,
            state: KeyState::Pressed,
            modifiers: shift,
            repeat: false,
        });
        assert_eq!(s.modifiers, shift);
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn pointer_move_and_leave() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved(PointerMoveEvent { x: 3.5, y: 4.0 }));
        assert_eq!(s.pointer_pos, Some((3.5, 4.0)));
        s.apply_event(&InputEvent::PointerLeft);
        assert_eq!(s.pointer_pos, None);
    }

    #[test]
    fn button_press_updates_position_and_down_set() {
        let mut s = InputState::default();
        s.apply_event(&button(MouseButton::Right, MouseButtonState::Pressed, 10.0, 20.0));
        assert!(s.button_down(MouseButton::Right));
        assert_eq!(s.pointer_pos, Some((10.0, 20.0)));
        s.apply_event(&button(MouseButton::Right, MouseButtonState::Released, 11.0, 20.0));
        assert!(!s.button_down(MouseButton::Right));
    }

    // ── focus ─────────────────────────────────────────────────────────────

    #[test]
    fn focus_loss_clears_held_inputs() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::Focused(true));
        s.apply_event(&key(Key::Shift, KeyState::Pressed));
        s.apply_event(&button(MouseButton::Right, MouseButtonState::Pressed, 0.0, 0.0));
        s.apply_event(&InputEvent::Focused(false));
        assert!(!s.focused);
        assert!(s.keys_down.is_empty());
        assert!(s.buttons_down.is_empty());
    }
}
