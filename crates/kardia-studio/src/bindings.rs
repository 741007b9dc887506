//! Input bindings: engine input events in, scene operations out.
//!
//! | input | action |
//! |-------|--------|
//! | left button press | spawn a sprite centred on the pointer |
//! | middle button press | remove the first sprite under the pointer |
//! | right button press / move / release | drag a sprite |
//! | arrow keys (incl. repeats) | move every sprite by the current speed |
//! | Shift held | double the speed |

use kardia_engine::coords::Vec2;
use kardia_engine::input::{
    InputEvent, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent,
};
use kardia_scene::{Direction, MoveSpeed, Scene};

/// Owns the scene plus the movement speed and routes input to them.
#[derive(Debug)]
pub struct Controller {
    scene: Scene,
    speed: MoveSpeed,
}

impl Controller {
    pub fn new(scene: Scene, speed: MoveSpeed) -> Self {
        Self { scene, speed }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Applies one input event. Returns `true` if any sprite moved, appeared
    /// or disappeared.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key { key: Key::Shift, state, .. } => {
                let boost = *state == KeyState::Pressed;
                if self.speed.set_boost(boost) {
                    log::debug!("move speed now {}", self.speed.current());
                }
                false
            }

            InputEvent::Key { key, state: KeyState::Pressed, .. } if key.is_arrow() => {
                let Some(direction) = arrow_direction(*key) else {
                    return false;
                };
                self.scene.nudge(direction, self.speed.current());
                !self.scene.is_empty()
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y, .. }) => {
                let (px, py) = pixel(*x, *y);
                match (button, state) {
                    (MouseButton::Left, MouseButtonState::Pressed) => {
                        self.scene.spawn(px, py);
                        true
                    }
                    (MouseButton::Middle, MouseButtonState::Pressed) => {
                        self.scene.remove_at(px, py).is_some()
                    }
                    (MouseButton::Right, MouseButtonState::Pressed) => {
                        self.scene.begin_drag(px, py);
                        false
                    }
                    (MouseButton::Right, MouseButtonState::Released) => {
                        self.scene.end_drag();
                        false
                    }
                    _ => false,
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                let (px, py) = pixel(*x, *y);
                self.scene.update_drag(px, py)
            }

            InputEvent::Focused(false) => {
                // The Shift release is never delivered once focus is gone.
                if self.speed.set_boost(false) {
                    log::debug!("focus lost; move speed reset to {}", self.speed.current());
                }
                false
            }

            _ => false,
        }
    }
}

fn arrow_direction(key: Key) -> Option<Direction> {
    match key {
        Key::ArrowLeft => Some(Direction::Left),
        Key::ArrowRight => Some(Direction::Right),
        Key::ArrowUp => Some(Direction::Up),
        Key::ArrowDown => Some(Direction::Down),
        _ => None,
    }
}

fn pixel(x: f32, y: f32) -> (i32, i32) {
    Vec2::new(x, y).floor_i32()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kardia_engine::input::Modifiers;
    use kardia_scene::{Point, SceneConfig, Size};

    fn controller(sprite: i32) -> Controller {
        let config = SceneConfig::default().with_sprite_size(Size::new(sprite, sprite));
        Controller::new(Scene::new(config), MoveSpeed::default())
    }

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

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    fn positions(c: &Controller) -> Vec<Point> {
        c.scene().images().iter().map(|i| i.position).collect()
    }

    // ── keyboard ──────────────────────────────────────────────────────────

    #[test]
    fn shift_boost_scenario() {
        let mut c = controller(50);
        assert_eq!(positions(&c), vec![Point::new(0, 25)]);

        c.handle(&key(Key::Shift, KeyState::Pressed));
        assert!(c.handle(&key(Key::ArrowRight, KeyState::Pressed)));
        assert_eq!(positions(&c), vec![Point::new(20, 25)]);

        c.handle(&key(Key::Shift, KeyState::Released));
        assert!(c.handle(&key(Key::ArrowRight, KeyState::Pressed)));
        assert_eq!(positions(&c), vec![Point::new(30, 25)]);
    }

    #[test]
    fn holding_shift_does_not_accelerate() {
        let mut c = controller(50);
        c.handle(&key(Key::Shift, KeyState::Pressed));
        c.handle(&InputEvent::Key {
            key: Key::Shift,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat: true,
        });
        assert_eq!(c.speed.current(), 20);
    }

    #[test]
    fn arrow_repeat_keeps_moving() {
        let mut c = controller(50);
        let repeat = InputEvent::Key {
            key: Key::ArrowDown,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat: true,
        };
        c.handle(&key(Key::ArrowDown, KeyState::Pressed));
        c.handle(&repeat);
        assert_eq!(positions(&c), vec![Point::new(0, 45)]);
    }

    #[test]
    fn arrow_release_does_nothing() {
        let mut c = controller(50);
        assert!(!c.handle(&key(Key::ArrowLeft, KeyState::Released)));
        assert_eq!(positions(&c), vec![Point::new(0, 25)]);
    }

    #[test]
    fn left_arrow_wraps_to_far_edge() {
        let mut c = controller(50);
        c.handle(&key(Key::ArrowLeft, KeyState::Pressed));
        assert_eq!(positions(&c), vec![Point::new(550, 25)]);
    }

    #[test]
    fn unbound_key_is_ignored() {
        let mut c = controller(50);
        assert!(!c.handle(&key(Key::Space, KeyState::Pressed)));
    }

    #[test]
    fn focus_loss_drops_boost() {
        let mut c = controller(50);
        c.handle(&key(Key::Shift, KeyState::Pressed));
        c.handle(&InputEvent::Focused(false));
        assert!(!c.speed.is_boosted());
        c.handle(&key(Key::ArrowRight, KeyState::Pressed));
        assert_eq!(positions(&c), vec![Point::new(10, 25)]);
    }

    // ── mouse ─────────────────────────────────────────────────────────────

    #[test]
    fn left_click_spawns_centred() {
        let mut c = controller(50);
        assert!(c.handle(&button(MouseButton::Left, MouseButtonState::Pressed, 100.0, 100.0)));
        assert_eq!(positions(&c), vec![Point::new(0, 25), Point::new(75, 75)]);
    }

    #[test]
    fn left_release_does_not_spawn() {
        let mut c = controller(50);
        assert!(!c.handle(&button(MouseButton::Left, MouseButtonState::Released, 100.0, 100.0)));
        assert_eq!(c.scene().len(), 1);
    }

    #[test]
    fn fractional_pointer_coordinates_floor() {
        let mut c = controller(50);
        c.handle(&button(MouseButton::Left, MouseButtonState::Pressed, 100.9, 100.2));
        assert_eq!(c.scene().images()[1].position, Point::new(75, 75));
    }

    #[test]
    fn middle_click_removes_hit_only() {
        let mut c = controller(50);
        assert!(c.handle(&button(MouseButton::Middle, MouseButtonState::Pressed, 10.0, 30.0)));
        assert!(c.scene().is_empty());
        assert!(!c.handle(&button(MouseButton::Middle, MouseButtonState::Pressed, 10.0, 30.0)));
    }

    #[test]
    fn right_drag_moves_by_pointer_delta() {
        let mut c = controller(50);
        c.handle(&button(MouseButton::Right, MouseButtonState::Pressed, 10.0, 30.0));
        assert!(c.handle(&moved(40.0, 60.0)));
        assert!(c.handle(&moved(110.0, 95.0)));
        assert_eq!(positions(&c), vec![Point::new(100, 90)]);

        c.handle(&button(MouseButton::Right, MouseButtonState::Released, 110.0, 95.0));
        assert!(!c.handle(&moved(300.0, 300.0)));
        assert_eq!(positions(&c), vec![Point::new(100, 90)]);
    }

    #[test]
    fn pointer_move_without_drag_is_noop() {
        let mut c = controller(50);
        assert!(!c.handle(&moved(5.0, 30.0)));
    }
}
