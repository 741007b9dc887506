use crate::config::SceneConfig;
use crate::geom::{Point, Size};

/// One visible instance of the sprite.
///
/// Images have no identity beyond their slot in the scene; lookups go through
/// hit-testing against the shared sprite size.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PlacedImage {
    /// Top-left corner in logical pixels.
    pub position: Point,
}

impl PlacedImage {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { position: Point::new(x, y) }
    }
}

/// The drag in progress, if any.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DragState {
    /// Index of the dragged image in paint order.
    pub index: usize,
    /// Cursor position relative to the image's top-left corner at grab time.
    pub offset: Point,
}

/// Arrow-key direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Converts a direction and step length into a `(dx, dy)` delta.
    #[inline]
    pub const fn delta(self, step: i32) -> (i32, i32) {
        match self {
            Direction::Left => (-step, 0),
            Direction::Right => (step, 0),
            Direction::Up => (0, -step),
            Direction::Down => (0, step),
        }
    }
}

/// Ordered collection of placed sprites plus the optional active drag.
///
/// Insertion order is paint order: later images are drawn on top, but the
/// *first* image in order wins hit-tests.
///
/// No operation fails. Coordinates outside the surface are absorbed by the
/// no-op and wrap rules documented on each method.
#[derive(Debug, Clone)]
pub struct Scene {
    config: SceneConfig,
    images: Vec<PlacedImage>,
    drag: Option<DragState>,
}

impl Scene {
    /// Creates a scene holding a single image at `config.initial_position`.
    pub fn new(config: SceneConfig) -> Self {
        let first = PlacedImage { position: config.initial_position };
        Self { config, images: vec![first], drag: None }
    }

    #[inline]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Images in paint order.
    #[inline]
    pub fn images(&self) -> &[PlacedImage] {
        &self.images
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[inline]
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[inline]
    pub fn sprite_size(&self) -> Size {
        self.config.sprite_size
    }

    /// Updates the surface size used by the wrap rule. Existing positions are
    /// left alone until the next [`move_all`](Self::move_all).
    pub fn resize_surface(&mut self, size: Size) {
        if self.config.surface_size != size {
            log::debug!("scene surface resized to {}x{}", size.width, size.height);
            self.config.surface_size = size;
        }
    }

    /// Replaces the sprite size, e.g. once the real sprite asset is decoded.
    pub fn set_sprite_size(&mut self, size: Size) {
        self.config.sprite_size = size;
    }

    /// Translates every image by `(dx, dy)`, then wraps each one that left
    /// the surface.
    ///
    /// Per axis: a negative coordinate wraps flush against the far edge
    /// (`surface − sprite`); a far edge past the surface wraps to the
    /// configured start (`wrap_left` for x, `wrap_top` for y).
    pub fn move_all(&mut self, dx: i32, dy: i32) {
        let SceneConfig { surface_size: surface, sprite_size: sprite, wrap_left, wrap_top, .. } =
            self.config;

        for image in &mut self.images {
            let p = image.position + Point::new(dx, dy);
            image.position = Point::new(
                wrap_axis(p.x, sprite.width, surface.width, wrap_left),
                wrap_axis(p.y, sprite.height, surface.height, wrap_top),
            );
        }

        log::trace!("moved {} image(s) by ({dx}, {dy})", self.images.len());
    }

    /// Convenience over [`move_all`](Self::move_all) for arrow-key input.
    pub fn nudge(&mut self, direction: Direction, step: i32) {
        let (dx, dy) = direction.delta(step);
        self.move_all(dx, dy);
    }

    /// Appends a new image centred on `(px, py)` and returns it.
    pub fn spawn(&mut self, px: i32, py: i32) -> PlacedImage {
        let sprite = self.config.sprite_size;
        let origin = Point::new(px, py) - Point::new(sprite.width / 2, sprite.height / 2);
        let image = PlacedImage::new(origin.x, origin.y);
        self.images.push(image);

        log::debug!(
            "spawned image at ({}, {}); scene holds {}",
            image.position.x,
            image.position.y,
            self.images.len()
        );
        image
    }

    /// Removes the first image whose box contains `(px, py)`.
    ///
    /// Returns the removed image, or `None` when nothing was hit.
    pub fn remove_at(&mut self, px: i32, py: i32) -> Option<PlacedImage> {
        let index = self.hit_test(Point::new(px, py))?;
        let removed = self.images.remove(index);

        // Keep the drag handle pointing at the same image.
        self.drag = match self.drag {
            Some(d) if d.index == index => None,
            Some(d) if d.index > index => Some(DragState { index: d.index - 1, ..d }),
            other => other,
        };

        log::debug!(
            "removed image at ({}, {}); scene holds {}",
            removed.position.x,
            removed.position.y,
            self.images.len()
        );
        Some(removed)
    }

    /// Grabs the first image under `(px, py)`.
    ///
    /// A hit replaces any drag already in progress; a miss leaves the current
    /// drag state untouched. Returns `true` on a hit.
    pub fn begin_drag(&mut self, px: i32, py: i32) -> bool {
        let p = Point::new(px, py);
        let Some(index) = self.hit_test(p) else {
            return false;
        };

        let offset = p - self.images[index].position;
        if self.drag.is_some() {
            log::debug!("drag overwritten by a new grab");
        }
        self.drag = Some(DragState { index, offset });

        log::debug!("drag started on image {index} with offset ({}, {})", offset.x, offset.y);
        true
    }

    /// Moves the dragged image so the grab offset stays under `(px, py)`.
    ///
    /// Returns `true` if an image moved.
    pub fn update_drag(&mut self, px: i32, py: i32) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let Some(image) = self.images.get_mut(drag.index) else {
            return false;
        };

        image.position = Point::new(px, py) - drag.offset;
        true
    }

    /// Ends the current drag. Returns `true` if a drag was active.
    pub fn end_drag(&mut self) -> bool {
        let was_dragging = self.drag.take().is_some();
        if was_dragging {
            log::debug!("drag ended");
        }
        was_dragging
    }

    /// Index of the first image (in paint order) whose box contains `p`.
    fn hit_test(&self, p: Point) -> Option<usize> {
        let sprite = self.config.sprite_size;
        self.images.iter().position(|img| sprite.contains_at(img.position, p))
    }
}

fn wrap_axis(pos: i32, sprite: i32, surface: i32, restart: i32) -> i32 {
    if pos < 0 {
        surface - sprite
    } else if pos.saturating_add(sprite) > surface {
        restart
    } else {
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_50() -> Scene {
        Scene::new(SceneConfig::default().with_sprite_size(Size::new(50, 50)))
    }

    fn positions(scene: &Scene) -> Vec<(i32, i32)> {
        scene.images().iter().map(|i| (i.position.x, i.position.y)).collect()
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn starts_with_one_image_at_initial_position() {
        let scene = scene_50();
        assert_eq!(positions(&scene), vec![(0, 25)]);
        assert!(!scene.is_dragging());
    }

    // ── move_all ──────────────────────────────────────────────────────────

    #[test]
    fn move_all_translates_every_image() {
        let mut scene = scene_50();
        scene.spawn(225, 225);
        scene.move_all(10, 5);
        assert_eq!(positions(&scene), vec![(10, 30), (210, 205)]);
    }

    #[test]
    fn moving_left_past_zero_wraps_to_far_edge() {
        let mut scene = scene_50();
        scene.move_all(-10, 0);
        assert_eq!(positions(&scene), vec![(550, 25)]);
    }

    #[test]
    fn moving_right_past_edge_wraps_to_zero() {
        let mut scene = scene_50();
        scene.move_all(540, 0);
        assert_eq!(positions(&scene), vec![(540, 25)]);
        scene.move_all(20, 0);
        assert_eq!(positions(&scene), vec![(0, 25)]);
    }

    #[test]
    fn moving_up_past_zero_wraps_to_bottom() {
        let mut scene = scene_50();
        scene.move_all(0, -30);
        assert_eq!(positions(&scene), vec![(0, 555)]);
    }

    #[test]
    fn moving_down_past_edge_wraps_to_top_margin() {
        let mut scene = scene_50();
        scene.move_all(0, 530);
        assert_eq!(positions(&scene), vec![(0, 555)]);
        scene.move_all(0, 10);
        assert_eq!(positions(&scene), vec![(0, 25)]);
    }

    #[test]
    fn wrap_is_decided_per_image() {
        let mut scene = scene_50();
        scene.spawn(325, 125); // (300, 100)
        scene.move_all(-5, 0);
        assert_eq!(positions(&scene), vec![(550, 25), (295, 100)]);
    }

    #[test]
    fn exactly_touching_far_edge_does_not_wrap() {
        let mut scene = scene_50();
        scene.move_all(550, 0);
        assert_eq!(positions(&scene), vec![(550, 25)]);
    }

    #[test]
    fn repeated_moves_stay_on_surface() {
        let mut scene = scene_50();
        for _ in 0..200 {
            scene.move_all(-10, 7);
            for img in scene.images() {
                assert!((0..=550).contains(&img.position.x));
                assert!((0..=555).contains(&img.position.y));
            }
        }
    }

    #[test]
    fn wrap_follows_resized_surface() {
        let mut scene = scene_50();
        scene.resize_surface(Size::new(300, 200));
        scene.move_all(-10, 0);
        assert_eq!(positions(&scene), vec![(250, 25)]);
    }

    #[test]
    fn nudge_uses_direction_and_step() {
        let mut scene = scene_50();
        scene.nudge(Direction::Right, 20);
        scene.nudge(Direction::Down, 10);
        assert_eq!(positions(&scene), vec![(20, 35)]);
    }

    // ── spawn ─────────────────────────────────────────────────────────────

    #[test]
    fn spawn_centres_on_pointer() {
        let mut scene = scene_50();
        let img = scene.spawn(100, 100);
        assert_eq!(img, PlacedImage::new(75, 75));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.images()[1], img);
    }

    #[test]
    fn spawn_has_no_upper_bound() {
        let mut scene = scene_50();
        for i in 0..1000 {
            scene.spawn(i, i);
        }
        assert_eq!(scene.len(), 1001);
    }

    #[test]
    fn spawn_at_extreme_coordinates_does_not_panic() {
        let mut scene = scene_50();
        let low = scene.spawn(i32::MIN, i32::MIN);
        let high = scene.spawn(i32::MAX, i32::MAX);
        assert_eq!(low.position, Point::new(i32::MIN.wrapping_sub(25), i32::MIN.wrapping_sub(25)));
        assert_eq!(high.position, Point::new(i32::MAX - 25, i32::MAX - 25));
        assert_eq!(scene.len(), 3);
    }

    // ── remove_at ─────────────────────────────────────────────────────────

    #[test]
    fn remove_inside_one_box_removes_only_it() {
        let mut scene = scene_50();
        scene.spawn(325, 325); // (300, 300)
        let removed = scene.remove_at(310, 340);
        assert_eq!(removed, Some(PlacedImage::new(300, 300)));
        assert_eq!(positions(&scene), vec![(0, 25)]);
    }

    #[test]
    fn remove_outside_all_boxes_is_noop() {
        let mut scene = scene_50();
        scene.spawn(325, 325);
        assert_eq!(scene.remove_at(200, 200), None);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn remove_takes_first_of_overlapping() {
        let mut scene = scene_50();
        scene.spawn(25, 50); // (0, 25), same box as the first image
        scene.spawn(40, 60); // (15, 35)
        scene.remove_at(20, 40);
        assert_eq!(positions(&scene), vec![(0, 25), (15, 35)]);
    }

    #[test]
    fn remove_on_box_edge_counts_as_hit() {
        let mut scene = scene_50();
        assert!(scene.remove_at(50, 75).is_some());
        assert!(scene.is_empty());
    }

    #[test]
    fn scene_can_be_emptied_and_refilled() {
        let mut scene = scene_50();
        scene.remove_at(0, 25);
        assert!(scene.is_empty());
        scene.move_all(10, 10);
        assert!(scene.remove_at(0, 25).is_none());
        scene.spawn(25, 25);
        assert_eq!(scene.len(), 1);
    }

    // ── drag ──────────────────────────────────────────────────────────────

    #[test]
    fn drag_moves_by_pointer_delta() {
        let mut scene = scene_50();
        assert!(scene.begin_drag(10, 40));
        assert_eq!(scene.drag().map(|d| d.offset), Some(Point::new(10, 15)));

        for (x, y) in [(12, 41), (300, 2), (-40, 90), (110, 140)] {
            scene.update_drag(x, y);
        }
        assert_eq!(positions(&scene), vec![(100, 125)]);
    }

    #[test]
    fn drag_only_moves_grabbed_image() {
        let mut scene = scene_50();
        scene.spawn(325, 325);
        scene.begin_drag(320, 320);
        scene.update_drag(420, 330);
        assert_eq!(positions(&scene), vec![(0, 25), (400, 310)]);
    }

    #[test]
    fn begin_drag_miss_is_noop() {
        let mut scene = scene_50();
        assert!(!scene.begin_drag(400, 400));
        assert!(!scene.is_dragging());
        assert!(!scene.update_drag(10, 10));
        assert_eq!(positions(&scene), vec![(0, 25)]);
    }

    #[test]
    fn begin_drag_miss_keeps_active_drag() {
        let mut scene = scene_50();
        scene.begin_drag(5, 30);
        assert!(!scene.begin_drag(400, 400));
        assert_eq!(scene.drag().map(|d| d.index), Some(0));
    }

    #[test]
    fn second_grab_overwrites_active_drag() {
        let mut scene = scene_50();
        scene.spawn(325, 325);
        scene.begin_drag(5, 30);
        assert!(scene.begin_drag(300, 300));
        assert_eq!(scene.drag(), Some(&DragState { index: 1, offset: Point::new(0, 0) }));
        scene.update_drag(100, 100);
        assert_eq!(positions(&scene), vec![(0, 25), (100, 100)]);
    }

    #[test]
    fn end_then_update_is_noop() {
        let mut scene = scene_50();
        scene.begin_drag(5, 30);
        assert!(scene.end_drag());
        assert!(!scene.update_drag(200, 200));
        assert_eq!(positions(&scene), vec![(0, 25)]);
        assert!(!scene.end_drag());
    }

    #[test]
    fn dragging_does_not_wrap() {
        let mut scene = scene_50();
        scene.begin_drag(0, 25);
        scene.update_drag(-100, 900);
        assert_eq!(positions(&scene), vec![(-100, 900)]);
    }

    #[test]
    fn removing_dragged_image_clears_drag() {
        let mut scene = scene_50();
        scene.begin_drag(5, 30);
        scene.remove_at(5, 30);
        assert!(!scene.is_dragging());
    }

    #[test]
    fn removing_earlier_image_keeps_drag_on_same_image() {
        let mut scene = scene_50();
        scene.spawn(325, 325); // (300, 300)
        scene.begin_drag(310, 310);
        scene.remove_at(5, 30);
        assert_eq!(scene.drag().map(|d| d.index), Some(0));
        scene.update_drag(20, 20);
        assert_eq!(positions(&scene), vec![(10, 10)]);
    }

    #[test]
    fn removing_later_image_keeps_drag_index() {
        let mut scene = scene_50();
        scene.spawn(325, 325);
        scene.begin_drag(5, 30);
        scene.remove_at(310, 310);
        assert_eq!(scene.drag().map(|d| d.index), Some(0));
    }

    // ── sprite size ───────────────────────────────────────────────────────

    #[test]
    fn hit_test_uses_current_sprite_size() {
        let mut scene = scene_50();
        assert!(!scene.begin_drag(80, 30));
        scene.set_sprite_size(Size::new(100, 100));
        assert!(scene.begin_drag(80, 30));
    }
}
