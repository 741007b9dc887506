use kardia_engine::coords::Rect;
use kardia_engine::core::{App, AppControl, FrameCtx};
use kardia_engine::draw::DrawList;
use kardia_engine::input::{InputEvent, InputState, MouseButton};
use kardia_engine::paint::Color;
use kardia_engine::render::SpriteRenderer;
use kardia_engine::texture::TextureId;
use kardia_scene::{Scene, SceneConfig, Size};

use crate::assets::Assets;
use crate::bindings::Controller;
use crate::config::StudioConfig;

/// The studio application: scene state, its input bindings, and the sprite renderer.
pub struct StudioApp {
    controller: Controller,
    renderer: SpriteRenderer,
    sprite: TextureId,
    draw_list: DrawList,
    clear: Color,
}

impl StudioApp {
    pub fn new(config: &StudioConfig, assets: Assets) -> Self {
        let mut renderer = SpriteRenderer::new();
        let sprite = renderer.register(assets.sprite);

        let sprite_size = renderer
            .texture_size(sprite)
            .map(|(w, h)| Size::new(w as i32, h as i32))
            .unwrap_or(SceneConfig::DEFAULT_SPRITE);
        let scene = Scene::new(config.scene_config(sprite_size));

        Self {
            controller: Controller::new(scene, config.speed),
            renderer,
            sprite,
            draw_list: DrawList::new(),
            clear: config.clear_color,
        }
    }

    /// Records one sprite per placed image, in scene order.
    fn record(&mut self) {
        self.draw_list.clear();
        let size = self.controller.scene().sprite_size();
        for image in self.controller.scene().images() {
            let p = image.position;
            self.draw_list
                .push_sprite(self.sprite, Rect::from_pixels(p.x, p.y, size.width, size.height));
        }
    }
}

impl App for StudioApp {
    fn on_input(&mut self, event: &InputEvent, input: &InputState) -> AppControl {
        // A right release delivered outside the window never reaches us.
        if matches!(event, InputEvent::PointerMoved(_))
            && self.controller.scene().is_dragging()
            && !input.button_down(MouseButton::Right)
        {
            self.controller.scene_mut().end_drag();
        }

        if self.controller.handle(event) {
            AppControl::Redraw
        } else {
            AppControl::Continue
        }
    }

    fn on_resize(&mut self, width: f32, height: f32) -> AppControl {
        let size = Size::new(width.round() as i32, height.round() as i32);
        self.controller.scene_mut().resize_surface(size);
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.record();

        let (renderer, draw_list) = (&mut self.renderer, &self.draw_list);
        ctx.render(self.clear, |rctx, target| {
            renderer.render(rctx, target, draw_list);
        })
    }
}
