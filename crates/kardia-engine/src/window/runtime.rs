use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::InputState;

use super::cursor::{apply_cursor, CursorImage};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
    /// Custom cursor; `None` keeps the platform default.
    pub cursor: Option<CursorImage>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "kardia".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            resizable: true,
            cursor: None,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and runs the event loop until the window closes or
    /// the app returns `AppControl::Exit`.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    /// Startup failure reported back from `Runtime::run`.
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            fatal: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        if let Some(cursor) = &self.config.cursor {
            apply_cursor(event_loop, &window, cursor);
        }

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .context("GPU initialization failed for window")
            },
        }
        .try_build()
    }

    /// Acts on an app directive. Returns `true` when the loop is exiting.
    fn apply_control(&mut self, event_loop: &ActiveEventLoop, control: AppControl) -> bool {
        match control {
            AppControl::Exit => {
                log::info!("exit requested");
                self.window = None;
                event_loop.exit();
                true
            }
            AppControl::Redraw => {
                if let Some(entry) = &self.window {
                    entry.with_window(|w| w.request_redraw());
                }
                false
            }
            AppControl::Continue => false,
        }
    }

    /// Reconfigures the surface for the window's current size and tells the app.
    fn handle_resize(&mut self) -> AppControl {
        let (app, window) = (&mut self.app, &mut self.window);
        let Some(entry) = window.as_mut() else {
            return AppControl::Continue;
        };

        let (physical, logical) = entry.with_window(|w| {
            let physical = w.inner_size();
            let logical: LogicalSize<f64> = physical.to_logical(w.scale_factor());
            (physical, logical)
        });
        entry.with_gpu_mut(|gpu| gpu.resize(physical));

        log::debug!("surface resized to {}x{} (logical)", logical.width, logical.height);

        // A resize always needs a fresh frame.
        app.on_resize(logical.width as f32, logical.height as f32)
            .merge(AppControl::Redraw)
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                let info = entry.with_gpu(|gpu| gpu.adapter_info());
                log::info!("window ready on {} ({:?})", info.name, info.backend);
                self.window = Some(entry);
            }
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.fatal = Some(e);
                event_loop.exit();
                return;
            }
        }

        let control = self.handle_resize();
        self.apply_control(event_loop, control);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, window) = (&mut self.app, &mut self.window);
        let Some(entry) = window.as_mut() else {
            return;
        };

        let mut control = AppControl::Continue;

        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, fields.input_state, &event) {
                fields.input_state.apply_event(&ev);
                control = app.on_input(&ev, fields.input_state);
            }
        });

        if self.apply_control(event_loop, control) {
            return;
        }

        // Runtime-managed window lifecycle / resize / redraw handling.
        let control = match &event {
            WindowEvent::CloseRequested => AppControl::Exit,

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => self.handle_resize(),

            WindowEvent::RedrawRequested => {
                let (app, window) = (&mut self.app, &mut self.window);
                let mut control = AppControl::Continue;

                if let Some(entry) = window.as_mut() {
                    entry.with_mut(|fields| {
                        let mut ctx = FrameCtx {
                            window: WindowCtx {
                                window: fields.window,
                            },
                            gpu: fields.gpu,
                        };
                        control = app.on_frame(&mut ctx);
                    });
                }

                control
            }

            _ => AppControl::Continue,
        };

        self.apply_control(event_loop, control);
    }
}
