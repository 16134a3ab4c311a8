//! Window + event loop.
//!
//! Owns the winit window and its GPU surface and drives a [`Game`]: events go in,
//! a composited framebuffer comes out once per redraw and is presented.

use anyhow::{Context, Result};
use marduk_view::ImageSurface;
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::RuntimeConfig;
use crate::gpu::{Gpu, GpuInit, SurfaceErrorAction};
use crate::present::Presenter;

/// Directive returned by game callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Control {
    Continue,
    Exit,
}

/// What the runtime needs from the demo scene.
pub trait Game {
    fn on_window_event(&mut self, event: &WindowEvent) -> Control {
        let _ = event;
        Control::Continue
    }

    /// Drawable size changed (physical pixels).
    fn on_resize(&mut self, width: u32, height: u32);

    /// Composites one frame and returns the finished screen.
    fn on_frame(&mut self) -> &ImageSurface;
}

pub struct Runtime;

impl Runtime {
    pub fn run<G: Game>(config: RuntimeConfig, gpu_init: GpuInit, game: G) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState {
            config,
            gpu_init,
            game,
            entry: None,
            presenter: None,
            failure: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<G> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    game: G,

    entry: Option<WindowEntry>,
    presenter: Option<Presenter>,
    failure: Option<anyhow::Error>,
}

impl<G: Game> AppState<G> {
    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        let size = entry.borrow_gpu().size();
        self.game.on_resize(size.width, size.height);
        entry.borrow_window().request_redraw();
        self.entry = Some(entry);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }

    /// Composites and presents one frame. Returns `false` on a fatal surface error.
    fn redraw(&mut self) -> bool {
        let Self { game, entry, presenter, .. } = self;
        let Some(entry) = entry.as_mut() else { return true };

        let size = entry.borrow_gpu().size();
        if size.width == 0 || size.height == 0 {
            return true;
        }

        let screen = game.on_frame();

        entry.with_mut(|fields| {
            let gpu = fields.gpu;
            let mut frame = match gpu.begin_frame() {
                Ok(frame) => frame,
                Err(err) => return gpu.handle_surface_error(err) != SurfaceErrorAction::Fatal,
            };

            let presenter = presenter
                .get_or_insert_with(|| Presenter::new(gpu.device(), gpu.surface_format()));
            presenter.present(gpu.device(), gpu.queue(), &mut frame, screen);

            fields.window.pre_present_notify();
            gpu.submit(frame);
            true
        })
    }
}

impl<G: Game> ApplicationHandler for AppState<G> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; the scene animates.
        if let Some(entry) = self.entry.as_ref() {
            entry.borrow_window().request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.game.on_window_event(&event) == Control::Exit {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.borrow_window().request_redraw();
                }
                if new_size.width > 0 && new_size.height > 0 {
                    self.game.on_resize(new_size.width, new_size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                if !self.redraw() {
                    self.fail(event_loop, anyhow::anyhow!("surface out of memory"));
                }
            }

            _ => {}
        }
    }
}
