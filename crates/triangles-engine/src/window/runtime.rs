use anyhow::{anyhow, Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, Event, EventResponse};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction, WgpuContext};
use crate::input::platform::translate_window_event;
use crate::input::PointerState;
use crate::time::{FpsCounter, FrameClock};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "triangles".to_string(),
            initial_size: LogicalSize::new(400.0, 600.0),
        }
    }
}

/// Drives an [`App`] from a winit event loop and a wgpu-backed context.
pub struct Runtime;

impl Runtime {
    /// Runs until the window closes or rendering fails.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

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
    pointer: PointerState,
    clock: FrameClock,
    fps: FpsCounter,
    visible: bool,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gl: WgpuContext<'this>,
}

impl WindowEntry {
    fn create(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        WindowEntryTryBuilder {
            pointer: PointerState::new(),
            clock: FrameClock::new(),
            fps: FpsCounter::default(),
            visible: false,
            window,
            gl_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)).map(WgpuContext::new),
        }
        .try_build()
    }

    fn id(&self) -> WindowId {
        self.with_window(|w| w.id())
    }

    fn request_redraw(&self) {
        self.with_window(|w| w.request_redraw());
    }

    fn is_visible(&self) -> bool {
        self.with(|f| *f.visible)
    }

    /// Delivers a lifecycle crossing if `visible` differs from the last one.
    fn set_visible<A: App>(&mut self, app: &mut A, visible: bool) {
        self.with_mut(|f| {
            if *f.visible == visible {
                return;
            }
            *f.visible = visible;
            log::info!("window {}", if visible { "visible" } else { "hidden" });
            if visible {
                f.clock.reset();
            }
            app.handle_event(f.gl, Event::Lifecycle { visible });
        });
    }

    /// Resizes the surface and delivers the new size in logical points.
    fn resize<A: App>(&mut self, app: &mut A, new_size: PhysicalSize<u32>) {
        self.with_mut(|f| {
            f.gl.resize(new_size);
            let logical: LogicalSize<f32> = new_size.to_logical(f.window.scale_factor());
            app.handle_event(
                f.gl,
                Event::Size { width: logical.width, height: logical.height },
            );
        });
    }

    fn pointer_event<A: App>(&mut self, app: &mut A, event: &WindowEvent) {
        self.with_mut(|f| {
            let Some(input) = translate_window_event(f.window.scale_factor(), event) else {
                return;
            };
            if let Some(touch) = f.pointer.apply(input) {
                app.handle_event(f.gl, touch);
            }
        });
    }

    /// Delivers a paint and ends it. Returns `false` if rendering cannot go on.
    fn paint<A: App>(&mut self, app: &mut A) -> bool {
        self.with_mut(|f| {
            let frame = f.clock.tick();
            if let Some(fps) = f.fps.record(frame) {
                log::debug!("{fps:.1} fps (frame {})", frame.frame_index);
            }

            if let EventResponse::EndPaint(outcome) = app.handle_event(&mut *f.gl, Event::Paint) {
                log::trace!("paint {outcome:?}");
            }

            let Err(err) = f.gl.end_paint() else {
                return true;
            };
            match f.gl.handle_surface_error(err.clone()) {
                SurfaceErrorAction::Reconfigured => {
                    log::debug!("surface reconfigured after {err}");
                    true
                }
                SurfaceErrorAction::SkipFrame => {
                    log::warn!("frame skipped: {err}");
                    true
                }
                SurfaceErrorAction::Fatal => {
                    log::error!("surface error: {err}");
                    false
                }
            }
        })
    }
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    exit_requested: bool,
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            exit_requested: false,
            failure: None,
        }
    }

    /// Hides the window (releasing the app's graphics handles) and drops it.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut entry) = self.entry.take() {
            entry.set_visible(&mut self.app, false);
        }
        self.exit_requested = true;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.shutdown(event_loop);
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_none() {
            match WindowEntry::create(event_loop, &self.config, self.gpu_init.clone()) {
                Ok(entry) => self.entry = Some(entry),
                Err(e) => {
                    self.fail(event_loop, e.context("failed to initialize window"));
                    return;
                }
            }
        }

        let (app, Some(entry)) = (&mut self.app, self.entry.as_mut()) else {
            return;
        };
        entry.set_visible(app, true);
        let size = entry.with_window(|w| w.inner_size());
        entry.resize(app, size);
        entry.request_redraw();
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(entry) = self.entry.as_mut() {
            entry.set_visible(&mut self.app, false);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw while visible.
        if let Some(entry) = self.entry.as_ref().filter(|e| e.is_visible()) {
            entry.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut().filter(|e| e.id() == window_id) else {
            return;
        };

        match &event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(new_size) => {
                entry.resize(app, *new_size);
                entry.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.resize(app, new_size);
                entry.request_redraw();
            }

            WindowEvent::Occluded(occluded) => entry.set_visible(app, !occluded),

            WindowEvent::RedrawRequested => {
                if !entry.paint(app) {
                    self.fail(event_loop, anyhow!("rendering stopped after a fatal surface error"));
                }
            }

            other => entry.pointer_event(app, other),
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            self.shutdown(event_loop);
        }
    }
}
