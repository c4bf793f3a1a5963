use crate::coords::{TouchPoint, Viewport};
use crate::core::{App, Event, EventResponse, PaintOutcome, SkipReason};
use crate::gfx::{BufferId, BufferTarget, DrawMode, GraphicsContext, GraphicsError};
use crate::paint::Color;

use super::geometry::{upload_triangle, COORDS_PER_VERTEX, VERTEX_COUNT};
use super::program::{ShaderSources, TriangleProgram};
use super::transform::scan_matrix;

/// Clear color of every frame.
///
/// Older documentation of this demo describes a red background; the clear
/// color has always been white and is kept as is.
pub const BACKGROUND: Color = Color::WHITE;

/// Fill color of the triangle.
pub const ACCENT: Color = Color::new(0.0, 0.5, 0.8, 1.0);

/// Graphics objects owned while running.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GraphicsHandles {
    pub program: TriangleProgram,
    pub buffer: BufferId,
}

#[derive(Debug)]
enum RenderState {
    Stopped,
    Running(GraphicsHandles),
}

/// Touch-driven triangle renderer.
///
/// `Stopped` until the app becomes visible; entering `Running` links the
/// program and uploads the triangle, leaving it releases both. Touch and
/// viewport are tracked in either state, so a paint after restart uses the
/// latest values.
#[derive(Debug)]
pub struct Renderer {
    sources: ShaderSources,
    state: RenderState,
    touch: TouchPoint,
    viewport: Viewport,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::with_shaders(ShaderSources::default())
    }

    pub fn with_shaders(sources: ShaderSources) -> Self {
        Self {
            sources,
            state: RenderState::Stopped,
            touch: TouchPoint::default(),
            viewport: Viewport::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, RenderState::Running(_))
    }

    pub fn handles(&self) -> Option<&GraphicsHandles> {
        match &self.state {
            RenderState::Running(h) => Some(h),
            RenderState::Stopped => None,
        }
    }

    pub fn touch(&self) -> TouchPoint {
        self.touch
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Dispatches one event.
    pub fn handle_event<G>(&mut self, gl: &mut G, event: Event) -> EventResponse
    where
        G: GraphicsContext + ?Sized,
    {
        match event {
            Event::Lifecycle { visible } => {
                self.on_lifecycle_cross(gl, visible);
                EventResponse::Handled
            }
            Event::Size { width, height } => {
                self.on_size_changed(width, height);
                EventResponse::Handled
            }
            Event::Touch { x, y, .. } => {
                self.on_touch(x, y);
                EventResponse::Handled
            }
            Event::Paint => EventResponse::EndPaint(self.on_paint(gl)),
        }
    }

    pub fn on_lifecycle_cross<G>(&mut self, gl: &mut G, visible: bool)
    where
        G: GraphicsContext + ?Sized,
    {
        match (visible, self.is_running()) {
            (true, false) => self.start(gl),
            (false, true) => self.stop(gl),
            _ => {
                log::debug!("lifecycle cross to visible={visible} ignored; already there");
            }
        }
    }

    /// Sets the viewport and resets the touch point to two thirds of it.
    pub fn on_size_changed(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.touch = self.viewport.default_touch();
        log::debug!("viewport {width}x{height}");
    }

    pub fn on_touch(&mut self, x: f32, y: f32) {
        let p = TouchPoint::new(x, y);
        if !p.is_finite() {
            log::debug!("non-finite touch ({x}, {y}) ignored");
            return;
        }
        self.touch = p;
    }

    /// Draws one frame if running; never fails.
    ///
    /// Graphics errors are logged and reported as [`PaintOutcome::Failed`].
    pub fn on_paint<G>(&mut self, gl: &mut G) -> PaintOutcome
    where
        G: GraphicsContext + ?Sized,
    {
        match self.paint(gl) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("paint failed, frame skipped: {e}");
                PaintOutcome::Failed
            }
        }
    }

    /// Draws one frame, returning the first graphics error.
    pub fn paint<G>(&self, gl: &mut G) -> Result<PaintOutcome, GraphicsError>
    where
        G: GraphicsContext + ?Sized,
    {
        let RenderState::Running(handles) = &self.state else {
            return Ok(PaintOutcome::Skipped(SkipReason::Stopped));
        };
        let Some(scan) = scan_matrix(self.touch, self.viewport) else {
            return Ok(PaintOutcome::Skipped(SkipReason::EmptyViewport));
        };
        let p = handles.program;

        gl.clear_color(BACKGROUND);
        gl.clear();

        gl.use_program(p.program)?;
        gl.uniform4f(p.color, ACCENT.to_array())?;
        gl.uniform_matrix4fv(p.scan, &scan)?;

        gl.bind_buffer(BufferTarget::Array, handles.buffer)?;
        gl.enable_vertex_attrib_array(p.position);
        let drawn = gl
            .vertex_attrib_pointer(p.position, COORDS_PER_VERTEX, 0, 0)
            .and_then(|()| gl.draw_arrays(DrawMode::Triangles, 0, VERTEX_COUNT));
        gl.disable_vertex_attrib_array(p.position);
        drawn?;

        Ok(PaintOutcome::Drawn)
    }

    fn start<G>(&mut self, gl: &mut G)
    where
        G: GraphicsContext + ?Sized,
    {
        let program = match TriangleProgram::create(gl, &self.sources) {
            Ok(p) => p,
            Err(e) => {
                log::error!("error creating program: {e}");
                return;
            }
        };

        let buffer = match upload_triangle(gl) {
            Ok(b) => b,
            Err(e) => {
                log::error!("error uploading triangle: {e}");
                gl.delete_program(program.program);
                return;
            }
        };

        log::info!("renderer running ({})", program.program);
        self.state = RenderState::Running(GraphicsHandles { program, buffer });
    }

    fn stop<G>(&mut self, gl: &mut G)
    where
        G: GraphicsContext + ?Sized,
    {
        if let RenderState::Running(h) = std::mem::replace(&mut self.state, RenderState::Stopped) {
            gl.delete_program(h.program.program);
            gl.delete_buffer(h.buffer);
            log::info!("renderer stopped");
        }
    }
}

impl App for Renderer {
    fn handle_event(&mut self, gl: &mut dyn GraphicsContext, event: Event) -> EventResponse {
        Renderer::handle_event(self, gl, event)
    }
}
