//! Triangle rendering.
//!
//! Split by concern:
//! - `program`: shader sources and slot resolution
//! - `geometry`: the static vertex payload
//! - `transform`: touch → `scan` matrix
//! - `renderer`: lifecycle state machine and per-frame draw
//!
//! Everything here talks to a [`GraphicsContext`](crate::gfx::GraphicsContext)
//! only, so it runs unchanged against the wgpu backend and the test recorder.

mod geometry;
mod program;
mod renderer;
mod transform;

pub use geometry::{triangle_bytes, upload_triangle, COORDS_PER_VERTEX, TRIANGLE_VERTICES, VERTEX_COUNT};
pub use program::{ShaderSources, TriangleProgram, FRAGMENT_SHADER, VERTEX_SHADER};
pub use renderer::{GraphicsHandles, Renderer, ACCENT, BACKGROUND};
pub use transform::scan_matrix;
