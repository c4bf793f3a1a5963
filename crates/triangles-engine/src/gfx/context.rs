use crate::coords::Mat4;
use crate::paint::Color;

use super::error::GraphicsError;
use super::types::{
    AttribLocation, BufferId, BufferTarget, BufferUsage, DrawMode, ProgramId, UniformLocation,
};

/// GL-style graphics capability set consumed by the renderer.
///
/// State model:
/// - one current program (`use_program`); uniform setters act on it
/// - one buffer bound per target; `vertex_attrib_pointer` captures the buffer
///   bound to [`BufferTarget::Array`] at call time
/// - `clear` and `draw_arrays` are recorded in call order
///
/// Setters that only touch client-side state cannot fail. Calls that name a
/// handle or depend on bound state return [`GraphicsError`] instead of
/// silently ignoring misuse.
pub trait GraphicsContext {
    /// Compiles and links a vertex/fragment pair.
    fn create_program(&mut self, vertex: &str, fragment: &str) -> Result<ProgramId, GraphicsError>;

    /// Deletes a program. Unknown ids are ignored.
    fn delete_program(&mut self, program: ProgramId);

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<AttribLocation>;

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    fn create_buffer(&mut self) -> BufferId;

    /// Deletes a buffer, unbinding it if bound. Unknown ids are ignored.
    fn delete_buffer(&mut self, buffer: BufferId);

    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferId) -> Result<(), GraphicsError>;

    /// Replaces the contents of the buffer bound to `target`.
    fn buffer_data(
        &mut self,
        target: BufferTarget,
        data: &[u8],
        usage: BufferUsage,
    ) -> Result<(), GraphicsError>;

    fn clear_color(&mut self, color: Color);

    /// Clears the color buffer to the current clear color.
    fn clear(&mut self);

    fn use_program(&mut self, program: ProgramId) -> Result<(), GraphicsError>;

    fn uniform4f(&mut self, location: UniformLocation, value: [f32; 4]) -> Result<(), GraphicsError>;

    /// Uploads `value` column-major, without transposition.
    fn uniform_matrix4fv(&mut self, location: UniformLocation, value: &Mat4) -> Result<(), GraphicsError>;

    fn enable_vertex_attrib_array(&mut self, location: AttribLocation);

    fn disable_vertex_attrib_array(&mut self, location: AttribLocation);

    /// Points `location` at float data in the array buffer.
    ///
    /// `components` is per vertex; a `stride` of 0 means tightly packed.
    fn vertex_attrib_pointer(
        &mut self,
        location: AttribLocation,
        components: u32,
        stride: u32,
        offset: u64,
    ) -> Result<(), GraphicsError>;

    fn draw_arrays(&mut self, mode: DrawMode, first: u32, count: u32) -> Result<(), GraphicsError>;
}
