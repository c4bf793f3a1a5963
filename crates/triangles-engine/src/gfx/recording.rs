//! Recording [`GraphicsContext`] for tests.
//!
//! Runs the same compile/link and state checks as the wgpu backend but keeps
//! a log of every mutating call instead of touching a GPU.

use std::collections::HashMap;

use crate::coords::Mat4;
use crate::paint::Color;

use super::context::GraphicsContext;
use super::error::GraphicsError;
use super::shader::compile_program;
use super::state::{ContextState, DrawSetup};
use super::types::{
    AttribLocation, BufferId, BufferTarget, BufferUsage, DrawMode, ProgramId, UniformKind,
    UniformLocation,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateProgram(ProgramId),
    CreateProgramFailed,
    DeleteProgram(ProgramId),
    CreateBuffer(BufferId),
    DeleteBuffer(BufferId),
    BindBuffer(BufferTarget, BufferId),
    BufferData { target: BufferTarget, data: Vec<u8>, usage: BufferUsage },
    ClearColor(Color),
    Clear,
    UseProgram(ProgramId),
    Uniform4f(UniformLocation, [f32; 4]),
    UniformMatrix4fv(UniformLocation, Mat4),
    EnableVertexAttribArray(AttribLocation),
    DisableVertexAttribArray(AttribLocation),
    VertexAttribPointer { location: AttribLocation, components: u32, stride: u32, offset: u64 },
    DrawArrays { mode: DrawMode, first: u32, count: u32 },
}

#[derive(Debug, Default)]
pub struct RecordingContext {
    state: ContextState,
    calls: Vec<Call>,
    contents: HashMap<BufferId, Vec<u8>>,
    draws: Vec<DrawSetup>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Returns and forgets the calls logged so far.
    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Validated draws, in order.
    pub fn draws(&self) -> &[DrawSetup] {
        &self.draws
    }

    pub fn contents(&self, buffer: BufferId) -> Option<&[u8]> {
        self.contents.get(&buffer).map(Vec::as_slice)
    }

    pub fn live_programs(&self) -> usize {
        self.state.program_count()
    }

    pub fn live_buffers(&self) -> usize {
        self.state.buffer_count()
    }
}

impl GraphicsContext for RecordingContext {
    fn create_program(&mut self, vertex: &str, fragment: &str) -> Result<ProgramId, GraphicsError> {
        match compile_program(vertex, fragment) {
            Ok(iface) => {
                let id = self.state.add_program(iface);
                self.calls.push(Call::CreateProgram(id));
                Ok(id)
            }
            Err(e) => {
                self.calls.push(Call::CreateProgramFailed);
                Err(e.into())
            }
        }
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.calls.push(Call::DeleteProgram(program));
        self.state.remove_program(program);
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<AttribLocation> {
        self.state.program(program)?.attribute(name)
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        self.state.program(program)?.uniform(name)
    }

    fn create_buffer(&mut self) -> BufferId {
        let id = self.state.add_buffer();
        self.calls.push(Call::CreateBuffer(id));
        id
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        self.calls.push(Call::DeleteBuffer(buffer));
        self.state.remove_buffer(buffer);
        self.contents.remove(&buffer);
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferId) -> Result<(), GraphicsError> {
        self.calls.push(Call::BindBuffer(target, buffer));
        self.state.bind(target, buffer)
    }

    fn buffer_data(
        &mut self,
        target: BufferTarget,
        data: &[u8],
        usage: BufferUsage,
    ) -> Result<(), GraphicsError> {
        self.calls.push(Call::BufferData { target, data: data.to_vec(), usage });
        let id = self.state.store(target, data.len() as u64, usage)?;
        self.contents.insert(id, data.to_vec());
        Ok(())
    }

    fn clear_color(&mut self, color: Color) {
        self.calls.push(Call::ClearColor(color));
        self.state.set_clear_color(color);
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn use_program(&mut self, program: ProgramId) -> Result<(), GraphicsError> {
        self.calls.push(Call::UseProgram(program));
        self.state.use_program(program)
    }

    fn uniform4f(&mut self, location: UniformLocation, value: [f32; 4]) -> Result<(), GraphicsError> {
        self.calls.push(Call::Uniform4f(location, value));
        self.state.set_uniform(location, UniformKind::Vec4, bytemuck::cast_slice(&value))
    }

    fn uniform_matrix4fv(&mut self, location: UniformLocation, value: &Mat4) -> Result<(), GraphicsError> {
        self.calls.push(Call::UniformMatrix4fv(location, *value));
        self.state.set_uniform(location, UniformKind::Mat4, bytemuck::bytes_of(value))
    }

    fn enable_vertex_attrib_array(&mut self, location: AttribLocation) {
        self.calls.push(Call::EnableVertexAttribArray(location));
        self.state.set_attrib_enabled(location, true);
    }

    fn disable_vertex_attrib_array(&mut self, location: AttribLocation) {
        self.calls.push(Call::DisableVertexAttribArray(location));
        self.state.set_attrib_enabled(location, false);
    }

    fn vertex_attrib_pointer(
        &mut self,
        location: AttribLocation,
        components: u32,
        stride: u32,
        offset: u64,
    ) -> Result<(), GraphicsError> {
        self.calls.push(Call::VertexAttribPointer { location, components, stride, offset });
        self.state.set_attrib_pointer(location, components, stride, offset)
    }

    fn draw_arrays(&mut self, mode: DrawMode, first: u32, count: u32) -> Result<(), GraphicsError> {
        self.calls.push(Call::DrawArrays { mode, first, count });
        let setup = self.state.prepare_draw(mode, first, count)?;
        self.draws.push(setup);
        Ok(())
    }
}
