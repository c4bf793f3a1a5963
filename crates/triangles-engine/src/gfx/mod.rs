//! GL-style graphics layer.
//!
//! The renderer is written against [`GraphicsContext`]; the wgpu backend in
//! `device` implements it for real surfaces, and a recording implementation
//! backs the tests. Shader compile/link is shared between the two.

mod context;
mod error;
mod shader;
mod state;
mod types;

#[cfg(test)]
pub(crate) mod recording;

pub use context::GraphicsContext;
pub use error::{GraphicsError, ShaderCompileError, ShaderStage};
pub use shader::{compile_program, compile_stage, link, AttributeSlot, ProgramInterface, UniformSlot};
pub use state::{ContextState, DrawSetup};
pub use types::{
    AttribLocation, AttribPointer, BufferId, BufferTarget, BufferUsage, DrawMode, ProgramId,
    UniformKind, UniformLocation,
};
