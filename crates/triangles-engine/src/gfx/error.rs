use thiserror::Error;

use super::types::{AttribLocation, BufferId, ProgramId, UniformKind, UniformLocation};

/// Pipeline stage a shader source belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Compiling or linking a program failed.
#[derive(Debug, Clone, Error)]
pub enum ShaderCompileError {
    #[error("{stage} shader failed to parse:\n{message}")]
    Parse { stage: ShaderStage, message: String },

    #[error("{stage} shader failed validation:\n{message}")]
    Validate { stage: ShaderStage, message: String },

    #[error("program link failed: {0}")]
    Link(String),
}

/// Errors surfaced by a [`GraphicsContext`](super::GraphicsContext).
#[derive(Debug, Clone, Error)]
pub enum GraphicsError {
    #[error(transparent)]
    ShaderCompile(#[from] ShaderCompileError),

    #[error("unknown {0}")]
    UnknownProgram(ProgramId),

    #[error("unknown {0}")]
    UnknownBuffer(BufferId),

    #[error("no program in use")]
    NoProgram,

    #[error("no buffer bound to the array target")]
    NoArrayBuffer,

    #[error("{0} has no data")]
    EmptyBuffer(BufferId),

    #[error("program has no attribute named `{0}`")]
    MissingAttribute(String),

    #[error("program has no uniform named `{0}`")]
    MissingUniform(String),

    #[error("{location} is not a uniform of the current program")]
    UnknownUniform { location: UniformLocation },

    #[error("{location} holds a {expected}, got a {actual}")]
    UniformKindMismatch {
        location: UniformLocation,
        expected: UniformKind,
        actual: UniformKind,
    },

    #[error("{0} is not enabled or has no pointer")]
    AttributeNotReady(AttribLocation),

    #[error("{location}: {components} components per vertex is not supported")]
    BadComponentCount {
        location: AttribLocation,
        components: u32,
    },

    #[error("{location}: stride {stride} and offset {offset} must be multiples of 4")]
    MisalignedAttribute {
        location: AttribLocation,
        stride: u32,
        offset: u64,
    },

    #[error("draw reads {required} bytes of {buffer} which holds {len}")]
    VertexRangeOutOfBounds {
        buffer: BufferId,
        required: u64,
        len: u64,
    },
}
