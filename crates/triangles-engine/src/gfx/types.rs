use std::fmt;

/// Linked shader program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ProgramId(pub u32);

/// Buffer object. Storage is allocated by the first data upload.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BufferId(pub u32);

/// Vertex attribute slot, the `@location` of a vertex-stage input.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct AttribLocation(pub u32);

/// Uniform slot, the `@binding` of a `var<uniform>` in bind group 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct UniformLocation(pub u32);

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Program({})", self.0)
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Buffer({})", self.0)
    }
}

impl fmt::Display for AttribLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Attrib({})", self.0)
    }
}

impl fmt::Display for UniformLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uniform({})", self.0)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferTarget {
    /// Vertex data.
    Array,
}

/// Upload usage hint.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferUsage {
    /// Written once, drawn many times.
    StaticDraw,
    /// Rewritten repeatedly.
    DynamicDraw,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DrawMode {
    Triangles,
    TriangleStrip,
    Lines,
    Points,
}

impl From<DrawMode> for wgpu::PrimitiveTopology {
    fn from(mode: DrawMode) -> Self {
        match mode {
            DrawMode::Triangles => wgpu::PrimitiveTopology::TriangleList,
            DrawMode::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
            DrawMode::Lines => wgpu::PrimitiveTopology::LineList,
            DrawMode::Points => wgpu::PrimitiveTopology::PointList,
        }
    }
}

/// Value shape of a uniform slot, as declared by the shader.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UniformKind {
    Vec4,
    Mat4,
    /// Any other type; only its byte size is known.
    Other { size: u32 },
}

impl UniformKind {
    pub fn size(self) -> u32 {
        match self {
            UniformKind::Vec4 => 16,
            UniformKind::Mat4 => 64,
            UniformKind::Other { size } => size,
        }
    }
}

impl fmt::Display for UniformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformKind::Vec4 => f.write_str("vec4<f32>"),
            UniformKind::Mat4 => f.write_str("mat4x4<f32>"),
            UniformKind::Other { size } => write!(f, "{size}-byte value"),
        }
    }
}

/// Float vertex attribute layout, as given to `vertex_attrib_pointer`.
///
/// A `stride` of 0 means tightly packed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AttribPointer {
    pub buffer: BufferId,
    /// Components per vertex (1..=4).
    pub components: u32,
    pub stride: u32,
    pub offset: u64,
}

impl AttribPointer {
    /// Distance between consecutive vertices in bytes.
    pub fn effective_stride(&self) -> u64 {
        if self.stride == 0 {
            self.components as u64 * 4
        } else {
            self.stride as u64
        }
    }

    /// Bytes the buffer must hold for `first..first + count` vertices.
    pub fn required_len(&self, first: u32, count: u32) -> u64 {
        if count == 0 {
            return 0;
        }
        let last = first as u64 + count as u64 - 1;
        self.offset + last * self.effective_stride() + self.components as u64 * 4
    }

    pub fn vertex_format(&self) -> Option<wgpu::VertexFormat> {
        match self.components {
            1 => Some(wgpu::VertexFormat::Float32),
            2 => Some(wgpu::VertexFormat::Float32x2),
            3 => Some(wgpu::VertexFormat::Float32x3),
            4 => Some(wgpu::VertexFormat::Float32x4),
            _ => None,
        }
    }
}
