use std::borrow::Cow;

use crate::gfx::{AttribLocation, GraphicsContext, GraphicsError, ProgramId, UniformLocation};

pub const VERTEX_SHADER: &str = include_str!("shaders/triangle.vert.wgsl");
pub const FRAGMENT_SHADER: &str = include_str!("shaders/triangle.frag.wgsl");

/// Shader pair the renderer links at startup.
#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self {
            vertex: Cow::Borrowed(VERTEX_SHADER),
            fragment: Cow::Borrowed(FRAGMENT_SHADER),
        }
    }
}

/// Linked triangle program and its resolved slots.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TriangleProgram {
    pub program: ProgramId,
    pub position: AttribLocation,
    pub color: UniformLocation,
    pub scan: UniformLocation,
}

impl TriangleProgram {
    /// Compiles and links `sources`, then resolves `position`, `color` and `scan`.
    ///
    /// A name that does not resolve means the sources do not match the
    /// renderer; the program is deleted and the lookup error returned.
    pub fn create<G>(gl: &mut G, sources: &ShaderSources) -> Result<Self, GraphicsError>
    where
        G: GraphicsContext + ?Sized,
    {
        let program = gl.create_program(&sources.vertex, &sources.fragment)?;

        match Self::resolve(gl, program) {
            Ok(handles) => {
                log::debug!(
                    "program {program} linked: position={}, color={}, scan={}",
                    handles.position,
                    handles.color,
                    handles.scan
                );
                Ok(handles)
            }
            Err(e) => {
                gl.delete_program(program);
                Err(e)
            }
        }
    }

    fn resolve<G>(gl: &G, program: ProgramId) -> Result<Self, GraphicsError>
    where
        G: GraphicsContext + ?Sized,
    {
        let position = gl
            .attrib_location(program, "position")
            .ok_or_else(|| GraphicsError::MissingAttribute("position".into()))?;
        let color = gl
            .uniform_location(program, "color")
            .ok_or_else(|| GraphicsError::MissingUniform("color".into()))?;
        let scan = gl
            .uniform_location(program, "scan")
            .ok_or_else(|| GraphicsError::MissingUniform("scan".into()))?;

        Ok(Self { program, position, color, scan })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::recording::{Call, RecordingContext};

    #[test]
    fn built_in_sources_resolve_all_slots() {
        let mut gl = RecordingContext::new();
        let p = TriangleProgram::create(&mut gl, &ShaderSources::default()).unwrap();
        assert_eq!(p.position, AttribLocation(0));
        assert_eq!(p.scan, UniformLocation(0));
        assert_eq!(p.color, UniformLocation(1));
        assert_eq!(gl.live_programs(), 1);
    }

    #[test]
    fn compile_failure_leaves_nothing_behind() {
        let mut gl = RecordingContext::new();
        let sources = ShaderSources {
            vertex: "not wgsl".into(),
            fragment: FRAGMENT_SHADER.into(),
        };
        let err = TriangleProgram::create(&mut gl, &sources).unwrap_err();
        assert!(matches!(err, GraphicsError::ShaderCompile(_)));
        assert_eq!(gl.calls(), &[Call::CreateProgramFailed]);
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn missing_uniform_deletes_program() {
        let mut gl = RecordingContext::new();
        let sources = ShaderSources {
            vertex: VERTEX_SHADER.into(),
            fragment: "@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }"
                .into(),
        };
        let err = TriangleProgram::create(&mut gl, &sources).unwrap_err();
        assert!(matches!(err, GraphicsError::MissingUniform(ref n) if n == "color"));
        assert_eq!(gl.live_programs(), 0);
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteProgram(_))), 1);
    }
}
