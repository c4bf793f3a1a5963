//! WGSL compile + link using naga.
//!
//! Both graphics backends go through this path, so a program that links here
//! is one the wgpu backend accepts and one the recording context accepts in
//! tests. Linking produces a [`ProgramInterface`]: the name → slot tables
//! behind `attrib_location` and `uniform_location`.

use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::{Binding, Handle, Scalar, Type, TypeInner, VectorSize};

use super::error::{ShaderCompileError, ShaderStage};
use super::types::{AttribLocation, UniformKind, UniformLocation};

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSlot {
    pub name: String,
    pub location: AttribLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UniformSlot {
    pub name: String,
    pub location: UniformLocation,
    pub kind: UniformKind,
}

/// Reflected interface of a linked program.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramInterface {
    pub vertex_entry: String,
    pub fragment_entry: String,
    /// Vertex-stage inputs, sorted by location.
    pub attributes: Vec<AttributeSlot>,
    /// Uniforms of both stages (bind group 0), sorted by binding.
    pub uniforms: Vec<UniformSlot>,
}

impl ProgramInterface {
    pub fn attribute(&self, name: &str) -> Option<AttribLocation> {
        self.attributes.iter().find(|a| a.name == name).map(|a| a.location)
    }

    pub fn uniform(&self, name: &str) -> Option<UniformLocation> {
        self.uniforms.iter().find(|u| u.name == name).map(|u| u.location)
    }

    pub fn uniform_at(&self, location: UniformLocation) -> Option<&UniformSlot> {
        self.uniforms.iter().find(|u| u.location == location)
    }
}

/// Parses and validates one stage.
pub fn compile_stage(source: &str, stage: ShaderStage) -> Result<naga::Module, ShaderCompileError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderCompileError::Parse {
        stage,
        message: e.emit_to_string(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| ShaderCompileError::Validate {
            stage,
            message: e.emit_to_string(source),
        })?;

    Ok(module)
}

/// Compiles both stages and links them into a [`ProgramInterface`].
pub fn compile_program(
    vertex_src: &str,
    fragment_src: &str,
) -> Result<ProgramInterface, ShaderCompileError> {
    let vs = compile_stage(vertex_src, ShaderStage::Vertex)?;
    let fs = compile_stage(fragment_src, ShaderStage::Fragment)?;
    link(&vs, &fs)
}

/// Matches the vertex stage against the fragment stage.
///
/// Checks:
/// - each module has exactly one entry point for its stage
/// - every fragment input location is written by the vertex stage
/// - uniforms live in group 0, and a binding shared by both stages has one name and type
pub fn link(vs: &naga::Module, fs: &naga::Module) -> Result<ProgramInterface, ShaderCompileError> {
    let vertex = single_entry(vs, naga::ShaderStage::Vertex, "vertex")?;
    let fragment = single_entry(fs, naga::ShaderStage::Fragment, "fragment")?;

    let mut attributes = Vec::new();
    for arg in &vertex.function.arguments {
        for (name, location) in locations(vs, arg.ty, arg.binding.as_ref(), arg.name.as_deref()) {
            attributes.push(AttributeSlot { name, location: AttribLocation(location) });
        }
    }
    attributes.sort_by_key(|a| a.location);

    let outputs: Vec<u32> = vertex
        .function
        .result
        .as_ref()
        .map(|r| {
            locations(vs, r.ty, r.binding.as_ref(), None)
                .into_iter()
                .map(|(_, loc)| loc)
                .collect()
        })
        .unwrap_or_default();

    for arg in &fragment.function.arguments {
        for (name, location) in locations(fs, arg.ty, arg.binding.as_ref(), arg.name.as_deref()) {
            if !outputs.contains(&location) {
                return Err(ShaderCompileError::Link(format!(
                    "fragment input `{name}` at location {location} is not written by the vertex stage"
                )));
            }
        }
    }

    let mut uniforms = uniforms_of(vs)?;
    for u in uniforms_of(fs)? {
        match uniforms.iter().find(|v| v.location == u.location || v.name == u.name) {
            Some(v) if *v == u => {}
            Some(v) => {
                return Err(ShaderCompileError::Link(format!(
                    "uniform `{}` ({} at binding {}) in the vertex stage conflicts with `{}` ({} at binding {}) in the fragment stage",
                    v.name, v.kind, v.location.0, u.name, u.kind, u.location.0,
                )));
            }
            None => uniforms.push(u),
        }
    }
    uniforms.sort_by_key(|u| u.location);

    Ok(ProgramInterface {
        vertex_entry: vertex.name.clone(),
        fragment_entry: fragment.name.clone(),
        attributes,
        uniforms,
    })
}

fn single_entry<'m>(
    module: &'m naga::Module,
    stage: naga::ShaderStage,
    what: &str,
) -> Result<&'m naga::EntryPoint, ShaderCompileError> {
    let mut found = module.entry_points.iter().filter(|ep| ep.stage == stage);
    match (found.next(), found.next()) {
        (Some(ep), None) => Ok(ep),
        (None, _) => Err(ShaderCompileError::Link(format!("no @{what} entry point"))),
        (Some(_), Some(_)) => Err(ShaderCompileError::Link(format!(
            "more than one @{what} entry point"
        ))),
    }
}

/// User-defined `@location`s carried by a value, flattening struct members.
fn locations(
    module: &naga::Module,
    ty: Handle<Type>,
    binding: Option<&Binding>,
    name: Option<&str>,
) -> Vec<(String, u32)> {
    match binding {
        Some(Binding::Location { location, .. }) => {
            vec![(name.unwrap_or_default().to_string(), *location)]
        }
        Some(Binding::BuiltIn(_)) => Vec::new(),
        None => match &module.types[ty].inner {
            TypeInner::Struct { members, .. } => members
                .iter()
                .flat_map(|m| locations(module, m.ty, m.binding.as_ref(), m.name.as_deref()))
                .collect(),
            _ => Vec::new(),
        },
    }
}

fn uniforms_of(module: &naga::Module) -> Result<Vec<UniformSlot>, ShaderCompileError> {
    let mut out = Vec::new();
    for (_, var) in module.global_variables.iter() {
        if var.space != naga::AddressSpace::Uniform {
            continue;
        }
        let name = var.name.clone().unwrap_or_default();
        let Some(binding) = &var.binding else {
            return Err(ShaderCompileError::Link(format!("uniform `{name}` has no binding")));
        };
        if binding.group != 0 {
            return Err(ShaderCompileError::Link(format!(
                "uniform `{name}` is in group {}; only group 0 is supported",
                binding.group
            )));
        }
        out.push(UniformSlot {
            name,
            location: UniformLocation(binding.binding),
            kind: uniform_kind(module, var.ty),
        });
    }
    Ok(out)
}

fn uniform_kind(module: &naga::Module, ty: Handle<Type>) -> UniformKind {
    match &module.types[ty].inner {
        TypeInner::Vector { size: VectorSize::Quad, scalar } if *scalar == Scalar::F32 => {
            UniformKind::Vec4
        }
        TypeInner::Matrix { columns: VectorSize::Quad, rows: VectorSize::Quad, scalar }
            if *scalar == Scalar::F32 =>
        {
            UniformKind::Mat4
        }
        other => UniformKind::Other { size: other.size(module.to_ctx()) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{FRAGMENT_SHADER, VERTEX_SHADER};

    #[test]
    fn built_in_program_reflects_position_color_scan() {
        let iface = compile_program(VERTEX_SHADER, FRAGMENT_SHADER).unwrap();
        assert_eq!(iface.vertex_entry, "vs_main");
        assert_eq!(iface.fragment_entry, "fs_main");
        assert_eq!(iface.attribute("position"), Some(AttribLocation(0)));
        assert_eq!(iface.uniform("scan"), Some(UniformLocation(0)));
        assert_eq!(iface.uniform("color"), Some(UniformLocation(1)));
        assert_eq!(iface.uniform_at(UniformLocation(0)).unwrap().kind, UniformKind::Mat4);
        assert_eq!(iface.uniform_at(UniformLocation(1)).unwrap().kind, UniformKind::Vec4);
        assert!(iface.uniform("offset").is_none());
    }

    #[test]
    fn syntax_error_reports_stage() {
        let err = compile_program("@vertex fn vs_main( {", FRAGMENT_SHADER).unwrap_err();
        assert!(matches!(err, ShaderCompileError::Parse { stage: ShaderStage::Vertex, .. }));
    }

    #[test]
    fn type_error_in_fragment_is_rejected() {
        let fs = "@fragment fn fs_main() -> @location(0) vec4<f32> { return 1.0; }";
        let err = compile_program(VERTEX_SHADER, fs).unwrap_err();
        assert!(matches!(
            err,
            ShaderCompileError::Parse { stage: ShaderStage::Fragment, .. }
                | ShaderCompileError::Validate { stage: ShaderStage::Fragment, .. }
        ));
    }

    #[test]
    fn missing_vertex_entry_fails_link() {
        let err = compile_program(FRAGMENT_SHADER, FRAGMENT_SHADER).unwrap_err();
        assert!(matches!(err, ShaderCompileError::Link(_)));
    }

    #[test]
    fn conflicting_uniform_binding_fails_link() {
        let fs = "
            @group(0) @binding(0) var<uniform> tint: vec4<f32>;
            @fragment fn fs_main() -> @location(0) vec4<f32> { return tint; }
        ";
        let err = compile_program(VERTEX_SHADER, fs).unwrap_err();
        assert!(matches!(err, ShaderCompileError::Link(_)));
    }

    #[test]
    fn unwritten_fragment_input_fails_link() {
        let fs = "
            @fragment fn fs_main(@location(2) uv: vec2<f32>) -> @location(0) vec4<f32> {
                return vec4<f32>(uv, 0.0, 1.0);
            }
        ";
        let err = compile_program(VERTEX_SHADER, fs).unwrap_err();
        assert!(matches!(err, ShaderCompileError::Link(_)));
    }

    #[test]
    fn struct_inputs_are_flattened() {
        let vs = "
            struct In {
                @location(0) pos: vec2<f32>,
                @location(3) weight: f32,
            }
            @vertex fn main(v: In) -> @builtin(position) vec4<f32> {
                return vec4<f32>(v.pos * v.weight, 0.0, 1.0);
            }
        ";
        let fs = "@fragment fn main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";
        let iface = compile_program(vs, fs).unwrap();
        assert_eq!(iface.attribute("pos"), Some(AttribLocation(0)));
        assert_eq!(iface.attribute("weight"), Some(AttribLocation(3)));
        assert!(iface.uniforms.is_empty());
    }
}
