use std::collections::{BTreeMap, HashMap};

use crate::paint::Color;

use super::error::GraphicsError;
use super::shader::ProgramInterface;
use super::types::{
    AttribLocation, AttribPointer, BufferId, BufferTarget, BufferUsage, DrawMode, ProgramId,
    UniformKind, UniformLocation,
};

#[derive(Debug)]
struct ProgramState {
    interface: ProgramInterface,
    /// Uniform bytes set so far; unset slots read as zero.
    values: BTreeMap<UniformLocation, Vec<u8>>,
}

#[derive(Debug, Default)]
struct BufferState {
    len: u64,
    usage: Option<BufferUsage>,
}

#[derive(Debug, Default)]
struct AttribState {
    enabled: bool,
    pointer: Option<AttribPointer>,
}

/// A draw call whose bound state has been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawSetup {
    pub program: ProgramId,
    pub mode: DrawMode,
    pub first: u32,
    pub count: u32,
    /// One entry per program attribute, sorted by location.
    pub attribs: Vec<(AttribLocation, AttribPointer)>,
    /// One entry per program uniform, sorted by location.
    pub uniforms: Vec<(UniformLocation, Vec<u8>)>,
}

/// Backend-independent bookkeeping behind a [`GraphicsContext`](super::GraphicsContext).
///
/// Owns handle allocation, bindings, uniform values, and attribute state, and
/// turns a `draw_arrays` into a [`DrawSetup`]. Backends keep their own
/// resources keyed by the same ids.
#[derive(Debug)]
pub struct ContextState {
    next_id: u32,
    programs: HashMap<ProgramId, ProgramState>,
    buffers: HashMap<BufferId, BufferState>,
    array_binding: Option<BufferId>,
    current: Option<ProgramId>,
    attribs: BTreeMap<AttribLocation, AttribState>,
    clear_color: Color,
}

impl Default for ContextState {
    fn default() -> Self {
        Self {
            // 0 is never handed out, matching GL's "no object" name.
            next_id: 1,
            programs: HashMap::new(),
            buffers: HashMap::new(),
            array_binding: None,
            current: None,
            attribs: BTreeMap::new(),
            clear_color: Color::new(0.0, 0.0, 0.0, 0.0),
        }
    }
}

impl ContextState {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    // ── programs ──────────────────────────────────────────────────────────

    pub fn add_program(&mut self, interface: ProgramInterface) -> ProgramId {
        let id = ProgramId(self.next_id());
        self.programs.insert(id, ProgramState { interface, values: BTreeMap::new() });
        id
    }

    /// Returns `false` if the program was unknown.
    pub fn remove_program(&mut self, id: ProgramId) -> bool {
        if self.current == Some(id) {
            self.current = None;
        }
        self.programs.remove(&id).is_some()
    }

    pub fn program(&self, id: ProgramId) -> Option<&ProgramInterface> {
        self.programs.get(&id).map(|p| &p.interface)
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    pub fn use_program(&mut self, id: ProgramId) -> Result<(), GraphicsError> {
        if !self.programs.contains_key(&id) {
            return Err(GraphicsError::UnknownProgram(id));
        }
        self.current = Some(id);
        Ok(())
    }

    pub fn current_program(&self) -> Option<ProgramId> {
        self.current
    }

    pub fn set_uniform(
        &mut self,
        location: UniformLocation,
        kind: UniformKind,
        bytes: &[u8],
    ) -> Result<(), GraphicsError> {
        let id = self.current.ok_or(GraphicsError::NoProgram)?;
        let program = self.programs.get_mut(&id).ok_or(GraphicsError::UnknownProgram(id))?;
        let slot = program
            .interface
            .uniform_at(location)
            .ok_or(GraphicsError::UnknownUniform { location })?;
        if slot.kind != kind {
            return Err(GraphicsError::UniformKindMismatch {
                location,
                expected: slot.kind,
                actual: kind,
            });
        }
        program.values.insert(location, bytes.to_vec());
        Ok(())
    }

    // ── buffers ───────────────────────────────────────────────────────────

    pub fn add_buffer(&mut self) -> BufferId {
        let id = BufferId(self.next_id());
        self.buffers.insert(id, BufferState::default());
        id
    }

    /// Returns `false` if the buffer was unknown.
    ///
    /// Unbinds the buffer and drops attribute pointers into it.
    pub fn remove_buffer(&mut self, id: BufferId) -> bool {
        if self.array_binding == Some(id) {
            self.array_binding = None;
        }
        for attrib in self.attribs.values_mut() {
            if attrib.pointer.is_some_and(|p| p.buffer == id) {
                attrib.pointer = None;
            }
        }
        self.buffers.remove(&id).is_some()
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn bind(&mut self, target: BufferTarget, id: BufferId) -> Result<(), GraphicsError> {
        if !self.buffers.contains_key(&id) {
            return Err(GraphicsError::UnknownBuffer(id));
        }
        match target {
            BufferTarget::Array => self.array_binding = Some(id),
        }
        Ok(())
    }

    pub fn bound(&self, target: BufferTarget) -> Result<BufferId, GraphicsError> {
        match target {
            BufferTarget::Array => self.array_binding.ok_or(GraphicsError::NoArrayBuffer),
        }
    }

    /// Records an upload into the buffer bound to `target`; returns that buffer.
    pub fn store(
        &mut self,
        target: BufferTarget,
        len: u64,
        usage: BufferUsage,
    ) -> Result<BufferId, GraphicsError> {
        let id = self.bound(target)?;
        let buffer = self.buffers.get_mut(&id).ok_or(GraphicsError::UnknownBuffer(id))?;
        buffer.len = len;
        buffer.usage = Some(usage);
        Ok(id)
    }

    pub fn buffer_usage(&self, id: BufferId) -> Option<BufferUsage> {
        self.buffers.get(&id).and_then(|b| b.usage)
    }

    // ── attributes ────────────────────────────────────────────────────────

    pub fn set_attrib_enabled(&mut self, location: AttribLocation, enabled: bool) {
        self.attribs.entry(location).or_default().enabled = enabled;
    }

    pub fn set_attrib_pointer(
        &mut self,
        location: AttribLocation,
        components: u32,
        stride: u32,
        offset: u64,
    ) -> Result<(), GraphicsError> {
        if !(1..=4).contains(&components) {
            return Err(GraphicsError::BadComponentCount { location, components });
        }
        if stride % 4 != 0 || offset % 4 != 0 {
            return Err(GraphicsError::MisalignedAttribute { location, stride, offset });
        }
        let buffer = self.bound(BufferTarget::Array)?;
        self.attribs.entry(location).or_default().pointer = Some(AttribPointer {
            buffer,
            components,
            stride,
            offset,
        });
        Ok(())
    }

    // ── clear / draw ──────────────────────────────────────────────────────

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Checks bound state for a draw and snapshots what it reads.
    pub fn prepare_draw(
        &self,
        mode: DrawMode,
        first: u32,
        count: u32,
    ) -> Result<DrawSetup, GraphicsError> {
        let id = self.current.ok_or(GraphicsError::NoProgram)?;
        let program = self.programs.get(&id).ok_or(GraphicsError::UnknownProgram(id))?;

        let mut attribs = Vec::with_capacity(program.interface.attributes.len());
        for slot in &program.interface.attributes {
            let pointer = self
                .attribs
                .get(&slot.location)
                .filter(|a| a.enabled)
                .and_then(|a| a.pointer)
                .ok_or(GraphicsError::AttributeNotReady(slot.location))?;

            let buffer = self
                .buffers
                .get(&pointer.buffer)
                .ok_or(GraphicsError::UnknownBuffer(pointer.buffer))?;
            if buffer.usage.is_none() {
                return Err(GraphicsError::EmptyBuffer(pointer.buffer));
            }
            let required = pointer.required_len(first, count);
            if required > buffer.len {
                return Err(GraphicsError::VertexRangeOutOfBounds {
                    buffer: pointer.buffer,
                    required,
                    len: buffer.len,
                });
            }
            attribs.push((slot.location, pointer));
        }

        let uniforms = program
            .interface
            .uniforms
            .iter()
            .map(|slot| {
                let bytes = program
                    .values
                    .get(&slot.location)
                    .cloned()
                    .unwrap_or_else(|| vec![0; slot.kind.size() as usize]);
                (slot.location, bytes)
            })
            .collect();

        Ok(DrawSetup { program: id, mode, first, count, attribs, uniforms })
    }
}
