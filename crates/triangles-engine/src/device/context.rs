use std::collections::HashMap;
use std::ops::Range;

use wgpu::util::DeviceExt;
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;

use crate::coords::Mat4;
use crate::gfx::{
    compile_program, AttribLocation, BufferId, BufferTarget, BufferUsage, ContextState, DrawMode,
    DrawSetup, GraphicsContext, GraphicsError, ProgramId, ProgramInterface, UniformKind,
    UniformLocation,
};
use crate::paint::Color;

use super::frame::{plan_passes, FrameOp, GpuFrame, PassPlan};
use super::{Gpu, SurfaceErrorAction};

/// Vertex input layout of one enabled attribute.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
struct VertexSlot {
    location: u32,
    format: wgpu::VertexFormat,
    stride: u64,
}

/// What a render pipeline depends on beyond its program.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
struct PipelineKey {
    mode: DrawMode,
    slots: Vec<VertexSlot>,
}

struct GpuProgram {
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
    vertex_entry: String,
    fragment_entry: String,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    layout: wgpu::PipelineLayout,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
}

impl GpuProgram {
    fn new(device: &wgpu::Device, interface: &ProgramInterface, vertex: &str, fragment: &str) -> Self {
        let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("triangles vertex shader"),
            source: wgpu::ShaderSource::Wgsl(vertex.to_owned().into()),
        });
        let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("triangles fragment shader"),
            source: wgpu::ShaderSource::Wgsl(fragment.to_owned().into()),
        });

        let bind_group_layout = (!interface.uniforms.is_empty()).then(|| {
            let entries: Vec<wgpu::BindGroupLayoutEntry> = interface
                .uniforms
                .iter()
                .map(|slot| wgpu::BindGroupLayoutEntry {
                    binding: slot.location.0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(slot.kind.size() as u64),
                    },
                    count: None,
                })
                .collect();
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("triangles uniforms bgl"),
                entries: &entries,
            })
        });

        let group_layouts: Vec<&wgpu::BindGroupLayout> = bind_group_layout.iter().collect();
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("triangles pipeline layout"),
            bind_group_layouts: &group_layouts,
            immediate_size: 0,
        });

        Self {
            vertex: vertex_module,
            fragment: fragment_module,
            vertex_entry: interface.vertex_entry.clone(),
            fragment_entry: interface.fragment_entry.clone(),
            bind_group_layout,
            layout,
            pipelines: HashMap::new(),
        }
    }

    fn ensure_pipeline(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat, key: &PipelineKey) {
        if self.pipelines.contains_key(key) {
            return;
        }

        // Each attribute reads from its own vertex buffer slot.
        let attributes: Vec<[wgpu::VertexAttribute; 1]> = key
            .slots
            .iter()
            .map(|slot| {
                [wgpu::VertexAttribute {
                    format: slot.format,
                    offset: 0,
                    shader_location: slot.location,
                }]
            })
            .collect();
        let buffers: Vec<wgpu::VertexBufferLayout<'_>> = key
            .slots
            .iter()
            .zip(&attributes)
            .map(|(slot, attrs)| wgpu::VertexBufferLayout {
                array_stride: slot.stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: attrs,
            })
            .collect();

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("triangles pipeline"),
            layout: Some(&self.layout),
            vertex: wgpu::VertexState {
                module: &self.vertex,
                entry_point: Some(self.vertex_entry.as_str()),
                compilation_options: Default::default(),
                buffers: &buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &self.fragment,
                entry_point: Some(self.fragment_entry.as_str()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: key.mode.into(),
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("built pipeline for {:?} with {} vertex slot(s)", key.mode, key.slots.len());
        self.pipelines.insert(key.clone(), pipeline);
    }
}

/// A validated draw, ready to encode.
struct DrawCall {
    program: ProgramId,
    key: PipelineKey,
    /// `(buffer, byte offset)` per vertex slot.
    vertex_buffers: Vec<(BufferId, u64)>,
    bind_group: Option<wgpu::BindGroup>,
    vertices: Range<u32>,
}

/// [`GraphicsContext`] backed by wgpu.
///
/// Calls between two [`end_paint`](Self::end_paint)s are recorded and
/// encoded into render passes when the frame ends. Uniform values are
/// snapshotted per draw. Vertex buffers are resolved at encode time, so a
/// buffer deleted mid-frame drops the draws that read it.
pub struct WgpuContext<'w> {
    gpu: Gpu<'w>,
    state: ContextState,
    programs: HashMap<ProgramId, GpuProgram>,
    buffers: HashMap<BufferId, wgpu::Buffer>,
    ops: Vec<FrameOp<DrawCall>>,
}

impl<'w> WgpuContext<'w> {
    pub fn new(gpu: Gpu<'w>) -> Self {
        Self {
            gpu,
            state: ContextState::new(),
            programs: HashMap::new(),
            buffers: HashMap::new(),
            ops: Vec::new(),
        }
    }

    pub fn gpu(&self) -> &Gpu<'w> {
        &self.gpu
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    /// Encodes and presents everything recorded since the last call.
    ///
    /// Does not touch the surface when nothing was recorded.
    pub fn end_paint(&mut self) -> Result<(), SurfaceError> {
        let passes = plan_passes(std::mem::take(&mut self.ops));
        if passes.is_empty() {
            return Ok(());
        }

        let size = self.gpu.size();
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }

        let mut frame = self.gpu.begin_frame()?;
        {
            let GpuFrame { view, encoder, .. } = &mut frame;
            for pass in &passes {
                self.encode_pass(encoder, view, pass);
            }
        }
        self.gpu.submit(frame);
        Ok(())
    }

    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        self.gpu.handle_surface_error(err)
    }

    fn encode_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        pass: &PassPlan<DrawCall>,
    ) {
        let load = match pass.clear {
            Some(color) => wgpu::LoadOp::Clear(color.into()),
            None => wgpu::LoadOp::Load,
        };

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("triangles pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for draw in &pass.draws {
            let Some(pipeline) = self
                .programs
                .get(&draw.program)
                .and_then(|p| p.pipelines.get(&draw.key))
            else {
                log::warn!("dropping draw: {} was deleted before the frame ended", draw.program);
                continue;
            };

            let slices: Option<Vec<_>> = draw
                .vertex_buffers
                .iter()
                .map(|(id, offset)| self.buffers.get(id).map(|b| b.slice(*offset..)))
                .collect();
            let Some(slices) = slices else {
                log::warn!("dropping draw: a vertex buffer was deleted before the frame ended");
                continue;
            };

            rpass.set_pipeline(pipeline);
            if let Some(bind_group) = &draw.bind_group {
                rpass.set_bind_group(0, bind_group, &[]);
            }
            for (slot, slice) in slices.into_iter().enumerate() {
                rpass.set_vertex_buffer(slot as u32, slice);
            }
            rpass.draw(draw.vertices.clone(), 0..1);
        }
    }

    fn build_draw(&mut self, setup: DrawSetup) -> Result<DrawCall, GraphicsError> {
        let mut slots = Vec::with_capacity(setup.attribs.len());
        let mut vertex_buffers = Vec::with_capacity(setup.attribs.len());
        for (location, pointer) in &setup.attribs {
            let format = pointer.vertex_format().ok_or(GraphicsError::BadComponentCount {
                location: *location,
                components: pointer.components,
            })?;
            slots.push(VertexSlot {
                location: location.0,
                format,
                stride: pointer.effective_stride(),
            });
            vertex_buffers.push((pointer.buffer, pointer.offset));
        }
        let key = PipelineKey { mode: setup.mode, slots };

        let device = self.gpu.device();
        let format = self.gpu.surface_format();
        let program = self
            .programs
            .get_mut(&setup.program)
            .ok_or(GraphicsError::UnknownProgram(setup.program))?;
        program.ensure_pipeline(device, format, &key);

        let bind_group = program.bind_group_layout.as_ref().map(|layout| {
            let buffers: Vec<(u32, wgpu::Buffer)> = setup
                .uniforms
                .iter()
                .map(|(location, bytes)| {
                    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("triangles uniform"),
                        contents: bytes,
                        usage: wgpu::BufferUsages::UNIFORM,
                    });
                    (location.0, buffer)
                })
                .collect();
            let entries: Vec<wgpu::BindGroupEntry<'_>> = buffers
                .iter()
                .map(|(binding, buffer)| wgpu::BindGroupEntry {
                    binding: *binding,
                    resource: buffer.as_entire_binding(),
                })
                .collect();
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("triangles uniforms"),
                layout,
                entries: &entries,
            })
        });

        Ok(DrawCall {
            program: setup.program,
            key,
            vertex_buffers,
            bind_group,
            vertices: setup.first..setup.first + setup.count,
        })
    }
}

impl GraphicsContext for WgpuContext<'_> {
    fn create_program(&mut self, vertex: &str, fragment: &str) -> Result<ProgramId, GraphicsError> {
        let interface = compile_program(vertex, fragment)?;
        let program = GpuProgram::new(self.gpu.device(), &interface, vertex, fragment);
        let id = self.state.add_program(interface);
        self.programs.insert(id, program);
        log::debug!("created {id}");
        Ok(id)
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.state.remove_program(program);
        if self.programs.remove(&program).is_some() {
            log::debug!("deleted {program}");
        }
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<AttribLocation> {
        self.state.program(program)?.attribute(name)
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        self.state.program(program)?.uniform(name)
    }

    fn create_buffer(&mut self) -> BufferId {
        self.state.add_buffer()
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        self.state.remove_buffer(buffer);
        self.buffers.remove(&buffer);
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferId) -> Result<(), GraphicsError> {
        self.state.bind(target, buffer)
    }

    fn buffer_data(
        &mut self,
        target: BufferTarget,
        data: &[u8],
        usage: BufferUsage,
    ) -> Result<(), GraphicsError> {
        let id = self.state.store(target, data.len() as u64, usage)?;
        // Usage is only a hint here; every upload gets fresh storage.
        let buffer = self
            .gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("triangles vertex buffer"),
                contents: data,
                usage: wgpu::BufferUsages::VERTEX,
            });
        self.buffers.insert(id, buffer);
        Ok(())
    }

    fn clear_color(&mut self, color: Color) {
        self.state.set_clear_color(color);
    }

    fn clear(&mut self) {
        self.ops.push(FrameOp::Clear(self.state.clear_color()));
    }

    fn use_program(&mut self, program: ProgramId) -> Result<(), GraphicsError> {
        self.state.use_program(program)
    }

    fn uniform4f(&mut self, location: UniformLocation, value: [f32; 4]) -> Result<(), GraphicsError> {
        self.state.set_uniform(location, UniformKind::Vec4, bytemuck::cast_slice(&value))
    }

    fn uniform_matrix4fv(&mut self, location: UniformLocation, value: &Mat4) -> Result<(), GraphicsError> {
        self.state.set_uniform(location, UniformKind::Mat4, bytemuck::bytes_of(value))
    }

    fn enable_vertex_attrib_array(&mut self, location: AttribLocation) {
        self.state.set_attrib_enabled(location, true);
    }

    fn disable_vertex_attrib_array(&mut self, location: AttribLocation) {
        self.state.set_attrib_enabled(location, false);
    }

    fn vertex_attrib_pointer(
        &mut self,
        location: AttribLocation,
        components: u32,
        stride: u32,
        offset: u64,
    ) -> Result<(), GraphicsError> {
        self.state.set_attrib_pointer(location, components, stride, offset)
    }

    fn draw_arrays(&mut self, mode: DrawMode, first: u32, count: u32) -> Result<(), GraphicsError> {
        let setup = self.state.prepare_draw(mode, first, count)?;
        // Nothing to rasterize, and wgpu rejects empty vertex buffer slices.
        if count == 0 {
            return Ok(());
        }
        let draw = self.build_draw(setup)?;
        self.ops.push(FrameOp::Draw(draw));
        Ok(())
    }
}
