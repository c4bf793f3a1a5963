use crate::paint::Color;

/// An acquired surface texture plus the encoder recording into it.
///
/// Presenting happens when the surface texture is dropped after submit, so
/// keep this short-lived.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// One recorded frame operation, in call order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FrameOp<D> {
    Clear(Color),
    Draw(D),
}

/// A render pass to encode: an optional clear followed by draws.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PassPlan<D> {
    /// `None` loads the existing contents.
    pub clear: Option<Color>,
    pub draws: Vec<D>,
}

/// Groups recorded operations into render passes.
///
/// Every clear opens a new pass; a clear with no draws since the previous
/// clear replaces it. Draws before the first clear load the target.
pub(crate) fn plan_passes<D>(ops: Vec<FrameOp<D>>) -> Vec<PassPlan<D>> {
    let mut passes: Vec<PassPlan<D>> = Vec::new();

    for op in ops {
        match op {
            FrameOp::Clear(color) => match passes.last_mut() {
                Some(last) if last.draws.is_empty() => last.clear = Some(color),
                _ => passes.push(PassPlan { clear: Some(color), draws: Vec::new() }),
            },
            FrameOp::Draw(draw) => match passes.last_mut() {
                Some(last) => last.draws.push(draw),
                None => passes.push(PassPlan { clear: None, draws: vec![draw] }),
            },
        }
    }

    passes
}
