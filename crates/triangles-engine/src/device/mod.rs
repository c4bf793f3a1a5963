//! wgpu device, surface and the [`GraphicsContext`](crate::gfx::GraphicsContext)
//! backend that draws through them.

mod context;
mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use context::WgpuContext;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
