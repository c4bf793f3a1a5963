use anyhow::Result;

use triangles_engine::device::GpuInit;
use triangles_engine::logging::{init_logging, LoggingConfig};
use triangles_engine::render::Renderer;
use triangles_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    log::info!("starting triangles");

    // Linear surface: shader colors are written as-is, like a plain GL framebuffer.
    Runtime::run(RuntimeConfig::default(), GpuInit::linear(), Renderer::new())
}
