//! Coordinate and geometry types shared by the renderer and the runtime.
//!
//! Canonical CPU space:
//! - Logical points (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down

mod mat4;
mod point;
mod viewport;

pub use mat4::Mat4;
pub use point::TouchPoint;
pub use viewport::Viewport;
