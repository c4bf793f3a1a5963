//! Triangles engine crate.
//!
//! A touch-positioned triangle renderer on a GL-style graphics abstraction,
//! plus the winit/wgpu runtime that hosts it.

pub mod core;
pub mod coords;
pub mod device;
pub mod gfx;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
pub mod window;
