//! Window and event loop.
//!
//! Owns the winit event loop and window, wires them to the wgpu context and
//! translates window events into [`Event`](crate::core::Event)s for the app.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
