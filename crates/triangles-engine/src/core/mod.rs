//! Core engine-facing contracts.
//!
//! Defines the closed event model the runtime feeds into the renderer and the
//! [`App`] seam between them. Nothing here depends on winit or wgpu.

mod app;
mod event;

pub use app::App;
pub use event::{Event, EventResponse, PaintOutcome, SkipReason, TouchPhase};
