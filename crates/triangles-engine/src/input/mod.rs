//! Pointer input.
//!
//! The public API does not expose winit types; `platform` translates winit
//! window events into [`PointerInput`] and [`PointerState`] produces touch
//! events from them.

pub mod platform;
mod state;
mod types;

pub use state::PointerState;
pub use types::{ContactPhase, PointerInput};
