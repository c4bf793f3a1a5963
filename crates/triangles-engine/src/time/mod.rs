//! Frame timing.
//!
//! - one `FrameClock` per window, ticked on every paint
//! - `FpsCounter` turns ticks into a frame-rate readout

mod fps;
mod frame_clock;

pub use fps::FpsCounter;
pub use frame_clock::{FrameClock, FrameTime};
