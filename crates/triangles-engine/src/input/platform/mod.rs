//! Platform event translation.

mod winit;

pub use self::winit::{to_logical, translate_window_event};
