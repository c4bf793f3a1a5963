//! Color model shared by the renderer and the graphics backends.

pub mod color;

pub use color::Color;
