use crate::gfx::GraphicsContext;

use super::event::{Event, EventResponse};

/// Contract between the runtime and the code it drives.
///
/// The runtime owns the event loop and the graphics context; implementors
/// only react to one event at a time.
pub trait App {
    fn handle_event(&mut self, gl: &mut dyn GraphicsContext, event: Event) -> EventResponse;
}
