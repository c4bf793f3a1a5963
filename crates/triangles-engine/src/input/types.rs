use crate::coords::TouchPoint;

/// Stage of a platform touch contact.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ContactPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Platform-agnostic pointer input, in logical points.
///
/// Runtime code translates platform events into these; [`PointerState`]
/// turns them into touch events.
///
/// [`PointerState`]: super::PointerState
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerInput {
    CursorMoved(TouchPoint),
    CursorLeft,
    /// Primary (left) mouse button.
    PrimaryPressed,
    PrimaryReleased,
    Contact { id: u64, phase: ContactPhase, at: TouchPoint },
    /// Focus was lost; any press in progress is abandoned.
    FocusLost,
}
