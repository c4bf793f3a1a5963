/// Phase of a touch sequence.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TouchPhase {
    Begin,
    Move,
    End,
}

/// Events the runtime delivers to the core, one at a time.
///
/// Coordinates and sizes are logical points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Event {
    /// The app crossed into (`visible: true`) or out of the visible stage.
    Lifecycle { visible: bool },

    Size { width: f32, height: f32 },

    /// Draw a frame; must be acknowledged with an end-paint afterwards.
    Paint,

    /// Every phase updates the touch location.
    Touch { x: f32, y: f32, phase: TouchPhase },
}

/// Why a paint drew nothing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SkipReason {
    /// No graphics handles: not yet visible, stopped, or setup failed.
    Stopped,
    /// Width or height is zero or not finite.
    EmptyViewport,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PaintOutcome {
    Drawn,
    Skipped(SkipReason),
    /// A graphics call failed; the error was logged and the frame dropped.
    Failed,
}

/// What the runtime must do after an event was handled.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EventResponse {
    Handled,
    /// Acknowledge the paint, whatever its outcome.
    EndPaint(PaintOutcome),
}
