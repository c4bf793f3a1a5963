use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, TouchPhase as WinitTouchPhase, WindowEvent};

use crate::coords::TouchPoint;
use crate::input::{ContactPhase, PointerInput};

/// Translates a winit window event into pointer input.
///
/// `scale_factor` converts physical pixels to logical points. Returns `None`
/// for events that carry no pointer input.
pub fn translate_window_event(scale_factor: f64, event: &WindowEvent) -> Option<PointerInput> {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            Some(PointerInput::CursorMoved(to_logical(scale_factor, *position)))
        }

        WindowEvent::CursorLeft { .. } => Some(PointerInput::CursorLeft),

        WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => Some(match state {
            ElementState::Pressed => PointerInput::PrimaryPressed,
            ElementState::Released => PointerInput::PrimaryReleased,
        }),

        WindowEvent::Touch(touch) => Some(PointerInput::Contact {
            id: touch.id,
            phase: map_phase(touch.phase),
            at: to_logical(scale_factor, touch.location),
        }),

        WindowEvent::Focused(false) => Some(PointerInput::FocusLost),

        _ => None,
    }
}

pub fn to_logical(scale_factor: f64, pos: PhysicalPosition<f64>) -> TouchPoint {
    let logical = pos.to_logical::<f64>(scale_factor);
    TouchPoint::new(logical.x as f32, logical.y as f32)
}

fn map_phase(phase: WinitTouchPhase) -> ContactPhase {
    match phase {
        WinitTouchPhase::Started => ContactPhase::Started,
        WinitTouchPhase::Moved => ContactPhase::Moved,
        WinitTouchPhase::Ended => ContactPhase::Ended,
        WinitTouchPhase::Cancelled => ContactPhase::Cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(unused_unsafe)]
    fn device() -> winit::event::DeviceId {
        // SAFETY: only compared by the event handlers, never passed to the platform.
        unsafe {
            winit::event::DeviceId::dummy()
        }
    }

    #[test]
    fn physical_pixels_become_points() {
        let p = to_logical(2.0, PhysicalPosition::new(300.0, 500.0));
        assert_eq!(p, TouchPoint::new(150.0, 250.0));
    }

    #[test]
    fn only_left_button_counts() {
        let left = WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Pressed,
            button: MouseButton::Left,
        };
        let right = WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Pressed,
            button: MouseButton::Right,
        };
        assert_eq!(translate_window_event(1.0, &left), Some(PointerInput::PrimaryPressed));
        assert_eq!(translate_window_event(1.0, &right), None);
    }

    #[test]
    fn cursor_position_is_scaled() {
        let ev = WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(40.0, 80.0),
        };
        assert_eq!(
            translate_window_event(2.0, &ev),
            Some(PointerInput::CursorMoved(TouchPoint::new(20.0, 40.0)))
        );
    }
}
