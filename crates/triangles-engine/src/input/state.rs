use crate::coords::TouchPoint;
use crate::core::{Event, TouchPhase};

use super::types::{ContactPhase, PointerInput};

/// Source driving the current touch sequence.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Driver {
    Mouse,
    Contact(u64),
}

/// Turns pointer input into [`Event::Touch`] sequences for one window.
///
/// A sequence is a `Begin`, any number of `Move`s, then an `End`. Only one
/// sequence runs at a time: the first finger down, or the left mouse button
/// while no finger is down. Other contacts are ignored until it ends.
#[derive(Debug, Default)]
pub struct PointerState {
    /// Cursor position, if the cursor is over the window.
    cursor: Option<TouchPoint>,
    /// Last location reported for the active sequence.
    last: Option<TouchPoint>,
    driver: Option<Driver>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a touch sequence is in progress.
    pub fn is_active(&self) -> bool {
        self.driver.is_some()
    }

    pub fn cursor(&self) -> Option<TouchPoint> {
        self.cursor
    }

    pub fn apply(&mut self, input: PointerInput) -> Option<Event> {
        match input {
            PointerInput::CursorMoved(at) => {
                self.cursor = Some(at);
                (self.driver == Some(Driver::Mouse)).then(|| self.emit(at, TouchPhase::Move))
            }

            // Dragging outside the window keeps the sequence alive; winit
            // reports the release wherever it happens.
            PointerInput::CursorLeft => {
                self.cursor = None;
                None
            }

            PointerInput::PrimaryPressed => {
                if self.driver.is_some() {
                    return None;
                }
                let at = self.cursor?;
                self.driver = Some(Driver::Mouse);
                Some(self.emit(at, TouchPhase::Begin))
            }

            PointerInput::PrimaryReleased => {
                if self.driver != Some(Driver::Mouse) {
                    return None;
                }
                self.finish(self.cursor)
            }

            PointerInput::Contact { id, phase, at } => self.apply_contact(id, phase, at),

            PointerInput::FocusLost => {
                let last = self.last;
                self.finish(last)
            }
        }
    }

    fn apply_contact(&mut self, id: u64, phase: ContactPhase, at: TouchPoint) -> Option<Event> {
        match phase {
            ContactPhase::Started => {
                if self.driver.is_some() {
                    return None;
                }
                self.driver = Some(Driver::Contact(id));
                Some(self.emit(at, TouchPhase::Begin))
            }
            ContactPhase::Moved => {
                (self.driver == Some(Driver::Contact(id))).then(|| self.emit(at, TouchPhase::Move))
            }
            ContactPhase::Ended | ContactPhase::Cancelled => {
                if self.driver != Some(Driver::Contact(id)) {
                    return None;
                }
                self.finish(Some(at))
            }
        }
    }

    /// Ends the active sequence at `at`, or at its last location.
    fn finish(&mut self, at: Option<TouchPoint>) -> Option<Event> {
        self.driver.take()?;
        let at = at.or(self.last)?;
        let event = self.emit(at, TouchPhase::End);
        self.last = None;
        Some(event)
    }

    fn emit(&mut self, at: TouchPoint, phase: TouchPhase) -> Event {
        self.last = Some(at);
        Event::Touch { x: at.x, y: at.y, phase }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn touch(x: f32, y: f32, phase: TouchPhase) -> Option<Event> {
        Some(Event::Touch { x, y, phase })
    }

    fn contact(id: u64, phase: ContactPhase, x: f32, y: f32) -> PointerInput {
        PointerInput::Contact { id, phase, at: TouchPoint::new(x, y) }
    }

    #[test]
    fn mouse_drag_is_one_sequence() {
        let mut p = PointerState::new();
        assert_eq!(p.apply(PointerInput::CursorMoved(TouchPoint::new(1.0, 2.0))), None);
        assert_eq!(p.apply(PointerInput::PrimaryPressed), touch(1.0, 2.0, TouchPhase::Begin));
        assert_eq!(
            p.apply(PointerInput::CursorMoved(TouchPoint::new(5.0, 6.0))),
            touch(5.0, 6.0, TouchPhase::Move)
        );
        assert_eq!(p.apply(PointerInput::PrimaryReleased), touch(5.0, 6.0, TouchPhase::End));
        assert!(!p.is_active());
    }

    #[test]
    fn press_without_cursor_is_ignored() {
        let mut p = PointerState::new();
        assert_eq!(p.apply(PointerInput::PrimaryPressed), None);
        assert_eq!(p.apply(PointerInput::PrimaryReleased), None);
    }

    #[test]
    fn release_outside_window_ends_at_last_location() {
        let mut p = PointerState::new();
        p.apply(PointerInput::CursorMoved(TouchPoint::new(3.0, 4.0)));
        p.apply(PointerInput::PrimaryPressed);
        p.apply(PointerInput::CursorLeft);
        assert_eq!(p.apply(PointerInput::PrimaryReleased), touch(3.0, 4.0, TouchPhase::End));
    }

    #[test]
    fn second_finger_is_ignored() {
        let mut p = PointerState::new();
        assert_eq!(p.apply(contact(1, ContactPhase::Started, 10.0, 10.0)), touch(10.0, 10.0, TouchPhase::Begin));
        assert_eq!(p.apply(contact(2, ContactPhase::Started, 50.0, 50.0)), None);
        assert_eq!(p.apply(contact(2, ContactPhase::Moved, 60.0, 60.0)), None);
        assert_eq!(p.apply(contact(1, ContactPhase::Moved, 12.0, 14.0)), touch(12.0, 14.0, TouchPhase::Move));
        assert_eq!(p.apply(contact(2, ContactPhase::Ended, 60.0, 60.0)), None);
        assert_eq!(p.apply(contact(1, ContactPhase::Cancelled, 12.0, 15.0)), touch(12.0, 15.0, TouchPhase::End));
    }

    #[test]
    fn mouse_does_not_interrupt_finger() {
        let mut p = PointerState::new();
        p.apply(contact(7, ContactPhase::Started, 1.0, 1.0));
        p.apply(PointerInput::CursorMoved(TouchPoint::new(9.0, 9.0)));
        assert_eq!(p.apply(PointerInput::PrimaryPressed), None);
        assert_eq!(p.apply(PointerInput::PrimaryReleased), None);
        assert!(p.is_active());
    }

    #[test]
    fn focus_loss_ends_active_sequence() {
        let mut p = PointerState::new();
        p.apply(contact(1, ContactPhase::Started, 4.0, 8.0));
        assert_eq!(p.apply(PointerInput::FocusLost), touch(4.0, 8.0, TouchPhase::End));
        assert_eq!(p.apply(PointerInput::FocusLost), None);
    }
}
