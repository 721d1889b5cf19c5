//! Browser event conversion: DOM events to flyout events.
//!
//! Positions are taken from `clientX`/`clientY` so they share the viewport
//! coordinate space used by panel positioning.

use flyout_core::{Key, MouseButton, PointerType};

/// Map a DOM `KeyboardEvent.key` value to a [`Key`].
#[must_use]
pub fn key_from_dom(key: &str) -> Key {
    match key {
        "Enter" => Key::Enter,
        "Escape" | "Esc" => Key::Escape,
        "Backspace" => Key::Backspace,
        "Tab" => Key::Tab,
        " " | "Spacebar" => Key::Space,
        "Delete" => Key::Delete,
        "ArrowUp" => Key::Up,
        "ArrowDown" => Key::Down,
        "ArrowLeft" => Key::Left,
        "ArrowRight" => Key::Right,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Other(c),
                _ => Key::Other('\0'),
            }
        }
    }
}

/// Map a DOM `MouseEvent.button` value to a [`MouseButton`].
#[must_use]
pub const fn mouse_button_from_dom(button: i16) -> MouseButton {
    match button {
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        3 => MouseButton::Button4,
        4 => MouseButton::Button5,
        _ => MouseButton::Left,
    }
}

/// Map a DOM `PointerEvent.pointerType` value to a [`PointerType`].
#[must_use]
pub fn pointer_type_from_dom(pointer_type: &str) -> PointerType {
    match pointer_type {
        "touch" => PointerType::Touch,
        "pen" => PointerType::Pen,
        _ => PointerType::Mouse,
    }
}

#[cfg(target_arch = "wasm32")]
pub use dom::{click_event, keyboard_event, pointer_event};

#[cfg(target_arch = "wasm32")]
mod dom {
    use super::{key_from_dom, mouse_button_from_dom, pointer_type_from_dom};
    use flyout_core::{Event, PointerId, Point};
    use web_sys::{KeyboardEvent, MouseEvent, PointerEvent};

    /// Convert a `keydown`/`keyup` event.
    pub fn keyboard_event(event: &KeyboardEvent) -> Option<Event> {
        let key = key_from_dom(&event.key());
        match event.type_().as_str() {
            "keydown" => Some(Event::KeyDown { key }),
            "keyup" => Some(Event::KeyUp { key }),
            _ => None,
        }
    }

    /// Convert a `click` event.
    pub fn click_event(event: &MouseEvent) -> Event {
        Event::Click {
            position: Point::new(event.client_x() as f32, event.client_y() as f32),
            button: mouse_button_from_dom(event.button()),
        }
    }

    /// Convert a `pointerdown`/`pointermove`/`pointerup`/`pointercancel` event.
    pub fn pointer_event(event: &PointerEvent) -> Option<Event> {
        let pointer_id = PointerId(event.pointer_id() as u32);
        let pointer_type = pointer_type_from_dom(&event.pointer_type());
        let position = Point::new(event.client_x() as f32, event.client_y() as f32);
        let is_primary = event.is_primary();
        let button = (pointer_type == flyout_core::PointerType::Mouse)
            .then(|| mouse_button_from_dom(event.button()));

        match event.type_().as_str() {
            "pointerdown" => Some(Event::PointerDown {
                pointer_id,
                pointer_type,
                position,
                is_primary,
                button,
            }),
            "pointermove" => Some(Event::PointerMove {
                pointer_id,
                pointer_type,
                position,
                is_primary,
            }),
            "pointerup" => Some(Event::PointerUp {
                pointer_id,
                pointer_type,
                position,
                is_primary,
                button,
            }),
            "pointercancel" => Some(Event::PointerCancel { pointer_id }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_dom() {
        assert_eq!(key_from_dom("Escape"), Key::Escape);
        assert_eq!(key_from_dom("Esc"), Key::Escape);
        assert_eq!(key_from_dom("ArrowLeft"), Key::Left);
        assert_eq!(key_from_dom(" "), Key::Space);
        assert_eq!(key_from_dom("q"), Key::Other('q'));
        assert_eq!(key_from_dom("F5"), Key::Other('\0'));
    }

    #[test]
    fn test_mouse_button_from_dom() {
        assert_eq!(mouse_button_from_dom(0), MouseButton::Left);
        assert_eq!(mouse_button_from_dom(2), MouseButton::Right);
        assert_eq!(mouse_button_from_dom(-1), MouseButton::Left);
    }

    #[test]
    fn test_pointer_type_from_dom() {
        assert_eq!(pointer_type_from_dom("pen"), PointerType::Pen);
        assert_eq!(pointer_type_from_dom("touch"), PointerType::Touch);
        assert_eq!(pointer_type_from_dom(""), PointerType::Mouse);
    }
}
