//! Input events and their routing through the node tree.

use crate::geometry::Point;
use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Mouse moved to position
    MouseMove {
        /// New position
        position: Point,
    },
    /// Mouse button pressed
    MouseDown {
        /// Position of press
        position: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Mouse button released
    MouseUp {
        /// Position of release
        position: Point,
        /// Button released
        button: MouseButton,
    },
    /// Full click (press and release on the same node)
    Click {
        /// Position of click
        position: Point,
        /// Button clicked
        button: MouseButton,
    },
    /// Key pressed
    KeyDown {
        /// Key pressed
        key: Key,
    },
    /// Key released
    KeyUp {
        /// Key released
        key: Key,
    },
    /// Node gained focus
    FocusIn,
    /// Node lost focus
    FocusOut,
    // Pointer events (unified mouse/touch/pen)
    /// Pointer down
    PointerDown {
        /// Pointer ID
        pointer_id: PointerId,
        /// Pointer type
        pointer_type: PointerType,
        /// Position
        position: Point,
        /// Is primary pointer
        is_primary: bool,
        /// Button (for mouse pointers)
        button: Option<MouseButton>,
    },
    /// Pointer moved
    PointerMove {
        /// Pointer ID
        pointer_id: PointerId,
        /// Pointer type
        pointer_type: PointerType,
        /// Position
        position: Point,
        /// Is primary pointer
        is_primary: bool,
    },
    /// Pointer up
    PointerUp {
        /// Pointer ID
        pointer_id: PointerId,
        /// Pointer type
        pointer_type: PointerType,
        /// Position
        position: Point,
        /// Is primary pointer
        is_primary: bool,
        /// Button (for mouse pointers)
        button: Option<MouseButton>,
    },
    /// Pointer cancelled
    PointerCancel {
        /// Pointer ID
        pointer_id: PointerId,
    },
}

impl Event {
    /// Position carried by pointer-like events.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::MouseMove { position }
            | Self::MouseDown { position, .. }
            | Self::MouseUp { position, .. }
            | Self::Click { position, .. }
            | Self::PointerDown { position, .. }
            | Self::PointerMove { position, .. }
            | Self::PointerUp { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Whether this is a press that can start a gesture.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(
            self,
            Self::MouseDown {
                button: MouseButton::Left,
                ..
            } | Self::PointerDown {
                is_primary: true,
                ..
            }
        )
    }

    /// Whether this is pointer motion.
    #[must_use]
    pub const fn is_motion(&self) -> bool {
        matches!(self, Self::MouseMove { .. } | Self::PointerMove { .. })
    }

    /// Whether this ends a pointer gesture.
    #[must_use]
    pub const fn is_release(&self) -> bool {
        matches!(
            self,
            Self::MouseUp { .. } | Self::PointerUp { .. } | Self::PointerCancel { .. }
        )
    }
}

/// Pointer identifier for pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PointerId(pub u32);

/// Type of pointer device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PointerType {
    /// Mouse pointer
    #[default]
    Mouse,
    /// Touch pointer
    Touch,
    /// Pen/stylus pointer
    Pen,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (wheel click)
    Middle,
    /// Additional button 1
    Button4,
    /// Additional button 2
    Button5,
}

/// Keyboard key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Enter/Return key
    Enter,
    /// Escape key
    Escape,
    /// Backspace key
    Backspace,
    /// Tab key
    Tab,
    /// Space key
    Space,
    /// Delete key
    Delete,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Any other key, by its DOM `key` value
    Other(char),
}

/// An event delivered to a listener, with its DOM routing context.
///
/// `path` lists the node the event originated on followed by its ancestors,
/// innermost first (the shape of `Event.composedPath()`).
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedEvent {
    /// The event payload
    pub event: Event,
    /// Node the event originated on
    pub target: NodeId,
    /// Origin node followed by its ancestors
    pub path: Vec<NodeId>,
    propagation_stopped: bool,
}

impl RoutedEvent {
    /// Route an event that originated on `target` with the given ancestors.
    #[must_use]
    pub fn new(event: Event, target: NodeId, ancestors: &[NodeId]) -> Self {
        let mut path = Vec::with_capacity(ancestors.len() + 1);
        path.push(target);
        path.extend_from_slice(ancestors);
        Self {
            event,
            target,
            path,
            propagation_stopped: false,
        }
    }

    /// Event delivered through a global (document-level) listener.
    #[must_use]
    pub fn global(event: Event) -> Self {
        Self::new(event, NodeId::DOCUMENT, &[])
    }

    /// Whether `node` is the origin or one of its ancestors.
    #[must_use]
    pub fn passes_through(&self, node: NodeId) -> bool {
        self.path.contains(&node)
    }

    /// Stop the event from reaching ancestor listeners.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether a listener stopped propagation.
    #[must_use]
    pub const fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
