//! Transition vocabulary shared by widgets and transition drivers.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Lifecycle state of one animated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransitionState {
    /// Not attached to the document.
    #[default]
    Unmounted,
    /// Attached, enter animation running.
    Entering,
    /// Attached and fully shown.
    Entered,
    /// Exit animation running.
    Exiting,
    /// Attached but hidden after an exit.
    Exited,
}

impl TransitionState {
    /// Whether the element is attached to the document.
    #[must_use]
    pub const fn is_mounted(self) -> bool {
        !matches!(self, Self::Unmounted)
    }

    /// Whether the element is shown or on its way to being shown.
    #[must_use]
    pub const fn is_showing(self) -> bool {
        matches!(self, Self::Entering | Self::Entered)
    }

    /// Whether an animation is in flight.
    #[must_use]
    pub const fn is_animating(self) -> bool {
        matches!(self, Self::Entering | Self::Exiting)
    }
}

impl fmt::Display for TransitionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unmounted => "unmounted",
            Self::Entering => "entering",
            Self::Entered => "entered",
            Self::Exiting => "exiting",
            Self::Exited => "exited",
        };
        f.write_str(name)
    }
}

/// Which element of a floating panel is being animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimatedElement {
    /// The panel itself
    Panel,
    /// The dimmed layer behind a modal panel
    Backdrop,
}

/// Identifies one started animation.
///
/// A ticket whose generation is no longer current is stale and its
/// completion must be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionTicket {
    /// Element being animated
    pub element: AnimatedElement,
    /// Generation of the element's state machine when started
    pub generation: u64,
}

impl TransitionTicket {
    /// Create a new ticket.
    #[must_use]
    pub const fn new(element: AnimatedElement, generation: u64) -> Self {
        Self {
            element,
            generation,
        }
    }
}

/// Capability that runs enter/exit animations.
///
/// Completion is reported back to the owning widget by the embedder, with the
/// same ticket, once `duration` has elapsed and the element shows `to`.
pub trait TransitionDriver {
    /// Start animating `node` from `from` to `to`.
    fn animate(
        &mut self,
        node: NodeId,
        ticket: TransitionTicket,
        from: TransitionState,
        to: TransitionState,
        duration: Duration,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_default_is_unmounted() {
        assert_eq!(TransitionState::default(), TransitionState::Unmounted);
        assert!(!TransitionState::Unmounted.is_mounted());
        assert!(TransitionState::Exited.is_mounted());
    }

    #[test]
    fn test_state_predicates() {
        assert!(TransitionState::Entering.is_showing());
        assert!(TransitionState::Entered.is_showing());
        assert!(!TransitionState::Exiting.is_showing());
        assert!(TransitionState::Exiting.is_animating());
        assert!(!TransitionState::Exited.is_animating());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(TransitionState::Entering.to_string(), "entering");
        assert_eq!(TransitionState::Exited.to_string(), "exited");
    }

    #[test]
    fn test_ticket_equality() {
        let a = TransitionTicket::new(AnimatedElement::Panel, 3);
        assert_eq!(a, TransitionTicket::new(AnimatedElement::Panel, 3));
        assert_ne!(a, TransitionTicket::new(AnimatedElement::Backdrop, 3));
        assert_ne!(a, TransitionTicket::new(AnimatedElement::Panel, 4));
    }
}
