//! Enter/exit state machine for one animated element.

use flyout_core::{AnimatedElement, NodeId, TransitionDriver, TransitionState, TransitionTicket};
use std::time::Duration;
use thiserror::Error;

/// Duration of the panel zoom transition.
pub const PANEL_TRANSITION: Duration = Duration::from_millis(300);

/// Duration of the backdrop fade transition.
pub const BACKDROP_TRANSITION: Duration = Duration::from_millis(300);

/// A completion that does not match the current animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("stale {element:?} transition completion: generation {got}, current {current} ({state})")]
pub struct InvalidStateTransition {
    /// Element the completion was for
    pub element: AnimatedElement,
    /// Generation carried by the ticket
    pub got: u64,
    /// Current generation
    pub current: u64,
    /// State when the completion arrived
    pub state: TransitionState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingStart {
    from: TransitionState,
    to: TransitionState,
}

/// Transition state of one element.
///
/// `show` and `hide` only change the logical state; the animation itself is
/// handed to the driver by [`ElementTransition::start_pending`] once the
/// element is attached.
#[derive(Debug, Clone)]
pub struct ElementTransition {
    element: AnimatedElement,
    duration: Duration,
    state: TransitionState,
    generation: u64,
    exit_to: TransitionState,
    pending: Option<PendingStart>,
}

impl ElementTransition {
    /// Create an unmounted element.
    #[must_use]
    pub const fn new(element: AnimatedElement, duration: Duration) -> Self {
        Self {
            element,
            duration,
            state: TransitionState::Unmounted,
            generation: 0,
            exit_to: TransitionState::Unmounted,
            pending: None,
        }
    }

    /// The panel transition.
    #[must_use]
    pub const fn panel() -> Self {
        Self::new(AnimatedElement::Panel, PANEL_TRANSITION)
    }

    /// The backdrop transition.
    #[must_use]
    pub const fn backdrop() -> Self {
        Self::new(AnimatedElement::Backdrop, BACKDROP_TRANSITION)
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> TransitionState {
        self.state
    }

    /// Current generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Ticket for the current generation.
    #[must_use]
    pub const fn ticket(&self) -> TransitionTicket {
        TransitionTicket::new(self.element, self.generation)
    }

    /// Whether an animation waits for [`ElementTransition::start_pending`].
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Begin entering. Returns `false` if already showing.
    pub fn show(&mut self) -> bool {
        if self.state.is_showing() {
            return false;
        }
        self.begin(TransitionState::Entering, TransitionState::Entered);
        true
    }

    /// Begin exiting. The element ends `Unmounted` when `unmount` is set,
    /// otherwise `Exited`. Returns `false` if not showing.
    pub fn hide(&mut self, unmount: bool) -> bool {
        if !self.state.is_showing() {
            return false;
        }
        self.exit_to = if unmount {
            TransitionState::Unmounted
        } else {
            TransitionState::Exited
        };
        self.begin(TransitionState::Exiting, self.exit_to);
        true
    }

    fn begin(&mut self, state: TransitionState, to: TransitionState) {
        // A new generation makes completions of the superseded animation stale.
        self.generation += 1;
        let from = self.state;
        self.state = state;
        self.pending = Some(PendingStart { from, to });
        tracing::debug!(
            element = ?self.element,
            from = %from,
            to = %state,
            generation = self.generation,
            "transition"
        );
    }

    /// Drop to `Unmounted` at once, invalidating any animation.
    pub fn reset(&mut self) {
        if self.state.is_mounted() || self.pending.is_some() {
            tracing::debug!(element = ?self.element, from = %self.state, "transition reset");
        }
        self.generation += 1;
        self.state = TransitionState::Unmounted;
        self.pending = None;
    }

    /// Hand a pending animation to the driver.
    pub fn start_pending<D: TransitionDriver + ?Sized>(&mut self, node: NodeId, driver: &mut D) {
        if let Some(PendingStart { from, to }) = self.pending.take() {
            driver.animate(node, self.ticket(), from, to, self.duration);
        }
    }

    /// Apply a completion; returns the state reached.
    pub fn complete(
        &mut self,
        ticket: TransitionTicket,
    ) -> Result<TransitionState, InvalidStateTransition> {
        let current = ticket.element == self.element
            && ticket.generation == self.generation
            && self.state.is_animating()
            && self.pending.is_none();
        if !current {
            return Err(InvalidStateTransition {
                element: ticket.element,
                got: ticket.generation,
                current: self.generation,
                state: self.state,
            });
        }
        self.state = match self.state {
            TransitionState::Entering => TransitionState::Entered,
            _ => self.exit_to,
        };
        tracing::debug!(element = ?self.element, state = %self.state, "transition complete");
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flyout_test::FakeHost;

    fn started(t: &mut ElementTransition, host: &mut FakeHost) -> TransitionTicket {
        t.start_pending(NodeId::new(1), host);
        let taken = host.take_animations();
        assert_eq!(taken.len(), 1);
        taken[0].ticket
    }

    #[test]
    fn test_enter_then_exit_to_unmounted() {
        let mut host = FakeHost::new();
        let mut t = ElementTransition::panel();
        assert!(t.show());
        assert_eq!(t.state(), TransitionState::Entering);
        let ticket = started(&mut t, &mut host);
        assert_eq!(t.complete(ticket), Ok(TransitionState::Entered));

        assert!(t.hide(true));
        let ticket = started(&mut t, &mut host);
        assert_eq!(t.complete(ticket), Ok(TransitionState::Unmounted));
    }

    #[test]
    fn test_exit_to_exited_when_kept() {
        let mut host = FakeHost::new();
        let mut t = ElementTransition::panel();
        t.show();
        let ticket = started(&mut t, &mut host);
        t.complete(ticket).unwrap();
        t.hide(false);
        let ticket = started(&mut t, &mut host);
        assert_eq!(t.complete(ticket), Ok(TransitionState::Exited));
        assert!(t.state().is_mounted());
    }

    #[test]
    fn test_show_from_exited() {
        let mut host = FakeHost::new();
        let mut t = ElementTransition::panel();
        t.show();
        let ticket = started(&mut t, &mut host);
        t.complete(ticket).unwrap();
        t.hide(false);
        let ticket = started(&mut t, &mut host);
        t.complete(ticket).unwrap();

        assert!(t.show());
        t.start_pending(NodeId::new(1), &mut host);
        let anim = host.take_animations()[0];
        assert_eq!(anim.from, TransitionState::Exited);
        assert_eq!(anim.to, TransitionState::Entered);
    }

    #[test]
    fn test_show_is_idempotent() {
        let mut t = ElementTransition::panel();
        assert!(t.show());
        let generation = t.generation();
        assert!(!t.show());
        assert_eq!(t.generation(), generation);
        assert!(!ElementTransition::backdrop().hide(true));
    }

    #[test]
    fn test_show_while_exiting_makes_exit_stale() {
        let mut host = FakeHost::new();
        let mut t = ElementTransition::panel();
        t.show();
        let enter = started(&mut t, &mut host);
        t.complete(enter).unwrap();
        t.hide(true);
        let exit = started(&mut t, &mut host);

        assert!(t.show());
        let reenter = started(&mut t, &mut host);
        let err = t.complete(exit).unwrap_err();
        assert_eq!(err.got, exit.generation);
        assert_eq!(t.state(), TransitionState::Entering);
        assert_eq!(t.complete(reenter), Ok(TransitionState::Entered));
    }

    #[test]
    fn test_completion_before_start_is_stale() {
        let mut t = ElementTransition::panel();
        t.show();
        assert!(t.complete(t.ticket()).is_err());
    }

    #[test]
    fn test_wrong_element_is_stale() {
        let mut host = FakeHost::new();
        let mut t = ElementTransition::panel();
        t.show();
        let ticket = started(&mut t, &mut host);
        let other = TransitionTicket::new(AnimatedElement::Backdrop, ticket.generation);
        assert!(t.complete(other).is_err());
        assert_eq!(t.state(), TransitionState::Entering);
    }

    #[test]
    fn test_double_completion_is_stale() {
        let mut host = FakeHost::new();
        let mut t = ElementTransition::panel();
        t.show();
        let ticket = started(&mut t, &mut host);
        t.complete(ticket).unwrap();
        assert!(t.complete(ticket).is_err());
    }

    #[test]
    fn test_reset_invalidates() {
        let mut host = FakeHost::new();
        let mut t = ElementTransition::backdrop();
        t.show();
        let ticket = started(&mut t, &mut host);
        t.reset();
        assert_eq!(t.state(), TransitionState::Unmounted);
        assert!(t.complete(ticket).is_err());
        assert!(!t.has_pending());
    }

    #[test]
    fn test_durations() {
        let mut host = FakeHost::new();
        let mut t = ElementTransition::backdrop();
        t.show();
        t.start_pending(NodeId::new(2), &mut host);
        assert_eq!(host.pending_animations()[0].duration, BACKDROP_TRANSITION);
        assert_eq!(PANEL_TRANSITION, Duration::from_millis(300));
    }

    #[test]
    fn test_error_display() {
        let err = InvalidStateTransition {
            element: AnimatedElement::Panel,
            got: 1,
            current: 2,
            state: TransitionState::Entering,
        };
        assert_eq!(
            err.to_string(),
            "stale Panel transition completion: generation 1, current 2 (entering)"
        );
    }
}
