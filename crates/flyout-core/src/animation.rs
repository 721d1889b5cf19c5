//! Easing and a frame-ticked transition driver.
//!
//! [`FrameDriver`] is the production [`TransitionDriver`]: the embedder calls
//! [`FrameDriver::tick`] once per animation frame and feeds the completed
//! tickets back to their widgets.

use crate::node::NodeId;
use crate::transition::{TransitionDriver, TransitionState, TransitionTicket};
use std::time::Duration;

/// Standard easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    /// Ease in (slow start)
    EaseIn,
    /// Ease out (slow end)
    EaseOut,
    /// Ease in and out (slow start and end)
    EaseInOut,
    /// Cubic ease out
    CubicOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// An easing-based animated value.
#[derive(Debug, Clone)]
pub struct EasedValue {
    /// Start value
    pub from: f64,
    /// End value
    pub to: f64,
    /// Total duration in seconds
    pub duration: f64,
    /// Elapsed time
    pub elapsed: f64,
    /// Easing function
    pub easing: Easing,
}

impl EasedValue {
    /// Create new eased animation.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing: Easing::EaseInOut,
        }
    }

    /// Set easing function.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Get current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        let eased = self.easing.apply(self.progress());
        (self.to - self.from).mul_add(eased, self.from)
    }

    /// Whether animation is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Update animation.
    pub fn update(&mut self, dt: f64) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    /// Progress from 0.0 to 1.0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone)]
struct Running {
    node: NodeId,
    ticket: TransitionTicket,
    value: EasedValue,
}

/// Frame-ticked [`TransitionDriver`].
///
/// Each running transition animates a visibility value between 0.0 (hidden)
/// and 1.0 (shown). Starting a transition on a node that is still animating
/// replaces the old one; its ticket never completes.
#[derive(Debug, Default)]
pub struct FrameDriver {
    running: Vec<Running>,
    easing: Easing,
}

impl FrameDriver {
    /// Create a new driver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set easing used for transitions started afterwards.
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Advance all transitions; returns tickets that completed this frame.
    pub fn tick(&mut self, dt: Duration) -> Vec<TransitionTicket> {
        let dt = dt.as_secs_f64();
        let mut done = Vec::new();
        self.running.retain_mut(|r| {
            r.value.update(dt);
            if r.value.is_complete() {
                tracing::trace!(node = r.node.0, ticket = ?r.ticket, "transition complete");
                done.push(r.ticket);
                false
            } else {
                true
            }
        });
        done
    }

    /// Current visibility (0.0 hidden .. 1.0 shown) of an animating node.
    #[must_use]
    pub fn visibility(&self, node: NodeId) -> Option<f64> {
        self.running
            .iter()
            .find(|r| r.node == node)
            .map(|r| r.value.value())
    }

    /// Drop any running transition on `node`.
    pub fn cancel(&mut self, node: NodeId) {
        self.running.retain(|r| r.node != node);
    }

    /// Whether any transition is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.running.is_empty()
    }

    /// Number of running transitions.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.running.len()
    }
}

const fn visibility_of(state: TransitionState) -> f64 {
    if state.is_showing() {
        1.0
    } else {
        0.0
    }
}

impl TransitionDriver for FrameDriver {
    fn animate(
        &mut self,
        node: NodeId,
        ticket: TransitionTicket,
        from: TransitionState,
        to: TransitionState,
        duration: Duration,
    ) {
        // Resume from the current value so a reversed transition does not jump.
        let start = self.visibility(node).unwrap_or(visibility_of(from));
        self.cancel(node);
        let value = EasedValue::new(start, visibility_of(to), duration.as_secs_f64())
            .with_easing(self.easing);
        self.running.push(Running {
            node,
            ticket,
            value,
        });
    }
}
