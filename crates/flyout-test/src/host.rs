//! Recording fake of every host capability.
//!
//! `FakeHost` keeps a log of each capability call so tests can assert on the
//! side effects a widget performed instead of on real layout. Transitions are
//! never completed on their own: tests drain them with
//! [`FakeHost::take_animations`] and deliver completions explicitly.

use flyout_core::{
    Cursor, Display, HostEnvironment, ListenerId, NodeId, PanelMetrics, PanelPosition, Point,
    Size, StyleSink, TransitionDriver, TransitionState, TransitionTicket,
};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// One recorded capability call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    /// `set_body_overflow`
    SetOverflow(Option<String>),
    /// `focus`
    Focus(NodeId),
    /// `listen_pointer`
    Listen(NodeId, ListenerId),
    /// `unlisten_pointer`
    Unlisten(ListenerId),
    /// `set_position`
    SetPosition(NodeId, PanelPosition),
    /// `set_display`
    SetDisplay(NodeId, Display),
    /// `set_cursor`
    SetCursor(NodeId, Cursor),
    /// `animate`
    Animate {
        /// Animated node
        node: NodeId,
        /// Ticket to complete
        ticket: TransitionTicket,
        /// Target state
        to: TransitionState,
    },
}

/// A transition started on the fake driver and not yet completed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingAnimation {
    /// Animated node
    pub node: NodeId,
    /// Ticket to report on completion
    pub ticket: TransitionTicket,
    /// Start state
    pub from: TransitionState,
    /// Target state
    pub to: TransitionState,
    /// Requested duration
    pub duration: Duration,
}

/// In-memory host for tests.
#[derive(Debug)]
pub struct FakeHost {
    overflow: Option<String>,
    viewport: Size,
    selectors: HashMap<String, NodeId>,
    metrics: HashMap<NodeId, PanelMetrics>,
    focused: Option<NodeId>,
    next_listener: u64,
    listeners: HashSet<ListenerId>,
    pending: Vec<PendingAnimation>,
    calls: Vec<HostCall>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeHost {
    /// Create a host with a 1280x720 viewport, a `body` node and no overflow.
    #[must_use]
    pub fn new() -> Self {
        let mut selectors = HashMap::new();
        selectors.insert("body".to_string(), Self::BODY);
        Self {
            overflow: None,
            viewport: Size::new(1280.0, 720.0),
            selectors,
            metrics: HashMap::new(),
            focused: None,
            next_listener: 1,
            listeners: HashSet::new(),
            pending: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Node returned for the `body` selector.
    pub const BODY: NodeId = NodeId(1_000_000);

    /// Set the viewport size.
    #[must_use]
    pub const fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    /// Start with an inline body overflow.
    #[must_use]
    pub fn body_overflow_style(mut self, value: impl Into<String>) -> Self {
        self.overflow = Some(value.into());
        self
    }

    /// Make `selector` resolve to `node`.
    #[must_use]
    pub fn with_selector(mut self, selector: impl Into<String>, node: NodeId) -> Self {
        self.selectors.insert(selector.into(), node);
        self
    }

    /// Lay out a panel node with a rendered size, anchored at `anchor`.
    pub fn layout_panel(&mut self, node: NodeId, anchor: Point, size: Size) {
        self.metrics.insert(node, PanelMetrics::new(anchor, size));
    }

    /// Every call recorded so far.
    #[must_use]
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Forget recorded calls.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Count recorded calls matching a predicate.
    pub fn count_calls(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Currently focused node.
    #[must_use]
    pub const fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Number of live global pointer listener registrations.
    #[must_use]
    pub fn active_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Rendered metrics of a panel.
    #[must_use]
    pub fn metrics(&self, node: NodeId) -> Option<PanelMetrics> {
        self.metrics.get(&node).copied()
    }

    /// Transitions started and not yet taken.
    #[must_use]
    pub fn pending_animations(&self) -> &[PendingAnimation] {
        &self.pending
    }

    /// Take every pending transition, oldest first.
    pub fn take_animations(&mut self) -> Vec<PendingAnimation> {
        std::mem::take(&mut self.pending)
    }
}

impl HostEnvironment for FakeHost {
    fn body_overflow(&self) -> Option<String> {
        self.overflow.clone()
    }

    fn set_body_overflow(&mut self, value: Option<&str>) {
        self.overflow = value.map(str::to_string);
        self.calls.push(HostCall::SetOverflow(self.overflow.clone()));
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.selectors.get(selector).copied()
    }

    fn focus(&mut self, node: NodeId) {
        self.focused = Some(node);
        self.calls.push(HostCall::Focus(node));
    }

    fn panel_metrics(&self, node: NodeId) -> Option<PanelMetrics> {
        self.metrics.get(&node).copied()
    }

    fn listen_pointer(&mut self, owner: NodeId) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id);
        self.calls.push(HostCall::Listen(owner, id));
        id
    }

    fn unlisten_pointer(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
        self.calls.push(HostCall::Unlisten(id));
    }
}

impl StyleSink for FakeHost {
    fn set_position(&mut self, node: NodeId, position: PanelPosition) {
        let anchor = match position {
            PanelPosition::Centered => Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0),
            PanelPosition::Pixels(p) => p,
        };
        if let Some(m) = self.metrics.get_mut(&node) {
            m.anchor = anchor;
        }
        self.calls.push(HostCall::SetPosition(node, position));
    }

    fn set_display(&mut self, node: NodeId, display: Display) {
        self.calls.push(HostCall::SetDisplay(node, display));
    }

    fn set_cursor(&mut self, node: NodeId, cursor: Cursor) {
        self.calls.push(HostCall::SetCursor(node, cursor));
    }
}

impl TransitionDriver for FakeHost {
    fn animate(
        &mut self,
        node: NodeId,
        ticket: TransitionTicket,
        from: TransitionState,
        to: TransitionState,
        duration: Duration,
    ) {
        self.pending.push(PendingAnimation {
            node,
            ticket,
            from,
            to,
            duration,
        });
        self.calls.push(HostCall::Animate { node, ticket, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flyout_core::AnimatedElement;

    #[test]
    fn test_fake_host_defaults() {
        let host = FakeHost::new();
        assert_eq!(HostEnvironment::viewport(&host), Size::new(1280.0, 720.0));
        assert_eq!(host.query_selector("body"), Some(FakeHost::BODY));
        assert_eq!(host.query_selector("#missing"), None);
        assert_eq!(host.body_overflow(), None);
    }

    #[test]
    fn test_overflow_is_recorded() {
        let mut host = FakeHost::new().body_overflow_style("auto");
        assert_eq!(host.body_overflow().as_deref(), Some("auto"));
        host.set_body_overflow(Some("hidden"));
        host.set_body_overflow(None);
        assert_eq!(
            host.calls(),
            &[
                HostCall::SetOverflow(Some("hidden".to_string())),
                HostCall::SetOverflow(None)
            ]
        );
    }

    #[test]
    fn test_listeners_tracked() {
        let mut host = FakeHost::new();
        let a = host.listen_pointer(NodeId::new(1));
        let b = host.listen_pointer(NodeId::new(1));
        assert_ne!(a, b);
        assert_eq!(host.active_listeners(), 2);
        host.unlisten_pointer(a);
        assert_eq!(host.active_listeners(), 1);
    }

    #[test]
    fn test_set_position_moves_metrics() {
        let mut host = FakeHost::new().viewport(1000.0, 800.0);
        let panel = NodeId::new(3);
        host.layout_panel(panel, Point::new(10.0, 10.0), Size::new(100.0, 50.0));
        host.set_position(panel, PanelPosition::Pixels(Point::new(200.0, 300.0)));
        assert_eq!(host.metrics(panel).unwrap().anchor, Point::new(200.0, 300.0));
        host.set_position(panel, PanelPosition::Centered);
        assert_eq!(host.metrics(panel).unwrap().anchor, Point::new(500.0, 400.0));
    }

    #[test]
    fn test_animations_are_queued() {
        let mut host = FakeHost::new();
        let ticket = TransitionTicket::new(AnimatedElement::Panel, 1);
        host.animate(
            NodeId::new(5),
            ticket,
            TransitionState::Unmounted,
            TransitionState::Entered,
            Duration::from_millis(300),
        );
        assert_eq!(host.pending_animations().len(), 1);
        let taken = host.take_animations();
        assert_eq!(taken[0].ticket, ticket);
        assert!(host.pending_animations().is_empty());
    }
}
