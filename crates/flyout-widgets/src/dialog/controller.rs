//! The dialog controller.
//!
//! A [`Dialog`] is driven in two phases per update, mirroring a render and a
//! layout-effect pass:
//!
//! 1. [`Dialog::render`] takes the caller's [`DialogConfig`], updates the
//!    transition state machines and returns the [`DialogTree`] to attach.
//! 2. [`Dialog::commit`] runs after the tree is attached: it engages or
//!    releases the scroll lock, focuses the wrapper and starts pending
//!    animations on the driver.
//!
//! Animation completions come back through [`Dialog::transition_end`] and
//! input through [`Dialog::dispatch`].

use super::config::{CloseReason, DialogConfig, Placement};
use super::drag::DragController;
use super::mount::MountTarget;
use super::scroll_lock::{ScrollLock, ScrollLockToken};
use super::transition::ElementTransition;
use crate::error::Result;
use flyout_core::{
    AnimatedElement, Display, Event, Host, Key, NodeId, PanelPosition, RoutedEvent,
    TransitionState, TransitionTicket,
};

/// Inline style of the panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelStyle {
    /// CSS `width`
    pub width: Option<String>,
    /// CSS `height`
    pub height: Option<String>,
    /// CSS `margin-top`
    pub margin_top: Option<String>,
    /// CSS `margin-left`
    pub margin_left: Option<String>,
}

impl PanelStyle {
    fn from_config(config: &DialogConfig) -> Self {
        let (margin_top, margin_left) = match &config.offset {
            Some(offset) => (
                Some(offset.top.as_ref().map_or_else(|| "0".to_string(), ToString::to_string)),
                Some(offset.left.as_ref().map_or_else(|| "0".to_string(), ToString::to_string)),
            ),
            None => (None, None),
        };
        Self {
            width: config.width.as_ref().map(ToString::to_string),
            height: config.height.as_ref().map(ToString::to_string),
            margin_top,
            margin_left,
        }
    }

    /// Set declarations as `(property, value)` pairs.
    #[must_use]
    pub fn declarations(&self) -> Vec<(&'static str, &str)> {
        [
            ("width", &self.width),
            ("height", &self.height),
            ("margin-top", &self.margin_top),
            ("margin-left", &self.margin_left),
        ]
        .into_iter()
        .filter_map(|(prop, value)| value.as_deref().map(|v| (prop, v)))
        .collect()
    }
}

/// The focusable container holding backdrop and panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperView {
    /// Wrapper node
    pub node: NodeId,
    /// Stacking order
    pub z_index: i32,
    /// Inline display; unset while hidden
    pub display: Option<Display>,
    /// Always `-1`: focusable but not tabbable
    pub tab_index: i32,
}

/// The dimmed layer behind a modal panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackdropView {
    /// Backdrop node
    pub node: NodeId,
    /// Animation state
    pub state: TransitionState,
}

/// The floating panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    /// Panel node
    pub node: NodeId,
    /// Animation state
    pub state: TransitionState,
    /// Vertical placement
    pub placement: Option<Placement>,
    /// Inline style
    pub style: PanelStyle,
    /// Close button node, when rendered
    pub close_button: Option<NodeId>,
    /// Header content
    pub header: Option<String>,
    /// Body content
    pub body: Option<String>,
    /// Footer content
    pub footer: Option<String>,
}

/// Description of the subtree to attach for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogTree {
    /// Where to attach
    pub attachment: MountTarget,
    /// Outer container
    pub wrapper: WrapperView,
    /// Backdrop, while mounted
    pub backdrop: Option<BackdropView>,
    /// Panel, while mounted
    pub panel: Option<PanelView>,
}

#[derive(Debug, Clone, Copy)]
struct DialogNodes {
    wrapper: NodeId,
    backdrop: NodeId,
    panel: NodeId,
    close_button: NodeId,
}

impl DialogNodes {
    fn allocate() -> Self {
        Self {
            wrapper: NodeId::next(),
            backdrop: NodeId::next(),
            panel: NodeId::next(),
            close_button: NodeId::next(),
        }
    }
}

/// Floating panel with optional backdrop.
///
/// Teardown must go through [`Dialog::destroy`]: dropping a dialog that still
/// holds a scroll lock leaves the page locked.
#[derive(Debug)]
pub struct Dialog {
    nodes: DialogNodes,
    panel: ElementTransition,
    backdrop: ElementTransition,
    drag: DragController,
    scroll_lock: ScrollLock,
    lock_token: Option<ScrollLockToken>,
    config: DialogConfig,
    visible: bool,
    focus_pending: bool,
    /// Panel carries a pixel anchor from a drag.
    positioned: bool,
}

impl Default for Dialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialog {
    /// Create a dialog using the shared scroll lock slot.
    #[must_use]
    pub fn new() -> Self {
        Self::with_scroll_lock(ScrollLock::shared())
    }

    /// Create a dialog using a specific scroll lock slot.
    #[must_use]
    pub fn with_scroll_lock(scroll_lock: ScrollLock) -> Self {
        Self {
            nodes: DialogNodes::allocate(),
            panel: ElementTransition::panel(),
            backdrop: ElementTransition::backdrop(),
            drag: DragController::new(),
            scroll_lock,
            lock_token: None,
            config: DialogConfig::default(),
            visible: false,
            focus_pending: false,
            positioned: false,
        }
    }

    /// Wrapper node.
    #[must_use]
    pub const fn wrapper(&self) -> NodeId {
        self.nodes.wrapper
    }

    /// Backdrop node.
    #[must_use]
    pub const fn backdrop(&self) -> NodeId {
        self.nodes.backdrop
    }

    /// Panel node.
    #[must_use]
    pub const fn panel(&self) -> NodeId {
        self.nodes.panel
    }

    /// Close button node.
    #[must_use]
    pub const fn close_button(&self) -> NodeId {
        self.nodes.close_button
    }

    /// Panel animation state.
    #[must_use]
    pub const fn panel_state(&self) -> TransitionState {
        self.panel.state()
    }

    /// Backdrop animation state.
    #[must_use]
    pub const fn backdrop_state(&self) -> TransitionState {
        self.backdrop.state()
    }

    /// Visibility requested by the last render.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether a drag gesture is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Whether this dialog holds a scroll lock.
    #[must_use]
    pub const fn holds_scroll_lock(&self) -> bool {
        self.lock_token.is_some()
    }

    /// The scroll lock slot this dialog uses.
    #[must_use]
    pub const fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }

    /// Apply a configuration and describe the subtree to attach.
    ///
    /// The mount target is resolved first; if it cannot be found the render
    /// fails and no state changes. Returns `None` while hidden with nothing
    /// mounted.
    ///
    /// A drag in progress is cancelled, restoring the cursor, before the new
    /// configuration takes effect. Switching to modal recentres a panel that
    /// was dragged.
    pub fn render(&mut self, config: &DialogConfig, host: &mut dyn Host) -> Result<Option<DialogTree>> {
        let attachment = config.mount_target.resolve(&*host)?;

        if !config.wants_backdrop() && self.backdrop.state().is_mounted() {
            self.backdrop.reset();
        }
        if self.drag.is_dragging() && (!config.visible || !config.can_drag()) {
            self.drag.cancel(host);
        }
        if self.positioned && config.is_modal() && self.panel.state().is_mounted() {
            host.set_position(self.nodes.panel, PanelPosition::Centered);
            self.positioned = false;
        }

        match (self.visible, config.visible) {
            (false, true) => {
                self.panel.show();
                if config.wants_backdrop() {
                    self.backdrop.show();
                }
                self.focus_pending = true;
            }
            (true, false) => {
                self.panel.hide(config.destroy_on_close);
                self.backdrop.hide(true);
            }
            (true, true) if config.wants_backdrop() => {
                self.backdrop.show();
            }
            _ => {}
        }

        self.visible = config.visible;
        self.config = config.clone();

        if !self.visible && !self.panel.state().is_mounted() && !self.backdrop.state().is_mounted() {
            return Ok(None);
        }
        Ok(Some(self.tree(attachment)))
    }

    fn tree(&self, attachment: MountTarget) -> DialogTree {
        let config = &self.config;
        let backdrop = self.backdrop.state().is_mounted().then(|| BackdropView {
            node: self.nodes.backdrop,
            state: self.backdrop.state(),
        });
        let panel = self.panel.state().is_mounted().then(|| PanelView {
            node: self.nodes.panel,
            state: self.panel.state(),
            placement: config.placement,
            style: PanelStyle::from_config(config),
            close_button: config.close_btn.then_some(self.nodes.close_button),
            header: config.header.clone(),
            body: config.body.clone(),
            footer: config.footer.clone(),
        });
        DialogTree {
            attachment,
            wrapper: WrapperView {
                node: self.nodes.wrapper,
                z_index: config.z_index,
                display: self.visible.then_some(Display::Flex),
                tab_index: -1,
            },
            backdrop,
            panel,
        }
    }

    /// Run side effects once the rendered tree is attached.
    pub fn commit(&mut self, host: &mut dyn Host) {
        if self.visible {
            let wants_lock = self.config.wants_scroll_lock();
            match self.lock_token {
                None if wants_lock => {
                    self.lock_token = Some(self.scroll_lock.acquire(host));
                }
                Some(token) if !wants_lock => {
                    self.scroll_lock.release(token, host);
                    self.lock_token = None;
                }
                _ => {}
            }
        }

        self.backdrop.start_pending(self.nodes.backdrop, host);
        self.panel.start_pending(self.nodes.panel, host);

        if self.focus_pending && self.visible {
            host.focus(self.nodes.wrapper);
        }
        self.focus_pending = false;
    }

    /// Feed an animation completion. Returns whether it was current.
    pub fn transition_end(&mut self, ticket: TransitionTicket, host: &mut dyn Host) -> bool {
        let result = match ticket.element {
            AnimatedElement::Panel => self.panel.complete(ticket),
            AnimatedElement::Backdrop => self.backdrop.complete(ticket),
        };
        let state = match result {
            Ok(state) => state,
            Err(stale) => {
                tracing::debug!(%stale, "ignoring transition completion");
                return false;
            }
        };

        if ticket.element == AnimatedElement::Panel {
            match state {
                TransitionState::Entered => {
                    if let Some(on_opened) = self.config.callbacks.on_opened.clone() {
                        on_opened();
                    }
                }
                TransitionState::Exited | TransitionState::Unmounted => self.finish_close(host),
                _ => {}
            }
        }
        true
    }

    fn finish_close(&mut self, host: &mut dyn Host) {
        host.set_display(self.nodes.wrapper, Display::None);
        if let Some(token) = self.lock_token.take() {
            self.scroll_lock.release(token, host);
        }
        if self.positioned || !self.config.is_modal() {
            host.set_position(self.nodes.panel, PanelPosition::Centered);
            self.positioned = false;
        }
        if let Some(on_closed) = self.config.callbacks.on_closed.clone() {
            on_closed();
        }
    }

    /// Route an input event. Returns whether the dialog handled it.
    pub fn dispatch(&mut self, routed: &mut RoutedEvent, host: &mut dyn Host) -> bool {
        match routed.event {
            Event::KeyDown { key: Key::Escape } if routed.passes_through(self.nodes.wrapper) => {
                routed.stop_propagation();
                self.request_close(CloseReason::Escape);
                true
            }
            Event::Click { .. } if routed.target == self.nodes.backdrop => {
                self.request_close(CloseReason::Backdrop);
                true
            }
            Event::Click { .. }
                if self.config.close_btn && routed.passes_through(self.nodes.close_button) =>
            {
                self.request_close(CloseReason::CloseButton);
                true
            }
            ref event if event.is_press() => {
                if !routed.passes_through(self.nodes.panel)
                    || routed.passes_through(self.nodes.close_button)
                {
                    return false;
                }
                let Some(pointer) = event.position() else {
                    return false;
                };
                let enabled = self.visible && self.config.can_drag();
                self.drag.grab(pointer, self.nodes.panel, enabled, host)
            }
            ref event if event.is_motion() && self.drag.is_dragging() => match event.position() {
                Some(pointer) => {
                    let moved = self.drag.drag(pointer, host).is_some();
                    self.positioned |= moved;
                    moved
                }
                None => false,
            },
            ref event if event.is_release() && self.drag.is_dragging() => {
                self.drag.release(host);
                true
            }
            _ => false,
        }
    }

    fn request_close(&self, reason: CloseReason) {
        tracing::debug!(?reason, "dialog close requested");
        if let Some(handler) = self.config.callbacks.close_handler(reason) {
            handler(reason);
        }
    }

    /// Tear down immediately: cancel any drag and release the scroll lock.
    ///
    /// Call this before dropping a dialog; `Drop` has no host to restore the
    /// page with.
    pub fn destroy(&mut self, host: &mut dyn Host) {
        self.drag.cancel(host);
        if let Some(token) = self.lock_token.take() {
            self.scroll_lock.release(token, host);
        }
        self.panel.reset();
        self.backdrop.reset();
        self.visible = false;
        self.focus_pending = false;
        self.positioned = false;
    }
}

impl Drop for Dialog {
    fn drop(&mut self) {
        if let Some(token) = self.lock_token {
            tracing::warn!(?token, "dialog dropped without destroy, scroll lock still held");
        }
    }
}
