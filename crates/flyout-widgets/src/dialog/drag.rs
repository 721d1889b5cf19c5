//! Pointer-driven repositioning of a free-floating panel.

use flyout_core::{
    Cursor, HostEnvironment, ListenerId, NodeId, PanelPosition, Point, Size, StyleSink,
};

/// State of one drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Panel being moved
    pub panel: NodeId,
    /// Pointer position relative to the panel anchor at grab time
    pub grab_offset: Point,
    /// Panel size at grab time
    pub size: Size,
    /// Global pointer listeners owned by this gesture
    pub listener: ListenerId,
}

/// Clamp a panel anchor (its center) so the panel stays inside the viewport.
///
/// The lower bound is applied first, so a panel larger than the viewport pins
/// to the upper bound.
#[must_use]
pub fn clamp_anchor(anchor: Point, size: Size, viewport: Size) -> Point {
    let half = size.half();
    Point::new(
        anchor
            .x
            .max(half.width)
            .min(viewport.width - half.width),
        anchor
            .y
            .max(half.height)
            .min(viewport.height - half.height),
    )
}

/// Converts a press on the panel into a stream of clamped positions.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    /// Create an idle controller.
    #[must_use]
    pub const fn new() -> Self {
        Self { session: None }
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The current gesture, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Start a gesture at `pointer`. Returns whether a session started.
    ///
    /// Nothing happens unless `enabled` and the host has laid out `panel`.
    pub fn grab<H>(&mut self, pointer: Point, panel: NodeId, enabled: bool, host: &mut H) -> bool
    where
        H: HostEnvironment + StyleSink + ?Sized,
    {
        if !enabled {
            return false;
        }
        let Some(metrics) = host.panel_metrics(panel) else {
            tracing::debug!(panel = panel.0, "drag ignored: panel not laid out");
            return false;
        };
        if self.session.is_some() {
            self.release(host);
        }

        let grab_offset = pointer - metrics.anchor;
        let listener = host.listen_pointer(panel);
        host.set_cursor(panel, Cursor::Move);
        tracing::debug!(panel = panel.0, x = pointer.x, y = pointer.y, "drag started");
        self.session = Some(DragSession {
            panel,
            grab_offset,
            size: metrics.size,
            listener,
        });
        true
    }

    /// Move the panel under the pointer; returns the applied anchor.
    pub fn drag<H>(&mut self, pointer: Point, host: &mut H) -> Option<Point>
    where
        H: HostEnvironment + StyleSink + ?Sized,
    {
        let session = self.session?;
        let anchor = clamp_anchor(pointer - session.grab_offset, session.size, host.viewport());
        host.set_position(session.panel, PanelPosition::Pixels(anchor));
        Some(anchor)
    }

    /// End the gesture. No-op without a session.
    pub fn release<H>(&mut self, host: &mut H)
    where
        H: HostEnvironment + StyleSink + ?Sized,
    {
        if let Some(session) = self.session.take() {
            host.unlisten_pointer(session.listener);
            host.set_cursor(session.panel, Cursor::Default);
            tracing::debug!(panel = session.panel.0, "drag ended");
        }
    }

    /// Abort the gesture without moving the panel again.
    pub fn cancel<H>(&mut self, host: &mut H)
    where
        H: HostEnvironment + StyleSink + ?Sized,
    {
        if self.session.is_some() {
            tracing::debug!("drag cancelled");
            self.release(host);
        }
    }
}
