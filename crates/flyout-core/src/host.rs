//! Host environment capabilities.
//!
//! Widgets never touch a document, window or global listener directly. The
//! embedder passes a [`Host`] into every operation with side effects:
//! - [`HostEnvironment`]: page scroll style, viewport, lookups, focus, global
//!   pointer listeners
//! - [`StyleSink`]: applies visual state (position, display, cursor) to nodes
//! - [`TransitionDriver`]: runs enter/exit animations
//!
//! Tests substitute a recording fake; the browser build implements them over
//! `web-sys`.

use crate::geometry::{Point, Size};
use crate::node::NodeId;
use crate::transition::TransitionDriver;
use serde::{Deserialize, Serialize};

/// Handle for a registered pair of global pointer listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// Rendered geometry of a positioned panel, as laid out by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelMetrics {
    /// Current `left`/`top` anchor in pixels (the panel center; panels are
    /// translated by half their size)
    pub anchor: Point,
    /// Rendered size in pixels
    pub size: Size,
}

impl PanelMetrics {
    /// Create panel metrics.
    #[must_use]
    pub const fn new(anchor: Point, size: Size) -> Self {
        Self { anchor, size }
    }
}

/// Positioning applied to a floating panel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PanelPosition {
    /// Percentage anchoring at the middle of the viewport
    #[default]
    Centered,
    /// Absolute pixel anchor
    Pixels(Point),
}

/// Display state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Display {
    /// Laid out as a flex container
    #[default]
    Flex,
    /// Not displayed
    None,
}

/// Mouse cursor shown over a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cursor {
    /// Platform default
    #[default]
    Default,
    /// Move/drag affordance
    Move,
}

/// Document-level capabilities.
pub trait HostEnvironment {
    /// Current inline `overflow` of the page body, if set.
    fn body_overflow(&self) -> Option<String>;

    /// Set (or clear with `None`) the inline `overflow` of the page body.
    fn set_body_overflow(&mut self, value: Option<&str>);

    /// Viewport size in pixels.
    fn viewport(&self) -> Size;

    /// Resolve a CSS selector to the first matching node.
    fn query_selector(&self, selector: &str) -> Option<NodeId>;

    /// Move keyboard focus to a node.
    fn focus(&mut self, node: NodeId);

    /// Rendered geometry of a panel node, if it is laid out.
    fn panel_metrics(&self, node: NodeId) -> Option<PanelMetrics>;

    /// Register capture-level pointer move/up listeners on the document,
    /// delivering to `owner`. They must fire even outside the viewport.
    fn listen_pointer(&mut self, owner: NodeId) -> ListenerId;

    /// Remove listeners registered with [`HostEnvironment::listen_pointer`].
    fn unlisten_pointer(&mut self, id: ListenerId);
}

/// Applies visual state to nodes.
pub trait StyleSink {
    /// Position a floating panel.
    fn set_position(&mut self, node: NodeId, position: PanelPosition);

    /// Show or hide a node.
    fn set_display(&mut self, node: NodeId, display: Display);

    /// Change the cursor over a node.
    fn set_cursor(&mut self, node: NodeId, cursor: Cursor);
}

/// Everything a widget needs from its embedder.
pub trait Host: HostEnvironment + StyleSink + TransitionDriver {}

impl<T: HostEnvironment + StyleSink + TransitionDriver> Host for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(PanelPosition::default(), PanelPosition::Centered);
        assert_eq!(Display::default(), Display::Flex);
        assert_eq!(Cursor::default(), Cursor::Default);
    }

    #[test]
    fn test_panel_metrics_new() {
        let m = PanelMetrics::new(Point::new(100.0, 100.0), Size::new(200.0, 80.0));
        assert_eq!(m.anchor, Point::new(100.0, 100.0));
        assert_eq!(m.size.half(), Size::new(100.0, 40.0));
    }
}
