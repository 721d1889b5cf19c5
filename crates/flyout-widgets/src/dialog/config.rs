//! Caller-owned dialog options.

use super::mount::MountSpec;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Default stacking order of the dialog wrapper.
pub const DEFAULT_Z_INDEX: i32 = 2500;

/// Placement mode of a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DialogMode {
    /// Centered, with backdrop and scroll lock
    #[default]
    Modal,
    /// Free floating, optionally draggable
    NotModal,
}

/// Vertical placement of a modal panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Near the top of the viewport
    Top,
    /// Vertically centered
    Center,
}

/// A CSS length: plain numbers are pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    /// Length in pixels
    Pixels(f32),
    /// Any CSS length, e.g. `"40%"`
    Css(String),
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(px) => write!(f, "{px}px"),
            Self::Css(css) => f.write_str(css),
        }
    }
}

impl From<f32> for Dimension {
    fn from(px: f32) -> Self {
        Self::Pixels(px)
    }
}

impl From<&str> for Dimension {
    fn from(css: &str) -> Self {
        Self::Css(css.to_string())
    }
}

/// Panel margin offsets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Offset {
    /// Top margin
    pub top: Option<Dimension>,
    /// Left margin
    pub left: Option<Dimension>,
}

impl Offset {
    /// Create an offset with both margins set.
    pub fn new(top: impl Into<Dimension>, left: impl Into<Dimension>) -> Self {
        Self {
            top: Some(top.into()),
            left: Some(left.into()),
        }
    }
}

/// Why a close was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseReason {
    /// Escape key pressed
    Escape,
    /// Backdrop clicked
    Backdrop,
    /// Close button clicked
    CloseButton,
}

/// Lifecycle notification.
pub type Callback = Rc<dyn Fn()>;

/// Close request handler.
pub type CloseCallback = Rc<dyn Fn(CloseReason)>;

/// Callbacks fired by a dialog.
///
/// `on_click_overlay`, `on_click_close_btn` and `on_keydown_esc` fall back to
/// `on_close` when unset.
#[derive(Clone, Default)]
pub struct DialogCallbacks {
    /// Panel finished entering
    pub on_opened: Option<Callback>,
    /// Panel finished exiting
    pub on_closed: Option<Callback>,
    /// Close requested by any interaction
    pub on_close: Option<CloseCallback>,
    /// Backdrop clicked
    pub on_click_overlay: Option<CloseCallback>,
    /// Close button clicked
    pub on_click_close_btn: Option<CloseCallback>,
    /// Escape pressed
    pub on_keydown_esc: Option<CloseCallback>,
}

impl DialogCallbacks {
    /// Handler for a close request, falling back to `on_close`.
    #[must_use]
    pub fn close_handler(&self, reason: CloseReason) -> Option<CloseCallback> {
        let specific = match reason {
            CloseReason::Escape => &self.on_keydown_esc,
            CloseReason::Backdrop => &self.on_click_overlay,
            CloseReason::CloseButton => &self.on_click_close_btn,
        };
        specific.as_ref().or(self.on_close.as_ref()).cloned()
    }
}

impl fmt::Debug for DialogCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogCallbacks")
            .field("on_opened", &self.on_opened.is_some())
            .field("on_closed", &self.on_closed.is_some())
            .field("on_close", &self.on_close.is_some())
            .field("on_click_overlay", &self.on_click_overlay.is_some())
            .field("on_click_close_btn", &self.on_click_close_btn.is_some())
            .field("on_keydown_esc", &self.on_keydown_esc.is_some())
            .finish()
    }
}

/// Options for one render of a dialog.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DialogConfig {
    /// Whether the dialog should be shown
    pub visible: bool,
    /// Placement mode
    pub mode: DialogMode,
    /// Vertical placement
    pub placement: Option<Placement>,
    /// Allow dragging (not-modal only)
    pub draggable: bool,
    /// Render a backdrop (modal only)
    pub show_overlay: bool,
    /// Lock page scrolling while shown (modal only)
    pub prevent_scroll_through: bool,
    /// Detach the panel after it exits
    pub destroy_on_close: bool,
    /// Panel width
    pub width: Option<Dimension>,
    /// Panel height
    pub height: Option<Dimension>,
    /// Panel margins
    pub offset: Option<Offset>,
    /// Wrapper stacking order
    pub z_index: i32,
    /// Attachment point
    pub mount_target: MountSpec,
    /// Header content
    pub header: Option<String>,
    /// Body content
    pub body: Option<String>,
    /// Footer content
    pub footer: Option<String>,
    /// Render the close button
    pub close_btn: bool,
    /// Event handlers
    #[serde(skip)]
    pub callbacks: DialogCallbacks,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            visible: false,
            mode: DialogMode::Modal,
            placement: None,
            draggable: false,
            show_overlay: true,
            prevent_scroll_through: true,
            destroy_on_close: false,
            width: None,
            height: None,
            offset: None,
            z_index: DEFAULT_Z_INDEX,
            mount_target: MountSpec::default(),
            header: None,
            body: None,
            footer: None,
            close_btn: true,
            callbacks: DialogCallbacks::default(),
        }
    }
}

impl DialogConfig {
    /// Create a hidden modal dialog configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a YAML document. Callbacks stay unset.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Whether the dialog runs in modal mode.
    #[must_use]
    pub fn is_modal(&self) -> bool {
        self.mode == DialogMode::Modal
    }

    /// Whether a backdrop belongs in the tree.
    #[must_use]
    pub fn wants_backdrop(&self) -> bool {
        self.is_modal() && self.show_overlay
    }

    /// Whether page scrolling should be locked while shown.
    #[must_use]
    pub fn wants_scroll_lock(&self) -> bool {
        self.is_modal() && self.prevent_scroll_through
    }

    /// Whether the drag controller may start a gesture.
    #[must_use]
    pub fn can_drag(&self) -> bool {
        self.draggable && !self.is_modal()
    }

    /// Set visibility.
    #[must_use]
    pub const fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set placement mode.
    #[must_use]
    pub const fn mode(mut self, mode: DialogMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set vertical placement.
    #[must_use]
    pub const fn placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Enable or disable dragging.
    #[must_use]
    pub const fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Show or hide the backdrop.
    #[must_use]
    pub const fn show_overlay(mut self, show: bool) -> Self {
        self.show_overlay = show;
        self
    }

    /// Enable or disable the scroll lock.
    #[must_use]
    pub const fn prevent_scroll_through(mut self, prevent: bool) -> Self {
        self.prevent_scroll_through = prevent;
        self
    }

    /// Detach the panel after it exits.
    #[must_use]
    pub const fn destroy_on_close(mut self, destroy: bool) -> Self {
        self.destroy_on_close = destroy;
        self
    }

    /// Set panel width.
    #[must_use]
    pub fn width(mut self, width: impl Into<Dimension>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Set panel height.
    #[must_use]
    pub fn height(mut self, height: impl Into<Dimension>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// Set panel margins.
    #[must_use]
    pub fn offset(mut self, offset: Offset) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set wrapper stacking order.
    #[must_use]
    pub const fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Set attachment point.
    #[must_use]
    pub fn mount_target(mut self, target: impl Into<MountSpec>) -> Self {
        self.mount_target = target.into();
        self
    }

    /// Set header content.
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Set body content.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set footer content.
    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Render the close button.
    #[must_use]
    pub const fn close_btn(mut self, show: bool) -> Self {
        self.close_btn = show;
        self
    }

    /// Called when the panel finished entering.
    #[must_use]
    pub fn on_opened(mut self, f: impl Fn() + 'static) -> Self {
        self.callbacks.on_opened = Some(Rc::new(f));
        self
    }

    /// Called when the panel finished exiting.
    #[must_use]
    pub fn on_closed(mut self, f: impl Fn() + 'static) -> Self {
        self.callbacks.on_closed = Some(Rc::new(f));
        self
    }

    /// Called for any close request without a more specific handler.
    #[must_use]
    pub fn on_close(mut self, f: impl Fn(CloseReason) + 'static) -> Self {
        self.callbacks.on_close = Some(Rc::new(f));
        self
    }

    /// Called when the backdrop is clicked.
    #[must_use]
    pub fn on_click_overlay(mut self, f: impl Fn(CloseReason) + 'static) -> Self {
        self.callbacks.on_click_overlay = Some(Rc::new(f));
        self
    }

    /// Called when the close button is clicked.
    #[must_use]
    pub fn on_click_close_btn(mut self, f: impl Fn(CloseReason) + 'static) -> Self {
        self.callbacks.on_click_close_btn = Some(Rc::new(f));
        self
    }

    /// Called when Escape is pressed inside the dialog.
    #[must_use]
    pub fn on_keydown_esc(mut self, f: impl Fn(CloseReason) + 'static) -> Self {
        self.callbacks.on_keydown_esc = Some(Rc::new(f));
        self
    }
}
