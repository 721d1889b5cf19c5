//! Floating panel dialog.
//!
//! The [`Dialog`] controller composes four parts:
//! - [`MountSpec`] resolution of where the subtree attaches
//! - a shared, reference-counted [`ScrollLock`] for modal dialogs
//! - a [`DragController`] for free-floating panels
//! - one [`ElementTransition`] each for the panel and its backdrop
//!
//! ```
//! use flyout_widgets::dialog::{Dialog, DialogConfig, DialogMode};
//! use flyout_test::FakeHost;
//!
//! let mut host = FakeHost::new();
//! let mut dialog = Dialog::new();
//! let config = DialogConfig::new()
//!     .visible(true)
//!     .mode(DialogMode::NotModal)
//!     .draggable(true);
//!
//! let tree = dialog.render(&config, &mut host).unwrap().unwrap();
//! dialog.commit(&mut host);
//! assert!(tree.backdrop.is_none());
//!
//! for anim in host.take_animations() {
//!     dialog.transition_end(anim.ticket, &mut host);
//! }
//! ```

mod config;
mod controller;
mod drag;
mod mount;
mod scroll_lock;
mod transition;

pub use config::{
    Callback, CloseCallback, CloseReason, Dimension, DialogCallbacks, DialogConfig, DialogMode,
    Offset, Placement, DEFAULT_Z_INDEX,
};
pub use controller::{BackdropView, Dialog, DialogTree, PanelStyle, PanelView, WrapperView};
pub use drag::{clamp_anchor, DragController, DragSession};
pub use mount::{MountSource, MountSpec, MountTarget, DEFAULT_MOUNT_SELECTOR};
pub use scroll_lock::{ScrollLock, ScrollLockToken};
pub use transition::{
    ElementTransition, InvalidStateTransition, BACKDROP_TRANSITION, PANEL_TRANSITION,
};
