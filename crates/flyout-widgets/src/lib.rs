//! Widgets for the Flyout floating-panel engine.
//!
//! - [`dialog`]: modal and free-floating dialogs
//! - [`anchor`]: anchor navigation items and their registry
//! - [`table_footer`]: table footer row

pub mod anchor;
pub mod dialog;
mod error;
pub mod table_footer;

pub use anchor::{
    Anchor, AnchorClick, AnchorClickHandler, AnchorItem, AnchorItemView, AnchorRegistry,
    AnchorTitle,
};
pub use dialog::{
    CloseReason, Dialog, DialogCallbacks, DialogConfig, DialogMode, DialogTree, MountSpec,
    MountTarget, Placement, ScrollLock,
};
pub use error::{DialogError, Result};
pub use table_footer::{FooterCell, FooterView, TableFooter, DEFAULT_COLSPAN};
