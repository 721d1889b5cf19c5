//! Flyout: floating panels and dialogs for the browser.
//!
//! Re-exports the core vocabulary and the widgets, and provides a
//! [`browser::BrowserHost`] that implements the host capabilities over the
//! DOM when compiled for `wasm32`.
//!
//! # Embedding a dialog
//!
//! ```
//! use flyout::widgets::{Dialog, DialogConfig};
//! use flyout_test::FakeHost;
//!
//! let mut host = FakeHost::new();
//! let mut dialog = Dialog::new();
//! let config = DialogConfig::new().visible(true).header("Delete file?");
//!
//! if let Some(tree) = dialog.render(&config, &mut host).unwrap() {
//!     // attach `tree` under `tree.attachment`, then run effects
//!     assert!(tree.panel.is_some());
//!     dialog.commit(&mut host);
//! }
//! ```

pub use flyout_core::*;
pub use flyout_widgets as widgets;

pub mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHost;
