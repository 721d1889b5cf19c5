//! Browser host for Flyout widgets.
//!
//! [`BrowserHost`] implements every host capability over `web-sys` and runs
//! transitions on a [`flyout_core::FrameDriver`]. The DOM value mappings in
//! [`events`] are plain functions so they are tested natively.

// Cross-platform modules
mod error;
pub mod events;

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod host;

pub use error::BrowserError;
pub use events::{key_from_dom, mouse_button_from_dom, pointer_type_from_dom};
#[cfg(target_arch = "wasm32")]
pub use host::BrowserHost;
