//! Test harness for Flyout widgets.
//!
//! Provides a recording [`FakeHost`] that stands in for the document, the
//! style writer and the animation driver, plus a [`CallbackProbe`] for
//! counting lifecycle callbacks.
//!
//! ```
//! use flyout_test::{CallbackProbe, FakeHost};
//! use flyout_core::HostEnvironment;
//!
//! let host = FakeHost::new().viewport(800.0, 600.0);
//! assert_eq!(HostEnvironment::viewport(&host).width, 800.0);
//!
//! let probe = CallbackProbe::new();
//! probe.hook("opened")();
//! assert_eq!(probe.count("opened"), 1);
//! ```

mod host;
mod probe;

pub use host::{FakeHost, HostCall, PendingAnimation};
pub use probe::CallbackProbe;
