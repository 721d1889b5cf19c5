//! Core types and host capabilities for the Flyout floating-panel engine.
//!
//! This crate provides the vocabulary shared by widgets and embedders:
//! - Geometric primitives: [`Point`], [`Size`]
//! - Events and their routing: [`Event`], [`RoutedEvent`], [`NodeId`]
//! - Injected capabilities: [`HostEnvironment`], [`StyleSink`],
//!   [`TransitionDriver`], bundled as [`Host`]
//! - A frame-ticked transition driver: [`FrameDriver`]

pub mod animation;
mod event;
mod geometry;
pub mod host;
mod node;
pub mod transition;

pub use animation::{EasedValue, Easing, FrameDriver};
pub use event::{Event, Key, MouseButton, PointerId, PointerType, RoutedEvent};
pub use geometry::{Point, Size};
pub use host::{
    Cursor, Display, Host, HostEnvironment, ListenerId, PanelMetrics, PanelPosition, StyleSink,
};
pub use node::NodeId;
pub use transition::{AnimatedElement, TransitionDriver, TransitionState, TransitionTicket};
