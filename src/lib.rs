//! Window decorations for a compositing window manager.
//!
//! toarudeco draws the frame around a window: the title bar with its
//! caption and buttons, the borders, and the drop shadow behind it all.
//! It does not talk to a display server. The host feeds each
//! [`Decoration`] the state of its window, paints it through a
//! [`Painter`](paint::Painter), and carries out the
//! [`HostRequest`](decoration::HostRequest)s it queues.
//!
//! ```no_run
//! use toarudeco::config::{DecorationConfig, DecorationSettings};
//! use toarudeco::window::{Capabilities, WindowEvent, WindowState};
//! use toarudeco::DecorationManager;
//!
//! let manager = DecorationManager::new(DecorationConfig::default(), DecorationSettings::default());
//! let mut deco = manager.create_decoration(WindowState::new(640, "xterm", Capabilities::all()));
//!
//! deco.on_window_state_changed(WindowEvent::ActiveChanged(true));
//! for request in deco.drain_requests() {
//!     println!("{:?}", request);
//! }
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate bitflags;

pub mod core;
pub mod config;
pub mod window;
pub mod theme;
pub mod animation;
pub mod metrics;
pub mod shadow;
pub mod frame;
pub mod paint;
pub mod button;
pub mod decoration;
pub mod manager;

pub use crate::core::types;
pub use crate::core::types::{DecoError, Result};
pub use crate::decoration::{Decoration, DecorationElement, HostRequest};
pub use crate::manager::DecorationManager;
