//! Types and helpers for configuring decorations.
//!
//! Configuration comes in two parts: [`DecorationConfig`], the user's
//! choices for this decoration theme, and [`DecorationSettings`], the values
//! the host compositor decides for every decoration it draws.

mod config;
mod section;
mod settings;

#[doc(inline)]
pub use config::*;
#[doc(inline)]
pub use section::ConfigSection;
#[doc(inline)]
pub use settings::{DecorationSettings, FixedFontMetrics, FontMetrics};
