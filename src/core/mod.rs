//! This module contains the core types used within toarudeco.

/// Basic types used throughout toarudeco.
pub mod types;
