//! Fixed metrics shared by the frame, its buttons and the shadow.
//!
//! Margins are expressed in multiples of the host's spacing units, see
//! [`DecorationSettings`](crate::config::DecorationSettings).

/// The corner radius of the frame, in pixels.
pub const FRAME_RADIUS: f32 = 3.0;

/// Horizontal padding around button groups, in small spacing units.
/// Also the title bar side inset, in large spacing units.
pub const TITLE_BAR_SIDE_MARGIN: i32 = 4;
/// Padding above the caption, in small spacing units.
pub const TITLE_BAR_TOP_MARGIN: i32 = 3;
/// Padding below the caption, in small spacing units.
pub const TITLE_BAR_BOTTOM_MARGIN: i32 = 3;
/// Space between buttons, in small spacing units.
pub const TITLE_BAR_BUTTON_SPACING: i32 = 4;

/// How far the frame overlaps its shadow's cut-out, in pixels.
pub const SHADOW_OVERLAP: i32 = 3;

/// The base stroke width of button glyphs.
pub const SYMBOL_PEN_WIDTH: f32 = 1.01;
