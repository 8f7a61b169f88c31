//! Snapshots of the decorated window, as supplied by the host.
//!
//! The decoration never queries the window directly. Instead, the host hands it a
//! [`WindowState`] when the decoration is created, and keeps it up to date by sending
//! [`WindowEvent`]s as the window changes.

use strum::{Display, EnumIter, EnumString};

use crate::types::Edges;

bitflags! {
    /// The operations a window supports, which decide which buttons are shown.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        /// The window can be closed.
        const CLOSEABLE     = 1 << 0;
        /// The window can be maximized.
        const MAXIMIZEABLE  = 1 << 1;
        /// The window can be minimized.
        const MINIMIZEABLE  = 1 << 2;
        /// The window can be shaded.
        const SHADEABLE     = 1 << 3;
        /// The window provides context help.
        const PROVIDES_HELP = 1 << 4;
    }
}

/// The kinds of buttons that can appear in a title bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ButtonKind {
    /// The window menu, drawn as the client's icon.
    Menu,
    /// The application menu.
    ApplicationMenu,
    /// Toggles whether the window is shown on all desktops.
    OnAllDesktops,
    /// Minimizes the window.
    Minimize,
    /// Toggles maximization of the window.
    Maximize,
    /// Closes the window.
    Close,
    /// Enters context help mode.
    ContextHelp,
    /// Toggles shading of the window.
    Shade,
    /// Keeps the window below others.
    KeepBelow,
    /// Keeps the window above others.
    KeepAbove,
}

impl ButtonKind {
    /// The capability a window must have for this button to be shown,
    /// if any.
    pub fn required_capability(&self) -> Option<Capabilities> {
        use ButtonKind::*;
        match self {
            Close => Some(Capabilities::CLOSEABLE),
            Maximize => Some(Capabilities::MAXIMIZEABLE),
            Minimize => Some(Capabilities::MINIMIZEABLE),
            Shade => Some(Capabilities::SHADEABLE),
            ContextHelp => Some(Capabilities::PROVIDES_HELP),
            _ => None,
        }
    }

    /// Whether this button is shown for a window with `caps`.
    pub fn is_available(&self, caps: Capabilities) -> bool {
        self.required_capability()
            .map(|req| caps.contains(req))
            .unwrap_or(true)
    }
}

/// A snapshot of the decorated window's state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WindowState {
    /// Whether the window has focus.
    pub active: bool,
    /// Whether the window is maximized horizontally.
    pub maximized_horizontally: bool,
    /// Whether the window is maximized vertically.
    pub maximized_vertically: bool,
    /// Whether the window is shaded (rolled up into its title bar).
    pub shaded: bool,
    /// The screen edges the window touches.
    pub adjacent_edges: Edges,
    /// The width of the window's content, in logical pixels.
    pub width: i32,
    /// The height of the window's content, in logical pixels.
    pub height: i32,
    /// The window title.
    pub caption: String,
    /// The operations the window supports.
    pub capabilities: Capabilities,
}

impl WindowState {
    /// Creates a new `WindowState` for an inactive window of `width` supporting `caps`.
    pub fn new<S: Into<String>>(width: i32, caption: S, caps: Capabilities) -> Self {
        Self {
            width,
            caption: caption.into(),
            capabilities: caps,
            ..Default::default()
        }
    }

    /// The same state with the content height set to `height`.
    pub fn with_height(mut self, height: i32) -> Self {
        self.height = height;
        self
    }

    /// Whether the window is maximized in both directions.
    pub fn is_maximized(&self) -> bool {
        self.maximized_horizontally && self.maximized_vertically
    }
}

/// A change to the decorated window, sent by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    /// The window gained or lost focus.
    ActiveChanged(bool),
    /// The window's content width changed.
    WidthChanged(i32),
    /// The window's content height changed.
    HeightChanged(i32),
    /// The window's maximization changed.
    MaximizedChanged {
        /// Maximized horizontally.
        horizontal: bool,
        /// Maximized vertically.
        vertical: bool,
    },
    /// The window was shaded or unshaded.
    ShadedChanged(bool),
    /// The set of screen edges the window touches changed.
    AdjacentEdgesChanged(Edges),
    /// The window title changed.
    CaptionChanged(String),
    /// The operations the window supports changed.
    CapabilitiesChanged(Capabilities),
    /// The window is being torn down; no further snapshot is available.
    Released,
}
