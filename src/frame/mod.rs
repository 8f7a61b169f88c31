//! Geometry of the decoration frame.
//!
//! Everything here is derived from three inputs: the window's
//! [`WindowState`], the user's [`DecorationConfig`], and the host's
//! [`DecorationSettings`]. [`GeometryModel`] borrows all three and computes
//! a [`Geometry`], which the decoration caches until one of its inputs changes.
//!
//! All coordinates are in the decoration's own logical space, with the origin
//! at the top left corner of the outer frame.

mod buttons;

pub use buttons::{ButtonCell, ButtonGroup, ButtonLayout, CellPosition};

use tracing::{instrument, trace};

use crate::config::{BorderSize, DecorationConfig, DecorationSettings, TitleAlignment};
use crate::metrics::*;
use crate::paint::Alignment;
use crate::types::{Edges, Insets, Rect, Size};
use crate::window::WindowState;

/// Everything [`GeometryModel::compute`] derives for one window.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Geometry {
    /// The size of the whole decoration, client area included.
    pub size: Size<i32, crate::types::Logical>,
    /// The visible borders around the client.
    pub borders: Insets,
    /// The invisible margins outside the borders that still resize the window.
    pub resize_borders: Insets,
    /// The title bar.
    pub title_bar: Rect,
    /// Where the caption is drawn.
    pub caption: Rect,
    /// How the caption is aligned in [`caption`](Geometry::caption).
    pub caption_alignment: Alignment,
    /// The title bar buttons.
    pub buttons: ButtonLayout,
}

/// Computes frame geometry for a window.
#[derive(Debug, Clone, Copy)]
pub struct GeometryModel<'a> {
    state: &'a WindowState,
    config: &'a DecorationConfig,
    settings: &'a DecorationSettings,
}

impl<'a> GeometryModel<'a> {
    /// Creates a model of the window in `state`.
    pub fn new(
        state: &'a WindowState,
        config: &'a DecorationConfig,
        settings: &'a DecorationSettings,
    ) -> Self {
        Self { state, config, settings }
    }

    /// Computes the whole geometry at once.
    #[instrument(target = "frame", level = "trace", skip_all)]
    pub fn compute(&self) -> Geometry {
        let borders = self.compute_borders();
        let size = self.decoration_size(&borders);
        let buttons = self.button_layout(&borders);
        let (caption, caption_alignment) = self.caption_rect(&borders, &buttons);

        let geom = Geometry {
            size,
            borders,
            resize_borders: self.compute_resize_borders(),
            title_bar: self.title_bar_rect(&borders),
            caption,
            caption_alignment,
            buttons,
        };
        trace!(target: "frame", "computed {:?}", geom);
        geom
    }

    /// Whether the window is drawn as maximized: maximized in both axes,
    /// with borders switched off for maximized windows.
    pub fn is_maximized(&self) -> bool {
        self.state.is_maximized() && !self.config.draw_border_on_maximized
    }

    fn touches(&self, edge: Edges, maximized: bool) -> bool {
        (maximized || self.state.adjacent_edges.contains(edge)) && !self.config.draw_border_on_maximized
    }

    /// Whether the left border is suppressed by a screen edge.
    pub fn is_left_edge(&self) -> bool {
        self.touches(Edges::LEFT, self.state.maximized_horizontally)
    }

    /// Whether the right border is suppressed by a screen edge.
    pub fn is_right_edge(&self) -> bool {
        self.touches(Edges::RIGHT, self.state.maximized_horizontally)
    }

    /// Whether the top margin is suppressed by a screen edge.
    pub fn is_top_edge(&self) -> bool {
        self.touches(Edges::TOP, self.state.maximized_vertically)
    }

    /// Whether the bottom border is suppressed by a screen edge.
    pub fn is_bottom_edge(&self) -> bool {
        self.touches(Edges::BOTTOM, self.state.maximized_vertically)
    }

    /// Whether the title bar is hidden. Shaded windows always show it.
    pub fn hide_title_bar(&self) -> bool {
        self.config.hide_title_bar && !self.state.shaded
    }

    /// The configured border width, in pixels.
    pub fn border_size(&self) -> i32 {
        match self.config.border_size {
            BorderSize::None | BorderSize::NoSides => 0,
            BorderSize::Tiny => 1,
            other => self.settings.small_spacing * other.multiplier(),
        }
    }

    /// The button size, in pixels.
    pub fn button_height(&self) -> i32 {
        (self.settings.grid_unit as f64 * self.config.button_size.multiplier()) as i32
    }

    /// Computes the visible borders.
    pub fn compute_borders(&self) -> Insets {
        let border = self.border_size();
        let left = if self.is_left_edge() { 0 } else { border };
        let right = if self.is_right_edge() { 0 } else { border };
        let bottom = if self.state.shaded || self.is_bottom_edge() { 0 } else { border };

        let top = if self.hide_title_bar() {
            bottom
        } else {
            let small = self.settings.small_spacing;
            // the extra pixel is for the outline of the active window
            self.settings.font.line_height().max(self.button_height())
                + small * TITLE_BAR_BOTTOM_MARGIN
                + 1
                + small * TITLE_BAR_TOP_MARGIN
        };

        Insets::new(left, top, right, bottom)
    }

    /// Computes the resize-only borders: a large spacing unit on every side
    /// not touching a screen edge.
    pub fn compute_resize_borders(&self) -> Insets {
        let ext = self.settings.large_spacing;
        let side = |edge: bool| if edge { 0 } else { ext };
        Insets::new(
            side(self.is_left_edge()),
            side(self.is_top_edge()),
            side(self.is_right_edge()),
            side(self.is_bottom_edge()),
        )
    }

    /// The height of the caption row.
    pub fn caption_height(&self, borders: &Insets) -> i32 {
        if self.hide_title_bar() {
            borders.top
        } else {
            let margins = TITLE_BAR_BOTTOM_MARGIN + TITLE_BAR_TOP_MARGIN;
            (borders.top - self.settings.small_spacing * margins - 1).max(0)
        }
    }

    /// The size of the whole decoration.
    pub fn decoration_size(&self, borders: &Insets) -> Size<i32, crate::types::Logical> {
        Size::new(
            (self.state.width + borders.horizontal()).max(0),
            (self.state.height + borders.vertical()).max(0),
        )
    }

    /// Computes the title bar rect.
    ///
    /// Maximized windows have a title bar spanning the whole width.
    /// Otherwise it is inset from the sides and the top.
    pub fn title_bar_rect(&self, borders: &Insets) -> Rect {
        if self.is_maximized() {
            return Rect::new(0, 0, self.state.width.max(0), borders.top)
        }

        let side = self.settings.large_spacing * TITLE_BAR_SIDE_MARGIN;
        let top = self.settings.small_spacing * TITLE_BAR_TOP_MARGIN;
        Rect::new(side, top, self.state.width - 2 * side, borders.top - top).clamped()
    }

    /// Computes where the caption is drawn, and how it is aligned there.
    ///
    /// The returned rect never overlaps a button group. For
    /// [`TitleAlignment::CenterFullWidth`], the caption is centered on the
    /// whole decoration if it fits clear of the buttons, and otherwise falls
    /// back to the space between the buttons, aligned away from the side
    /// it would have run into.
    pub fn caption_rect(&self, borders: &Insets, buttons: &ButtonLayout) -> (Rect, Alignment) {
        if self.hide_title_bar() {
            return (Rect::zeroed(), Alignment::CENTER)
        }

        let width = self.decoration_size(borders).width;
        let margin = TITLE_BAR_SIDE_MARGIN * self.settings.small_spacing;
        let left_offset = match buttons.left.rect() {
            Some(r) => r.right() + margin,
            None => margin,
        };
        let right_offset = match buttons.right.rect() {
            Some(r) => width - r.x() + margin,
            None => margin,
        };

        let y = self.settings.small_spacing * TITLE_BAR_TOP_MARGIN;
        let height = self.caption_height(borders);
        let between = Rect::new(left_offset, y, width - left_offset - right_offset, height).clamped();

        match self.config.title_alignment {
            TitleAlignment::Left => (between, Alignment::VCENTER | Alignment::LEFT),
            TitleAlignment::Right => (between, Alignment::VCENTER | Alignment::RIGHT),
            TitleAlignment::Center => (between, Alignment::CENTER),
            TitleAlignment::CenterFullWidth => {
                let text_width = self.settings.font.text_width(&self.state.caption);
                let bounding = Rect::new((width - text_width) / 2, y, text_width, height);

                if bounding.x() < left_offset {
                    (between, Alignment::VCENTER | Alignment::LEFT)
                } else if bounding.right() > width - right_offset {
                    (between, Alignment::VCENTER | Alignment::RIGHT)
                } else {
                    (bounding, Alignment::CENTER)
                }
            }
        }
    }
}
