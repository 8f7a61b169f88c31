//! Layout of the title bar buttons.
//!
//! Buttons are laid out in two groups, one against each side of the title
//! bar, in the order the host's settings give. Each button gets a square
//! cell of the configured button size. On a side touching a screen edge,
//! the outermost cell grows to swallow the side padding, so the button can
//! be hit by throwing the pointer against the edge.

use crate::metrics::{TITLE_BAR_BUTTON_SPACING, TITLE_BAR_SIDE_MARGIN, TITLE_BAR_TOP_MARGIN};
use crate::types::{Insets, Logical, Point, PointF, Rect};
use crate::window::ButtonKind;

use super::GeometryModel;

/// Where a cell sits within its group, if it is widened to an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellPosition {
    /// An ordinary cell.
    #[default]
    Normal,
    /// The first cell of the left group, widened to the left screen edge.
    FirstInList,
    /// The last cell of the right group, widened to the right screen edge.
    LastInList,
}

/// The cell of a single button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonCell {
    /// The kind of button.
    pub kind: ButtonKind,
    /// The clickable area.
    pub rect: Rect,
    /// Where the glyph starts within [`rect`](ButtonCell::rect).
    pub offset: Point<i32, Logical>,
    /// The side of the square the glyph is drawn in.
    pub icon_size: i32,
    /// Whether the cell was widened to an edge.
    pub position: CellPosition,
}

impl ButtonCell {
    /// The square the glyph is drawn in.
    pub fn icon_rect(&self) -> Rect {
        let x = match self.position {
            CellPosition::FirstInList => self.rect.x() + self.offset.x,
            _ => self.rect.x(),
        };
        Rect::new(x, self.rect.y() + self.offset.y, self.icon_size, self.icon_size)
    }
}

/// A row of buttons on one side of the title bar.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ButtonGroup {
    /// The cells, from left to right.
    pub cells: Vec<ButtonCell>,
}

impl ButtonGroup {
    /// The area covered by the group, or `None` if it has no buttons.
    pub fn rect(&self) -> Option<Rect> {
        self.cells.iter().map(|c| c.rect).reduce(|acc, r| acc.united(&r))
    }

    /// Whether the group has no buttons.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Both button groups of a title bar.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ButtonLayout {
    /// The group against the left side.
    pub left: ButtonGroup,
    /// The group against the right side.
    pub right: ButtonGroup,
}

impl ButtonLayout {
    /// Every cell, left group first.
    pub fn iter(&self) -> impl Iterator<Item = &ButtonCell> {
        self.left.cells.iter().chain(self.right.cells.iter())
    }

    /// The cell of the first button of `kind`.
    pub fn find(&self, kind: ButtonKind) -> Option<&ButtonCell> {
        self.iter().find(|c| c.kind == kind)
    }

    /// The cell containing `point`.
    pub fn cell_at(&self, point: PointF) -> Option<&ButtonCell> {
        self.iter().find(|c| c.rect.to_f32().contains_point(point))
    }

    /// The number of laid out buttons.
    pub fn len(&self) -> usize {
        self.left.cells.len() + self.right.cells.len()
    }

    /// Whether no button is laid out.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GeometryModel<'_> {
    /// Lays out the buttons the window's capabilities allow.
    pub fn button_layout(&self, borders: &Insets) -> ButtonLayout {
        let caps = self.state.capabilities;
        let visible = |kinds: &[ButtonKind]| -> Vec<ButtonKind> {
            kinds.iter().copied().filter(|k| k.is_available(caps)).collect()
        };
        let left = visible(&self.settings.buttons_left);
        let right = visible(&self.settings.buttons_right);

        let small = self.settings.small_spacing;
        let top_margin = if self.is_top_edge() { small * TITLE_BAR_TOP_MARGIN } else { 0 };
        let caption_height = self.caption_height(borders);
        let icon_size = self.button_height();

        let cell_height = caption_height + top_margin;
        let v_offset = top_margin + (caption_height - icon_size) / 2;
        let v_padding = if self.is_top_edge() { 0 } else { small * TITLE_BAR_TOP_MARGIN };
        let h_padding = small * TITLE_BAR_SIDE_MARGIN;
        let spacing = small * TITLE_BAR_BUTTON_SPACING;

        let cell = |kind: ButtonKind| ButtonCell {
            kind,
            rect: Rect::new(0, 0, icon_size, cell_height),
            offset: Point::new(0, v_offset),
            icon_size,
            position: CellPosition::Normal,
        };
        let mut left: Vec<ButtonCell> = left.into_iter().map(cell).collect();
        let mut right: Vec<ButtonCell> = right.into_iter().map(cell).collect();

        if self.is_left_edge() {
            if let Some(first) = left.first_mut() {
                first.rect.size.width += h_padding;
                first.offset.x = h_padding;
                first.position = CellPosition::FirstInList;
            }
        }
        if self.is_right_edge() {
            if let Some(last) = right.last_mut() {
                last.rect.size.width += h_padding;
                last.position = CellPosition::LastInList;
            }
        }

        let width = self.decoration_size(borders).width;

        let left_x = if self.is_left_edge() { 0 } else { h_padding + borders.left };
        place(&mut left, left_x, v_padding, spacing);

        let right_width = group_width(&right, spacing);
        let right_x = if self.is_right_edge() {
            width - right_width
        } else {
            width - right_width - h_padding - borders.right
        };
        place(&mut right, right_x, v_padding, spacing);

        ButtonLayout {
            left: ButtonGroup { cells: left },
            right: ButtonGroup { cells: right },
        }
    }
}

fn group_width(cells: &[ButtonCell], spacing: i32) -> i32 {
    let widths: i32 = cells.iter().map(|c| c.rect.width()).sum();
    widths + spacing * (cells.len() as i32 - 1).max(0)
}

fn place(cells: &mut [ButtonCell], x: i32, y: i32, spacing: i32) {
    let mut x = x;
    for cell in cells {
        cell.rect.point = Point::new(x, y);
        x += cell.rect.width() + spacing;
    }
}
