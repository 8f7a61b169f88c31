//! Painting of the frame, title bar, caption and buttons.
//!
//! The background is painted first, then the title bar on top of it, then
//! the caption and the buttons. Without a compositor, translucent pixels
//! cannot be shown, so the frame is square with a hard outline around it.

use tracing::{instrument, trace};

use crate::config::BorderSize;
use crate::frame::GeometryModel;
use crate::metrics::FRAME_RADIUS;
use crate::paint::{ClipOp, Painter, Pen, Style};
use crate::types::{PointF, Rect, RectF};
use crate::window::WindowState;

use super::{Decoration, DecorationElement};

/// The offset that centers a one pixel line on a pixel row.
const HAIRLINE: f32 = 0.5;

/// The side of the square the title bar corner arcs are drawn in.
const CORNER_ARC: f32 = 7.0;

// What paint needs to know about the frame, gathered up front.
struct Frame {
    rect: Rect,
    border_top: i32,
    shaded: bool,
    maximized: bool,
    hide_title_bar: bool,
    alpha: bool,
    has_borders: bool,
    no_borders: bool,
    no_side_borders: bool,
}

impl Frame {
    fn new(deco: &Decoration, state: &WindowState) -> Self {
        let geom = deco.geometry.borrow();
        let model = GeometryModel::new(state, &deco.config, &deco.settings);
        let border = deco.config.border_size;

        Self {
            rect: Rect::from_size(geom.size),
            border_top: geom.borders.top,
            shaded: state.shaded,
            maximized: model.is_maximized(),
            hide_title_bar: model.hide_title_bar(),
            alpha: deco.settings.alpha_channel_supported,
            has_borders: border > BorderSize::NoSides,
            no_borders: border == BorderSize::None,
            no_side_borders: border == BorderSize::NoSides,
        }
    }

    // everything below the title bar
    fn below_title_bar(&self) -> RectF {
        Rect::new(0, self.border_top, self.rect.width(), self.rect.height() - self.border_top).to_f32()
    }

    fn title_rect(&self) -> Rect {
        Rect::new(0, 0, self.rect.width(), self.border_top)
    }
}

#[instrument(target = "paint", level = "trace", skip_all, fields(?repaint))]
pub(super) fn paint(deco: &Decoration, painter: &mut dyn Painter, repaint: Rect) {
    let Some(state) = deco.state.as_ref() else {
        trace!(target: "paint", "window released, clearing");
        let size = deco.geometry.borrow().size;
        painter.clear_rect(Rect::from_size(size).to_f32());
        return
    };
    let frame = Frame::new(deco, state);

    if !frame.shaded {
        paint_background(deco, painter, &frame);
    }

    if !frame.hide_title_bar {
        paint_title_bar(deco, painter, &frame, state, repaint);
    }

    if frame.has_borders && !frame.alpha {
        let outline = Style::stroke(Pen::new(deco.outline_color(), 1.0)).aliased();
        let rect = frame.rect.adjusted(0, 0, -1, -1).to_f32().translated(HAIRLINE, HAIRLINE);
        painter.draw_rect(rect, &outline);
    }
}

fn paint_background(deco: &Decoration, painter: &mut dyn Painter, frame: &Frame) {
    painter.clear_rect(frame.rect.to_f32());
    painter.save();

    let title_bar = Style::fill(deco.title_bar_color());
    if !frame.alpha {
        if !frame.hide_title_bar {
            painter.set_clip_rect(frame.below_title_bar(), ClipOp::Intersect);
        }
        painter.draw_rect(frame.rect.to_f32(), &title_bar);
    } else {
        let mut inner = frame.rect;
        if !frame.no_borders {
            if !frame.hide_title_bar {
                painter.set_clip_rect(frame.below_title_bar(), ClipOp::Intersect);
            }
            painter.draw_rect(inner.to_f32(), &Style::fill(deco.outline_color()).aliased());
            inner = inner.adjusted(1, 1, -1, -1);
        }
        if !frame.hide_title_bar {
            painter.set_clip_rect(frame.below_title_bar(), ClipOp::Intersect);
        }
        painter.draw_rect(inner.to_f32(), &title_bar);
    }

    painter.restore();
}

fn paint_title_bar(
    deco: &Decoration,
    painter: &mut dyn Painter,
    frame: &Frame,
    state: &WindowState,
    repaint: Rect,
) {
    let title_rect = frame.title_rect();
    if !title_rect.intersects(&repaint) {
        trace!(target: "paint", "title bar outside {:?}", repaint);
        return
    }
    let no_borders = frame.no_side_borders || frame.no_borders;
    let radius = FRAME_RADIUS as i32;
    let title_bar = Style::fill(deco.title_bar_color());
    let outline = Style::fill(deco.outline_color());

    painter.save();
    if frame.maximized {
        painter.draw_rect(title_rect.to_f32(), &title_bar);
        paint_shading(deco, painter, title_rect, false);
    } else if !frame.alpha {
        painter.set_clip_rect(title_rect.to_f32(), ClipOp::Replace);
        let overlap = if frame.shaded { 0 } else { 1 };
        painter.draw_rect(title_rect.adjusted(0, 0, 0, overlap).to_f32(), &title_bar);
        let shading = if no_borders { title_rect } else { title_rect.adjusted(1, 1, -1, 0) };
        paint_shading(deco, painter, shading, false);
    } else if frame.shaded {
        let mut inner = title_rect;
        if !no_borders {
            painter.draw_rounded_rect(title_rect.to_f32(), FRAME_RADIUS, &outline);
            inner = title_rect.adjusted(1, 1, -1, -1);
        }
        painter.draw_rounded_rect(inner.to_f32(), FRAME_RADIUS, &title_bar);
        smoothen_corners(deco, painter, inner, true);
        paint_shading(deco, painter, inner, true);
    } else {
        // the bottom corners are pushed below the title bar and clipped off
        let mut inner = if no_borders {
            title_rect.adjusted(0, 0, 0, radius)
        } else {
            title_rect.adjusted(1, 1, -1, radius - 1)
        };
        if !no_borders {
            painter.set_clip_rect(title_rect.to_f32(), ClipOp::Intersect);
            painter.draw_rounded_rect(title_rect.adjusted(0, 0, 0, radius).to_f32(), FRAME_RADIUS + 1.0, &outline);
            inner = title_rect.adjusted(1, 1, -1, radius);
        }
        painter.set_clip_rect(title_rect.to_f32(), ClipOp::Intersect);
        painter.draw_rounded_rect(inner.to_f32(), FRAME_RADIUS, &title_bar);
        smoothen_corners(deco, painter, inner, false);
        paint_shading(deco, painter, inner, true);
    }
    painter.restore();

    let (caption, alignment) = {
        let geom = deco.geometry.borrow();
        (geom.caption, geom.caption_alignment)
    };
    let text = deco.settings.font.elide_middle(&state.caption, caption.width());
    if !text.is_empty() {
        painter.draw_text(caption.to_f32(), alignment, &text, deco.font_color());
    }

    for button in deco.buttons.borrow().iter() {
        button.paint(painter, repaint);
    }
}

// The highlight line along the top edge of the title bar.
fn paint_shading(deco: &Decoration, painter: &mut dyn Painter, rect: Rect, rounded: bool) {
    let pen = Pen::new(deco.highlight_color(), 1.0);

    if rounded {
        let rect = rect.adjusted(-1, 0, 0, 0);
        painter.set_clip_rect(rect.adjusted(0, 0, 0, 2 - rect.height()).to_f32(), ClipOp::Intersect);
        let outline = rect.to_f32().translated(HAIRLINE, HAIRLINE);
        painter.draw_rounded_rect(outline, FRAME_RADIUS, &Style::stroke(pen).aliased());
    } else {
        let y = rect.y() as f32 + HAIRLINE;
        let from = PointF::new(rect.x() as f32, y);
        let to = PointF::new(rect.right() as f32, y);
        painter.draw_line(from, to, pen, false);
    }
}

// Covers the antialiasing fringe left on the title bar's rounded corners.
fn smoothen_corners(deco: &Decoration, painter: &mut dyn Painter, rect: Rect, bottom: bool) {
    let pen = Pen::new(deco.title_bar_color(), 1.5);
    painter.set_clip_rect(rect.to_f32(), ClipOp::Replace);

    let rect = rect.to_f32();
    let arc = RectF::new(rect.x(), rect.y(), CORNER_ARC, CORNER_ARC);
    let dx = rect.width() - CORNER_ARC;
    let dy = rect.height() - CORNER_ARC;

    painter.draw_arc(arc, 90.0, 90.0, pen, false);
    painter.draw_arc(arc.translated(dx, 0.0), 0.0, 90.0, pen, false);
    if bottom {
        painter.draw_arc(arc.translated(0.0, dy), 180.0, 90.0, pen, false);
        painter.draw_arc(arc.translated(dx, dy), 270.0, 90.0, pen, false);
    }
}
