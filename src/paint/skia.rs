use tiny_skia::{
    BlendMode, FillRule, LineJoin, Mask, Paint, PathBuilder, Pixmap, Rect as SkRect, Stroke,
    Transform,
};
use tracing::{trace, warn};

use crate::types::{Color, RectF};

use super::{arc_to_cubics, Alignment, ClipOp, LineCap, Painter, Path, PathCmd, Style};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Clip {
    Unclipped,
    /// A rect in device coordinates.
    Rect(SkRect),
    /// Nothing is drawn.
    Empty,
}

#[derive(Debug, Clone, Copy)]
struct State {
    transform: Transform,
    clip: Clip,
}

/// A [`Painter`] drawing onto a `tiny-skia` [`Pixmap`].
///
/// Text is not rasterized. Clips are always rectangles, since that is all
/// decorations ever clip to.
pub struct SkiaPainter<'p> {
    pixmap: &'p mut Pixmap,
    state: State,
    stack: Vec<State>,
    mask: Option<Mask>,
}

impl<'p> SkiaPainter<'p> {
    /// Creates a painter drawing onto `pixmap`, scaled by `scale`.
    pub fn new(pixmap: &'p mut Pixmap, scale: f32) -> Self {
        Self {
            pixmap,
            state: State {
                transform: Transform::from_scale(scale, scale),
                clip: Clip::Unclipped,
            },
            stack: Vec::new(),
            mask: None,
        }
    }

    fn update_mask(&mut self) {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        self.mask = match self.state.clip {
            Clip::Unclipped => None,
            Clip::Empty => Mask::new(width, height),
            Clip::Rect(rect) => Mask::new(width, height).map(|mut mask| {
                let path = PathBuilder::from_rect(rect);
                mask.fill_path(&path, FillRule::Winding, false, Transform::identity());
                mask
            }),
        };
    }

    fn build_path(path: &Path) -> Option<tiny_skia::Path> {
        let mut pb = PathBuilder::new();
        let mut started = false;
        for cmd in path.commands() {
            match *cmd {
                PathCmd::MoveTo(p) => {
                    pb.move_to(p.x, p.y);
                    started = true;
                }
                PathCmd::LineTo(p) => pb.line_to(p.x, p.y),
                PathCmd::CubicTo(c1, c2, to) => pb.cubic_to(c1.x, c1.y, c2.x, c2.y, to.x, to.y),
                PathCmd::ArcTo { rect, start, sweep } => {
                    let (first, segments) = arc_to_cubics(rect, start, sweep);
                    if started {
                        pb.line_to(first.x, first.y);
                    } else {
                        pb.move_to(first.x, first.y);
                        started = true;
                    }
                    for (c1, c2, to) in segments {
                        pb.cubic_to(c1.x, c1.y, c2.x, c2.y, to.x, to.y);
                    }
                }
                PathCmd::Close => pb.close(),
            }
        }
        pb.finish()
    }
}

fn paint_for(color: Color, antialias: bool) -> Paint<'static> {
    let (r, g, b, a) = color.rgba();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = antialias;
    paint
}

impl Painter for SkiaPainter<'_> {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => {
                let clip_changed = state.clip != self.state.clip;
                self.state = state;
                if clip_changed {
                    self.update_mask();
                }
            }
            None => warn!(target: "paint", "unbalanced restore"),
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.state.transform = self.state.transform.pre_translate(dx, dy);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.state.transform = self.state.transform.pre_scale(sx, sy);
    }

    fn set_clip_rect(&mut self, rect: RectF, op: ClipOp) {
        let device = SkRect::from_xywh(rect.x(), rect.y(), rect.width(), rect.height())
            .and_then(|r| r.transform(self.state.transform));

        let clipped = match (op, self.state.clip) {
            (ClipOp::Intersect, Clip::Empty) => None,
            (ClipOp::Intersect, Clip::Rect(current)) => device.and_then(|r| r.intersect(&current)),
            _ => device,
        };
        self.state.clip = clipped.map(Clip::Rect).unwrap_or(Clip::Empty);
        self.update_mask();
    }

    fn clear_rect(&mut self, rect: RectF) {
        let Some(r) = SkRect::from_xywh(rect.x(), rect.y(), rect.width(), rect.height()) else {
            return
        };
        let mut paint = paint_for(Color::TRANSPARENT, false);
        paint.blend_mode = BlendMode::Clear;
        self.pixmap.fill_rect(r, &paint, self.state.transform, self.mask.as_ref());
    }

    fn draw_path(&mut self, path: &Path, style: &Style) {
        let Some(skpath) = Self::build_path(path) else {
            trace!(target: "paint", "skipping degenerate path");
            return
        };
        let transform = self.state.transform;

        if let Some(fill) = style.fill {
            let paint = paint_for(fill, style.antialias);
            self.pixmap
                .fill_path(&skpath, &paint, FillRule::Winding, transform, self.mask.as_ref());
        }
        if let Some(pen) = style.stroke {
            let paint = paint_for(pen.color, style.antialias);
            let stroke = Stroke {
                width: pen.width,
                line_cap: match pen.cap {
                    LineCap::Flat => tiny_skia::LineCap::Butt,
                    LineCap::Round => tiny_skia::LineCap::Round,
                    LineCap::Square => tiny_skia::LineCap::Square,
                },
                line_join: LineJoin::Miter,
                ..Default::default()
            };
            self.pixmap
                .stroke_path(&skpath, &paint, &stroke, transform, self.mask.as_ref());
        }
    }

    fn draw_text(&mut self, rect: RectF, align: Alignment, text: &str, _color: Color) {
        trace!(target: "paint", "not rasterizing text {:?} at {:?} ({:?})", text, rect, align);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Pen;
    use crate::types::PointF;

    fn alpha_at(pixmap: &Pixmap, x: u32, y: u32) -> u8 {
        pixmap.pixel(x, y).map(|p| p.alpha()).unwrap_or(0)
    }

    #[test]
    fn test_clip_limits_fill() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        {
            let mut painter = SkiaPainter::new(&mut pixmap, 1.0);
            painter.set_clip_rect(RectF::new(0.0, 0.0, 10.0, 20.0), ClipOp::Replace);
            painter.draw_rect(RectF::new(0.0, 0.0, 20.0, 20.0), &Style::fill(Color::BLACK).aliased());
        }
        assert_eq!(alpha_at(&pixmap, 5, 5), 255);
        assert_eq!(alpha_at(&pixmap, 15, 5), 0);
    }

    #[test]
    fn test_restore_drops_clip_and_transform() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        {
            let mut painter = SkiaPainter::new(&mut pixmap, 1.0);
            painter.save();
            painter.translate(10.0, 10.0);
            painter.set_clip_rect(RectF::new(0.0, 0.0, 2.0, 2.0), ClipOp::Intersect);
            painter.restore();
            painter.draw_rect(RectF::new(0.0, 0.0, 4.0, 4.0), &Style::fill(Color::BLACK).aliased());
        }
        assert_eq!(alpha_at(&pixmap, 1, 1), 255);
        assert_eq!(alpha_at(&pixmap, 11, 11), 0);
    }

    #[test]
    fn test_clear_and_scale() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        pixmap.fill(tiny_skia::Color::BLACK);
        {
            let mut painter = SkiaPainter::new(&mut pixmap, 2.0);
            painter.clear_rect(RectF::new(0.0, 0.0, 5.0, 5.0));
            painter.draw_line(
                PointF::new(0.0, 7.5),
                PointF::new(10.0, 7.5),
                Pen::new(Color::WHITE, 1.0),
                false,
            );
        }
        assert_eq!(alpha_at(&pixmap, 9, 9), 0);
        assert_eq!(alpha_at(&pixmap, 11, 11), 255);
        assert_eq!(pixmap.pixel(10, 15).map(|p| p.red()), Some(255));
    }
}
