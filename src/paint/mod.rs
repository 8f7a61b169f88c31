//! The painter adapter decorations draw through.
//!
//! toarudeco does not rasterize anything itself. Decorations and buttons
//! describe what they draw as [`Path`]s and text runs, and hand them to a
//! [`Painter`] supplied by the host. [`SkiaPainter`] is a `tiny-skia`
//! implementation used by the preview binary.

mod skia;

#[cfg(test)]
pub(crate) mod testing;

pub use skia::SkiaPainter;

use crate::types::{Color, PointF, RectF};

bitflags! {
    /// How text is aligned within its rectangle.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Alignment: u8 {
        /// Against the left edge.
        const LEFT    = 1 << 0;
        /// Against the right edge.
        const RIGHT   = 1 << 1;
        /// Centered horizontally.
        const HCENTER = 1 << 2;
        /// Against the top edge.
        const TOP     = 1 << 3;
        /// Against the bottom edge.
        const BOTTOM  = 1 << 4;
        /// Centered vertically.
        const VCENTER = 1 << 5;
        /// Centered both ways.
        const CENTER  = Self::HCENTER.bits() | Self::VCENTER.bits();
    }
}

/// How a new clip rect combines with the current clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClipOp {
    /// Discard the current clip.
    Replace,
    /// Keep only the area inside both.
    #[default]
    Intersect,
}

/// The shape of the ends of stroked lines.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineCap {
    #[default]
    Flat,
    Round,
    Square,
}

/// How a stroke is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    /// The stroke color.
    pub color: Color,
    /// The stroke width, in the current coordinate space.
    pub width: f32,
    /// The shape of line ends.
    pub cap: LineCap,
}

impl Pen {
    /// A flat-capped pen.
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width, cap: LineCap::Flat }
    }

    /// The same pen with round caps.
    #[must_use]
    pub fn round(mut self) -> Self {
        self.cap = LineCap::Round;
        self
    }
}

/// How a path is filled and stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// The fill color, if filled.
    pub fill: Option<Color>,
    /// The stroke, if stroked.
    pub stroke: Option<Pen>,
    /// Whether edges are anti-aliased.
    pub antialias: bool,
}

impl Style {
    /// A solid, anti-aliased fill.
    pub fn fill(color: Color) -> Self {
        Self { fill: Some(color), stroke: None, antialias: true }
    }

    /// An anti-aliased stroke.
    pub fn stroke(pen: Pen) -> Self {
        Self { fill: None, stroke: Some(pen), antialias: true }
    }

    /// The same style with anti-aliasing switched off.
    #[must_use]
    pub fn aliased(mut self) -> Self {
        self.antialias = false;
        self
    }

    /// The same style with a stroke added.
    #[must_use]
    pub fn with_stroke(mut self, pen: Pen) -> Self {
        self.stroke = Some(pen);
        self
    }
}

/// A single element of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    /// Starts a new subpath.
    MoveTo(PointF),
    /// A straight line from the current point.
    LineTo(PointF),
    /// A cubic Bézier curve from the current point.
    CubicTo(PointF, PointF, PointF),
    /// An elliptical arc.
    ///
    /// The ellipse is inscribed in `rect`. Angles are in degrees, counter-clockwise
    /// from the 3 o'clock position. If the path is not empty, a line joins the
    /// current point to the start of the arc.
    ArcTo {
        /// The bounding rect of the ellipse.
        rect: RectF,
        /// The angle the arc starts at.
        start: f32,
        /// The angle the arc spans. Negative values run clockwise.
        sweep: f32,
    },
    /// Closes the current subpath.
    Close,
}

/// A vector path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    cmds: Vec<PathCmd>,
}

impl Path {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands making up this path.
    pub fn commands(&self) -> &[PathCmd] {
        &self.cmds
    }

    /// Whether the path has no commands.
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Starts a new subpath at `(x, y)`.
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.cmds.push(PathCmd::MoveTo(PointF::new(x, y)));
        self
    }

    /// Adds a line to `(x, y)`.
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.cmds.push(PathCmd::LineTo(PointF::new(x, y)));
        self
    }

    /// Adds a cubic curve through the control points `c1` and `c2` to `to`.
    pub fn cubic_to(&mut self, c1: PointF, c2: PointF, to: PointF) -> &mut Self {
        self.cmds.push(PathCmd::CubicTo(c1, c2, to));
        self
    }

    /// Adds an arc of the ellipse inscribed in `rect`. See [`PathCmd::ArcTo`].
    pub fn arc_to(&mut self, rect: RectF, start: f32, sweep: f32) -> &mut Self {
        self.cmds.push(PathCmd::ArcTo { rect, start, sweep });
        self
    }

    /// Closes the current subpath.
    pub fn close(&mut self) -> &mut Self {
        self.cmds.push(PathCmd::Close);
        self
    }

    /// A rectangle.
    pub fn rect(r: RectF) -> Self {
        let mut path = Path::new();
        path.move_to(r.x(), r.y())
            .line_to(r.right(), r.y())
            .line_to(r.right(), r.bottom())
            .line_to(r.x(), r.bottom())
            .close();
        path
    }

    /// A rectangle with circular corners of `radius`.
    pub fn rounded_rect(r: RectF, radius: f32) -> Self {
        let radius = radius.min(r.width() / 2.0).min(r.height() / 2.0);
        if radius <= 0.0 {
            return Path::rect(r)
        }
        let d = 2.0 * radius;
        let corner = |x: f32, y: f32| RectF::new(x, y, d, d);

        let mut path = Path::new();
        path.arc_to(corner(r.right() - d, r.y()), 0.0, 90.0)
            .arc_to(corner(r.x(), r.y()), 90.0, 90.0)
            .arc_to(corner(r.x(), r.bottom() - d), 180.0, 90.0)
            .arc_to(corner(r.right() - d, r.bottom() - d), 270.0, 90.0)
            .close();
        path
    }

    /// The ellipse inscribed in `r`.
    pub fn ellipse(r: RectF) -> Self {
        let mut path = Path::new();
        path.arc_to(r, 0.0, 360.0).close();
        path
    }

    /// A straight line.
    pub fn line(from: PointF, to: PointF) -> Self {
        let mut path = Path::new();
        path.move_to(from.x, from.y).line_to(to.x, to.y);
        path
    }

    /// An open arc of the ellipse inscribed in `r`.
    pub fn arc(r: RectF, start: f32, sweep: f32) -> Self {
        let mut path = Path::new();
        path.arc_to(r, start, sweep);
        path
    }

    /// A closed polygon through `points`.
    pub fn polygon(points: &[PointF]) -> Self {
        let mut path = Path::new();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            path.move_to(first.x, first.y);
            for p in iter {
                path.line_to(p.x, p.y);
            }
            path.close();
        }
        path
    }
}

/// Splits an arc into cubic Bézier segments of at most 90 degrees.
///
/// Returns the start point of the arc, followed by the `(c1, c2, to)`
/// control points of each segment.
pub fn arc_to_cubics(rect: RectF, start: f32, sweep: f32) -> (PointF, Vec<(PointF, PointF, PointF)>) {
    let (rx, ry) = (rect.width() as f64 / 2.0, rect.height() as f64 / 2.0);
    let (cx, cy) = (rect.x() as f64 + rx, rect.y() as f64 + ry);

    // y grows downwards, so counter-clockwise angles subtract from y.
    let point = |a: f64| PointF::new((cx + rx * a.cos()) as f32, (cy - ry * a.sin()) as f32);
    let tangent = |a: f64| (-rx * a.sin(), -ry * a.cos());

    let start = (start as f64).to_radians();
    let sweep = (sweep as f64).to_radians();
    let count = (sweep.abs() / std::f64::consts::FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / count as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let segments = (0..count)
        .map(|i| {
            let a = start + step * i as f64;
            let b = a + step;
            let (p0, p3) = (point(a), point(b));
            let (da, db) = (tangent(a), tangent(b));
            let c1 = PointF::new(p0.x + (k * da.0) as f32, p0.y + (k * da.1) as f32);
            let c2 = PointF::new(p3.x - (k * db.0) as f32, p3.y - (k * db.1) as f32);
            (c1, c2, p3)
        })
        .collect();

    (point(start), segments)
}

/// A surface that decorations draw on.
///
/// Implementors provide a handful of primitives; shape helpers are
/// built on top of [`draw_path`](Painter::draw_path).
pub trait Painter {
    /// Pushes the current transform and clip.
    fn save(&mut self);

    /// Pops the transform and clip pushed by the last [`save`](Painter::save).
    fn restore(&mut self);

    /// Moves the origin by `(dx, dy)`.
    fn translate(&mut self, dx: f32, dy: f32);

    /// Scales the coordinate space.
    fn scale(&mut self, sx: f32, sy: f32);

    /// Restricts drawing to `rect`.
    fn set_clip_rect(&mut self, rect: RectF, op: ClipOp);

    /// Makes `rect` fully transparent.
    fn clear_rect(&mut self, rect: RectF);

    /// Fills and/or strokes `path`.
    fn draw_path(&mut self, path: &Path, style: &Style);

    /// Draws a single line of `text` aligned within `rect`.
    fn draw_text(&mut self, rect: RectF, align: Alignment, text: &str, color: Color);

    /// Draws a rectangle.
    fn draw_rect(&mut self, rect: RectF, style: &Style) {
        self.draw_path(&Path::rect(rect), style)
    }

    /// Draws a rectangle with rounded corners.
    fn draw_rounded_rect(&mut self, rect: RectF, radius: f32, style: &Style) {
        self.draw_path(&Path::rounded_rect(rect, radius), style)
    }

    /// Draws the ellipse inscribed in `rect`.
    fn draw_ellipse(&mut self, rect: RectF, style: &Style) {
        self.draw_path(&Path::ellipse(rect), style)
    }

    /// Draws a straight line.
    fn draw_line(&mut self, from: PointF, to: PointF, pen: Pen, antialias: bool) {
        let style = Style { fill: None, stroke: Some(pen), antialias };
        self.draw_path(&Path::line(from, to), &style)
    }

    /// Draws an open arc. Angles are in degrees, see [`PathCmd::ArcTo`].
    fn draw_arc(&mut self, rect: RectF, start: f32, sweep: f32, pen: Pen, antialias: bool) {
        let style = Style { fill: None, stroke: Some(pen), antialias };
        self.draw_path(&Path::arc(rect, start, sweep), &style)
    }

    /// Draws a closed polygon.
    fn draw_polygon(&mut self, points: &[PointF], style: &Style) {
        self.draw_path(&Path::polygon(points), style)
    }

    /// Draws the decorated window's icon in `rect`, tinted with `tint`.
    ///
    /// Only the host knows the icon, so hosts should override this.
    /// By default, a rounded square stands in for it.
    fn draw_client_icon(&mut self, rect: RectF, tint: Color) {
        let inset = rect.width().min(rect.height()) / 6.0;
        let r = RectF::new(
            rect.x() + inset,
            rect.y() + inset,
            rect.width() - 2.0 * inset,
            rect.height() - 2.0 * inset,
        );
        self.draw_rounded_rect(r, inset, &Style::fill(tint))
    }
}
