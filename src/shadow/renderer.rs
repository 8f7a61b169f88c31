//! Rendering of blurred box shadows.
//!
//! Each shadow is a rounded box filled with opaque black, blurred with a
//! three-pass box blur approximating a Gaussian, tinted with the shadow
//! color, and drawn onto a shared canvas at its offset.

use std::f64::consts::PI;

use tiny_skia::{
    ColorU8, FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Rect as SkRect, Transform,
};
use tracing::trace;

use crate::types::{Color, Logical, Point, Rect, Size};
use crate::{DecoError, Result};

/// The standard deviation of the Gaussian approximating a blur of `radius`.
fn radius_to_std_dev(radius: i32) -> f64 {
    radius as f64 * 0.5
}

/// The number of pixels a blur of `radius` spreads beyond its source.
pub fn blur_extent(radius: i32) -> i32 {
    let gaussian_scale = (3.0 * (2.0 * PI).sqrt() / 4.0) * 1.5;
    let extent = (radius_to_std_dev(radius) * gaussian_scale + 0.5).floor() as i32;
    extent.max(2)
}

/// The smallest box that keeps a blur of `radius` from bleeding into itself.
pub fn minimum_box_size(radius: i32) -> Size<i32, Logical> {
    let side = 2 * blur_extent(radius) + 1;
    Size::new(side, side)
}

/// The canvas needed to hold a box of `box_size` with a shadow of `radius` at `offset`.
fn minimum_texture_size(
    box_size: Size<i32, Logical>,
    radius: i32,
    offset: Point<i32, Logical>,
) -> Size<i32, Logical> {
    let extent = blur_extent(radius);
    Size::new(
        box_size.width + 2 * extent + offset.x.abs(),
        box_size.height + 2 * extent + offset.y.abs(),
    )
}

/// A single blurred box shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShadow {
    /// Where the shadow is drawn relative to the box.
    pub offset: Point<i32, Logical>,
    /// The blur radius.
    pub radius: i32,
    /// The tint, including opacity.
    pub color: Color,
}

/// Renders one or more [`BoxShadow`]s of a rounded box onto a single canvas.
#[derive(Debug, Clone, Default)]
pub struct BoxShadowRenderer {
    box_size: Size<i32, Logical>,
    border_radius: f32,
    shadows: Vec<BoxShadow>,
}

impl BoxShadowRenderer {
    /// Creates a renderer for a box of `box_size` with corners of `border_radius`.
    pub fn new(box_size: Size<i32, Logical>, border_radius: f32) -> Self {
        Self {
            box_size,
            border_radius,
            shadows: Vec::new(),
        }
    }

    /// Queues a shadow. Shadows are drawn in the order they are added.
    pub fn add_shadow(&mut self, shadow: BoxShadow) {
        self.shadows.push(shadow);
    }

    /// The size of the canvas [`render`](BoxShadowRenderer::render) produces.
    pub fn canvas_size(&self) -> Size<i32, Logical> {
        self.shadows
            .iter()
            .map(|s| minimum_texture_size(self.box_size, s.radius, s.offset))
            .fold(Size::zeroed(), |acc, s| acc.expanded_to(s))
    }

    /// Renders every queued shadow.
    ///
    /// Returns `Ok(None)` if no shadow was queued.
    pub fn render(&self) -> Result<Option<Pixmap>> {
        if self.shadows.is_empty() {
            return Ok(None)
        }

        let size = self.canvas_size();
        let mut canvas = new_pixmap(size)?;

        let box_rect = centered(self.box_size, Rect::from_size(size));
        for shadow in &self.shadows {
            self.render_shadow(&mut canvas, box_rect, shadow)?;
        }

        Ok(Some(canvas))
    }

    fn render_shadow(&self, canvas: &mut Pixmap, box_rect: Rect, shadow: &BoxShadow) -> Result<()> {
        let extent = blur_extent(shadow.radius);
        let size = Size::new(self.box_size.width + 2 * extent, self.box_size.height + 2 * extent);
        let mut layer = new_pixmap(size)?;

        let local_box = centered(self.box_size, Rect::from_size(size));
        if let Some(path) = rounded_rect(local_box, self.border_radius) {
            let mut paint = Paint::default();
            paint.set_color_rgba8(0, 0, 0, 255);
            paint.anti_alias = true;
            layer.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }

        let mut alpha: Vec<u8> = layer.pixels().iter().map(|p| p.alpha()).collect();
        box_blur_alpha(&mut alpha, size.width as usize, size.height as usize, radius_to_std_dev(shadow.radius));
        colorize(&mut layer, &alpha, shadow.color);

        let center = box_rect.center() + shadow.offset;
        let target = centered_at(size, center);
        trace!(target: "shadow", "drawing radius {} shadow at {:?}", shadow.radius, target);

        canvas.draw_pixmap(
            target.x(),
            target.y(),
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(())
    }
}

pub(crate) fn new_pixmap(size: Size<i32, Logical>) -> Result<Pixmap> {
    let (width, height) = (size.width.max(0) as u32, size.height.max(0) as u32);
    Pixmap::new(width, height).ok_or(DecoError::Allocation { width, height })
}

/// Positions a rect of `size` so its center matches the center of `within`.
pub(crate) fn centered(size: Size<i32, Logical>, within: Rect) -> Rect {
    centered_at(size, within.center())
}

fn centered_at(size: Size<i32, Logical>, center: Point<i32, Logical>) -> Rect {
    let local = Rect::from_size(size).center();
    Rect::new(center.x - local.x, center.y - local.y, size.width, size.height)
}

/// Builds a rounded rectangle path, with the corners drawn as cubic quarter circles.
pub(crate) fn rounded_rect(rect: Rect, radius: f32) -> Option<tiny_skia::Path> {
    let r = rect.to_f32();
    let (x, y, w, h) = (r.x(), r.y(), r.width(), r.height());
    let radius = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    if radius == 0.0 {
        return SkRect::from_xywh(x, y, w, h).map(PathBuilder::from_rect)
    }

    // Distance of the cubic control points from the corner's end points.
    let k = radius * (1.0 - 0.552_284_8);
    let mut pb = PathBuilder::new();
    pb.move_to(x + radius, y);
    pb.line_to(x + w - radius, y);
    pb.cubic_to(x + w - k, y, x + w, y + k, x + w, y + radius);
    pb.line_to(x + w, y + h - radius);
    pb.cubic_to(x + w, y + h - k, x + w - k, y + h, x + w - radius, y + h);
    pb.line_to(x + radius, y + h);
    pb.cubic_to(x + k, y + h, x, y + h - k, x, y + h - radius);
    pb.line_to(x, y + radius);
    pb.cubic_to(x, y + k, x + k, y, x + radius, y);
    pb.close();
    pb.finish()
}

/// Replaces the color of every pixel with `color`, keeping its coverage.
fn colorize(layer: &mut Pixmap, alpha: &[u8], color: Color) {
    let (r, g, b, a) = color.rgba();
    for (px, coverage) in layer.pixels_mut().iter_mut().zip(alpha) {
        let out = (*coverage as u32 * a as u32 + 127) / 255;
        *px = ColorU8::from_rgba(r, g, b, out as u8).premultiply();
    }
}

/// The sizes of three box blurs whose composition approximates a Gaussian
/// of standard deviation `sigma`, as `(left, right)` reaches per pass.
fn box_passes(sigma: f64) -> [(usize, usize); 3] {
    let d = (sigma * 3.0 * (2.0 * PI).sqrt() / 4.0 + 0.5).floor() as usize;
    if d == 0 {
        return [(0, 0); 3]
    }
    if d % 2 == 1 {
        let r = (d - 1) / 2;
        [(r, r), (r, r), (r, r)]
    } else {
        let r = d / 2;
        [(r, r - 1), (r - 1, r), (r, r)]
    }
}

/// Blurs an alpha buffer in place, treating everything outside it as transparent.
pub(crate) fn box_blur_alpha(alpha: &mut [u8], width: usize, height: usize, sigma: f64) {
    if width == 0 || height == 0 {
        return
    }
    let passes = box_passes(sigma);
    let mut line = vec![0u8; width.max(height)];

    for row in 0..height {
        for &(left, right) in &passes {
            blur_line(alpha, row * width, 1, width, left, right, &mut line);
        }
    }
    for col in 0..width {
        for &(left, right) in &passes {
            blur_line(alpha, col, width, height, left, right, &mut line);
        }
    }
}

/// One box blur over `len` samples starting at `start`, `stride` apart.
///
/// Each output sample averages the inputs from `left` before it to `right`
/// after it, using a running sum.
fn blur_line(
    buf: &mut [u8],
    start: usize,
    stride: usize,
    len: usize,
    left: usize,
    right: usize,
    scratch: &mut [u8],
) {
    let size = (left + right + 1) as u32;
    if size == 1 {
        return
    }
    let at = |i: usize| start + i * stride;

    let mut sum: u32 = (0..=right.min(len - 1)).map(|i| buf[at(i)] as u32).sum();
    for i in 0..len {
        scratch[i] = ((sum + size / 2) / size) as u8;

        let add = i + right + 1;
        if add < len {
            sum += buf[at(add)] as u32;
        }
        if i >= left {
            sum -= buf[at(i - left)] as u32;
        }
    }

    for (i, v) in scratch[..len].iter().enumerate() {
        buf[at(i)] = *v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_sizes() {
        assert_eq!(blur_extent(48), 68);
        assert_eq!(blur_extent(24), 34);
        assert_eq!(blur_extent(0), 2);
        assert_eq!(minimum_box_size(48), Size::new(137, 137));
    }

    #[test]
    fn test_box_passes_cover_gaussian() {
        // d = 9 for sigma = 5
        assert_eq!(box_passes(5.0), [(4, 4); 3]);
        // d = 8 for sigma = 4.5
        assert_eq!(box_passes(4.5), [(4, 3), (3, 4), (4, 4)]);
        assert_eq!(box_passes(0.0), [(0, 0); 3]);
    }

    #[test]
    fn test_blur_preserves_mass_away_from_edges() {
        let (w, h) = (41, 41);
        let mut alpha = vec![0u8; w * h];
        for y in 15..26 {
            for x in 15..26 {
                alpha[y * w + x] = 255;
            }
        }
        let before: u32 = alpha.iter().map(|a| *a as u32).sum();

        box_blur_alpha(&mut alpha, w, h, 2.0);
        let after: u32 = alpha.iter().map(|a| *a as u32).sum();

        // rounding may move each sample by half a unit per pass
        let tolerance = (w * h) as u32 * 3;
        assert!(before.abs_diff(after) < tolerance);
        assert_eq!(alpha[20 * w + 20], 255);
        assert!(alpha[20 * w + 13] > 0 && alpha[20 * w + 13] < 128);
        assert_eq!(alpha[0], 0);
    }

    #[test]
    fn test_render_is_symmetric_for_centered_shadows() {
        let mut renderer = BoxShadowRenderer::new(minimum_box_size(8), 3.5);
        renderer.add_shadow(BoxShadow {
            offset: Point::zeroed(),
            radius: 8,
            color: Color::BLACK,
        });

        let canvas = renderer.render().unwrap().unwrap();
        let (w, h) = (canvas.width() as usize, canvas.height() as usize);
        assert_eq!(w, h);

        let px = |x: usize, y: usize| canvas.pixels()[y * w + x].alpha();
        for i in 0..w {
            // per-pass rounding can leave the two halves a unit or two apart
            assert!(px(i, h / 2).abs_diff(px(w - 1 - i, h / 2)) <= 2);
        }
        assert_eq!(px(0, 0), 0);
        assert!(px(w / 2, h / 2) > 200);
    }
}
