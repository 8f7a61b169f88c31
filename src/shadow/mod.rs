//! Synthesis of the drop shadow texture shared by every decoration.
//!
//! A shadow is described by a [`ShadowSize`], a strength and a color. Each size
//! maps to a pair of blurred box shadows: a wide, soft one and a tighter one
//! nudged upwards. [`synthesize`] renders both onto one texture and cuts out
//! the area covered by the window's frame, so the texture can be drawn around
//! any window as a nine-patch by the host.
//!
//! Synthesis is deterministic. The same inputs always produce the same
//! texture, which is what lets [`ShadowCache`] share one texture among every
//! decoration using the same parameters.

mod cache;
mod renderer;

pub use cache::{ShadowCache, ShadowKey};
pub use renderer::{blur_extent, minimum_box_size, BoxShadow, BoxShadowRenderer};

use custom_debug_derive::Debug;
use tiny_skia::{BlendMode, FillRule, Paint, Pixmap, Stroke, Transform};
use tracing::{debug, instrument, warn};

use crate::config::ShadowSize;
use crate::metrics::{FRAME_RADIUS, SHADOW_OVERLAP};
use crate::types::{Color, Insets, Logical, Point, Rect, Size};
use crate::Result;

/// One blurred box of a composite shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowParams {
    /// The offset of this pass from the box.
    pub offset: Point<i32, Logical>,
    /// The blur radius.
    pub radius: i32,
    /// The opacity at full strength.
    pub opacity: f64,
}

impl ShadowParams {
    const fn new(x: i32, y: i32, radius: i32, opacity: f64) -> Self {
        Self {
            offset: Point::new(x, y),
            radius,
            opacity,
        }
    }
}

/// The two passes of a shadow, and how far the whole shadow is shifted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeShadowParams {
    /// The offset of the whole shadow from the window.
    pub offset: Point<i32, Logical>,
    /// The wide pass.
    pub shadow1: ShadowParams,
    /// The tight pass.
    pub shadow2: ShadowParams,
}

impl CompositeShadowParams {
    const fn new(x: i32, y: i32, shadow1: ShadowParams, shadow2: ShadowParams) -> Self {
        Self {
            offset: Point::new(x, y),
            shadow1,
            shadow2,
        }
    }

    /// Whether this describes no shadow at all.
    pub fn is_none(&self) -> bool {
        self.shadow1.radius == 0 && self.shadow2.radius == 0
    }
}

const SHADOW_PARAMS: [CompositeShadowParams; 5] = [
    // None
    CompositeShadowParams::new(0, 0, ShadowParams::new(0, 0, 0, 0.0), ShadowParams::new(0, 0, 0, 0.0)),
    // Small
    CompositeShadowParams::new(0, 4, ShadowParams::new(0, 0, 16, 1.0), ShadowParams::new(0, -2, 8, 0.4)),
    // Medium
    CompositeShadowParams::new(0, 8, ShadowParams::new(0, 0, 32, 0.9), ShadowParams::new(0, -4, 16, 0.3)),
    // Large
    CompositeShadowParams::new(0, 12, ShadowParams::new(0, 0, 48, 0.8), ShadowParams::new(0, -6, 24, 0.2)),
    // VeryLarge
    CompositeShadowParams::new(0, 16, ShadowParams::new(0, 0, 64, 0.7), ShadowParams::new(0, -8, 32, 0.1)),
];

/// Looks up the passes for `size`.
pub fn lookup_shadow_params(size: ShadowSize) -> CompositeShadowParams {
    SHADOW_PARAMS[size as usize]
}

/// Looks up the passes for a raw size index, falling back to
/// [`ShadowSize::Large`] for indices that name no size.
pub fn lookup_shadow_params_index(index: i64) -> CompositeShadowParams {
    use crate::config::ConfigEnum;
    lookup_shadow_params(ShadowSize::from_index(index))
}

/// A synthesized shadow, ready to be handed to the host.
#[derive(Debug, Clone, Default)]
pub struct ShadowDescriptor {
    /// The offset of the whole shadow from the window.
    pub offset: Point<i32, Logical>,
    /// The size of the box the shadow was rendered around.
    pub box_size: Size<i32, Logical>,
    /// How far the texture extends past the window on each side.
    pub padding: Insets,
    /// The area cut out of the texture, where the frame is drawn.
    pub hole: Rect,
    /// A 1x1 rect at the center of the texture, for the host's shadow atlas.
    pub inner_rect: Rect,
    /// The texture, or `None` for no shadow.
    #[debug(skip)]
    pub texture: Option<Pixmap>,
}

impl ShadowDescriptor {
    /// The descriptor of no shadow: no texture and zero padding.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether there is no shadow to draw.
    pub fn is_empty(&self) -> bool {
        self.texture.is_none()
    }

    /// The size of the texture.
    pub fn texture_size(&self) -> Size<i32, Logical> {
        self.texture
            .as_ref()
            .map(|t| Size::new(t.width() as i32, t.height() as i32))
            .unwrap_or_default()
    }
}

/// Synthesizes the shadow texture for the given parameters.
///
/// A size of [`ShadowSize::None`] yields the empty descriptor. So does an
/// allocation failure, which is logged.
#[instrument(target = "shadow", level = "trace", skip_all, fields(?size, strength))]
pub fn synthesize(size: ShadowSize, strength: u8, color: Color) -> ShadowDescriptor {
    let params = lookup_shadow_params(size);
    if params.is_none() {
        return ShadowDescriptor::empty()
    }

    match render(&params, strength, color) {
        Ok(descriptor) => {
            debug!(
                target: "shadow",
                "synthesized {size} shadow, texture {:?}, padding {:?}",
                descriptor.texture_size(), descriptor.padding
            );
            descriptor
        }
        Err(e) => {
            warn!(target: "shadow", "could not synthesize shadow: {e}");
            ShadowDescriptor::empty()
        }
    }
}

fn render(params: &CompositeShadowParams, strength: u8, color: Color) -> Result<ShadowDescriptor> {
    let strength = strength as f64 / 255.0;
    let box_size = minimum_box_size(params.shadow1.radius)
        .expanded_to(minimum_box_size(params.shadow2.radius));

    let mut renderer = BoxShadowRenderer::new(box_size, FRAME_RADIUS + 0.5);
    for pass in [params.shadow1, params.shadow2] {
        renderer.add_shadow(BoxShadow {
            offset: pass.offset,
            radius: pass.radius,
            color: color.with_alpha_f(pass.opacity * strength),
        });
    }

    let Some(mut texture) = renderer.render()? else {
        return Ok(ShadowDescriptor::empty())
    };

    let outer = Rect::new(0, 0, texture.width() as i32, texture.height() as i32);
    let box_rect = renderer::centered(box_size, outer);

    // Right and bottom edges here are inclusive.
    let (outer_right, outer_bottom) = (outer.right() - 1, outer.bottom() - 1);
    let (box_right, box_bottom) = (box_rect.right() - 1, box_rect.bottom() - 1);
    let padding = Insets::new(
        box_rect.x() - outer.x() - SHADOW_OVERLAP - params.offset.x,
        box_rect.y() - outer.y() - SHADOW_OVERLAP - params.offset.y,
        outer_right - box_right - SHADOW_OVERLAP + params.offset.x,
        outer_bottom - box_bottom - SHADOW_OVERLAP + params.offset.y,
    );
    let hole = outer.shrunk_by(padding);

    // Cut out the frame.
    if let Some(path) = renderer::rounded_rect(hole, FRAME_RADIUS + 0.5) {
        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 0, 255);
        paint.anti_alias = true;
        paint.blend_mode = BlendMode::DestinationOut;
        texture.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    // Outline the frame.
    if let Some(path) = renderer::rounded_rect(hole, FRAME_RADIUS - 0.5) {
        let (r, g, b, a) = color.with_alpha_f(0.2 * strength).rgba();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        let stroke = Stroke {
            width: 1.0,
            ..Default::default()
        };
        texture.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    let center = outer.center();
    Ok(ShadowDescriptor {
        offset: params.offset,
        box_size,
        padding,
        hole,
        inner_rect: Rect::new(center.x, center.y, 1, 1),
        texture: Some(texture),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_params_table() {
        assert!(lookup_shadow_params(ShadowSize::None).is_none());
        assert_eq!(lookup_shadow_params(ShadowSize::Medium).shadow1.radius, 32);
        assert_eq!(lookup_shadow_params_index(12), lookup_shadow_params(ShadowSize::Large));
        assert_eq!(lookup_shadow_params_index(-3), lookup_shadow_params(ShadowSize::Large));
    }

    #[test_log::test]
    fn test_none_is_empty() {
        for strength in [0u8, 128, 255] {
            let d = synthesize(ShadowSize::None, strength, Color::BLACK);
            assert!(d.is_empty());
            assert_eq!(d.padding, Insets::zeroed());
            assert_eq!(d.texture_size(), Size::zeroed());
        }
    }

    #[test_log::test]
    fn test_large_geometry() {
        let d = synthesize(ShadowSize::Large, 255, Color::BLACK);

        assert_eq!(d.box_size, Size::new(137, 137));
        assert_eq!(d.texture_size(), Size::new(273, 273));
        assert_eq!(d.padding, Insets::new(65, 53, 65, 77));
        assert!(d.padding.is_positive());
        assert_eq!(d.inner_rect, Rect::new(136, 136, 1, 1));

        let size = d.texture_size();
        let inner_center = d.inner_rect.center();
        assert!((inner_center.x - (size.width - 1) / 2).abs() <= 1);
        assert!((inner_center.y - (size.height - 1) / 2).abs() <= 1);
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        for size in ShadowSize::iter() {
            for strength in [0u8, 77, 255] {
                let a = synthesize(size, strength, Color::BLACK);
                let b = synthesize(size, strength, Color::BLACK);

                assert_eq!(a.padding, b.padding);
                assert!(a.padding.is_non_negative());
                assert_eq!(
                    a.texture.as_ref().map(|t| t.data().to_vec()),
                    b.texture.as_ref().map(|t| t.data().to_vec()),
                );
            }
        }
    }

    #[test]
    fn test_hole_is_cut_out() {
        let d = synthesize(ShadowSize::Small, 255, Color::BLACK);
        let texture = d.texture.as_ref().unwrap();
        let w = texture.width() as usize;

        let center = d.hole.center();
        let px = texture.pixels()[center.y as usize * w + center.x as usize];
        assert_eq!(px.alpha(), 0);

        // just outside the hole, the shadow is visible
        let below = d.hole.bottom() as usize + 2;
        let px = texture.pixels()[below * w + center.x as usize];
        assert!(px.alpha() > 0);
    }
}
