//! The vector glyphs drawn on buttons.
//!
//! Glyphs are defined in an 18x18 unit square. The painter is expected to
//! be scaled so that this square covers the button's icon.

use crate::config::IconStyle;
use crate::metrics::SYMBOL_PEN_WIDTH;
use crate::paint::{Painter, Path, Pen, Style};
use crate::types::{Color, PointF, RectF};
use crate::window::ButtonKind;

fn pt(x: f32, y: f32) -> PointF {
    PointF::new(x, y)
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> RectF {
    RectF::new(x, y, w, h)
}

/// Draws the glyph for `kind`, in `color`, for an icon `width` pixels wide.
///
/// `checked` only matters for [`ButtonKind::Maximize`], whose arrows point
/// inwards when the window is maximized. The menu button has no glyph.
pub(crate) fn draw_glyph(
    painter: &mut dyn Painter,
    kind: ButtonKind,
    checked: bool,
    style: IconStyle,
    color: Color,
    width: f32,
) {
    // thin icons get proportionally thicker strokes
    let pen_width = |min: f32, num: f32| SYMBOL_PEN_WIDTH * min.max(num / width);
    let pen = Pen::new(color, pen_width(1.0, 20.0)).round();
    let fill = Style::fill(color);
    let aurorae = style == IconStyle::Aurorae;

    match kind {
        ButtonKind::Menu => {}
        ButtonKind::Close => {
            let pen = Pen::new(color, pen_width(1.75, 35.0)).round();
            painter.draw_line(pt(7.0, 7.0), pt(11.0, 11.0), pen, true);
            painter.draw_line(pt(11.0, 7.0), pt(7.0, 11.0), pen, true);
        }
        ButtonKind::Maximize => {
            if checked {
                painter.draw_polygon(&[pt(9.0, 9.8), pt(9.0, 13.2), pt(4.8, 9.0), pt(8.2, 9.0)], &fill);
                painter.draw_polygon(&[pt(9.0, 8.2), pt(9.0, 4.8), pt(13.2, 9.0), pt(9.8, 9.0)], &fill);
            } else {
                painter.draw_polygon(&[pt(6.0, 11.4), pt(6.0, 7.6), pt(10.4, 12.0), pt(6.6, 12.0)], &fill);
                painter.draw_polygon(&[pt(12.0, 6.6), pt(12.0, 10.4), pt(7.6, 6.0), pt(11.4, 6.0)], &fill);
            }
        }
        ButtonKind::Minimize => {
            painter.draw_rect(rect(6.0, 8.0, 6.0, 2.0), &fill);
        }
        ButtonKind::OnAllDesktops if aurorae => {
            painter.draw_ellipse(rect(6.0, 6.0, 6.0, 6.0), &fill);
        }
        ButtonKind::OnAllDesktops => {
            let pin = [
                pt(10.0, 6.5),
                pt(10.0, 4.0),
                pt(14.0, 8.0),
                pt(11.5, 8.0),
                pt(10.0, 9.5),
                pt(10.0, 12.0),
                pt(8.0, 11.0),
                pt(7.0, 10.0),
                pt(6.0, 8.0),
                pt(8.5, 8.0),
            ];
            painter.draw_polygon(&pin, &fill);
            painter.draw_line(pt(11.0, 7.0), pt(5.5, 12.5), pen, true);
        }
        ButtonKind::Shade if aurorae => {
            painter.draw_polygon(&[pt(6.0, 9.0), pt(9.0, 6.0), pt(12.0, 9.0)], &fill);
            painter.draw_rect(rect(8.0, 9.0, 2.0, 2.5), &fill);
        }
        ButtonKind::Shade => {
            painter.draw_rect(rect(6.0, 6.0, 6.0, 2.0), &fill);
            painter.draw_polygon(&[pt(5.5, 12.0), pt(9.0, 8.5), pt(12.5, 12.0)], &fill);
        }
        ButtonKind::KeepBelow if aurorae => {
            painter.draw_polygon(&[pt(6.0, 7.0), pt(9.0, 12.0), pt(12.0, 7.0)], &fill);
        }
        ButtonKind::KeepBelow => {
            // dots are drawn one by one so they scale evenly
            let dots = [(8.0, 5.0), (10.0, 5.0), (12.0, 5.0), (12.0, 7.0), (12.0, 9.0), (10.0, 9.0), (8.0, 9.0), (8.0, 7.0)];
            for (x, y) in dots {
                painter.draw_rect(rect(x, y, 1.0, 1.0), &fill);
            }
            painter.draw_rect(rect(5.0, 8.0, 1.0, 4.5), &fill);
            painter.draw_rect(rect(5.0, 12.0, 5.0, 1.0), &fill);
        }
        ButtonKind::KeepAbove if aurorae => {
            painter.draw_polygon(&[pt(6.0, 11.0), pt(9.0, 6.0), pt(12.0, 11.0)], &fill);
        }
        ButtonKind::KeepAbove => {
            painter.draw_rect(rect(8.0, 5.0, 5.0, 5.0), &fill);
            for (x, y) in [(5.0, 8.0), (5.0, 10.0), (5.0, 12.0), (7.0, 12.0), (9.0, 12.0)] {
                painter.draw_rect(rect(x, y, 1.0, 1.0), &fill);
            }
        }
        ButtonKind::ApplicationMenu => {
            let bars = Style::stroke(pen);
            for y in [5.5, 8.5, 11.5] {
                painter.draw_rect(rect(5.5, y, 7.0, 1.0), &bars);
            }
        }
        ButtonKind::ContextHelp => {
            let pen = Pen::new(color, pen_width(1.5, 30.0));
            let mut path = Path::new();
            path.move_to(6.5, 7.5)
                .arc_to(rect(6.5, 5.0, 5.0, 3.0), 180.0, -180.0)
                .cubic_to(pt(11.5, 9.0), pt(8.0, 8.0), pt(9.0, 10.5));
            painter.draw_path(&path, &Style::stroke(pen));
            painter.draw_line(pt(9.0, 12.0), pt(9.0, 14.0), pen, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::testing::{Op, RecordingPainter};
    use crate::paint::PathCmd;
    use strum::IntoEnumIterator;

    fn record(kind: ButtonKind, checked: bool, style: IconStyle) -> RecordingPainter {
        let mut painter = RecordingPainter::new();
        draw_glyph(&mut painter, kind, checked, style, Color::BLACK, 20.0);
        painter
    }

    #[test]
    fn test_every_kind_but_menu_draws() {
        for kind in ButtonKind::iter() {
            for style in IconStyle::iter() {
                let painter = record(kind, false, style);
                assert_eq!(painter.ops.is_empty(), kind == ButtonKind::Menu, "{kind} {style}");
            }
        }
    }

    #[test]
    fn test_maximize_flips_when_checked() {
        let unchecked = record(ButtonKind::Maximize, false, IconStyle::Classic);
        let checked = record(ButtonKind::Maximize, true, IconStyle::Classic);
        assert_ne!(unchecked.ops, checked.ops);

        let first = checked.paths().next().map(|(p, _)| p.commands()[0]);
        assert_eq!(first, Some(PathCmd::MoveTo(pt(9.0, 9.8))));
    }

    #[test]
    fn test_icon_styles_differ() {
        for kind in [ButtonKind::OnAllDesktops, ButtonKind::Shade, ButtonKind::KeepBelow, ButtonKind::KeepAbove] {
            let classic = record(kind, false, IconStyle::Classic);
            let aurorae = record(kind, false, IconStyle::Aurorae);
            assert_ne!(classic.ops, aurorae.ops, "{kind}");
        }
    }

    #[test]
    fn test_close_pen_thickens_on_small_icons() {
        let mut painter = RecordingPainter::new();
        draw_glyph(&mut painter, ButtonKind::Close, false, IconStyle::Classic, Color::BLACK, 10.0);

        match &painter.ops[0] {
            Op::Path(_, style) => {
                let width = style.stroke.map(|p| p.width).unwrap_or_default();
                assert!((width - SYMBOL_PEN_WIDTH * 3.5).abs() < 1e-5);
                assert!(style.fill.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
