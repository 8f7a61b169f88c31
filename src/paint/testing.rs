//! A painter that records what is drawn, for tests.

use crate::types::{Color, RectF};

use super::{Alignment, ClipOp, Painter, Path, Style};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    Save,
    Restore,
    Translate(f32, f32),
    Scale(f32, f32),
    Clip(RectF, ClipOp),
    Clear(RectF),
    Path(Path, Style),
    Text {
        rect: RectF,
        align: Alignment,
        text: String,
        color: Color,
    },
    ClientIcon(RectF, Color),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingPainter {
    pub ops: Vec<Op>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&Op> {
        self.ops.iter().filter(|op| matches!(op, Op::Text { .. })).collect()
    }

    pub fn paths(&self) -> impl Iterator<Item = (&Path, &Style)> {
        self.ops.iter().filter_map(|op| match op {
            Op::Path(p, s) => Some((p, s)),
            _ => None,
        })
    }

    /// Whether every save was matched by a restore.
    pub fn is_balanced(&self) -> bool {
        let mut depth = 0i32;
        for op in &self.ops {
            match op {
                Op::Save => depth += 1,
                Op::Restore => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return false
            }
        }
        depth == 0
    }
}

impl Painter for RecordingPainter {
    fn save(&mut self) {
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.ops.push(Op::Translate(dx, dy));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.ops.push(Op::Scale(sx, sy));
    }

    fn set_clip_rect(&mut self, rect: RectF, op: ClipOp) {
        self.ops.push(Op::Clip(rect, op));
    }

    fn clear_rect(&mut self, rect: RectF) {
        self.ops.push(Op::Clear(rect));
    }

    fn draw_path(&mut self, path: &Path, style: &Style) {
        self.ops.push(Op::Path(path.clone(), *style));
    }

    fn draw_text(&mut self, rect: RectF, align: Alignment, text: &str, color: Color) {
        self.ops.push(Op::Text {
            rect,
            align,
            text: text.to_string(),
            color,
        });
    }

    fn draw_client_icon(&mut self, rect: RectF, tint: Color) {
        self.ops.push(Op::ClientIcon(rect, tint));
    }
}
