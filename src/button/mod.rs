//! Title bar buttons.
//!
//! A [`Button`] knows its kind, its cell in the title bar, and its
//! interaction state. It owns an [`Animation`] that cross-fades its colors
//! as the pointer enters and leaves it.

mod glyphs;

use std::time::Duration;

use tracing::trace;

use crate::animation::Animation;
use crate::config::{DecorationConfig, IconStyle};
use crate::decoration::DecorationElement;
use crate::frame::{ButtonCell, CellPosition};
use crate::paint::{Painter, Pen, Style};
use crate::theme::{ColorSet, LIGHT};
use crate::types::{Color, Direction, Logical, Point, PointF, Rect, RectF, Size};
use crate::window::ButtonKind;

/// What a button needs to know about its decoration to draw itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonContext {
    /// The palette of the current theme.
    pub colors: &'static ColorSet,
    /// The glyph set.
    pub icon_style: IconStyle,
    /// Whether the window is focused, or `None` if the window is gone.
    pub window_active: Option<bool>,
    /// The current caption color, used to tint the client icon.
    pub font_color: Color,
}

impl Default for ButtonContext {
    fn default() -> Self {
        Self {
            colors: &LIGHT,
            icon_style: IconStyle::default(),
            window_active: None,
            font_color: LIGHT.title_font_inactive,
        }
    }
}

/// A title bar button.
#[derive(Debug)]
pub struct Button {
    cell: ButtonCell,
    standalone: bool,
    hovered: bool,
    pressed: bool,
    checked: bool,
    animation: Animation,
    ctx: ButtonContext,
}

impl Button {
    /// Creates a button of `kind` in `cell`.
    pub fn new(cell: ButtonCell) -> Self {
        Self {
            cell,
            standalone: false,
            hovered: false,
            pressed: false,
            checked: false,
            animation: Animation::new(Duration::ZERO),
            ctx: ButtonContext::default(),
        }
    }

    /// Creates a button drawn on its own, outside a title bar.
    ///
    /// Standalone buttons draw their glyph over their whole geometry,
    /// and ignore edge offsets.
    pub fn standalone(kind: ButtonKind, geometry: Rect) -> Self {
        let cell = ButtonCell {
            kind,
            rect: geometry,
            offset: Point::zeroed(),
            icon_size: geometry.width(),
            position: CellPosition::Normal,
        };
        Self {
            standalone: true,
            ..Self::new(cell)
        }
    }

    /// The kind of button.
    pub fn kind(&self) -> ButtonKind {
        self.cell.kind
    }

    /// The cell the button occupies.
    pub fn cell(&self) -> &ButtonCell {
        &self.cell
    }

    /// Moves the button to a new cell.
    pub fn set_cell(&mut self, cell: ButtonCell) {
        self.cell = ButtonCell { kind: self.cell.kind, ..cell };
    }

    /// The clickable area.
    pub fn geometry(&self) -> Rect {
        self.cell.rect
    }

    /// Whether the button is drawn outside a title bar.
    pub fn is_standalone(&self) -> bool {
        self.standalone
    }

    /// Whether the pointer is over the button.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the button is held down.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Whether the button is toggled on.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Whether the button is drawn highlighted for being checked.
    ///
    /// Always false for [`ButtonKind::Maximize`]: its glyph already
    /// shows whether the window is maximized.
    pub fn is_checked_custom(&self) -> bool {
        self.kind() != ButtonKind::Maximize && self.checked
    }

    /// Whether the hover animation needs further ticks.
    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    /// The eased value of the hover animation.
    pub fn opacity(&self) -> f64 {
        self.animation.value()
    }

    /// Applies a new configuration.
    pub fn configure(&mut self, config: &DecorationConfig) {
        self.animation.set_duration(config.animations_duration);
        self.animation.set_enabled(config.animations_enabled);
        self.ctx.icon_style = config.icon_style;
        self.ctx.colors = crate::theme::colors_for(config.theme);
    }

    /// Updates what the button knows about its decoration.
    pub fn set_context(&mut self, ctx: ButtonContext) {
        self.ctx = ctx;
    }

    /// The button's view of its decoration.
    pub fn context(&self) -> &ButtonContext {
        &self.ctx
    }

    /// Sets whether the pointer is over the button.
    ///
    /// Returns whether the button needs to be redrawn.
    pub fn set_hovered(&mut self, hovered: bool) -> bool {
        if self.hovered == hovered {
            return false
        }
        self.hovered = hovered;

        if self.animation.is_enabled() {
            let direction = if hovered { Direction::Forward } else { Direction::Backward };
            self.animation.set_direction(direction);
            self.animation.start();
        } else {
            self.animation.set_progress(if hovered { 1.0 } else { 0.0 });
        }
        trace!(target: "button", "{} hovered: {}", self.kind(), hovered);
        true
    }

    /// Sets whether the button is held down. Returns whether it changed.
    pub fn set_pressed(&mut self, pressed: bool) -> bool {
        std::mem::replace(&mut self.pressed, pressed) != pressed
    }

    /// Sets whether the button is toggled on. Returns whether it changed.
    pub fn set_checked(&mut self, checked: bool) -> bool {
        std::mem::replace(&mut self.checked, checked) != checked
    }

    /// Advances the hover animation. Returns whether it is still running.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.animation.advance(elapsed);
        self.animation.is_running()
    }

    /// The glyph color, or `None` if nothing should be drawn.
    pub fn foreground_color(&self) -> Option<Color> {
        let active = self.ctx.window_active?;
        let c = self.ctx.colors;
        let is_close = self.kind() == ButtonKind::Close;
        let idle = if active { c.icon } else { c.icon_unfocused };

        let color = if (self.pressed || self.is_checked_custom()) && !is_close {
            c.icon_active
        } else if is_close {
            c.title_bar
        } else if self.is_animating() {
            Color::mix(idle, c.icon_hover, self.opacity())
        } else if self.hovered {
            c.icon_hover
        } else {
            idle
        };
        Some(color)
    }

    /// The chip color, or `None` if no chip is drawn.
    pub fn background_color(&self) -> Option<Color> {
        let active = self.ctx.window_active?;
        let c = self.ctx.colors;
        let is_close = self.kind() == ButtonKind::Close;
        let close_idle = if active { c.close } else { c.icon_unfocused };

        if self.pressed {
            Some(if is_close { c.close_active } else { c.button_active })
        } else if self.is_checked_custom() {
            Some(c.button_selected)
        } else if self.is_animating() {
            if is_close {
                Some(Color::mix(close_idle, c.close_hover, self.opacity()))
            } else {
                Some(c.button_hover.scale_alpha(self.opacity()))
            }
        } else if self.hovered {
            Some(if is_close { c.close_hover } else { c.button_hover })
        } else if is_close {
            Some(close_idle)
        } else {
            None
        }
    }

    /// Draws the button.
    pub fn draw(&self, painter: &mut dyn Painter) {
        if self.ctx.window_active.is_none() {
            return
        }
        painter.save();

        let offset = self.cell.offset.cast::<f32>();
        match self.cell.position {
            CellPosition::FirstInList => painter.translate(offset.x, offset.y),
            _ => painter.translate(0.0, offset.y),
        }

        if self.kind() == ButtonKind::Menu {
            let rect = self.cell.rect;
            let icon = RectF::new(rect.x() as f32, rect.y() as f32, self.icon_size(), self.icon_size());
            painter.draw_client_icon(icon, self.ctx.font_color);
        } else {
            self.draw_icon(painter);
        }

        painter.restore();
    }

    fn icon_size(&self) -> f32 {
        if self.standalone {
            self.cell.rect.width() as f32
        } else {
            self.cell.icon_size as f32
        }
    }

    fn draw_icon(&self, painter: &mut dyn Painter) {
        let width = self.icon_size();
        if width <= 0.0 {
            return
        }

        // map the 18x18 glyph square onto the icon, with a unit of padding
        painter.translate(self.cell.rect.x() as f32, self.cell.rect.y() as f32);
        painter.scale(width / 20.0, width / 20.0);
        painter.translate(1.0, 1.0);

        if let Some(bg) = self.background_color() {
            let outlined = self.kind() != ButtonKind::Close
                && !self.pressed
                && !self.is_checked_custom()
                && (self.hovered || self.is_animating());

            if outlined {
                let style = Style::fill(bg).with_stroke(Pen::new(self.ctx.colors.button_hover_border, 1.25));
                painter.draw_ellipse(RectF::new(2.5, 2.5, 13.0, 13.0), &style);
            } else {
                painter.draw_ellipse(RectF::new(2.0, 2.0, 14.0, 14.0), &Style::fill(bg));
            }
        }

        if let Some(fg) = self.foreground_color() {
            glyphs::draw_glyph(painter, self.kind(), self.checked, self.ctx.icon_style, fg, width);
        }
    }
}

impl DecorationElement for Button {
    fn paint(&self, painter: &mut dyn Painter, repaint: Rect) {
        if repaint.intersects(&self.geometry()) {
            self.draw(painter);
        }
    }

    fn hit_test(&self, point: PointF) -> bool {
        self.geometry().to_f32().contains_point(point)
    }

    fn computed_size(&self) -> Size<i32, Logical> {
        self.geometry().size
    }
}
