//! The Light and Dark color palettes.
//!
//! Palettes are fixed at compile time. Looking one up is a plain match
//! over [`Theme`], so it cannot fail.

use crate::config::Theme;
use crate::types::Color;

/// Every color a decoration and its buttons are drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorSet {
    /// Caption text of the focused window.
    pub title_font: Color,
    /// Caption text of unfocused windows.
    pub title_font_inactive: Color,
    /// Title bar and border fill.
    pub title_bar: Color,
    /// The one-pixel frame outline.
    pub outline: Color,
    /// The shading line along the top of the title bar.
    pub highlight: Color,

    /// Glyphs of the focused window's buttons.
    pub icon: Color,
    /// Glyphs of unfocused windows' buttons, and the close chip of unfocused windows.
    pub icon_unfocused: Color,
    /// Glyphs of hovered buttons.
    pub icon_hover: Color,
    /// Glyphs of pressed or checked buttons.
    pub icon_active: Color,

    /// The chip behind a hovered button.
    pub button_hover: Color,
    /// The chip behind a pressed button.
    pub button_active: Color,
    /// The outline of the chip behind a hovered button.
    pub button_hover_border: Color,
    /// The chip behind a checked button.
    pub button_selected: Color,

    /// The close button chip.
    pub close: Color,
    /// The close button chip while hovered.
    pub close_hover: Color,
    /// The close button chip while pressed.
    pub close_active: Color,
}

/// The Light palette.
pub const LIGHT: ColorSet = ColorSet {
    title_font: Color::from_argb(0xf1525d76),
    title_font_inactive: Color::from_argb(0x7f525d76),
    title_bar: Color::from_rgb(0xe7e8eb),
    outline: Color::from_argb(0x1a000000),
    highlight: Color::from_rgb(0xeff0f2),

    icon: Color::from_rgb(0x90949e),
    icon_unfocused: Color::from_rgb(0xb6b8c0),
    icon_hover: Color::from_rgb(0x7a7f8b),
    icon_active: Color::from_rgb(0xffffff),

    button_hover: Color::from_rgb(0xfdfdfd),
    button_active: Color::from_rgb(0x5294e2),
    button_hover_border: Color::from_rgb(0xd1d3da),
    button_selected: Color::from_rgb(0x5294e2),

    close: Color::from_rgb(0xf46067),
    close_hover: Color::from_rgb(0xf68086),
    close_active: Color::from_rgb(0xf13039),
};

/// The Dark palette.
pub const DARK: ColorSet = ColorSet {
    title_font: Color::from_argb(0xf1cfdae7),
    title_font_inactive: Color::from_argb(0x7fcfdae7),
    title_bar: Color::from_rgb(0x2f343f),
    outline: Color::from_rgb(0x1d2027),
    highlight: Color::from_rgb(0x363b48),

    icon: Color::from_rgb(0x90939b),
    icon_unfocused: Color::from_rgb(0x666a74),
    icon_hover: Color::from_rgb(0xc4c7cc),
    icon_active: Color::from_rgb(0xffffff),

    button_hover: Color::from_rgb(0x454c5c),
    button_active: Color::from_rgb(0x5294e2),
    button_hover_border: Color::from_rgb(0x262932),
    button_selected: Color::from_rgb(0x5294e2),

    close: Color::from_rgb(0xcc575d),
    close_hover: Color::from_rgb(0xd7787d),
    close_active: Color::from_rgb(0xbe3841),
};

/// Returns the palette for `theme`.
pub const fn colors_for(theme: Theme) -> &'static ColorSet {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}

impl ColorSet {
    /// The caption color.
    ///
    /// While a focus animation is running, pass its eased value as `progress`
    /// to fade between the inactive and active colors. Otherwise the color
    /// snaps to whichever matches `active`.
    pub fn font_color(&self, active: bool, progress: Option<f64>) -> Color {
        match progress {
            Some(v) => Color::mix(self.title_font_inactive, self.title_font, v),
            None if active => self.title_font,
            None => self.title_font_inactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_total() {
        assert_eq!(colors_for(Theme::Light), &LIGHT);
        assert_eq!(colors_for(Theme::Dark), &DARK);
        assert_eq!(DARK.title_bar, "#2f343f".parse().unwrap());
        assert_eq!(LIGHT.outline.alpha(), 0x1a);
    }

    #[test]
    fn test_font_color() {
        assert_eq!(DARK.font_color(true, None), DARK.title_font);
        assert_eq!(DARK.font_color(false, None), DARK.title_font_inactive);
        assert_eq!(DARK.font_color(true, Some(0.0)), DARK.title_font_inactive);
        assert_eq!(DARK.font_color(false, Some(1.0)), DARK.title_font);

        let mid = DARK.font_color(true, Some(0.5)).alpha();
        assert!(mid > 0x7f && mid < 0xf1);
    }
}
