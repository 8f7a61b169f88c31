//! Settings supplied by the host compositor.

use std::rc::Rc;

use custom_debug_derive::Debug;

use crate::window::ButtonKind;

/// Font measurements, provided by the host's text engine.
///
/// toarudeco never shapes or rasterizes text itself; it only needs to know
/// how much space a caption takes up.
pub trait FontMetrics {
    /// The height of a line of text.
    fn line_height(&self) -> i32;

    /// The advance width of `text` on a single line.
    fn text_width(&self, text: &str) -> i32;

    /// Shortens `text` to fit within `width` by replacing characters from its
    /// middle with an ellipsis.
    ///
    /// Returns `text` unchanged if it already fits, and an empty string if not
    /// even the ellipsis fits.
    fn elide_middle(&self, text: &str, width: i32) -> String {
        if self.text_width(text) <= width {
            return text.to_string()
        }

        let chars: Vec<char> = text.chars().collect();
        for keep in (0..chars.len()).rev() {
            let head = (keep + 1) / 2;
            let tail = keep / 2;
            let candidate: String = chars[..head]
                .iter()
                .chain(std::iter::once(&'…'))
                .chain(chars[chars.len() - tail..].iter())
                .collect();
            if self.text_width(&candidate) <= width {
                return candidate
            }
        }

        String::new()
    }
}

/// A monospaced [`FontMetrics`], with a fixed advance for every character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFontMetrics {
    /// The advance of each character.
    pub advance: i32,
    /// The line height.
    pub height: i32,
}

impl Default for FixedFontMetrics {
    fn default() -> Self {
        Self { advance: 7, height: 16 }
    }
}

impl FontMetrics for FixedFontMetrics {
    fn line_height(&self) -> i32 {
        self.height
    }

    fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * self.advance
    }
}

/// Settings owned by the host that affect every decoration.
///
/// These mirror what a compositor exposes to its decoration plugins:
/// spacing units derived from the system font, the button order chosen
/// by the user, and the capabilities of the compositing backend.
#[derive(Debug, Clone)]
pub struct DecorationSettings {
    /// The small spacing unit, used for paddings and margins.
    pub small_spacing: i32,
    /// The large spacing unit, used for outer margins and resize borders.
    pub large_spacing: i32,
    /// The grid unit, used for button sizes.
    pub grid_unit: i32,
    /// Whether the compositor can display translucent decorations.
    pub alpha_channel_supported: bool,
    /// The ratio of physical to logical pixels.
    pub device_pixel_ratio: f32,
    /// The buttons on the left of the title bar, in order.
    pub buttons_left: Vec<ButtonKind>,
    /// The buttons on the right of the title bar, in order.
    pub buttons_right: Vec<ButtonKind>,
    /// The caption font.
    #[debug(skip)]
    pub font: Rc<dyn FontMetrics>,
}

impl Default for DecorationSettings {
    fn default() -> Self {
        use ButtonKind::*;
        Self {
            small_spacing: 2,
            large_spacing: 10,
            grid_unit: 10,
            alpha_channel_supported: true,
            device_pixel_ratio: 1.0,
            buttons_left: vec![Menu, OnAllDesktops],
            buttons_right: vec![ContextHelp, Minimize, Maximize, Close],
            font: Rc::new(FixedFontMetrics::default()),
        }
    }
}

impl DecorationSettings {
    /// Replaces the caption font.
    pub fn with_font<F: FontMetrics + 'static>(mut self, font: F) -> Self {
        self.font = Rc::new(font);
        self
    }

    /// Replaces the button order.
    pub fn with_buttons<L, R>(mut self, left: L, right: R) -> Self
    where
        L: IntoIterator<Item = ButtonKind>,
        R: IntoIterator<Item = ButtonKind>,
    {
        self.buttons_left = left.into_iter().collect();
        self.buttons_right = right.into_iter().collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elide_middle() {
        let fm = FixedFontMetrics { advance: 10, height: 16 };

        assert_eq!(fm.elide_middle("short", 100), "short");
        assert_eq!(fm.elide_middle("abcdefghij", 50), "ab…ij");
        assert_eq!(fm.elide_middle("abcdefghij", 10), "…");
        assert_eq!(fm.elide_middle("abcdefghij", 5), "");
        assert_eq!(fm.elide_middle("", 0), "");
    }
}
