//! Basic core types used throughout this crate at a high level.

pub mod geometry;

pub use geometry::*;

use std::any::Any;
use std::collections::HashMap;
use std::str::FromStr;

use thiserror::Error;

/// The result type used throughout toarudeco.
pub type Result<T> = ::core::result::Result<T, DecoError>;

/// The errors toarudeco can return.
///
/// Painting and geometry never fail. Errors only come out of loading
/// configuration, and out of allocating pixmaps.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecoError {
    /// A string that does not name a color.
    #[error("invalid color {0:?}")]
    InvalidColor(String),
    /// A configuration that failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A configuration key holding a value of the wrong type.
    #[error("key {key:?} should hold a {expected}")]
    KeyType {
        /// The offending key.
        key: String,
        /// What the key should hold.
        expected: &'static str,
    },
    /// A pixmap could not be allocated.
    #[error("could not allocate a {width}x{height} pixmap")]
    Allocation {
        /// The requested width.
        width: u32,
        /// The requested height.
        height: u32,
    },
}

/// A general dictionary type that can store most variable-value mappings.
pub type Dict = HashMap<String, Box<dyn Any>>;

/// Macro for quick-creating a new Dict.
///
/// Note: The value you insert should not be boxed, as this macro
/// creates a new Box around `$val`.
#[macro_export]
macro_rules! dict {
    {} => {$crate::types::Dict::new()};
    {$($key:expr => $val:expr),+ $(,)?} => {
        {
            let mut __dict = $crate::types::Dict::new();

            $(
                __dict.insert(String::from($key), Box::new($val) as Box<dyn ::std::any::Any>);
            )+

            __dict
        }
    };
}

/// Specifies a direction.
///
/// Animations run `Forward` towards a progress of 1, and `Backward` towards 0.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

bitflags! {
    /// A set of screen edges that a window touches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Edges: u8 {
        /// The left screen edge.
        const LEFT   = 1 << 0;
        /// The top screen edge.
        const TOP    = 1 << 1;
        /// The right screen edge.
        const RIGHT  = 1 << 2;
        /// The bottom screen edge.
        const BOTTOM = 1 << 3;
    }
}

/// A representation of a color, following the RGBA model.
///
/// The color is stored as a single `0xRRGGBBAA` integer and is not
/// premultiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(u32);

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color(0);
    /// Opaque black.
    pub const BLACK: Color = Color(0x0000_00ff);
    /// Opaque white.
    pub const WHITE: Color = Color(0xffff_ffff);

    /// Creates an opaque Color from a `0xRRGGBB` integer.
    pub const fn from_rgb(rgb: u32) -> Self {
        Self((rgb << 8) | 0xff)
    }

    /// Creates a Color from an `0xAARRGGBB` integer, the layout used by
    /// most toolkit color strings.
    pub const fn from_argb(argb: u32) -> Self {
        Self((argb << 8) | (argb >> 24))
    }

    /// Creates a Color from its components.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(u32::from_be_bytes([r, g, b, a]))
    }

    /// Returns the (R, G, B, A) values of the Color
    /// as bytes.
    pub fn rgba(&self) -> (u8, u8, u8, u8) {
        let [r, g, b, a] = u32::to_be_bytes(self.0);
        (r, g, b, a)
    }

    /// Returns the alpha component of the Color.
    pub fn alpha(&self) -> u8 {
        self.rgba().3
    }

    /// Returns the same color with its alpha replaced by `alpha`,
    /// given as a proportion in `[0, 1]`.
    #[must_use]
    pub fn with_alpha_f(&self, alpha: f64) -> Self {
        let (r, g, b, _) = self.rgba();
        Self::from_rgba8(r, g, b, unit_to_byte(alpha))
    }

    /// Returns the same color with its alpha multiplied by `factor`.
    #[must_use]
    pub fn scale_alpha(&self, factor: f64) -> Self {
        let (r, g, b, a) = self.rgba();
        Self::from_rgba8(r, g, b, unit_to_byte(a as f64 / 255.0 * factor))
    }

    /// Linearly interpolates between `from` and `to` in device RGBA.
    ///
    /// `t` is clamped to `[0, 1]`; `t == 0` yields exactly `from` and
    /// `t == 1` yields exactly `to`.
    pub fn mix(from: Color, to: Color, t: f64) -> Color {
        if t.is_nan() || t <= 0.0 {
            return from
        }
        if t >= 1.0 {
            return to
        }

        let (r1, g1, b1, a1) = from.rgba();
        let (r2, g2, b2, a2) = to.rgba();
        let lerp = |a: u8, b: u8| -> u8 {
            let v = a as f64 * (1.0 - t) + b as f64 * t;
            v.round().clamp(0.0, 255.0) as u8
        };

        Color::from_rgba8(lerp(r1, r2), lerp(g1, g2), lerp(b1, b2), lerp(a1, a2))
    }
}

fn unit_to_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl FromStr for Color {
    type Err = DecoError;

    /// Parses `#rgb`, `#rrggbb` and `#aarrggbb` strings.
    fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
        let invalid = || DecoError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid())
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;

        match hex.len() {
            3 => {
                let (r, g, b) = ((value >> 8) & 0xf, (value >> 4) & 0xf, value & 0xf);
                Ok(Color::from_rgb((r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11))
            }
            6 => Ok(Color::from_rgb(value)),
            8 => Ok(Color::from_argb(value)),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!("#2f343f".parse::<Color>().unwrap(), Color::from_rgba8(0x2f, 0x34, 0x3f, 0xff));
        assert_eq!("#7fcfdae7".parse::<Color>().unwrap(), Color::from_rgba8(0xcf, 0xda, 0xe7, 0x7f));
        assert_eq!("#fff".parse::<Color>().unwrap(), Color::WHITE);
        assert!("2f343f".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("#zzzzzz".parse::<Color>().is_err());
    }

    #[test]
    fn test_mix_endpoints_and_symmetry() {
        let a = Color::from_argb(0x7fcfdae7);
        let b = Color::from_argb(0xf1cfdae7);

        assert_eq!(Color::mix(a, b, 0.0), a);
        assert_eq!(Color::mix(a, b, 1.0), b);
        assert_eq!(Color::mix(a, b, 0.25), Color::mix(b, a, 0.75));

        let mid = Color::mix(a, b, 0.5);
        assert!(mid.alpha() > a.alpha() && mid.alpha() < b.alpha());
    }

    #[test]
    fn test_alpha_helpers() {
        let c = Color::from_rgb(0x5294e2);
        assert_eq!(c.with_alpha_f(0.0).alpha(), 0);
        assert_eq!(c.scale_alpha(0.5).alpha(), 128);
        assert_eq!(c.with_alpha_f(1.0), c);
    }
}
