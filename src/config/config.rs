//! The decoration configuration object.

use std::any::Any;
use std::str::FromStr;
use std::time::Duration;

use strum::{Display, EnumIter, EnumString, FromRepr};
use tracing::{instrument, warn};

use crate::types::Color;
use crate::{DecoError, Result};

use super::ConfigSection;

/// The longest animation duration a config may specify.
pub const MAX_ANIMATION_DURATION: Duration = Duration::from_secs(5);

/// An enum option that can be read from a numeric index.
///
/// Hosts commonly persist enum options as integers. Indices that do not
/// name a variant never fail to load: they map to [`FALLBACK`](ConfigEnum::FALLBACK).
pub trait ConfigEnum: Copy + FromStr + 'static {
    /// The value used for indices that do not name a variant.
    const FALLBACK: Self;

    /// The variant with discriminant `index`, if any.
    fn from_discriminant(index: i64) -> Option<Self>;

    /// The variant with discriminant `index`, or the fallback.
    fn from_index(index: i64) -> Self {
        Self::from_discriminant(index).unwrap_or(Self::FALLBACK)
    }
}

macro_rules! __impl_config_enum {
    ($($name:ident => $fallback:ident),+ $(,)?) => {
        $(
            impl ConfigEnum for $name {
                const FALLBACK: Self = $name::$fallback;

                fn from_discriminant(index: i64) -> Option<Self> {
                    u8::try_from(index).ok().and_then($name::from_repr)
                }
            }
        )+
    };
}

/// The width of the window border, as a multiple of the small spacing unit.
///
/// Sizes are ordered from thinnest to thickest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Display, EnumString, EnumIter, FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum BorderSize {
    None,
    NoSides,
    Tiny,
    #[default]
    Normal,
    Large,
    VeryLarge,
    Huge,
    VeryHuge,
    Oversized,
}

impl BorderSize {
    /// The border width in multiples of the small spacing unit.
    pub fn multiplier(&self) -> i32 {
        use BorderSize::*;
        match self {
            None | NoSides => 0,
            Tiny => 1,
            Normal => 2,
            Large => 3,
            VeryLarge => 4,
            Huge => 5,
            VeryHuge => 6,
            Oversized => 10,
        }
    }
}

/// The size of title bar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Display, EnumString, EnumIter, FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum ButtonSize {
    Tiny,
    Small,
    #[default]
    Default,
    Large,
    VeryLarge,
}

impl ButtonSize {
    /// The button height in multiples of the grid unit.
    pub fn multiplier(&self) -> f64 {
        use ButtonSize::*;
        match self {
            Tiny => 1.0,
            Small => 1.5,
            Default => 2.0,
            Large => 2.5,
            VeryLarge => 3.5,
        }
    }
}

/// Where the caption is placed in the title bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Display, EnumString, EnumIter, FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TitleAlignment {
    /// Against the left button group.
    Left,
    /// Centered between the button groups.
    Center,
    /// Centered on the whole title bar, unless that would overlap a button.
    #[default]
    CenterFullWidth,
    /// Against the right button group.
    Right,
}

/// The size of the drop shadow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Display, EnumString, EnumIter, FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum ShadowSize {
    None,
    Small,
    Medium,
    #[default]
    Large,
    VeryLarge,
}

/// The color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Display, EnumString, EnumIter, FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// The glyph set drawn on title bar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Display, EnumString, EnumIter, FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum IconStyle {
    /// Pins, dot grids and tabs.
    #[default]
    Classic,
    /// Simple dots and triangles, as drawn by Aurorae themes.
    Aurorae,
}

__impl_config_enum! {
    BorderSize => Tiny,
    ButtonSize => Default,
    TitleAlignment => CenterFullWidth,
    ShadowSize => Large,
    Theme => Light,
    IconStyle => Classic,
}

/// The configuration of every decoration drawn by toarudeco.
///
/// A `DecorationConfig` is an immutable snapshot: when the user changes
/// their settings, the host builds a new one and hands it to each decoration
/// with [`on_configuration_reconfigured`][1].
///
/// # Construction
///
/// Use [`DecorationConfig::load`] to read one from a [`ConfigSection`],
/// or [`DecorationConfig::builder`] to build one in code.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use toarudeco::config::{DecorationConfig, Theme, NO_CHECKS};
///
/// let config = DecorationConfig::builder()
///     .theme(Theme::Dark)
///     .animations_duration(Duration::from_millis(200))
///     .finish(NO_CHECKS)
///     .expect("invalid config");
///
/// assert_eq!(config.theme, Theme::Dark);
/// ```
///
/// [1]: crate::decoration::Decoration::on_configuration_reconfigured
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationConfig {
    /// The width of the window border.
    pub border_size: BorderSize,
    /// The size of title bar buttons.
    pub button_size: ButtonSize,
    /// Where the caption is placed.
    pub title_alignment: TitleAlignment,
    /// Hide the title bar of windows that are not shaded.
    pub hide_title_bar: bool,
    /// Keep drawing borders on maximized windows.
    pub draw_border_on_maximized: bool,
    /// The size of the drop shadow.
    pub shadow_size: ShadowSize,
    /// The opacity of the drop shadow.
    pub shadow_strength: u8,
    /// The color of the drop shadow.
    pub shadow_color: Color,
    /// Whether state changes are animated.
    pub animations_enabled: bool,
    /// How long a state change animation takes.
    pub animations_duration: Duration,
    /// The color theme.
    pub theme: Theme,
    /// The glyph set drawn on buttons.
    pub icon_style: IconStyle,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            border_size: BorderSize::default(),
            button_size: ButtonSize::default(),
            title_alignment: TitleAlignment::default(),
            hide_title_bar: false,
            draw_border_on_maximized: false,
            shadow_size: ShadowSize::default(),
            shadow_strength: 255,
            shadow_color: Color::BLACK,
            animations_enabled: true,
            animations_duration: Duration::from_millis(150),
            theme: Theme::default(),
            icon_style: IconStyle::default(),
        }
    }
}

//* Same trick as the window manager config: an Option<F> would
//* need a type annotation every time None is passed.
/// A const function that simply returns Ok. Pass this into validate if you have no
/// user-defined checks to run.
pub const fn no_checks(_: &DecorationConfig) -> Result<()> {
    Ok(())
}

/// [`no_checks`] as a function pointer.
pub const NO_CHECKS: fn(&DecorationConfig) -> Result<()> = no_checks;

impl DecorationConfig {
    /// Returns the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a [`DecorationConfigBuilder`] to build your config with the
    /// 'builder' idiom.
    pub fn builder() -> DecorationConfigBuilder {
        DecorationConfigBuilder::new()
    }

    /// Checks the configuration to verify that all invariants are upheld,
    /// then runs `checks`.
    pub fn validate<F>(&self, checks: F) -> Result<()>
    where
        F: FnOnce(&DecorationConfig) -> Result<()>,
    {
        if self.animations_duration > MAX_ANIMATION_DURATION {
            return Err(DecoError::InvalidConfig(format!(
                "animation duration of {}ms exceeds {}ms",
                self.animations_duration.as_millis(),
                MAX_ANIMATION_DURATION.as_millis()
            )))
        }
        checks(self)
    }

    /// Reads a configuration from `section`, never failing.
    ///
    /// Keys that are missing keep their default value. Keys holding a value
    /// that cannot be understood are logged and also keep their default,
    /// except numeric enum indices that name no variant, which map to
    /// that option's [`ConfigEnum::FALLBACK`]. An animation duration longer
    /// than [`MAX_ANIMATION_DURATION`] is replaced by the default duration.
    #[instrument(target = "config", level = "trace", skip_all)]
    pub fn load(section: &dyn ConfigSection) -> Self {
        let loaded = Self::read_keys(section, |e| {
            warn!(target: "config", "{e}, using default");
            Ok(())
        });

        let mut config = match loaded {
            Ok(config) => config,
            Err(e) => {
                warn!(target: "config", "{e}, using default config");
                return Self::default()
            }
        };
        if let Err(e) = config.validate(NO_CHECKS) {
            warn!(target: "config", "{e}, using default");
            config.animations_duration = Self::default().animations_duration;
        }
        config
    }

    /// Reads a configuration from `section`, failing on the first key
    /// holding a value that cannot be understood.
    pub fn try_load(section: &dyn ConfigSection) -> Result<Self> {
        let config = Self::read_keys(section, Err)?;
        config.validate(NO_CHECKS)?;
        Ok(config)
    }

    fn read_keys<F>(section: &dyn ConfigSection, mut on_err: F) -> Result<Self>
    where
        F: FnMut(DecoError) -> Result<()>,
    {
        let mut cfg = Self::default();

        macro_rules! read {
            ($reader:ident, $key:literal, $field:ident) => {
                match $reader(section, $key) {
                    Ok(Some(v)) => cfg.$field = v,
                    Ok(None) => {}
                    Err(e) => on_err(e)?,
                }
            };
        }

        read!(read_enum, "BorderSize", border_size);
        read!(read_enum, "ButtonSize", button_size);
        read!(read_enum, "TitleAlignment", title_alignment);
        read!(read_bool, "HideTitleBar", hide_title_bar);
        read!(read_bool, "DrawBorderOnMaximizedWindows", draw_border_on_maximized);
        read!(read_enum, "ShadowSize", shadow_size);
        read!(read_strength, "ShadowStrength", shadow_strength);
        read!(read_color, "ShadowColor", shadow_color);
        read!(read_bool, "AnimationsEnabled", animations_enabled);
        read!(read_duration, "AnimationsDuration", animations_duration);
        read!(read_enum, "Theme", theme);
        read!(read_enum, "IconStyle", icon_style);

        Ok(cfg)
    }
}

fn type_error(key: &str, expected: &'static str) -> DecoError {
    DecoError::KeyType { key: key.into(), expected }
}

fn as_str(value: &dyn Any) -> Option<&str> {
    value
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| value.downcast_ref::<String>().map(String::as_str))
}

fn as_int(value: &dyn Any) -> Option<i64> {
    value
        .downcast_ref::<i32>()
        .map(|v| *v as i64)
        .or_else(|| value.downcast_ref::<i64>().copied())
        .or_else(|| value.downcast_ref::<u32>().map(|v| *v as i64))
        .or_else(|| value.downcast_ref::<u8>().map(|v| *v as i64))
}

fn read_enum<E: ConfigEnum>(section: &dyn ConfigSection, key: &str) -> Result<Option<E>> {
    let Some(value) = section.get_key(key) else {
        return Ok(None)
    };

    if let Some(v) = value.downcast_ref::<E>() {
        return Ok(Some(*v))
    }
    if let Some(index) = as_int(value) {
        let parsed = E::from_discriminant(index);
        if parsed.is_none() {
            warn!(target: "config", "{key}: unknown index {index}, falling back");
        }
        return Ok(Some(parsed.unwrap_or(E::FALLBACK)))
    }
    if let Some(s) = as_str(value) {
        return s
            .parse::<E>()
            .map(Some)
            .map_err(|_| DecoError::InvalidConfig(format!("{key}: unknown value {s:?}")))
    }

    Err(type_error(key, "enum variant, name or index"))
}

fn read_bool(section: &dyn ConfigSection, key: &str) -> Result<Option<bool>> {
    match section.get_key(key) {
        None => Ok(None),
        Some(v) => v
            .downcast_ref::<bool>()
            .copied()
            .map(Some)
            .ok_or_else(|| type_error(key, "bool")),
    }
}

fn read_strength(section: &dyn ConfigSection, key: &str) -> Result<Option<u8>> {
    let Some(value) = section.get_key(key) else {
        return Ok(None)
    };
    let int = as_int(value).ok_or_else(|| type_error(key, "integer"))?;

    if !(0..=255).contains(&int) {
        warn!(target: "config", "{key}: {int} out of range, clamping");
    }
    Ok(Some(int.clamp(0, 255) as u8))
}

fn read_color(section: &dyn ConfigSection, key: &str) -> Result<Option<Color>> {
    let Some(value) = section.get_key(key) else {
        return Ok(None)
    };

    if let Some(c) = value.downcast_ref::<Color>() {
        return Ok(Some(*c))
    }
    if let Some(s) = as_str(value) {
        return s.parse::<Color>().map(Some)
    }
    Err(type_error(key, "Color or color string"))
}

fn read_duration(section: &dyn ConfigSection, key: &str) -> Result<Option<Duration>> {
    let Some(value) = section.get_key(key) else {
        return Ok(None)
    };

    if let Some(d) = value.downcast_ref::<Duration>() {
        return Ok(Some(*d))
    }
    match as_int(value) {
        Some(ms) if ms >= 0 => Ok(Some(Duration::from_millis(ms as u64))),
        Some(ms) => Err(DecoError::InvalidConfig(format!("{key}: negative duration {ms}ms"))),
        None => Err(type_error(key, "Duration or milliseconds")),
    }
}

/// A helper type to construct a [`DecorationConfig`].
#[derive(Debug, Clone, Default)]
pub struct DecorationConfigBuilder {
    inner: DecorationConfig,
}

impl DecorationConfigBuilder {
    /// Creates a new builder, starting from the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the border size.
    pub fn border_size(mut self, border_size: BorderSize) -> Self {
        self.inner.border_size = border_size;
        self
    }

    /// Sets the button size.
    pub fn button_size(mut self, button_size: ButtonSize) -> Self {
        self.inner.button_size = button_size;
        self
    }

    /// Sets the caption alignment.
    pub fn title_alignment(mut self, title_alignment: TitleAlignment) -> Self {
        self.inner.title_alignment = title_alignment;
        self
    }

    /// Sets whether title bars are hidden.
    pub fn hide_title_bar(mut self, hide_title_bar: bool) -> Self {
        self.inner.hide_title_bar = hide_title_bar;
        self
    }

    /// Sets whether maximized windows keep their borders.
    pub fn draw_border_on_maximized(mut self, draw: bool) -> Self {
        self.inner.draw_border_on_maximized = draw;
        self
    }

    /// Sets the shadow size.
    pub fn shadow_size(mut self, shadow_size: ShadowSize) -> Self {
        self.inner.shadow_size = shadow_size;
        self
    }

    /// Sets the shadow strength.
    pub fn shadow_strength(mut self, shadow_strength: u8) -> Self {
        self.inner.shadow_strength = shadow_strength;
        self
    }

    /// Sets the shadow color.
    pub fn shadow_color(mut self, shadow_color: Color) -> Self {
        self.inner.shadow_color = shadow_color;
        self
    }

    /// Sets whether animations are enabled.
    pub fn animations_enabled(mut self, enabled: bool) -> Self {
        self.inner.animations_enabled = enabled;
        self
    }

    /// Sets the animation duration.
    pub fn animations_duration(mut self, duration: Duration) -> Self {
        self.inner.animations_duration = duration;
        self
    }

    /// Sets the color theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.inner.theme = theme;
        self
    }

    /// Sets the icon style.
    pub fn icon_style(mut self, icon_style: IconStyle) -> Self {
        self.inner.icon_style = icon_style;
        self
    }

    /// Finishes Config construction, validates it and returns
    /// a completed config if validation is successful.
    ///
    /// You can supply an additional `check` to run
    /// additional code to validate your config.
    pub fn finish<F>(self, check: F) -> Result<DecorationConfig>
    where
        F: FnOnce(&DecorationConfig) -> Result<()>,
    {
        let config = self.inner;
        config.validate(check)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict;

    #[test]
    fn test_from_index_fallbacks() {
        assert_eq!(ShadowSize::from_index(1), ShadowSize::Small);
        assert_eq!(ShadowSize::from_index(42), ShadowSize::Large);
        assert_eq!(ShadowSize::from_index(-1), ShadowSize::Large);
        assert_eq!(BorderSize::from_index(99), BorderSize::Tiny);
        assert_eq!(ButtonSize::from_index(7), ButtonSize::Default);
        assert_eq!(TitleAlignment::from_index(9), TitleAlignment::CenterFullWidth);
        assert_eq!(Theme::from_index(3), Theme::Light);
    }

    #[test]
    fn test_builder_validation() {
        let ok = DecorationConfig::builder()
            .animations_duration(Duration::from_millis(250))
            .finish(NO_CHECKS);
        assert!(ok.is_ok());

        let too_long = DecorationConfig::builder()
            .animations_duration(Duration::from_secs(6))
            .finish(NO_CHECKS);
        assert!(matches!(too_long, Err(DecoError::InvalidConfig(_))));

        let rejected = DecorationConfig::builder().finish(|cfg| {
            if cfg.shadow_strength == 255 {
                Err(DecoError::InvalidConfig("too strong".into()))
            } else {
                Ok(())
            }
        });
        assert!(rejected.is_err());
    }

    #[test_log::test]
    fn test_load_mixed_types() {
        let section = dict! {
            "BorderSize" => "Large",
            "ButtonSize" => 3i32,
            "ShadowSize" => 17i32,
            "ShadowStrength" => 300i32,
            "ShadowColor" => "#80ff0000",
            "AnimationsDuration" => 200i32,
            "Theme" => Theme::Dark,
            "HideTitleBar" => true,
        };

        let config = DecorationConfig::load(&section);

        assert_eq!(config.border_size, BorderSize::Large);
        assert_eq!(config.button_size, ButtonSize::Large);
        assert_eq!(config.shadow_size, ShadowSize::Large);
        assert_eq!(config.shadow_strength, 255);
        assert_eq!(config.shadow_color, Color::from_rgba8(0xff, 0, 0, 0x80));
        assert_eq!(config.animations_duration, Duration::from_millis(200));
        assert_eq!(config.theme, Theme::Dark);
        assert!(config.hide_title_bar);
        assert!(config.animations_enabled);
    }

    #[test_log::test]
    fn test_load_is_fail_soft() {
        let section = dict! {
            "Theme" => "Solarized",
            "ShadowColor" => "not a color",
            "AnimationsEnabled" => 1i32,
            "TitleAlignment" => "Left",
        };

        let config = DecorationConfig::load(&section);
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.shadow_color, Color::BLACK);
        assert!(config.animations_enabled);
        assert_eq!(config.title_alignment, TitleAlignment::Left);

        let strict = DecorationConfig::try_load(&section);
        assert!(strict.is_err());
    }

    #[test_log::test]
    fn test_load_rejects_long_durations() {
        let section = dict! {
            "Theme" => Theme::Dark,
            "ShadowSize" => ShadowSize::Small,
            "AnimationsDuration" => 60_000i32,
        };

        let config = DecorationConfig::load(&section);
        assert_eq!(config.animations_duration, DecorationConfig::default().animations_duration);
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.shadow_size, ShadowSize::Small);
        assert!(matches!(
            DecorationConfig::try_load(&section),
            Err(DecoError::InvalidConfig(_))
        ));
    }
}
