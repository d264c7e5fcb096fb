/*!
 # Color space helpers

 Pure conversions between RGB and HSL, plus the three transforms the strip
 needs: blending, hue rotation and dimming. Every function takes colors by
 value and returns a new one.

 Colors are `palette::Srgb` with channels in `0.0..=1.0`. HSL values are
 `palette::Hsl`, which stores saturation and lightness as fractions, so the
 percentage-point arguments of [`dim`] are divided by 100 first.
*/

use palette::{FromColor, RgbHue};
use tracing::warn;

use crate::{Error, Result};

/// RGB color used throughout the strip
pub type Color = palette::Srgb;

/// HSL representation of a [`Color`]
pub type Hsl = palette::Hsl;

/// Converts an RGB color to HSL
#[inline]
pub fn to_hsl(color: Color) -> Hsl {
    Hsl::from_color(color)
}

/// Converts an HSL color back to RGB
#[inline]
pub fn to_rgb(hsl: Hsl) -> Color {
    Color::from_color(hsl)
}

/// Linear interpolation per RGB channel: `a * (1 - weight) + b * weight`.
///
/// `weight` is clamped to `0.0..=1.0`, so `weight = 0` yields `a` and
/// `weight = 1` yields `b` exactly.
#[inline]
pub fn blend(a: Color, b: Color, weight: f32) -> Color {
    let weight = weight.clamp(0.0, 1.0);
    a * (1.0 - weight) + b * weight
}

/// Rotates the hue by `degrees`, wrapping into `0..360`
pub fn shift_hue(color: Color, degrees: f32) -> Color {
    let hsl = to_hsl(color);
    let hue = RgbHue::from_degrees(hsl.hue.into_degrees() + degrees).into_positive_degrees();
    to_rgb(Hsl::new(hue, hsl.saturation, hsl.lightness))
}

/// Lowers saturation and lightness by the given percentage points.
///
/// Results are clamped to `0..=100`.
pub fn dim(color: Color, saturation_delta: f32, lightness_delta: f32) -> Color {
    let hsl = to_hsl(color);
    let saturation = hsl.saturation * 100.0 - saturation_delta;
    let lightness = hsl.lightness * 100.0 - lightness_delta;

    if !(0.0..=100.0).contains(&saturation) || !(0.0..=100.0).contains(&lightness) {
        warn!(
            "Dimmed HSL out of range (s={:.1}, l={:.1}), clamping to 0..=100",
            saturation, lightness
        );
    }

    to_rgb(Hsl::new(
        hsl.hue,
        saturation.clamp(0.0, 100.0) / 100.0,
        lightness.clamp(0.0, 100.0) / 100.0,
    ))
}

/// Parses `#RRGGBB`, `RRGGBB` or `#RGB` into a color
pub fn parse_hex(value: &str) -> Result<Color> {
    value
        .trim()
        .parse::<palette::Srgb<u8>>()
        .map(|rgb| rgb.into_format())
        .map_err(|source| Error::InvalidColor {
            value: value.to_string(),
            source,
        })
}

/// Formats a color as an uppercase `#RRGGBB` code
pub fn to_hex(color: Color) -> String {
    let (red, green, blue) = to_rgb8(color);
    format!("#{red:02X}{green:02X}{blue:02X}")
}

/// Quantizes a color to 8-bit channels, as sent to LED drivers
pub fn to_rgb8(color: Color) -> (u8, u8, u8) {
    color.into_format::<u8>().into_components()
}
