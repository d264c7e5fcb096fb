/*!
 # Tone variants

 Secondary and background colors derived from the primary color.
*/

use crate::color::{dim, shift_hue, Color};
use crate::config::{StripConfig, Timestamp};
use crate::day_cycle::primary_color;

/// Primary color rotated by the secondary angle
pub fn secondary_color(config: &StripConfig, at: &Timestamp) -> Color {
    secondary_of(config, primary_color(config, at))
}

/// Primary color rotated by the background angle, then desaturated and dimmed
pub fn background_color(config: &StripConfig, at: &Timestamp) -> Color {
    background_of(config, primary_color(config, at))
}

/// Secondary tone of an already computed primary color
pub fn secondary_of(config: &StripConfig, primary: Color) -> Color {
    shift_hue(primary, config.secondary_angle)
}

/// Background tone of an already computed primary color
///
/// Lightness drops by a whole-point quarter of the dim (25 dims lightness by 6).
pub fn background_of(config: &StripConfig, primary: Color) -> Color {
    dim(
        shift_hue(primary, config.background_angle),
        config.background_dim,
        (config.background_dim / 4.0).floor(),
    )
}

/// The three colors a strip is painted with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tones {
    /// Color of an event after free time
    pub primary: Color,
    /// Alternate color for an event right after another one
    pub secondary: Color,
    /// Color of free time
    pub background: Color,
}

impl Tones {
    /// Evaluates all tones for the time `at`
    pub fn at(config: &StripConfig, at: &Timestamp) -> Self {
        let primary = primary_color(config, at);
        Self {
            primary,
            secondary: secondary_of(config, primary),
            background: background_of(config, primary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{to_hex, to_hsl, to_rgb, Hsl};
    use chrono::DateTime;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn nine_am() -> Timestamp {
        DateTime::parse_from_rfc3339("2024-01-01T09:00:00+00:00").unwrap()
    }

    fn hue(color: Color) -> f32 {
        to_hsl(color).hue.into_positive_degrees()
    }

    #[test]
    fn tones_match_the_free_functions() {
        let config = StripConfig::default();
        let tones = Tones::at(&config, &nine_am());
        assert_eq!(tones.primary, primary_color(&config, &nine_am()));
        assert_eq!(tones.secondary, secondary_color(&config, &nine_am()));
        assert_eq!(tones.background, background_color(&config, &nine_am()));
    }

    #[test]
    fn secondary_is_rotated_by_the_secondary_angle() {
        let config = StripConfig::default();
        let tones = Tones::at(&config, &nine_am());
        let delta = (hue(tones.secondary) - hue(tones.primary)).rem_euclid(360.0);
        assert!((delta - 40.0).abs() < 0.5, "delta was {delta}");
    }

    #[test]
    fn background_is_complementary_and_darker() {
        let config = StripConfig::default();
        let tones = Tones::at(&config, &nine_am());
        let delta = (hue(tones.background) - hue(tones.primary)).rem_euclid(360.0);
        assert!((delta - 180.0).abs() < 0.5, "delta was {delta}");

        let primary = to_hsl(tones.primary);
        let background = to_hsl(tones.background);
        assert!((primary.saturation - background.saturation - 0.25).abs() < 0.01);
        assert!((primary.lightness - background.lightness - 0.06).abs() < 0.005);
    }

    #[test]
    fn zero_angles_and_dim_collapse_to_primary() {
        let config = StripConfig::default()
            .with_secondary_angle(0.0)
            .with_background_angle(0.0)
            .with_background_dim(0.0);
        let tones = Tones::at(&config, &nine_am());
        assert_eq!(to_hex(tones.secondary), to_hex(tones.primary));
        assert_eq!(to_hex(tones.background), to_hex(tones.primary));
    }

    #[test_case(25.0, 0.19 ; "default dim drops six points")]
    #[test_case(10.0, 0.23 ; "quarter rounds down")]
    #[test_case(-6.0, 0.27 ; "negative dim rounds toward brighter")]
    fn background_lightness_uses_whole_point_quarter(background_dim: f32, expected: f32) {
        let config = StripConfig::default()
            .with_background_angle(0.0)
            .with_background_dim(background_dim);
        let primary = to_rgb(Hsl::new(200.0, 0.5, 0.25));
        let background = to_hsl(background_of(&config, primary));
        assert!(
            (background.lightness - expected).abs() < 0.001,
            "lightness was {}",
            background.lightness
        );
    }

    #[test]
    fn tones_of_the_workday_scenario() {
        let config = StripConfig::default();
        let tones = Tones::at(&config, &nine_am());
        assert_eq!(to_hex(tones.primary), "#2ACC51");
        assert_eq!(to_hex(tones.secondary), "#2ACCBD");
        assert_eq!(to_hex(tones.background), "#984083");
    }
}
