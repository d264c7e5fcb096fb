/*!
 # Strip configuration

 Immutable values describing how a strip is colored ([`StripConfig`]) and
 which stretch of time it covers ([`StripWindow`]).
*/

use chrono::{DateTime, FixedOffset, Local, TimeDelta};

use crate::color::{self, Color};
use crate::{Error, Result};

/// Timestamp type used for events and slots
pub type Timestamp = DateTime<FixedOffset>;

/// Default morning color, `#68D7FC`
pub const DEFAULT_MORNING_COLOR: &str = "#68D7FC";
/// Default evening color, `#1ECA2F`
pub const DEFAULT_EVENING_COLOR: &str = "#1ECA2F";
/// Default hue shift for adjacent events, in degrees
pub const DEFAULT_SECONDARY_ANGLE: f32 = 40.0;
/// Default hue shift for free time (complementary), in degrees
pub const DEFAULT_BACKGROUND_ANGLE: f32 = 180.0;
/// Default saturation dim for free time, in percentage points
pub const DEFAULT_BACKGROUND_DIM: f32 = 25.0;
/// Default number of LEDs on the strip
pub const DEFAULT_LENGTH: usize = 30;
/// Default window covered by the strip, in hours
pub const DEFAULT_HOURS: i64 = 24;

/// Colors and angles used to paint a strip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripConfig {
    /// Primary color at 19:00, the middle of the gradient
    pub morning_color: Color,
    /// Primary color at 07:00, where the gradient wraps
    pub evening_color: Color,
    /// Hue shift applied when two distinct events touch, in degrees
    pub secondary_angle: f32,
    /// Hue shift applied to free slots, in degrees
    pub background_angle: f32,
    /// Saturation dim for free slots in percentage points; lightness dims by a quarter of it
    pub background_dim: f32,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            morning_color: palette::Srgb::<u8>::new(0x68, 0xD7, 0xFC).into_format(),
            evening_color: palette::Srgb::<u8>::new(0x1E, 0xCA, 0x2F).into_format(),
            secondary_angle: DEFAULT_SECONDARY_ANGLE,
            background_angle: DEFAULT_BACKGROUND_ANGLE,
            background_dim: DEFAULT_BACKGROUND_DIM,
        }
    }
}

impl StripConfig {
    /// Creates a configuration from two hex colors, keeping the default angles and dim
    ///
    /// # Arguments
    ///
    /// * `morning` - Hex code of the morning color (e.g. `#68D7FC`)
    /// * `evening` - Hex code of the evening color (e.g. `#1ECA2F`)
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidColor`] if either code is malformed.
    pub fn from_hex(morning: &str, evening: &str) -> Result<Self> {
        Ok(Self {
            morning_color: color::parse_hex(morning)?,
            evening_color: color::parse_hex(evening)?,
            ..Self::default()
        })
    }

    /// Returns a copy with a different secondary hue shift
    #[must_use]
    pub fn with_secondary_angle(self, degrees: f32) -> Self {
        Self {
            secondary_angle: degrees,
            ..self
        }
    }

    /// Returns a copy with a different background hue shift
    #[must_use]
    pub fn with_background_angle(self, degrees: f32) -> Self {
        Self {
            background_angle: degrees,
            ..self
        }
    }

    /// Returns a copy with a different background dim
    #[must_use]
    pub fn with_background_dim(self, points: f32) -> Self {
        Self {
            background_dim: points,
            ..self
        }
    }
}

/// Window of time covered by one strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripWindow {
    /// Time of the first slot
    pub start: Timestamp,
    /// Total time covered by all slots
    pub duration: TimeDelta,
    /// Number of slots (LEDs)
    pub length: usize,
}

impl Default for StripWindow {
    fn default() -> Self {
        Self {
            start: Local::now().fixed_offset(),
            duration: TimeDelta::hours(DEFAULT_HOURS),
            length: DEFAULT_LENGTH,
        }
    }
}

impl StripWindow {
    /// Creates a window starting at `start`
    pub fn new(start: Timestamp, duration: TimeDelta, length: usize) -> Self {
        Self {
            start,
            duration,
            length,
        }
    }

    /// End of the window, `start + duration`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDuration`] when the end falls outside the
    /// supported calendar range.
    pub fn end(&self) -> Result<Timestamp> {
        self.start
            .checked_add_signed(self.duration)
            .ok_or(Error::InvalidDuration(self.duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::to_hex;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_matches_documented_constants() {
        let config = StripConfig::default();
        assert_eq!(to_hex(config.morning_color), DEFAULT_MORNING_COLOR);
        assert_eq!(to_hex(config.evening_color), DEFAULT_EVENING_COLOR);
        assert_eq!(config.secondary_angle, 40.0);
        assert_eq!(config.background_angle, 180.0);
        assert_eq!(config.background_dim, 25.0);
    }

    #[test]
    fn from_hex_with_defaults_equals_default() {
        let config = StripConfig::from_hex(DEFAULT_MORNING_COLOR, DEFAULT_EVENING_COLOR).unwrap();
        assert_eq!(config, StripConfig::default());
    }

    #[test]
    fn from_hex_rejects_bad_evening_color() {
        let result = StripConfig::from_hex("#68D7FC", "evening");
        assert!(matches!(result, Err(Error::InvalidColor { value, .. }) if value == "evening"));
    }

    #[test]
    fn builders_leave_other_fields_untouched() {
        let config = StripConfig::default()
            .with_secondary_angle(90.0)
            .with_background_dim(10.0);
        assert_eq!(config.secondary_angle, 90.0);
        assert_eq!(config.background_dim, 10.0);
        assert_eq!(config.background_angle, DEFAULT_BACKGROUND_ANGLE);
    }

    #[test]
    fn default_window_covers_a_day_in_thirty_slots() {
        let window = StripWindow::default();
        assert_eq!(window.length, 30);
        assert_eq!(window.end().unwrap() - window.start, TimeDelta::hours(24));
    }

    #[test]
    fn window_end_past_the_calendar_range_is_an_error() {
        let window = StripWindow::new(Local::now().fixed_offset(), TimeDelta::MAX, 30);
        assert!(matches!(window.end(), Err(Error::InvalidDuration(_))));
    }
}
