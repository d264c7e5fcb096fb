/*!
 # Day/night gradient

 Maps a timestamp to the strip's primary color. The day is anchored at
 07:00: the gradient starts at the evening color, reaches the morning color
 twelve hours later and returns to the evening color by the next 07:00.
*/

use chrono::Timelike;
use tracing::trace;

use crate::color::{blend, Color};
use crate::config::{StripConfig, Timestamp};

/// Time of day the gradient is anchored at
pub const REFERENCE_HOUR: u32 = 7;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Position of `at` within a 24 hour cycle starting at 07:00, folded into `0..=1`
///
/// Uses the local time of the timestamp's own offset.
pub fn day_fraction(at: &Timestamp) -> f64 {
    let since_midnight = f64::from(at.num_seconds_from_midnight())
        + f64::from(at.nanosecond()) / 1_000_000_000.0;
    let since_reference = since_midnight - f64::from(REFERENCE_HOUR * 3600);
    fold_fraction(since_reference / SECONDS_PER_DAY)
}

/// Folds a fraction into `0..=1` by whole days
///
/// Exactly `1.0` is left as is; it paints the same color as `0.0`.
pub fn fold_fraction(mut fraction: f64) -> f64 {
    while fraction > 1.0 {
        fraction -= 1.0;
    }
    while fraction < 0.0 {
        fraction += 1.0;
    }
    fraction
}

/// Gradient color for a folded day fraction
pub fn gradient_at(config: &StripConfig, fraction: f64) -> Color {
    // Single precision is plenty for 8-bit output
    #[allow(clippy::cast_possible_truncation)]
    let fraction = fraction as f32;
    if fraction < 0.5 {
        blend(config.evening_color, config.morning_color, fraction * 2.0)
    } else {
        blend(config.morning_color, config.evening_color, (fraction - 0.5) * 2.0)
    }
}

/// Primary color of the strip at time `at`
pub fn primary_color(config: &StripConfig, at: &Timestamp) -> Color {
    let fraction = day_fraction(at);
    trace!("Day fraction at {} is {:.4}", at, fraction);
    gradient_at(config, fraction)
}
