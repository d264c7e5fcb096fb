/*!
 # Calendar Light Strip

 A Rust library that turns upcoming calendar events into the colors of an LED strip.
 The strip covers a window of time split into equal slots, and every slot gets one color.

 ## Features

 * Day/night gradient between a morning and an evening color
 * Hue-rotated secondary color for back-to-back events
 * Dimmed complementary background color for free time
 * JSON calendar feeds in Google Calendar shape
 * HTML, terminal and hex list previews

 ## Example

 ```rust
 use calendar_light_strip::*;
 use chrono::{DateTime, TimeDelta};

 fn main() -> Result<()> {
     let config = StripConfig::from_hex("#68D7FC", "#1ECA2F")?;
     let start = DateTime::parse_from_rfc3339("2024-01-01T09:00:00+00:00").unwrap();
     let meeting = Event::new(
         "standup",
         start,
         start + TimeDelta::minutes(30),
     );

     let strip = compute_strip(&config, &[meeting], start, TimeDelta::hours(24), 30)?;
     assert_eq!(strip.len(), 30);
     Ok(())
 }
 ```
*/

use chrono::TimeDelta;
use thiserror::Error;

/// Custom error types for the calendar light strip library
#[derive(Error, Debug)]
pub enum Error {
    /// A configured color is not a valid hex code
    #[error("Invalid color {value:?}: {source}")]
    InvalidColor {
        /// The rejected input
        value: String,
        /// Why palette rejected it
        source: palette::rgb::FromHexError,
    },

    /// Strip length is zero or too large to split a duration by
    #[error("Strip length {0} out of range (1..={max})", max = i32::MAX)]
    InvalidLength(usize),

    /// Strip duration is zero or negative
    #[error("Strip duration {0} must be positive")]
    InvalidDuration(TimeDelta),

    /// Reading an event feed or writing a preview failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An event feed is not valid JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Other errors
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod color;
pub mod config;
pub mod day_cycle;
pub mod event;
pub mod render;
pub mod sampler;
pub mod strip;
pub mod tone;

// Re-export key types
pub use color::{Color, Hsl};
pub use config::{StripConfig, StripWindow, Timestamp};
pub use day_cycle::primary_color;
pub use event::{CalendarEventSource, CalendarFeed, Event, JsonFileSource};
pub use render::{HexList, HtmlPreview, StripRenderer, TerminalPreview};
pub use sampler::{sample, Slot};
pub use strip::{assign, compute_strip, strip_from_source, Strip};
pub use tone::{background_color, secondary_color, Tones};
