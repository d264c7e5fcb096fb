/*!
 # Calendar events and event sources

 This module defines the [`Event`] type consumed by the sampler and the
 [`CalendarEventSource`] boundary that produces events. Two sources are
 provided: an in-memory [`CalendarFeed`] and a [`JsonFileSource`] that loads
 such a feed from disk. Both accept events in Google Calendar shape, where an
 entry either carries a `dateTime` (timed) or a `date` (all-day).
*/

use std::future::Future;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::Timestamp;
use crate::Result;

/// Default number of events taken from each calendar
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// A timed calendar event
///
/// Two events are equal when their identifiers are equal, regardless of
/// their times or summaries.
#[derive(Debug, Clone)]
pub struct Event {
    /// Stable identifier from the calendar service
    pub id: String,
    /// Optional human-readable title
    pub summary: Option<String>,
    /// Start of the event
    pub start: Timestamp,
    /// End of the event
    pub end: Timestamp,
}

impl Event {
    /// Creates an event without a summary
    pub fn new(id: impl Into<String>, start: Timestamp, end: Timestamp) -> Self {
        Self {
            id: id.into(),
            summary: None,
            start,
            end,
        }
    }

    /// Returns a copy with a summary
    #[must_use]
    pub fn with_summary(self, summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..self
        }
    }

    /// Whether `at` lies within `start..=end`
    pub fn covers(&self, at: &Timestamp) -> bool {
        self.start <= *at && *at <= self.end
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Event {}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Produces the events of a time range
///
/// Implementations return timed events only, sorted ascending by start.
/// Authentication and retries are the implementation's concern; failures
/// propagate to the caller unchanged.
pub trait CalendarEventSource {
    /// Fetches the events overlapping `from..to`
    fn fetch(&self, from: Timestamp, to: Timestamp) -> impl Future<Output = Result<Vec<Event>>> + Send;
}

/// Start or end of a feed entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    /// Set for timed events
    #[serde(default)]
    pub date_time: Option<Timestamp>,
    /// Set for all-day events
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// One entry of a calendar feed
#[derive(Debug, Clone, Deserialize)]
pub struct FeedItem {
    /// Stable identifier
    pub id: String,
    /// Title of the entry
    #[serde(default)]
    pub summary: Option<String>,
    /// Start of the entry
    #[serde(default)]
    pub start: EventTime,
    /// End of the entry
    #[serde(default)]
    pub end: EventTime,
}

impl FeedItem {
    /// Converts to an [`Event`], or `None` for all-day or incomplete entries
    pub fn to_event(&self) -> Option<Event> {
        let start = self.start.date_time?;
        let end = self.end.date_time?;
        Some(Event {
            id: self.id.clone(),
            summary: self.summary.clone(),
            start,
            end,
        })
    }
}

/// One calendar of a feed
#[derive(Debug, Clone, Deserialize)]
pub struct FeedCalendar {
    /// Calendar identifier
    pub id: String,
    /// Entries of the calendar
    #[serde(default)]
    pub items: Vec<FeedItem>,
}

/// Snapshot of several calendars
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarFeed {
    /// Calendars in the feed
    #[serde(default)]
    pub calendars: Vec<FeedCalendar>,
    /// Events taken from each calendar at most
    #[serde(default = "default_max_results", rename = "maxResults")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

impl CalendarFeed {
    /// Creates a feed from calendars with the default per-calendar limit
    pub fn new(calendars: Vec<FeedCalendar>) -> Self {
        Self {
            calendars,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Parses a feed from JSON
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if the document does not match the feed shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns a copy with a different per-calendar limit
    #[must_use]
    pub fn with_max_results(self, max_results: usize) -> Self {
        Self {
            max_results,
            ..self
        }
    }

    /// Timed events overlapping `from..to`, sorted by start
    ///
    /// Each calendar contributes at most `max_results` entries, taken in start
    /// order before all-day entries are dropped.
    #[instrument(skip(self), fields(calendars = self.calendars.len()))]
    pub fn events_between(&self, from: Timestamp, to: Timestamp) -> Vec<Event> {
        let mut events = Vec::new();

        for calendar in &self.calendars {
            let mut in_range: Vec<&FeedItem> = calendar
                .items
                .iter()
                .filter(|item| overlaps(item, &from, &to))
                .collect();
            in_range.sort_by_key(|item| sort_key(item));

            let before = events.len();
            for item in in_range.into_iter().take(self.max_results) {
                match item.to_event() {
                    Some(event) => events.push(event),
                    None => debug!("Skipping all-day or incomplete entry {}", item.id),
                }
            }
            debug!(
                "Calendar {} contributed {} events",
                calendar.id,
                events.len() - before
            );
        }

        events.sort_by_key(|event| event.start);
        events
    }
}

impl CalendarEventSource for CalendarFeed {
    async fn fetch(&self, from: Timestamp, to: Timestamp) -> Result<Vec<Event>> {
        Ok(self.events_between(from, to))
    }
}

/// Whether an entry overlaps `from..to`: it ends after `from` and starts before `to`
fn overlaps(item: &FeedItem, from: &Timestamp, to: &Timestamp) -> bool {
    match (item.start.date_time, item.end.date_time) {
        (Some(start), Some(end)) => end > *from && start < *to,
        _ => match (item.start.date, item.end.date) {
            (Some(start), Some(end)) => {
                end > from.date_naive() && start <= to.date_naive()
            }
            _ => false,
        },
    }
}

/// Orders timed entries by start; all-day entries sort by their date at midnight UTC
fn sort_key(item: &FeedItem) -> Option<chrono::NaiveDateTime> {
    item.start
        .date_time
        .map(|start| start.naive_utc())
        .or_else(|| item.start.date.and_then(|date| date.and_hms_opt(0, 0, 0)))
}

/// Event source backed by a JSON [`CalendarFeed`] on disk
///
/// The file is read again on every fetch, so edits show up on the next strip.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    /// Location of the feed
    pub path: PathBuf,
    /// Overrides the feed's own per-calendar limit when set
    pub max_results: Option<usize>,
}

impl JsonFileSource {
    /// Creates a source reading from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_results: None,
        }
    }

    /// Returns a copy with a fixed per-calendar limit
    #[must_use]
    pub fn with_max_results(self, max_results: usize) -> Self {
        Self {
            max_results: Some(max_results),
            ..self
        }
    }

    /// Loads the feed from disk
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file cannot be read and
    /// [`crate::Error::Json`] if it is not a valid feed.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<CalendarFeed> {
        debug!("Reading calendar feed");
        let json = tokio::fs::read_to_string(&self.path).await?;
        let feed = CalendarFeed::from_json(&json)?;
        Ok(match self.max_results {
            Some(max_results) => feed.with_max_results(max_results),
            None => feed,
        })
    }
}

impl CalendarEventSource for JsonFileSource {
    async fn fetch(&self, from: Timestamp, to: Timestamp) -> Result<Vec<Event>> {
        let feed = self.load().await?;
        Ok(feed.events_between(from, to))
    }
}
