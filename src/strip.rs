/*!
 # Strip colors

 Turns sampled slots into the final sequence of colors.

 Free slots get the background color. An event gets the primary color
 when it follows free time, keeps its color while it continues, and
 alternates between primary and secondary when it directly follows a
 different event, so neighbouring events stay distinguishable.
*/

use chrono::TimeDelta;
use tracing::{debug, instrument, trace};

use crate::color::{to_hex, Color};
use crate::config::{StripConfig, StripWindow, Timestamp};
use crate::event::{CalendarEventSource, Event};
use crate::sampler::{sample, Slot};
use crate::tone::Tones;
use crate::Result;

/// Ordered colors of one strip, one per slot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Strip(Vec<Color>);

impl Strip {
    /// Number of colors (slots)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the strip has no colors
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Colors in slot order
    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    /// Iterates over the colors in slot order
    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.0.iter()
    }

    /// `#RRGGBB` code of every slot
    pub fn hex_codes(&self) -> Vec<String> {
        self.0.iter().copied().map(to_hex).collect()
    }

    /// Takes the colors out of the strip
    pub fn into_colors(self) -> Vec<Color> {
        self.0
    }
}

impl From<Vec<Color>> for Strip {
    fn from(colors: Vec<Color>) -> Self {
        Self(colors)
    }
}

impl<'a> IntoIterator for &'a Strip {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Strip {
    type Item = Color;
    type IntoIter = std::vec::IntoIter<Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Tone of the last painted event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Primary,
    Secondary,
    Background,
}

impl Tone {
    fn color(self, tones: &Tones) -> Color {
        match self {
            Tone::Primary => tones.primary,
            Tone::Secondary => tones.secondary,
            Tone::Background => tones.background,
        }
    }
}

/// Paints sampled slots
///
/// The tones are evaluated once, at `start`, and shared by every slot. The
/// gradient therefore changes between strips computed at different times,
/// not along a single strip.
#[instrument(skip(config, slots), fields(slots = slots.len()))]
pub fn assign(config: &StripConfig, start: &Timestamp, slots: &[Slot<'_>]) -> Strip {
    let tones = Tones::at(config, start);
    debug!(
        "Tones at {}: primary {}, secondary {}, background {}",
        start,
        to_hex(tones.primary),
        to_hex(tones.secondary),
        to_hex(tones.background)
    );

    let mut previous: Option<(&Event, Tone)> = None;
    let mut colors = Vec::with_capacity(slots.len());

    for slot in slots {
        let tone = match (slot.event, previous) {
            (None, _) => Tone::Background,
            (Some(event), Some((prev, tone))) if event == prev => tone,
            (Some(_), Some((_, Tone::Primary))) => Tone::Secondary,
            (Some(_), _) => Tone::Primary,
        };
        trace!("Slot {} painted {:?}", slot.index, tone);

        previous = slot.event.map(|event| (event, tone));
        colors.push(tone.color(&tones));
    }

    Strip(colors)
}

/// Computes the strip for pre-fetched events
///
/// # Arguments
///
/// * `config` - Colors and angles to paint with
/// * `events` - Timed events sorted by start
/// * `start` - Time of the first slot
/// * `duration` - Time covered by all slots
/// * `length` - Number of slots
///
/// # Errors
///
/// Returns [`crate::Error::InvalidLength`] or [`crate::Error::InvalidDuration`]
/// when the window cannot be split into slots.
#[instrument(skip(config, events), fields(events = events.len()))]
pub fn compute_strip(
    config: &StripConfig,
    events: &[Event],
    start: Timestamp,
    duration: TimeDelta,
    length: usize,
) -> Result<Strip> {
    let slots = sample(events, start, duration, length)?;
    let strip = assign(config, &start, &slots);
    debug!("Computed strip of {} colors", strip.len());
    Ok(strip)
}

/// Fetches the events of `window` from `source` and computes its strip
///
/// # Errors
///
/// Returns [`crate::Error::InvalidDuration`] when the window ends outside the
/// supported calendar range, propagates any error from the source, then
/// fails like [`compute_strip`].
#[instrument(skip(source, config))]
pub async fn strip_from_source<S>(
    source: &S,
    config: &StripConfig,
    window: &StripWindow,
) -> Result<Strip>
where
    S: CalendarEventSource,
{
    let events = source.fetch(window.start, window.end()?).await?;
    debug!("Fetched {} events", events.len());
    compute_strip(config, &events, window.start, window.duration, window.length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    fn at(rfc3339: &str) -> Timestamp {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    fn start() -> Timestamp {
        at("2024-01-01T09:00:00+00:00")
    }

    fn event(id: &str) -> Event {
        Event::new(id, start(), start())
    }

    fn slots<'a>(events: &[Option<&'a Event>]) -> Vec<Slot<'a>> {
        events
            .iter()
            .enumerate()
            .map(|(index, event)| Slot {
                index,
                at: start() + TimeDelta::hours(i64::try_from(index).unwrap()),
                event: *event,
            })
            .collect()
    }

    fn paint(events: &[Option<&Event>]) -> Vec<Color> {
        assign(&StripConfig::default(), &start(), &slots(events)).into_colors()
    }

    #[test]
    fn first_slot_is_primary_or_background() {
        let tones = Tones::at(&StripConfig::default(), &start());
        let a = event("a");
        assert_eq!(paint(&[Some(&a)]), vec![tones.primary]);
        assert_eq!(paint(&[None]), vec![tones.background]);
    }

    #[test]
    fn continuing_event_keeps_its_color() {
        let tones = Tones::at(&StripConfig::default(), &start());
        let (a, b) = (event("a"), event("b"));
        assert_eq!(
            paint(&[Some(&a), Some(&b), Some(&b), Some(&b)]),
            vec![tones.primary, tones.secondary, tones.secondary, tones.secondary]
        );
    }

    #[test]
    fn adjacent_events_alternate() {
        let tones = Tones::at(&StripConfig::default(), &start());
        let (a, b, c) = (event("a"), event("b"), event("c"));
        assert_eq!(
            paint(&[Some(&a), Some(&b), Some(&c), Some(&a)]),
            vec![tones.primary, tones.secondary, tones.primary, tones.secondary]
        );
    }

    #[test]
    fn gap_resets_to_primary() {
        let tones = Tones::at(&StripConfig::default(), &start());
        let (a, b, c) = (event("a"), event("b"), event("c"));
        assert_eq!(
            paint(&[Some(&a), Some(&b), None, Some(&c)]),
            vec![tones.primary, tones.secondary, tones.background, tones.primary]
        );
    }

    #[test]
    fn same_identifier_counts_as_continuation() {
        let tones = Tones::at(&StripConfig::default(), &start());
        let first = event("a");
        let refetched = Event::new("a", at("2024-01-02T00:00:00+00:00"), at("2024-01-02T01:00:00+00:00"));
        assert_eq!(
            paint(&[Some(&first), Some(&refetched)]),
            vec![tones.primary, tones.primary]
        );
    }

    #[test]
    fn tones_come_from_start_not_slot_time() {
        let config = StripConfig::default();
        let a = event("a");
        let strip = assign(&config, &start(), &slots(&[Some(&a); 12]));
        let expected = Tones::at(&config, &start()).primary;
        assert!(strip.iter().all(|color| *color == expected));
    }

    #[test]
    fn strip_exposes_hex_codes() {
        let strip = Strip::from(vec![
            palette::Srgb::new(1.0, 0.0, 0.0),
            palette::Srgb::new(0.0, 0.0, 0.0),
        ]);
        assert_eq!(strip.hex_codes(), vec!["#FF0000", "#000000"]);
        assert_eq!(strip.len(), 2);
        assert!(!strip.is_empty());
    }
}
