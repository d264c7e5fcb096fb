/*!
 # Slot sampling

 Splits a window of time into equal slots and finds the event covering each one.
*/

use chrono::TimeDelta;
use tracing::{debug, instrument, trace};

use crate::config::Timestamp;
use crate::event::Event;
use crate::{Error, Result};

/// One position on the strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot<'a> {
    /// Position on the strip, starting at 0
    pub index: usize,
    /// `start + index * increment`
    pub at: Timestamp,
    /// First event covering `at`, if any
    pub event: Option<&'a Event>,
}

/// Checks a strip length and duration, returning the time between slots
///
/// # Errors
///
/// Returns [`Error::InvalidLength`] for a zero or oversized length and
/// [`Error::InvalidDuration`] for a duration that is not positive.
pub fn slot_increment(duration: TimeDelta, length: usize) -> Result<TimeDelta> {
    let slots = i32::try_from(length)
        .ok()
        .filter(|slots| *slots > 0)
        .ok_or(Error::InvalidLength(length))?;
    if duration <= TimeDelta::zero() {
        return Err(Error::InvalidDuration(duration));
    }
    Ok(duration / slots)
}

/// Assigns to each of `length` slots the first event covering its timestamp
///
/// `events` must be sorted by start. When several events cover the same
/// instant the earliest in the list wins. Coverage includes both the start
/// and the end of an event.
///
/// # Errors
///
/// Fails like [`slot_increment`] on an invalid length or duration, and with
/// [`Error::InvalidDuration`] when a slot would fall outside the supported
/// calendar range.
#[instrument(skip(events), fields(events = events.len()))]
pub fn sample(
    events: &[Event],
    start: Timestamp,
    duration: TimeDelta,
    length: usize,
) -> Result<Vec<Slot<'_>>> {
    let increment = slot_increment(duration, length)?;
    debug!("Sampling {} slots every {}", length, increment);

    let mut slots = Vec::with_capacity(length);
    for index in 0..length {
        let at = i32::try_from(index)
            .ok()
            .and_then(|steps| increment.checked_mul(steps))
            .and_then(|offset| start.checked_add_signed(offset))
            .ok_or(Error::InvalidDuration(duration))?;
        let event = events.iter().find(|event| event.covers(&at));
        trace!(
            "Slot {} at {} -> {}",
            index,
            at,
            event.map_or("free", |event| event.id.as_str())
        );
        slots.push(Slot { index, at, event });
    }

    Ok(slots)
}
