//! Date query layer.
//!
//! Pure functions over an event slice: day keys, Sunday-anchored week
//! windows, per-day and per-week views, and calendar widget marks.
//! Nothing here is persisted; every view is recomputed from the events.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Timelike};

use crate::error::{AgendaError, AgendaResult};
use crate::event::Event;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Canonical day of a timestamp, in the timestamp's own zone.
///
/// Pass a `DateTime<Local>` to get the local calendar day.
pub fn day_key<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> NaiveDate {
    timestamp.date_naive()
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp and truncate it to its day.
pub fn parse_day_key(raw: &str) -> AgendaResult<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| day_key(&dt))
        .map_err(|_| {
            AgendaError::Validation(format!(
                "Invalid date '{raw}'. Expected YYYY-MM-DD or an RFC 3339 timestamp"
            ))
        })
}

/// The seven days, Sunday to Saturday, of the week containing `day`.
///
/// Fails when part of that week lies outside the representable date range.
pub fn week_window(day: NaiveDate) -> AgendaResult<[NaiveDate; 7]> {
    let out_of_range =
        || AgendaError::Validation(format!("The week containing {day} is out of range"));

    let offset = u64::from(day.weekday().num_days_from_sunday());
    let start = day.checked_sub_days(Days::new(offset)).ok_or_else(out_of_range)?;
    // Saturday is the last day to check; every earlier day of the week exists if it does
    start.checked_add_days(Days::new(6)).ok_or_else(out_of_range)?;

    Ok(std::array::from_fn(|i| start + Days::new(i as u64)))
}

/// Events listed under `day`, in set order.
pub fn events_on_day(events: &[Event], day: NaiveDate) -> Vec<&Event> {
    events.iter().filter(|e| e.date == day).collect()
}

/// Events whose day falls in `[start, start + 7 days)`, in set order.
pub fn events_in_week(events: &[Event], start: NaiveDate) -> Vec<&Event> {
    // Past the last representable date every day after `start` is in range
    let end = start.checked_add_days(Days::new(7));
    events
        .iter()
        .filter(|e| e.date >= start && end.is_none_or(|end| e.date < end))
        .collect()
}

/// Window events grouped by day, each day sorted by start time.
///
/// Every day of the window has an entry, empty days included.
pub fn events_in_window<'a>(
    events: &'a [Event],
    window: &[NaiveDate; 7],
) -> BTreeMap<NaiveDate, Vec<&'a Event>> {
    window
        .iter()
        .map(|day| {
            let mut on_day = events_on_day(events, *day);
            on_day.sort_by(|a, b| a.start_time.cmp(&b.start_time));
            (*day, on_day)
        })
        .collect()
}

/// Every distinct day that has at least one event.
pub fn marked_day_keys(events: &[Event]) -> BTreeSet<NaiveDate> {
    events.iter().map(|e| e.date).collect()
}

/// Annotation for one day of a calendar widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayMark {
    pub marked: bool,
    /// Colour of the first event found for the day.
    pub color_index: Option<usize>,
    pub selected: bool,
}

/// Widget marks for event days plus the selected days.
pub fn calendar_marks(events: &[Event], selected: &[NaiveDate]) -> BTreeMap<NaiveDate, DayMark> {
    let mut marks: BTreeMap<NaiveDate, DayMark> = BTreeMap::new();

    for event in events {
        marks.entry(event.date).or_insert_with(|| DayMark {
            marked: true,
            color_index: Some(event.color_index()),
            selected: false,
        });
    }

    for day in selected {
        marks.entry(*day).or_default().selected = true;
    }

    marks
}

/// Placement of an event on a one-day timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBlock {
    /// Minutes since midnight of the start, in the requested zone.
    pub start_minute: u32,
    /// Length in minutes, clipped at the end of the start day.
    pub duration_minutes: u32,
}

pub fn time_block<Tz: TimeZone>(event: &Event, tz: &Tz) -> TimeBlock {
    let start = event.start_time.with_timezone(tz);
    let start_minute = start.hour() * 60 + start.minute();

    let length = (event.end_time - event.start_time).num_minutes().max(0);
    let remaining = MINUTES_PER_DAY - start_minute;
    let duration_minutes = u32::try_from(length).unwrap_or(u32::MAX).min(remaining);

    TimeBlock {
        start_minute,
        duration_minutes,
    }
}

/// Sunday-anchored rows covering a month. Cells outside the month are `None`.
pub fn month_grid(year: i32, month: u32) -> AgendaResult<Vec<[Option<NaiveDate>; 7]>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AgendaError::Validation(format!("Invalid month {year}-{month:02}")))?;

    let mut rows = Vec::new();
    let mut row = [None; 7];
    let mut col = first.weekday().num_days_from_sunday() as usize;
    let mut day = first;

    while day.month() == month {
        row[col] = Some(day);
        col += 1;
        if col == 7 {
            rows.push(row);
            row = [None; 7];
            col = 0;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    if col > 0 {
        rows.push(row);
    }

    Ok(rows)
}
