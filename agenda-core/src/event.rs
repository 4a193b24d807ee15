//! Event records.
//!
//! `Event` is the persisted shape (JSON array under the `events` key).
//! `NewEvent` is raw creation input as supplied by a presentation layer;
//! the event store validates it and assigns the id and day key.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AgendaError, AgendaResult};
use crate::query::parse_day_key;

/// Number of marker colours event ids are spread over.
pub const PALETTE_SIZE: usize = 4;

/// A stored calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Day the event is listed under. Set at creation from the input date,
    /// not from `start_time`; the two may disagree.
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Event creation input. Has no id; `date` is unparsed user input.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub title: String,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp, truncated to its day.
    pub date: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl NewEvent {
    /// Validate the input and build the record that will be stored.
    pub fn into_event(self, id: String) -> AgendaResult<Event> {
        if self.title.trim().is_empty() || self.date.trim().is_empty() {
            return Err(AgendaError::Validation(
                "Title and date are required".into(),
            ));
        }
        check_time_order(&self.start_time, &self.end_time)?;
        let date = parse_day_key(&self.date)?;

        Ok(Event {
            id,
            title: self.title,
            date,
            start_time: self.start_time,
            end_time: self.end_time,
            location: non_blank(self.location),
            description: non_blank(self.description),
        })
    }
}

impl Event {
    /// Creation-time rules applied to a full record.
    pub fn validate(&self) -> AgendaResult<()> {
        if self.title.trim().is_empty() {
            return Err(AgendaError::Validation("Title is required".into()));
        }
        check_time_order(&self.start_time, &self.end_time)
    }

    /// Palette slot for this event's marker colour.
    ///
    /// Numeric (timestamp) ids map to `id % PALETTE_SIZE`, anything else
    /// is folded over its bytes.
    pub fn color_index(&self) -> usize {
        match self.id.parse::<u64>() {
            Ok(n) => (n % PALETTE_SIZE as u64) as usize,
            Err(_) => {
                self.id
                    .bytes()
                    .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize))
                    % PALETTE_SIZE
            }
        }
    }
}

pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

fn check_time_order(start: &DateTime<Utc>, end: &DateTime<Utc>) -> AgendaResult<()> {
    if start >= end {
        return Err(AgendaError::Validation(
            "Start time must be earlier than end time".into(),
        ));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
