//! Provider-neutral event types.
//!
//! Sources convert their API responses into these types. Only the fields
//! the planner prints are kept.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A calendar event as fetched for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub summary: String,
    pub start: EventTime,
    /// Display name of the owning calendar, `None` for the primary calendar
    pub calendar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventTime {
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
}

impl Event {
    pub fn new(id: impl Into<String>, summary: impl Into<String>, start: EventTime) -> Self {
        Event {
            id: id.into(),
            summary: summary.into(),
            start,
            calendar: None,
        }
    }

    /// Label the event with the name of the calendar it came from.
    pub fn with_calendar(mut self, label: impl Into<String>) -> Self {
        self.calendar = Some(label.into());
        self
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self.start, EventTime::Date(_))
    }
}
