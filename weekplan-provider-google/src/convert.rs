//! Google API types to weekplan's provider-neutral ones.

use chrono::{DateTime, NaiveDate, Utc};
use google_calendar::types::{CalendarListEntry, EventDateTime};
use weekplan_core::source::CalendarInfo;
use weekplan_core::{Event, EventTime};

/// `None` for cancelled events and events without a usable start.
pub fn event_from_google(event: google_calendar::types::Event) -> Option<Event> {
    if event.status == "cancelled" || event.id.is_empty() {
        return None;
    }

    let start = event.start.as_ref().and_then(event_time)?;
    let summary = if event.summary.is_empty() {
        "(No title)".to_string()
    } else {
        event.summary
    };

    Some(Event::new(event.id, summary, start))
}

fn event_time(start: &EventDateTime) -> Option<EventTime> {
    pick_start(start.date_time, start.date)
}

/// Timed starts win over dates; Google sends exactly one of the two.
fn pick_start(date_time: Option<DateTime<Utc>>, date: Option<NaiveDate>) -> Option<EventTime> {
    match (date_time, date) {
        (Some(dt), _) => Some(EventTime::DateTime(dt)),
        (None, Some(d)) => Some(EventTime::Date(d)),
        (None, None) => None,
    }
}

pub fn calendar_from_google(entry: CalendarListEntry) -> Option<CalendarInfo> {
    if entry.id.is_empty() {
        return None;
    }

    let name = [entry.summary_override, entry.summary]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| "(unnamed)".to_string());

    Some(CalendarInfo {
        id: entry.id,
        name,
        primary: entry.primary,
    })
}
