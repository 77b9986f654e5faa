//! The seam between the planner and a calendar API.

use std::collections::HashMap;
use std::future::Future;

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::PlannerResult;
use crate::event::{Event, EventTime};

/// A calendar owned by the authenticated user.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarInfo {
    pub id: String,
    pub name: String,
    pub primary: bool,
}

impl CalendarInfo {
    /// Label printed in front of this calendar's events. The primary
    /// calendar goes unlabeled.
    pub fn label(&self) -> Option<&str> {
        (!self.primary).then_some(self.name.as_str())
    }
}

/// The UTC span of one calendar day, midnight up to the last microsecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// The day `date` as seen in `tz`.
    pub fn new(date: NaiveDate, tz: Tz) -> Self {
        let next = date.checked_add_days(Days::new(1)).unwrap_or(date);
        let start = local_midnight(date, tz);
        let end = local_midnight(next, tz) - TimeDelta::microseconds(1);
        DayWindow { date, start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Midnight of `date` in `tz`. Where a DST gap swallows midnight the day
/// starts at the first wall-clock time after the gap.
fn local_midnight(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = NaiveDateTime::new(date, NaiveTime::default());
    (0..=24 * 4)
        .map(|quarter| midnight + TimeDelta::minutes(15 * quarter))
        .find_map(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

/// Where a planner gets its events from.
///
/// Calls are made one after another; implementations need no internal
/// synchronization.
pub trait CalendarSource {
    /// Calendars owned by the authenticated identity.
    fn calendars(&self) -> impl Future<Output = PlannerResult<Vec<CalendarInfo>>>;

    /// Events of `calendar` starting inside `window`, ordered by start.
    fn events(
        &self,
        calendar: &CalendarInfo,
        window: DayWindow,
    ) -> impl Future<Output = PlannerResult<Vec<Event>>>;
}

/// A source backed by events held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    calendars: Vec<CalendarInfo>,
    events: HashMap<String, Vec<Event>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calendar(mut self, id: &str, name: &str, primary: bool) -> Self {
        self.calendars.push(CalendarInfo {
            id: id.to_string(),
            name: name.to_string(),
            primary,
        });
        self
    }

    pub fn with_event(mut self, calendar_id: &str, event: Event) -> Self {
        self.events
            .entry(calendar_id.to_string())
            .or_default()
            .push(event);
        self
    }
}

impl CalendarSource for MemorySource {
    async fn calendars(&self) -> PlannerResult<Vec<CalendarInfo>> {
        Ok(self.calendars.clone())
    }

    async fn events(&self, calendar: &CalendarInfo, window: DayWindow) -> PlannerResult<Vec<Event>> {
        let Some(events) = self.events.get(&calendar.id) else {
            return Ok(Vec::new());
        };

        Ok(events
            .iter()
            .filter(|event| match event.start {
                EventTime::DateTime(start) => window.contains(start),
                EventTime::Date(date) => date == window.date,
            })
            .cloned()
            .collect())
    }
}
