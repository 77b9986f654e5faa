//! Fetching and rendering days and weeks against a calendar source.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::day::DaySlots;
use crate::error::PlannerResult;
use crate::event::Event;
use crate::latex;
use crate::locale::Locale;
use crate::source::{CalendarInfo, CalendarSource, DayWindow};
use crate::weeks::Week;

/// Renders planner pages from one calendar source.
pub struct Planner<S> {
    source: S,
    calendars: Vec<CalendarInfo>,
    locale: Locale,
    tz: Tz,
}

impl<S: CalendarSource> Planner<S> {
    /// Look up the user's calendars once; every day is fetched against them.
    pub async fn connect(source: S, locale: Locale, tz: Tz) -> PlannerResult<Self> {
        let calendars = source.calendars().await?;
        tracing::debug!(count = calendars.len(), "loaded calendar list");

        Ok(Planner {
            source,
            calendars,
            locale,
            tz,
        })
    }

    pub fn calendars(&self) -> &[CalendarInfo] {
        &self.calendars
    }

    /// All events of `date`, calendar by calendar in list order, each
    /// calendar's events in the order the source returned them.
    pub async fn day_events(&self, date: NaiveDate) -> PlannerResult<Vec<Event>> {
        let window = DayWindow::new(date, self.tz);
        let mut events = Vec::new();

        for calendar in &self.calendars {
            let fetched = self.source.events(calendar, window).await?;
            events.extend(fetched.into_iter().map(|event| match calendar.label() {
                Some(label) => event.with_calendar(label),
                None => event,
            }));
        }

        Ok(events)
    }

    /// Markup for one day, or an empty string when nothing is scheduled.
    pub async fn render_day(&self, date: NaiveDate) -> PlannerResult<String> {
        let events = self.day_events(date).await?;
        if events.is_empty() {
            return Ok(String::new());
        }

        let slots = DaySlots::from_events(&events, self.locale, self.tz);
        Ok(latex::day_events(&slots))
    }

    /// One full page for `week`.
    pub async fn render_week(&self, week: &Week) -> PlannerResult<String> {
        tracing::debug!(week = week.number(), monday = %week.monday(), "rendering week");

        let mut days: [String; 7] = Default::default();
        for (slot, date) in days.iter_mut().zip(week.days) {
            *slot = self.render_day(date).await?;
        }

        Ok(latex::week_page(week, &days, self.locale))
    }
}
