//! Bucketing one day's events into the fixed slots of the page.
//!
//! A day row has 13 hourly lines (before 8:00, one per hour from 8 to 19,
//! and 20:00 onwards) plus 3 rotated lines for all-day events.

use chrono::{DateTime, Timelike};
use chrono_tz::Tz;

use crate::event::{Event, EventTime};
use crate::locale::Locale;

pub const HOURLY_SLOTS: usize = 13;
pub const ALL_DAY_SLOTS: usize = 3;

const FIRST_HOUR: u32 = 8;
const LAST_HOUR: u32 = 20;

/// Text of every slot of one day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DaySlots {
    pub hourly: [String; HOURLY_SLOTS],
    pub all_day: [String; ALL_DAY_SLOTS],
    /// All-day titles that did not fit
    pub dropped: Vec<String>,
}

impl DaySlots {
    /// Place `events` in arrival order. Times are read in `tz`.
    pub fn from_events(events: &[Event], locale: Locale, tz: Tz) -> Self {
        let mut slots = DaySlots::default();
        for event in events {
            slots.push(event, locale, tz);
        }
        slots
    }

    fn push(&mut self, event: &Event, locale: Locale, tz: Tz) {
        let title = escape_title(&event.summary, locale);

        match event.start {
            EventTime::Date(_) => {
                match self.all_day.iter_mut().find(|slot| slot.is_empty()) {
                    Some(slot) => *slot = title,
                    None => {
                        tracing::warn!(
                            event = %event.summary,
                            "No space left. I will not display this full day event."
                        );
                        self.dropped.push(title);
                    }
                }
            }
            EventTime::DateTime(start) => {
                let local = start.with_timezone(&tz);
                let line = timed_line(&local, event.calendar.as_deref(), &title);
                self.hourly[hour_slot(local.hour())].push_str(&line);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hourly.iter().chain(self.all_day.iter()).all(String::is_empty)
    }
}

/// Slot index for an hour of the day.
pub fn hour_slot(hour: u32) -> usize {
    let clamped = hour.clamp(FIRST_HOUR, LAST_HOUR);
    (clamped - FIRST_HOUR) as usize
}

/// `"HH:MM [Calendar: ]Title "`; the trailing space separates events that
/// share a slot.
fn timed_line(start: &DateTime<Tz>, calendar: Option<&str>, title: &str) -> String {
    match calendar {
        Some(label) => format!("{} {}: {} ", start.format("%H:%M"), label, title),
        None => format!("{} {} ", start.format("%H:%M"), title),
    }
}

/// Replace `&`, which LaTeX treats as an alignment tab, with the localized
/// word for "and".
pub fn escape_title(title: &str, locale: Locale) -> String {
    title.replace('&', locale.and_word())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use tracing_test::traced_test;

    fn timed(summary: &str, h: u32, m: u32) -> Event {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, h, m, 0).unwrap();
        Event::new(summary, summary, EventTime::DateTime(start))
    }

    fn all_day(summary: &str) -> Event {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        Event::new(summary, summary, EventTime::Date(date))
    }

    fn slots(events: &[Event]) -> DaySlots {
        DaySlots::from_events(events, Locale::DeCh, chrono_tz::UTC)
    }

    #[test]
    fn hour_boundaries() {
        assert_eq!(hour_slot(0), 0);
        assert_eq!(hour_slot(7), 0);
        assert_eq!(hour_slot(8), 0);
        assert_eq!(hour_slot(9), 1);
        assert_eq!(hour_slot(14), 6);
        assert_eq!(hour_slot(20), 12);
        assert_eq!(hour_slot(23), 12);
    }

    #[test]
    fn timed_events_land_in_their_slot() {
        let s = slots(&[timed("Early", 7, 30), timed("Late", 20, 59), timed("Lunch", 14, 0)]);
        assert_eq!(s.hourly[0], "07:30 Early ");
        assert_eq!(s.hourly[12], "20:59 Late ");
        assert_eq!(s.hourly[6], "14:00 Lunch ");
        assert!(s.all_day.iter().all(String::is_empty));
    }

    #[test]
    fn same_slot_keeps_arrival_order() {
        let s = slots(&[timed("B", 9, 45), timed("A", 9, 0)]);
        assert_eq!(s.hourly[1], "09:45 B 09:00 A ");
    }

    #[test]
    fn calendar_label_prefixes_title() {
        let s = slots(&[timed("Review", 10, 0).with_calendar("Arbeit")]);
        assert_eq!(s.hourly[2], "10:00 Arbeit: Review ");
    }

    #[traced_test]
    #[test]
    fn fourth_all_day_event_is_dropped() {
        let s = slots(&[all_day("One"), all_day("Two"), all_day("Three"), all_day("Four")]);
        assert_eq!(s.all_day, ["One".to_string(), "Two".to_string(), "Three".to_string()]);
        assert_eq!(s.dropped, vec!["Four".to_string()]);
        assert!(s.hourly.iter().all(String::is_empty));
        assert!(logs_contain("No space left"));
        assert!(logs_contain("Four"));
    }

    #[test]
    fn ampersand_becomes_localized_and() {
        let s = slots(&[timed("A & B", 11, 0), all_day("Tom & Jerry")]);
        assert_eq!(s.hourly[3], "11:00 A und B ");
        assert_eq!(s.all_day[0], "Tom und Jerry");

        assert_eq!(escape_title("A & B", Locale::EnUs), "A and B");
        assert_eq!(escape_title("50% off", Locale::DeCh), "50% off");
    }

    #[test]
    fn times_are_read_in_the_planner_zone() {
        // 08:15 UTC is 09:15 in Zurich during winter time
        let event = timed("Standup", 8, 15);
        let s = DaySlots::from_events(&[event], Locale::DeCh, chrono_tz::Europe::Zurich);
        assert_eq!(s.hourly[1], "09:15 Standup ");
    }

    #[test]
    fn empty_and_all_day_only_are_distinct() {
        assert!(slots(&[]).is_empty());
        assert!(!slots(&[all_day("Holiday")]).is_empty());
    }
}
