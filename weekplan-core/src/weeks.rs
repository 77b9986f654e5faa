//! Walking a year's month grid one week row at a time.
//!
//! Each month is laid out like a wall calendar: rows of seven days starting
//! on Monday, padded with days from the neighbouring months. A row that
//! straddles two months shows up in both grids, so only its first
//! appearance is kept.

use std::collections::HashSet;

use chrono::{Datelike, Days, IsoWeek, NaiveDate};

use crate::error::{PlannerError, PlannerResult};

/// One week row of the planner, Monday first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    /// ISO week of the row's Tuesday (carries the ISO year too)
    pub iso: IsoWeek,
    /// Year the planner is being rendered for
    pub year: i32,
    /// First day of the month whose grid this row was taken from
    pub month: NaiveDate,
    pub days: [NaiveDate; 7],
}

impl Week {
    /// ISO week number as printed on the page.
    pub fn number(&self) -> u32 {
        self.iso.week()
    }

    pub fn monday(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains(&date)
    }
}

/// All week rows of `year`, in month order, each week exactly once.
pub fn year_weeks(year: i32) -> PlannerResult<Vec<Week>> {
    let mut seen = HashSet::new();
    let mut weeks = Vec::new();

    for month in 1..=12 {
        let month_start =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or(PlannerError::InvalidYear(year))?;

        for days in month_grid(month_start).ok_or(PlannerError::InvalidYear(year))? {
            let iso = days[1].iso_week();
            if !seen.insert(iso) {
                continue;
            }
            weeks.push(Week {
                iso,
                year,
                month: month_start,
                days,
            });
        }
    }

    Ok(weeks)
}

/// Week rows covering the month starting at `month_start`.
///
/// Returns `None` only when the padding runs off chrono's date range.
pub fn month_grid(month_start: NaiveDate) -> Option<Vec<[NaiveDate; 7]>> {
    let first = month_start.with_day(1)?;
    let last = first.checked_add_months(chrono::Months::new(1))?.pred_opt()?;

    let lead = u64::from(first.weekday().num_days_from_monday());
    let mut row_start = first.checked_sub_days(Days::new(lead))?;

    let mut rows = Vec::new();
    while row_start <= last {
        let mut days = [row_start; 7];
        for (offset, day) in (0u64..).zip(days.iter_mut()) {
            *day = row_start.checked_add_days(Days::new(offset))?;
        }
        rows.push(days);
        row_start = row_start.checked_add_days(Days::new(7))?;
    }

    Some(rows)
}
