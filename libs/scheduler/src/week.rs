//! Rolling calendar week windows.
//!
//! Weeks follow ISO-8601: Monday start, week numbers as defined by
//! [`chrono::Datelike::iso_week`]. Windows are derived from the current date
//! on demand and never stored, so the calendar rolls forward by itself.

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};

use crate::package::WeekNumber;

/// Number of week windows the calendar shows.
pub const CALENDAR_WEEKS: usize = 4;

/// A calendar week: its ISO week number plus the dates it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    pub number: WeekNumber,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    /// The window containing `day`, Monday through Sunday.
    pub fn containing(day: NaiveDate) -> Self {
        let week = day.week(Weekday::Mon);
        Self {
            number: day.iso_week().week(),
            start: week.first_day(),
            end: week.last_day(),
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// The rolling calendar: `count` consecutive windows starting at the week
/// containing `today`.
pub fn upcoming_weeks(today: NaiveDate, count: usize) -> Vec<WeekWindow> {
    (0..count)
        .map(|i| WeekWindow::containing(today + TimeDelta::weeks(i as i64)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_spans_monday_to_sunday() {
        // 2025-06-04 is a Wednesday in ISO week 23.
        let window = WeekWindow::containing(date(2025, 6, 4));
        assert_eq!(window.number, 23);
        assert_eq!(window.start, date(2025, 6, 2));
        assert_eq!(window.end, date(2025, 6, 8));
        assert!(window.contains(date(2025, 6, 4)));
        assert!(!window.contains(date(2025, 6, 9)));
    }

    #[test]
    fn test_upcoming_weeks_are_consecutive() {
        let windows = upcoming_weeks(date(2025, 6, 4), CALENDAR_WEEKS);
        assert_eq!(windows.len(), 4);
        assert_eq!(
            windows.iter().map(|w| w.number).collect::<Vec<_>>(),
            vec![23, 24, 25, 26]
        );
        for pair in windows.windows(2) {
            assert_eq!(pair[1].start, pair[0].end + TimeDelta::days(1));
        }
    }

    #[test]
    fn test_week_number_wraps_at_year_end() {
        // 2025-12-31 falls in ISO week 1 of 2026.
        let window = WeekWindow::containing(date(2025, 12, 31));
        assert_eq!(window.number, 1);
        assert_eq!(window.start, date(2025, 12, 29));
    }
}
