//! Teaching calendar
//!
//! Turns a date range into the ordered list of days on which classes may be held.

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;
use termtable_core::{ScheduleError, Snapshot};

/// Weekly rest day plus explicit holidays
#[derive(Clone, Debug)]
pub struct TermCalendar {
    pub rest_day: Weekday,
    pub holidays: BTreeSet<NaiveDate>,
}

impl TermCalendar {
    pub fn new(rest_day: Weekday) -> Self {
        Self {
            rest_day,
            holidays: BTreeSet::new(),
        }
    }

    /// Calendar for `snapshot`'s holidays
    pub fn from_snapshot(snapshot: &Snapshot, rest_day: Weekday) -> Self {
        Self {
            rest_day,
            holidays: snapshot.holiday_dates(),
        }
    }

    pub fn holiday(mut self, date: NaiveDate) -> Self {
        self.holidays.insert(date);
        self
    }

    pub fn is_teaching_day(&self, date: NaiveDate) -> bool {
        date.weekday() != self.rest_day && !self.holidays.contains(&date)
    }

    /// Ascending teaching dates in `start..=end`.
    ///
    /// An inverted or fully excluded range is an error, never an empty list.
    pub fn teaching_dates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NaiveDate>, ScheduleError> {
        let dates: Vec<NaiveDate> = start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| self.is_teaching_day(*d))
            .collect();

        if dates.is_empty() {
            return Err(ScheduleError::NoValidDates { start, end });
        }
        Ok(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn skips_sundays() {
        // 2025-01-05 is a Sunday
        let cal = TermCalendar::new(Weekday::Sun);
        let dates = cal.teaching_dates(date(2025, 1, 4), date(2025, 1, 7)).unwrap();
        assert_eq!(dates, vec![date(2025, 1, 4), date(2025, 1, 6), date(2025, 1, 7)]);
    }

    #[test]
    fn skips_holidays() {
        let cal = TermCalendar::new(Weekday::Sun).holiday(date(2025, 1, 7));
        let dates = cal.teaching_dates(date(2025, 1, 6), date(2025, 1, 8)).unwrap();
        assert_eq!(dates, vec![date(2025, 1, 6), date(2025, 1, 8)]);
    }

    #[test]
    fn custom_rest_day() {
        let cal = TermCalendar::new(Weekday::Fri);
        // 2025-01-10 is a Friday
        assert!(!cal.is_teaching_day(date(2025, 1, 10)));
        assert!(cal.is_teaching_day(date(2025, 1, 12)));
    }

    #[test]
    fn inverted_range_is_an_error() {
        let cal = TermCalendar::new(Weekday::Sun);
        let err = cal.teaching_dates(date(2025, 1, 10), date(2025, 1, 6)).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::NoValidDates {
                start: date(2025, 1, 10),
                end: date(2025, 1, 6)
            }
        );
    }

    #[test]
    fn range_of_only_excluded_days_is_an_error() {
        let cal = TermCalendar::new(Weekday::Sun).holiday(date(2025, 1, 6));
        // Sunday then a holiday Monday
        assert!(cal.teaching_dates(date(2025, 1, 5), date(2025, 1, 6)).is_err());
    }

    #[test]
    fn single_day_range() {
        let cal = TermCalendar::new(Weekday::Sun);
        let dates = cal.teaching_dates(date(2025, 1, 6), date(2025, 1, 6)).unwrap();
        assert_eq!(dates, vec![date(2025, 1, 6)]);
    }
}
