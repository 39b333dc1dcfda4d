//! Month grid arithmetic.
//!
//! A month renders as a 7-column grid starting on Sunday: a run of leading
//! blank cells up to the weekday of the 1st, then one cell per day.

use chrono::{Datelike, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Shape of one rendered month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Blank cells before day 1 (weekday index of the 1st, Sunday = 0).
    pub leading_blanks: u32,
    /// Number of day cells.
    pub days: u32,
}

impl MonthGrid {
    pub fn of(year: i32, month: u32) -> Self {
        let first = first_of_month(year, month);
        Self {
            year,
            month,
            leading_blanks: first.weekday().num_days_from_sunday(),
            days: days_in_month(year, month),
        }
    }

    /// Total cells including leading blanks.
    pub fn cell_count(&self) -> u32 {
        self.leading_blanks + self.days
    }

    /// Number of week rows needed to fit the grid.
    pub fn week_rows(&self) -> u32 {
        self.cell_count().div_ceil(7)
    }

    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

/// First day of the given month. `month` must be 1..=12.
pub fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // Safe for any month in range; chrono only rejects out-of-range components.
    NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap_or_else(|| panic!("invalid month {}-{}", year, month))
}

/// Days in a month, from the day before the first of the next month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_of_month(ny, nm).pred_opt().map(|d| d.day()).unwrap_or(31)
}

/// First day of the month before the one containing `date`.
pub fn prev_month(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };
    first_of_month(y, m)
}

/// First day of the month after the one containing `date`.
pub fn next_month(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    first_of_month(y, m)
}

/// Calendar-date equality ignoring anything but year/month/day.
pub fn same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Weekday header labels, Sunday first.
pub fn weekday_labels() -> [&'static str; 7] {
    ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_march_2024_shape() {
        // March 1 2024 is a Friday
        let grid = MonthGrid::of(2024, 3);
        assert_eq!(grid.leading_blanks, 5);
        assert_eq!(grid.days, 31);
        assert_eq!(grid.cell_count(), 36);
        assert_eq!(grid.week_rows(), 6);
        assert_eq!(grid.title(), "March 2024");
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29); // leap
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(1900, 2), 28); // century, not leap
        assert_eq!(days_in_month(2000, 2), 29); // 400-year leap
    }

    #[test]
    fn test_blanks_match_weekday() {
        for (year, month) in [(2024, 1), (2024, 6), (2025, 2), (1999, 12)] {
            let grid = MonthGrid::of(year, month);
            let first = first_of_month(year, month);
            assert_eq!(grid.leading_blanks, first.weekday().num_days_from_sunday());
            assert_eq!(grid.days, days_in_month(year, month));
        }
    }

    #[test]
    fn test_month_navigation_rollover() {
        let jan = first_of_month(2024, 1);
        assert_eq!(prev_month(jan), first_of_month(2023, 12));
        let dec = first_of_month(2024, 12);
        assert_eq!(next_month(dec), first_of_month(2025, 1));
        // mid-month input still lands on the first
        let mid = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        assert_eq!(next_month(mid), first_of_month(2024, 6));
        assert_eq!(prev_month(mid), first_of_month(2024, 4));
    }

    #[test]
    fn test_same_day() {
        let a = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let c = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert!(same_day(a, b));
        assert!(!same_day(a, c));
    }
}
