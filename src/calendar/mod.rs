//! Calendar widget state: the displayed month, the selected day, and the
//! per-day event store.

pub mod grid;
pub mod store;

use chrono::{Datelike, Local, NaiveDate};
use grid::{first_of_month, next_month, prev_month};
use store::EventStore;

pub struct CalendarState {
    /// First day of the displayed month. Distinct from the selection.
    pub cursor: NaiveDate,
    pub selected: NaiveDate,
    pub store: EventStore,
}

impl CalendarState {
    pub fn new() -> Self {
        let today = Local::now().date_naive();
        Self {
            cursor: first_of_month(today.year(), today.month()),
            selected: today,
            store: EventStore::new(),
        }
    }

    pub fn grid(&self) -> grid::MonthGrid {
        grid::MonthGrid::of(self.cursor.year(), self.cursor.month())
    }

    /// Shift the displayed month back. Selection is untouched.
    pub fn prev_month(&mut self) {
        self.cursor = prev_month(self.cursor);
    }

    /// Shift the displayed month forward. Selection is untouched.
    pub fn next_month(&mut self) {
        self.cursor = next_month(self.cursor);
    }

    /// Select a date; the displayed month follows the selection.
    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
        self.cursor = first_of_month(date.year(), date.month());
    }

    /// Jump both the month cursor and the selection to `date`.
    pub fn jump_to(&mut self, date: NaiveDate) {
        self.select(date);
    }

    /// Move the selection by whole days (grid arrows: ±1, ±7).
    pub fn move_selection(&mut self, days: i64) {
        if let Some(date) = self
            .selected
            .checked_add_signed(chrono::Duration::days(days))
        {
            self.select(date);
        }
    }
}

impl Default for CalendarState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_navigation_keeps_selection() {
        let mut cal = CalendarState::new();
        cal.jump_to(date(2024, 3, 15));
        cal.next_month();
        assert_eq!(cal.cursor, date(2024, 4, 1));
        assert_eq!(cal.selected, date(2024, 3, 15));
        cal.prev_month();
        cal.prev_month();
        assert_eq!(cal.cursor, date(2024, 2, 1));
        assert_eq!(cal.selected, date(2024, 3, 15));
    }

    #[test]
    fn test_selection_moves_cursor_across_months() {
        let mut cal = CalendarState::new();
        cal.jump_to(date(2024, 3, 31));
        cal.move_selection(1);
        assert_eq!(cal.selected, date(2024, 4, 1));
        assert_eq!(cal.cursor, date(2024, 4, 1));
        cal.move_selection(-7);
        assert_eq!(cal.selected, date(2024, 3, 25));
        assert_eq!(cal.cursor, date(2024, 3, 1));
    }

    #[test]
    fn test_jump_sets_cursor_and_selection() {
        let mut cal = CalendarState::new();
        cal.jump_to(date(1999, 12, 31));
        assert_eq!(cal.cursor, date(1999, 12, 1));
        assert_eq!(cal.selected, date(1999, 12, 31));
    }
}
