//! Birth-date selection and the small derived values shown on the profile page.

use chrono::{Datelike, NaiveDate};

pub const INVALID_DATE: &str = "Invalid date selected";

/// Day / month / year picker state.
///
/// Each setter rebuilds the date from the changed component and the two
/// current ones. If the result is not a real calendar date, or the year falls
/// outside `start_year..=end_year`, the previous date is kept and
/// [`DateSelection::error`] reports [`INVALID_DATE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSelection {
    start_year: i32,
    end_year: i32,
    selected: NaiveDate,
    error: Option<&'static str>,
}

impl DateSelection {
    #[must_use]
    pub fn new(start_year: i32, end_year: i32, selected: NaiveDate) -> Self {
        Self {
            start_year,
            end_year,
            selected,
            error: None,
        }
    }

    #[must_use]
    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    #[must_use]
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Years offered by the picker, newest first.
    pub fn years(&self) -> impl Iterator<Item = i32> {
        (self.start_year..=self.end_year).rev()
    }

    /// Number of days in the currently selected month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        let (year, month) = (self.selected.year(), self.selected.month());
        (28..=31)
            .rev()
            .find(|day| NaiveDate::from_ymd_opt(year, month, *day).is_some())
            .unwrap_or(28)
    }

    pub fn set_day(&mut self, day: u32) -> bool {
        self.apply(self.selected.year(), self.selected.month(), day)
    }

    /// `month` is 1-based.
    pub fn set_month(&mut self, month: u32) -> bool {
        self.apply(self.selected.year(), month, self.selected.day())
    }

    pub fn set_year(&mut self, year: i32) -> bool {
        self.apply(year, self.selected.month(), self.selected.day())
    }

    /// Selects a whole date at once, subject to the same year range.
    pub fn select(&mut self, date: NaiveDate) -> bool {
        self.apply(date.year(), date.month(), date.day())
    }

    fn apply(&mut self, year: i32, month: u32, day: u32) -> bool {
        let in_range = (self.start_year..=self.end_year).contains(&year);
        match NaiveDate::from_ymd_opt(year, month, day).filter(|_| in_range) {
            Some(date) => {
                self.selected = date;
                self.error = None;
                true
            }
            None => {
                self.error = Some(INVALID_DATE);
                false
            }
        }
    }
}

/// Whole years between `birth` and `today`.
///
/// Returns `0` when `birth` is in the future.
#[must_use]
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> u32 {
    today.years_since(birth).unwrap_or(0)
}

/// `"First Last"`, as the backend stores the profile name.
#[must_use]
pub fn display_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name.trim(), last_name.trim())
}

/// Uppercased first letter of each name, e.g. `"AL"`.
#[must_use]
pub fn initials(first_name: &str, last_name: &str) -> String {
    first_name
        .chars()
        .take(1)
        .chain(last_name.chars().take(1))
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn set_day_rejects_impossible_date() {
        let mut picker = DateSelection::new(1900, 2024, date(2001, 2, 10));
        assert!(!picker.set_day(30));
        assert_eq!(picker.error(), Some(INVALID_DATE));
        assert_eq!(picker.selected(), date(2001, 2, 10));

        assert!(picker.set_day(28));
        assert_eq!(picker.error(), None);
        assert_eq!(picker.selected(), date(2001, 2, 28));
    }

    #[test]
    fn set_month_keeps_day_when_valid() {
        let mut picker = DateSelection::new(1900, 2024, date(2001, 1, 31));
        assert!(!picker.set_month(4));
        assert!(picker.set_month(3));
        assert_eq!(picker.selected(), date(2001, 3, 31));
    }

    #[test]
    fn set_year_handles_leap_day_and_range() {
        let mut picker = DateSelection::new(1990, 2024, date(2000, 2, 29));
        assert!(!picker.set_year(2001));
        assert!(picker.set_year(2004));
        assert!(!picker.set_year(1980), "year outside the picker range");
        assert_eq!(picker.selected(), date(2004, 2, 29));
    }

    #[test]
    fn select_checks_year_range() {
        let mut picker = DateSelection::new(1900, 2024, date(2000, 1, 1));
        assert!(picker.select(date(1995, 5, 20)));
        assert!(!picker.select(date(2030, 5, 20)));
        assert_eq!(picker.selected(), date(1995, 5, 20));
        assert_eq!(picker.error(), Some(INVALID_DATE));
    }

    #[test]
    fn days_in_month_follows_selection() {
        let picker = DateSelection::new(1900, 2024, date(2024, 2, 1));
        assert_eq!(picker.days_in_month(), 29);
        assert_eq!(picker.years().next(), Some(2024));
    }

    #[test]
    fn age_counts_full_years() {
        assert_eq!(age_on(date(2000, 6, 15), date(2024, 6, 14)), 23);
        assert_eq!(age_on(date(2000, 6, 15), date(2024, 6, 15)), 24);
        assert_eq!(age_on(date(2030, 1, 1), date(2024, 1, 1)), 0);
    }

    #[test]
    fn initials_and_display_name() {
        assert_eq!(initials("ada", "lovelace"), "AL");
        assert_eq!(initials("", "lovelace"), "L");
        assert_eq!(display_name(" Ada ", "Lovelace"), "Ada Lovelace");
    }
}
