//! Week filter and week-start derivation.
//!
//! # Responsibility
//! - Project the collection onto one selected week.
//! - Derive the first day of a week and the selectable upcoming weeks.
//!
//! # Invariants
//! - `select_week` preserves stored order.
//! - An empty or unparseable week selection yields an empty projection; the
//!   selection is matched exactly, with no whitespace trimming.
//! - Week arithmetic never panics at the ends of the calendar range.

use crate::model::video::{parse_iso_date, VideoPlan};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// One selectable week for the week picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekOption {
    pub week_start: NaiveDate,
    /// Display label, e.g. `Jan 5 - Jan 11, 2025`.
    pub label: String,
}

impl WeekOption {
    pub fn new(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            label: week_label(week_start),
        }
    }

    /// Selection value in `YYYY-MM-DD` form.
    pub fn value(&self) -> String {
        self.week_start.format("%Y-%m-%d").to_string()
    }
}

/// Returns records planned for `week_start`, in stored order.
pub fn select_week(videos: &[VideoPlan], week_start: &str) -> Vec<VideoPlan> {
    match parse_iso_date(week_start) {
        Some(week) => videos
            .iter()
            .filter(|video| video.week_start == week)
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

/// Counts records planned for `week_start`.
pub fn count_week(videos: &[VideoPlan], week_start: NaiveDate) -> usize {
    videos
        .iter()
        .filter(|video| video.week_start == week_start)
        .count()
}

/// Returns the first day of the week containing `date`.
pub fn week_start_for(date: NaiveDate, week_starts_on: Weekday) -> NaiveDate {
    let offset = (date.weekday().num_days_from_sunday() + 7
        - week_starts_on.num_days_from_sunday())
        % 7;
    date.checked_sub_signed(Duration::days(i64::from(offset)))
        .unwrap_or(NaiveDate::MIN)
}

/// Lists up to `count` consecutive weeks starting with the week containing
/// `today`. The list ends early when a week start falls past the last
/// representable date.
pub fn upcoming_weeks(today: NaiveDate, count: u32, week_starts_on: Weekday) -> Vec<WeekOption> {
    let first = week_start_for(today, week_starts_on);
    (0..count)
        .map_while(|index| first.checked_add_signed(Duration::weeks(i64::from(index))))
        .map(WeekOption::new)
        .collect()
}

/// Formats a week as `Jan 5 - Jan 11, 2025`.
///
/// The end date saturates at the last representable date.
pub fn week_label(week_start: NaiveDate) -> String {
    let week_end = week_start
        .checked_add_signed(Duration::days(6))
        .unwrap_or(NaiveDate::MAX);
    format!(
        "{} - {}",
        week_start.format("%b %-d"),
        week_end.format("%b %-d, %Y")
    )
}

#[cfg(test)]
mod tests {
    use super::{upcoming_weeks, week_label, week_start_for};
    use chrono::{NaiveDate, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_start_for_rolls_back_to_sunday() {
        // 2025-01-08 is a Wednesday.
        assert_eq!(week_start_for(date(2025, 1, 8), Weekday::Sun), date(2025, 1, 5));
        assert_eq!(week_start_for(date(2025, 1, 5), Weekday::Sun), date(2025, 1, 5));
        assert_eq!(week_start_for(date(2025, 1, 4), Weekday::Sun), date(2024, 12, 29));
    }

    #[test]
    fn week_start_for_honors_monday_weeks() {
        assert_eq!(week_start_for(date(2025, 1, 5), Weekday::Mon), date(2024, 12, 30));
        assert_eq!(week_start_for(date(2025, 1, 6), Weekday::Mon), date(2025, 1, 6));
    }

    #[test]
    fn week_label_spans_year_boundary() {
        assert_eq!(week_label(date(2025, 1, 5)), "Jan 5 - Jan 11, 2025");
        assert_eq!(week_label(date(2024, 12, 29)), "Dec 29 - Jan 4, 2025");
    }

    #[test]
    fn upcoming_weeks_are_consecutive() {
        let weeks = upcoming_weeks(date(2025, 1, 8), 9, Weekday::Sun);
        assert_eq!(weeks.len(), 9);
        assert_eq!(weeks[0].value(), "2025-01-05");
        assert_eq!(weeks[1].value(), "2025-01-12");
        assert_eq!(weeks[8].value(), "2025-03-02");
    }

    #[test]
    fn upcoming_weeks_stop_at_the_end_of_the_calendar() {
        let near_end = NaiveDate::MAX - chrono::Duration::days(20);
        let weeks = upcoming_weeks(near_end, 10, Weekday::Sun);
        assert!(!weeks.is_empty());
        assert!(weeks.len() < 10);
        assert!(weeks
            .windows(2)
            .all(|pair| pair[1].week_start - pair[0].week_start == chrono::Duration::weeks(1)));

        let huge = upcoming_weeks(NaiveDate::MAX, u32::MAX, Weekday::Sun);
        assert_eq!(huge.len(), 1);
    }

    #[test]
    fn week_start_for_saturates_at_the_first_date() {
        assert_eq!(week_start_for(NaiveDate::MIN, Weekday::Sun), NaiveDate::MIN);
        assert_eq!(week_start_for(NaiveDate::MIN, Weekday::Mon), NaiveDate::MIN);
    }
}
