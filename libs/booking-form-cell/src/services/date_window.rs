use chrono::{Months, NaiveDate};

use shared_config::DateWindowPolicy;
use shared_models::AppError;

/// Inclusive range of dates a booking may be made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn for_policy(policy: DateWindowPolicy, today: NaiveDate) -> Self {
        let start = match policy {
            DateWindowPolicy::Rolling => today,
            DateWindowPolicy::Fixed { anchor } => anchor,
        };
        // Feb 29 + 1 year clamps to Feb 28.
        let end = start.checked_add_months(Months::new(12)).unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn out_of_range_message(&self) -> String {
        format!(
            "Please select a date between {} and {}.",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }

    /// Parses a date input value and checks it against the window.
    pub fn validate(&self, raw: &str) -> Result<NaiveDate, AppError> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .ok()
            .filter(|date| self.contains(*date))
            .ok_or_else(|| AppError::Validation(self.out_of_range_message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rolling_window_bounds_are_inclusive() {
        let window = DateWindow::for_policy(DateWindowPolicy::Rolling, ymd(2025, 5, 9));

        assert_eq!(window.end, ymd(2026, 5, 9));
        assert!(window.contains(ymd(2025, 5, 9)));
        assert!(window.contains(ymd(2026, 5, 9)));
        assert!(!window.contains(ymd(2025, 5, 8)));
        assert!(!window.contains(ymd(2026, 5, 10)));
    }

    #[test]
    fn test_fixed_window_ignores_today() {
        let policy = DateWindowPolicy::Fixed { anchor: ymd(2025, 5, 9) };
        let window = DateWindow::for_policy(policy, ymd(2030, 1, 1));

        assert_eq!(window, DateWindow { start: ymd(2025, 5, 9), end: ymd(2026, 5, 9) });
    }

    #[test]
    fn test_leap_day_clamps() {
        let window = DateWindow::for_policy(DateWindowPolicy::Rolling, ymd(2024, 2, 29));
        assert_eq!(window.end, ymd(2025, 2, 28));
    }

    #[test]
    fn test_validate_messages() {
        let window = DateWindow::for_policy(DateWindowPolicy::Rolling, ymd(2025, 5, 9));

        assert_eq!(window.validate("2025-06-01").unwrap(), ymd(2025, 6, 1));
        assert_matches!(
            window.validate("2024-12-31"),
            Err(AppError::Validation(ref msg)) if msg == "Please select a date between 2025-05-09 and 2026-05-09."
        );
        assert_matches!(window.validate("not-a-date"), Err(AppError::Validation(_)));
    }
}
