//! Month grids, quarter/year navigation and date-keyed event lookup for calendar views.
//!
//! Everything here is a pure function or a value-type state transition: the caller
//! owns navigation state, injects "now" and the layout mode, and supplies the events.

mod config;
mod consts;
mod event;
mod matrix;
mod navigation;
mod prelude;
mod today;
mod types;

pub use config::{CalendarConfig, ConfigError};
pub use consts::*;
pub use event::{DateKey, Event, EventIndex, events_for_date};
pub use matrix::{MonthMatrix, WeekRow, build_month_matrix};
pub use navigation::{
    LayoutMode, MonthViewState, NavCommand, NavigationError, NavigationState, Transition,
    ViewSignal, YearView,
};
pub use today::{is_current_month, is_today, local_today};
pub use types::{CalendarDate, Month, Quarter, days_in_month, is_leap_year};

use crate::prelude::*;

/// Errors raised when validating calendar components or date keys
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid month index: {} (must be 0-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid quarter: {} (must be 0-{})", "_0", MAX_QUARTER)]
    InvalidQuarter(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: i32, month: u8, day: u8 },
    #[display(fmt = "Invalid date key: {_0} (expected YYYY-MM-DD)")]
    InvalidDateKey(String),
    #[display(fmt = "Date key year out of range: {_0} (must be 0-{})", MAX_KEY_YEAR)]
    YearOutOfRange(i32),
    #[display(fmt = "Empty date key")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        assert_eq!(
            ParseError::InvalidMonth(12).to_string(),
            "Invalid month index: 12 (must be 0-11)"
        );
        assert_eq!(
            ParseError::InvalidQuarter(3).to_string(),
            "Invalid quarter: 3 (must be 0-2)"
        );
        assert_eq!(
            ParseError::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            }
            .to_string(),
            "Invalid day 29 for month 2023-02"
        );
        assert_eq!(
            ParseError::InvalidDateKey("06/14/2025".to_owned()).to_string(),
            "Invalid date key: 06/14/2025 (expected YYYY-MM-DD)"
        );
        assert_eq!(
            ParseError::YearOutOfRange(10000).to_string(),
            "Date key year out of range: 10000 (must be 0-9999)"
        );
    }

    #[test]
    fn test_public_surface_composes() {
        // A year view in full layout, jump into a month, look up that day's events.
        let now = chrono::NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        let today = CalendarDate::from_datelike(&now);
        let view = YearView::new(LayoutMode::Full, today.year());
        let Transition { signal, .. } = view
            .apply(NavCommand::SelectMonth(today.month()))
            .unwrap();
        let Some(ViewSignal::ShowMonth { year, month }) = signal else {
            panic!("expected a month switch, got {signal:?}");
        };

        let matrix = build_month_matrix(year, i32::from(month.get()));
        assert_eq!(matrix.day_count(), 30);
        assert!(matrix.days().any(|day| is_today(year, month, day, &now)));

        let events: Vec<Event> = serde_json::from_str(
            r#"[{"title": "Regatta", "type": "race", "date": "2025-06-14"}]"#,
        )
        .unwrap();
        let key = DateKey::from_date(today).unwrap();
        assert_eq!(events_for_date(&key, &events).len(), 1);
    }
}
