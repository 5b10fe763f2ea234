use chrono::{Datelike, Local, NaiveDate};

use crate::Month;

/// True iff (year, zero-based month, day) is the same calendar day as `now`
pub fn is_today<D: Datelike>(year: i32, month: Month, day: u8, now: &D) -> bool {
    is_current_month(year, month, now) && u32::from(day) == now.day()
}

/// True iff the month of the given year contains `now`.
/// The compact year grid highlights this month's title.
pub fn is_current_month<D: Datelike>(year: i32, month: Month, now: &D) -> bool {
    year == now.year() && u32::from(month.get()) == now.month0()
}

/// Today's date on the local wall clock.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_is_today_exact_match() {
        let now = date(2025, 6, 14);
        assert!(is_today(2025, Month::new(5).unwrap(), 14, &now));
    }

    #[test]
    fn test_is_today_mismatches() {
        let now = date(2025, 6, 14);
        // May instead of June
        assert!(!is_today(2025, Month::new(4).unwrap(), 14, &now));
        assert!(!is_today(2024, Month::new(5).unwrap(), 14, &now));
        assert!(!is_today(2025, Month::new(5).unwrap(), 15, &now));
    }

    #[test]
    fn test_is_today_accepts_datetimes() {
        let now = date(2025, 12, 31).and_hms_opt(23, 59, 59).unwrap();
        assert!(is_today(2025, Month::DECEMBER, 31, &now));
        assert!(!is_today(2026, Month::JANUARY, 1, &now));
    }

    #[test]
    fn test_is_current_month() {
        let now = date(2025, 1, 20);
        assert!(is_current_month(2025, Month::JANUARY, &now));
        assert!(!is_current_month(2024, Month::JANUARY, &now));
        assert!(!is_current_month(2025, Month::new(1).unwrap(), &now));
    }

    #[test]
    fn test_local_today_agrees_with_itself() {
        let today = local_today();
        let month = Month::new(u8::try_from(today.month0()).unwrap()).unwrap();
        let day = u8::try_from(today.day()).unwrap();
        assert!(is_today(today.year(), month, day, &today));
    }
}
