use std::fmt;

use serde::Serialize;

use crate::{
    DAYS_IN_WEEK, MIN_DAY, Month, WEEKDAY_LABELS,
    prelude::*,
    types::{day_number, month_length, normalize_month, weekday_of},
};

/// One week of a month grid: exactly seven slots, Sunday first.
/// `None` marks a slot outside the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deref, Serialize)]
pub struct WeekRow([Option<u8>; DAYS_IN_WEEK]);

impl WeekRow {
    pub const fn slots(&self) -> &[Option<u8>; DAYS_IN_WEEK] {
        &self.0
    }

    /// Populated days of this week, in order
    pub fn days(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().flatten().copied()
    }

    /// True if no slot of the week is empty
    pub fn is_full(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }
}

/// The week-by-week grid of one month, padded with empty slots to whole weeks
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MonthMatrix {
    year:  i32,
    month: Month,
    weeks: Vec<WeekRow>,
}

/// Builds the grid for a zero-based month of a year.
///
/// Month indices outside `0..=11` are normalized by calendar arithmetic, so
/// `build_month_matrix(2025, 12)` is January 2026. The matrix reports the
/// normalized year and month.
pub fn build_month_matrix(year: i32, month: i32) -> MonthMatrix {
    let (year, month) = normalize_month(i64::from(year), i64::from(month));
    // only reachable past i32::MAX/MIN with an out-of-range month
    #[allow(clippy::cast_possible_truncation)]
    let year = year.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    MonthMatrix::new(year, month)
}

impl MonthMatrix {
    pub fn new(year: i32, month: Month) -> Self {
        let first_weekday = usize::from(Self::weekday_of_first(year, month));
        let day_count = month_length(i64::from(year), month);

        let mut weeks = Vec::with_capacity(6);
        let mut slots = [None; DAYS_IN_WEEK];
        let mut column = first_weekday;
        for day in MIN_DAY..=day_count {
            slots[column] = Some(day);
            column += 1;
            if column == DAYS_IN_WEEK {
                weeks.push(WeekRow(slots));
                slots = [None; DAYS_IN_WEEK];
                column = 0;
            }
        }
        if column > 0 {
            weeks.push(WeekRow(slots));
        }

        log::trace!(
            "built {} {year}: {day_count} days over {} weeks",
            month.name(),
            weeks.len()
        );

        Self { year, month, weeks }
    }

    fn weekday_of_first(year: i32, month: Month) -> u8 {
        weekday_of(day_number(i64::from(year), month, MIN_DAY))
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub fn weeks(&self) -> &[WeekRow] {
        &self.weeks
    }

    /// Number of days in the month
    pub fn day_count(&self) -> u8 {
        month_length(i64::from(self.year), self.month)
    }

    /// Weekday (0 = Sunday) of the first of the month, which is also its column in the first row
    pub fn first_weekday(&self) -> u8 {
        Self::weekday_of_first(self.year, self.month)
    }

    /// All populated days in grid order
    pub fn days(&self) -> impl Iterator<Item = u8> + '_ {
        self.weeks.iter().flat_map(WeekRow::days)
    }

    /// Row and column of a day in the grid, or `None` if the month has no such day
    pub fn position_of(&self, day: u8) -> Option<(usize, usize)> {
        if day < MIN_DAY || day > self.day_count() {
            return None;
        }
        let offset = usize::from(self.first_weekday()) + usize::from(day - MIN_DAY);
        Some((offset / DAYS_IN_WEEK, offset % DAYS_IN_WEEK))
    }
}

impl fmt::Display for MonthMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.month.name(), self.year)?;
        let header: Vec<&str> = WEEKDAY_LABELS.iter().map(|label| &label[..2]).collect();
        write!(f, "{}", header.join(" "))?;
        for week in &self.weeks {
            let cells: Vec<String> = week
                .iter()
                .map(|slot| slot.map_or_else(|| "  ".to_owned(), |day| format!("{day:>2}")))
                .collect();
            write!(f, "\n{}", cells.join(" ").trim_end())?;
        }
        Ok(())
    }
}
