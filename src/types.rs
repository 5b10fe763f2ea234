use crate::ParseError;
use crate::consts::{
    DAYS_IN_WEEK, DECEMBER, EPOCH_WEEKDAY, FEBRUARY, JANUARY, MAX_MONTH, MAX_QUARTER, MIN_DAY,
    MONTH_NAMES, MONTHS_PER_QUARTER, MONTHS_PER_YEAR,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A zero-based month index guaranteed to be in the range `0..=MAX_MONTH` (January = 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(u8);

impl Month {
    pub const JANUARY: Self = Self(JANUARY);
    pub const DECEMBER: Self = Self(DECEMBER);

    /// Creates a new Month, validating that it's <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is > `MAX_MONTH`.
    pub const fn new(value: u8) -> Result<Self, ParseError> {
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(value))
    }

    /// Month for an index already reduced modulo 12
    pub(crate) const fn wrapping(value: u8) -> Self {
        Self(value % MONTHS_PER_YEAR)
    }

    /// Returns the zero-based month index
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the one-based month number used in date keys
    #[inline]
    pub const fn number(self) -> u8 {
        self.0 + 1
    }

    /// Full English month name
    pub const fn name(self) -> &'static str {
        MONTH_NAMES[self.0 as usize]
    }

    /// Three-letter abbreviation of the month name
    pub fn abbrev(self) -> &'static str {
        &self.name()[..3]
    }

    /// All twelve months in calendar order
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..MONTHS_PER_YEAR).map(Self)
    }

    /// The quarter of the year grid this month is shown in
    pub const fn quarter(self) -> Quarter {
        Quarter(self.0 / MONTHS_PER_QUARTER)
    }

    /// Previous month, wrapping December <- January. The flag is set on wraparound.
    pub const fn pred_wrapping(self) -> (Self, bool) {
        if self.0 == JANUARY {
            (Self::DECEMBER, true)
        } else {
            (Self(self.0 - 1), false)
        }
    }

    /// Next month, wrapping December -> January. The flag is set on wraparound.
    pub const fn succ_wrapping(self) -> (Self, bool) {
        if self.0 == DECEMBER {
            (Self::JANUARY, true)
        } else {
            (Self(self.0 + 1), false)
        }
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the three four-month groupings of the year grid:
/// 0 = January..April, 1 = May..August, 2 = September..December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quarter(u8);

impl Quarter {
    pub const FIRST: Self = Self(0);
    pub const LAST: Self = Self(MAX_QUARTER);

    /// Creates a new Quarter, validating that it's <= `MAX_QUARTER`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidQuarter` if the value is > `MAX_QUARTER`.
    pub const fn new(value: u8) -> Result<Self, ParseError> {
        if value > MAX_QUARTER {
            return Err(ParseError::InvalidQuarter(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn first_month(self) -> Month {
        Month(self.0 * MONTHS_PER_QUARTER)
    }

    /// The four months covered by this quarter, in order
    pub const fn months(self) -> [Month; MONTHS_PER_QUARTER as usize] {
        let first = self.0 * MONTHS_PER_QUARTER;
        [
            Month(first),
            Month(first + 1),
            Month(first + 2),
            Month(first + 3),
        ]
    }

    pub const fn contains(self, month: Month) -> bool {
        month.0 / MONTHS_PER_QUARTER == self.0
    }
}

impl TryFrom<u8> for Quarter {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quarter> for u8 {
    fn from(quarter: Quarter) -> Self {
        quarter.0
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, .., last] = self.months();
        write!(f, "{}-{}", first.abbrev(), last.abbrev())
    }
}

/// A concrete Gregorian calendar day with a zero-based month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCalendarDate")]
pub struct CalendarDate {
    year:  i32,
    month: Month,
    day:   u8,
}

#[derive(Deserialize)]
struct RawCalendarDate {
    year:  i32,
    month: Month,
    day:   u8,
}

impl TryFrom<RawCalendarDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(raw: RawCalendarDate) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month, raw.day)
    }
}

impl CalendarDate {
    /// Creates a new date, validating the day against the month length
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the day is 0 or past the end of the month.
    pub fn new(year: i32, month: Month, day: u8) -> Result<Self, ParseError> {
        if day < MIN_DAY || day > days_in_month(year, month) {
            return Err(ParseError::InvalidDay {
                year,
                month: month.number(),
                day,
            });
        }
        Ok(Self { year, month, day })
    }

    /// Takes the date part of any chrono value, e.g. a `NaiveDate` or `DateTime<Local>`
    pub fn from_datelike<D: Datelike>(date: &D) -> Self {
        // chrono only hands out valid dates
        #[allow(clippy::cast_possible_truncation)]
        let day = date.day() as u8;
        #[allow(clippy::cast_possible_truncation)]
        let month = Month::wrapping(date.month0() as u8);
        Self {
            year: date.year(),
            month,
            day,
        }
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Weekday of this date, 0 = Sunday .. 6 = Saturday
    pub fn weekday(&self) -> u8 {
        weekday_of(day_number(i64::from(self.year), self.month, self.day))
    }
}

// --- calendar arithmetic ---

/// Reduces an arbitrary (year, month index) pair to a valid one,
/// e.g. month 12 becomes January of the next year.
pub(crate) fn normalize_month(year: i64, month: i64) -> (i64, Month) {
    let months_per_year = i64::from(MONTHS_PER_YEAR);
    let total = year * months_per_year + month;
    let index = total.rem_euclid(months_per_year);
    // rem_euclid keeps the index in 0..12
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let month = Month::wrapping(index as u8);
    (total.div_euclid(months_per_year), month)
}

/// Days since 1970-01-01 of the given proleptic Gregorian date.
/// Works for any year without overflow in `i64`.
pub(crate) fn day_number(year: i64, month: Month, day: u8) -> i64 {
    // Shift the year to start in March so the leap day is the last day of the year
    let year = if month.get() <= FEBRUARY { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let month_from_march = i64::from((month.get() + 10) % MONTHS_PER_YEAR);
    let day_of_year = (153 * month_from_march + 2) / 5 + i64::from(day) - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

/// Weekday of a day number, 0 = Sunday .. 6 = Saturday
pub(crate) fn weekday_of(day_number: i64) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let weekday = (day_number + EPOCH_WEEKDAY).rem_euclid(DAYS_IN_WEEK as i64) as u8;
    weekday
}

/// Number of days in a month, taken as the day before the first of the next month
pub(crate) fn month_length(year: i64, month: Month) -> u8 {
    let first = day_number(year, month, MIN_DAY);
    let (next_year, next_month) = normalize_month(year, i64::from(month.get()) + 1);
    let last = day_number(next_year, next_month, MIN_DAY) - 1;
    // a month spans 28..=31 days
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let length = (last - first + 1) as u8;
    length
}

pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: Month) -> u8 {
    month_length(i64::from(year), month)
}
