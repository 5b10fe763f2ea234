/// Number of columns in a week row
pub const DAYS_IN_WEEK: usize = 7;

/// Number of months in a year
pub const MONTHS_PER_YEAR: u8 = 12;

/// Highest zero-based month index (December)
pub const MAX_MONTH: u8 = 11;

/// Zero-based month index for January
pub const JANUARY: u8 = 0;
/// Zero-based month index for February
pub const FEBRUARY: u8 = 1;
/// Zero-based month index for December
pub const DECEMBER: u8 = 11;

/// First day of month
pub const MIN_DAY: u8 = 1;

/// Months shown per quarter of the year grid (a 3x4 layout, not a 3-month quarter)
pub const MONTHS_PER_QUARTER: u8 = 4;

/// Quarters per year in the year grid
pub const QUARTERS_PER_YEAR: u8 = 3;

/// Highest quarter index
pub const MAX_QUARTER: u8 = QUARTERS_PER_YEAR - 1;

/// Largest year representable in a date key (four digits)
pub const MAX_KEY_YEAR: i32 = 9999;

/// Full month names, indexed by zero-based month
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

/// Weekday column labels, Sunday first
pub const WEEKDAY_LABELS: [&str; DAYS_IN_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Weekday of 1970-01-01 (Thursday), with Sunday = 0
pub(crate) const EPOCH_WEEKDAY: i64 = 4;

/// Date key component separator (ISO 8601)
pub const DATE_KEY_SEPARATOR: char = '-';
