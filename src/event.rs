use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    CalendarDate, DATE_KEY_SEPARATOR, MAX_KEY_YEAR, MIN_DAY, Month, ParseError, days_in_month,
};

/// Canonical key of a calendar day, written `YYYY-MM-DD` with a one-based month.
///
/// Events are keyed by this type both when they are loaded and when they are looked
/// up, so a key that does not parse never reaches the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(CalendarDate);

impl DateKey {
    /// Key for a calendar date
    ///
    /// # Errors
    /// Returns `ParseError::YearOutOfRange` if the year does not fit in four digits.
    pub const fn from_date(date: CalendarDate) -> Result<Self, ParseError> {
        if date.year() < 0 || date.year() > MAX_KEY_YEAR {
            return Err(ParseError::YearOutOfRange(date.year()));
        }
        Ok(Self(date))
    }

    pub const fn date(&self) -> CalendarDate {
        self.0
    }

    fn parse_component(s: &str, digits: usize, input: &str) -> Result<u16, ParseError> {
        if s.len() != digits || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidDateKey(input.to_owned()));
        }
        s.parse::<u16>()
            .map_err(|_| ParseError::InvalidDateKey(input.to_owned()))
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{sep}{:02}{sep}{:02}",
            self.0.year(),
            self.0.month().number(),
            self.0.day(),
            sep = DATE_KEY_SEPARATOR
        )
    }
}

impl FromStr for DateKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = s.split(DATE_KEY_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidDateKey(s.to_owned()));
        };

        let year = Self::parse_component(year, 4, s)?;
        let month = Self::parse_component(month, 2, s)?;
        let day = Self::parse_component(day, 2, s)?;

        // one-based on the wire
        let month = u8::try_from(month)
            .ok()
            .and_then(|m| m.checked_sub(1))
            .and_then(|m| Month::new(m).ok())
            .ok_or_else(|| ParseError::InvalidDateKey(s.to_owned()))?;
        let day = u8::try_from(day).map_err(|_| ParseError::InvalidDateKey(s.to_owned()))?;

        let date = CalendarDate::new(i32::from(year), month, day)?;
        Self::from_date(date)
    }
}

impl TryFrom<CalendarDate> for DateKey {
    type Error = ParseError;

    fn try_from(date: CalendarDate) -> Result<Self, Self::Error> {
        Self::from_date(date)
    }
}

impl Serialize for DateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A dated entry supplied by the event source. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique per day in practice
    pub title: String,
    /// Category tag, used by renderers to pick a color
    #[serde(rename = "type")]
    pub kind: String,
    pub date: DateKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

impl Event {
    pub const NO_TIME: &'static str = "Time not specified";
    pub const NO_DESCRIPTION: &'static str = "No description provided.";

    pub fn is_on(&self, date_key: &DateKey) -> bool {
        self.date == *date_key
    }

    pub fn time_label(&self) -> &str {
        self.time.as_deref().unwrap_or(Self::NO_TIME)
    }

    pub fn description(&self) -> &str {
        self.desc.as_deref().unwrap_or(Self::NO_DESCRIPTION)
    }
}

/// Events whose date key equals `date_key`, in the order they were supplied.
///
/// An empty result means "no events on that day"; whether the events were loaded
/// at all is for the caller to track.
pub fn events_for_date<'a>(date_key: &DateKey, events: &'a [Event]) -> Vec<&'a Event> {
    let matched: Vec<&Event> = events.iter().filter(|event| event.is_on(date_key)).collect();
    log::trace!(
        "{} of {} events on {date_key}",
        matched.len(),
        events.len()
    );
    matched
}

/// Events grouped by date key, for answering many per-cell lookups over one collection
#[derive(Debug, Clone, Default)]
pub struct EventIndex<'a> {
    by_date: BTreeMap<DateKey, Vec<&'a Event>>,
}

impl<'a> EventIndex<'a> {
    pub fn new(events: &'a [Event]) -> Self {
        let mut by_date: BTreeMap<DateKey, Vec<&'a Event>> = BTreeMap::new();
        for event in events {
            by_date.entry(event.date).or_default().push(event);
        }
        log::trace!(
            "indexed {} events over {} dates",
            events.len(),
            by_date.len()
        );
        Self { by_date }
    }

    /// Same result as [`events_for_date`] over the indexed collection
    pub fn for_date(&self, date_key: &DateKey) -> &[&'a Event] {
        self.by_date
            .get(date_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Days of the month that have at least one event, ascending
    pub fn days_with_events(&self, year: i32, month: Month) -> Vec<u8> {
        let bounds = CalendarDate::new(year, month, MIN_DAY)
            .and_then(DateKey::from_date)
            .and_then(|first| {
                let last = CalendarDate::new(year, month, days_in_month(year, month))?;
                Ok((first, DateKey::from_date(last)?))
            });
        let Ok((first, last)) = bounds else {
            return Vec::new();
        };
        self.by_date
            .range(first..=last)
            .map(|(key, _)| key.date().day())
            .collect()
    }

    /// Number of distinct dates with events
    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}
