//! `YYYY-MM` month keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{util::days_in_year_month, Date, Month, OffsetDateTime};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9998;

/// A calendar month, canonically written as `YYYY-MM`.
///
/// Stores the first day of the month so every derived boundary is already
/// known to be a valid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    first_day: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonthKeyError {
    #[error("month must be formatted as YYYY-MM (got {0:?})")]
    Format(String),

    #[error("month {0} is out of range")]
    OutOfRange(u8),

    #[error("year {0} is out of range")]
    YearOutOfRange(i32),
}

impl MonthKey {
    pub fn new(year: i32, month: Month) -> Result<Self, MonthKeyError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(MonthKeyError::YearOutOfRange(year));
        }
        let first_day = Date::from_calendar_date(year, month, 1)
            .map_err(|_| MonthKeyError::YearOutOfRange(year))?;
        Ok(Self { first_day })
    }

    /// Month containing `instant`, evaluated in UTC.
    pub fn containing(instant: OffsetDateTime) -> Self {
        let utc = instant.to_offset(time::UtcOffset::UTC);
        let first_day = utc.date().replace_day(1).unwrap_or(utc.date());
        Self { first_day }
    }

    /// Parse `raw`, falling back to the month containing `now` when it is
    /// absent or malformed.
    pub fn parse_or(raw: Option<&str>, now: OffsetDateTime) -> Self {
        raw.and_then(|value| value.parse().ok())
            .unwrap_or_else(|| Self::containing(now))
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> Month {
        self.first_day.month()
    }

    pub fn first_day(&self) -> Date {
        self.first_day
    }

    pub fn days_in_month(&self) -> u8 {
        days_in_year_month(self.year(), self.month())
    }

    /// Every date of the month, in order.
    pub fn dates(&self) -> impl Iterator<Item = Date> {
        let first = self.first_day;
        (0..self.days_in_month()).filter_map(move |offset| {
            first.replace_day(offset + 1).ok()
        })
    }

    pub fn next(&self) -> Self {
        let (year, month) = match self.month() {
            Month::December => (self.year() + 1, Month::January),
            other => (self.year(), other.next()),
        };
        Date::from_calendar_date(year, month, 1)
            .map(|first_day| Self { first_day })
            .unwrap_or(*self)
    }

    /// Inclusive start of the month, midnight UTC.
    pub fn period_start(&self) -> OffsetDateTime {
        self.first_day.midnight().assume_utc()
    }

    /// Exclusive end of the month: midnight UTC on the first day of the next month.
    pub fn period_end(&self) -> OffsetDateTime {
        self.next().period_start()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month() as u8)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let (year_part, month_part) = trimmed
            .split_once('-')
            .ok_or_else(|| MonthKeyError::Format(raw.to_string()))?;

        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if year_part.len() != 4 || !all_digits(year_part) || month_part.len() != 2 || !all_digits(month_part) {
            return Err(MonthKeyError::Format(raw.to_string()));
        }

        let year: i32 = year_part
            .parse()
            .map_err(|_| MonthKeyError::Format(raw.to_string()))?;
        let month_number: u8 = month_part
            .parse()
            .map_err(|_| MonthKeyError::Format(raw.to_string()))?;
        let month = Month::try_from(month_number).map_err(|_| MonthKeyError::OutOfRange(month_number))?;

        Self::new(year, month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
