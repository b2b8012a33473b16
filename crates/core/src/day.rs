#![forbid(unsafe_code)]

use std::fmt;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, UtcOffset};

/// A calendar day with no time-of-day component. Status entries are keyed on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(Date);

impl Day {
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self, DayError> {
        let month = Month::try_from(month)?;
        Ok(Self(Date::from_calendar_date(year, month, day)?))
    }

    /// Parses the `YYYY-MM-DD` form used in storage and on the page.
    pub fn parse(value: &str) -> Result<Self, DayError> {
        let date = Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))?;
        Ok(Self(date))
    }

}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DayError {
    #[error("invalid day format (expected YYYY-MM-DD): {0}")]
    Parse(#[from] time::error::Parse),
    #[error("day out of range: {0}")]
    Range(#[from] time::error::ComponentRange),
}

/// Resolves "today" in a fixed UTC offset.
///
/// The local offset can only be queried reliably while the process is
/// single-threaded, so it is captured once at startup and reused by every
/// request thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalCalendar {
    offset: UtcOffset,
}

impl LocalCalendar {
    /// Captures the system's local offset. Must run before any threads are spawned.
    pub fn detect() -> Result<Self, time::error::IndeterminateOffset> {
        UtcOffset::current_local_offset().map(Self::with_offset)
    }

    pub fn utc() -> Self {
        Self::with_offset(UtcOffset::UTC)
    }

    pub fn with_offset(offset: UtcOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    pub fn today(&self) -> Day {
        self.day_of(OffsetDateTime::now_utc())
    }

    pub fn day_of(&self, instant: OffsetDateTime) -> Day {
        Day(instant.to_offset(self.offset).date())
    }
}
