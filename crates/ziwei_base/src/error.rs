//! Error types for chart computation.

use thiserror::Error;

/// Errors from calendar conversion and chart assembly.
///
/// All variants describe invalid input; the engine touches no external
/// resource, so the same input always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// Date lies outside the supported table range, or is not a real
    /// calendar date (day 30 of a 29-day month, month 13, ...).
    #[error("date {year:04}-{month:02}-{day:02} is outside the supported range or invalid")]
    DateOutOfRange { year: i32, month: i32, day: i32 },
    /// Solar date falls inside a lunar leap month and the caller did not
    /// acknowledge it with the leap-month flag.
    #[error("lunar year {lunar_year} month {lunar_month} is a leap month; set the leap-month flag")]
    AmbiguousLeapMonth { lunar_year: i32, lunar_month: u8 },
    /// Hour outside 0..=23.
    #[error("invalid hour {0}: expected 0-23")]
    InvalidHour(i32),
}

impl ChartError {
    pub(crate) const fn out_of_range(year: i32, month: i32, day: i32) -> Self {
        Self::DateOutOfRange { year, month, day }
    }
}
