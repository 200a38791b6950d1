//! Error type for the validating entry points of this crate.
//!
//! The conversion functions themselves are total and never return these;
//! see [`CivilDate::NONE`](crate::CivilDate::NONE) for the "no such date"
//! sentinel they use instead.

use thiserror::Error;

use crate::vietnamese::Month;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid month: {0} (must be 1-12)")]
    InvalidMonth(u32),

    #[error("invalid day {day} for {year:04}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },

    #[error("invalid date format: {0:?}")]
    InvalidFormat(String),

    #[error("invalid time zone: {0:?}")]
    InvalidTimeZone(String),

    /// The lunar year has no such month (a leap month it does not contain).
    #[error("lunar year {year} has no month {month:?}")]
    NoSuchLunarMonth { year: i32, month: Month },

    #[error("lunar month {month:?} of {year} has {len} days, got day {day}")]
    InvalidLunarDay {
        year: i32,
        month: Month,
        day: u32,
        len: u32,
    },

    /// A non-recurring special date needs a year.
    #[error("non-recurring special date {0:?} has no year")]
    MissingYear(String),
}

/// Shorthand `Result` used by the validating constructors.
pub type Result<T, E = Error> = std::result::Result<T, E>;
