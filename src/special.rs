//! User-defined special dates (holidays, anniversaries, events) and matching
//! them against calendar days.
//!
//! A special date is stored as `(day, month, date_type, recurring, year?)`,
//! where `date_type` tells whether day and month are solar or lunar. Storage
//! itself belongs to the application; the serde derives give the record shape.
//!
//! # Example
//!
//! ```
//! use amlich::{Date, TimeZone};
//! use amlich::special::{DateType, SpecialDate};
//!
//! let tet = SpecialDate::new("Tết Nguyên Đán", 1, 1, DateType::Lunar, true, None).unwrap();
//!
//! assert!(tet.occurs_on(Date::from_civil(2025, 1, 29), TimeZone::VIETNAM));
//! assert_eq!(
//!     Some(Date::from_civil(2026, 2, 17)),
//!     tet.occurrence_in(2026, TimeZone::VIETNAM)
//! );
//! ```

use serde::{Deserialize, Serialize};

use crate::astro::TimeZone;
use crate::date::{CivilDate, Date, days_in_month};
use crate::error::{Error, Result};
use crate::vietnamese::{LunarDate, Month, cache};

/// Calendar in which a special date's day and month are given.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateType {
    Solar,
    Lunar,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SpecialDate {
    pub name: String,
    pub day: u32,
    pub month: u32,
    pub date_type: DateType,
    /// Repeats every (solar or lunar) year
    pub recurring: bool,
    /// Year of a one-off date, in the calendar of `date_type`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl SpecialDate {
    /// Creates a checked special date.
    ///
    /// Lunar days may go up to 30 in any month; a solar day must exist in
    /// `month` of `year` (February 29 is accepted when there is no year).
    pub fn new(
        name: impl Into<String>,
        day: u32,
        month: u32,
        date_type: DateType,
        recurring: bool,
        year: Option<i32>,
    ) -> Result<Self> {
        let name = name.into();
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidMonth(month));
        }
        let max_day = match date_type {
            DateType::Solar => days_in_month(year, month),
            DateType::Lunar => 30,
        };
        if day == 0 || day > max_day {
            return Err(Error::InvalidDay {
                year: year.unwrap_or(0),
                month,
                day,
            });
        }
        if !recurring && year.is_none() {
            return Err(Error::MissingYear(name));
        }
        Ok(Self {
            name,
            day,
            month,
            date_type,
            recurring,
            year,
        })
    }

    /// Whether the special date falls on `date`.
    ///
    /// Lunar special dates only match regular months, never a leap month of
    /// the same number, and a day 30 does not occur in a 29-day month.
    pub fn occurs_on(&self, date: Date, tz: TimeZone) -> bool {
        let (year, month, day) = match self.date_type {
            DateType::Solar => {
                let civil = date.civil();
                (civil.year, civil.month, civil.day)
            }
            DateType::Lunar => {
                let lunar = cache::solar_to_lunar(date, tz);
                if lunar.is_leap_month() {
                    return false;
                }
                (lunar.year, lunar.month.num(), lunar.day)
            }
        };
        day == self.day && month == self.month && (self.recurring || self.year == Some(year))
    }

    /// The day the special date falls on in `year` (a lunar year for lunar
    /// dates), if it occurs that year.
    pub fn occurrence_in(&self, year: i32, tz: TimeZone) -> Option<Date> {
        if !self.recurring && self.year != Some(year) {
            return None;
        }
        match self.date_type {
            DateType::Solar => CivilDate::new(year, self.month, self.day)
                .ok()
                .map(|civil| civil.to_date()),
            DateType::Lunar => LunarDate::new(year, Month::Common(self.month), self.day, tz)
                .ok()
                .map(|lunar| lunar.date),
        }
    }
}

/// The special dates among `dates` falling on `date`.
pub fn on_date(
    dates: &[SpecialDate],
    date: Date,
    tz: TimeZone,
) -> impl Iterator<Item = &SpecialDate> {
    dates.iter().filter(move |s| s.occurs_on(date, tz))
}
