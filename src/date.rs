//! Calendar-independant date, and the civil calendar it is usually written in.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Julian day number of 1582-10-15, the first day of the Gregorian calendar.
///
/// Civil dates before it are in the (proleptic) Julian calendar.
pub const GREGORIAN_REFORM: i32 = 2299161;

/// A calendar-independant date, i.e. a Julian day number (JDN).
///
/// Any `i32` is accepted; days before January 1, 4713 BC (Julian) have a
/// negative JDN.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Date {
    jdn: i32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: i32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> i32 {
        self.jdn
    }

    /// Creates a `Date` from a civil date: Gregorian from 1582-10-15 on,
    /// Julian before.
    ///
    /// `year` is an astronomical year number, i.e. 1 BC is `0`, 2 BC is `-1`,
    /// etc. The date is not validated; an invalid one gives a meaningless
    /// (but deterministic) result.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// assert_eq!(2451545, Date::from_civil(2000, 1, 1).jdn());
    /// assert_eq!(2299160, Date::from_civil(1582, 10, 4).jdn());
    /// assert_eq!(2299161, Date::from_civil(1582, 10, 15).jdn());
    /// ```
    pub fn from_civil(year: i32, month: u32, day: u32) -> Self {
        let (m, d) = (month as i32, day as i32);
        let a = (14 - m).div_euclid(12);
        let y = year + 4800 - a;
        let m = m + 12 * a - 3;
        let julian = d + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4);
        let gregorian = julian - y.div_euclid(100) + y.div_euclid(400) - 32045;
        if gregorian >= GREGORIAN_REFORM {
            Self::from_jdn(gregorian)
        } else {
            Self::from_jdn(julian - 32083)
        }
    }
    /// Represents the date in the civil calendar (see [`Date::from_civil`]).
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::{CivilDate, Date};
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!(CivilDate { year: 2000, month: 1, day: 1 }, date.civil());
    /// ```
    pub fn civil(&self) -> CivilDate {
        let jdn = self.jdn;
        let (b, c) = if jdn >= GREGORIAN_REFORM {
            let a = jdn + 32044;
            let b = (4 * a + 3).div_euclid(146097);
            (b, a - (146097 * b).div_euclid(4))
        } else {
            (0, jdn + 32082)
        };
        let d = (4 * c + 3).div_euclid(1461);
        let e = c - (1461 * d).div_euclid(4);
        let m = (5 * e + 2).div_euclid(153);
        CivilDate {
            year: 100 * b + d - 4800 + m.div_euclid(10),
            month: (m + 3 - 12 * m.div_euclid(10)) as u32,
            day: (e - (153 * m + 2).div_euclid(5) + 1) as u32,
        }
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// assert_eq!("2024-02-10", Date::from_civil(2024, 2, 10).iso());
    /// ```
    pub fn iso(&self) -> String {
        self.civil().to_string()
    }

    /// Returns the day of week of the date, in ISO-8601 numbering (i.e.
    /// `1..=7` for Monday through Sunday)
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let date = Date::from_civil(2000, 1, 1);
    /// assert_eq!(6, date.day_of_week()); // Saturday
    /// ```
    pub fn day_of_week(&self) -> u32 {
        self.jdn.rem_euclid(7) as u32 + 1
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(self.jdn + rhs)
    }
}
impl Sub<i32> for Date {
    type Output = Date;
    fn sub(self, rhs: i32) -> Self::Output {
        Date::from_jdn(self.jdn - rhs)
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn - rhs.jdn
    }
}

impl From<CivilDate> for Date {
    fn from(date: CivilDate) -> Self {
        date.to_date()
    }
}

/// A day in the civil calendar, Gregorian from 1582-10-15 on and Julian
/// before.
///
/// The fields are public and unchecked: the converters accept whatever they
/// are given. Use [`CivilDate::new`] or [`str::parse`] for a checked value.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct CivilDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CivilDate {
    /// The all-zero date, returned by
    /// [`lunar_to_solar`](crate::vietnamese::lunar_to_solar) when the lunar
    /// date does not exist.
    pub const NONE: CivilDate = CivilDate {
        year: 0,
        month: 0,
        day: 0,
    };

    /// Creates a checked civil date.
    ///
    /// Days dropped by the 1582 reform (October 5 to 14) are rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::CivilDate;
    ///
    /// assert!(CivilDate::new(2024, 2, 29).is_ok());
    /// assert!(CivilDate::new(2023, 2, 29).is_err());
    /// assert!(CivilDate::new(1500, 2, 29).is_ok()); // Julian leap year
    /// ```
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidMonth(month));
        }
        let year_type = if year < 1582 {
            YearType::from_julian(year)
        } else {
            YearType::from_gregorian(year)
        };
        let in_reform_gap = year == 1582 && month == 10 && (5..=14).contains(&day);
        if day == 0 || day > month_length(month, year_type) || in_reform_gap {
            return Err(Error::InvalidDay { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// `true` for the [`CivilDate::NONE`] sentinel.
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    pub fn to_date(&self) -> Date {
        Date::from_civil(self.year, self.month, self.day)
    }
}

impl From<Date> for CivilDate {
    fn from(date: Date) -> Self {
        date.civil()
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CivilDate {
    type Err = Error;

    /// Parses `YYYY-MM-DD`, with an optional leading `-` for years before 1
    /// BC.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidFormat(s.to_owned());
        let (sign, rest) = match s.trim().strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, s.trim()),
        };
        let mut fields = rest.split('-');
        let (Some(y), Some(m), Some(d), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(invalid());
        };
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month = m.parse().map_err(|_| invalid())?;
        let day = d.parse().map_err(|_| invalid())?;
        Self::new(sign * year, month, day)
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Determines if `year` is a leap year in Julian calendar.
    pub fn from_julian(year: i32) -> Self {
        if year.rem_euclid(4) == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

/// Number of days in a Gregorian month.
///
/// If `year` is `None`, February has 29 days, so that a date picker with no
/// year chosen yet still offers February 29.
///
/// # Example
///
/// ```
/// use amlich::date::days_in_month;
///
/// assert_eq!(29, days_in_month(Some(2024), 2));
/// assert_eq!(28, days_in_month(Some(2023), 2));
/// assert_eq!(29, days_in_month(None, 2));
/// assert_eq!(31, days_in_month(None, 12));
/// ```
///
/// # Panics
///
/// Panics if `month` is not in `1..=12`.
pub fn days_in_month(year: Option<i32>, month: u32) -> u32 {
    let year_type = year.map_or(YearType::Leap, YearType::from_gregorian);
    month_length(month, year_type)
}

fn month_length(month: u32, year_type: YearType) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 28 + year_type.is_leap() as u32,
        _ => panic!("month {} not in 1..=12", month),
    }
}
