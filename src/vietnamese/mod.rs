//! Vietnamese lunisolar calendar (âm lịch)
//!
//! Months begin on the local day (UTC+7 by default) of a new moon, and are
//! numbered from month 11, the one containing the winter solstice. A lunar year
//! of 13 months repeats the first month that contains no principal solar term
//! as a leap month (tháng nhuận).
//!
//! The astronomy is the low-precision one of [`crate::astro`], so results
//! agree with the published Vietnamese calendar rather than with a modern
//! ephemeris.
//!
//! # Example
//!
//! ```
//! use amlich::{Date, TimeZone};
//! use amlich::vietnamese::{LunarDate, Month::*};
//!
//! let tet = LunarDate::from_date(Date::from_civil(2024, 2, 10), TimeZone::VIETNAM);
//!
//! assert_eq!((2024, Common(1), 1), (tet.year, tet.month, tet.day));
//! assert_eq!("Giáp Thìn", tet.year_can_chi().to_string());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt as std_fmt;

use crate::astro::{TimeZone, new_moon_day};
use crate::date::{CivilDate, Date};
use crate::error::{Error, Result};

pub mod cache;
mod convert;
pub mod fmt;
pub mod sexagenary;

pub use convert::{
    leap_month_offset, lunar_days_in_solar_month, lunar_month_length, lunar_to_solar,
    lunar_year_leap_month, month11_start, solar_to_lunar,
};
use convert::{lunation_of, wrap_month};
use sexagenary::{CanChi, Sexagenary};

/// 「Annus」, the span from the start of month 11 (the month of the winter
/// solstice) to the day before the next month 11.
///
/// The calendar is computed per annus; the lunar *year* (beginning with month
/// 1) is derived from it. Annus `n` starts in late `n - 1` and holds months 11
/// and 12 of lunar year `n - 1` followed by months 1 to 10 of lunar year `n`.
///
/// # Example
///
/// ```
/// use amlich::{Date, TimeZone};
/// use amlich::vietnamese::{Annus, Month::*};
///
/// let annus = Annus::new(2023, TimeZone::VIETNAM);
///
/// assert_eq!(Some(Leap(2)), annus.leap_month());
/// assert_eq!(14, annus.months.len());
/// ```
#[derive(Debug, Clone)]
pub struct Annus {
    /// The Gregorian year holding most of the annus
    pub annus: i32,
    pub tz: TimeZone,
    /// Start of every month, plus the start of the next annus to mark the end
    /// of this one
    pub months: Vec<NewMoon>,
}

/// Start of a lunar month.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NewMoon {
    pub month: Month,
    /// Local day of the new moon
    pub date: Date,
}

/// Month name: `Common` for a regular month, `Leap` for the intercalary month
/// repeating the number of the month before it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Month {
    Common(u32),
    Leap(u32),
}

impl Month {
    /// Month number, leap or not.
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// `true` for a leap month
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// Vietnamese name of the month, e.g. "Tháng Giêng", "Tháng Chạp".
    pub fn name(&self) -> String {
        fmt::month(*self)
    }
}

impl Annus {
    /// Computes annus `annus` (see [`Annus`]) in time zone `tz`.
    pub fn new(annus: i32, tz: TimeZone) -> Self {
        use Month::*;

        let a11 = month11_start(annus - 1, tz);
        let b11 = month11_start(annus, tz);
        let k = lunation_of(a11);
        let leap = (b11 - a11 > 365).then(|| leap_month_offset(a11, tz));
        let count = if leap.is_some() { 13 } else { 12 };

        let months: Vec<_> = (0..=count)
            .map(|i| {
                let month = match leap {
                    Some(l) if i == l => Leap(wrap_month(i + 10)),
                    Some(l) if i > l => Common(wrap_month(i + 10)),
                    _ => Common(wrap_month(i + 11)),
                };
                NewMoon {
                    month,
                    date: new_moon_day(k + i, tz),
                }
            })
            .collect();
        assert_eq!(
            b11,
            months[count as usize].date,
            "{} lunations do not span annus {}",
            count,
            annus
        );

        Annus { annus, tz, months }
    }
    /// Finds the annus containing `date`.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::{Date, TimeZone};
    /// use amlich::vietnamese::Annus;
    ///
    /// let date = Date::from_civil(2023, 12, 31);
    /// let annus = Annus::from_date(date, TimeZone::VIETNAM);
    ///
    /// assert_eq!(2024, annus.annus);
    /// ```
    pub fn from_date(date: Date, tz: TimeZone) -> Self {
        let mut y = date.civil().year;
        loop {
            let annus = Self::new(y, tz);
            if (annus.start()..annus.end()).contains(&date) {
                return annus;
            }
            y += if date < annus.start() { -1 } else { 1 };
        }
    }

    /// First day of the annus.
    pub fn start(&self) -> Date {
        self.months[0].date
    }
    /// First day of the next annus.
    pub fn end(&self) -> Date {
        self.months[self.months.len() - 1].date
    }

    /// The leap month of the annus, if any.
    pub fn leap_month(&self) -> Option<Month> {
        self.months
            .iter()
            .map(|m| m.month)
            .find(Month::is_leap)
    }

    /// Lunar `(year, month, day)` of `date`.
    ///
    /// Returns `Err` telling whether `date` is before or after the annus if it
    /// is not in it.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::{Date, TimeZone};
    /// use amlich::vietnamese::{Annus, Month::*};
    ///
    /// let annus = Annus::new(2023, TimeZone::VIETNAM);
    /// let date = Date::from_civil(2023, 4, 1);
    ///
    /// assert_eq!(Ok((2023, Leap(2), 11)), annus.ymd_for(date));
    /// ```
    pub fn ymd_for(&self, date: Date) -> std::result::Result<(i32, Month, u32), OtherAnnus> {
        if date < self.start() {
            return Err(OtherAnnus::Before);
        } else if date >= self.end() {
            return Err(OtherAnnus::After);
        }

        let idx = self.months.partition_point(|m| m.date <= date) - 1;
        let m = &self.months[idx];
        let d = (date - m.date + 1) as u32;
        let y = if m.month.num() >= 11 && idx < 4 {
            self.annus - 1
        } else {
            self.annus
        };
        Ok((y, m.month, d))
    }

    /// Like [`Annus::ymd_for`], as a [`LunarDate`].
    pub fn lunar_date(&self, date: Date) -> std::result::Result<LunarDate, OtherAnnus> {
        let (year, month, day) = self.ymd_for(date)?;
        Ok(LunarDate {
            year,
            month,
            day,
            date,
        })
    }

    /// Length of each month in days, in order, the leap month included.
    pub fn month_lengths(&self) -> impl Iterator<Item = (Month, u32)> + '_ {
        self.months
            .windows(2)
            .map(|w| (w[0].month, (w[1].date - w[0].date) as u32))
    }
}

/// Tells that a date is not in the annus, and on which side it is.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OtherAnnus {
    Before,
    After,
}

/// A day in the Vietnamese lunar calendar, with the solar day it falls on.
///
/// `year` is the lunar year, the one containing lunar month 1; near Tết it
/// differs from the Gregorian year of `date`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,
    pub month: Month,
    pub day: u32,
    /// The solar day
    pub date: Date,
}

impl LunarDate {
    /// Converts a solar day; same as [`solar_to_lunar`].
    pub fn from_date(date: Date, tz: TimeZone) -> Self {
        solar_to_lunar(date, tz)
    }

    /// Creates a checked lunar date.
    ///
    /// Fails if the lunar year has no such month (a leap month it does not
    /// contain) or the month is shorter than `day`.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::TimeZone;
    /// use amlich::vietnamese::{LunarDate, Month::*};
    ///
    /// let tz = TimeZone::VIETNAM;
    /// assert_eq!("2023-03-22", LunarDate::new(2023, Leap(2), 1, tz).unwrap().date.iso());
    /// assert!(LunarDate::new(2024, Leap(2), 1, tz).is_err());
    /// ```
    pub fn new(year: i32, month: Month, day: u32, tz: TimeZone) -> Result<Self> {
        if !(1..=12).contains(&month.num()) {
            return Err(Error::InvalidMonth(month.num()));
        }
        let len =
            lunar_month_length(year, month, tz).ok_or(Error::NoSuchLunarMonth { year, month })?;
        if day == 0 || day > len {
            return Err(Error::InvalidLunarDay {
                year,
                month,
                day,
                len,
            });
        }
        let date = lunar_to_solar(year, month, day, tz).to_date();
        Ok(Self {
            year,
            month,
            day,
            date,
        })
    }

    pub fn is_leap_month(&self) -> bool {
        self.month.is_leap()
    }

    pub fn civil(&self) -> CivilDate {
        self.date.civil()
    }

    /// e.g. "Mùng Một", "Hai Mươi Lăm"
    pub fn day_name(&self) -> String {
        fmt::day(self.day)
    }
    /// e.g. "Tháng Giêng", "Tháng Hai Nhuận"
    pub fn month_name(&self) -> String {
        self.month.name()
    }

    pub fn year_can_chi(&self) -> Sexagenary {
        Sexagenary::for_year(self.year)
    }
    pub fn month_can_chi(&self) -> Sexagenary {
        Sexagenary::for_month(self.year, self.month.num())
    }
    pub fn day_can_chi(&self) -> Sexagenary {
        Sexagenary::for_day(self.date)
    }
    pub fn can_chi(&self) -> CanChi {
        CanChi {
            day: self.day_can_chi(),
            month: self.month_can_chi(),
            year: self.year_can_chi(),
        }
    }
    /// Animal of the lunar year, e.g. "Con Rồng".
    pub fn zodiac(&self) -> &'static str {
        self.year_can_chi().zodiac()
    }

    /// All display names at once.
    pub fn labels(&self) -> LunarLabels {
        LunarLabels {
            day_name: self.day_name(),
            month_name: self.month_name(),
            year_can_chi: self.year_can_chi().to_string(),
            month_can_chi: self.month_can_chi().to_string(),
            day_can_chi: self.day_can_chi().to_string(),
            zodiac: self.zodiac().to_owned(),
        }
    }
}

impl std_fmt::Display for LunarDate {
    /// `day/month/year`, with "nhuận" after a leap month, e.g. `1/2 nhuận/2023`.
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        let leap = if self.is_leap_month() { " nhuận" } else { "" };
        write!(f, "{}/{}{}/{}", self.day, self.month.num(), leap, self.year)
    }
}

/// Display names of a [`LunarDate`], for rendering.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct LunarLabels {
    pub day_name: String,
    pub month_name: String,
    pub year_can_chi: String,
    pub month_can_chi: String,
    pub day_can_chi: String,
    pub zodiac: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use Month::*;

    const TZ: TimeZone = TimeZone::VIETNAM;

    #[test]
    fn from_date() {
        let dataset = [
            (2023, (2023, 1, 22)),
            (2023, (2023, 12, 12)),
            (2024, (2023, 12, 13)),
            (2024, (2024, 2, 10)),
        ];
        for (std, (y, m, d)) in dataset {
            assert_eq!(
                std,
                Annus::from_date(Date::from_civil(y, m, d), TZ).annus,
                "{y}-{m}-{d}"
            );
        }
    }

    #[test]
    fn leap_months() {
        let stds = [
            (11, "2022-11-24"),
            (12, "2022-12-23"),
            (1, "2023-01-22"),
            (2, "2023-02-20"),
            (-2, "2023-03-22"),
            (3, "2023-04-20"),
        ];
        let annus = Annus::new(2023, TZ);
        for (std, month) in stds.iter().zip(&annus.months) {
            let std_month = if std.0 > 0 {
                Common(std.0 as u32)
            } else {
                Leap(-std.0 as u32)
            };
            assert_eq!(
                (std_month, std.1.into()),
                (month.month, month.date.iso())
            );
        }
        assert_eq!(14, annus.months.len());
        assert_eq!(Common(11), annus.months[13].month);
    }

    #[test]
    fn common_annus() {
        let annus = Annus::new(2024, TZ);
        assert_eq!(13, annus.months.len());
        assert_eq!(None, annus.leap_month());
        let names: Vec<_> = annus.months.iter().map(|m| m.month.num()).collect();
        assert_eq!(vec![11, 12, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11], names);
        assert_eq!("2024-02-10", annus.months[2].date.iso());
    }

    #[test]
    fn dates() {
        use OtherAnnus::*;
        let data = [
            ((2022, 11, 24), Ok((2022, Common(11), 1))),
            ((2023, 1, 21), Ok((2022, Common(12), 30))),
            ((2023, 1, 22), Ok((2023, Common(1), 1))),
            ((2023, 3, 21), Ok((2023, Common(2), 30))),
            ((2023, 3, 22), Ok((2023, Leap(2), 1))),
            ((2022, 11, 23), Err(Before)),
            ((2023, 12, 13), Err(After)),
        ];
        let annus = Annus::new(2023, TZ);
        for ((y, m, d), std) in data {
            assert_eq!(std, annus.ymd_for(Date::from_civil(y, m, d)), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn annus_agrees_with_solar_to_lunar() {
        for annus in [2017, 2020, 2023, 2024, 2025] {
            let annus = Annus::new(annus, TZ);
            let mut date = annus.start();
            while date < annus.end() {
                assert_eq!(Ok(solar_to_lunar(date, TZ)), annus.lunar_date(date), "{}", date.iso());
                date = date + 1;
            }
        }
    }

    #[test]
    fn month_lengths_sum_to_annus() {
        for y in 1990..2040 {
            let annus = Annus::new(y, TZ);
            let total: u32 = annus
                .month_lengths()
                .map(|(_, len)| {
                    assert!(len == 29 || len == 30);
                    len
                })
                .sum();
            assert_eq!((annus.end() - annus.start()) as u32, total);
        }
    }

    #[test]
    fn names() {
        let lunar = LunarDate::from_date(Date::from_civil(2024, 2, 10), TZ);
        let labels = lunar.labels();
        assert_eq!("Mùng Một", labels.day_name);
        assert_eq!("Tháng Giêng", labels.month_name);
        assert_eq!("Giáp Thìn", labels.year_can_chi);
        assert_eq!("Bính Dần", labels.month_can_chi);
        assert_eq!("Giáp Thìn", labels.day_can_chi);
        assert_eq!("Con Rồng", labels.zodiac);
        assert_eq!("1/1/2024", lunar.to_string());

        let leap = LunarDate::from_date(Date::from_civil(2023, 3, 22), TZ);
        assert_eq!("1/2 nhuận/2023", leap.to_string());
        assert_eq!("Tháng Hai Nhuận", leap.month_name());
    }

    #[test]
    fn checked_lunar_dates() {
        assert!(LunarDate::new(2023, Leap(2), 29, TZ).is_ok());
        assert_eq!(
            Err(Error::NoSuchLunarMonth {
                year: 2023,
                month: Leap(3)
            }),
            LunarDate::new(2023, Leap(3), 1, TZ)
        );
        assert_eq!(Err(Error::InvalidMonth(13)), LunarDate::new(2023, Common(13), 1, TZ));
        assert!(LunarDate::new(2023, Common(1), 0, TZ).is_err());
        // the last month of 2023 has 30 days, the first of 2024 has 29
        assert!(LunarDate::new(2023, Common(12), 30, TZ).is_ok());
        assert!(matches!(
            LunarDate::new(2024, Common(1), 30, TZ),
            Err(Error::InvalidLunarDay { len: 29, .. })
        ));
    }

    #[test]
    fn serde_round_trip() {
        let lunar = LunarDate::from_date(Date::from_civil(2023, 3, 22), TZ);
        let json = serde_json::to_string(&lunar).unwrap();
        assert_eq!(r#"{"year":2023,"month":{"Leap":2},"day":1,"date":2460026}"#, json);
        assert_eq!(lunar, serde_json::from_str(&json).unwrap());
    }
}
