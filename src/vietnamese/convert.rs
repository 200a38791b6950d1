//! Conversion between solar days and lunar dates.

use super::{LunarDate, Month, cache};
use crate::astro::{TimeZone, new_moon_day, sun_longitude_sector};
use crate::date::{CivilDate, Date, days_in_month};

/// Julian date of the new moon of 1900-01-01, lunation 0.
const EPOCH: f64 = 2415021.076998695;
/// Mean synodic month in days.
const SYNODIC_MONTH: f64 = 29.530588853;

/// Lunation index of the new moon starting on `new_moon`.
pub(super) fn lunation_of(new_moon: Date) -> i32 {
    ((new_moon.jdn() as f64 - EPOCH) / SYNODIC_MONTH + 0.5).floor() as i32
}

/// Wraps a month number into `1..=12`.
pub(super) fn wrap_month(n: i32) -> u32 {
    ((n - 1).rem_euclid(12) + 1) as u32
}

/// Start of lunar month 11 (the month containing the winter solstice) of the
/// Gregorian year `year`.
///
/// # Example
///
/// ```
/// use amlich::TimeZone;
/// use amlich::vietnamese::month11_start;
///
/// assert_eq!("2023-12-13", month11_start(2023, TimeZone::VIETNAM).iso());
/// ```
pub fn month11_start(year: i32, tz: TimeZone) -> Date {
    let off = Date::from_civil(year, 12, 31).jdn() - 2415021;
    let k = (off as f64 / SYNODIC_MONTH).floor() as i32;
    let nm = new_moon_day(k, tz);
    // past the solstice: the previous new moon starts month 11
    if sun_longitude_sector(nm, tz) >= 9 {
        new_moon_day(k - 1, tz)
    } else {
        nm
    }
}

/// Offset, in lunations from the month 11 starting on `a11`, of the leap month
/// of that annus.
///
/// The leap month is the first one whose start is in the same 30° solar
/// longitude sector as the next month's, i.e. that contains no principal term.
/// Only meaningful for an annus of 13 months.
///
/// # Panics
///
/// Panics if no such month is found within 14 lunations, which can only
/// happen when `a11` does not start a 13-month annus.
pub fn leap_month_offset(a11: Date, tz: TimeZone) -> i32 {
    let k = lunation_of(a11);
    let sector = |i| sun_longitude_sector(new_moon_day(k + i, tz), tz);
    let mut last = sector(1);
    for i in 2..=14 {
        let arc = sector(i);
        if arc == last {
            return i - 1;
        }
        last = arc;
    }
    panic!("no month without principal term after {}", a11.iso())
}

/// Converts a solar day into the lunar calendar.
///
/// # Example
///
/// ```
/// use amlich::{Date, TimeZone};
/// use amlich::vietnamese::{solar_to_lunar, Month::*};
///
/// let lunar = solar_to_lunar(Date::from_civil(2025, 1, 29), TimeZone::VIETNAM);
/// assert_eq!((2025, Common(1), 1), (lunar.year, lunar.month, lunar.day));
///
/// let lunar = solar_to_lunar(Date::from_civil(2025, 1, 28), TimeZone::VIETNAM);
/// assert_eq!((2024, Common(12), 29), (lunar.year, lunar.month, lunar.day));
/// ```
pub fn solar_to_lunar(date: Date, tz: TimeZone) -> LunarDate {
    // the mean lunation can run ahead of the true new moon by more than a day
    let mut k = ((date.jdn() as f64 - EPOCH) / SYNODIC_MONTH).floor() as i32 + 1;
    let mut month_start = new_moon_day(k, tz);
    while month_start > date {
        k -= 1;
        month_start = new_moon_day(k, tz);
    }

    let year = date.civil().year;
    let mut a11 = month11_start(year, tz);
    let mut b11 = a11;
    let mut lunar_year;
    if a11 >= month_start {
        lunar_year = year;
        a11 = month11_start(year - 1, tz);
    } else {
        lunar_year = year + 1;
        b11 = month11_start(year + 1, tz);
    }

    let day = (date - month_start + 1) as u32;
    let diff = (month_start - a11).div_euclid(29);
    let mut month = Month::Common(wrap_month(diff + 11));
    if b11 - a11 > 365 {
        let leap_off = leap_month_offset(a11, tz);
        if diff == leap_off {
            month = Month::Leap(wrap_month(diff + 10));
        } else if diff > leap_off {
            month = Month::Common(wrap_month(diff + 10));
        }
    }
    // months 11 and 12 at the start of the annus belong to the previous year
    if month.num() >= 11 && diff < 4 {
        lunar_year -= 1;
    }

    LunarDate {
        year: lunar_year,
        month,
        day,
        date,
    }
}

/// Lunation index of the start of `month` in lunar year `year`, or `None` for
/// a leap month the year does not have.
fn lunation_for(year: i32, month: Month, tz: TimeZone) -> Option<i32> {
    let num = month.num() as i32;
    let (a11, b11) = if num < 11 {
        (month11_start(year - 1, tz), month11_start(year, tz))
    } else {
        (month11_start(year, tz), month11_start(year + 1, tz))
    };
    let k = lunation_of(a11);
    let mut off = (num - 11).rem_euclid(12);
    if b11 - a11 > 365 {
        let leap_off = leap_month_offset(a11, tz);
        if month.is_leap() && month.num() != wrap_month(leap_off - 2) {
            return None;
        }
        if month.is_leap() || off >= leap_off {
            off += 1;
        }
    } else if month.is_leap() {
        return None;
    }
    Some(k + off)
}

/// Converts a lunar date into a civil date.
///
/// Returns [`CivilDate::NONE`] if `month` is a leap month that lunar year
/// `year` does not have. `day` is not checked against the month length; see
/// [`LunarDate::new`] for a checked conversion.
///
/// # Example
///
/// ```
/// use amlich::{CivilDate, TimeZone};
/// use amlich::vietnamese::{lunar_to_solar, Month::*};
///
/// let tz = TimeZone::VIETNAM;
/// assert_eq!("2024-02-10", lunar_to_solar(2024, Common(1), 1, tz).to_string());
/// assert_eq!("2023-03-22", lunar_to_solar(2023, Leap(2), 1, tz).to_string());
/// assert_eq!(CivilDate::NONE, lunar_to_solar(2024, Leap(2), 1, tz));
/// ```
pub fn lunar_to_solar(year: i32, month: Month, day: u32, tz: TimeZone) -> CivilDate {
    match lunation_for(year, month, tz) {
        Some(k) => (new_moon_day(k, tz) + day as i32 - 1).civil(),
        None => CivilDate::NONE,
    }
}

/// Number of days (29 or 30) of `month` in lunar year `year`.
///
/// Returns `None` if `month` is a leap month the year does not have.
///
/// # Example
///
/// ```
/// use amlich::TimeZone;
/// use amlich::vietnamese::{lunar_month_length, Month::*};
///
/// let tz = TimeZone::VIETNAM;
/// assert_eq!(Some(30), lunar_month_length(2023, Common(2), tz));
/// assert_eq!(Some(29), lunar_month_length(2023, Leap(2), tz));
/// assert_eq!(None, lunar_month_length(2023, Leap(3), tz));
/// ```
pub fn lunar_month_length(year: i32, month: Month, tz: TimeZone) -> Option<u32> {
    let k = lunation_for(year, month, tz)?;
    Some((new_moon_day(k + 1, tz) - new_moon_day(k, tz)) as u32)
}

/// The leap month of lunar year `year`, or 0 if it has none.
///
/// # Example
///
/// ```
/// use amlich::TimeZone;
/// use amlich::vietnamese::lunar_year_leap_month;
///
/// assert_eq!(2, lunar_year_leap_month(2023, TimeZone::VIETNAM));
/// assert_eq!(0, lunar_year_leap_month(2024, TimeZone::VIETNAM));
/// ```
pub fn lunar_year_leap_month(year: i32, tz: TimeZone) -> u32 {
    // offset of the leap month in the annus starting in `annus - 1`
    let leap_off = |annus: i32| {
        let a11 = month11_start(annus - 1, tz);
        let b11 = month11_start(annus, tz);
        (b11 - a11 > 365).then(|| leap_month_offset(a11, tz))
    };
    match leap_off(year) {
        Some(off) if off >= 3 => return wrap_month(off - 2),
        _ => {}
    }
    // a leap 11th or 12th month comes right after month 11, in the next annus
    match leap_off(year + 1) {
        Some(off) if off < 3 => wrap_month(off - 2),
        _ => 0,
    }
}

/// Lunar dates of every day of a Gregorian month, for a month view.
///
/// Results go through [`cache`].
pub fn lunar_days_in_solar_month(year: i32, month: u32, tz: TimeZone) -> Vec<LunarDate> {
    let first = Date::from_civil(year, month, 1);
    (0..days_in_month(Some(year), month) as i32)
        .map(|i| cache::solar_to_lunar(first + i, tz))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Month::*;

    const TZ: TimeZone = TimeZone::VIETNAM;

    fn lunar(y: i32, m: u32, d: u32) -> (i32, Month, u32) {
        let l = solar_to_lunar(Date::from_civil(y, m, d), TZ);
        (l.year, l.month, l.day)
    }

    #[test]
    fn tet() {
        for (y, m, d) in [
            (2020, 1, 25),
            (2021, 2, 12),
            (2022, 2, 1),
            (2023, 1, 22),
            (2024, 2, 10),
            (2025, 1, 29),
            (2026, 2, 17),
        ] {
            assert_eq!((y, Common(1), 1), lunar(y, m, d), "{y}-{m}-{d}");
            let eve = solar_to_lunar(Date::from_civil(y, m, d) - 1, TZ);
            assert_eq!((y - 1, Common(12)), (eve.year, eve.month));
        }
    }

    #[test]
    fn vietnamese_tet_1985() {
        // Vietnam celebrated Tết a month before China this year
        assert_eq!((1985, Common(1), 1), lunar(1985, 1, 21));
    }

    #[test]
    fn anchors() {
        assert_eq!("2022-11-24", month11_start(2022, TZ).iso());
        assert_eq!("2024-12-01", month11_start(2024, TZ).iso());
        let a11 = month11_start(2022, TZ);
        assert_eq!(4, leap_month_offset(a11, TZ));
    }

    #[test]
    fn leap_years() {
        for (year, leap) in [
            (2012, 4),
            (2014, 9),
            (2017, 6),
            (2020, 4),
            (2023, 2),
            (2025, 6),
            (2033, 11),
        ] {
            assert_eq!(leap, lunar_year_leap_month(year, TZ), "{year}");
        }
        for year in [2018, 2019, 2021, 2022, 2024, 2026] {
            assert_eq!(0, lunar_year_leap_month(year, TZ), "{year}");
        }
    }

    #[test]
    fn round_trip_through_leap_month() {
        let mut date = Date::from_civil(2023, 1, 1);
        while date < Date::from_civil(2024, 3, 1) {
            let l = solar_to_lunar(date, TZ);
            assert_eq!(date.civil(), lunar_to_solar(l.year, l.month, l.day, TZ));
            date = date + 1;
        }
    }

    #[test]
    fn leap_eleventh_month() {
        // the leap month follows month 11 of the annus ending in 2034
        assert_eq!("2033-12-22", lunar_to_solar(2033, Leap(11), 1, TZ).to_string());
        assert_eq!((2033, Leap(11), 1), lunar(2033, 12, 22));
        assert!(lunar_to_solar(2034, Leap(11), 1, TZ).is_none());
    }

    #[test]
    fn sentinel_for_missing_leap_month() {
        for d in 1..=30 {
            assert!(lunar_to_solar(2024, Leap(5), d, TZ).is_none());
            assert!(lunar_to_solar(2023, Leap(3), d, TZ).is_none());
            assert!(lunar_to_solar(2023, Leap(1), d, TZ).is_none());
        }
        assert!(!lunar_to_solar(2023, Leap(2), 1, TZ).is_none());
    }

    #[test]
    fn month_lengths() {
        assert_eq!(Some(30), lunar_month_length(2023, Common(12), TZ));
        assert_eq!(Some(29), lunar_month_length(2024, Common(1), TZ));
        let total: u32 = (1..=12)
            .map(|m| lunar_month_length(2023, Common(m), TZ).unwrap_or(0))
            .sum::<u32>()
            + lunar_month_length(2023, Leap(2), TZ).unwrap_or(0);
        let start = lunar_to_solar(2023, Common(1), 1, TZ).to_date();
        let end = lunar_to_solar(2024, Common(1), 1, TZ).to_date();
        assert_eq!((end - start) as u32, total);
    }

    #[test]
    fn month_view() {
        let days = lunar_days_in_solar_month(2024, 2, TZ);
        assert_eq!(29, days.len());
        assert_eq!((2023, Common(12), 22), (days[0].year, days[0].month, days[0].day));
        assert_eq!((2024, Common(1), 1), (days[9].year, days[9].month, days[9].day));
    }
}
