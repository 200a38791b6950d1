//! Low-precision positions of the Sun and new moon times.
//!
//! The series here are the short ones traditionally used to compile the
//! Vietnamese calendar. They are accurate to minutes (Sun) or a few hours
//! (Moon, far from 1900), and month boundaries are *defined* by them, so they
//! must not be swapped for a better ephemeris.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::error::Error;

/// Julian date of 2000-01-01T12:00 TT.
const J2000: f64 = 2451545.0;

/// A fixed offset east of UTC, in minutes.
///
/// Defaults to [`TimeZone::VIETNAM`].
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct TimeZone {
    minutes: i32,
}

impl TimeZone {
    /// Indochina Time (UTC+7), used by the Vietnamese calendar.
    pub const VIETNAM: TimeZone = TimeZone::from_hours(7);
    pub const UTC: TimeZone = TimeZone::from_hours(0);

    pub const fn from_hours(hours: i32) -> Self {
        Self {
            minutes: hours * 60,
        }
    }
    pub const fn from_minutes(minutes: i32) -> Self {
        Self { minutes }
    }
    pub fn minutes(&self) -> i32 {
        self.minutes
    }
    /// Offset as a fraction of a day.
    pub fn day_fraction(&self) -> f64 {
        self.minutes as f64 / 1440.0
    }
}

impl Default for TimeZone {
    fn default() -> Self {
        Self::VIETNAM
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minutes < 0 { '-' } else { '+' };
        let abs = self.minutes.unsigned_abs();
        write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
    }
}

impl FromStr for TimeZone {
    type Err = Error;

    /// Accepts `UTC`, `UTC+7`, `UTC-3:30`, `+07:00` and `+0700`.
    fn from_str(s: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidTimeZone(s.to_owned());
        let offset = s.trim();
        let offset = offset
            .strip_prefix("UTC")
            .or_else(|| offset.strip_prefix("GMT"))
            .unwrap_or(offset);
        if offset.is_empty() {
            return Ok(Self::UTC);
        }
        let (sign, hm) = match offset.as_bytes()[0] {
            b'+' => (1, &offset[1..]),
            b'-' => (-1, &offset[1..]),
            _ => return Err(invalid()),
        };
        let (h, m) = match hm.split_once(':') {
            Some((h, m)) => (h, m),
            None if hm.len() == 4 && hm.is_char_boundary(2) => hm.split_at(2),
            None => (hm, "0"),
        };
        let h: i32 = h.parse().map_err(|_| invalid())?;
        let m: i32 = m.parse().map_err(|_| invalid())?;
        if !(0..=14).contains(&h) || !(0..60).contains(&m) {
            return Err(invalid());
        }
        Ok(Self::from_minutes(sign * (h * 60 + m)))
    }
}

/// Apparent ecliptic longitude of the Sun at Julian date `jd`, in radians,
/// normalized into `[0, 2π)`.
///
/// # Example
///
/// ```
/// use amlich::astro::sun_longitude;
///
/// let deg = sun_longitude(2451545.0).to_degrees();
/// assert!((deg - 280.38).abs() < 0.01);
/// ```
pub fn sun_longitude(jd: f64) -> f64 {
    let dr = PI / 180.0;
    let t = (jd - J2000) / 36525.0;
    let t2 = t * t;
    let m = 357.52910 + 35999.05030 * t - 0.0001559 * t2 - 0.00000048 * t * t2;
    let l0 = 280.46645 + 36000.76983 * t + 0.0003032 * t2;
    let dl = (1.914600 - 0.004817 * t - 0.000014 * t2) * (dr * m).sin()
        + (0.019993 - 0.000101 * t) * (dr * 2.0 * m).sin()
        + 0.000290 * (dr * 3.0 * m).sin();
    ((l0 + dl) * dr).rem_euclid(2.0 * PI)
}

/// Which 30° sector (`0..=11`) the Sun is in at the local midnight starting
/// `day`.
///
/// Sector 9 begins at the winter solstice (270°); a lunar month whose start
/// falls in the same sector as the next month's start contains no principal
/// solar term.
pub fn sun_longitude_sector(day: Date, tz: TimeZone) -> i32 {
    let jd = day.jdn() as f64 - 0.5 - tz.day_fraction();
    (sun_longitude(jd) / PI * 6.0).floor() as i32
}

/// Julian date (TT-ish, then corrected to UT) of the `k`-th new moon after the
/// one of 1900-01-01.
///
/// # Example
///
/// ```
/// use amlich::astro::new_moon;
///
/// // 1900-01-01, about 13:50 UT
/// assert!((new_moon(0) - 2415021.077).abs() < 0.01);
/// ```
pub fn new_moon(k: i32) -> f64 {
    let dr = PI / 180.0;
    let k = k as f64;
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;

    let mut jd1 = 2415020.75933 + 29.53058868 * k + 0.0001178 * t2 - 0.000000155 * t3;
    jd1 += 0.00033 * ((166.56 + 132.87 * t - 0.009173 * t2) * dr).sin();
    // Sun's mean anomaly
    let m = 359.2242 + 29.10535608 * k - 0.0000333 * t2 - 0.00000347 * t3;
    // Moon's mean anomaly
    let mpr = 306.0253 + 385.81691806 * k + 0.0107306 * t2 + 0.00001236 * t3;
    // Moon's argument of latitude
    let f = 21.2964 + 390.67050646 * k - 0.0016528 * t2 - 0.00000239 * t3;

    let sin = |deg: f64| (deg * dr).sin();
    let c1 = (0.1734 - 0.000393 * t) * sin(m) + 0.0021 * sin(2.0 * m)
        - 0.4068 * sin(mpr)
        + 0.0161 * sin(2.0 * mpr)
        - 0.0004 * sin(3.0 * mpr)
        + 0.0104 * sin(2.0 * f)
        - 0.0051 * sin(m + mpr)
        - 0.0074 * sin(m - mpr)
        + 0.0004 * sin(2.0 * f + m)
        - 0.0004 * sin(2.0 * f - m)
        - 0.0006 * sin(2.0 * f + mpr)
        + 0.0010 * sin(2.0 * f - mpr)
        + 0.0005 * sin(2.0 * mpr + m);

    jd1 + c1 - delta_t(t)
}

/// Empirical ΔT in days, for `t` Julian centuries from 1900.
fn delta_t(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    if t < -11.0 {
        0.001 + 0.000839 * t + 0.0002261 * t2 - 0.00000845 * t3 - 0.000000081 * t * t3
    } else {
        -0.000278 + 0.000265 * t + 0.000262 * t2
    }
}

/// The local day on which the `k`-th new moon (see [`new_moon`]) occurs.
pub fn new_moon_day(k: i32, tz: TimeZone) -> Date {
    Date::from_jdn((new_moon(k) + 0.5 + tz.day_fraction()).floor() as i32)
}
