//! Can Chi, the sexagenary cycle of ten stems (can) and twelve branches (chi).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::astro::TimeZone;
use crate::date::Date;

use super::cache;

/// The ten Heavenly Stems.
pub const STEMS: [&str; 10] = [
    "Giáp", "Ất", "Bính", "Đinh", "Mậu", "Kỷ", "Canh", "Tân", "Nhâm", "Quý",
];
/// The twelve Earthly Branches.
pub const BRANCHES: [&str; 12] = [
    "Tý", "Sửu", "Dần", "Mão", "Thìn", "Tỵ", "Ngọ", "Mùi", "Thân", "Dậu", "Tuất", "Hợi",
];
/// Animals of the branches (con giáp); Mão is the cat in Vietnam.
pub const ZODIAC: [&str; 12] = [
    "Con Chuột",
    "Con Trâu",
    "Con Hổ",
    "Con Mèo",
    "Con Rồng",
    "Con Rắn",
    "Con Ngựa",
    "Con Dê",
    "Con Khỉ",
    "Con Gà",
    "Con Chó",
    "Con Heo",
];

/// A term of the sexagenary cycle, as indices into [`STEMS`] and [`BRANCHES`].
///
/// Displays as `"<stem> <branch>"`.
///
/// # Example
///
/// ```
/// use amlich::vietnamese::sexagenary::Sexagenary;
///
/// assert_eq!("Ất Tỵ", Sexagenary::for_year(2025).to_string());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Sexagenary {
    pub stem: u8,
    pub branch: u8,
}

impl Sexagenary {
    fn new(stem: i64, branch: i64) -> Self {
        Self {
            stem: stem.rem_euclid(10) as u8,
            branch: branch.rem_euclid(12) as u8,
        }
    }

    /// Day term; runs continuously with the Julian day number.
    pub fn for_day(date: Date) -> Self {
        let jdn = date.jdn() as i64;
        Self::new(jdn + 9, jdn + 1)
    }
    /// Month term of `month` (leap or not) in lunar year `year`.
    ///
    /// This is a plain linear rule in the month count, matching the dates
    /// shown by the calendar application; it coincides with the classical
    /// rule deriving the stem of month 1 from the year stem.
    pub fn for_month(year: i32, month: u32) -> Self {
        let (y, m) = (year as i64, month as i64);
        Self::new(y * 12 + m + 3, m + 1)
    }
    /// Year term of lunar year `year`.
    pub fn for_year(year: i32) -> Self {
        let y = year as i64;
        Self::new(y + 6, y + 8)
    }

    pub fn stem_name(&self) -> &'static str {
        STEMS[self.stem as usize]
    }
    pub fn branch_name(&self) -> &'static str {
        BRANCHES[self.branch as usize]
    }
    /// The animal of the branch.
    pub fn zodiac(&self) -> &'static str {
        ZODIAC[self.branch as usize]
    }

    /// Position in the cycle, from 1 (Giáp Tý) to 60 (Quý Hợi).
    pub fn cycle_number(&self) -> u32 {
        let (s, b) = (self.stem as i32, self.branch as i32);
        (s + 10 * (5 * (b - s) / 2).rem_euclid(6)) as u32 + 1
    }
}

impl fmt::Display for Sexagenary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.stem_name(), self.branch_name())
    }
}

/// Can Chi of the day, lunar month and lunar year of a day.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CanChi {
    pub day: Sexagenary,
    pub month: Sexagenary,
    pub year: Sexagenary,
}

/// Can Chi of the Gregorian date `year-month-day`.
///
/// # Example
///
/// ```
/// use amlich::TimeZone;
/// use amlich::vietnamese::sexagenary::can_chi_for;
///
/// let can_chi = can_chi_for(2024, 2, 10, TimeZone::VIETNAM);
/// assert_eq!("Giáp Thìn", can_chi.day.to_string());
/// assert_eq!("Bính Dần", can_chi.month.to_string());
/// assert_eq!("Giáp Thìn", can_chi.year.to_string());
/// ```
pub fn can_chi_for(year: i32, month: u32, day: u32, tz: TimeZone) -> CanChi {
    cache::solar_to_lunar(Date::from_civil(year, month, day), tz).can_chi()
}

/// Year term with its animal, e.g. "Giáp Tý (Con Chuột)".
///
/// # Example
///
/// ```
/// use amlich::vietnamese::sexagenary::year_zodiac_label;
///
/// assert_eq!("Giáp Thìn (Con Rồng)", year_zodiac_label(2024));
/// ```
pub fn year_zodiac_label(year: i32) -> String {
    let term = Sexagenary::for_year(year);
    format!("{} ({})", term, term.zodiac())
}
