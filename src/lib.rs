//! Conversion between Gregorian dates and the Vietnamese lunisolar calendar
//! (âm lịch).
//!
//! Lunar months and leap months are computed astronomically, with the same
//! low-precision Sun and Moon series the published Vietnamese calendar is
//! compiled with, in Indochina Time (UTC+7) by default.
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use amlich::Date;
//!
//! let date = Date::from_civil(2000, 1, 1);
//!
//! assert_eq!(6, date.day_of_week()); // Saturday
//! assert_eq!(2451545, date.jdn());
//! ```
//!
//! Vietnamese lunar calendar:
//!
//! ```
//! use amlich::{Date, TimeZone};
//! use amlich::vietnamese::{self, Month::*};
//!
//! let tz = TimeZone::default(); // UTC+7
//! let lunar = vietnamese::solar_to_lunar(Date::from_civil(2023, 4, 1), tz);
//!
//! assert_eq!((2023, Leap(2), 11), (lunar.year, lunar.month, lunar.day));
//! assert_eq!("Quý Mão", lunar.year_can_chi().to_string());
//! assert_eq!(
//!     "2023-04-01",
//!     vietnamese::lunar_to_solar(2023, Leap(2), 11, tz).to_string()
//! );
//! ```
//!
//! Converters are total: a lunar date that does not exist (a leap month the
//! year lacks) converts to [`CivilDate::NONE`]. [`vietnamese::LunarDate::new`]
//! and [`CivilDate::new`] are the checked alternatives.

pub mod astro;
pub mod date;
pub mod error;
pub mod special;
pub mod vietnamese;

pub use astro::TimeZone;
pub use date::{CivilDate, Date, YearType};
pub use error::{Error, Result};
