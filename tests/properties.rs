//! Invariants of the calendar over 1900-2100.

use std::ops::Range;

use amlich::vietnamese::sexagenary::Sexagenary;
use amlich::vietnamese::{self, Annus, Month};
use amlich::{Date, TimeZone};
use proptest::prelude::*;

const TZ: TimeZone = TimeZone::VIETNAM;

fn supported_days() -> Range<i32> {
    Date::from_civil(1900, 1, 1).jdn()..Date::from_civil(2101, 1, 1).jdn()
}

proptest! {
    #[test]
    fn lunar_round_trip(jdn in supported_days()) {
        let date = Date::from_jdn(jdn);
        let lunar = vietnamese::solar_to_lunar(date, TZ);
        prop_assert_eq!(
            date.civil(),
            vietnamese::lunar_to_solar(lunar.year, lunar.month, lunar.day, TZ)
        );
    }

    #[test]
    fn lunar_fields_in_range(jdn in supported_days()) {
        let lunar = vietnamese::solar_to_lunar(Date::from_jdn(jdn), TZ);
        prop_assert!((1..=30).contains(&lunar.day));
        prop_assert!((1..=12).contains(&lunar.month.num()));
        let civil_year = Date::from_jdn(jdn).civil().year;
        prop_assert!(lunar.year == civil_year || lunar.year == civil_year - 1);
    }

    #[test]
    fn checked_lunar_date_agrees(jdn in supported_days()) {
        let lunar = vietnamese::solar_to_lunar(Date::from_jdn(jdn), TZ);
        prop_assert_eq!(
            Ok(lunar),
            vietnamese::LunarDate::new(lunar.year, lunar.month, lunar.day, TZ)
        );
    }

    #[test]
    fn jdn_bijection(jdn in -1_000_000i32..10_000_000) {
        let civil = Date::from_jdn(jdn).civil();
        prop_assert_eq!(jdn, Date::from_civil(civil.year, civil.month, civil.day).jdn());
    }

    #[test]
    fn consecutive_days_are_consecutive_dates(jdn in -1_000_000i32..10_000_000) {
        let today = Date::from_jdn(jdn).civil();
        let tomorrow = Date::from_jdn(jdn + 1).civil();
        prop_assert!(today < tomorrow);
        prop_assert_eq!(1, tomorrow.to_date() - today.to_date());
    }

    #[test]
    fn day_can_chi_has_period_60(jdn in -1_000_000i32..10_000_000, k in 1i32..60) {
        let date = Date::from_jdn(jdn);
        prop_assert_eq!(Sexagenary::for_day(date), Sexagenary::for_day(date + 60));
        prop_assert_ne!(Sexagenary::for_day(date), Sexagenary::for_day(date + k));
    }
}

/// Lunar year of each month of an annus, with the month and its first day.
fn months_of(annus: &Annus) -> Vec<(i32, Month, Date)> {
    annus.months[..annus.months.len() - 1]
        .iter()
        .map(|m| {
            let (year, month, day) = annus.ymd_for(m.date).unwrap();
            assert_eq!((month, 1), (m.month, day));
            (year, month, m.date)
        })
        .collect()
}

#[test]
fn at_most_one_leap_month_per_year() {
    for year in 1901..=2099 {
        let leaps: Vec<_> = [Annus::new(year, TZ), Annus::new(year + 1, TZ)]
            .iter()
            .flat_map(months_of)
            .filter(|&(y, month, _)| y == year && month.is_leap())
            .map(|(_, month, _)| month.num())
            .collect();
        assert!(leaps.len() <= 1, "{year}: {leaps:?}");
        assert_eq!(
            leaps.first().copied().unwrap_or(0),
            vietnamese::lunar_year_leap_month(year, TZ),
            "{year}"
        );
    }
}

#[test]
fn every_day_has_a_lunar_date() {
    let mut date = Date::from_civil(1900, 1, 1);
    let mut prev = vietnamese::solar_to_lunar(date - 1, TZ);
    while date < Date::from_civil(2101, 1, 1) {
        let lunar = vietnamese::solar_to_lunar(date, TZ);
        assert!((1..=30).contains(&lunar.day), "{}: {lunar:?}", date.iso());
        if lunar.day == 1 {
            assert!(prev.day == 29 || prev.day == 30, "{}: {prev:?}", date.iso());
        } else {
            assert_eq!(
                (prev.year, prev.month, prev.day + 1),
                (lunar.year, lunar.month, lunar.day),
                "{}",
                date.iso()
            );
        }
        let labels = lunar.labels();
        assert!(!labels.day_name.is_empty() && !labels.month_name.is_empty());
        prev = lunar;
        date = date + 1;
    }
}

#[test]
fn month_lengths_fill_the_annus() {
    for year in 1900..=2100 {
        let annus = Annus::new(year, TZ);
        let mut total = 0;
        for (y, month, start) in months_of(&annus) {
            let len = vietnamese::lunar_month_length(y, month, TZ)
                .unwrap_or_else(|| panic!("{y} {month:?} should exist"));
            assert!(len == 29 || len == 30, "{y} {month:?}: {len}");
            assert_eq!(start.civil(), vietnamese::lunar_to_solar(y, month, 1, TZ));
            total += len;
        }
        assert_eq!((annus.end() - annus.start()) as u32, total, "annus {year}");
        let span = vietnamese::month11_start(year, TZ) - vietnamese::month11_start(year - 1, TZ);
        assert_eq!(span as u32, total);
    }
}

#[test]
fn leap_years_are_long() {
    for year in 1900..=2100 {
        let annus = Annus::new(year, TZ);
        let days = annus.end() - annus.start();
        match annus.leap_month() {
            Some(_) => assert!((383..=385).contains(&days), "{year}: {days}"),
            None => assert!((353..=355).contains(&days), "{year}: {days}"),
        }
    }
}
