//! Vietnamese names of lunar days and months

/// Vietnamese numerals, `1..=9` being "Một" to "Chín". Item 0 is "Mười" (ten),
/// for formatting dates.
pub const NUMERALS: &[&str] = &[
    "Mười", "Một", "Hai", "Ba", "Bốn", "Năm", "Sáu", "Bảy", "Tám", "Chín",
];

/// Name of a month, "Tháng" included. Month 1 is "Tháng Giêng" and month 12
/// "Tháng Chạp"; a leap month is followed by "Nhuận".
///
/// # Example
///
/// ```
/// use amlich::vietnamese::{self, Month::*};
///
/// assert_eq!("Tháng Giêng", vietnamese::fmt::month(Common(1)));
/// assert_eq!("Tháng Mười Một", vietnamese::fmt::month(Common(11)));
/// assert_eq!("Tháng Tư Nhuận", vietnamese::fmt::month(Leap(4)));
/// ```
///
/// # Panics
///
/// Panics if the month number is not in `1..=12`.
pub fn month(m: super::Month) -> String {
    let num = m.num();
    let mut rt = String::from("Tháng ");
    rt += match num {
        1 => "Giêng",
        4 => "Tư",
        2..=10 => NUMERALS[num as usize % 10],
        11 => "Mười Một",
        12 => "Chạp",
        _ => panic!("month {} not in 1..=12", num),
    };
    if m.is_leap() {
        rt += " Nhuận";
    }
    rt
}

/// Name of a day of the month: "Mùng Một" to "Mùng Mười" for the first ten,
/// then the number spelled out.
///
/// # Example
///
/// ```
/// use amlich::vietnamese;
///
/// assert_eq!("Mùng Mười", vietnamese::fmt::day(10));
/// assert_eq!("Hai Mươi Lăm", vietnamese::fmt::day(25));
/// assert_eq!("Ba Mươi", vietnamese::fmt::day(30));
/// ```
///
/// # Panics
///
/// Panics if the day is not in `1..=30`.
pub fn day(d: u32) -> String {
    let unit = NUMERALS[(d % 10) as usize];
    match d {
        1..=10 => format!("Mùng {}", unit),
        15 => "Mười Lăm".to_owned(),
        11..=19 => format!("Mười {}", unit),
        20 => "Hai Mươi".to_owned(),
        21 => "Hai Mươi Mốt".to_owned(),
        24 => "Hai Mươi Tư".to_owned(),
        25 => "Hai Mươi Lăm".to_owned(),
        22..=29 => format!("Hai Mươi {}", unit),
        30 => "Ba Mươi".to_owned(),
        _ => panic!("day {} not in 1..=30", d),
    }
}
