// 🎂 Birth Date Decoding
//
// Day-of-month doubles as the gender flag: women have 40 added to the day.
// Years are two digits; the century is picked relative to a reference date.

use crate::error::{DecodeError, DecodeResult};
use crate::identity::Gender;
use chrono::{Datelike, NaiveDate};

/// Offset added to the day of month for women
pub const FEMALE_DAY_OFFSET: u32 = 40;

/// Display format of a born date, e.g. "6 September 1997"
pub const BORN_DATE_FORMAT: &str = "%d %B %Y";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full English month name for 1..=12
pub fn month_name(month: u32) -> Option<&'static str> {
    match month {
        1..=12 => Some(MONTHS[(month - 1) as usize]),
        _ => None,
    }
}

/// Split the raw day field into gender and real day
///
/// A raw value of exactly 40 stays male with day 40.
pub fn decode_day(raw: u32) -> (Gender, u32) {
    if raw > FEMALE_DAY_OFFSET {
        (Gender::Female, raw - FEMALE_DAY_OFFSET)
    } else {
        (Gender::Male, raw)
    }
}

/// Expand a two-digit year: later than the reference year's last two digits
/// means 19xx, otherwise 20xx.
pub fn expand_year(two_digit: u32, today: NaiveDate) -> i32 {
    let current = today.year().rem_euclid(100) as u32;
    if two_digit > current {
        1900 + two_digit as i32
    } else {
        2000 + two_digit as i32
    }
}

// ============================================================================
// BIRTH DATE
// ============================================================================

/// Decoded day / month / year, not yet checked against the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl BirthDate {
    pub fn new(day: u32, month: u32, year: i32) -> Self {
        BirthDate { day, month, year }
    }

    /// "D Month YYYY"; an unknown month renders as an empty name
    pub fn display(&self) -> String {
        format!(
            "{} {} {}",
            self.day,
            month_name(self.month).unwrap_or(""),
            self.year
        )
    }

    /// Parse the display form back into a calendar date
    pub fn to_naive_date(&self) -> DecodeResult<NaiveDate> {
        let date = self.display();
        NaiveDate::parse_from_str(&date, BORN_DATE_FORMAT)
            .map_err(|_| DecodeError::DateParse { date })
    }
}

/// Whole years elapsed between `born` and `today`
///
/// A year only counts once the birthday has been reached. Born after
/// `today` gives 0.
pub fn age_on(born: NaiveDate, today: NaiveDate) -> u32 {
    today.years_since(born).unwrap_or(0)
}

// ============================================================================
// TESTS
// ============================================================================
