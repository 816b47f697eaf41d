/// Pure date utility functions for birthday arithmetic
use chrono::{Datelike, NaiveDate};

/// Check if a given year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Date on which a birthday is observed in `year`.
///
/// Feb 29 birthdays fall on Mar 1 when `year` is not a leap year.
pub fn observed_birthday(birth_date: NaiveDate, year: i32) -> NaiveDate {
    let (month, day) = if birth_date.month() == 2 && birth_date.day() == 29 && !is_leap_year(year)
    {
        (3, 1)
    } else {
        (birth_date.month(), birth_date.day())
    };

    // Any month/day taken from a valid date exists in every year once Feb 29 is remapped
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MAX)
}

/// Next observed birthday on or after `today`
pub fn next_birthday(birth_date: NaiveDate, today: NaiveDate) -> NaiveDate {
    let this_year = observed_birthday(birth_date, today.year());
    if this_year >= today {
        this_year
    } else {
        observed_birthday(birth_date, today.year() + 1)
    }
}

/// Whole days from `today` to the next observed birthday (0 when it is today)
pub fn days_until_birthday(birth_date: NaiveDate, today: NaiveDate) -> i64 {
    (next_birthday(birth_date, today) - today).num_days()
}
