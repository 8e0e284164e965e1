//! Age between two calendar dates.

use super::CalcError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// A proleptic Gregorian date with no time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CivilDate {
    /// Validated constructor.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, CalcError> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(CalcError::InvalidDate(format!(
                "{year:04}-{month:02}-{day:02}"
            )));
        }
        Ok(Self { year, month, day })
    }

    /// Parse `YYYY-MM-DD`.
    pub fn parse(input: &str) -> Result<Self, CalcError> {
        let invalid = || CalcError::InvalidDate(input.to_string());
        let mut parts = input.trim().splitn(3, '-');
        let year = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let month = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let day = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        Self::new(year, month, day).map_err(|_| invalid())
    }

    /// Today in UTC.
    pub fn today() -> Result<Self, CalcError> {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| CalcError::Clock)?
            .as_secs();
        Ok(Self::from_days_since_epoch((secs / 86_400) as i64))
    }

    /// Days since 1970-01-01 (negative before).
    pub fn days_since_epoch(self) -> i64 {
        let (y, m, d) = (self.year as i64, self.month as i64, self.day as i64);
        let y = if m <= 2 { y - 1 } else { y };
        let era = if y >= 0 { y } else { y - 399 } / 400;
        let yoe = y - era * 400;
        let mp = (m + 9) % 12;
        let doy = (153 * mp + 2) / 5 + d - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146_097 + doe - 719_468
    }

    pub fn from_days_since_epoch(days: i64) -> Self {
        let z = days + 719_468;
        let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
        let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
        let year = (yoe + era * 400 + i64::from(month <= 2)) as i32;
        Self { year, month, day }
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CivilDate {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CivilDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Elapsed time between a birth date and a reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Age {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub total_days: i64,
    /// 0 when `on` is the birthday.
    pub days_until_birthday: i64,
}

/// Calendar age of someone born on `birth`, as of `on`.
///
/// Days borrow from the month before `on`, so 01-31 → 03-01 is
/// "1 month, 1 day" in a non-leap year. A February 29 birthday falls on
/// March 1 in non-leap years.
pub fn calculate_age(birth: CivilDate, on: CivilDate) -> Result<Age, CalcError> {
    if birth > on {
        return Err(CalcError::BirthAfterDate { birth, on });
    }

    let mut years = on.year - birth.year;
    let mut months = on.month as i32 - birth.month as i32;
    let mut days = on.day as i32 - birth.day as i32;

    if days < 0 {
        months -= 1;
        let (prev_year, prev_month) = if on.month == 1 {
            (on.year - 1, 12)
        } else {
            (on.year, on.month - 1)
        };
        // The anniversary in a short month is its last day.
        let prev_len = days_in_month(prev_year, prev_month) as i32;
        days = prev_len - (birth.day as i32).min(prev_len) + on.day as i32;
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    let total_days = on.days_since_epoch() - birth.days_since_epoch();

    let birthday_in = |year: i32| {
        CivilDate::new(year, birth.month, birth.day)
            .unwrap_or(CivilDate {
                year,
                month: 3,
                day: 1,
            })
    };
    let mut next = birthday_in(on.year);
    if next < on {
        next = birthday_in(on.year + 1);
    }

    Ok(Age {
        years: years as u32,
        months: months as u32,
        days: days as u32,
        total_days,
        days_until_birthday: next.days_since_epoch() - on.days_since_epoch(),
    })
}
