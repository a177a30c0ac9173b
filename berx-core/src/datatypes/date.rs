//! Calendar date types (proleptic Gregorian, years 1 to 9999)

use crate::error::{BerError, BerResult};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::validate_timezone_offset;

/// A calendar date in the proleptic Gregorian calendar
///
/// The supported range is 0001-01-01 through 9999-12-31. Construction
/// validates all components, so every `Date` value is a real calendar date.
///
/// # Serial Days
///
/// Dates convert to and from a serial day number where 0001-01-01 is day 1
/// and 9999-12-31 is day 3,652,059. The binary wire formats are defined in
/// terms of this serial numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Date {
    year: u16,
    month: u8,
    day: u8,
}

impl Date {
    /// Serial day number of 0001-01-01
    pub const MIN_SERIAL_DAY: i32 = 1;

    /// Serial day number of 9999-12-31
    pub const MAX_SERIAL_DAY: i32 = 3_652_059;

    /// Constructs a date from year, month, and day
    ///
    /// # Errors
    ///
    /// Returns an error if the year is outside `[1, 9999]`, the month is
    /// outside `[1, 12]`, or the day is not valid for the given month and
    /// year.
    pub fn new(year: u16, month: u8, day: u8) -> BerResult<Self> {
        if year < 1 || year > 9999 {
            return Err(BerError::InvalidData(format!(
                "Year is out of range [1, 9999], got {}",
                year
            )));
        }
        if month < 1 || month > 12 {
            return Err(BerError::InvalidData(format!(
                "Month is out of range [1, 12], got {}",
                month
            )));
        }
        let max_day = days_in_month(year, month);
        if day < 1 || day > max_day {
            return Err(BerError::InvalidData(format!(
                "Day is out of range [1, {}] for {:04}-{:02}, got {}",
                max_day, year, month, day
            )));
        }
        Ok(Self { year, month, day })
    }

    /// Constructs a date from its serial day number
    ///
    /// # Errors
    ///
    /// Returns an error if `serial` is outside
    /// `[MIN_SERIAL_DAY, MAX_SERIAL_DAY]`.
    pub fn from_serial_day(serial: i32) -> BerResult<Self> {
        if serial < Self::MIN_SERIAL_DAY || serial > Self::MAX_SERIAL_DAY {
            return Err(BerError::InvalidData(format!(
                "Serial day is out of range [{}, {}], got {}",
                Self::MIN_SERIAL_DAY,
                Self::MAX_SERIAL_DAY,
                serial
            )));
        }

        // Inverse of the Gregorian civil-from-days algorithm, shifted so
        // that day 1 is 0001-01-01.
        let z = serial + 305;
        let era = z / 146_097;
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let y = yoe + era * 400;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
        let year = (if month <= 2 { y + 1 } else { y }) as u16;

        Ok(Self { year, month, day })
    }

    /// Get the year (1 to 9999)
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Get the month (1 to 12)
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Get the day of the month
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Serial day number of this date (0001-01-01 is day 1)
    pub fn serial_day(&self) -> i32 {
        let year = self.year as i32;
        let month = self.month as i32;
        let day = self.day as i32;

        let y = if month <= 2 { year - 1 } else { year };
        let era = y / 400;
        let yoe = y - era * 400;
        let mp = (month + 9) % 12;
        let doy = (153 * mp + 2) / 5 + day - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146_097 + doe - 305
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A calendar date with a timezone offset in minutes from UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTz {
    date: Date,
    offset_minutes: i16,
}

impl DateTz {
    /// Constructs a date with a timezone offset
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is outside `[-1439, 1439]`.
    pub fn new(date: Date, offset_minutes: i16) -> BerResult<Self> {
        validate_timezone_offset(offset_minutes)?;
        Ok(Self {
            date,
            offset_minutes,
        })
    }

    /// Get the local date
    pub fn date(&self) -> Date {
        self.date
    }

    /// Get the timezone offset in minutes from UTC
    pub fn offset_minutes(&self) -> i16 {
        self.offset_minutes
    }
}

impl fmt::Display for DateTz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.offset_minutes < 0 { '-' } else { '+' };
        let magnitude = self.offset_minutes.unsigned_abs();
        write!(
            f,
            "{}{}{:02}:{:02}",
            self.date,
            sign,
            magnitude / 60,
            magnitude % 60
        )
    }
}

pub(crate) fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub(crate) fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_new() {
        let date = Date::new(2024, 3, 15).unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 3);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_date_invalid() {
        assert!(Date::new(0, 1, 1).is_err());
        assert!(Date::new(10000, 1, 1).is_err());
        assert!(Date::new(2024, 13, 1).is_err());
        assert!(Date::new(2024, 2, 30).is_err());
        assert!(Date::new(2023, 2, 29).is_err());
        assert!(Date::new(2024, 2, 29).is_ok()); // leap year
        assert!(Date::new(1900, 2, 29).is_err()); // century, not leap
        assert!(Date::new(2000, 2, 29).is_ok()); // quadricentennial, leap
    }

    #[test]
    fn test_serial_day_known_values() {
        assert_eq!(Date::new(1, 1, 1).unwrap().serial_day(), 1);
        assert_eq!(Date::new(1, 12, 31).unwrap().serial_day(), 365);
        assert_eq!(Date::new(2020, 1, 1).unwrap().serial_day(), 737_425);
        assert_eq!(Date::new(9999, 12, 31).unwrap().serial_day(), 3_652_059);
    }

    #[test]
    fn test_from_serial_day_round_trip() {
        for &(y, m, d) in &[
            (1u16, 1u8, 1u8),
            (1, 12, 31),
            (4, 2, 29),
            (100, 3, 1),
            (400, 2, 29),
            (1066, 10, 14),
            (1930, 4, 14),
            (2016, 2, 29),
            (2020, 1, 1),
            (2020, 12, 31),
            (9999, 12, 31),
        ] {
            let date = Date::new(y, m, d).unwrap();
            let serial = date.serial_day();
            assert_eq!(Date::from_serial_day(serial).unwrap(), date);
        }
    }

    #[test]
    fn test_from_serial_day_out_of_range() {
        assert!(Date::from_serial_day(0).is_err());
        assert!(Date::from_serial_day(3_652_060).is_err());
    }

    #[test]
    fn test_date_tz() {
        let date = Date::new(2024, 3, 15).unwrap();
        let date_tz = DateTz::new(date, -300).unwrap();
        assert_eq!(date_tz.date(), date);
        assert_eq!(date_tz.offset_minutes(), -300);
        assert_eq!(date_tz.to_string(), "2024-03-15-05:00");

        assert!(DateTz::new(date, 1440).is_err());
        assert!(DateTz::new(date, -1440).is_err());
        assert!(DateTz::new(date, 1439).is_ok());
        assert!(DateTz::new(date, -1439).is_ok());
    }
}
