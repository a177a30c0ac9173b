//! Combined date-and-time types

use crate::error::{BerError, BerResult};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::date::Date;
use super::time::{Time, MICROSECONDS_PER_DAY, MILLISECONDS_PER_DAY};
use super::validate_timezone_offset;

/// A calendar date combined with a time of day
///
/// Both halves carry their own validation, so any `Datetime` built from a
/// `Date` and a `Time` is well-formed by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Datetime {
    date: Date,
    time: Time,
}

impl Datetime {
    /// Constructs a datetime from a date and a time
    pub fn new(date: Date, time: Time) -> Self {
        Self { date, time }
    }

    /// Constructs a datetime from the milliseconds elapsed since the
    /// midnight that begins `epoch_date`
    ///
    /// Negative counts select days before the epoch date. The result must
    /// land within the supported date range.
    pub fn from_milliseconds_from_epoch(epoch_date: Date, milliseconds: i64) -> BerResult<Self> {
        let days = milliseconds.div_euclid(MILLISECONDS_PER_DAY);
        let ms_of_day = milliseconds.rem_euclid(MILLISECONDS_PER_DAY);
        let date = Date::from_serial_day(checked_serial(epoch_date, days)?)?;
        let time = Time::from_milliseconds_from_midnight(ms_of_day)?;
        Ok(Self { date, time })
    }

    /// Constructs a datetime from the microseconds elapsed since the
    /// midnight that begins `epoch_date`
    pub fn from_microseconds_from_epoch(epoch_date: Date, microseconds: i64) -> BerResult<Self> {
        let days = microseconds.div_euclid(MICROSECONDS_PER_DAY);
        let us_of_day = microseconds.rem_euclid(MICROSECONDS_PER_DAY);
        let date = Date::from_serial_day(checked_serial(epoch_date, days)?)?;
        let time = Time::from_microseconds_from_midnight(us_of_day)?;
        Ok(Self { date, time })
    }

    /// Get the date half
    pub fn date(&self) -> Date {
        self.date
    }

    /// Get the time half
    pub fn time(&self) -> Time {
        self.time
    }

    /// Milliseconds elapsed from the midnight beginning `epoch_date` to
    /// this datetime (negative when this datetime precedes the epoch)
    pub fn milliseconds_from_epoch(&self, epoch_date: Date) -> i64 {
        let days = self.date.serial_day() as i64 - epoch_date.serial_day() as i64;
        days * MILLISECONDS_PER_DAY + self.time.milliseconds_from_midnight()
    }

    /// Microseconds elapsed from the midnight beginning `epoch_date` to
    /// this datetime
    pub fn microseconds_from_epoch(&self, epoch_date: Date) -> i64 {
        let days = self.date.serial_day() as i64 - epoch_date.serial_day() as i64;
        days * MICROSECONDS_PER_DAY + self.time.microseconds_from_midnight()
    }
}

fn checked_serial(epoch_date: Date, days: i64) -> BerResult<i32> {
    i32::try_from(epoch_date.serial_day() as i64 + days).map_err(|_| {
        BerError::InvalidData(format!(
            "Day offset {} is outside the supported calendar range",
            days
        ))
    })
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

/// A datetime with a timezone offset in minutes from UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatetimeTz {
    datetime: Datetime,
    offset_minutes: i16,
}

impl DatetimeTz {
    /// Constructs a datetime with a timezone offset
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is outside `[-1439, 1439]`.
    pub fn new(datetime: Datetime, offset_minutes: i16) -> BerResult<Self> {
        validate_timezone_offset(offset_minutes)?;
        Ok(Self {
            datetime,
            offset_minutes,
        })
    }

    /// Get the local datetime
    pub fn datetime(&self) -> Datetime {
        self.datetime
    }

    /// Get the timezone offset in minutes from UTC
    pub fn offset_minutes(&self) -> i16 {
        self.offset_minutes
    }
}

impl fmt::Display for DatetimeTz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.offset_minutes < 0 { '-' } else { '+' };
        let magnitude = self.offset_minutes.unsigned_abs();
        write!(
            f,
            "{}{}{:02}:{:02}",
            self.datetime,
            sign,
            magnitude / 60,
            magnitude % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epoch() -> Date {
        Date::new(2020, 1, 1).unwrap()
    }

    #[test]
    fn test_datetime_accessors() {
        let datetime = Datetime::new(
            Date::new(2024, 3, 15).unwrap(),
            Time::new(14, 30, 45, 123).unwrap(),
        );
        assert_eq!(datetime.date().year(), 2024);
        assert_eq!(datetime.time().millisecond(), 123);
        assert_eq!(datetime.to_string(), "2024-03-15T14:30:45.123");
    }

    #[test]
    fn test_milliseconds_from_epoch() {
        let at_epoch = Datetime::new(epoch(), Time::new(0, 0, 0, 0).unwrap());
        assert_eq!(at_epoch.milliseconds_from_epoch(epoch()), 0);

        let next_day = Datetime::new(
            Date::new(2020, 1, 2).unwrap(),
            Time::new(0, 0, 0, 1).unwrap(),
        );
        assert_eq!(next_day.milliseconds_from_epoch(epoch()), 86_400_001);

        let before = Datetime::new(
            Date::new(2019, 12, 31).unwrap(),
            Time::new(23, 59, 59, 999).unwrap(),
        );
        assert_eq!(before.milliseconds_from_epoch(epoch()), -1);
    }

    #[test]
    fn test_max_datetime_milliseconds() {
        let datetime = Datetime::new(
            Date::new(9999, 12, 31).unwrap(),
            Time::new(23, 59, 59, 999).unwrap(),
        );
        assert_eq!(
            datetime.milliseconds_from_epoch(epoch()),
            251_824_435_199_999
        );
    }

    #[test]
    fn test_from_milliseconds_round_trip() {
        for &ms in &[0i64, 1, -1, 86_400_001, -86_400_000, 251_824_435_199_999] {
            let datetime = Datetime::from_milliseconds_from_epoch(epoch(), ms).unwrap();
            assert_eq!(datetime.milliseconds_from_epoch(epoch()), ms);
        }
    }

    #[test]
    fn test_from_microseconds_round_trip() {
        for &us in &[0i64, 1, -1, 86_400_000_001, -123_456_789] {
            let datetime = Datetime::from_microseconds_from_epoch(epoch(), us).unwrap();
            assert_eq!(datetime.microseconds_from_epoch(epoch()), us);
        }
    }

    #[test]
    fn test_from_milliseconds_out_of_range() {
        // One millisecond past 9999-12-31T23:59:59.999.
        assert!(Datetime::from_milliseconds_from_epoch(epoch(), 251_824_435_200_000).is_err());
    }

    #[test]
    fn test_datetime_tz() {
        let datetime = Datetime::new(
            Date::new(2024, 3, 15).unwrap(),
            Time::new(10, 26, 0, 0).unwrap(),
        );
        let datetime_tz = DatetimeTz::new(datetime, 330).unwrap();
        assert_eq!(datetime_tz.to_string(), "2024-03-15T10:26:00.000+05:30");
        assert!(DatetimeTz::new(datetime, 1440).is_err());
    }
}
