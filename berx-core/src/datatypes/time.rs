//! Time-of-day types with microsecond resolution

use crate::error::{BerError, BerResult};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::validate_timezone_offset;

/// Milliseconds in a day
pub const MILLISECONDS_PER_DAY: i64 = 86_400_000;

/// Microseconds in a day
pub const MICROSECONDS_PER_DAY: i64 = 86_400_000_000;

/// A time of day with microsecond resolution
///
/// Hours run 0 to 23; there is no representation for the 24:00 end-of-day
/// sentinel some libraries use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Time {
    hour: u8,
    minute: u8,
    second: u8,
    microsecond: u32,
}

impl Time {
    /// Constructs a time from hour, minute, second, and millisecond
    pub fn new(hour: u8, minute: u8, second: u8, millisecond: u16) -> BerResult<Self> {
        if millisecond > 999 {
            return Err(BerError::InvalidData(format!(
                "Millisecond is out of range [0, 999], got {}",
                millisecond
            )));
        }
        Self::new_with_microsecond(hour, minute, second, millisecond as u32 * 1000)
    }

    /// Constructs a time from hour, minute, second, and microsecond
    ///
    /// # Errors
    ///
    /// Returns an error if any component is out of range (`hour <= 23`,
    /// `minute <= 59`, `second <= 59`, `microsecond <= 999_999`).
    pub fn new_with_microsecond(
        hour: u8,
        minute: u8,
        second: u8,
        microsecond: u32,
    ) -> BerResult<Self> {
        if hour > 23 {
            return Err(BerError::InvalidData(format!(
                "Hour is out of range [0, 23], got {}",
                hour
            )));
        }
        if minute > 59 {
            return Err(BerError::InvalidData(format!(
                "Minute is out of range [0, 59], got {}",
                minute
            )));
        }
        if second > 59 {
            return Err(BerError::InvalidData(format!(
                "Second is out of range [0, 59], got {}",
                second
            )));
        }
        if microsecond > 999_999 {
            return Err(BerError::InvalidData(format!(
                "Microsecond is out of range [0, 999999], got {}",
                microsecond
            )));
        }
        Ok(Self {
            hour,
            minute,
            second,
            microsecond,
        })
    }

    /// Constructs a time from a count of milliseconds since midnight
    pub fn from_milliseconds_from_midnight(milliseconds: i64) -> BerResult<Self> {
        if milliseconds < 0 || milliseconds >= MILLISECONDS_PER_DAY {
            return Err(BerError::InvalidData(format!(
                "Milliseconds from midnight is out of range [0, {}), got {}",
                MILLISECONDS_PER_DAY, milliseconds
            )));
        }
        Self::from_microseconds_from_midnight(milliseconds * 1000)
    }

    /// Constructs a time from a count of microseconds since midnight
    pub fn from_microseconds_from_midnight(microseconds: i64) -> BerResult<Self> {
        if microseconds < 0 || microseconds >= MICROSECONDS_PER_DAY {
            return Err(BerError::InvalidData(format!(
                "Microseconds from midnight is out of range [0, {}), got {}",
                MICROSECONDS_PER_DAY, microseconds
            )));
        }
        let second_of_day = (microseconds / 1_000_000) as u32;
        Ok(Self {
            hour: (second_of_day / 3600) as u8,
            minute: (second_of_day / 60 % 60) as u8,
            second: (second_of_day % 60) as u8,
            microsecond: (microseconds % 1_000_000) as u32,
        })
    }

    /// Get the hour (0 to 23)
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Get the minute (0 to 59)
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Get the second (0 to 59)
    pub fn second(&self) -> u8 {
        self.second
    }

    /// Get the millisecond part (0 to 999, microseconds truncated)
    pub fn millisecond(&self) -> u16 {
        (self.microsecond / 1000) as u16
    }

    /// Get the microsecond part (0 to 999,999)
    pub fn microsecond(&self) -> u32 {
        self.microsecond
    }

    /// Milliseconds elapsed since midnight (microseconds truncated)
    pub fn milliseconds_from_midnight(&self) -> i64 {
        self.microseconds_from_midnight() / 1000
    }

    /// Microseconds elapsed since midnight
    pub fn microseconds_from_midnight(&self) -> i64 {
        let seconds =
            self.hour as i64 * 3600 + self.minute as i64 * 60 + self.second as i64;
        seconds * 1_000_000 + self.microsecond as i64
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hour,
            self.minute,
            self.second,
            self.millisecond()
        )
    }
}

/// A time of day with a timezone offset in minutes from UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeTz {
    time: Time,
    offset_minutes: i16,
}

impl TimeTz {
    /// Constructs a time with a timezone offset
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is outside `[-1439, 1439]`.
    pub fn new(time: Time, offset_minutes: i16) -> BerResult<Self> {
        validate_timezone_offset(offset_minutes)?;
        Ok(Self {
            time,
            offset_minutes,
        })
    }

    /// Get the local time
    pub fn time(&self) -> Time {
        self.time
    }

    /// Get the timezone offset in minutes from UTC
    pub fn offset_minutes(&self) -> i16 {
        self.offset_minutes
    }
}

impl fmt::Display for TimeTz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.offset_minutes < 0 { '-' } else { '+' };
        let magnitude = self.offset_minutes.unsigned_abs();
        write!(
            f,
            "{}{}{:02}:{:02}",
            self.time,
            sign,
            magnitude / 60,
            magnitude % 60
        )
    }
}
