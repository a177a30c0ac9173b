//! Sum types for wire positions that may carry either a plain value or a
//! timezone-aware one
//!
//! The binary and textual date-and-time formats do not reserve distinct
//! encodings for "no timezone"; a decoder that must accept both shapes
//! reports which one it saw through these enums.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::date::{Date, DateTz};
use super::date_time::{Datetime, DatetimeTz};
use super::time::{Time, TimeTz};

/// Either a plain date or a date with a timezone offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateOrDateTz {
    Date(Date),
    DateTz(DateTz),
}

impl fmt::Display for DateOrDateTz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => date.fmt(f),
            Self::DateTz(date_tz) => date_tz.fmt(f),
        }
    }
}

/// Either a plain time or a time with a timezone offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOrTimeTz {
    Time(Time),
    TimeTz(TimeTz),
}

impl fmt::Display for TimeOrTimeTz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time(time) => time.fmt(f),
            Self::TimeTz(time_tz) => time_tz.fmt(f),
        }
    }
}

/// Either a plain datetime or a datetime with a timezone offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatetimeOrDatetimeTz {
    Datetime(Datetime),
    DatetimeTz(DatetimeTz),
}

impl fmt::Display for DatetimeOrDatetimeTz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Datetime(datetime) => datetime.fmt(f),
            Self::DatetimeTz(datetime_tz) => datetime_tz.fmt(f),
        }
    }
}
