//! ISO-8601 text rendering and parsing for the date-and-time types
//!
//! # Formats
//!
//! - Date: `YYYY-MM-DD`
//! - Time: `HH:MM:SS` followed by an optional fraction (`.` plus
//!   `precision` digits; digits beyond microseconds are zero-filled)
//! - Datetime: date, `T`, time
//! - Timezone-aware variants append `+hh:mm` / `-hh:mm`; a zero offset
//!   renders as `+00:00`
//!
//! Parsing is lenient in two deliberate ways: the plain (non-timezone)
//! kinds accept and discard a trailing zone designator, and the
//! timezone-aware kinds treat a missing designator as a zero offset. A
//! `Z`/`z` designator is a zero offset.

use crate::datatypes::{Date, DateTz, Datetime, DatetimeTz, Time, TimeTz};
use crate::error::{BerError, BerResult};
use crate::options::MAX_FRACTIONAL_SECOND_PRECISION;

/// Formats a date as `YYYY-MM-DD`
pub fn format_date(date: &Date) -> String {
    date.to_string()
}

/// Formats a date with its timezone offset as `YYYY-MM-DD±hh:mm`
pub fn format_date_tz(date_tz: &DateTz) -> String {
    let mut out = date_tz.date().to_string();
    push_offset(&mut out, date_tz.offset_minutes());
    out
}

/// Formats a time as `HH:MM:SS` with `precision` fractional-second digits
pub fn format_time(time: &Time, precision: u8) -> String {
    let mut out = String::with_capacity(18);
    push_time(&mut out, time, precision);
    out
}

/// Formats a time with its timezone offset
pub fn format_time_tz(time_tz: &TimeTz, precision: u8) -> String {
    let mut out = format_time(&time_tz.time(), precision);
    push_offset(&mut out, time_tz.offset_minutes());
    out
}

/// Formats a datetime as `YYYY-MM-DDTHH:MM:SS` with `precision`
/// fractional-second digits
pub fn format_datetime(datetime: &Datetime, precision: u8) -> String {
    let mut out = String::with_capacity(29);
    out.push_str(&datetime.date().to_string());
    out.push('T');
    push_time(&mut out, &datetime.time(), precision);
    out
}

/// Formats a datetime with its timezone offset
pub fn format_datetime_tz(datetime_tz: &DatetimeTz, precision: u8) -> String {
    let mut out = format_datetime(&datetime_tz.datetime(), precision);
    push_offset(&mut out, datetime_tz.offset_minutes());
    out
}

/// Parses a date, discarding any trailing zone designator
pub fn parse_date(text: &str) -> BerResult<Date> {
    let (date, rest) = parse_date_components(text)?;
    parse_zone(rest, text)?;
    Ok(date)
}

/// Parses a date with an optional zone designator (missing means offset 0)
pub fn parse_date_tz(text: &str) -> BerResult<DateTz> {
    let (date, rest) = parse_date_components(text)?;
    let offset = parse_zone(rest, text)?.unwrap_or(0);
    DateTz::new(date, offset)
}

/// Parses a time, discarding any trailing zone designator
pub fn parse_time(text: &str) -> BerResult<Time> {
    let (time, rest) = parse_time_components(text)?;
    parse_zone(rest, text)?;
    Ok(time)
}

/// Parses a time with an optional zone designator (missing means offset 0)
pub fn parse_time_tz(text: &str) -> BerResult<TimeTz> {
    let (time, rest) = parse_time_components(text)?;
    let offset = parse_zone(rest, text)?.unwrap_or(0);
    TimeTz::new(time, offset)
}

/// Parses a datetime, discarding any trailing zone designator
pub fn parse_datetime(text: &str) -> BerResult<Datetime> {
    let (datetime, rest) = parse_datetime_components(text)?;
    parse_zone(rest, text)?;
    Ok(datetime)
}

/// Parses a datetime with an optional zone designator (missing means
/// offset 0)
pub fn parse_datetime_tz(text: &str) -> BerResult<DatetimeTz> {
    let (datetime, rest) = parse_datetime_components(text)?;
    let offset = parse_zone(rest, text)?.unwrap_or(0);
    DatetimeTz::new(datetime, offset)
}

fn push_time(out: &mut String, time: &Time, precision: u8) {
    out.push_str(&format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    ));
    let precision = precision.min(MAX_FRACTIONAL_SECOND_PRECISION) as usize;
    if precision > 0 {
        let nanoseconds = format!("{:09}", time.microsecond() as u64 * 1000);
        out.push('.');
        out.push_str(&nanoseconds[..precision]);
    }
}

fn push_offset(out: &mut String, offset_minutes: i16) {
    let sign = if offset_minutes < 0 { '-' } else { '+' };
    let magnitude = offset_minutes.unsigned_abs();
    out.push_str(&format!("{}{:02}:{:02}", sign, magnitude / 60, magnitude % 60));
}

fn parse_fixed_digits(bytes: &[u8], text: &str) -> BerResult<u32> {
    let mut value = 0u32;
    for &byte in bytes {
        if !byte.is_ascii_digit() {
            return Err(BerError::InvalidData(format!(
                "Invalid ISO-8601 text: {}",
                text
            )));
        }
        value = value * 10 + (byte - b'0') as u32;
    }
    Ok(value)
}

fn parse_date_components(text: &str) -> BerResult<(Date, &str)> {
    let bytes = text.as_bytes();
    if bytes.len() < 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(BerError::InvalidData(format!(
            "Invalid ISO-8601 date: {}",
            text
        )));
    }
    let year = parse_fixed_digits(&bytes[0..4], text)?;
    let month = parse_fixed_digits(&bytes[5..7], text)?;
    let day = parse_fixed_digits(&bytes[8..10], text)?;
    let date = Date::new(year as u16, month as u8, day as u8)?;
    Ok((date, &text[10..]))
}

fn parse_time_components(text: &str) -> BerResult<(Time, &str)> {
    let bytes = text.as_bytes();
    if bytes.len() < 8 || bytes[2] != b':' || bytes[5] != b':' {
        return Err(BerError::InvalidData(format!(
            "Invalid ISO-8601 time: {}",
            text
        )));
    }
    let hour = parse_fixed_digits(&bytes[0..2], text)?;
    let minute = parse_fixed_digits(&bytes[3..5], text)?;
    let second = parse_fixed_digits(&bytes[6..8], text)?;

    let mut pos = 8;
    let mut microsecond = 0u32;
    if pos < bytes.len() && (bytes[pos] == b'.' || bytes[pos] == b',') {
        pos += 1;
        let start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let digit_count = pos - start;
        if digit_count < 1 || digit_count > MAX_FRACTIONAL_SECOND_PRECISION as usize {
            return Err(BerError::InvalidData(format!(
                "Invalid ISO-8601 fractional second: {}",
                text
            )));
        }
        // Truncate past microseconds, zero-fill short fractions.
        let significant = digit_count.min(6);
        microsecond = parse_fixed_digits(&bytes[start..start + significant], text)?
            * 10u32.pow(6 - significant as u32);
    }

    let time = Time::new_with_microsecond(hour as u8, minute as u8, second as u8, microsecond)?;
    Ok((time, &text[pos..]))
}

fn parse_datetime_components(text: &str) -> BerResult<(Datetime, &str)> {
    let (date, rest) = parse_date_components(text)?;
    let bytes = rest.as_bytes();
    if bytes.is_empty() || (bytes[0] != b'T' && bytes[0] != b't') {
        return Err(BerError::InvalidData(format!(
            "Invalid ISO-8601 datetime: {}",
            text
        )));
    }
    let (time, rest) = parse_time_components(&rest[1..])?;
    Ok((Datetime::new(date, time), rest))
}

/// Parses a trailing zone designator, which must consume the whole rest of
/// the input; `None` means the designator was absent.
fn parse_zone(rest: &str, text: &str) -> BerResult<Option<i16>> {
    if rest.is_empty() {
        return Ok(None);
    }
    if rest == "Z" || rest == "z" {
        return Ok(Some(0));
    }
    let bytes = rest.as_bytes();
    if bytes.len() != 6 || (bytes[0] != b'+' && bytes[0] != b'-') || bytes[3] != b':' {
        return Err(BerError::InvalidData(format!(
            "Invalid ISO-8601 zone designator: {}",
            text
        )));
    }
    let hours = parse_fixed_digits(&bytes[1..3], text)?;
    let minutes = parse_fixed_digits(&bytes[4..6], text)?;
    if hours > 23 || minutes > 59 {
        return Err(BerError::InvalidData(format!(
            "Invalid ISO-8601 zone designator: {}",
            text
        )));
    }
    let magnitude = (hours * 60 + minutes) as i16;
    Ok(Some(if bytes[0] == b'-' { -magnitude } else { magnitude }))
}
