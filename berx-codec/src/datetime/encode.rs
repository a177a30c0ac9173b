//! Date-and-time encoders

use berx_core::datatypes::{Date, DateTz, Datetime, DatetimeTz, Time, TimeTz};
use berx_core::{iso8601, BerResult, EncoderOptions};

use crate::constants::EPOCH_SERIAL_DAY;
use crate::header::{put_header_with_timezone, put_header_without_timezone};
use crate::integer::{num_octets_needed, put_int40, put_raw_integer};
use crate::length::put_length;
use crate::stream::ByteSink;
use crate::string::put_string_value;
use crate::timezone::put_timezone_offset;

use super::{select_encoding, DateAndTimeEncoding, DateAndTimeKind};

/// Minimum value-octet widths of the offset-prefixed compact forms; the
/// padding keeps their total length above the plain form's maximum, which
/// is what decoders split on.
const DATE_TZ_MIN_OCTETS: usize = 2;
const TIME_TZ_MIN_OCTETS: usize = 3;
const DATETIME_TZ_MIN_OCTETS: usize = 5;

/// Widest minimal encoding of a plain compact datetime before it switches
/// to the offset-prefixed layout
const DATETIME_PLAIN_MAX_OCTETS: usize = 6;

/// Writes a date in the format selected by `options`
pub fn put_date_value<S: ByteSink>(
    sink: &mut S,
    date: &Date,
    options: &EncoderOptions,
) -> BerResult<()> {
    match select_encoding(DateAndTimeKind::Date, options) {
        DateAndTimeEncoding::CompactBinaryDate => put_compact_date_value(sink, date),
        _ => put_string_value(sink, &iso8601::format_date(date)),
    }
}

/// Writes a date with its timezone offset in the format selected by
/// `options`
pub fn put_date_tz_value<S: ByteSink>(
    sink: &mut S,
    date_tz: &DateTz,
    options: &EncoderOptions,
) -> BerResult<()> {
    match select_encoding(DateAndTimeKind::DateTz, options) {
        DateAndTimeEncoding::CompactBinaryDateTz => put_compact_date_tz_value(sink, date_tz),
        _ => put_string_value(sink, &iso8601::format_date_tz(date_tz)),
    }
}

/// Writes a time in the format selected by `options`
pub fn put_time_value<S: ByteSink>(
    sink: &mut S,
    time: &Time,
    options: &EncoderOptions,
) -> BerResult<()> {
    match select_encoding(DateAndTimeKind::Time, options) {
        DateAndTimeEncoding::ExtendedBinaryTime => put_extended_time(sink, time, None),
        _ => put_string_value(
            sink,
            &iso8601::format_time(time, options.fractional_second_precision()),
        ),
    }
}

/// Writes a time with its timezone offset in the format selected by
/// `options`
pub fn put_time_tz_value<S: ByteSink>(
    sink: &mut S,
    time_tz: &TimeTz,
    options: &EncoderOptions,
) -> BerResult<()> {
    match select_encoding(DateAndTimeKind::TimeTz, options) {
        DateAndTimeEncoding::ExtendedBinaryTimeTz => {
            put_extended_time(sink, &time_tz.time(), Some(time_tz.offset_minutes()))
        }
        _ => put_string_value(
            sink,
            &iso8601::format_time_tz(time_tz, options.fractional_second_precision()),
        ),
    }
}

/// Writes a datetime in the format selected by `options`
pub fn put_datetime_value<S: ByteSink>(
    sink: &mut S,
    datetime: &Datetime,
    options: &EncoderOptions,
) -> BerResult<()> {
    match select_encoding(DateAndTimeKind::Datetime, options) {
        DateAndTimeEncoding::ExtendedBinaryDatetime => put_extended_datetime(sink, datetime, None),
        _ => put_string_value(
            sink,
            &iso8601::format_datetime(datetime, options.fractional_second_precision()),
        ),
    }
}

/// Writes a datetime with its timezone offset in the format selected by
/// `options`
pub fn put_datetime_tz_value<S: ByteSink>(
    sink: &mut S,
    datetime_tz: &DatetimeTz,
    options: &EncoderOptions,
) -> BerResult<()> {
    match select_encoding(DateAndTimeKind::DatetimeTz, options) {
        DateAndTimeEncoding::ExtendedBinaryDatetimeTz => put_extended_datetime(
            sink,
            &datetime_tz.datetime(),
            Some(datetime_tz.offset_minutes()),
        ),
        _ => put_string_value(
            sink,
            &iso8601::format_datetime_tz(datetime_tz, options.fractional_second_precision()),
        ),
    }
}

/// Writes a date as a minimal signed count of days from the 2020-01-01
/// epoch
pub fn put_compact_date_value<S: ByteSink>(sink: &mut S, date: &Date) -> BerResult<()> {
    let days = (date.serial_day() - EPOCH_SERIAL_DAY) as i64;
    let num_octets = num_octets_needed(days);
    put_length(sink, num_octets)?;
    put_raw_integer(sink, days, num_octets)
}

/// Writes a date with its timezone offset in compact binary
///
/// A zero offset encodes exactly as the plain date; otherwise the offset
/// leads and the day count is padded to at least two octets.
pub fn put_compact_date_tz_value<S: ByteSink>(sink: &mut S, date_tz: &DateTz) -> BerResult<()> {
    if date_tz.offset_minutes() == 0 {
        return put_compact_date_value(sink, &date_tz.date());
    }
    let days = (date_tz.date().serial_day() - EPOCH_SERIAL_DAY) as i64;
    let num_octets = num_octets_needed(days).max(DATE_TZ_MIN_OCTETS);
    put_length(sink, 2 + num_octets)?;
    put_timezone_offset(sink, date_tz.offset_minutes())?;
    put_raw_integer(sink, days, num_octets)
}

/// Writes a time as a minimal count of milliseconds from midnight
pub fn put_compact_time_value<S: ByteSink>(sink: &mut S, time: &Time) -> BerResult<()> {
    let milliseconds = time.milliseconds_from_midnight();
    let num_octets = num_octets_needed(milliseconds);
    put_length(sink, num_octets)?;
    put_raw_integer(sink, milliseconds, num_octets)
}

/// Writes a time with its timezone offset in compact binary
///
/// A zero offset encodes exactly as the plain time; otherwise the offset
/// leads and the millisecond count is padded to at least three octets.
pub fn put_compact_time_tz_value<S: ByteSink>(sink: &mut S, time_tz: &TimeTz) -> BerResult<()> {
    if time_tz.offset_minutes() == 0 {
        return put_compact_time_value(sink, &time_tz.time());
    }
    let milliseconds = time_tz.time().milliseconds_from_midnight();
    let num_octets = num_octets_needed(milliseconds).max(TIME_TZ_MIN_OCTETS);
    put_length(sink, 2 + num_octets)?;
    put_timezone_offset(sink, time_tz.offset_minutes())?;
    put_raw_integer(sink, milliseconds, num_octets)
}

/// Writes a datetime as a count of milliseconds from the epoch midnight
///
/// Values whose minimal width exceeds six octets switch to the
/// offset-prefixed layout with a zero offset, which keeps the plain and
/// timezone forms distinguishable by length alone.
pub fn put_compact_datetime_value<S: ByteSink>(sink: &mut S, datetime: &Datetime) -> BerResult<()> {
    let epoch = Date::from_serial_day(EPOCH_SERIAL_DAY)?;
    let milliseconds = datetime.milliseconds_from_epoch(epoch);
    let num_octets = num_octets_needed(milliseconds);
    if num_octets <= DATETIME_PLAIN_MAX_OCTETS {
        put_length(sink, num_octets)?;
        return put_raw_integer(sink, milliseconds, num_octets);
    }
    put_length(sink, 2 + num_octets)?;
    put_timezone_offset(sink, 0)?;
    put_raw_integer(sink, milliseconds, num_octets)
}

/// Writes a datetime with its timezone offset in compact binary
///
/// A zero offset encodes exactly as the plain datetime; otherwise the
/// offset leads and the millisecond count is padded to at least five
/// octets.
pub fn put_compact_datetime_tz_value<S: ByteSink>(
    sink: &mut S,
    datetime_tz: &DatetimeTz,
) -> BerResult<()> {
    if datetime_tz.offset_minutes() == 0 {
        return put_compact_datetime_value(sink, &datetime_tz.datetime());
    }
    let epoch = Date::from_serial_day(EPOCH_SERIAL_DAY)?;
    let milliseconds = datetime_tz.datetime().milliseconds_from_epoch(epoch);
    let num_octets = num_octets_needed(milliseconds).max(DATETIME_TZ_MIN_OCTETS);
    put_length(sink, 2 + num_octets)?;
    put_timezone_offset(sink, datetime_tz.offset_minutes())?;
    put_raw_integer(sink, milliseconds, num_octets)
}

fn put_extended_time<S: ByteSink>(
    sink: &mut S,
    time: &Time,
    offset_minutes: Option<i16>,
) -> BerResult<()> {
    put_length(sink, super::EXTENDED_TIME_LENGTH)?;
    match offset_minutes {
        Some(offset) => put_header_with_timezone(sink, offset)?,
        None => put_header_without_timezone(sink)?,
    }
    put_int40(sink, time.microseconds_from_midnight())
}

fn put_extended_datetime<S: ByteSink>(
    sink: &mut S,
    datetime: &Datetime,
    offset_minutes: Option<i16>,
) -> BerResult<()> {
    put_length(sink, super::EXTENDED_DATETIME_LENGTH)?;
    match offset_minutes {
        Some(offset) => put_header_with_timezone(sink, offset)?,
        None => put_header_without_timezone(sink)?,
    }
    let days = (datetime.date().serial_day() - EPOCH_SERIAL_DAY) as i64;
    put_raw_integer(sink, days, 3)?;
    put_int40(sink, datetime.time().microseconds_from_midnight())
}
