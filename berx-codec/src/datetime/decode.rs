//! Date-and-time decoders
//!
//! Every entry point takes the content length its caller has already read
//! and classifies the wire format via [`detect_encoding`](super::detect_encoding)
//! before dispatching. The plain kinds accept the timezone-bearing wire
//! forms (the offset is validated and dropped); the `-Tz` kinds accept the
//! plain forms (the offset becomes zero).

use berx_core::datatypes::{
    Date, DateOrDateTz, DateTz, Datetime, DatetimeOrDatetimeTz, DatetimeTz, Time, TimeOrTimeTz,
    TimeTz,
};
use berx_core::{iso8601, BerError, BerResult};

use crate::constants::EPOCH_SERIAL_DAY;
use crate::header::{get_header, HeaderType};
use crate::integer::{get_int40, get_raw_integer};
use crate::stream::ByteSource;
use crate::string::get_string_value;
use crate::timezone::get_timezone_offset_checked;

use super::{detect_encoding, DateAndTimeEncoding, DateAndTimeKind};

/// Reads a date whose `length` content octets the caller has counted
pub fn get_date_value<S: ByteSource>(source: &mut S, length: usize) -> BerResult<Date> {
    match detect_encoding(DateAndTimeKind::Date, source.peek()?, length)? {
        DateAndTimeEncoding::Iso8601Date => {
            iso8601::parse_date(&get_string_value(source, length)?)
        }
        _ => Ok(get_compact_date_parts(source, length)?.1),
    }
}

/// Reads a date with a timezone offset; a plain wire form yields offset 0
pub fn get_date_tz_value<S: ByteSource>(source: &mut S, length: usize) -> BerResult<DateTz> {
    match detect_encoding(DateAndTimeKind::DateTz, source.peek()?, length)? {
        DateAndTimeEncoding::Iso8601DateTz => {
            iso8601::parse_date_tz(&get_string_value(source, length)?)
        }
        _ => {
            let (offset, date) = get_compact_date_parts(source, length)?;
            DateTz::new(date, offset.unwrap_or(0))
        }
    }
}

/// Reads a time whose `length` content octets the caller has counted
pub fn get_time_value<S: ByteSource>(source: &mut S, length: usize) -> BerResult<Time> {
    match detect_encoding(DateAndTimeKind::Time, source.peek()?, length)? {
        DateAndTimeEncoding::Iso8601Time => {
            iso8601::parse_time(&get_string_value(source, length)?)
        }
        DateAndTimeEncoding::ExtendedBinaryTime => Ok(get_extended_time_parts(source)?.1),
        _ => Ok(get_compact_time_parts(source, length)?.1),
    }
}

/// Reads a time with a timezone offset; a plain wire form yields offset 0
pub fn get_time_tz_value<S: ByteSource>(source: &mut S, length: usize) -> BerResult<TimeTz> {
    match detect_encoding(DateAndTimeKind::TimeTz, source.peek()?, length)? {
        DateAndTimeEncoding::Iso8601TimeTz => {
            iso8601::parse_time_tz(&get_string_value(source, length)?)
        }
        DateAndTimeEncoding::ExtendedBinaryTimeTz => {
            let (header, time) = get_extended_time_parts(source)?;
            TimeTz::new(time, header.offset_minutes)
        }
        _ => {
            let (offset, time) = get_compact_time_parts(source, length)?;
            TimeTz::new(time, offset.unwrap_or(0))
        }
    }
}

/// Reads a datetime whose `length` content octets the caller has counted
pub fn get_datetime_value<S: ByteSource>(source: &mut S, length: usize) -> BerResult<Datetime> {
    match detect_encoding(DateAndTimeKind::Datetime, source.peek()?, length)? {
        DateAndTimeEncoding::Iso8601Datetime => {
            iso8601::parse_datetime(&get_string_value(source, length)?)
        }
        DateAndTimeEncoding::ExtendedBinaryDatetime => {
            Ok(get_extended_datetime_parts(source)?.1)
        }
        _ => Ok(get_compact_datetime_parts(source, length)?.1),
    }
}

/// Reads a datetime with a timezone offset; a plain wire form yields
/// offset 0
pub fn get_datetime_tz_value<S: ByteSource>(
    source: &mut S,
    length: usize,
) -> BerResult<DatetimeTz> {
    match detect_encoding(DateAndTimeKind::DatetimeTz, source.peek()?, length)? {
        DateAndTimeEncoding::Iso8601DatetimeTz => {
            iso8601::parse_datetime_tz(&get_string_value(source, length)?)
        }
        DateAndTimeEncoding::ExtendedBinaryDatetimeTz => {
            let (header, datetime) = get_extended_datetime_parts(source)?;
            DatetimeTz::new(datetime, header.offset_minutes)
        }
        _ => {
            let (offset, datetime) = get_compact_datetime_parts(source, length)?;
            DatetimeTz::new(datetime, offset.unwrap_or(0))
        }
    }
}

/// Reads either a plain date or a date with a timezone offset, whichever
/// the wire form carries
pub fn get_date_or_date_tz_value<S: ByteSource>(
    source: &mut S,
    length: usize,
) -> BerResult<DateOrDateTz> {
    match detect_encoding(DateAndTimeKind::Date, source.peek()?, length)? {
        DateAndTimeEncoding::Iso8601Date => {
            let text = get_string_value(source, length)?;
            if has_zone_designator(&text, 8) {
                Ok(DateOrDateTz::DateTz(iso8601::parse_date_tz(&text)?))
            } else {
                Ok(DateOrDateTz::Date(iso8601::parse_date(&text)?))
            }
        }
        _ => {
            let (offset, date) = get_compact_date_parts(source, length)?;
            match offset {
                Some(offset) if offset != 0 => {
                    Ok(DateOrDateTz::DateTz(DateTz::new(date, offset)?))
                }
                _ => Ok(DateOrDateTz::Date(date)),
            }
        }
    }
}

/// Reads either a plain time or a time with a timezone offset, whichever
/// the wire form carries
pub fn get_time_or_time_tz_value<S: ByteSource>(
    source: &mut S,
    length: usize,
) -> BerResult<TimeOrTimeTz> {
    match detect_encoding(DateAndTimeKind::Time, source.peek()?, length)? {
        DateAndTimeEncoding::Iso8601Time => {
            let text = get_string_value(source, length)?;
            if has_zone_designator(&text, 8) {
                Ok(TimeOrTimeTz::TimeTz(iso8601::parse_time_tz(&text)?))
            } else {
                Ok(TimeOrTimeTz::Time(iso8601::parse_time(&text)?))
            }
        }
        DateAndTimeEncoding::ExtendedBinaryTime => {
            let (header, time) = get_extended_time_parts(source)?;
            if header.header_type == HeaderType::ExtendedWithTimezone {
                Ok(TimeOrTimeTz::TimeTz(TimeTz::new(
                    time,
                    header.offset_minutes,
                )?))
            } else {
                Ok(TimeOrTimeTz::Time(time))
            }
        }
        _ => {
            let (offset, time) = get_compact_time_parts(source, length)?;
            match offset {
                Some(offset) if offset != 0 => {
                    Ok(TimeOrTimeTz::TimeTz(TimeTz::new(time, offset)?))
                }
                _ => Ok(TimeOrTimeTz::Time(time)),
            }
        }
    }
}

/// Reads either a plain datetime or a datetime with a timezone offset,
/// whichever the wire form carries
pub fn get_datetime_or_datetime_tz_value<S: ByteSource>(
    source: &mut S,
    length: usize,
) -> BerResult<DatetimeOrDatetimeTz> {
    match detect_encoding(DateAndTimeKind::Datetime, source.peek()?, length)? {
        DateAndTimeEncoding::Iso8601Datetime => {
            let text = get_string_value(source, length)?;
            if has_zone_designator(&text, 11) {
                Ok(DatetimeOrDatetimeTz::DatetimeTz(iso8601::parse_datetime_tz(
                    &text,
                )?))
            } else {
                Ok(DatetimeOrDatetimeTz::Datetime(iso8601::parse_datetime(
                    &text,
                )?))
            }
        }
        DateAndTimeEncoding::ExtendedBinaryDatetime => {
            let (header, datetime) = get_extended_datetime_parts(source)?;
            if header.header_type == HeaderType::ExtendedWithTimezone {
                Ok(DatetimeOrDatetimeTz::DatetimeTz(DatetimeTz::new(
                    datetime,
                    header.offset_minutes,
                )?))
            } else {
                Ok(DatetimeOrDatetimeTz::Datetime(datetime))
            }
        }
        _ => {
            let (offset, datetime) = get_compact_datetime_parts(source, length)?;
            match offset {
                Some(offset) if offset != 0 => Ok(DatetimeOrDatetimeTz::DatetimeTz(
                    DatetimeTz::new(datetime, offset)?,
                )),
                _ => Ok(DatetimeOrDatetimeTz::Datetime(datetime)),
            }
        }
    }
}

/// Whether text carries a trailing zone designator (`Z`, `+`, or a `-`
/// past the date components, scanned from `from`)
fn has_zone_designator(text: &str, from: usize) -> bool {
    text.bytes()
        .skip(from)
        .any(|byte| matches!(byte, b'Z' | b'z' | b'+' | b'-'))
}

/// Compact date content: an optional leading offset when the length is in
/// the prefixed range, then the day count
fn get_compact_date_parts<S: ByteSource>(
    source: &mut S,
    length: usize,
) -> BerResult<(Option<i16>, Date)> {
    let (offset, value_octets) = if length > 3 {
        (Some(get_timezone_offset_checked(source)?), length - 2)
    } else {
        (None, length)
    };
    let days = get_raw_integer(source, value_octets)?;
    let serial = days + EPOCH_SERIAL_DAY as i64;
    let serial = i32::try_from(serial).map_err(|_| {
        BerError::InvalidData(format!("Day count {} is outside the calendar range", days))
    })?;
    Ok((offset, Date::from_serial_day(serial)?))
}

/// Compact time content: an optional leading offset, then milliseconds
/// from midnight
fn get_compact_time_parts<S: ByteSource>(
    source: &mut S,
    length: usize,
) -> BerResult<(Option<i16>, Time)> {
    let (offset, value_octets) = if length > 4 {
        (Some(get_timezone_offset_checked(source)?), length - 2)
    } else {
        (None, length)
    };
    let milliseconds = get_raw_integer(source, value_octets)?;
    Ok((offset, Time::from_milliseconds_from_midnight(milliseconds)?))
}

/// Compact datetime content: an optional leading offset, then milliseconds
/// from the epoch midnight
fn get_compact_datetime_parts<S: ByteSource>(
    source: &mut S,
    length: usize,
) -> BerResult<(Option<i16>, Datetime)> {
    let (offset, value_octets) = if length > 6 {
        (Some(get_timezone_offset_checked(source)?), length - 2)
    } else {
        (None, length)
    };
    let milliseconds = get_raw_integer(source, value_octets)?;
    let epoch = Date::from_serial_day(EPOCH_SERIAL_DAY)?;
    Ok((
        offset,
        Datetime::from_milliseconds_from_epoch(epoch, milliseconds)?,
    ))
}

/// Extended time content: the two-octet header, then microseconds from
/// midnight
fn get_extended_time_parts<S: ByteSource>(
    source: &mut S,
) -> BerResult<(crate::header::ExtendedBinaryHeader, Time)> {
    let header = get_header(source)?;
    let microseconds = get_int40(source)?;
    Ok((header, Time::from_microseconds_from_midnight(microseconds)?))
}

/// Extended datetime content: the two-octet header, a three-octet day
/// delta from the epoch, then microseconds from midnight
fn get_extended_datetime_parts<S: ByteSource>(
    source: &mut S,
) -> BerResult<(crate::header::ExtendedBinaryHeader, Datetime)> {
    let header = get_header(source)?;
    let days = get_raw_integer(source, 3)?;
    let serial = days + EPOCH_SERIAL_DAY as i64;
    let serial = i32::try_from(serial).map_err(|_| {
        BerError::InvalidData(format!("Day count {} is outside the calendar range", days))
    })?;
    let date = Date::from_serial_day(serial)?;
    let microseconds = get_int40(source)?;
    let time = Time::from_microseconds_from_midnight(microseconds)?;
    Ok((header, Datetime::new(date, time)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::encode::{
        put_compact_date_tz_value, put_compact_date_value, put_compact_datetime_tz_value,
        put_compact_datetime_value, put_compact_time_tz_value, put_compact_time_value,
        put_date_value, put_datetime_tz_value, put_datetime_value, put_time_tz_value,
        put_time_value,
    };
    use crate::stream::SliceSource;
    use berx_core::EncoderOptions;

    fn date(year: u16, month: u8, day: u8) -> Date {
        Date::new(year, month, day).unwrap()
    }

    fn time(hour: u8, minute: u8, second: u8, millisecond: u16) -> Time {
        Time::new(hour, minute, second, millisecond).unwrap()
    }

    #[test]
    fn test_compact_date_round_trip() {
        for value in [
            date(2020, 1, 1),
            date(2020, 5, 8),
            date(2019, 8, 25),
            date(1930, 4, 14),
            date(1, 1, 1),
            date(9999, 12, 31),
        ] {
            let mut sink = Vec::new();
            put_compact_date_value(&mut sink, &value).unwrap();
            let mut source = SliceSource::new(&sink[1..]);
            assert_eq!(get_date_value(&mut source, sink[0] as usize).unwrap(), value);
        }
    }

    #[test]
    fn test_compact_date_tz_round_trip() {
        for offset in [0i16, 1439, -1439, 90] {
            let value = DateTz::new(date(2020, 1, 1), offset).unwrap();
            let mut sink = Vec::new();
            put_compact_date_tz_value(&mut sink, &value).unwrap();
            let mut source = SliceSource::new(&sink[1..]);
            assert_eq!(
                get_date_tz_value(&mut source, sink[0] as usize).unwrap(),
                value
            );
        }
    }

    #[test]
    fn test_plain_kind_accepts_tz_wire_form() {
        let value = DateTz::new(date(2020, 1, 1), 1439).unwrap();
        let mut sink = Vec::new();
        put_compact_date_tz_value(&mut sink, &value).unwrap();
        // The offset is validated, then dropped.
        let mut source = SliceSource::new(&sink[1..]);
        assert_eq!(
            get_date_value(&mut source, sink[0] as usize).unwrap(),
            date(2020, 1, 1)
        );

        // An out-of-range offset still fails.
        let mut source = SliceSource::new(&[0x05, 0xA0, 0x00, 0x00]);
        assert!(get_date_value(&mut source, 4).is_err());
    }

    #[test]
    fn test_tz_kind_accepts_plain_wire_form() {
        let mut source = SliceSource::new(&[0x00]);
        assert_eq!(
            get_date_tz_value(&mut source, 1).unwrap(),
            DateTz::new(date(2020, 1, 1), 0).unwrap()
        );
    }

    #[test]
    fn test_compact_time_round_trip() {
        for value in [
            time(0, 0, 0, 0),
            time(0, 0, 0, 128),
            time(12, 33, 45, 999),
            time(23, 59, 59, 999),
        ] {
            let mut sink = Vec::new();
            put_compact_time_value(&mut sink, &value).unwrap();
            let mut source = SliceSource::new(&sink[1..]);
            assert_eq!(get_time_value(&mut source, sink[0] as usize).unwrap(), value);
        }
    }

    #[test]
    fn test_compact_time_tz_round_trip() {
        for offset in [0i16, 1439, -1439] {
            let value = TimeTz::new(time(2, 19, 48, 608), offset).unwrap();
            let mut sink = Vec::new();
            put_compact_time_tz_value(&mut sink, &value).unwrap();
            let mut source = SliceSource::new(&sink[1..]);
            assert_eq!(
                get_time_tz_value(&mut source, sink[0] as usize).unwrap(),
                value
            );
        }
    }

    #[test]
    fn test_compact_datetime_round_trip() {
        for value in [
            Datetime::new(date(2020, 1, 1), time(0, 0, 0, 0)),
            Datetime::new(date(2019, 12, 31), time(23, 59, 59, 999)),
            Datetime::new(date(9999, 12, 31), time(23, 59, 59, 999)),
            Datetime::new(date(1, 1, 1), time(0, 0, 0, 0)),
        ] {
            let mut sink = Vec::new();
            put_compact_datetime_value(&mut sink, &value).unwrap();
            let mut source = SliceSource::new(&sink[1..]);
            assert_eq!(
                get_datetime_value(&mut source, sink[0] as usize).unwrap(),
                value
            );
        }
    }

    #[test]
    fn test_compact_datetime_tz_round_trip() {
        for offset in [0i16, 1439, -1439] {
            let value =
                DatetimeTz::new(Datetime::new(date(2020, 1, 1), time(0, 0, 32, 767)), offset)
                    .unwrap();
            let mut sink = Vec::new();
            put_compact_datetime_tz_value(&mut sink, &value).unwrap();
            let mut source = SliceSource::new(&sink[1..]);
            assert_eq!(
                get_datetime_tz_value(&mut source, sink[0] as usize).unwrap(),
                value
            );
        }
    }

    #[test]
    fn test_extended_round_trip() {
        let options = EncoderOptions::new().with_prefer_binary_date_time(true);

        let value = Time::new_with_microsecond(23, 59, 59, 999_999).unwrap();
        let mut sink = Vec::new();
        put_time_value(&mut sink, &value, &options).unwrap();
        let mut source = SliceSource::new(&sink[1..]);
        assert_eq!(get_time_value(&mut source, sink[0] as usize).unwrap(), value);

        let value = TimeTz::new(Time::new(1, 2, 3, 4).unwrap(), -300).unwrap();
        let mut sink = Vec::new();
        put_time_tz_value(&mut sink, &value, &options).unwrap();
        let mut source = SliceSource::new(&sink[1..]);
        assert_eq!(
            get_time_tz_value(&mut source, sink[0] as usize).unwrap(),
            value
        );

        let value = Datetime::new(
            date(9999, 12, 31),
            Time::new_with_microsecond(23, 59, 59, 999_999).unwrap(),
        );
        let mut sink = Vec::new();
        put_datetime_value(&mut sink, &value, &options).unwrap();
        let mut source = SliceSource::new(&sink[1..]);
        assert_eq!(
            get_datetime_value(&mut source, sink[0] as usize).unwrap(),
            value
        );

        let value = DatetimeTz::new(
            Datetime::new(date(1, 1, 1), Time::new(0, 0, 0, 0).unwrap()),
            1439,
        )
        .unwrap();
        let mut sink = Vec::new();
        put_datetime_tz_value(&mut sink, &value, &options).unwrap();
        let mut source = SliceSource::new(&sink[1..]);
        assert_eq!(
            get_datetime_tz_value(&mut source, sink[0] as usize).unwrap(),
            value
        );
    }

    #[test]
    fn test_text_round_trip() {
        let options = EncoderOptions::new();

        let value = date(2024, 3, 15);
        let mut sink = Vec::new();
        put_date_value(&mut sink, &value, &options).unwrap();
        let mut source = SliceSource::new(&sink[1..]);
        assert_eq!(get_date_value(&mut source, sink[0] as usize).unwrap(), value);

        let value = DatetimeTz::new(
            Datetime::new(date(2024, 3, 15), time(14, 30, 45, 123)),
            330,
        )
        .unwrap();
        let mut sink = Vec::new();
        put_datetime_tz_value(&mut sink, &value, &options).unwrap();
        let mut source = SliceSource::new(&sink[1..]);
        assert_eq!(
            get_datetime_tz_value(&mut source, sink[0] as usize).unwrap(),
            value
        );
    }

    #[test]
    fn test_binary_and_text_decode_agree() {
        // The same value through both wire formats.
        let value = date(2024, 3, 15);
        let text_options = EncoderOptions::new();
        let binary_options = EncoderOptions::new().with_prefer_binary_date_time(true);

        let mut text_sink = Vec::new();
        put_date_value(&mut text_sink, &value, &text_options).unwrap();
        let mut binary_sink = Vec::new();
        put_date_value(&mut binary_sink, &value, &binary_options).unwrap();
        assert_ne!(text_sink, binary_sink);

        let mut source = SliceSource::new(&text_sink[1..]);
        let from_text = get_date_value(&mut source, text_sink[0] as usize).unwrap();
        let mut source = SliceSource::new(&binary_sink[1..]);
        let from_binary = get_date_value(&mut source, binary_sink[0] as usize).unwrap();
        assert_eq!(from_text, from_binary);
    }

    #[test]
    fn test_variant_entry_points() {
        // Compact plain form selects the plain variant.
        let mut source = SliceSource::new(&[0x00]);
        assert_eq!(
            get_date_or_date_tz_value(&mut source, 1).unwrap(),
            DateOrDateTz::Date(date(2020, 1, 1))
        );

        // Nonzero compact offset selects the Tz variant.
        let value = DateTz::new(date(2020, 1, 1), 90).unwrap();
        let mut sink = Vec::new();
        put_compact_date_tz_value(&mut sink, &value).unwrap();
        let mut source = SliceSource::new(&sink[1..]);
        assert_eq!(
            get_date_or_date_tz_value(&mut source, sink[0] as usize).unwrap(),
            DateOrDateTz::DateTz(value)
        );

        // Text with a designator selects the Tz variant.
        let text = b"2024-03-15+05:00";
        let mut source = SliceSource::new(text);
        assert_eq!(
            get_date_or_date_tz_value(&mut source, text.len()).unwrap(),
            DateOrDateTz::DateTz(DateTz::new(date(2024, 3, 15), 300).unwrap())
        );

        // Text without one selects the plain variant.
        let text = b"2024-03-15";
        let mut source = SliceSource::new(text);
        assert_eq!(
            get_date_or_date_tz_value(&mut source, text.len()).unwrap(),
            DateOrDateTz::Date(date(2024, 3, 15))
        );

        // Extended headers drive the time and datetime variants.
        let options = EncoderOptions::new().with_prefer_binary_date_time(true);
        let value = Time::new(1, 2, 3, 4).unwrap();
        let mut sink = Vec::new();
        put_time_value(&mut sink, &value, &options).unwrap();
        let mut source = SliceSource::new(&sink[1..]);
        assert_eq!(
            get_time_or_time_tz_value(&mut source, sink[0] as usize).unwrap(),
            TimeOrTimeTz::Time(value)
        );

        let value = TimeTz::new(Time::new(1, 2, 3, 4).unwrap(), -300).unwrap();
        let mut sink = Vec::new();
        put_time_tz_value(&mut sink, &value, &options).unwrap();
        let mut source = SliceSource::new(&sink[1..]);
        assert_eq!(
            get_time_or_time_tz_value(&mut source, sink[0] as usize).unwrap(),
            TimeOrTimeTz::TimeTz(value)
        );

        // A nine-octet datetime with a zero offset prefix is still plain.
        let value = Datetime::new(date(9999, 12, 31), time(23, 59, 59, 999));
        let mut sink = Vec::new();
        put_compact_datetime_value(&mut sink, &value).unwrap();
        assert_eq!(sink[0], 9);
        let mut source = SliceSource::new(&sink[1..]);
        assert_eq!(
            get_datetime_or_datetime_tz_value(&mut source, 9).unwrap(),
            DatetimeOrDatetimeTz::Datetime(value)
        );

        let value = DatetimeTz::new(Datetime::new(date(2020, 1, 1), time(0, 0, 0, 0)), 60).unwrap();
        let mut sink = Vec::new();
        put_compact_datetime_tz_value(&mut sink, &value).unwrap();
        let mut source = SliceSource::new(&sink[1..]);
        assert_eq!(
            get_datetime_or_datetime_tz_value(&mut source, sink[0] as usize).unwrap(),
            DatetimeOrDatetimeTz::DatetimeTz(value)
        );
    }

    #[test]
    fn test_malformed_rejected() {
        // Length 0 matches no format.
        let mut source = SliceSource::new(&[0x00]);
        assert!(get_date_value(&mut source, 0).is_err());

        // Length 6 is beyond every date format.
        let mut source = SliceSource::new(&[0x00; 6]);
        assert!(get_date_value(&mut source, 6).is_err());

        // Reserved extended header.
        let mut source = SliceSource::new(&[0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert!(get_time_value(&mut source, 7).is_err());

        // Milliseconds beyond the day.
        let mut source = SliceSource::new(&[0x05, 0x26, 0x5C, 0x00]);
        assert!(get_time_value(&mut source, 4).is_err());

        // Day count past the calendar range.
        let mut source = SliceSource::new(&[0x2C, 0x79, 0x4B]);
        assert!(get_date_value(&mut source, 3).is_err());
    }
}
