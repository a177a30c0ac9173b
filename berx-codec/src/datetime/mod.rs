//! Date-and-time codec
//!
//! Each of the six logical kinds (date, time, datetime, each with and
//! without a timezone offset) can travel in up to three wire formats:
//!
//! - ISO-8601 text, the default;
//! - compact binary, a minimal-width integer relative to the 2020-01-01
//!   epoch, optionally prefixed by a two-octet timezone offset;
//! - extended binary, a fixed-width microsecond-resolution form opened by
//!   a two-octet header (time kinds only: plain dates have no extended
//!   form).
//!
//! Encoders pick a format from the options; decoders classify the format
//! from the declared content length and the first content octet, so the
//! three formats coexist on the wire.

mod decode;
mod encode;

pub use decode::{
    get_date_or_date_tz_value, get_date_tz_value, get_date_value,
    get_datetime_or_datetime_tz_value, get_datetime_tz_value, get_datetime_value,
    get_time_or_time_tz_value, get_time_tz_value, get_time_value,
};
pub use encode::{
    put_compact_date_tz_value, put_compact_date_value, put_compact_datetime_tz_value,
    put_compact_datetime_value, put_compact_time_tz_value, put_compact_time_value,
    put_date_tz_value, put_date_value, put_datetime_tz_value, put_datetime_value,
    put_time_tz_value, put_time_value,
};

use berx_core::{BerError, BerResult, EncoderOptions};

/// Content octets of an extended-binary time or time-tz field
pub const EXTENDED_TIME_LENGTH: usize = 7;

/// Content octets of an extended-binary datetime or datetime-tz field
pub const EXTENDED_DATETIME_LENGTH: usize = 10;

/// The six logical date-and-time kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateAndTimeKind {
    Date,
    DateTz,
    Time,
    TimeTz,
    Datetime,
    DatetimeTz,
}

/// The wire formats a date-and-time field can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateAndTimeEncoding {
    Iso8601Date,
    Iso8601DateTz,
    Iso8601Time,
    Iso8601TimeTz,
    Iso8601Datetime,
    Iso8601DatetimeTz,
    CompactBinaryDate,
    CompactBinaryDateTz,
    CompactBinaryTime,
    CompactBinaryTimeTz,
    CompactBinaryDatetime,
    CompactBinaryDatetimeTz,
    ExtendedBinaryTime,
    ExtendedBinaryTimeTz,
    ExtendedBinaryDatetime,
    ExtendedBinaryDatetimeTz,
}

impl DateAndTimeKind {
    /// Shortest ISO-8601 text rendering of this kind
    fn min_text_length(self) -> usize {
        match self {
            Self::Date => 10,      // YYYY-MM-DD
            Self::DateTz => 11,    // YYYY-MM-DDZ
            Self::Time => 8,       // HH:MM:SS
            Self::TimeTz => 9,     // HH:MM:SSZ
            Self::Datetime => 19,  // YYYY-MM-DDTHH:MM:SS
            Self::DatetimeTz => 20,
        }
    }

    /// Fixed content length of this kind's extended-binary form, if it
    /// has one
    fn extended_length(self) -> Option<usize> {
        match self {
            Self::Date | Self::DateTz => None,
            Self::Time | Self::TimeTz => Some(EXTENDED_TIME_LENGTH),
            Self::Datetime | Self::DatetimeTz => Some(EXTENDED_DATETIME_LENGTH),
        }
    }

    /// Longest compact-binary content for this kind, counting the
    /// offset-prefixed form
    fn max_compact_length(self) -> usize {
        match self {
            Self::Date | Self::DateTz => 5,
            Self::Time | Self::TimeTz => 6,
            Self::Datetime | Self::DatetimeTz => 9,
        }
    }

    fn iso8601_encoding(self) -> DateAndTimeEncoding {
        match self {
            Self::Date => DateAndTimeEncoding::Iso8601Date,
            Self::DateTz => DateAndTimeEncoding::Iso8601DateTz,
            Self::Time => DateAndTimeEncoding::Iso8601Time,
            Self::TimeTz => DateAndTimeEncoding::Iso8601TimeTz,
            Self::Datetime => DateAndTimeEncoding::Iso8601Datetime,
            Self::DatetimeTz => DateAndTimeEncoding::Iso8601DatetimeTz,
        }
    }

    fn compact_encoding(self) -> DateAndTimeEncoding {
        match self {
            Self::Date => DateAndTimeEncoding::CompactBinaryDate,
            Self::DateTz => DateAndTimeEncoding::CompactBinaryDateTz,
            Self::Time => DateAndTimeEncoding::CompactBinaryTime,
            Self::TimeTz => DateAndTimeEncoding::CompactBinaryTimeTz,
            Self::Datetime => DateAndTimeEncoding::CompactBinaryDatetime,
            Self::DatetimeTz => DateAndTimeEncoding::CompactBinaryDatetimeTz,
        }
    }

    fn extended_encoding(self) -> Option<DateAndTimeEncoding> {
        match self {
            Self::Date | Self::DateTz => None,
            Self::Time => Some(DateAndTimeEncoding::ExtendedBinaryTime),
            Self::TimeTz => Some(DateAndTimeEncoding::ExtendedBinaryTimeTz),
            Self::Datetime => Some(DateAndTimeEncoding::ExtendedBinaryDatetime),
            Self::DatetimeTz => Some(DateAndTimeEncoding::ExtendedBinaryDatetimeTz),
        }
    }
}

/// Picks the wire format the encoder will use for `kind`
///
/// With `prefer_binary_date_time` unset the answer is ISO-8601 text.
/// Otherwise the time-bearing kinds get the extended-binary form, whose
/// fixed widths cover the full supported precision and calendar range;
/// the date kinds, which have no extended form, get compact binary.
pub fn select_encoding(kind: DateAndTimeKind, options: &EncoderOptions) -> DateAndTimeEncoding {
    if !options.prefer_binary_date_time() {
        return kind.iso8601_encoding();
    }
    kind.extended_encoding().unwrap_or_else(|| kind.compact_encoding())
}

/// Classifies the wire format of a field of `kind` from its declared
/// content length and first content octet
///
/// # Errors
///
/// Returns `InvalidData` when no format of `kind` matches.
pub fn detect_encoding(
    kind: DateAndTimeKind,
    first_byte: u8,
    length: usize,
) -> BerResult<DateAndTimeEncoding> {
    if first_byte.is_ascii_digit() && length >= kind.min_text_length() {
        return Ok(kind.iso8601_encoding());
    }
    if first_byte & 0x80 != 0 && Some(length) == kind.extended_length() {
        if let Some(encoding) = kind.extended_encoding() {
            // The header may still be rejected as Reserved during decode.
            return Ok(encoding);
        }
    }
    if length >= 1 && length <= kind.max_compact_length() {
        return Ok(kind.compact_encoding());
    }
    Err(BerError::InvalidData(format!(
        "No {:?} encoding matches first byte {:02X} and length {}",
        kind, first_byte, length
    )))
}
