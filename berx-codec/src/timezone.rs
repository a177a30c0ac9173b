//! Timezone-offset codec
//!
//! Offsets travel as a fixed two-octet signed big-endian count of minutes
//! from UTC. The legal domain is one minute short of a full day in either
//! direction.

use berx_core::datatypes::MAX_TIMEZONE_OFFSET_MINUTES;
use berx_core::{BerError, BerResult};

use crate::stream::{ByteSink, ByteSource};

/// Whether `offset_minutes` is a legal timezone offset
pub fn is_valid_timezone_offset(offset_minutes: i16) -> bool {
    (-MAX_TIMEZONE_OFFSET_MINUTES..=MAX_TIMEZONE_OFFSET_MINUTES).contains(&offset_minutes)
}

/// Writes a timezone offset as two big-endian octets
///
/// # Errors
///
/// Returns `InvalidData` if the offset is outside `[-1439, 1439]`.
pub fn put_timezone_offset<S: ByteSink>(sink: &mut S, offset_minutes: i16) -> BerResult<()> {
    if !is_valid_timezone_offset(offset_minutes) {
        return Err(BerError::InvalidData(format!(
            "Timezone offset is out of range [-1439, 1439], got {}",
            offset_minutes
        )));
    }
    sink.write_all(&offset_minutes.to_be_bytes())
}

/// Reads a two-octet timezone offset without range-checking it
pub fn get_timezone_offset<S: ByteSource>(source: &mut S) -> BerResult<i16> {
    let mut buf = [0u8; 2];
    source.read_exact(&mut buf)?;
    Ok(i16::from_be_bytes(buf))
}

/// Reads a two-octet timezone offset, rejecting out-of-range values
pub fn get_timezone_offset_checked<S: ByteSource>(source: &mut S) -> BerResult<i16> {
    let offset_minutes = get_timezone_offset(source)?;
    if !is_valid_timezone_offset(offset_minutes) {
        return Err(BerError::InvalidData(format!(
            "Timezone offset is out of range [-1439, 1439], got {}",
            offset_minutes
        )));
    }
    Ok(offset_minutes)
}
