//! Integer codec
//!
//! # Encoding Format
//!
//! Integers are minimal big-endian two's complement: the shortest octet
//! sequence whose sign-extension reproduces the value. Unsigned values are
//! encoded as the signed reading of their bit pattern, so a value whose
//! leading octet would have the top bit set gains a `0x00` sign octet
//! (`u64::MAX` therefore needs nine octets).
//!
//! The `put_*_value` entry points prefix the octets with their length; the
//! `get_*` entry points take the length from the caller, which has already
//! consumed the enclosing field's length octets. The `raw` variants carry
//! no length at all and serve the float and date-and-time codecs.

use berx_core::{BerError, BerResult};

use crate::length::put_length;
use crate::stream::{ByteSink, ByteSource};

/// Octets in the fixed-width 40-bit encoding
const INT40_OCTETS: usize = 5;

const INT40_MIN: i64 = -(1 << 39);
const INT40_MAX: i64 = (1 << 39) - 1;

/// Minimal number of two's-complement octets representing `value`
pub fn num_octets_needed(value: i64) -> usize {
    // XOR with the sign fill leaves only the significant bits.
    let significant = 64 - (value ^ (value >> 63)).leading_zeros() as usize;
    significant / 8 + 1
}

/// Minimal number of octets representing `value` as a non-negative
/// two's-complement integer
pub fn num_octets_needed_unsigned(value: u64) -> usize {
    let significant = 64 - value.leading_zeros() as usize;
    significant / 8 + 1
}

/// Writes the low `num_octets` big-endian octets of `value`, no length
/// prefix
pub fn put_raw_integer<S: ByteSink>(sink: &mut S, value: i64, num_octets: usize) -> BerResult<()> {
    if num_octets == 0 || num_octets > 8 {
        return Err(BerError::InvalidData(format!(
            "Raw integer width is out of range [1, 8], got {}",
            num_octets
        )));
    }
    sink.write_all(&value.to_be_bytes()[8 - num_octets..])
}

/// Reads `num_octets` big-endian octets and sign-extends them to an `i64`
pub fn get_raw_integer<S: ByteSource>(source: &mut S, num_octets: usize) -> BerResult<i64> {
    if num_octets == 0 || num_octets > 8 {
        return Err(BerError::InvalidData(format!(
            "Integer is encoded in {} octets, expected 1 to 8",
            num_octets
        )));
    }
    let mut buf = [0u8; 8];
    source.read_exact(&mut buf[8 - num_octets..])?;
    if buf[8 - num_octets] & 0x80 != 0 {
        for byte in &mut buf[..8 - num_octets] {
            *byte = 0xFF;
        }
    }
    Ok(i64::from_be_bytes(buf))
}

/// Reads `num_octets` octets as a non-negative integer, zero-extending to
/// a `u64`
///
/// A nine-octet encoding is accepted only when its leading octet is the
/// `0x00` sign octet.
pub fn get_raw_unsigned<S: ByteSource>(source: &mut S, num_octets: usize) -> BerResult<u64> {
    if num_octets == 0 || num_octets > 9 {
        return Err(BerError::InvalidData(format!(
            "Unsigned integer is encoded in {} octets, expected 1 to 9",
            num_octets
        )));
    }
    if num_octets == 9 {
        let sign = source.read_byte()?;
        if sign != 0x00 {
            return Err(BerError::InvalidData(format!(
                "Nine-octet unsigned integer must lead with 0x00, got {:02X}",
                sign
            )));
        }
        let mut buf = [0u8; 8];
        source.read_exact(&mut buf)?;
        return Ok(u64::from_be_bytes(buf));
    }
    let mut buf = [0u8; 8];
    source.read_exact(&mut buf[8 - num_octets..])?;
    Ok(u64::from_be_bytes(buf))
}

/// Writes `value` with a length prefix and minimal octets
pub fn put_int_value<S: ByteSink>(sink: &mut S, value: i64) -> BerResult<()> {
    let num_octets = num_octets_needed(value);
    put_length(sink, num_octets)?;
    put_raw_integer(sink, value, num_octets)
}

/// Writes `value` with a length prefix as a non-negative integer
pub fn put_uint_value<S: ByteSink>(sink: &mut S, value: u64) -> BerResult<()> {
    let num_octets = num_octets_needed_unsigned(value);
    put_length(sink, num_octets)?;
    if num_octets == 9 {
        sink.write_byte(0x00)?;
        return sink.write_all(&value.to_be_bytes());
    }
    sink.write_all(&value.to_be_bytes()[8 - num_octets..])
}

/// Reads a signed integer whose `length` octets the caller has counted
pub fn get_int_value<S: ByteSource>(source: &mut S, length: usize) -> BerResult<i64> {
    get_raw_integer(source, length)
}

/// Reads an unsigned integer whose `length` octets the caller has counted
pub fn get_uint_value<S: ByteSource>(source: &mut S, length: usize) -> BerResult<u64> {
    get_raw_unsigned(source, length)
}

macro_rules! signed_value_fns {
    ($put:ident, $get:ident, $ty:ty) => {
        /// Length-prefixed encoding through the 64-bit signed core
        pub fn $put<S: ByteSink>(sink: &mut S, value: $ty) -> BerResult<()> {
            put_int_value(sink, value as i64)
        }

        /// Decodes through the 64-bit signed core, bounds-checking the
        /// destination type
        pub fn $get<S: ByteSource>(source: &mut S, length: usize) -> BerResult<$ty> {
            let wide = get_int_value(source, length)?;
            <$ty>::try_from(wide).map_err(|_| {
                BerError::InvalidData(format!(
                    "Value {} does not fit {}",
                    wide,
                    stringify!($ty)
                ))
            })
        }
    };
}

macro_rules! unsigned_value_fns {
    ($put:ident, $get:ident, $ty:ty) => {
        /// Length-prefixed encoding through the 64-bit unsigned core
        pub fn $put<S: ByteSink>(sink: &mut S, value: $ty) -> BerResult<()> {
            put_uint_value(sink, value as u64)
        }

        /// Decodes through the 64-bit unsigned core, bounds-checking the
        /// destination type
        pub fn $get<S: ByteSource>(source: &mut S, length: usize) -> BerResult<$ty> {
            let wide = get_uint_value(source, length)?;
            <$ty>::try_from(wide).map_err(|_| {
                BerError::InvalidData(format!(
                    "Value {} does not fit {}",
                    wide,
                    stringify!($ty)
                ))
            })
        }
    };
}

signed_value_fns!(put_i8_value, get_i8_value, i8);
signed_value_fns!(put_i16_value, get_i16_value, i16);
signed_value_fns!(put_i32_value, get_i32_value, i32);
unsigned_value_fns!(put_u8_value, get_u8_value, u8);
unsigned_value_fns!(put_u16_value, get_u16_value, u16);
unsigned_value_fns!(put_u32_value, get_u32_value, u32);

/// Writes `value` as a fixed five-octet (40-bit) big-endian integer
///
/// # Errors
///
/// Returns `InvalidData` if `value` is outside `[-2^39, 2^39)`.
pub fn put_int40<S: ByteSink>(sink: &mut S, value: i64) -> BerResult<()> {
    if value < INT40_MIN || value > INT40_MAX {
        return Err(BerError::InvalidData(format!(
            "Value is out of 40-bit range, got {}",
            value
        )));
    }
    sink.write_all(&value.to_be_bytes()[8 - INT40_OCTETS..])
}

/// Reads a fixed five-octet (40-bit) big-endian integer, sign-extended
pub fn get_int40<S: ByteSource>(source: &mut S) -> BerResult<i64> {
    get_raw_integer(source, INT40_OCTETS)
}
