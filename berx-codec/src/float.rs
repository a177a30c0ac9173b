//! Floating-point and decimal codec
//!
//! # Encoding Format
//!
//! Binary values use the X.690 binary-real form. Zero encodes as zero
//! content octets; the three specials are one-octet content (`0x40` for
//! +inf, `0x41` for -inf, `0x42` for NaN). A finite value is a descriptor
//! octet, a minimal two's-complement binary exponent, and a minimal
//! mantissa: the IEEE-754 significand is normalized so its lowest bit is
//! set, which makes each value's encoding unique. The descriptor carries
//! the sign in bit 7 and the exponent octet count (minus one) in its two
//! low bits; base is always 2 and scale 0 on the way out.
//!
//! Decimal64 values are not interpreted: their 8-octet IEEE 754-2008
//! interchange pattern is carried big-endian as-is.

use berx_core::{BerError, BerResult, Decimal64};

use crate::integer::{get_raw_integer, get_raw_unsigned, num_octets_needed, put_raw_integer};
use crate::length::put_length;
use crate::stream::{ByteSink, ByteSource};

const POSITIVE_INFINITY_OCTET: u8 = 0x40;
const NEGATIVE_INFINITY_OCTET: u8 = 0x41;
const NOT_A_NUMBER_OCTET: u8 = 0x42;

const BINARY_BIT: u8 = 0x80;
const SIGN_BIT: u8 = 0x40;
const BASE_MASK: u8 = 0x30;
const SCALE_MASK: u8 = 0x0C;
const EXPONENT_LENGTH_MASK: u8 = 0x03;

const DOUBLE_FRACTION_BITS: u32 = 52;
const DOUBLE_EXPONENT_BIAS: i64 = 1023;

/// Writes an `f64` with its length prefix
pub fn put_double_value<S: ByteSink>(sink: &mut S, value: f64) -> BerResult<()> {
    if value == 0.0 {
        return put_length(sink, 0);
    }
    if value.is_infinite() {
        let octet = if value > 0.0 {
            POSITIVE_INFINITY_OCTET
        } else {
            NEGATIVE_INFINITY_OCTET
        };
        return sink.write_all(&[0x01, octet]);
    }
    if value.is_nan() {
        return sink.write_all(&[0x01, NOT_A_NUMBER_OCTET]);
    }

    let bits = value.to_bits();
    let sign_negative = bits >> 63 != 0;
    let biased = ((bits >> DOUBLE_FRACTION_BITS) & 0x7FF) as i64;
    let fraction = bits & ((1u64 << DOUBLE_FRACTION_BITS) - 1);

    let (mut mantissa, mut exponent) = if biased == 0 {
        // Denormal: no implicit leading bit.
        (fraction, 1 - DOUBLE_EXPONENT_BIAS - DOUBLE_FRACTION_BITS as i64)
    } else {
        (
            fraction | (1u64 << DOUBLE_FRACTION_BITS),
            biased - DOUBLE_EXPONENT_BIAS - DOUBLE_FRACTION_BITS as i64,
        )
    };

    // Normalize so the mantissa's lowest bit is set.
    let trailing = mantissa.trailing_zeros();
    mantissa >>= trailing;
    exponent += trailing as i64;

    let exponent_octets = num_octets_needed(exponent);
    let mantissa_octets = num_octets_needed(mantissa as i64);
    let descriptor =
        BINARY_BIT | if sign_negative { SIGN_BIT } else { 0 } | (exponent_octets as u8 - 1);

    put_length(sink, 1 + exponent_octets + mantissa_octets)?;
    sink.write_byte(descriptor)?;
    put_raw_integer(sink, exponent, exponent_octets)?;
    put_raw_integer(sink, mantissa as i64, mantissa_octets)
}

/// Writes an `f32` with its length prefix
///
/// The value is widened to `f64` first; widening is exact, so the octets
/// are the same as for the equivalent double.
pub fn put_float_value<S: ByteSink>(sink: &mut S, value: f32) -> BerResult<()> {
    put_double_value(sink, value as f64)
}

/// Reads an `f64` whose `length` content octets the caller has counted
///
/// # Errors
///
/// Returns `InvalidData` for decimal (character) encodings, a nonzero
/// base, or a value too large for `f64`.
pub fn get_double_value<S: ByteSource>(source: &mut S, length: usize) -> BerResult<f64> {
    if length == 0 {
        return Ok(0.0);
    }

    let descriptor = source.read_byte()?;
    if length == 1 {
        return match descriptor {
            POSITIVE_INFINITY_OCTET => Ok(f64::INFINITY),
            NEGATIVE_INFINITY_OCTET => Ok(f64::NEG_INFINITY),
            NOT_A_NUMBER_OCTET => Ok(f64::NAN),
            _ => Err(BerError::InvalidData(format!(
                "Unsupported one-octet real encoding: {:02X}",
                descriptor
            ))),
        };
    }
    if descriptor & BINARY_BIT == 0 {
        return Err(BerError::InvalidData(format!(
            "Unsupported non-binary real encoding: {:02X}",
            descriptor
        )));
    }
    if descriptor & BASE_MASK != 0 {
        return Err(BerError::InvalidData(format!(
            "Unsupported real base in descriptor {:02X}",
            descriptor
        )));
    }
    let sign_negative = descriptor & SIGN_BIT != 0;
    let scale = (descriptor & SCALE_MASK) >> 2;

    let mut header_octets = 1;
    let exponent_octets = match descriptor & EXPONENT_LENGTH_MASK {
        3 => {
            header_octets += 1;
            source.read_byte()? as usize
        }
        selector => selector as usize + 1,
    };
    let mantissa_octets = length
        .checked_sub(header_octets + exponent_octets)
        .filter(|&count| count >= 1)
        .ok_or_else(|| {
            BerError::InvalidData(format!(
                "Real encoding of {} octets leaves no mantissa after {} exponent octets",
                length, exponent_octets
            ))
        })?;
    if mantissa_octets > 8 {
        return Err(BerError::InvalidData(format!(
            "Real mantissa is encoded in {} octets, at most 8 supported",
            mantissa_octets
        )));
    }

    let exponent = get_raw_integer(source, exponent_octets)?;
    let mut mantissa = get_raw_unsigned(source, mantissa_octets)?;
    if scale > 0 {
        if mantissa.leading_zeros() < scale as u32 {
            return Err(BerError::InvalidData(
                "Real mantissa overflows under scale factor".to_string(),
            ));
        }
        mantissa <<= scale;
    }

    assemble_double(sign_negative, mantissa, exponent)
}

/// Reads an `f32` whose `length` content octets the caller has counted
///
/// # Errors
///
/// Returns `PrecisionLoss` if the decoded double is finite but overflows
/// the `f32` range.
pub fn get_float_value<S: ByteSource>(source: &mut S, length: usize) -> BerResult<f32> {
    let wide = get_double_value(source, length)?;
    let narrow = wide as f32;
    if narrow.is_infinite() && wide.is_finite() {
        return Err(BerError::PrecisionLoss(format!(
            "Value {} overflows f32",
            wide
        )));
    }
    Ok(narrow)
}

/// Writes a `Decimal64` bit pattern as 8 big-endian octets with a length
/// prefix
pub fn put_decimal64_value<S: ByteSink>(sink: &mut S, value: Decimal64) -> BerResult<()> {
    put_length(sink, 8)?;
    sink.write_all(&value.to_bits().to_be_bytes())
}

/// Reads a `Decimal64` whose `length` must be exactly 8
pub fn get_decimal64_value<S: ByteSource>(source: &mut S, length: usize) -> BerResult<Decimal64> {
    if length != 8 {
        return Err(BerError::InvalidData(format!(
            "Decimal64 is encoded in {} octets, expected 8",
            length
        )));
    }
    let mut buf = [0u8; 8];
    source.read_exact(&mut buf)?;
    Ok(Decimal64::from_bits(u64::from_be_bytes(buf)))
}

/// Computes `±mantissa * 2^exponent`, rejecting overflow
fn assemble_double(sign_negative: bool, mantissa: u64, exponent: i64) -> BerResult<f64> {
    if mantissa == 0 {
        return Ok(if sign_negative { -0.0 } else { 0.0 });
    }
    if exponent > 1024 {
        return Err(BerError::InvalidData(format!(
            "Real exponent {} overflows f64",
            exponent
        )));
    }
    if exponent < -1140 {
        // Below the denormal range even for a full 64-bit mantissa.
        return Ok(if sign_negative { -0.0 } else { 0.0 });
    }

    // Two steps keep the intermediate product in range when the result is
    // denormal.
    let half = (exponent / 2) as i32;
    let value = mantissa as f64 * 2f64.powi(half) * 2f64.powi(exponent as i32 - half);
    if value.is_infinite() {
        return Err(BerError::InvalidData(format!(
            "Real value with exponent {} overflows f64",
            exponent
        )));
    }
    Ok(if sign_negative { -value } else { value })
}
