//! Length octet codec
//!
//! # Encoding Format
//!
//! Lengths up to 127 use the short form, a single octet holding the value.
//! Larger lengths use the long form: a leading octet with bit 8 set whose
//! low seven bits count the big-endian value octets that follow. The octet
//! `0x80` alone announces an indefinite-length encoding, terminated by a
//! pair of zero end-of-content octets.

use berx_core::{BerError, BerResult};

use crate::constants::INDEFINITE_LENGTH_OCTET;
use crate::stream::{ByteSink, ByteSource};

/// Most value octets accepted in a long-form length
const MAX_LENGTH_OCTETS: usize = 8;

/// A decoded BER length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    /// A definite content length in bytes
    Definite(usize),
    /// Indefinite form; content runs until end-of-content octets
    Indefinite,
}

/// Writes the definite-form length octets for `length`
pub fn put_length<S: ByteSink>(sink: &mut S, length: usize) -> BerResult<()> {
    if length <= 0x7F {
        return sink.write_byte(length as u8);
    }
    let value = length as u64;
    let octet_count = (8 - value.leading_zeros() as usize / 8).max(1);
    sink.write_byte(INDEFINITE_LENGTH_OCTET | octet_count as u8)?;
    sink.write_all(&value.to_be_bytes()[8 - octet_count..])
}

/// Writes the single octet announcing an indefinite-length encoding
pub fn put_indefinite_length<S: ByteSink>(sink: &mut S) -> BerResult<()> {
    sink.write_byte(INDEFINITE_LENGTH_OCTET)
}

/// Reads length octets
///
/// # Errors
///
/// Returns `InvalidData` for a long form with more than eight value octets
/// or a value that does not fit `usize`.
pub fn get_length<S: ByteSource>(source: &mut S) -> BerResult<Length> {
    let first = source.read_byte()?;
    if first & INDEFINITE_LENGTH_OCTET == 0 {
        return Ok(Length::Definite(first as usize));
    }
    if first == INDEFINITE_LENGTH_OCTET {
        return Ok(Length::Indefinite);
    }

    let octet_count = (first & 0x7F) as usize;
    if octet_count > MAX_LENGTH_OCTETS {
        return Err(BerError::InvalidData(format!(
            "Length uses {} octets, at most {} supported",
            octet_count, MAX_LENGTH_OCTETS
        )));
    }
    let mut buf = [0u8; MAX_LENGTH_OCTETS];
    source.read_exact(&mut buf[MAX_LENGTH_OCTETS - octet_count..])?;
    let value = u64::from_be_bytes(buf);
    usize::try_from(value)
        .map(Length::Definite)
        .map_err(|_| BerError::InvalidData(format!("Length {} does not fit usize", value)))
}

/// Writes the two zero end-of-content octets
pub fn put_end_of_content_octets<S: ByteSink>(sink: &mut S) -> BerResult<()> {
    sink.write_all(&[0x00, 0x00])
}

/// Reads and validates the two zero end-of-content octets
pub fn get_end_of_content_octets<S: ByteSource>(source: &mut S) -> BerResult<()> {
    let mut buf = [0u8; 2];
    source.read_exact(&mut buf)?;
    if buf != [0x00, 0x00] {
        return Err(BerError::InvalidData(format!(
            "Expected end-of-content octets, got {:02X} {:02X}",
            buf[0], buf[1]
        )));
    }
    Ok(())
}
