//! Extended-binary date-and-time header codec
//!
//! # Encoding Format
//!
//! The extended binary formats open with a two-octet header. The first
//! octet's high bits classify the field:
//!
//! ```text
//! 0xxxxxxx          not an extended-binary header
//! 11xxxxxx          reserved, rejected on decode
//! 100xxxxx          extended binary, no timezone offset
//! 101xxxxx          extended binary, with timezone offset
//! ```
//!
//! The remaining 13 bits (the low five of the first octet and all of the
//! second) hold a two's-complement timezone offset in minutes, zero for
//! the without-timezone form.

use berx_core::{BerError, BerResult};

use crate::stream::{ByteSink, ByteSource};
use crate::timezone::is_valid_timezone_offset;

const EXTENDED_BIT: u8 = 0x80;
const RESERVED_BIT: u8 = 0x40;
const TIMEZONE_BIT: u8 = 0x20;
const OFFSET_HIGH_MASK: u8 = 0x1F;

/// Classification of a first content octet against the extended-binary
/// header grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderType {
    /// Bit 7 clear; the field uses some other format
    NotExtendedBinary,
    /// Bits 7-6 are `11`; reserved for future formats
    Reserved,
    /// An extended-binary field without a timezone offset
    ExtendedWithoutTimezone,
    /// An extended-binary field carrying a timezone offset
    ExtendedWithTimezone,
}

/// A decoded extended-binary header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedBinaryHeader {
    pub header_type: HeaderType,
    pub offset_minutes: i16,
}

/// Classifies `first_byte` without consuming anything
pub fn detect_header_type(first_byte: u8) -> HeaderType {
    if first_byte & EXTENDED_BIT == 0 {
        HeaderType::NotExtendedBinary
    } else if first_byte & RESERVED_BIT != 0 {
        HeaderType::Reserved
    } else if first_byte & TIMEZONE_BIT != 0 {
        HeaderType::ExtendedWithTimezone
    } else {
        HeaderType::ExtendedWithoutTimezone
    }
}

/// Writes the header of an extended-binary field without a timezone
pub fn put_header_without_timezone<S: ByteSink>(sink: &mut S) -> BerResult<()> {
    sink.write_all(&[EXTENDED_BIT, 0x00])
}

/// Writes the header of an extended-binary field with a timezone offset
///
/// # Errors
///
/// Returns `InvalidData` if the offset is outside `[-1439, 1439]`.
pub fn put_header_with_timezone<S: ByteSink>(sink: &mut S, offset_minutes: i16) -> BerResult<()> {
    if !is_valid_timezone_offset(offset_minutes) {
        return Err(BerError::InvalidData(format!(
            "Timezone offset is out of range [-1439, 1439], got {}",
            offset_minutes
        )));
    }
    let bits = (offset_minutes as u16) & 0x1FFF;
    sink.write_all(&[
        EXTENDED_BIT | TIMEZONE_BIT | (bits >> 8) as u8,
        bits as u8,
    ])
}

/// Reads and validates a two-octet extended-binary header
///
/// # Errors
///
/// Returns `InvalidData` for a reserved or non-extended first octet, an
/// out-of-range offset, or a nonzero offset in the without-timezone form.
pub fn get_header<S: ByteSource>(source: &mut S) -> BerResult<ExtendedBinaryHeader> {
    let mut buf = [0u8; 2];
    source.read_exact(&mut buf)?;

    let header_type = detect_header_type(buf[0]);
    match header_type {
        HeaderType::NotExtendedBinary => {
            return Err(BerError::InvalidData(format!(
                "Not an extended-binary header: {:02X} {:02X}",
                buf[0], buf[1]
            )));
        }
        HeaderType::Reserved => {
            return Err(BerError::InvalidData(format!(
                "Reserved extended-binary header: {:02X} {:02X}",
                buf[0], buf[1]
            )));
        }
        HeaderType::ExtendedWithoutTimezone | HeaderType::ExtendedWithTimezone => {}
    }

    // Sign-extend the 13-bit offset.
    let raw = (((buf[0] & OFFSET_HIGH_MASK) as u16) << 8 | buf[1] as u16) << 3;
    let offset_minutes = (raw as i16) >> 3;

    if header_type == HeaderType::ExtendedWithoutTimezone && offset_minutes != 0 {
        return Err(BerError::InvalidData(format!(
            "Header without timezone carries offset {}",
            offset_minutes
        )));
    }
    if !is_valid_timezone_offset(offset_minutes) {
        return Err(BerError::InvalidData(format!(
            "Timezone offset is out of range [-1439, 1439], got {}",
            offset_minutes
        )));
    }

    Ok(ExtendedBinaryHeader {
        header_type,
        offset_minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::SliceSource;

    #[test]
    fn test_detect_header_type() {
        assert_eq!(detect_header_type(0x00), HeaderType::NotExtendedBinary);
        assert_eq!(detect_header_type(0x7F), HeaderType::NotExtendedBinary);
        assert_eq!(detect_header_type(0x80), HeaderType::ExtendedWithoutTimezone);
        assert_eq!(detect_header_type(0x9F), HeaderType::ExtendedWithoutTimezone);
        assert_eq!(detect_header_type(0xA0), HeaderType::ExtendedWithTimezone);
        assert_eq!(detect_header_type(0xBF), HeaderType::ExtendedWithTimezone);
        assert_eq!(detect_header_type(0xC0), HeaderType::Reserved);
        assert_eq!(detect_header_type(0xFF), HeaderType::Reserved);
    }

    #[test]
    fn test_put_vectors() {
        let mut sink = Vec::new();
        put_header_without_timezone(&mut sink).unwrap();
        assert_eq!(sink, vec![0x80, 0x00]);

        let mut sink = Vec::new();
        put_header_with_timezone(&mut sink, 0).unwrap();
        assert_eq!(sink, vec![0xA0, 0x00]);

        let mut sink = Vec::new();
        put_header_with_timezone(&mut sink, 1439).unwrap();
        assert_eq!(sink, vec![0xA5, 0x9F]);

        let mut sink = Vec::new();
        put_header_with_timezone(&mut sink, -1439).unwrap();
        assert_eq!(sink, vec![0xBA, 0x61]);

        assert!(put_header_with_timezone(&mut Vec::new(), 1440).is_err());
    }

    #[test]
    fn test_get_round_trip() {
        let mut source = SliceSource::new(&[0x80, 0x00]);
        let header = get_header(&mut source).unwrap();
        assert_eq!(header.header_type, HeaderType::ExtendedWithoutTimezone);
        assert_eq!(header.offset_minutes, 0);

        for &offset in &[0i16, 1, -1, 90, 1439, -1439] {
            let mut sink = Vec::new();
            put_header_with_timezone(&mut sink, offset).unwrap();
            let mut source = SliceSource::new(&sink);
            let header = get_header(&mut source).unwrap();
            assert_eq!(header.header_type, HeaderType::ExtendedWithTimezone);
            assert_eq!(header.offset_minutes, offset);
        }
    }

    #[test]
    fn test_get_rejects_bad_headers() {
        // Reserved class.
        let mut source = SliceSource::new(&[0xC0, 0x00]);
        assert!(get_header(&mut source).is_err());
        // Not extended binary.
        let mut source = SliceSource::new(&[0x31, 0x32]);
        assert!(get_header(&mut source).is_err());
        // Without-timezone form carrying a nonzero offset.
        let mut source = SliceSource::new(&[0x85, 0x9F]);
        assert!(get_header(&mut source).is_err());
        // With-timezone form carrying 1440 minutes.
        let mut source = SliceSource::new(&[0xA5, 0xA0]);
        assert!(get_header(&mut source).is_err());
    }
}
