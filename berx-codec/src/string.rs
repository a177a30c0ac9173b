//! String and raw-octet codec
//!
//! Content octets are carried verbatim after the length prefix; BER does
//! no escaping. Text entry points validate UTF-8 on the way in and out.

use berx_core::{BerError, BerResult, DecoderOptions};

use crate::length::put_length;
use crate::stream::{ByteSink, ByteSource};

/// Writes a string as its length followed by its UTF-8 bytes
pub fn put_string_value<S: ByteSink>(sink: &mut S, value: &str) -> BerResult<()> {
    put_octets_value(sink, value.as_bytes())
}

/// Writes raw octets with their length prefix
pub fn put_octets_value<S: ByteSink>(sink: &mut S, value: &[u8]) -> BerResult<()> {
    put_length(sink, value.len())?;
    sink.write_all(value)
}

/// Reads `length` raw content octets
pub fn get_octets_value<S: ByteSource>(source: &mut S, length: usize) -> BerResult<Vec<u8>> {
    let mut buf = vec![0u8; length];
    source.read_exact(&mut buf)?;
    Ok(buf)
}

/// Reads `length` content octets as a UTF-8 string
pub fn get_string_value<S: ByteSource>(source: &mut S, length: usize) -> BerResult<String> {
    let octets = get_octets_value(source, length)?;
    String::from_utf8(octets)
        .map_err(|error| BerError::InvalidData(format!("String is not valid UTF-8: {}", error)))
}

/// Reads a string, substituting `default` for an empty one when the
/// options ask for it
pub fn get_string_value_with_default<S: ByteSource>(
    source: &mut S,
    length: usize,
    default: &str,
    options: &DecoderOptions,
) -> BerResult<String> {
    let value = get_string_value(source, length)?;
    if value.is_empty() && options.treat_empty_string_as_default() {
        return Ok(default.to_string());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::SliceSource;

    #[test]
    fn test_string_vectors() {
        let mut sink = Vec::new();
        put_string_value(&mut sink, "Hello").unwrap();
        assert_eq!(sink, vec![0x05, b'H', b'e', b'l', b'l', b'o']);

        let mut sink = Vec::new();
        put_string_value(&mut sink, "").unwrap();
        assert_eq!(sink, vec![0x00]);
    }

    #[test]
    fn test_octets_round_trip() {
        let payload = [0x00u8, 0xFF, 0x80, 0x7F];
        let mut sink = Vec::new();
        put_octets_value(&mut sink, &payload).unwrap();
        assert_eq!(sink[0], 0x04);

        let mut source = SliceSource::new(&sink[1..]);
        assert_eq!(get_octets_value(&mut source, 4).unwrap(), payload);
    }

    #[test]
    fn test_string_decode() {
        let mut source = SliceSource::new(b"Hello");
        assert_eq!(get_string_value(&mut source, 5).unwrap(), "Hello");

        // Invalid UTF-8.
        let mut source = SliceSource::new(&[0xFF, 0xFE]);
        assert!(get_string_value(&mut source, 2).is_err());

        // Truncated input.
        let mut source = SliceSource::new(b"He");
        assert!(get_string_value(&mut source, 5).is_err());
    }

    #[test]
    fn test_empty_string_default_substitution() {
        let options = DecoderOptions::new().with_treat_empty_string_as_default(true);
        let mut source = SliceSource::new(&[]);
        assert_eq!(
            get_string_value_with_default(&mut source, 0, "fallback", &options).unwrap(),
            "fallback"
        );

        // Substitution only applies to empty strings.
        let mut source = SliceSource::new(b"x");
        assert_eq!(
            get_string_value_with_default(&mut source, 1, "fallback", &options).unwrap(),
            "x"
        );

        // And only when the option is set.
        let options = DecoderOptions::new();
        let mut source = SliceSource::new(&[]);
        assert_eq!(
            get_string_value_with_default(&mut source, 0, "fallback", &options).unwrap(),
            ""
        );
    }
}
