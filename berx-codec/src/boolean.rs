//! Boolean and single-byte codec

use berx_core::{BerError, BerResult};

use crate::integer::{get_u8_value, put_uint_value};
use crate::stream::{ByteSink, ByteSource};

/// Writes a boolean as length 1 plus `0x00` (false) or `0xFF` (true)
pub fn put_bool_value<S: ByteSink>(sink: &mut S, value: bool) -> BerResult<()> {
    sink.write_all(&[0x01, if value { 0xFF } else { 0x00 }])
}

/// Reads a boolean whose `length` octet the caller has counted
///
/// Any nonzero content octet decodes as true.
pub fn get_bool_value<S: ByteSource>(source: &mut S, length: usize) -> BerResult<bool> {
    if length != 1 {
        return Err(BerError::InvalidData(format!(
            "Boolean is encoded in {} octets, expected 1",
            length
        )));
    }
    Ok(source.read_byte()? != 0)
}

/// Writes a byte value with its length prefix
pub fn put_byte_value<S: ByteSink>(sink: &mut S, value: u8) -> BerResult<()> {
    put_uint_value(sink, value as u64)
}

/// Reads a byte value whose `length` octets the caller has counted
///
/// Accepts the sign-padded two-octet form the encoder emits for values
/// with the top bit set.
pub fn get_byte_value<S: ByteSource>(source: &mut S, length: usize) -> BerResult<u8> {
    get_u8_value(source, length)
}
