//! Byte-stream abstractions the codec reads from and writes to

use berx_core::{BerError, BerResult};
use bytes::{BufMut, BytesMut};

/// A readable stream of bytes with one-byte lookahead
///
/// `position` reports the number of bytes consumed so far, which callers
/// use to account for the length of nested encodings.
pub trait ByteSource {
    /// Returns the next byte without consuming it
    ///
    /// # Errors
    ///
    /// Returns `Stream` if the source is exhausted.
    fn peek(&self) -> BerResult<u8>;

    /// Fills `buf` from the stream, consuming exactly `buf.len()` bytes
    ///
    /// # Errors
    ///
    /// Returns `Stream` if fewer bytes remain; no bytes are consumed in
    /// that case.
    fn read_exact(&mut self, buf: &mut [u8]) -> BerResult<()>;

    /// Number of bytes consumed so far
    fn position(&self) -> usize;

    /// Reads and consumes a single byte
    fn read_byte(&mut self) -> BerResult<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }
}

/// A writable stream of bytes
pub trait ByteSink {
    /// Appends all of `buf` to the sink
    fn write_all(&mut self, buf: &[u8]) -> BerResult<()>;

    /// Appends a single byte
    fn write_byte(&mut self, byte: u8) -> BerResult<()> {
        self.write_all(&[byte])
    }
}

/// A `ByteSource` over a borrowed byte slice
#[derive(Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> SliceSource<'a> {
    /// Wraps a byte slice as a source positioned at its start
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Number of bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }
}

impl ByteSource for SliceSource<'_> {
    fn peek(&self) -> BerResult<u8> {
        self.data
            .get(self.position)
            .copied()
            .ok_or_else(|| BerError::Stream("Unexpected end of input".to_string()))
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> BerResult<()> {
        if self.remaining() < buf.len() {
            return Err(BerError::Stream(format!(
                "Unexpected end of input: need {} bytes, have {}",
                buf.len(),
                self.remaining()
            )));
        }
        buf.copy_from_slice(&self.data[self.position..self.position + buf.len()]);
        self.position += buf.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.position
    }
}

impl ByteSink for Vec<u8> {
    fn write_all(&mut self, buf: &[u8]) -> BerResult<()> {
        self.extend_from_slice(buf);
        Ok(())
    }
}

impl ByteSink for BytesMut {
    fn write_all(&mut self, buf: &[u8]) -> BerResult<()> {
        self.put_slice(buf);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_source_reads() {
        let mut source = SliceSource::new(&[0x01, 0x02, 0x03]);
        assert_eq!(source.peek().unwrap(), 0x01);
        assert_eq!(source.position(), 0);

        assert_eq!(source.read_byte().unwrap(), 0x01);
        assert_eq!(source.position(), 1);

        let mut buf = [0u8; 2];
        source.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [0x02, 0x03]);
        assert_eq!(source.position(), 3);

        assert!(source.peek().is_err());
        assert!(source.read_byte().is_err());
    }

    #[test]
    fn test_slice_source_short_read_consumes_nothing() {
        let mut source = SliceSource::new(&[0x01]);
        let mut buf = [0u8; 2];
        assert!(source.read_exact(&mut buf).is_err());
        assert_eq!(source.position(), 0);
        assert_eq!(source.read_byte().unwrap(), 0x01);
    }

    #[test]
    fn test_vec_sink() {
        let mut sink = Vec::new();
        sink.write_byte(0xAB).unwrap();
        sink.write_all(&[0xCD, 0xEF]).unwrap();
        assert_eq!(sink, vec![0xAB, 0xCD, 0xEF]);
    }

    #[test]
    fn test_bytes_mut_sink() {
        let mut sink = BytesMut::new();
        sink.write_all(&[0x01, 0x02]).unwrap();
        assert_eq!(&sink[..], &[0x01, 0x02]);
    }
}
