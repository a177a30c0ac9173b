//! 64-bit IEEE 754-2008 decimal floating-point carrier

use serde::{Deserialize, Serialize};

/// An opaque 64-bit decimal floating-point value
///
/// The codec transports the IEEE 754-2008 decimal64 interchange bit pattern
/// without interpreting it; arithmetic and formatting belong to a dedicated
/// decimal library. The wrapper exists so decimal values cannot be confused
/// with plain integers at API boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decimal64(u64);

impl Decimal64 {
    /// Wraps a raw decimal64 interchange bit pattern
    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Get the raw interchange bit pattern
    pub fn to_bits(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_round_trip() {
        let value = Decimal64::from_bits(0x2238_0000_0000_03D0);
        assert_eq!(value.to_bits(), 0x2238_0000_0000_03D0);
    }
}
