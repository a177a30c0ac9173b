//! Encoder and decoder configuration records
//!
//! Both records are immutable once handed to the codec; the `with_*`
//! builders exist so call sites can configure them inline.

use serde::{Deserialize, Serialize};

/// Default number of fractional-second digits written by the textual
/// date-and-time formats.
pub const DEFAULT_FRACTIONAL_SECOND_PRECISION: u8 = 3;

/// Maximum supported fractional-second digit count (nanosecond resolution
/// in text; digits beyond microseconds are zero-filled).
pub const MAX_FRACTIONAL_SECOND_PRECISION: u8 = 9;

/// Options consumed by the encoding side of the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderOptions {
    fractional_second_precision: u8,
    prefer_binary_date_time: bool,
}

impl EncoderOptions {
    /// Create options with the defaults: 3 fractional-second digits,
    /// textual (ISO-8601) date-and-time encoding.
    pub fn new() -> Self {
        Self {
            fractional_second_precision: DEFAULT_FRACTIONAL_SECOND_PRECISION,
            prefer_binary_date_time: false,
        }
    }

    /// Set the number of fractional-second digits (0..=9) used by the
    /// textual date-and-time formats. Values above the maximum are clamped.
    pub fn with_fractional_second_precision(mut self, precision: u8) -> Self {
        self.fractional_second_precision = precision.min(MAX_FRACTIONAL_SECOND_PRECISION);
        self
    }

    /// Request the binary date-and-time wire formats instead of ISO-8601
    /// text.
    pub fn with_prefer_binary_date_time(mut self, prefer: bool) -> Self {
        self.prefer_binary_date_time = prefer;
        self
    }

    /// Number of fractional-second digits for textual formats
    pub fn fractional_second_precision(&self) -> u8 {
        self.fractional_second_precision
    }

    /// Whether binary date-and-time formats are preferred over text
    pub fn prefer_binary_date_time(&self) -> bool {
        self.prefer_binary_date_time
    }
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Options consumed by the decoding side of the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecoderOptions {
    treat_empty_string_as_default: bool,
}

impl DecoderOptions {
    /// Create options with the defaults: empty strings decode as empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, a decoded empty string is replaced by the caller-supplied
    /// default in the string codec's `*_with_default` entry point.
    pub fn with_treat_empty_string_as_default(mut self, substitute: bool) -> Self {
        self.treat_empty_string_as_default = substitute;
        self
    }

    /// Whether empty decoded strings are replaced by the caller's default
    pub fn treat_empty_string_as_default(&self) -> bool {
        self.treat_empty_string_as_default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_options_defaults() {
        let options = EncoderOptions::new();
        assert_eq!(options.fractional_second_precision(), 3);
        assert!(!options.prefer_binary_date_time());
    }

    #[test]
    fn test_encoder_options_precision_clamped() {
        let options = EncoderOptions::new().with_fractional_second_precision(12);
        assert_eq!(options.fractional_second_precision(), 9);
    }

    #[test]
    fn test_decoder_options_defaults() {
        let options = DecoderOptions::new();
        assert!(!options.treat_empty_string_as_default());
    }
}
