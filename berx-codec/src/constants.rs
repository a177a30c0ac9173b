//! Wire-format constants shared across the codec modules

/// Bits in one octet
pub const BITS_PER_OCTET: u32 = 8;

/// Value bits carried by each octet of a multi-octet tag number
pub const TAG_VALUE_BITS_PER_OCTET: u32 = 7;

/// Most octets a multi-octet tag number may occupy (tag numbers are
/// bounded to `i32`)
pub const MAX_TAG_NUMBER_OCTETS: usize = 5;

/// Length octet announcing an indefinite-length encoding
pub const INDEFINITE_LENGTH_OCTET: u8 = 0x80;

/// Serial day number of 2020-01-01, the epoch of the compact and extended
/// binary date-and-time formats
pub const EPOCH_SERIAL_DAY: i32 = 737_425;
